//! The outline model: an id-based arena over the document's bookmark tree
//! plus the parent index that makes upward navigation possible.
//!
//! Nodes store only downward links, so every structural mutation must
//! update the parent index in the same call. All moves are expressed as
//! "detach, then insert relative to a sibling" so the presentation layer
//! can mirror them with the same relative addressing. Every operation
//! validates completely before touching the tree; a failed call leaves the
//! model unchanged.

use super::{NodeId, OutlineNode};
use crate::backend::DocumentBackend;
use crate::error::{OutlineError, Result};
use crate::structure::{BookmarkTarget, OutlineEntry, PageMode};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

pub struct OutlineModel<B> {
    backend: B,
    nodes: HashMap<NodeId, OutlineNode>,
    /// Top-level node ids, in display order
    roots: Vec<NodeId>,
    /// Parent index: `None` is the root sentinel. Maintained atomically
    /// with every structural mutation.
    parents: HashMap<NodeId, Option<NodeId>>,
    next_id: u64,
}

impl<B: DocumentBackend> OutlineModel<B> {
    /// Wrap the backend's outline tree into the arena. The model owns the
    /// backend exclusively until the document is dropped.
    pub fn open(backend: B) -> Self {
        let mut model = Self {
            backend,
            nodes: HashMap::new(),
            roots: Vec::new(),
            parents: HashMap::new(),
            next_id: 0,
        };
        let entries = model.backend.outline_root();
        for entry in entries {
            let id = model.import(entry, None);
            model.roots.push(id);
        }
        model
    }

    fn import(&mut self, entry: OutlineEntry, parent: Option<NodeId>) -> NodeId {
        let id = self.alloc();
        let mut node = OutlineNode::new(entry.title, entry.target);
        for child in entry.children {
            let child_id = self.import(child, Some(id));
            node.children.push(child_id);
        }
        self.nodes.insert(id, node);
        self.parents.insert(id, parent);
        id
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Ordered children of `parent`, or the top-level sequence for the
    /// root sentinel. Empty for an unknown node.
    pub fn children_of(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            None => &self.roots,
            Some(id) => self
                .nodes
                .get(&id)
                .map(|n| n.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    /// Node data, if the node is live
    pub fn node(&self, id: NodeId) -> Option<&OutlineNode> {
        self.nodes.get(&id)
    }

    /// Parent of a node per the parent index (`None` = top-level).
    /// Errors if the node has no index entry.
    pub fn parent_of(&self, id: NodeId) -> Result<Option<NodeId>> {
        self.parents.get(&id).copied().ok_or(OutlineError::Detached)
    }

    /// Top-level node ids
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of live nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of parent-index entries (equals `node_count` when consistent)
    pub fn tracked_count(&self) -> usize {
        self.parents.len()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn position_of(&self, parent: Option<NodeId>, id: NodeId) -> Result<usize> {
        self.children_of(parent)
            .iter()
            .position(|&c| c == id)
            .ok_or(OutlineError::Detached)
    }

    fn children_mut(&mut self, parent: Option<NodeId>) -> Result<&mut Vec<NodeId>> {
        match parent {
            None => Ok(&mut self.roots),
            Some(id) => self
                .nodes
                .get_mut(&id)
                .map(|n| &mut n.children)
                .ok_or(OutlineError::Detached),
        }
    }

    /// True when `node` lies strictly inside the subtree rooted at `ancestor`
    fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parents.get(&node).copied().flatten();
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self.parents.get(&p).copied().flatten();
        }
        false
    }

    /// Create a node and insert it under `parent` at
    /// `index_of(sibling) + offset` (offset 0 = before, 1 = after), or
    /// append when no sibling is given.
    pub fn insert(
        &mut self,
        title: impl Into<String>,
        target: BookmarkTarget,
        parent: Option<NodeId>,
        sibling: Option<NodeId>,
        offset: usize,
    ) -> Result<NodeId> {
        if let Some(pid) = parent {
            if !self.nodes.contains_key(&pid) {
                return Err(OutlineError::Detached);
            }
        }
        let siblings = self.children_of(parent);
        let position = match sibling {
            Some(sib) => {
                let index = siblings
                    .iter()
                    .position(|&c| c == sib)
                    .ok_or(OutlineError::StraySibling)?;
                (index + offset).min(siblings.len())
            }
            None => siblings.len(),
        };

        let id = self.alloc();
        let title = title.into();
        debug!(?id, %title, position, "insert bookmark");
        self.nodes.insert(id, OutlineNode::new(title, target));
        self.children_mut(parent)?.insert(position, id);
        self.parents.insert(id, parent);
        Ok(id)
    }

    /// Detach `node` (and its subtree) from the tree and forget it.
    /// Errors if the node has no parent-index entry.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        let parent = self.parent_of(id)?;
        let position = self.position_of(parent, id)?;
        debug!(?id, "remove bookmark subtree");
        self.children_mut(parent)?.remove(position);
        self.drop_subtree(id);
        Ok(())
    }

    fn drop_subtree(&mut self, id: NodeId) {
        self.parents.remove(&id);
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.drop_subtree(child);
            }
        }
    }

    /// Swap `node` with its previous sibling. `Ok(false)` when already first.
    pub fn move_up(&mut self, id: NodeId) -> Result<bool> {
        let parent = self.parent_of(id)?;
        let position = self.position_of(parent, id)?;
        if position == 0 {
            return Ok(false);
        }
        self.children_mut(parent)?.swap(position - 1, position);
        Ok(true)
    }

    /// Swap `node` with its next sibling. `Ok(false)` when already last.
    pub fn move_down(&mut self, id: NodeId) -> Result<bool> {
        let parent = self.parent_of(id)?;
        let position = self.position_of(parent, id)?;
        if position == self.children_of(parent).len() - 1 {
            return Ok(false);
        }
        self.children_mut(parent)?.swap(position, position + 1);
        Ok(true)
    }

    /// Demote `node` to be the last child of its preceding sibling.
    /// `Ok(false)` when the node is first among its siblings.
    pub fn move_in(&mut self, id: NodeId) -> Result<bool> {
        let parent = self.parent_of(id)?;
        let position = self.position_of(parent, id)?;
        if position == 0 {
            return Ok(false);
        }
        let new_parent = self.children_of(parent)[position - 1];
        debug!(?id, ?new_parent, "demote bookmark under preceding sibling");
        self.children_mut(parent)?.remove(position);
        self.children_mut(Some(new_parent))?.push(id);
        self.parents.insert(id, Some(new_parent));
        Ok(true)
    }

    /// Promote `node` to be a sibling of its parent, placed immediately
    /// after it. Errors with `AtRoot` for a top-level node.
    pub fn move_out(&mut self, id: NodeId) -> Result<()> {
        let parent = self.parent_of(id)?.ok_or(OutlineError::AtRoot)?;
        let grandparent = self.parent_of(parent)?;
        let position = self.position_of(Some(parent), id)?;
        let parent_position = self.position_of(grandparent, parent)?;
        debug!(?id, "promote bookmark next to its parent");
        self.children_mut(Some(parent))?.remove(position);
        self.children_mut(grandparent)?.insert(parent_position + 1, id);
        self.parents.insert(id, grandparent);
        Ok(())
    }

    /// General re-parent: detach `node` and insert it into `new_parent`'s
    /// children immediately after `prev_sibling`, or as the first child
    /// when `prev_sibling` is `None`. Rejects moves into the node's own
    /// subtree.
    pub fn move_to(
        &mut self,
        new_parent: Option<NodeId>,
        prev_sibling: Option<NodeId>,
        id: NodeId,
    ) -> Result<()> {
        let parent = self.parent_of(id)?;
        if let Some(np) = new_parent {
            if !self.nodes.contains_key(&np) {
                return Err(OutlineError::Detached);
            }
            if np == id || self.is_descendant_of(np, id) {
                return Err(OutlineError::IntoOwnSubtree);
            }
        }
        if let Some(prev) = prev_sibling {
            if prev == id || !self.children_of(new_parent).contains(&prev) {
                return Err(OutlineError::StraySibling);
            }
        }

        let position = self.position_of(parent, id)?;
        debug!(?id, ?new_parent, "re-parent bookmark");
        self.children_mut(parent)?.remove(position);
        // prev_sibling's index is looked up after the detach: when the node
        // moves within the same sibling list the indices have shifted.
        let insert_at = match prev_sibling {
            Some(prev) => self.position_of(new_parent, prev)? + 1,
            None => 0,
        };
        self.children_mut(new_parent)?.insert(insert_at, id);
        self.parents.insert(id, new_parent);
        Ok(())
    }

    /// Change a bookmark's title in place
    pub fn rename(&mut self, id: NodeId, title: impl Into<String>) -> Result<()> {
        let node = self.nodes.get_mut(&id).ok_or(OutlineError::Detached)?;
        node.title = title.into();
        Ok(())
    }

    /// Point a bookmark at a zero-based page, minting a fresh destination
    /// through the backend
    pub fn retarget(&mut self, id: NodeId, page: u32) -> Result<()> {
        if !self.nodes.contains_key(&id) {
            return Err(OutlineError::Detached);
        }
        let dest = self.backend.make_destination(page)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.target = BookmarkTarget::Page(dest);
        }
        Ok(())
    }

    /// Detach all top-level children and empty the parent index
    pub fn clear(&mut self) {
        debug!("clear outline");
        self.roots.clear();
        self.nodes.clear();
        self.parents.clear();
    }

    /// Flatten the arena back into the nested interchange form
    pub fn export(&self) -> Vec<OutlineEntry> {
        self.roots.iter().map(|&id| self.export_node(id)).collect()
    }

    fn export_node(&self, id: NodeId) -> OutlineEntry {
        match self.nodes.get(&id) {
            Some(node) => OutlineEntry {
                title: node.title.clone(),
                target: node.target.clone(),
                children: node.children.iter().map(|&c| self.export_node(c)).collect(),
            },
            // Unreachable for a consistent tree; keep export total.
            None => OutlineEntry::new("", BookmarkTarget::None),
        }
    }

    /// Persist the in-memory tree and page mode through the backend
    pub fn save(&mut self, path: impl AsRef<Path>, page_mode: PageMode) -> Result<()> {
        let entries = self.export();
        self.backend.save(path.as_ref(), &entries, page_mode)?;
        Ok(())
    }
}
