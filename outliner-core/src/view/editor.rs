//! The gesture layer: translates user edits expressed against visual rows
//! into outline-model operations, then mirrors the identical structural
//! delta onto the row tree.
//!
//! Boundary conditions are checked once, up front; when a gesture is a
//! no-op in the model it is a no-op visually too (no speculative visual
//! move, no selection change). A failing gesture mutates neither tree.

use super::row::{RowId, RowTree};
use crate::backend::DocumentBackend;
use crate::error::{OutlineError, Result};
use crate::outline::{NodeId, OutlineModel};
use crate::structure::{BookmarkTarget, PageMode};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Bijective row <-> node association. Entries are created and destroyed
/// strictly in pairs; never inferred by position.
#[derive(Default)]
pub struct Correspondence {
    row_to_node: HashMap<RowId, NodeId>,
    node_to_row: HashMap<NodeId, RowId>,
}

impl Correspondence {
    fn pair(&mut self, row: RowId, node: NodeId) {
        self.row_to_node.insert(row, node);
        self.node_to_row.insert(node, row);
    }

    fn unpair_row(&mut self, row: RowId) {
        if let Some(node) = self.row_to_node.remove(&row) {
            self.node_to_row.remove(&node);
        }
    }

    pub fn node_for(&self, row: RowId) -> Option<NodeId> {
        self.row_to_node.get(&row).copied()
    }

    pub fn row_for(&self, node: NodeId) -> Option<RowId> {
        self.node_to_row.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.row_to_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_to_node.is_empty()
    }

    fn clear(&mut self) {
        self.row_to_node.clear();
        self.node_to_row.clear();
    }
}

/// The presentation-tree adapter: owns the outline model, the visual row
/// tree, the correspondence map and the current selection.
pub struct OutlineEditor<B> {
    model: OutlineModel<B>,
    tree: RowTree,
    map: Correspondence,
    selection: Option<RowId>,
}

impl<B: DocumentBackend> OutlineEditor<B> {
    /// Open a document: wrap its outline into the model, then mirror it
    /// into visual rows with a depth-first walk.
    pub fn open(backend: B) -> Self {
        let model = OutlineModel::open(backend);
        let mut editor = Self {
            model,
            tree: RowTree::new(),
            map: Correspondence::default(),
            selection: None,
        };
        let roots = editor.model.roots().to_vec();
        for node in roots {
            editor.load_row(None, node);
        }
        debug!(rows = editor.tree.len(), "loaded outline view");
        editor
    }

    fn load_row(&mut self, parent: Option<RowId>, node: NodeId) {
        let (name, text, children) = match self.model.node(node) {
            Some(n) => (n.title.clone(), self.target_text(&n.target), n.children().to_vec()),
            None => return,
        };
        let row = self.tree.create(name, text);
        self.tree.add_child(parent, row);
        self.map.pair(row, node);
        for child in children {
            self.load_row(Some(row), child);
        }
    }

    /// Display text for the target column: resolved page index rendered
    /// 1-based, an action descriptor, or "None".
    fn target_text(&self, target: &BookmarkTarget) -> String {
        match target {
            BookmarkTarget::Page(dest) => match self.model.backend().resolve_page_index(dest) {
                Some(index) => (index + 1).to_string(),
                None => "None".to_string(),
            },
            BookmarkTarget::Action(action) => action.to_string(),
            BookmarkTarget::None => "None".to_string(),
        }
    }

    fn row_text_for(&self, node: NodeId) -> String {
        let target = self
            .model
            .node(node)
            .map(|n| n.target.clone())
            .unwrap_or_default();
        self.target_text(&target)
    }

    // --- selection -------------------------------------------------------

    pub fn selected(&self) -> Option<RowId> {
        self.selection
    }

    pub fn select(&mut self, row: RowId) -> Result<()> {
        if !self.tree.contains(row) {
            return Err(OutlineError::Detached);
        }
        self.selection = Some(row);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Resolve a zero-based index path (child positions from the top
    /// level down) to a row.
    pub fn row_at_path(&self, path: &[usize]) -> Option<RowId> {
        let mut parent = None;
        let mut found = None;
        for &index in path {
            let row = *self.tree.children(parent).get(index)?;
            parent = Some(row);
            found = Some(row);
        }
        found
    }

    // --- gestures --------------------------------------------------------

    /// Insert a new bookmark before the current selection
    pub fn insert_before(&mut self, title: &str, page: u32) -> Result<Option<RowId>> {
        self.insert_at_offset(title, page, 0)
    }

    /// Insert a new bookmark after the current selection
    pub fn insert_after(&mut self, title: &str, page: u32) -> Result<Option<RowId>> {
        self.insert_at_offset(title, page, 1)
    }

    fn insert_at_offset(&mut self, title: &str, page: u32, offset: usize) -> Result<Option<RowId>> {
        let target = BookmarkTarget::Page(self.model.backend().make_destination(page)?);

        // Nothing in the outline yet: insert at the top level.
        if self.tree.is_empty() {
            let node = self.model.insert(title, target, None, None, 0)?;
            let row = self.tree.create(title, self.row_text_for(node));
            self.tree.insert_child(None, 0, row);
            self.map.pair(row, node);
            self.selection = Some(row);
            return Ok(Some(row));
        }

        let Some(selected) = self.selection else {
            return Ok(None);
        };
        let parent_row = self.tree.parent_of(selected);
        let parent_node = match parent_row {
            Some(p) => Some(self.map.node_for(p).ok_or(OutlineError::Detached)?),
            None => None,
        };
        let sibling_node = self.map.node_for(selected).ok_or(OutlineError::Detached)?;
        let index = self
            .tree
            .index_of(parent_row, selected)
            .ok_or(OutlineError::Detached)?
            + offset;

        let node = self
            .model
            .insert(title, target, parent_node, Some(sibling_node), offset)?;
        let row = self.tree.create(title, self.row_text_for(node));
        self.tree.insert_child(parent_row, index, row);
        self.map.pair(row, node);
        self.selection = Some(row);
        Ok(Some(row))
    }

    /// Delete the selected bookmark and its subtree from both trees.
    /// `Ok(false)` when nothing is selected.
    pub fn delete_selected(&mut self) -> Result<bool> {
        let Some(selected) = self.selection else {
            return Ok(false);
        };
        let node = self.map.node_for(selected).ok_or(OutlineError::Detached)?;
        self.model.remove(node)?;
        for dropped in self.tree.remove_subtree(selected) {
            self.map.unpair_row(dropped);
        }
        self.selection = None;
        Ok(true)
    }

    /// Delete every bookmark
    pub fn clear_all(&mut self) {
        self.model.clear();
        self.tree.clear();
        self.map.clear();
        self.selection = None;
    }

    /// Swap the selected row with its previous sibling.
    /// `Ok(false)` when unselected or already first.
    pub fn move_up_selected(&mut self) -> Result<bool> {
        let Some(selected) = self.selection else {
            return Ok(false);
        };
        let parent = self.tree.parent_of(selected);
        let index = self
            .tree
            .index_of(parent, selected)
            .ok_or(OutlineError::Detached)?;
        if index == 0 {
            return Ok(false);
        }
        let node = self.map.node_for(selected).ok_or(OutlineError::Detached)?;
        self.model.move_up(node)?;
        self.tree.take_child(parent, index);
        self.tree.insert_child(parent, index - 1, selected);
        Ok(true)
    }

    /// Swap the selected row with its next sibling.
    /// `Ok(false)` when unselected or already last.
    pub fn move_down_selected(&mut self) -> Result<bool> {
        let Some(selected) = self.selection else {
            return Ok(false);
        };
        let parent = self.tree.parent_of(selected);
        let index = self
            .tree
            .index_of(parent, selected)
            .ok_or(OutlineError::Detached)?;
        if index == self.tree.child_count(parent) - 1 {
            return Ok(false);
        }
        let node = self.map.node_for(selected).ok_or(OutlineError::Detached)?;
        self.model.move_down(node)?;
        self.tree.take_child(parent, index);
        self.tree.insert_child(parent, index + 1, selected);
        Ok(true)
    }

    /// Demote the selected row under its preceding sibling.
    /// `Ok(false)` when unselected or first among its siblings.
    pub fn move_in_selected(&mut self) -> Result<bool> {
        let Some(selected) = self.selection else {
            return Ok(false);
        };
        let parent = self.tree.parent_of(selected);
        let index = self
            .tree
            .index_of(parent, selected)
            .ok_or(OutlineError::Detached)?;
        if index == 0 {
            return Ok(false);
        }
        let previous = self.tree.children(parent)[index - 1];
        let node = self.map.node_for(selected).ok_or(OutlineError::Detached)?;
        self.model.move_in(node)?;
        self.tree.take_child(parent, index);
        self.tree.add_child(Some(previous), selected);
        Ok(true)
    }

    /// Promote the selected row next to its parent. Errors with `AtRoot`
    /// for a top-level row; `Ok(false)` when nothing is selected.
    pub fn move_out_selected(&mut self) -> Result<bool> {
        let Some(selected) = self.selection else {
            return Ok(false);
        };
        let Some(parent_row) = self.tree.parent_of(selected) else {
            return Err(OutlineError::AtRoot);
        };
        let grandparent = self.tree.parent_of(parent_row);
        let index = self
            .tree
            .index_of(Some(parent_row), selected)
            .ok_or(OutlineError::Detached)?;
        let parent_index = self
            .tree
            .index_of(grandparent, parent_row)
            .ok_or(OutlineError::Detached)?;
        let node = self.map.node_for(selected).ok_or(OutlineError::Detached)?;
        self.model.move_out(node)?;
        self.tree.take_child(Some(parent_row), index);
        self.tree.insert_child(grandparent, parent_index + 1, selected);
        Ok(true)
    }

    /// Drag-style re-parent: move the selected row under `new_parent`,
    /// directly after `prev_sibling` (or as the first child when `None`).
    pub fn move_selected_to(
        &mut self,
        new_parent: Option<RowId>,
        prev_sibling: Option<RowId>,
    ) -> Result<bool> {
        let Some(selected) = self.selection else {
            return Ok(false);
        };
        let node = self.map.node_for(selected).ok_or(OutlineError::Detached)?;
        let parent_node = match new_parent {
            Some(p) => Some(self.map.node_for(p).ok_or(OutlineError::Detached)?),
            None => None,
        };
        let prev_node = match prev_sibling {
            Some(p) => Some(self.map.node_for(p).ok_or(OutlineError::Detached)?),
            None => None,
        };
        self.model.move_to(parent_node, prev_node, node)?;

        let old_parent = self.tree.parent_of(selected);
        let index = self
            .tree
            .index_of(old_parent, selected)
            .ok_or(OutlineError::Detached)?;
        self.tree.take_child(old_parent, index);
        // Same relative addressing as the model: prev's index after detach.
        let insert_at = match prev_sibling {
            Some(prev) => self
                .tree
                .index_of(new_parent, prev)
                .map(|i| i + 1)
                .unwrap_or(0),
            None => 0,
        };
        self.tree.insert_child(new_parent, insert_at, selected);
        Ok(true)
    }

    /// Rename the selected bookmark (name-column edit).
    /// `Ok(false)` when nothing is selected.
    pub fn rename_selected(&mut self, title: &str) -> Result<bool> {
        let Some(selected) = self.selection else {
            return Ok(false);
        };
        let node = self.map.node_for(selected).ok_or(OutlineError::Detached)?;
        self.model.rename(node, title)?;
        if let Some(row) = self.tree.row_mut(selected) {
            row.name = title.to_string();
        }
        Ok(true)
    }

    /// Retarget the selected bookmark from the page-column text, which is
    /// 1-based as displayed. Non-numeric or out-of-range input is rejected
    /// at this boundary with no model mutation; the caller reverts the
    /// field to its previous value.
    pub fn retarget_selected(&mut self, page_text: &str) -> Result<bool> {
        let Some(selected) = self.selection else {
            return Ok(false);
        };
        let display: u32 = page_text
            .trim()
            .parse()
            .map_err(|_| OutlineError::PageInput(page_text.to_string()))?;
        if display == 0 {
            return Err(OutlineError::PageInput(page_text.to_string()));
        }
        let node = self.map.node_for(selected).ok_or(OutlineError::Detached)?;
        self.model.retarget(node, display - 1)?;
        if let Some(row) = self.tree.row_mut(selected) {
            row.target_text = display.to_string();
        }
        Ok(true)
    }

    /// Persist the outline and page mode through the backend
    pub fn save(&mut self, path: impl AsRef<Path>, page_mode: PageMode) -> Result<()> {
        self.model.save(path, page_mode)
    }

    // --- read access -----------------------------------------------------

    pub fn model(&self) -> &OutlineModel<B> {
        &self.model
    }

    pub fn rows(&self) -> &RowTree {
        &self.tree
    }

    pub fn correspondence(&self) -> &Correspondence {
        &self.map
    }
}
