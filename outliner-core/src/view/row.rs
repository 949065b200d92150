//! The visual row tree: what the user sees and addresses gestures at.
//!
//! The primitives (`index_of`, `take_child`, `insert_child`, `add_child`,
//! `child_count`) are deliberately uniform over `Option<RowId>` so that
//! top-level rows and nested rows are handled by the same code paths.

use std::collections::HashMap;

/// Identity of a visual row, stable across reorders and re-parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

/// One row of the two-column presentation tree.
#[derive(Debug, Clone)]
pub struct VisualRow {
    /// Name column (bookmark title)
    pub name: String,
    /// Target column (1-based page text, action descriptor, or "None")
    pub target_text: String,
    parent: Option<RowId>,
    children: Vec<RowId>,
}

impl VisualRow {
    pub fn children(&self) -> &[RowId] {
        &self.children
    }
}

#[derive(Default)]
pub struct RowTree {
    rows: HashMap<RowId, VisualRow>,
    roots: Vec<RowId>,
    next_id: u64,
}

impl RowTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached row; attach it with `add_child`/`insert_child`
    pub fn create(&mut self, name: impl Into<String>, target_text: impl Into<String>) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.insert(
            id,
            VisualRow {
                name: name.into(),
                target_text: target_text.into(),
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    pub fn row(&self, id: RowId) -> Option<&VisualRow> {
        self.rows.get(&id)
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut VisualRow> {
        self.rows.get_mut(&id)
    }

    /// Parent of a row, `None` for top-level (or unknown) rows
    pub fn parent_of(&self, id: RowId) -> Option<RowId> {
        self.rows.get(&id).and_then(|r| r.parent)
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.rows.contains_key(&id)
    }

    /// Ordered children of `parent`, or the top-level rows for `None`
    pub fn children(&self, parent: Option<RowId>) -> &[RowId] {
        match parent {
            None => &self.roots,
            Some(id) => self
                .rows
                .get(&id)
                .map(|r| r.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    pub fn child_count(&self, parent: Option<RowId>) -> usize {
        self.children(parent).len()
    }

    pub fn index_of(&self, parent: Option<RowId>, row: RowId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == row)
    }

    fn child_list_mut(&mut self, parent: Option<RowId>) -> Option<&mut Vec<RowId>> {
        match parent {
            None => Some(&mut self.roots),
            Some(id) => self.rows.get_mut(&id).map(|r| &mut r.children),
        }
    }

    /// Detach the child at `index` from `parent`, keeping its storage
    pub fn take_child(&mut self, parent: Option<RowId>, index: usize) -> Option<RowId> {
        let list = self.child_list_mut(parent)?;
        if index >= list.len() {
            return None;
        }
        let id = list.remove(index);
        if let Some(row) = self.rows.get_mut(&id) {
            row.parent = None;
        }
        Some(id)
    }

    /// Attach `row` under `parent` at `index`
    pub fn insert_child(&mut self, parent: Option<RowId>, index: usize, row: RowId) {
        if let Some(list) = self.child_list_mut(parent) {
            let index = index.min(list.len());
            list.insert(index, row);
        }
        if let Some(r) = self.rows.get_mut(&row) {
            r.parent = parent;
        }
    }

    /// Attach `row` as the last child of `parent`
    pub fn add_child(&mut self, parent: Option<RowId>, row: RowId) {
        let index = self.child_count(parent);
        self.insert_child(parent, index, row);
    }

    /// Detach a row from its parent and drop its whole subtree from
    /// storage, returning every dropped id (for correspondence cleanup)
    pub fn remove_subtree(&mut self, id: RowId) -> Vec<RowId> {
        let parent = self.parent_of(id);
        if let Some(index) = self.index_of(parent, id) {
            if let Some(list) = self.child_list_mut(parent) {
                list.remove(index);
            }
        }
        let mut dropped = Vec::new();
        self.drop_rows(id, &mut dropped);
        dropped
    }

    fn drop_rows(&mut self, id: RowId, dropped: &mut Vec<RowId>) {
        if let Some(row) = self.rows.remove(&id) {
            dropped.push(id);
            for child in row.children {
                self.drop_rows(child, dropped);
            }
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.roots.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_index() {
        let mut tree = RowTree::new();
        let a = tree.create("A", "1");
        let b = tree.create("B", "2");
        tree.add_child(None, a);
        tree.insert_child(None, 0, b);

        assert_eq!(tree.children(None), [b, a]);
        assert_eq!(tree.index_of(None, a), Some(1));
        assert_eq!(tree.parent_of(a), None);
    }

    #[test]
    fn test_take_and_reattach() {
        let mut tree = RowTree::new();
        let a = tree.create("A", "1");
        let b = tree.create("B", "2");
        tree.add_child(None, a);
        tree.add_child(None, b);

        let taken = tree.take_child(None, 1).unwrap();
        assert_eq!(taken, b);
        assert_eq!(tree.child_count(None), 1);

        tree.add_child(Some(a), b);
        assert_eq!(tree.parent_of(b), Some(a));
        assert_eq!(tree.children(Some(a)), [b]);
    }

    #[test]
    fn test_remove_subtree_reports_all_rows() {
        let mut tree = RowTree::new();
        let a = tree.create("A", "1");
        let b = tree.create("B", "2");
        let c = tree.create("C", "3");
        tree.add_child(None, a);
        tree.add_child(Some(a), b);
        tree.add_child(Some(b), c);

        let mut dropped = tree.remove_subtree(a);
        dropped.sort_by_key(|r| format!("{r:?}"));
        assert_eq!(dropped.len(), 3);
        assert!(tree.is_empty());
        assert!(tree.children(None).is_empty());
    }

    #[test]
    fn test_take_child_out_of_bounds() {
        let mut tree = RowTree::new();
        let a = tree.create("A", "1");
        tree.add_child(None, a);
        assert!(tree.take_child(None, 5).is_none());
        assert_eq!(tree.child_count(None), 1);
    }
}
