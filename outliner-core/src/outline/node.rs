use crate::structure::BookmarkTarget;

/// Identity of a bookmark node, stable across reorders and re-parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u64);

/// One bookmark entry in the arena. Stores only downward links; parent
/// lookup goes through the model's parent index.
#[derive(Debug, Clone)]
pub struct OutlineNode {
    pub title: String,
    pub target: BookmarkTarget,
    pub(crate) children: Vec<NodeId>,
}

impl OutlineNode {
    pub(crate) fn new(title: impl Into<String>, target: BookmarkTarget) -> Self {
        Self {
            title: title.into(),
            target,
            children: Vec::new(),
        }
    }

    /// Ordered child ids
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
