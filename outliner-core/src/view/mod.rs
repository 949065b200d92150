//! The presentation layer: a visual row tree kept isomorphic to the
//! outline model after every gesture, with a bijective correspondence map
//! translating between the two.

mod editor;
mod row;

pub use editor::{Correspondence, OutlineEditor};
pub use row::{RowId, RowTree, VisualRow};
