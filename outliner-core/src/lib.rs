//! # pdf-outliner
//!
//! An editing model for the bookmark (outline) tree of a PDF document:
//! open a document, walk its nested outline, and add, rename, reorder,
//! re-parent, retarget or delete entries before persisting the result.
//!
//! Two tree structures are kept in lockstep: the canonical outline tree
//! ([`OutlineModel`]) backed by the document, and the visual row tree the
//! user edits ([`OutlineEditor`]). Every gesture is translated into a
//! model operation and the identical structural delta is mirrored onto
//! the rows through a bijective correspondence map, using only local
//! pointer/index surgery.
//!
//! ## Quick start
//!
//! ```rust
//! use pdf_outliner::{MemoryDocument, OutlineEditor, PageMode, Result};
//!
//! # fn main() -> Result<()> {
//! let mut editor = OutlineEditor::open(MemoryDocument::with_pages(10));
//!
//! // Build an outline (pages are zero-based internally)
//! editor.insert_after("Chapter 1", 0)?;
//! editor.insert_after("Chapter 2", 5)?;
//!
//! // Demote "Chapter 2" under "Chapter 1"
//! editor.move_in_selected()?;
//!
//! // Persist the tree and a page display mode
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("out.json");
//! editor.save(&path, PageMode::ShowOutlines)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`outline`] - the canonical bookmark tree and its mutation operations
//! - [`view`] - visual rows, correspondence map and the gesture layer
//! - [`backend`] - the opaque document collaborator boundary
//! - [`structure`] - destinations, actions, page modes and the nested
//!   interchange form

pub mod backend;
pub mod error;
pub mod outline;
pub mod structure;
pub mod view;

pub use backend::{BackendError, DocumentBackend, MemoryDocument};
pub use error::{OutlineError, Result};
pub use outline::{NodeId, OutlineModel, OutlineNode};
pub use structure::{
    BookmarkTarget, Destination, DestinationKind, OutlineAction, OutlineEntry, PageMode, PageRef,
};
pub use view::{Correspondence, OutlineEditor, RowId, RowTree, VisualRow};
