//! The document backend boundary.
//!
//! The editing core treats the underlying document as an opaque
//! collaborator: it can list the outline, mint page destinations, resolve
//! a destination back to a page index, and persist the edited tree. The
//! PDF object graph and file format live entirely behind this trait.

mod memory;

pub use memory::MemoryDocument;

use crate::structure::{Destination, OutlineEntry, PageMode};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("page {page} out of range (document has {page_count} pages)")]
    PageOutOfRange { page: u32, page_count: u32 },
}

/// Document-outline backend required by the editing core.
///
/// One backend instance corresponds to one open document; the outline
/// model owns the handle exclusively for the lifetime of the document.
pub trait DocumentBackend {
    /// Number of pages in the document
    fn page_count(&self) -> u32;

    /// Ordered top-level outline entries, each with its nested children
    fn outline_root(&self) -> Vec<OutlineEntry>;

    /// Mint a destination for a zero-based page number
    fn make_destination(&self, page: u32) -> Result<Destination, BackendError>;

    /// Resolve a destination to a zero-based page index by identity
    /// matching against the document's page list
    fn resolve_page_index(&self, dest: &Destination) -> Option<u32>;

    /// Persist the outline tree and page display mode
    fn save(
        &mut self,
        path: &Path,
        outline: &[OutlineEntry],
        page_mode: PageMode,
    ) -> Result<(), BackendError>;
}
