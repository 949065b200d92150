//! In-memory document backend over a JSON outline file.
//!
//! The on-disk form is `{ "page_count": N, "page_mode": ..., "outline":
//! [...] }`. Page references are synthesized deterministically from the
//! page index (object number `index + 1`, generation 0), so destinations
//! written by one session resolve after reopening.

use super::{BackendError, DocumentBackend};
use crate::structure::{Destination, OutlineEntry, PageMode, PageRef};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Serialize, Deserialize)]
struct DocumentFile {
    page_count: u32,
    #[serde(default)]
    page_mode: PageMode,
    #[serde(default)]
    outline: Vec<OutlineEntry>,
}

/// A document held fully in memory, loaded from and saved to JSON.
#[derive(Debug)]
pub struct MemoryDocument {
    pages: Vec<PageRef>,
    outline: Vec<OutlineEntry>,
    page_mode: PageMode,
}

impl MemoryDocument {
    /// Open a JSON outline document
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let file: DocumentFile =
            serde_json::from_str(&raw).map_err(|e| BackendError::Parse(e.to_string()))?;
        debug!(
            pages = file.page_count,
            entries = file.outline.len(),
            "opened document"
        );
        Ok(Self {
            pages: Self::page_refs(file.page_count),
            outline: file.outline,
            page_mode: file.page_mode,
        })
    }

    /// Empty document with the given page count
    pub fn with_pages(page_count: u32) -> Self {
        Self {
            pages: Self::page_refs(page_count),
            outline: Vec::new(),
            page_mode: PageMode::default(),
        }
    }

    /// Document with the given page count and an initial outline
    pub fn with_outline(page_count: u32, outline: Vec<OutlineEntry>) -> Self {
        Self {
            pages: Self::page_refs(page_count),
            outline,
            page_mode: PageMode::default(),
        }
    }

    /// Page display mode stored in the document
    pub fn page_mode(&self) -> PageMode {
        self.page_mode
    }

    fn page_refs(page_count: u32) -> Vec<PageRef> {
        (0..page_count).map(|i| PageRef::new(i + 1, 0)).collect()
    }
}

impl DocumentBackend for MemoryDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn outline_root(&self) -> Vec<OutlineEntry> {
        self.outline.clone()
    }

    fn make_destination(&self, page: u32) -> Result<Destination, BackendError> {
        let page_ref = self
            .pages
            .get(page as usize)
            .copied()
            .ok_or(BackendError::PageOutOfRange {
                page,
                page_count: self.page_count(),
            })?;
        Ok(Destination::fit_b(page_ref))
    }

    fn resolve_page_index(&self, dest: &Destination) -> Option<u32> {
        self.pages
            .iter()
            .position(|p| *p == dest.page)
            .map(|i| i as u32)
    }

    fn save(
        &mut self,
        path: &Path,
        outline: &[OutlineEntry],
        page_mode: PageMode,
    ) -> Result<(), BackendError> {
        self.outline = outline.to_vec();
        self.page_mode = page_mode;
        let file = DocumentFile {
            page_count: self.page_count(),
            page_mode,
            outline: outline.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        fs::write(path, json)?;
        debug!(path = %path.display(), entries = outline.len(), "saved document");
        Ok(())
    }
}
