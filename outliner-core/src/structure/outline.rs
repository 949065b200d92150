//! Nested outline interchange form and the page display mode.
//!
//! `OutlineEntry` is the shape the document backend speaks: an owned,
//! nested bookmark tree. The editing model re-wraps it into an id-based
//! arena on load and flattens back to it on save.

use crate::structure::{Destination, OutlineAction};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a bookmark points at.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum BookmarkTarget {
    /// A page destination within the document
    Page(Destination),
    /// An action (remote go-to, URI, ...)
    Action(OutlineAction),
    /// No navigation target
    #[default]
    None,
}

/// One bookmark in the nested interchange tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub title: String,
    #[serde(default)]
    pub target: BookmarkTarget,
    #[serde(default)]
    pub children: Vec<OutlineEntry>,
}

impl OutlineEntry {
    pub fn new(title: impl Into<String>, target: BookmarkTarget) -> Self {
        Self {
            title: title.into(),
            target,
            children: Vec::new(),
        }
    }

    /// Add a child entry
    pub fn add_child(&mut self, child: OutlineEntry) {
        self.children.push(child);
    }

    /// Count entries in this subtree, including self
    pub fn count_all(&self) -> usize {
        1 + self.children.iter().map(OutlineEntry::count_all).sum::<usize>()
    }
}

/// Panel shown when the document is first opened, persisted at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageMode {
    #[default]
    ShowNone,
    ShowOutlines,
    ShowThumbnails,
    FullScreen,
    ShowOptionalContent,
    ShowAttachments,
}

impl PageMode {
    /// PDF catalog name for the `/PageMode` entry
    pub fn pdf_name(&self) -> &'static str {
        match self {
            PageMode::ShowNone => "UseNone",
            PageMode::ShowOutlines => "UseOutlines",
            PageMode::ShowThumbnails => "UseThumbs",
            PageMode::FullScreen => "FullScreen",
            PageMode::ShowOptionalContent => "UseOC",
            PageMode::ShowAttachments => "UseAttachments",
        }
    }
}

impl FromStr for PageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(PageMode::ShowNone),
            "outlines" => Ok(PageMode::ShowOutlines),
            "thumbnails" | "thumbs" => Ok(PageMode::ShowThumbnails),
            "fullscreen" => Ok(PageMode::FullScreen),
            "optional-content" | "oc" => Ok(PageMode::ShowOptionalContent),
            "attachments" => Ok(PageMode::ShowAttachments),
            other => Err(format!(
                "unknown page mode {other:?} (expected none, outlines, thumbnails, \
                 fullscreen, optional-content or attachments)"
            )),
        }
    }
}
