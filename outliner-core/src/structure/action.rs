//! Non-destination bookmark targets (PDF actions, ISO 32000-1 Chapter 12.6).
//!
//! The editor does not interpret actions; it carries them through and
//! renders a short descriptor in the target column.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An action attached to a bookmark instead of a page destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineAction {
    /// Action type, the `/S` entry (e.g. "GoToR", "URI", "Launch")
    pub kind: String,
    /// Action payload, the `/D` entry or equivalent
    pub data: String,
}

impl OutlineAction {
    pub fn new(kind: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: data.into(),
        }
    }
}

impl fmt::Display for OutlineAction {
    /// Target-column descriptor: payload first, then the action type.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.data, self.kind)
    }
}
