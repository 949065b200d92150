//! Bookmark destinations, modelled after ISO 32000-1 Section 12.3.2.
//!
//! A destination carries an opaque page reference handed out by the
//! document backend. Resolving a destination back to a page index is done
//! by identity-matching that reference against the backend's page list,
//! never by position.

use serde::{Deserialize, Serialize};

/// Opaque reference to a page object in the document.
///
/// Object number and generation, in the manner of a PDF indirect
/// reference. Two `PageRef`s compare equal exactly when they name the same
/// page object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRef {
    number: u32,
    generation: u16,
}

impl PageRef {
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }
}

/// How the viewer should fit the page when following the destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DestinationKind {
    /// Fit the entire page in the window
    Fit,
    /// Fit the page bounding box in the window
    FitB,
    /// Fit the width of the page in the window
    FitH { top: Option<f64> },
    /// Display with (left, top) at the upper-left corner
    XYZ {
        left: Option<f64>,
        top: Option<f64>,
        zoom: Option<f64>,
    },
}

/// A page destination: target page plus fit behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub page: PageRef,
    pub kind: DestinationKind,
}

impl Destination {
    /// Create a Fit destination
    pub fn fit(page: PageRef) -> Self {
        Self {
            page,
            kind: DestinationKind::Fit,
        }
    }

    /// Create a FitB destination (the default for new bookmarks)
    pub fn fit_b(page: PageRef) -> Self {
        Self {
            page,
            kind: DestinationKind::FitB,
        }
    }

    /// Create a FitH destination
    pub fn fit_h(page: PageRef, top: Option<f64>) -> Self {
        Self {
            page,
            kind: DestinationKind::FitH { top },
        }
    }

    /// Create an XYZ destination
    pub fn xyz(page: PageRef, left: Option<f64>, top: Option<f64>, zoom: Option<f64>) -> Self {
        Self {
            page,
            kind: DestinationKind::XYZ { left, top, zoom },
        }
    }

    /// PDF name of the fit kind
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            DestinationKind::Fit => "Fit",
            DestinationKind::FitB => "FitB",
            DestinationKind::FitH { .. } => "FitH",
            DestinationKind::XYZ { .. } => "XYZ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ref_identity() {
        let a = PageRef::new(10, 0);
        let b = PageRef::new(10, 0);
        let c = PageRef::new(10, 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fit_b_destination() {
        let dest = Destination::fit_b(PageRef::new(3, 0));
        assert_eq!(dest.kind_name(), "FitB");
        assert_eq!(dest.page.number(), 3);
    }

    #[test]
    fn test_xyz_destination() {
        let dest = Destination::xyz(PageRef::new(1, 0), Some(100.0), Some(200.0), None);
        assert_eq!(dest.kind_name(), "XYZ");
        assert_eq!(
            dest.kind,
            DestinationKind::XYZ {
                left: Some(100.0),
                top: Some(200.0),
                zoom: None,
            }
        );
    }

    #[test]
    fn test_destination_serde_round_trip() {
        let dest = Destination::fit_h(PageRef::new(7, 0), Some(42.0));
        let json = serde_json::to_string(&dest).unwrap();
        let back: Destination = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dest);
    }
}
