//! Document-level structures shared between the outline model and the
//! document backend: destinations, actions, the nested outline interchange
//! form, and the page display mode.

mod action;
mod destination;
mod outline;

pub use action::OutlineAction;
pub use destination::{Destination, DestinationKind, PageRef};
pub use outline::{BookmarkTarget, OutlineEntry, PageMode};
