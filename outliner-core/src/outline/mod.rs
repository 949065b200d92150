//! The canonical bookmark tree and its structural mutation operations.

mod model;
mod node;

pub use model::OutlineModel;
pub use node::{NodeId, OutlineNode};
