//! Core tree state for the folder explorer
//!
//! This module owns the canonical node store, the tri-state selection
//! propagation, and the flattening of the sparse tree into an ordered,
//! renderable sequence.

mod flatten;
mod node;
mod store;

pub use flatten::{FlatTree, FlattenedNode, TreeStats};
pub use node::{NodeId, TreeNode};
pub use store::TreeStore;

/// Re-export common types for convenience
pub mod prelude {
    pub use super::{FlatTree, FlattenedNode, NodeId, TreeNode, TreeStats, TreeStore};
}
