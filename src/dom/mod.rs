//! Element arena: slotmap-backed tree that implements the layout host interface.

pub mod node;
pub mod tree;

pub use node::{NodeData, NodeId, UiElement};
pub use tree::Dom;
