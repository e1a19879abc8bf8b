//! Layout: box model, tree walker, flex/grid distribution and out-of-flow placement.

pub mod axis;
pub mod box_model;
pub mod engine;
pub mod fit;
pub mod flex;
pub mod grid;
pub mod item;
pub mod positioned;

pub use axis::Axis;
pub use box_model::BoxModel;
pub use engine::LayoutEngine;
pub use item::LayoutItem;
