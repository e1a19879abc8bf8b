//! # gilt-flex
//!
//! A CSS-styled layout engine for retained element trees.
//!
//! Elements carry an ordered class list and an inline style. Style classes
//! are registered as free-form `property: value;` text, merged per element
//! with `!important` precedence, and projected onto a flexbox/grid layout
//! model. The engine only computes a final rectangle per element; the tree
//! itself belongs to the host.
//!
//! ## Core Systems
//!
//! - **[`css`]**: value lexer, declaration parser, class registry, cascade and style cache
//! - **[`layout`]**: box model, tree walker, flex distribution, grid, absolute and anchor placement
//! - **[`host`]**: the [`LayoutHost`] trait the engine reads relations from and writes geometry to
//! - **[`dom`]**: slotmap-backed element arena implementing [`LayoutHost`]
//! - **[`geometry`]**: `Rect`, `Edges`, `Size`
//! - **[`config`]**: solver limits and unit context
//!
//! ```
//! use gilt_flex::{Dom, LayoutEngine, NodeData};
//!
//! let mut dom = Dom::new();
//! let root = dom.insert(NodeData::new().with_style("display: row; width: 300; height: 40"));
//! let a = dom.insert_child(root, NodeData::new().with_class("cell"));
//! let b = dom.insert_child(root, NodeData::new().with_style("flex: 2"));
//!
//! let mut engine = LayoutEngine::new();
//! engine.register_class("cell", "flex: 1");
//! engine.layout(&mut dom, root);
//!
//! assert_eq!(dom.bounds(a).width, 100.0);
//! assert_eq!(dom.bounds(b).x, 100.0);
//! ```

// Foundation
pub mod config;
pub mod geometry;

// Core systems
pub mod css;
pub mod dom;
pub mod host;
pub mod layout;

pub use config::LayoutConfig;
pub use css::{RegistryError, StyleValue};
pub use dom::{Dom, NodeData, NodeId, UiElement};
pub use geometry::{Edges, Rect, Size};
pub use host::LayoutHost;
pub use layout::LayoutEngine;
