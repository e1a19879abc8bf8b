//! The host interface consumed by the layout engine.
//!
//! The engine never owns elements. It walks whatever tree the host exposes,
//! reads style records and flags, and writes geometry back through this trait.
//! [`Dom`] is the in-crate implementation.

use crate::dom::{Dom, NodeId, UiElement};
use crate::geometry::Rect;

/// Tree relations, element metadata and geometry access for one element
/// population.
pub trait LayoutHost {
    /// Whether `node` is a live element.
    fn contains(&self, node: NodeId) -> bool;

    /// Parent of `node`, if any.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Children of `node` in stable insertion order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Style record attached to `node`. Elements without one use an empty style.
    fn element(&self, node: NodeId) -> Option<&UiElement>;

    /// Whether `node` is visible. Invisible elements are skipped by layout.
    fn is_visible(&self, node: NodeId) -> bool;

    /// Unrotated geometry (x, y, width, height).
    fn geometry(&self, node: NodeId) -> Rect;

    /// Rotation in radians.
    fn angle(&self, node: NodeId) -> f32;

    fn set_angle(&mut self, node: NodeId, angle: f32);
    fn set_x(&mut self, node: NodeId, x: f32);
    fn set_y(&mut self, node: NodeId, y: f32);
    fn set_width(&mut self, node: NodeId, width: f32);
    fn set_height(&mut self, node: NodeId, height: f32);

    /// First live element carrying `tag`, searched across the whole population.
    fn find_tagged(&self, tag: &str) -> Option<NodeId>;

    /// Axis-aligned bounding box, taking rotation into account.
    fn bounding_box(&self, node: NodeId) -> Rect {
        self.geometry(node).rotated_bounds(self.angle(node))
    }
}

impl LayoutHost for Dom {
    fn contains(&self, node: NodeId) -> bool {
        Dom::contains(self, node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Dom::parent(self, node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        Dom::children(self, node).to_vec()
    }

    fn element(&self, node: NodeId) -> Option<&UiElement> {
        self.get(node).map(|data| &data.ui)
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|data| data.visible)
    }

    fn geometry(&self, node: NodeId) -> Rect {
        self.bounds(node)
    }

    fn angle(&self, node: NodeId) -> f32 {
        self.get(node).map_or(0.0, |data| data.angle)
    }

    fn set_angle(&mut self, node: NodeId, angle: f32) {
        if let Some(data) = self.get_mut(node) {
            data.angle = angle;
        }
    }

    fn set_x(&mut self, node: NodeId, x: f32) {
        let y = self.bounds(node).y;
        self.move_to(node, x, y);
    }

    fn set_y(&mut self, node: NodeId, y: f32) {
        let x = self.bounds(node).x;
        self.move_to(node, x, y);
    }

    fn set_width(&mut self, node: NodeId, width: f32) {
        if let Some(data) = self.get_mut(node) {
            data.bounds.width = width;
        }
    }

    fn set_height(&mut self, node: NodeId, height: f32) {
        if let Some(data) = self.get_mut(node) {
            data.bounds.height = height;
        }
    }

    fn find_tagged(&self, tag: &str) -> Option<NodeId> {
        Dom::find_tagged(self, tag)
    }
}
