//! The per-child input to the flow algorithms.

use crate::css::properties::Align;
use crate::geometry::{Edges, Size};
use crate::layout::axis::Axis;

/// A measured in-flow child, as seen by the flex, grid and fit-content
/// routines. Sizes are border-box sizes; `margin` is outside them.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItem {
    pub size: Size,
    pub margin: Edges,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    /// Resolved flex basis; `None` means "use the current main size".
    pub flex_basis: Option<f32>,
    pub min: Size,
    pub max: Size,
    pub align_self: Option<Align>,
    pub justify_self: Option<Align>,
    /// Explicit width/height are never stretched.
    pub explicit_width: bool,
    pub explicit_height: bool,
}

impl LayoutItem {
    /// An unconstrained item of the given size, with `flexShrink: 1`.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            margin: Edges::ZERO,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: None,
            min: Size::ZERO,
            max: Size::new(f32::INFINITY, f32::INFINITY),
            align_self: None,
            justify_self: None,
            explicit_width: false,
            explicit_height: false,
        }
    }

    pub fn with_margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_flex(mut self, grow: f32, shrink: f32, basis: Option<f32>) -> Self {
        self.flex_grow = grow;
        self.flex_shrink = shrink;
        self.flex_basis = basis;
        self
    }

    pub fn with_min(mut self, min: Size) -> Self {
        self.min = min;
        self
    }

    pub fn with_max(mut self, max: Size) -> Self {
        self.max = max;
        self
    }

    pub fn with_align_self(mut self, align: Align) -> Self {
        self.align_self = Some(align);
        self
    }

    pub fn with_justify_self(mut self, justify: Align) -> Self {
        self.justify_self = Some(justify);
        self
    }

    /// Freeze the item at its current size: no grow, no shrink, no basis, and
    /// never stretched.
    pub fn rigid(mut self) -> Self {
        self.flex_grow = 0.0;
        self.flex_shrink = 0.0;
        self.flex_basis = None;
        self.explicit_width = true;
        self.explicit_height = true;
        self
    }

    /// Border-box extent plus margins along `axis`.
    pub fn outer(&self, axis: Axis) -> f32 {
        axis.size(self.size) + axis.sum(self.margin)
    }

    /// The flex base size along `axis`.
    pub fn base(&self, axis: Axis) -> f32 {
        self.flex_basis.unwrap_or_else(|| axis.size(self.size))
    }

    /// Clamp `value` to the min/max constraints along `axis`. Min wins over max.
    pub fn clamp(&self, axis: Axis, value: f32) -> f32 {
        value.min(axis.size(self.max)).max(axis.size(self.min))
    }

    pub fn is_explicit(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.explicit_width,
            Axis::Vertical => self.explicit_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_includes_margin() {
        let item = LayoutItem::new(Size::new(10.0, 20.0)).with_margin(Edges::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(item.outer(Axis::Horizontal), 16.0);
        assert_eq!(item.outer(Axis::Vertical), 24.0);
    }

    #[test]
    fn clamp_min_wins() {
        let item = LayoutItem::new(Size::ZERO)
            .with_min(Size::new(30.0, 0.0))
            .with_max(Size::new(20.0, 50.0));
        assert_eq!(item.clamp(Axis::Horizontal, 10.0), 30.0);
        assert_eq!(item.clamp(Axis::Vertical, 80.0), 50.0);
    }

    #[test]
    fn base_prefers_basis() {
        let item = LayoutItem::new(Size::new(10.0, 20.0));
        assert_eq!(item.base(Axis::Vertical), 20.0);
        assert_eq!(item.with_flex(1.0, 1.0, Some(0.0)).base(Axis::Vertical), 0.0);
    }
}
