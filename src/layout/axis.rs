//! Axis helpers shared by the flex, grid and fit-content routines.

use crate::css::properties::Justify;
use crate::geometry::{Edges, Rect, Size};

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Extent of `size` along this axis.
    pub fn size(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Start coordinate of `rect` along this axis.
    pub fn start(self, rect: Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.x,
            Axis::Vertical => rect.y,
        }
    }

    /// Extent of `rect` along this axis.
    pub fn extent(self, rect: Rect) -> f32 {
        self.size(rect.size())
    }

    /// The leading edge (left or top).
    pub fn leading(self, edges: Edges) -> f32 {
        match self {
            Axis::Horizontal => edges.left,
            Axis::Vertical => edges.top,
        }
    }

    /// The trailing edge (right or bottom).
    pub fn trailing(self, edges: Edges) -> f32 {
        match self {
            Axis::Horizontal => edges.right,
            Axis::Vertical => edges.bottom,
        }
    }

    /// Leading plus trailing edge.
    pub fn sum(self, edges: Edges) -> f32 {
        self.leading(edges) + self.trailing(edges)
    }

    /// Build a size from main/cross extents, with `self` as the main axis.
    pub fn pack(self, main: f32, cross: f32) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    /// Build a rect from main/cross position and extents.
    pub fn rect(self, main_pos: f32, cross_pos: f32, main: f32, cross: f32) -> Rect {
        match self {
            Axis::Horizontal => Rect::new(main_pos, cross_pos, main, cross),
            Axis::Vertical => Rect::new(cross_pos, main_pos, cross, main),
        }
    }
}

/// Free-space distribution for a run of items along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    /// Offset before the first item.
    pub leading: f32,
    /// Extra space between consecutive items, on top of the gap.
    pub between: f32,
}

/// Distribute `free` space over `count` items according to `justify`.
///
/// Distributed modes never hand out negative space; with an overflow they
/// pack at the start. A single item under `space-between` gets no spacing.
pub fn justify_spacing(justify: Justify, free: f32, count: usize) -> Spacing {
    let n = count as f32;
    let positive = free.max(0.0);
    match justify {
        Justify::Start => Spacing::default(),
        Justify::Center => Spacing { leading: free / 2.0, between: 0.0 },
        Justify::End => Spacing { leading: free, between: 0.0 },
        Justify::SpaceBetween if count > 1 => Spacing { leading: 0.0, between: positive / (n - 1.0) },
        Justify::SpaceAround if count > 0 => {
            let share = positive / n;
            Spacing { leading: share / 2.0, between: share }
        }
        Justify::SpaceEvenly => {
            let share = positive / (n + 1.0);
            Spacing { leading: share, between: share }
        }
        Justify::SpaceBetween | Justify::SpaceAround => Spacing::default(),
    }
}
