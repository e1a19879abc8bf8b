//! Core geometry types: Size, Rect, Edges.
//!
//! All coordinates are absolute layout units (f32). `Rect` is an element's
//! border box; `Edges` holds per-side margin/padding/border widths.

use std::ops::Add;

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle defined by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// An empty rect at the origin.
    pub const EMPTY: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    /// Create a new rect.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge: `x + width`.
    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// The bottom edge: `y + height`.
    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// The point at fractional position `(fx, fy)` inside this rect.
    ///
    /// `(0, 0)` is the top-left corner, `(1, 1)` the bottom-right.
    #[inline]
    pub fn point_at(self, fx: f32, fy: f32) -> (f32, f32) {
        (self.x + self.width * fx, self.y + self.height * fy)
    }

    /// Shrink the rect by `edges` on each side. Width and height never go negative.
    pub fn inset(self, edges: Edges) -> Rect {
        Rect {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: (self.width - edges.horizontal()).max(0.0),
            height: (self.height - edges.vertical()).max(0.0),
        }
    }

    /// Axis-aligned bounding box of this rect rotated by `angle` radians
    /// around its center.
    pub fn rotated_bounds(self, angle: f32) -> Rect {
        if angle == 0.0 {
            return self;
        }
        let (sin, cos) = angle.sin_cos();
        let w = self.width * cos.abs() + self.height * sin.abs();
        let h = self.width * sin.abs() + self.height * cos.abs();
        let cx = self.x + self.width / 2.0;
        let cy = self.y + self.height / 2.0;
        Rect { x: cx - w / 2.0, y: cy - h / 2.0, width: w, height: h }
    }
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// Widths on the four sides of a rectangle, used for margin, padding and border.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    /// Zero on all sides.
    pub const ZERO: Edges = Edges { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    /// Create edges with explicit values for each side.
    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// `left + right`.
    #[inline]
    pub fn horizontal(self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[inline]
    pub fn vertical(self) -> f32 {
        self.top + self.bottom
    }
}

impl Add for Edges {
    type Output = Edges;
    #[inline]
    fn add(self, rhs: Edges) -> Edges {
        Edges {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
