//! Engine configuration: grid defaults, grow-solver limits, unit context.

use crate::geometry::Size;

/// Configuration for a [`LayoutEngine`](crate::layout::LayoutEngine).
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Column count for grid containers without `gridColumns`.
    pub default_grid_columns: usize,
    /// A grow pass distributing less than this stops the solver.
    pub min_grow_progress: f32,
    /// Hard cap on grow passes per flex line.
    pub max_grow_passes: usize,
    /// Viewport used to resolve `vw` / `vh` lengths.
    pub viewport: Size,
    /// Font size used to resolve `em` / `rem` lengths.
    pub font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_grid_columns: 2,
            min_grow_progress: 0.01,
            max_grow_passes: 32,
            viewport: Size::ZERO,
            font_size: 16.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default grid column count (builder).
    pub fn with_default_grid_columns(mut self, columns: usize) -> Self {
        self.default_grid_columns = columns;
        self
    }

    /// Set the grow solver's minimum progress per pass (builder).
    pub fn with_min_grow_progress(mut self, progress: f32) -> Self {
        self.min_grow_progress = progress;
        self
    }

    /// Set the grow solver's pass cap (builder).
    pub fn with_max_grow_passes(mut self, passes: usize) -> Self {
        self.max_grow_passes = passes;
        self
    }

    /// Set the viewport size (builder).
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    /// Set the base font size (builder).
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }
}
