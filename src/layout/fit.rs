//! Fit-content sizing: the border-box size a container needs to wrap its
//! in-flow children.

use crate::css::properties::Display;
use crate::geometry::{Edges, Size};
use crate::layout::axis::Axis;
use crate::layout::grid::cell_size;
use crate::layout::item::LayoutItem;

/// Gaps and grid shape needed to measure a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    pub display: Display,
    /// Gap between items along the main axis (flex) or between columns (grid).
    pub main_gap: f32,
    /// Gap between grid rows.
    pub row_gap: f32,
    pub columns: usize,
    /// Padding plus border of the container.
    pub frame: Edges,
}

/// Size wrapping `items`, or `None` for `display: none`.
///
/// Column modes sum outer heights plus gaps and take the widest outer width;
/// row modes swap the axes. Grid uses `columns × cell` by `rows × cell`.
pub fn fit_size(params: &FitParams, items: &[LayoutItem]) -> Option<Size> {
    let content = match params.display {
        Display::Column | Display::ColumnReverse => stack(Axis::Vertical, params.main_gap, items),
        Display::Row | Display::RowReverse => stack(Axis::Horizontal, params.main_gap, items),
        Display::Grid => grid(params, items),
        Display::None => return None,
    };
    Some(Size::new(
        content.width + params.frame.horizontal(),
        content.height + params.frame.vertical(),
    ))
}

fn stack(axis: Axis, gap: f32, items: &[LayoutItem]) -> Size {
    let gaps = gap * items.len().saturating_sub(1) as f32;
    let main = items.iter().map(|item| item.outer(axis)).sum::<f32>() + gaps;
    let cross = items
        .iter()
        .map(|item| item.outer(axis.cross()))
        .fold(0.0, f32::max);
    axis.pack(main, cross)
}

fn grid(params: &FitParams, items: &[LayoutItem]) -> Size {
    if items.is_empty() {
        return Size::ZERO;
    }
    let columns = params.columns.max(1);
    let rows = items.len().div_ceil(columns);
    let cell = cell_size(items);
    Size::new(
        columns as f32 * cell.width + (columns - 1) as f32 * params.main_gap,
        rows as f32 * cell.height + rows.saturating_sub(1) as f32 * params.row_gap,
    )
}
