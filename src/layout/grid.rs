//! Fixed-column grid placement.
//!
//! Every cell has the size of the largest child (outer size, margins
//! included). `justifyContent` distributes whole columns; each item is then
//! placed inside its cell by `justifySelf` and `alignSelf`/`alignItems`.

use crate::css::properties::{Align, Justify};
use crate::geometry::{Rect, Size};
use crate::layout::axis::{justify_spacing, Axis};
use crate::layout::item::LayoutItem;

/// A grid container's content box and placement settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GridContainer {
    pub content: Rect,
    pub columns: usize,
    /// Horizontal gap between columns.
    pub column_gap: f32,
    /// Vertical gap between rows.
    pub row_gap: f32,
    pub justify: Justify,
    pub align: Align,
}

/// Size of one cell: the largest outer child size.
pub fn cell_size(items: &[LayoutItem]) -> Size {
    items.iter().fold(Size::ZERO, |cell, item| Size {
        width: cell.width.max(item.outer(Axis::Horizontal)),
        height: cell.height.max(item.outer(Axis::Vertical)),
    })
}

/// Place `items` row by row. Returns one border box per item.
pub fn arrange(container: &GridContainer, items: &[LayoutItem]) -> Vec<Rect> {
    let columns = container.columns.max(1);
    let cell = cell_size(items);
    let used = columns as f32 * cell.width + (columns - 1) as f32 * container.column_gap;
    let spacing = justify_spacing(container.justify, container.content.width - used, columns);

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let (row, col) = (i / columns, i % columns);
            let cell_x = container.content.x
                + spacing.leading
                + col as f32 * (cell.width + container.column_gap + spacing.between);
            let cell_y = container.content.y + row as f32 * (cell.height + container.row_gap);

            let justify = item.justify_self.unwrap_or(Align::Start);
            let align = item.align_self.unwrap_or(container.align);
            let width = fill(item, Axis::Horizontal, justify, cell.width);
            let height = fill(item, Axis::Vertical, align, cell.height);

            let x = cell_x
                + item.margin.left
                + justify.offset(cell.width, width + item.margin.horizontal());
            let y = cell_y
                + item.margin.top
                + align.offset(cell.height, height + item.margin.vertical());
            Rect::new(x, y, width, height)
        })
        .collect()
}

/// Item extent along `axis`: stretched to the cell when asked, else unchanged.
fn fill(item: &LayoutItem, axis: Axis, align: Align, cell: f32) -> f32 {
    if align == Align::Stretch && !item.is_explicit(axis) {
        item.clamp(axis, (cell - axis.sum(item.margin)).max(0.0))
    } else {
        axis.size(item.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Edges;
    use pretty_assertions::assert_eq;

    fn grid(columns: usize, width: f32) -> GridContainer {
        GridContainer {
            content: Rect::new(0.0, 0.0, width, 200.0),
            columns,
            column_gap: 0.0,
            row_gap: 0.0,
            justify: Justify::Start,
            align: Align::Start,
        }
    }

    fn item(w: f32, h: f32) -> LayoutItem {
        LayoutItem::new(Size::new(w, h))
    }

    #[test]
    fn rows_and_columns() {
        let items = [item(10.0, 10.0), item(20.0, 5.0), item(10.0, 10.0)];
        let mut g = grid(2, 100.0);
        g.column_gap = 4.0;
        g.row_gap = 2.0;
        let rects = arrange(&g, &items);
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(rects[1], Rect::new(24.0, 0.0, 20.0, 5.0));
        assert_eq!(rects[2], Rect::new(0.0, 12.0, 10.0, 10.0));
    }

    #[test]
    fn zero_columns_treated_as_one() {
        let items = [item(10.0, 10.0), item(10.0, 10.0)];
        let rects = arrange(&grid(0, 100.0), &items);
        assert_eq!(rects[1], Rect::new(0.0, 10.0, 10.0, 10.0));
    }

    #[test]
    fn justify_moves_whole_columns() {
        let items = [item(10.0, 10.0), item(10.0, 10.0)];
        let mut g = grid(2, 100.0);
        g.justify = Justify::SpaceBetween;
        let rects = arrange(&g, &items);
        assert_eq!(rects[0].x, 0.0);
        assert_eq!(rects[1].x, 90.0);

        g.justify = Justify::Center;
        let rects = arrange(&g, &items);
        assert_eq!(rects[0].x, 40.0);
    }

    #[test]
    fn self_alignment_within_cell() {
        let items = [
            item(20.0, 20.0),
            item(10.0, 10.0).with_justify_self(Align::End).with_align_self(Align::Center),
            item(10.0, 10.0).with_justify_self(Align::Stretch),
        ];
        let rects = arrange(&grid(3, 60.0), &items);
        assert_eq!(rects[1], Rect::new(30.0, 5.0, 10.0, 10.0));
        assert_eq!(rects[2], Rect::new(40.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn margins_count_towards_cell() {
        let items = [item(10.0, 10.0).with_margin(Edges::all(2.0)), item(4.0, 4.0)];
        assert_eq!(cell_size(&items), Size::new(14.0, 14.0));
        let rects = arrange(&grid(2, 100.0), &items);
        assert_eq!(rects[0], Rect::new(2.0, 2.0, 10.0, 10.0));
        assert_eq!(rects[1].x, 14.0);
    }
}
