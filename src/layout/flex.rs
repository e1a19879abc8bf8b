//! Flex distribution for `column`, `row` and their reverse variants.
//!
//! Sizing runs per line: fixed items (grow 0 and shrink 0) keep their size,
//! positive free space is handed out by the multi-pass grow solver, and
//! overflow is taken back proportionally to `shrink × base`. Placement then
//! applies `justifyContent` on the main axis and `alignSelf`/`alignItems` on
//! the cross axis.

use tracing::debug;

use crate::config::LayoutConfig;
use crate::css::properties::{Align, FlexWrap, Justify};
use crate::geometry::Rect;
use crate::layout::axis::{justify_spacing, Axis};
use crate::layout::item::LayoutItem;

/// A flex container's content box and distribution settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexContainer {
    pub content: Rect,
    pub axis: Axis,
    pub reverse: bool,
    /// Gap between items along the main axis.
    pub main_gap: f32,
    /// Gap between wrapped lines.
    pub cross_gap: f32,
    pub justify: Justify,
    pub align: Align,
    pub wrap: FlexWrap,
}

/// Transient sizing state of one item on one line.
#[derive(Debug, Clone)]
struct FlexItem {
    index: usize,
    grow: f32,
    shrink: f32,
    base: f32,
    min: f32,
    max: f32,
    target: f32,
    margin: f32,
    fixed: bool,
    frozen: bool,
}

impl FlexItem {
    fn new(index: usize, item: &LayoutItem, axis: Axis) -> Self {
        let base = item.base(axis);
        let min = axis.size(item.min);
        Self {
            index,
            grow: item.flex_grow,
            shrink: item.flex_shrink,
            base,
            min,
            max: axis.size(item.max).max(min),
            target: base,
            margin: axis.sum(item.margin),
            fixed: item.flex_grow == 0.0 && item.flex_shrink == 0.0,
            frozen: false,
        }
    }
}

/// Size and place `items` inside `container`. Returns one border box per
/// item, in the order of `items`.
pub fn arrange(container: &FlexContainer, items: &[LayoutItem], config: &LayoutConfig) -> Vec<Rect> {
    let mut out = vec![Rect::EMPTY; items.len()];
    let mut order: Vec<usize> = (0..items.len()).collect();
    let mut justify = container.justify;
    if container.reverse {
        order.reverse();
        justify = justify.mirrored();
    }

    let cross_axis = container.axis.cross();
    let main_start = container.axis.start(container.content);
    let mut cross_start = cross_axis.start(container.content);

    if container.wrap == FlexWrap::NoWrap {
        let cross_extent = cross_axis.extent(container.content);
        let line = Line { main_start, cross_start, cross_extent, indices: &order };
        place_line(container, justify, &line, items, config, &mut out);
        return out;
    }

    let mut lines = break_lines(container, &order, items);
    if container.wrap == FlexWrap::WrapReverse {
        lines.reverse();
    }
    for indices in &lines {
        let cross_extent = indices
            .iter()
            .map(|&i| items[i].outer(cross_axis))
            .fold(0.0, f32::max);
        let line = Line { main_start, cross_start, cross_extent, indices };
        place_line(container, justify, &line, items, config, &mut out);
        cross_start += cross_extent + container.cross_gap;
    }
    out
}

struct Line<'a> {
    main_start: f32,
    cross_start: f32,
    cross_extent: f32,
    indices: &'a [usize],
}

/// Greedy line breaking. An item always fits on an empty line.
fn break_lines(container: &FlexContainer, order: &[usize], items: &[LayoutItem]) -> Vec<Vec<usize>> {
    let axis = container.axis;
    let extent = axis.extent(container.content);
    let mut lines = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used = 0.0;

    for &i in order {
        let outer = items[i].base(axis) + axis.sum(items[i].margin);
        if current.is_empty() {
            used = outer;
            current.push(i);
            continue;
        }
        let needed = used + container.main_gap + outer;
        if needed > extent {
            lines.push(std::mem::take(&mut current));
            used = outer;
        } else {
            used = needed;
        }
        current.push(i);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn place_line(
    container: &FlexContainer,
    justify: Justify,
    line: &Line<'_>,
    items: &[LayoutItem],
    config: &LayoutConfig,
    out: &mut [Rect],
) {
    let axis = container.axis;
    let cross_axis = axis.cross();
    let extent = axis.extent(container.content);

    let mut flex: Vec<FlexItem> = line
        .indices
        .iter()
        .map(|&i| FlexItem::new(i, &items[i], axis))
        .collect();
    resolve_sizes(&mut flex, extent, container.main_gap, config);

    let gaps = container.main_gap * flex.len().saturating_sub(1) as f32;
    let consumed: f32 = flex.iter().map(|f| f.target + f.margin).sum::<f32>() + gaps;
    let spacing = justify_spacing(justify, extent - consumed, flex.len());

    let mut cursor = line.main_start + spacing.leading;
    for f in &flex {
        let item = &items[f.index];
        let main_pos = cursor + axis.leading(item.margin);
        cursor = main_pos + f.target + axis.trailing(item.margin) + container.main_gap + spacing.between;

        let align = item.align_self.unwrap_or(container.align);
        let cross_margin = cross_axis.sum(item.margin);
        let mut cross_size = cross_axis.size(item.size);
        if align == Align::Stretch && !item.is_explicit(cross_axis) {
            cross_size = item.clamp(cross_axis, (line.cross_extent - cross_margin).max(0.0));
        }
        let cross_pos = line.cross_start
            + cross_axis.leading(item.margin)
            + align.offset(line.cross_extent, cross_size + cross_margin);

        out[f.index] = axis.rect(main_pos, cross_pos, f.target, cross_size);
    }
}

/// Set each item's `target` main size for a line of `extent`.
fn resolve_sizes(items: &mut [FlexItem], extent: f32, gap: f32, config: &LayoutConfig) {
    let gaps = gap * items.len().saturating_sub(1) as f32;
    let reserved: f32 = items
        .iter()
        .map(|f| if f.fixed { f.base + f.margin } else { f.margin })
        .sum::<f32>()
        + gaps;
    let flex_base: f32 = items.iter().filter(|f| !f.fixed).map(|f| f.base).sum();
    let available = extent - reserved - flex_base;

    if available > 0.0 {
        grow(items, available, config);
    } else if available < 0.0 {
        shrink(items, -available);
    }
}

/// Multi-pass grow. Each pass hands the space left after frozen items to
/// the unfrozen ones by grow factor, starting from their base sizes, and
/// clamps the shares to min/max. If the clamps add space overall, the items
/// raised to their min are frozen; if they remove space, the items capped at
/// their max are frozen. The next pass redistributes what is left.
fn grow(items: &mut [FlexItem], available: f32, config: &LayoutConfig) {
    for item in items.iter_mut() {
        item.frozen = item.fixed || item.grow <= 0.0;
    }

    let mut violations = vec![0.0f32; items.len()];
    for pass in 0..config.max_grow_passes {
        let pool: f32 = items.iter().filter(|f| !f.frozen).map(|f| f.grow).sum();
        if pool <= 0.0 {
            return;
        }
        let committed: f32 = items.iter().filter(|f| f.frozen).map(|f| f.target - f.base).sum();
        let remaining = available - committed;
        if remaining < config.min_grow_progress {
            for item in items.iter_mut().filter(|f| !f.frozen) {
                item.target = item.base.min(item.max).max(item.min);
            }
            if remaining > 0.0 {
                debug!(pass, remaining, "flex grow stopped below minimum progress");
            }
            return;
        }

        let mut total = 0.0;
        for (item, violation) in items.iter_mut().zip(violations.iter_mut()) {
            *violation = 0.0;
            if item.frozen {
                continue;
            }
            let desired = item.base + remaining * item.grow / pool;
            item.target = desired.min(item.max).max(item.min);
            *violation = item.target - desired;
            total += *violation;
        }
        if violations.iter().all(|&v| v == 0.0) {
            return;
        }

        let raise = total > 0.0;
        for (item, &violation) in items.iter_mut().zip(&violations) {
            if (raise && violation > 0.0) || (!raise && violation < 0.0) {
                item.frozen = true;
            }
        }
    }
    debug!(passes = config.max_grow_passes, "flex grow hit the pass limit");
}

/// Single-pass shrink proportional to `shrink × base`, clamped at min only.
fn shrink(items: &mut [FlexItem], overflow: f32) {
    let total: f32 = items
        .iter()
        .filter(|f| !f.fixed)
        .map(|f| f.shrink * f.base)
        .sum();
    if total <= 0.0 {
        return;
    }
    for item in items.iter_mut().filter(|f| !f.fixed && f.shrink > 0.0) {
        let reduction = overflow * item.shrink * item.base / total;
        item.target = (item.base - reduction).max(item.min);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Edges, Size};
    use pretty_assertions::assert_eq;

    fn column(height: f32) -> FlexContainer {
        FlexContainer {
            content: Rect::new(0.0, 0.0, 100.0, height),
            axis: Axis::Vertical,
            reverse: false,
            main_gap: 0.0,
            cross_gap: 0.0,
            justify: Justify::Start,
            align: Align::Start,
            wrap: FlexWrap::NoWrap,
        }
    }

    fn row(width: f32) -> FlexContainer {
        FlexContainer {
            content: Rect::new(0.0, 0.0, width, 50.0),
            axis: Axis::Horizontal,
            ..column(0.0)
        }
    }

    fn grow_item(grow: f32) -> LayoutItem {
        LayoutItem::new(Size::new(10.0, 10.0)).with_flex(grow, 1.0, Some(0.0))
    }

    fn widths(rects: &[Rect]) -> Vec<f32> {
        rects.iter().map(|r| r.width).collect()
    }

    #[test]
    fn grow_proportional() {
        let items = [grow_item(1.0), grow_item(1.0), grow_item(2.0)];
        let rects = arrange(&row(300.0), &items, &LayoutConfig::default());
        assert_eq!(widths(&rects), vec![75.0, 75.0, 150.0]);
        assert_eq!(rects[2].x, 150.0);
    }

    #[test]
    fn grow_respects_max_and_redistributes() {
        let items = [
            grow_item(1.0).with_max(Size::new(50.0, f32::INFINITY)),
            grow_item(1.0),
        ];
        let rects = arrange(&row(300.0), &items, &LayoutConfig::default());
        assert_eq!(widths(&rects), vec![50.0, 250.0]);
    }

    #[test]
    fn grow_respects_min() {
        let items = [
            grow_item(1.0).with_min(Size::new(80.0, 0.0)),
            grow_item(1.0),
        ];
        let rects = arrange(&row(100.0), &items, &LayoutConfig::default());
        assert_eq!(widths(&rects), vec![80.0, 20.0]);
        assert_eq!(rects[1].right(), 100.0);
    }

    #[test]
    fn grow_stops_below_minimum_progress() {
        let items = [
            grow_item(1.0).with_min(Size::new(97.0, 0.0)),
            grow_item(1.0),
        ];
        let rects = arrange(&row(100.0), &items, &LayoutConfig::default());
        assert_eq!(widths(&rects), vec![97.0, 3.0]);

        let config = LayoutConfig::default().with_min_grow_progress(5.0);
        let rects = arrange(&row(100.0), &items, &config);
        assert_eq!(widths(&rects), vec![97.0, 0.0]);
    }

    #[test]
    fn grow_stops_at_pass_limit() {
        let config = LayoutConfig::default().with_max_grow_passes(1);
        let items = [
            grow_item(1.0).with_max(Size::new(50.0, f32::INFINITY)),
            grow_item(1.0),
        ];
        let rects = arrange(&row(300.0), &items, &config);
        assert_eq!(widths(&rects), vec![50.0, 150.0]);
    }

    #[test]
    fn fixed_items_reserve_space() {
        let items = [
            LayoutItem::new(Size::new(40.0, 10.0)).with_flex(0.0, 0.0, None),
            grow_item(1.0),
        ];
        let mut c = row(100.0);
        c.main_gap = 10.0;
        let rects = arrange(&c, &items, &LayoutConfig::default());
        assert_eq!(widths(&rects), vec![40.0, 50.0]);
        assert_eq!(rects[1].x, 50.0);
    }

    #[test]
    fn shrink_proportional_to_base() {
        let items = [
            LayoutItem::new(Size::new(100.0, 10.0)),
            LayoutItem::new(Size::new(50.0, 10.0)),
        ];
        let rects = arrange(&row(120.0), &items, &LayoutConfig::default());
        assert_eq!(widths(&rects), vec![80.0, 40.0]);
    }

    #[test]
    fn shrink_clamps_at_min_only() {
        let items = [
            LayoutItem::new(Size::new(100.0, 10.0))
                .with_min(Size::new(90.0, 0.0))
                .with_max(Size::new(20.0, f32::INFINITY)),
            LayoutItem::new(Size::new(100.0, 10.0)),
        ];
        let rects = arrange(&row(100.0), &items, &LayoutConfig::default());
        assert_eq!(widths(&rects), vec![90.0, 50.0]);
    }

    #[test]
    fn space_between() {
        let items = [LayoutItem::new(Size::ZERO), LayoutItem::new(Size::ZERO)];
        let mut c = column(100.0);
        c.justify = Justify::SpaceBetween;
        let rects = arrange(&c, &items, &LayoutConfig::default());
        assert_eq!(rects[0].y, 0.0);
        assert_eq!(rects[1].y, 100.0);
    }

    #[test]
    fn margins_and_gap_in_column() {
        let items = [
            LayoutItem::new(Size::new(10.0, 20.0)).with_margin(Edges::new(5.0, 0.0, 5.0, 3.0)),
            LayoutItem::new(Size::new(10.0, 30.0)),
        ];
        let mut c = column(200.0);
        c.main_gap = 4.0;
        let rects = arrange(&c, &items, &LayoutConfig::default());
        assert_eq!(rects[0], Rect::new(3.0, 5.0, 10.0, 20.0));
        assert_eq!(rects[1], Rect::new(0.0, 34.0, 10.0, 30.0));
    }

    #[test]
    fn align_self_overrides_align_items() {
        let items = [
            LayoutItem::new(Size::new(20.0, 10.0)),
            LayoutItem::new(Size::new(20.0, 10.0)).with_align_self(Align::End),
            LayoutItem::new(Size::new(20.0, 10.0)).with_align_self(Align::Stretch),
        ];
        let mut c = column(100.0);
        c.align = Align::Center;
        let rects = arrange(&c, &items, &LayoutConfig::default());
        assert_eq!(rects[0].x, 40.0);
        assert_eq!(rects[1].x, 80.0);
        assert_eq!((rects[2].x, rects[2].width), (0.0, 100.0));
    }

    #[test]
    fn stretch_skips_explicit_cross_size() {
        let mut item = LayoutItem::new(Size::new(20.0, 10.0));
        item.explicit_width = true;
        let mut c = column(100.0);
        c.align = Align::Stretch;
        let rects = arrange(&c, &[item], &LayoutConfig::default());
        assert_eq!(rects[0].width, 20.0);
    }

    #[test]
    fn reverse_packs_at_end() {
        let items = [
            LayoutItem::new(Size::new(10.0, 10.0)),
            LayoutItem::new(Size::new(10.0, 20.0)),
        ];
        let mut c = column(100.0);
        c.reverse = true;
        let rects = arrange(&c, &items, &LayoutConfig::default());
        assert_eq!(rects[0].y, 90.0);
        assert_eq!(rects[1].y, 70.0);
    }

    #[test]
    fn wrap_breaks_lines() {
        let items: Vec<_> = (0..3).map(|_| LayoutItem::new(Size::new(40.0, 10.0))).collect();
        let mut c = row(100.0);
        c.wrap = FlexWrap::Wrap;
        c.cross_gap = 5.0;
        let rects = arrange(&c, &items, &LayoutConfig::default());
        assert_eq!((rects[0].x, rects[0].y), (0.0, 0.0));
        assert_eq!((rects[1].x, rects[1].y), (40.0, 0.0));
        assert_eq!((rects[2].x, rects[2].y), (0.0, 15.0));
    }

    #[test]
    fn wrap_reverse_reverses_lines_only() {
        let items: Vec<_> = (0..3).map(|_| LayoutItem::new(Size::new(40.0, 10.0))).collect();
        let mut c = row(100.0);
        c.wrap = FlexWrap::WrapReverse;
        let rects = arrange(&c, &items, &LayoutConfig::default());
        assert_eq!((rects[2].x, rects[2].y), (0.0, 0.0));
        assert_eq!((rects[0].x, rects[0].y), (0.0, 10.0));
        assert_eq!((rects[1].x, rects[1].y), (40.0, 10.0));
    }

    #[test]
    fn oversized_item_gets_own_line() {
        let items = [
            LayoutItem::new(Size::new(150.0, 10.0)).with_flex(0.0, 0.0, None),
            LayoutItem::new(Size::new(10.0, 10.0)),
        ];
        let mut c = row(100.0);
        c.wrap = FlexWrap::Wrap;
        let rects = arrange(&c, &items, &LayoutConfig::default());
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 150.0, 10.0));
        assert_eq!(rects[1], Rect::new(0.0, 10.0, 10.0, 10.0));
    }

    #[test]
    fn empty_container() {
        assert!(arrange(&row(100.0), &[], &LayoutConfig::default()).is_empty());
    }
}
