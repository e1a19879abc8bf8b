//! Out-of-flow placement: `position: absolute` and `position: anchor`.

use crate::css::properties::LayoutProperties;
use crate::css::value::{Length, UnitContext};
use crate::geometry::{Edges, Rect, Size};

/// Top-left corner of an absolutely positioned element inside `container`
/// (the parent's content box).
///
/// `left` wins over `right` and `top` over `bottom`. Each offset is applied
/// together with the margin on the same side. Percentages resolve against the
/// container's width (`left`/`right`) or height (`top`/`bottom`).
pub fn absolute(
    props: &LayoutProperties,
    margin: Edges,
    size: Size,
    container: Rect,
    units: &UnitContext,
) -> (f32, f32) {
    let resolve = |length: Option<Length>, basis: f32| length.and_then(|l| l.resolve(basis, units));

    let x = match (resolve(props.left, container.width), resolve(props.right, container.width)) {
        (Some(left), _) => container.x + left + margin.left,
        (None, Some(right)) => container.right() - right - margin.right - size.width,
        (None, None) => container.x + margin.left,
    };
    let y = match (resolve(props.top, container.height), resolve(props.bottom, container.height)) {
        (Some(top), _) => container.y + top + margin.top,
        (None, Some(bottom)) => container.bottom() - bottom - margin.bottom - size.height,
        (None, None) => container.y + margin.top,
    };
    (x, y)
}

/// Top-left corner that puts the element's `selfAnchor` point on the
/// target's `anchorPoint`, shifted by `anchorOffsetX/Y`.
pub fn anchor(props: &LayoutProperties, target: Rect, size: Size) -> (f32, f32) {
    let (fx, fy) = props.anchor_point.fractions();
    let (tx, ty) = target.point_at(fx, fy);
    let (sx, sy) = props.self_anchor.fractions();
    (
        tx - size.width * sx + props.anchor_offset_x,
        ty - size.height * sy + props.anchor_offset_y,
    )
}
