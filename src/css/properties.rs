//! Layout properties: effective style → typed, defaulted layout view.
//!
//! Every keyword property is a closed enum with an explicit default; an
//! unrecognised keyword falls back to that default rather than erroring.

use crate::css::cascade::EffectiveStyle;
use crate::css::value::{Length, StyleValue};
use crate::dom::NodeId;

/// Container layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Column,
    Row,
    ColumnReverse,
    RowReverse,
    Grid,
    /// No axis algorithm runs for this container.
    None,
}

impl Display {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "row" => Display::Row,
            "column-reverse" => Display::ColumnReverse,
            "row-reverse" => Display::RowReverse,
            "grid" => Display::Grid,
            "none" => Display::None,
            _ => Display::Column,
        }
    }

    /// Whether items are placed in reverse order.
    pub fn is_reverse(self) -> bool {
        matches!(self, Display::ColumnReverse | Display::RowReverse)
    }
}

/// How an element takes part in its parent's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Relative,
    Absolute,
    Anchor,
}

impl Position {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "absolute" => Position::Absolute,
            "anchor" => Position::Anchor,
            _ => Position::Relative,
        }
    }

    /// Whether the element is skipped by the flow algorithms.
    pub fn is_out_of_flow(self) -> bool {
        !matches!(self, Position::Relative)
    }
}

/// Main-axis distribution (`justifyContent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl Justify {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "center" => Justify::Center,
            "end" | "flex-end" => Justify::End,
            "space-between" => Justify::SpaceBetween,
            "space-around" => Justify::SpaceAround,
            "space-evenly" => Justify::SpaceEvenly,
            _ => Justify::Start,
        }
    }

    /// Swap `start` and `end`; distributed modes are symmetric.
    pub fn mirrored(self) -> Self {
        match self {
            Justify::Start => Justify::End,
            Justify::End => Justify::Start,
            other => other,
        }
    }
}

/// Cross-axis (or in-cell) placement: `alignItems`, `alignSelf`, `justifySelf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    Stretch,
}

impl Align {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "center" => Align::Center,
            "end" | "flex-end" => Align::End,
            "stretch" => Align::Stretch,
            _ => Align::Start,
        }
    }

    /// Offset of an item of `outer` extent inside `available` space.
    pub fn offset(self, available: f32, outer: f32) -> f32 {
        match self {
            Align::Start | Align::Stretch => 0.0,
            Align::Center => (available - outer) / 2.0,
            Align::End => available - outer,
        }
    }
}

/// Line wrapping for flex containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

impl FlexWrap {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "wrap" => FlexWrap::Wrap,
            "wrap-reverse" => FlexWrap::WrapReverse,
            _ => FlexWrap::NoWrap,
        }
    }
}

/// One of the nine named reference points on a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorPoint {
    #[default]
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl AnchorPoint {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "top" | "top-center" => AnchorPoint::Top,
            "top-right" => AnchorPoint::TopRight,
            "left" | "center-left" => AnchorPoint::Left,
            "center" => AnchorPoint::Center,
            "right" | "center-right" => AnchorPoint::Right,
            "bottom-left" => AnchorPoint::BottomLeft,
            "bottom" | "bottom-center" => AnchorPoint::Bottom,
            "bottom-right" => AnchorPoint::BottomRight,
            _ => AnchorPoint::TopLeft,
        }
    }

    /// Position of the point as fractions `(fx, fy)` of the box size.
    pub fn fractions(self) -> (f32, f32) {
        match self {
            AnchorPoint::TopLeft => (0.0, 0.0),
            AnchorPoint::Top => (0.5, 0.0),
            AnchorPoint::TopRight => (1.0, 0.0),
            AnchorPoint::Left => (0.0, 0.5),
            AnchorPoint::Center => (0.5, 0.5),
            AnchorPoint::Right => (1.0, 0.5),
            AnchorPoint::BottomLeft => (0.0, 1.0),
            AnchorPoint::Bottom => (0.5, 1.0),
            AnchorPoint::BottomRight => (1.0, 1.0),
        }
    }
}

/// What an anchored element is positioned against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnchorTarget {
    #[default]
    Parent,
    /// First live element carrying this tag.
    Tag(String),
    Node(NodeId),
}

impl AnchorTarget {
    fn from_value(value: Option<&StyleValue>) -> Self {
        match value {
            Some(StyleValue::Node(id)) => AnchorTarget::Node(*id),
            Some(StyleValue::Text(text)) => {
                let text = text.trim();
                if text.is_empty() || text.eq_ignore_ascii_case("parent") {
                    AnchorTarget::Parent
                } else {
                    AnchorTarget::Tag(text.to_owned())
                }
            }
            _ => AnchorTarget::Parent,
        }
    }
}

/// Typed view of the layout-relevant part of an [`EffectiveStyle`], with
/// defaults applied. Cheap to build; rebuilt on every layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutProperties {
    pub display: Display,
    pub position: Position,
    pub justify_content: Justify,
    pub align_items: Align,
    pub align_self: Option<Align>,
    pub justify_self: Option<Align>,
    pub flex_wrap: FlexWrap,

    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Option<Length>,
    /// Whether any of `flexGrow`, `flexShrink`, `flexBasis` is set.
    pub has_flex: bool,

    pub width: Option<Length>,
    pub height: Option<Length>,
    pub min_width: Option<Length>,
    pub max_width: Option<Length>,
    pub min_height: Option<Length>,
    pub max_height: Option<Length>,

    pub gap: Option<Length>,
    pub row_gap: Option<Length>,
    pub column_gap: Option<Length>,

    pub fit_content: bool,
    pub grid_columns: Option<usize>,

    pub left: Option<Length>,
    pub right: Option<Length>,
    pub top: Option<Length>,
    pub bottom: Option<Length>,

    pub anchor_target: AnchorTarget,
    pub anchor_point: AnchorPoint,
    pub self_anchor: AnchorPoint,
    pub anchor_offset_x: f32,
    pub anchor_offset_y: f32,
}

impl Default for LayoutProperties {
    fn default() -> Self {
        Self::from_style(&EffectiveStyle::default())
    }
}

impl LayoutProperties {
    /// Project an effective style onto the layout properties.
    pub fn from_style(style: &EffectiveStyle) -> Self {
        let keyword = |name: &str| style.text(name).unwrap_or_default();
        let length = |name: &str| style.length(name).filter(|l| *l != Length::Auto);

        Self {
            display: Display::from_keyword(keyword("display")),
            position: Position::from_keyword(keyword("position")),
            justify_content: Justify::from_keyword(keyword("justifyContent")),
            align_items: Align::from_keyword(keyword("alignItems")),
            align_self: style.text("alignSelf").map(Align::from_keyword),
            justify_self: style.text("justifySelf").map(Align::from_keyword),
            flex_wrap: FlexWrap::from_keyword(keyword("flexWrap")),

            flex_grow: style.number("flexGrow").unwrap_or(0.0).max(0.0),
            flex_shrink: style.number("flexShrink").unwrap_or(1.0).max(0.0),
            flex_basis: length("flexBasis"),
            has_flex: ["flexGrow", "flexShrink", "flexBasis"]
                .iter()
                .any(|p| style.contains(p)),

            width: length("width"),
            height: length("height"),
            min_width: length("minWidth"),
            max_width: length("maxWidth"),
            min_height: length("minHeight"),
            max_height: length("maxHeight"),

            gap: length("gap"),
            row_gap: length("rowGap"),
            column_gap: length("columnGap"),

            fit_content: style.get("fitContent").is_some_and(StyleValue::is_truthy),
            grid_columns: style
                .number("gridColumns")
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map(|n| n as usize),

            left: length("left"),
            right: length("right"),
            top: length("top"),
            bottom: length("bottom"),

            anchor_target: AnchorTarget::from_value(style.get("anchorTarget")),
            anchor_point: AnchorPoint::from_keyword(keyword("anchorPoint")),
            self_anchor: AnchorPoint::from_keyword(keyword("selfAnchor")),
            anchor_offset_x: style.number("anchorOffsetX").unwrap_or(0.0),
            anchor_offset_y: style.number("anchorOffsetY").unwrap_or(0.0),
        }
    }

    /// Whether `width`, `height` or `flexBasis` is a percentage.
    pub fn uses_percent(&self) -> bool {
        [self.width, self.height, self.flex_basis]
            .iter()
            .flatten()
            .any(|l| l.is_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::cascade::cascade;
    use crate::css::parser::parse_style;

    fn props(text: &str) -> LayoutProperties {
        LayoutProperties::from_style(&cascade([&parse_style(text)]))
    }

    #[test]
    fn defaults() {
        let p = props("");
        assert_eq!(p.display, Display::Column);
        assert_eq!(p.position, Position::Relative);
        assert_eq!(p.align_items, Align::Start);
        assert_eq!(p.justify_content, Justify::Start);
        assert_eq!(p.flex_grow, 0.0);
        assert_eq!(p.flex_shrink, 1.0);
        assert!(!p.has_flex);
        assert!(!p.fit_content);
        assert_eq!(p.anchor_target, AnchorTarget::Parent);
    }

    #[test]
    fn keywords() {
        let p = props(
            "display: row-reverse; position: anchor; justify-content: space-evenly; \
             align-items: stretch; align-self: flex-end; flex-wrap: wrap-reverse",
        );
        assert_eq!(p.display, Display::RowReverse);
        assert!(p.display.is_reverse());
        assert_eq!(p.position, Position::Anchor);
        assert_eq!(p.justify_content, Justify::SpaceEvenly);
        assert_eq!(p.align_items, Align::Stretch);
        assert_eq!(p.align_self, Some(Align::End));
        assert_eq!(p.flex_wrap, FlexWrap::WrapReverse);
    }

    #[test]
    fn unknown_keywords_fall_back() {
        let p = props("display: inline-block; position: sticky; justify-content: wobble");
        assert_eq!(p.display, Display::Column);
        assert_eq!(p.position, Position::Relative);
        assert_eq!(p.justify_content, Justify::Start);
    }

    #[test]
    fn flex_and_sizes() {
        let p = props("flex: 2 3 50%; width: 10px; max-height: 20; height: auto");
        assert_eq!(p.flex_grow, 2.0);
        assert_eq!(p.flex_shrink, 3.0);
        assert_eq!(p.flex_basis, Some(Length::Percent(50.0)));
        assert!(p.has_flex);
        assert!(p.uses_percent());
        assert_eq!(p.width, Some(Length::Px(10.0)));
        assert_eq!(p.max_height, Some(Length::Px(20.0)));
        assert_eq!(p.height, None);
    }

    #[test]
    fn fit_content_truthiness() {
        assert!(props("fit-content: true").fit_content);
        assert!(props("fitContent: 1").fit_content);
        assert!(!props("fitContent: 0").fit_content);
        assert!(!props("fitContent: false").fit_content);
    }

    #[test]
    fn anchor_properties() {
        let p = props("anchor-target: menu; anchor-point: bottom-center; self-anchor: right; anchor-offset-x: 4");
        assert_eq!(p.anchor_target, AnchorTarget::Tag("menu".into()));
        assert_eq!(p.anchor_point, AnchorPoint::Bottom);
        assert_eq!(p.self_anchor, AnchorPoint::Right);
        assert_eq!(p.anchor_offset_x, 4.0);
        assert_eq!(props("anchorTarget: parent").anchor_target, AnchorTarget::Parent);
        assert_eq!(AnchorPoint::from_keyword("nowhere"), AnchorPoint::TopLeft);
        assert_eq!(AnchorPoint::Center.fractions(), (0.5, 0.5));
    }

    #[test]
    fn justify_mirror() {
        assert_eq!(Justify::Start.mirrored(), Justify::End);
        assert_eq!(Justify::SpaceAround.mirrored(), Justify::SpaceAround);
    }

    #[test]
    fn align_offset() {
        assert_eq!(Align::Start.offset(100.0, 20.0), 0.0);
        assert_eq!(Align::Center.offset(100.0, 20.0), 40.0);
        assert_eq!(Align::End.offset(100.0, 20.0), 80.0);
    }
}
