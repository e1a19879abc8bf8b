//! Style values: StyleValue (number, text, bool, element reference) and Length.

use std::fmt;

use crate::config::LayoutConfig;
use crate::css::tokenizer::{self, ValueToken};
use crate::dom::NodeId;
use crate::geometry::Size;

/// A single property value in a style map.
///
/// Parsed style text only produces `Number` and `Text`. `Bool` and `Node`
/// come from inline styles set programmatically (e.g. `fitContent: true`,
/// `anchorTarget: <element>`).
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Number(f32),
    Text(String),
    Bool(bool),
    Node(NodeId),
}

impl StyleValue {
    /// The numeric value, if this is a number or numeric text.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(s) => tokenizer::numeric_value(s.trim()),
            _ => None,
        }
    }

    /// The text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether this value enables a boolean flag: `true`, `"true"`, or a non-zero number.
    pub fn is_truthy(&self) -> bool {
        match self {
            StyleValue::Bool(b) => *b,
            StyleValue::Number(n) => *n != 0.0,
            StyleValue::Text(s) => s.trim().eq_ignore_ascii_case("true"),
            StyleValue::Node(_) => true,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{n}"),
            StyleValue::Text(s) => write!(f, "{s}"),
            StyleValue::Bool(b) => write!(f, "{b}"),
            StyleValue::Node(id) => write!(f, "{id:?}"),
        }
    }
}

impl From<f32> for StyleValue {
    fn from(n: f32) -> Self {
        StyleValue::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(n as f32)
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        StyleValue::Bool(b)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_owned())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<NodeId> for StyleValue {
    fn from(id: NodeId) -> Self {
        StyleValue::Node(id)
    }
}

// ---------------------------------------------------------------------------
// Length
// ---------------------------------------------------------------------------

/// A length with its unit, e.g. `10`, `10px`, `50%`, `2em`, `auto`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Auto,
    Px(f32),
    /// Percentage of the parent's content box along the same axis.
    Percent(f32),
    Em(f32),
    Rem(f32),
    Pt(f32),
    /// Percentage of the viewport width.
    Vw(f32),
    /// Percentage of the viewport height.
    Vh(f32),
}

/// Everything needed to turn a non-percentage [`Length`] into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitContext {
    pub viewport: Size,
    pub font_size: f32,
}

impl Default for UnitContext {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

impl From<&LayoutConfig> for UnitContext {
    fn from(config: &LayoutConfig) -> Self {
        Self { viewport: config.viewport, font_size: config.font_size }
    }
}

impl Length {
    /// Parse a style value into a length. Returns `None` for values that are
    /// not lengths (keywords other than `auto`, lists, element references).
    pub fn parse(value: &StyleValue) -> Option<Length> {
        match value {
            StyleValue::Number(n) => Some(Length::Px(*n)),
            StyleValue::Text(s) => Length::parse_text(s.trim()),
            _ => None,
        }
    }

    /// Parse a single length token such as `auto`, `12`, `50%` or `1.5em`.
    pub fn parse_text(text: &str) -> Option<Length> {
        if text.eq_ignore_ascii_case("auto") {
            return Some(Length::Auto);
        }
        if let Some(n) = tokenizer::numeric_value(text) {
            return Some(Length::Px(n));
        }
        let tokens = tokenizer::tokenize(text);
        match tokens.as_slice() {
            [(ValueToken::Dimension, raw)] if raw.len() == text.len() => {
                let (number, unit) = tokenizer::split_dimension(raw)?;
                let n: f32 = number.parse().ok()?;
                Some(match unit {
                    "px" => Length::Px(n),
                    "%" => Length::Percent(n),
                    "em" => Length::Em(n),
                    "rem" => Length::Rem(n),
                    "pt" => Length::Pt(n),
                    "vw" => Length::Vw(n),
                    "vh" => Length::Vh(n),
                    _ => return None,
                })
            }
            _ => None,
        }
    }

    /// Whether this length is relative to the parent's size.
    pub fn is_percent(self) -> bool {
        matches!(self, Length::Percent(_))
    }

    /// Resolve to pixels. `basis` is the parent extent used for percentages.
    /// `Auto` resolves to `None`.
    pub fn resolve(self, basis: f32, units: &UnitContext) -> Option<f32> {
        match self {
            Length::Auto => None,
            Length::Px(n) => Some(n),
            Length::Percent(p) => Some(p / 100.0 * basis),
            Length::Em(n) | Length::Rem(n) => Some(n * units.font_size),
            Length::Pt(n) => Some(n * 4.0 / 3.0),
            Length::Vw(n) => Some(n / 100.0 * units.viewport.width),
            Length::Vh(n) => Some(n / 100.0 * units.viewport.height),
        }
    }
}
