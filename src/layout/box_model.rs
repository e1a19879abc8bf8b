//! Box model: per-side margin, padding and border from an effective style.

use crate::css::cascade::EffectiveStyle;
use crate::css::value::{Length, StyleValue, UnitContext};
use crate::geometry::{Edges, Rect};

/// Resolved margin, padding and border widths of one element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxModel {
    pub margin: Edges,
    pub padding: Edges,
    pub border: Edges,
}

impl BoxModel {
    /// Resolve the box model of `style`.
    ///
    /// Margin and padding sides resolve as `side ?? shorthand ?? 0`. Border
    /// sides resolve as `borderSideWidth ?? borderWidth ?? border ?? 0`.
    /// Percentages resolve against `basis` (the parent's content width).
    pub fn resolve(style: &EffectiveStyle, basis: f32, units: &UnitContext) -> Self {
        let lookup = Lookup { style, basis, units };
        Self {
            margin: lookup.edges("margin", |side| format!("margin{side}"), None),
            padding: lookup.edges("padding", |side| format!("padding{side}"), None),
            border: lookup.edges(
                "borderWidth",
                |side| format!("border{side}Width"),
                Some("border"),
            ),
        }
    }

    /// Padding plus border.
    pub fn frame(&self) -> Edges {
        self.padding + self.border
    }

    /// The content box of an element whose border box is `bounds`.
    pub fn content_box(&self, bounds: Rect) -> Rect {
        bounds.inset(self.frame())
    }
}

struct Lookup<'a> {
    style: &'a EffectiveStyle,
    basis: f32,
    units: &'a UnitContext,
}

const SIDES: [&str; 4] = ["Top", "Right", "Bottom", "Left"];

impl Lookup<'_> {
    fn edges(&self, shorthand: &str, side_name: impl Fn(&str) -> String, fallback: Option<&str>) -> Edges {
        let base = self
            .shorthand(shorthand)
            .or_else(|| fallback.and_then(|name| self.first_length(name)))
            .unwrap_or(Edges::ZERO);
        let [top, right, bottom, left] = SIDES.map(|side| self.length(&side_name(side)));
        Edges {
            top: top.unwrap_or(base.top),
            right: right.unwrap_or(base.right),
            bottom: bottom.unwrap_or(base.bottom),
            left: left.unwrap_or(base.left),
        }
    }

    fn length(&self, property: &str) -> Option<f32> {
        self.style.length(property)?.resolve(self.basis, self.units)
    }

    fn resolve_text(&self, token: &str) -> Option<f32> {
        Length::parse_text(token)?.resolve(self.basis, self.units)
    }

    /// One to four values in CSS order.
    fn shorthand(&self, property: &str) -> Option<Edges> {
        let values: Vec<f32> = match self.style.get(property)? {
            StyleValue::Number(n) => vec![*n],
            StyleValue::Text(text) => text
                .split_whitespace()
                .map(|token| self.resolve_text(token))
                .collect::<Option<_>>()?,
            _ => return None,
        };
        match values.as_slice() {
            [all] => Some(Edges::all(*all)),
            [vertical, horizontal] => Some(Edges::new(*vertical, *horizontal, *vertical, *horizontal)),
            [top, horizontal, bottom] => Some(Edges::new(*top, *horizontal, *bottom, *horizontal)),
            [top, right, bottom, left] => Some(Edges::new(*top, *right, *bottom, *left)),
            _ => None,
        }
    }

    /// First length token of a mixed shorthand such as `2px solid red`.
    fn first_length(&self, property: &str) -> Option<Edges> {
        let width = match self.style.get(property)? {
            StyleValue::Number(n) => *n,
            StyleValue::Text(text) => text
                .split_whitespace()
                .find_map(|token| self.resolve_text(token))?,
            _ => return None,
        };
        Some(Edges::all(width))
    }
}
