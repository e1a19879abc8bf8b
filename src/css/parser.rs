//! Declaration block parser.
//!
//! Turns free-form `property: value;` text into [`Declarations`]. Parsing
//! never fails: blank and malformed segments are skipped.

use crate::css::model::Declarations;
use crate::css::tokenizer;
use crate::css::value::StyleValue;

/// Marker that flags a declaration as important.
const IMPORTANT: &str = "!important";

/// Parse a style text block into a [`Declarations`] map.
///
/// - Declarations are terminated by `;` or a newline.
/// - Property names are normalised from kebab-case to camelCase.
/// - A trailing `!important` is stripped and recorded.
/// - Numeric values (and zero with a unit) become numbers; everything else stays text.
/// - `flex` is expanded into `flexGrow`, `flexShrink`, `flexBasis`.
pub fn parse_style(text: &str) -> Declarations {
    let mut out = Declarations::new();

    for segment in text.split([';', '\n']) {
        let Some((name, value)) = split_declaration(segment) else {
            continue;
        };
        let (value, important) = strip_important(value);
        if value.is_empty() {
            continue;
        }
        let name = to_camel_case(name);
        if name.is_empty() {
            continue;
        }

        if name == "flex" {
            expand_flex(&mut out, value, important);
        } else {
            out.set(name, classify(value), important);
        }
    }

    out
}

/// Convert a raw value into a [`StyleValue`]: numeric when the whole value is
/// a number (or a zero with a unit), text otherwise.
pub fn classify(value: &str) -> StyleValue {
    match tokenizer::numeric_value(value) {
        Some(n) => StyleValue::Number(n),
        None => StyleValue::Text(value.to_string()),
    }
}

/// Normalise `kebab-case` to `camelCase`. Names without dashes pass through.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Split `name: value` at the first colon. Returns `None` for blank or
/// malformed segments.
fn split_declaration(segment: &str) -> Option<(&str, &str)> {
    let (name, value) = segment.trim().split_once(':')?;
    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some((name, value))
}

fn strip_important(value: &str) -> (&str, bool) {
    match value.strip_suffix(IMPORTANT) {
        Some(rest) => (rest.trim_end(), true),
        None => (value, false),
    }
}

/// Expand the `flex` shorthand using flexbox shorthand rules.
fn expand_flex(out: &mut Declarations, value: &str, important: bool) {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let num = StyleValue::Number;
    let auto = || StyleValue::from("auto");

    let (grow, shrink, basis): (StyleValue, StyleValue, StyleValue) = match parts.as_slice() {
        [single] => match single.to_ascii_lowercase().as_str() {
            "auto" => (num(1.0), num(1.0), auto()),
            "none" => (num(0.0), num(0.0), auto()),
            "initial" => (num(0.0), num(1.0), auto()),
            _ => match tokenizer::numeric_value(single) {
                Some(n) => (num(n), num(1.0), num(0.0)),
                None => (num(1.0), num(1.0), classify(single)),
            },
        },
        [grow, second] => match tokenizer::numeric_value(second) {
            Some(shrink) => (classify(grow), num(shrink), num(0.0)),
            None => (classify(grow), num(1.0), classify(second)),
        },
        [grow, shrink, basis, ..] => (classify(grow), classify(shrink), classify(basis)),
        [] => return,
    };

    out.set("flexGrow", grow, important);
    out.set("flexShrink", shrink, important);
    out.set("flexBasis", basis, important);
}
