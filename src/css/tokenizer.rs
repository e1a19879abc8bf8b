//! logos-based style value tokenizer.
//!
//! Declarations are split by the parser; this lexer only classifies the
//! *value* side, e.g. `10`, `0px`, `50%`, `2px solid red`, `top-left`.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `10px` as Dimension beats `10` as Number)
//! 2. For equal length matches, earlier-defined variants win

use logos::Logos;

/// Style value token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum ValueToken {
    /// Number with a recognised unit suffix: `10px`, `50%`, `1.5em`, `-2vw`.
    #[regex(r"[+-]?([0-9]+(\.[0-9]+)?|\.[0-9]+)(px|%|em|rem|pt|vh|vw)")]
    Dimension,

    /// Optionally signed decimal: `10`, `-5`, `+3.25`, `.5`.
    #[regex(r"[+-]?([0-9]+(\.[0-9]+)?|\.[0-9]+)")]
    Number,

    /// Hex color or hash-prefixed word: `#fff`, `#ff00aa`.
    #[regex(r"#[a-zA-Z0-9_-]+")]
    Hash,

    /// Keyword or identifier: `auto`, `space-between`, `top-left`, `-webkit-x`.
    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `,`
    #[token(",")]
    Comma,

    /// `/`
    #[token("/")]
    Slash,
}

/// Tokenize a value string into `(ValueToken, text)` pairs.
///
/// Characters that fail to lex are skipped.
pub fn tokenize(input: &str) -> Vec<(ValueToken, String)> {
    ValueToken::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}

/// Returns the numeric value of `input` if the *whole* string is a number.
///
/// A bare number converts directly. A zero with a recognised unit suffix
/// (`0px`, `0%`, `-0.0em`) converts to `0`. Anything else (`10px`, `50%`,
/// `auto`, `1 2`) is not numeric.
pub fn numeric_value(input: &str) -> Option<f32> {
    let mut lexer = ValueToken::lexer(input);
    let token = lexer.next()?.ok()?;
    let span = lexer.span();
    if span.start != 0 || span.end != input.len() || lexer.next().is_some() {
        return None;
    }
    match token {
        ValueToken::Number => input.parse().ok(),
        ValueToken::Dimension => {
            let (number, _unit) = split_dimension(input)?;
            let n: f32 = number.parse().ok()?;
            (n == 0.0).then_some(0.0)
        }
        _ => None,
    }
}

/// Split a dimension string like "50%" or "1.5em" into (number_part, unit_part).
pub fn split_dimension(s: &str) -> Option<(&str, &str)> {
    let unit_start = s
        .char_indices()
        .find(|(i, c)| !c.is_ascii_digit() && *c != '.' && !((*c == '-' || *c == '+') && *i == 0))
        .map(|(i, _)| i)?;

    if unit_start == 0 || unit_start >= s.len() {
        return None;
    }

    Some((&s[..unit_start], &s[unit_start..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<ValueToken> {
        tokenize(input).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn numbers() {
        let result = tokenize("10 -5 3.25 +1 .5");
        assert_eq!(result[0], (ValueToken::Number, "10".into()));
        assert_eq!(result[1], (ValueToken::Number, "-5".into()));
        assert_eq!(result[2], (ValueToken::Number, "3.25".into()));
        assert_eq!(result[3], (ValueToken::Number, "+1".into()));
        assert_eq!(result[4], (ValueToken::Number, ".5".into()));
    }

    #[test]
    fn dimensions() {
        let result = tokenize("10px 50% 1.5em 2rem 12pt 80vh 100vw");
        assert!(result.iter().all(|(t, _)| *t == ValueToken::Dimension));
        assert_eq!(result.len(), 7);
    }

    #[test]
    fn dimension_over_number() {
        assert_eq!(tokens("10px"), vec![ValueToken::Dimension]);
        assert_eq!(tokens("10"), vec![ValueToken::Number]);
    }

    #[test]
    fn idents_and_hash() {
        let result = tokenize("space-between top-left #ff00aa");
        assert_eq!(result[0], (ValueToken::Ident, "space-between".into()));
        assert_eq!(result[1], (ValueToken::Ident, "top-left".into()));
        assert_eq!(result[2], (ValueToken::Hash, "#ff00aa".into()));
    }

    #[test]
    fn border_shorthand_tokens() {
        assert_eq!(
            tokens("2px solid red"),
            vec![ValueToken::Dimension, ValueToken::Ident, ValueToken::Ident]
        );
    }

    #[test]
    fn numeric_value_bare_numbers() {
        assert_eq!(numeric_value("10"), Some(10.0));
        assert_eq!(numeric_value("-2.5"), Some(-2.5));
        assert_eq!(numeric_value("+4"), Some(4.0));
    }

    #[test]
    fn numeric_value_zero_with_unit() {
        assert_eq!(numeric_value("0px"), Some(0.0));
        assert_eq!(numeric_value("0%"), Some(0.0));
        assert_eq!(numeric_value("0.0em"), Some(0.0));
        assert_eq!(numeric_value("-0rem"), Some(0.0));
        assert_eq!(numeric_value("0vw"), Some(0.0));
    }

    #[test]
    fn numeric_value_rejects_everything_else() {
        assert_eq!(numeric_value("10px"), None);
        assert_eq!(numeric_value("50%"), None);
        assert_eq!(numeric_value("auto"), None);
        assert_eq!(numeric_value("1 2"), None);
        assert_eq!(numeric_value("0fr"), None);
        assert_eq!(numeric_value(""), None);
    }

    #[test]
    fn split_dimension_cases() {
        assert_eq!(split_dimension("50%"), Some(("50", "%")));
        assert_eq!(split_dimension("-10px"), Some(("-10", "px")));
        assert_eq!(split_dimension("+1.5em"), Some(("+1.5", "em")));
        assert_eq!(split_dimension("px"), None);
        assert_eq!(split_dimension("10"), None);
    }
}
