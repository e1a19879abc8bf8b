//! Declaration block model: property map plus `!important` flags.

use std::collections::{HashMap, HashSet};

use crate::css::value::StyleValue;

/// A parsed declaration block: camelCase property name → value, plus the set
/// of properties declared `!important`.
///
/// Used for registered class styles, inline element styles, and as the
/// fragments fed to the cascade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    values: HashMap<String, StyleValue>,
    important: HashSet<String>,
}

impl Declarations {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property value.
    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.values.get(property)
    }

    /// Whether the property is set.
    pub fn contains(&self, property: &str) -> bool {
        self.values.contains_key(property)
    }

    /// Whether the property was declared `!important`.
    pub fn is_important(&self, property: &str) -> bool {
        self.important.contains(property)
    }

    /// Set a property, replacing any previous value and importance.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<StyleValue>, important: bool) {
        let property = property.into();
        if important {
            self.important.insert(property.clone());
        } else {
            self.important.remove(&property);
        }
        self.values.insert(property, value.into());
    }

    /// Remove a property and its importance flag. Returns the old value.
    pub fn remove(&mut self, property: &str) -> Option<StyleValue> {
        self.important.remove(property);
        self.values.remove(property)
    }

    /// Iterate `(property, value, important)` triples in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue, bool)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v, self.important.contains(k)))
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut d = Declarations::new();
        d.set("width", 10.0f32, false);
        assert_eq!(d.get("width"), Some(&StyleValue::Number(10.0)));
        assert!(!d.is_important("width"));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn set_tracks_importance() {
        let mut d = Declarations::new();
        d.set("color", "red", true);
        assert!(d.is_important("color"));
        d.set("color", "blue", false);
        assert!(!d.is_important("color"));
        assert_eq!(d.get("color"), Some(&StyleValue::from("blue")));
    }

    #[test]
    fn remove_clears_importance() {
        let mut d = Declarations::new();
        d.set("color", "red", true);
        assert_eq!(d.remove("color"), Some(StyleValue::from("red")));
        assert!(!d.is_important("color"));
        assert!(d.is_empty());
        assert_eq!(d.remove("color"), None);
    }

    #[test]
    fn iter_reports_importance() {
        let mut d = Declarations::new();
        d.set("a", 1.0f32, true);
        d.set("b", 2.0f32, false);
        let mut seen: Vec<_> = d.iter().map(|(k, _, imp)| (k.to_string(), imp)).collect();
        seen.sort();
        assert_eq!(seen, vec![("a".to_string(), true), ("b".to_string(), false)]);
    }
}
