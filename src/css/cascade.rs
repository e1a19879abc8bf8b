//! Cascade: merge class styles and the inline style into one effective style,
//! and cache the result per element.

use std::collections::{HashMap, HashSet};

use slotmap::SecondaryMap;

use crate::css::model::Declarations;
use crate::css::value::{Length, StyleValue};
use crate::dom::NodeId;

/// The merged property map for one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveStyle {
    values: HashMap<String, StyleValue>,
}

impl EffectiveStyle {
    /// Look up a property value.
    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.values.get(property)
    }

    /// Whether the property is set.
    pub fn contains(&self, property: &str) -> bool {
        self.values.contains_key(property)
    }

    /// The property as a number, if it is numeric.
    pub fn number(&self, property: &str) -> Option<f32> {
        self.get(property).and_then(StyleValue::as_number)
    }

    /// The property as text, if it is text.
    pub fn text(&self, property: &str) -> Option<&str> {
        self.get(property).and_then(StyleValue::as_text)
    }

    /// The property as a length, if it parses as one.
    pub fn length(&self, property: &str) -> Option<Length> {
        self.get(property).and_then(Length::parse)
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(property, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Merge declaration blocks left to right.
///
/// A later source overwrites a property unless an earlier source declared it
/// `!important` and the later one does not.
pub fn cascade<'a>(sources: impl IntoIterator<Item = &'a Declarations>) -> EffectiveStyle {
    let mut values = HashMap::new();
    let mut locked: HashSet<&str> = HashSet::new();

    for source in sources {
        for (property, value, important) in source.iter() {
            if locked.contains(property) && !important {
                continue;
            }
            values.insert(property.to_owned(), value.clone());
            if important {
                locked.insert(property);
            }
        }
    }

    EffectiveStyle { values }
}

#[derive(Debug)]
struct CacheEntry {
    revision: u64,
    classes: Vec<String>,
    style: EffectiveStyle,
}

/// Per-element cache of effective styles.
///
/// An entry is valid while the element's revision matches the one stored
/// with it. Class mutation drops every entry whose class list names the class.
#[derive(Debug, Default)]
pub struct StyleCache {
    entries: SecondaryMap<NodeId, CacheEntry>,
}

impl StyleCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached style, if present and computed at `revision`.
    pub fn get(&self, node: NodeId, revision: u64) -> Option<&EffectiveStyle> {
        self.entries
            .get(node)
            .filter(|entry| entry.revision == revision)
            .map(|entry| &entry.style)
    }

    /// Store a freshly computed style.
    pub fn insert(&mut self, node: NodeId, revision: u64, classes: Vec<String>, style: EffectiveStyle) {
        self.entries.insert(node, CacheEntry { revision, classes, style });
    }

    /// Drop one element's entry. Returns whether one existed.
    pub fn invalidate(&mut self, node: NodeId) -> bool {
        self.entries.remove(node).is_some()
    }

    /// Drop every entry whose class list contains `class`. Returns the count dropped.
    pub fn invalidate_class(&mut self, class: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.classes.iter().any(|c| c == class));
        before - self.entries.len()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
