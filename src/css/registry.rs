//! Style registry: named style classes parsed from declaration text.

use std::collections::HashMap;

use crate::css::model::Declarations;
use crate::css::parser::{parse_style, to_camel_case};
use crate::css::value::StyleValue;

/// Longhands written by the `flex` shorthand.
const FLEX_LONGHANDS: [&str; 3] = ["flexGrow", "flexShrink", "flexBasis"];

/// Errors from class mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown style class: {0}")]
    UnknownClass(String),
}

/// A named style class: its parsed declarations and `!important` set.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleClass {
    name: String,
    style: Declarations,
}

impl StyleClass {
    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed declarations.
    pub fn style(&self) -> &Declarations {
        &self.style
    }
}

/// Registry of style classes, keyed by unique name.
///
/// Cache invalidation for elements that reference a class is the caller's
/// job; [`LayoutEngine`](crate::layout::LayoutEngine) wraps these methods and
/// does it.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    classes: HashMap<String, StyleClass>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` and store it under `name`, replacing any previous class.
    pub fn register(&mut self, name: impl Into<String>, text: &str) -> &StyleClass {
        let name = name.into();
        let class = StyleClass { name: name.clone(), style: parse_style(text) };
        self.classes.insert(name.clone(), class);
        &self.classes[&name]
    }

    /// Look up a class by name.
    pub fn get(&self, name: &str) -> Option<&StyleClass> {
        self.classes.get(name)
    }

    /// Whether a class with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class is registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Set one property on an existing class.
    ///
    /// Text values go through the declaration parser, so `"10"` becomes a
    /// number and `flex` expands to its longhands. A text value ends at its
    /// first `;` or newline; anything after that is dropped.
    pub fn set_property(
        &mut self,
        name: &str,
        property: &str,
        value: StyleValue,
        important: bool,
    ) -> Result<(), RegistryError> {
        let class = self
            .classes
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownClass(name.to_owned()))?;

        match value {
            StyleValue::Text(text) => {
                let text = text.split([';', '\n']).next().unwrap_or_default();
                let parsed = parse_style(&format!("{property}: {text}"));
                for (prop, value, imp) in parsed.iter() {
                    class.style.set(prop, value.clone(), important || imp);
                }
            }
            other => class.style.set(to_camel_case(property), other, important),
        }
        Ok(())
    }

    /// Remove one property from an existing class. Removing `flex` removes
    /// its three longhands.
    pub fn remove_property(&mut self, name: &str, property: &str) -> Result<(), RegistryError> {
        let class = self
            .classes
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownClass(name.to_owned()))?;

        let property = to_camel_case(property);
        if property == "flex" {
            for longhand in FLEX_LONGHANDS {
                class.style.remove(longhand);
            }
        } else {
            class.style.remove(&property);
        }
        Ok(())
    }
}
