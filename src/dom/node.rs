//! Node types: NodeId, NodeData, UiElement.

use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::new_key_type;

use crate::css::model::Declarations;
use crate::css::parser::{classify, parse_style, to_camel_case};
use crate::css::value::StyleValue;
use crate::geometry::Rect;

new_key_type! {
    /// Unique identifier for an element. Copy, lightweight (u64).
    pub struct NodeId;
}

/// The style-affecting record attached to an element: ordered class list,
/// inline style, and the layout opt-in flag.
///
/// Every mutation draws a new `revision` from a process-wide counter, which
/// is what the engine's style cache checks to decide whether a cached
/// effective style is still valid. Revisions are never shared by two records
/// with different content, so replacing a record wholesale is also detected.
#[derive(Debug, Clone, PartialEq)]
pub struct UiElement {
    classes: Vec<String>,
    style: Declarations,
    enabled: bool,
    revision: u64,
}

impl Default for UiElement {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            style: Declarations::new(),
            enabled: true,
            revision: next_revision(),
        }
    }
}

impl UiElement {
    /// Create an enabled record with no classes and no inline style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered class list (cascade order).
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Inline style, applied after all classes.
    pub fn style(&self) -> &Declarations {
        &self.style
    }

    /// Whether this element takes part in layout.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Changes on every style-affecting mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Check whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Append a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
            self.touch();
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        if self.classes.len() != before {
            self.touch();
        }
    }

    /// Toggle a class: add if absent, remove if present.
    pub fn toggle_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }

    /// Replace the whole class list.
    pub fn set_classes(&mut self, classes: impl IntoIterator<Item = impl Into<String>>) {
        self.classes = classes.into_iter().map(Into::into).collect();
        self.touch();
    }

    /// Set one inline style property. The name is normalised to camelCase and
    /// text values are classified like parsed style text (`"10"` becomes a number).
    pub fn set_style_property(&mut self, property: &str, value: impl Into<StyleValue>, important: bool) {
        let value = match value.into() {
            StyleValue::Text(text) => classify(text.trim()),
            other => other,
        };
        self.style.set(to_camel_case(property), value, important);
        self.touch();
    }

    /// Remove one inline style property.
    pub fn remove_style_property(&mut self, property: &str) {
        if self.style.remove(&to_camel_case(property)).is_some() {
            self.touch();
        }
    }

    /// Replace the inline style with the parsed `text`.
    pub fn set_style_text(&mut self, text: &str) {
        self.style = parse_style(text);
        self.touch();
    }

    /// Enable or disable layout for this element.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.touch();
        }
    }

    /// Mark the record as changed.
    pub fn touch(&mut self) {
        self.revision = next_revision();
    }
}

fn next_revision() -> u64 {
    static REVISIONS: AtomicU64 = AtomicU64::new(1);
    REVISIONS.fetch_add(1, Ordering::Relaxed)
}

/// Data associated with a single element in the [`Dom`](super::Dom).
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Tags used for anchor-target lookup by name.
    pub tags: Vec<String>,
    /// Style record.
    pub ui: UiElement,
    /// Whether this element is visible. Invisible elements are skipped by layout.
    pub visible: bool,
    /// Unrotated geometry (border box).
    pub bounds: Rect,
    /// Rotation in radians around the center.
    pub angle: f32,
}

impl Default for NodeData {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeData {
    /// Create a visible, enabled, zero-sized element.
    pub fn new() -> Self {
        Self {
            tags: Vec::new(),
            ui: UiElement::new(),
            visible: true,
            bounds: Rect::EMPTY,
            angle: 0.0,
        }
    }

    /// Add a lookup tag (builder).
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: &str) -> Self {
        self.ui.add_class(class);
        self
    }

    /// Add multiple classes in order (builder).
    pub fn with_classes<'a>(mut self, classes: impl IntoIterator<Item = &'a str>) -> Self {
        for class in classes {
            self.ui.add_class(class);
        }
        self
    }

    /// Set the inline style from style text (builder).
    pub fn with_style(mut self, text: &str) -> Self {
        self.ui.set_style_text(text);
        self
    }

    /// Set one inline style property (builder).
    pub fn with_style_property(mut self, property: &str, value: impl Into<StyleValue>) -> Self {
        self.ui.set_style_property(property, value, false);
        self
    }

    /// Set position and size (builder).
    pub fn with_bounds(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.bounds = Rect::new(x, y, width, height);
        self
    }

    /// Set size, keeping position (builder).
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.bounds.width = width;
        self.bounds.height = height;
        self
    }

    /// Set rotation in radians (builder).
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Mark invisible (builder).
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Opt out of layout (builder).
    pub fn layout_disabled(mut self) -> Self {
        self.ui.set_enabled(false);
        self
    }

    /// Check whether this element carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
