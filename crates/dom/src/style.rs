//! Inline style overrides.
//!
//! Only the properties a script writes for positioning are modelled:
//! `width`, `height`, `min-width` and a `translate3d` transform.

use indexmap::IndexMap;
use std::fmt;

/// An inline style property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Width,
    Height,
    MinWidth,
    Transform,
}

impl StyleProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::MinWidth => "min-width",
            StyleProperty::Transform => "transform",
        }
    }
}

/// Value of an inline style property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleValue {
    /// A length in pixels.
    Px(f32),
    /// `translate3d(x, y, 0)`.
    Translate(f32, f32),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Px(value) => write!(f, "{value}px"),
            StyleValue::Translate(x, y) => write!(f, "translate3d({x}px, {y}px, 0)"),
        }
    }
}

/// Ordered inline style declarations of one element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineStyle {
    declarations: IndexMap<StyleProperty, StyleValue>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: StyleProperty, value: StyleValue) {
        self.declarations.insert(property, value);
    }

    pub fn remove(&mut self, property: StyleProperty) -> Option<StyleValue> {
        self.declarations.shift_remove(&property)
    }

    pub fn get(&self, property: StyleProperty) -> Option<StyleValue> {
        self.declarations.get(&property).copied()
    }

    /// Pixel value of a length property.
    pub fn px(&self, property: StyleProperty) -> Option<f32> {
        match self.get(property) {
            Some(StyleValue::Px(value)) => Some(value),
            _ => None,
        }
    }

    /// Offsets of the transform, if set.
    pub fn translation(&self) -> Option<(f32, f32)> {
        match self.get(StyleProperty::Transform) {
            Some(StyleValue::Translate(x, y)) => Some((x, y)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize as a `style` attribute value.
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(property, value)| format!("{}: {};", property.as_str(), value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
