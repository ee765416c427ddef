//! DOM Element implementation.

use crate::style::InlineStyle;
use common::geometry::Size;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Interned, lowercase tag name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagName(Arc<str>);

impl TagName {
    pub fn new(name: &str) -> Self {
        static INTERNED: Lazy<RwLock<HashMap<String, Arc<str>>>> =
            Lazy::new(|| RwLock::new(HashMap::new()));

        let lower = name.to_ascii_lowercase();

        {
            let cache = INTERNED.read();
            if let Some(s) = cache.get(&lower) {
                return TagName(s.clone());
            }
        }

        let mut cache = INTERNED.write();
        let s = cache
            .entry(lower.clone())
            .or_insert_with(|| Arc::from(lower.as_str()))
            .clone();
        TagName(s)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn html() -> Self {
        Self::new("html")
    }
    pub fn body() -> Self {
        Self::new("body")
    }
    pub fn main() -> Self {
        Self::new("main")
    }
    pub fn div() -> Self {
        Self::new("div")
    }
    pub fn p() -> Self {
        Self::new("p")
    }
    pub fn img() -> Self {
        Self::new("img")
    }
    pub fn input() -> Self {
        Self::new("input")
    }
    pub fn textarea() -> Self {
        Self::new("textarea")
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for TagName {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other.to_ascii_lowercase()
    }
}

impl PartialEq<&str> for TagName {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == other.to_ascii_lowercase()
    }
}

/// Load state of an `<img>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageState {
    /// Natural size once decoded.
    pub natural_size: Option<Size>,
}

impl ImageState {
    pub fn complete(&self) -> bool {
        self.natural_size.is_some()
    }
}

/// Element-specific data.
#[derive(Clone, Debug)]
pub struct ElementData {
    /// Tag name (lowercase).
    pub tag_name: TagName,
    /// Attributes other than `id`, `class` and `style`.
    pub attributes: IndexMap<String, String>,
    /// ID attribute.
    pub id: Option<Arc<str>>,
    /// Class list.
    pub class_list: SmallVec<[Arc<str>; 4]>,
    /// Inline style overrides.
    pub style: InlineStyle,
    /// Image load state, for `<img>`.
    pub image: Option<ImageState>,
    /// Current value, for form controls.
    pub value: Option<String>,
}

impl ElementData {
    pub fn new(tag_name: TagName) -> Self {
        let image = (tag_name == "img").then(ImageState::default);
        let value = (tag_name == "textarea").then(String::new);
        Self {
            tag_name,
            attributes: IndexMap::new(),
            id: None,
            class_list: SmallVec::new(),
            style: InlineStyle::new(),
            image,
            value,
        }
    }

    /// Create an element with the given space-separated classes.
    pub fn with_class(tag_name: TagName, classes: &str) -> Self {
        let mut elem = Self::new(tag_name);
        elem.set_attribute("class", classes);
        elem
    }

    /// Set an attribute, updating cached values.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name_lower = name.to_ascii_lowercase();
        match name_lower.as_str() {
            "id" => self.id = Some(Arc::from(value)),
            "class" => {
                self.class_list = value.split_whitespace().map(Arc::from).collect();
            }
            _ => {
                self.attributes.insert(name_lower, value.to_string());
            }
        }
    }

    /// Get an attribute value.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        match name.to_ascii_lowercase().as_str() {
            "id" => self.id.as_deref(),
            other => self.attributes.get(other).map(String::as_str),
        }
    }

    /// Check if element has a class.
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list.iter().any(|c| c.as_ref() == class)
    }

    /// Add a class.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.class_list.push(Arc::from(class));
        }
    }

    /// Remove a class.
    pub fn remove_class(&mut self, class: &str) {
        self.class_list.retain(|c| c.as_ref() != class);
    }

    /// The `class` attribute value.
    pub fn class_name(&self) -> String {
        self.class_list
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_interning() {
        let a = TagName::new("DIV");
        let b = TagName::div();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "div");
        assert!(a == "Div");
    }

    #[test]
    fn test_class_list() {
        let mut elem = ElementData::with_class(TagName::div(), "card  preview");
        assert!(elem.has_class("card"));
        assert!(elem.has_class("preview"));

        elem.add_class("card");
        elem.add_class("dragging");
        assert_eq!(elem.class_name(), "card preview dragging");

        elem.remove_class("preview");
        assert_eq!(elem.class_name(), "card dragging");
    }

    #[test]
    fn test_attributes() {
        let mut elem = ElementData::new(TagName::img());
        elem.set_attribute("ALT", "Uploaded icon #1");
        elem.set_attribute("id", "hero");
        assert_eq!(elem.get_attribute("alt"), Some("Uploaded icon #1"));
        assert_eq!(elem.get_attribute("id"), Some("hero"));
        assert_eq!(elem.get_attribute("src"), None);
    }

    #[test]
    fn test_tag_specific_state() {
        let img = ElementData::new(TagName::img());
        assert_eq!(img.image, Some(ImageState::default()));
        assert!(!img.image.unwrap().complete());

        let textarea = ElementData::new(TagName::textarea());
        assert_eq!(textarea.value.as_deref(), Some(""));

        let div = ElementData::new(TagName::div());
        assert!(div.image.is_none());
        assert!(div.value.is_none());
    }
}
