//! DOM Document implementation.

use crate::element::{ElementData, TagName};
use crate::node::NodeId;
use crate::selector::SelectorList;
use crate::style::{StyleProperty, StyleValue};
use crate::tree::DomTree;
use common::geometry::Size;
use common::GalleryResult;
use parking_lot::RwLock;
use std::sync::Arc;

/// DOM Document.
pub struct Document {
    /// The DOM tree.
    pub tree: DomTree,
    /// Document element (<html>).
    pub document_element: NodeId,
    /// Body element.
    pub body: NodeId,
    /// Size of the viewport the document is laid out in.
    pub viewport: Size,
}

impl Document {
    /// Create a document with an empty `<html><body>` skeleton.
    pub fn new(viewport: Size) -> Self {
        let mut tree = DomTree::new();
        let root = tree.root();
        let html = tree.create_element(ElementData::new(TagName::html()));
        let body = tree.create_element(ElementData::new(TagName::body()));
        tree.append_child(root, html);
        tree.append_child(html, body);

        Self {
            tree,
            document_element: html,
            body,
            viewport,
        }
    }

    /// Get body element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create an element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.tree.create_element(ElementData::new(TagName::new(tag_name)))
    }

    /// Create an element with the given classes.
    pub fn create_element_with_class(&mut self, tag_name: &str, classes: &str) -> NodeId {
        self.tree
            .create_element(ElementData::with_class(TagName::new(tag_name), classes))
    }

    /// Create a text node.
    pub fn create_text_node(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    /// Get element by ID.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(id)
    }

    /// First element in document order matching `selector`.
    pub fn query_selector(&self, selector: &str) -> GalleryResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&node| list.matches(&self.tree, node)))
    }

    /// All elements matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> GalleryResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&node| list.matches(&self.tree, node))
            .collect())
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.tree.get_element_mut(node) {
            element.add_class(class);
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.tree.get_element_mut(node) {
            element.remove_class(class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree
            .get_element(node)
            .is_some_and(|element| element.has_class(class))
    }

    /// Write an inline style declaration.
    pub fn set_style(&mut self, node: NodeId, property: StyleProperty, value: StyleValue) {
        if let Some(element) = self.tree.get_element_mut(node) {
            element.style.set(property, value);
        }
    }

    /// Drop an inline style declaration.
    pub fn remove_style(&mut self, node: NodeId, property: StyleProperty) {
        if let Some(element) = self.tree.get_element_mut(node) {
            element.style.remove(property);
        }
    }

    /// Record the decoded size of an `<img>`, completing its load.
    pub fn set_natural_size(&mut self, node: NodeId, size: Size) {
        if let Some(image) = self
            .tree
            .get_element_mut(node)
            .and_then(|element| element.image.as_mut())
        {
            image.natural_size = Some(size);
        }
    }

    /// Current value of a form control.
    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.tree
            .get_element(node)
            .and_then(|element| element.value.as_deref())
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(slot) = self
            .tree
            .get_element_mut(node)
            .and_then(|element| element.value.as_mut())
        {
            *slot = value.to_string();
        }
    }
}

/// Shared document reference.
pub type DocumentRef = Arc<RwLock<Document>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let doc = Document::new(Size::new(1024.0, 768.0));
        assert_eq!(doc.tree.parent(doc.body()), Some(doc.document_element));
        assert_eq!(doc.query_selector("body").unwrap(), Some(doc.body()));
        assert_eq!(doc.query_selector("html > body").unwrap(), Some(doc.body()));
    }

    #[test]
    fn test_query_selector_document_order() {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let body = doc.body();
        let first = doc.create_element_with_class("div", "card");
        let second = doc.create_element_with_class("div", "card");
        doc.tree.append_child(body, first);
        doc.tree.append_child(body, second);

        assert_eq!(doc.query_selector(".card").unwrap(), Some(first));
        assert_eq!(doc.query_selector_all(".card").unwrap(), vec![first, second]);
        assert_eq!(doc.query_selector(".missing").unwrap(), None);
        assert!(doc.query_selector("..").is_err());
    }

    #[test]
    fn test_classes_and_styles() {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let body = doc.body();
        doc.add_class(body, "dragging");
        assert!(doc.has_class(body, "dragging"));
        doc.remove_class(body, "dragging");
        assert!(!doc.has_class(body, "dragging"));

        doc.set_style(body, StyleProperty::Height, StyleValue::Px(12.0));
        let style = &doc.tree.get_element(body).unwrap().style;
        assert_eq!(style.px(StyleProperty::Height), Some(12.0));
        doc.remove_style(body, StyleProperty::Height);
        assert!(doc.tree.get_element(body).unwrap().style.is_empty());
    }

    #[test]
    fn test_image_and_value() {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let img = doc.create_element("img");
        let textarea = doc.create_element("textarea");
        doc.set_natural_size(img, Size::new(64.0, 32.0));
        let image = doc.tree.get_element(img).unwrap().image.clone().unwrap();
        assert!(image.complete());

        doc.set_value(textarea, "hello");
        assert_eq!(doc.value(textarea), Some("hello"));
        assert_eq!(doc.value(img), None);
    }
}
