//! Card construction.

use dom::{Document, NodeId};

/// Placeholder of an empty caption.
pub const CAPTION_PLACEHOLDER: &str = "Tap here to edit";

/// Nodes of one image card:
/// `div.card > div.preview > img` and `div.caption > textarea`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    pub root: NodeId,
    pub image: NodeId,
    pub caption: NodeId,
}

impl Card {
    /// Build a detached card whose image carries `alt`.
    pub fn build(document: &mut Document, alt: &str) -> Self {
        let root = document.create_element_with_class("div", "card");

        let preview = document.create_element_with_class("div", "preview");
        let image = document.create_element("img");
        if let Some(img) = document.tree.get_element_mut(image) {
            img.set_attribute("alt", alt);
        }
        document.tree.append_child(preview, image);

        let caption_box = document.create_element_with_class("div", "caption");
        let caption = document.create_element("textarea");
        if let Some(textarea) = document.tree.get_element_mut(caption) {
            textarea.set_attribute("placeholder", CAPTION_PLACEHOLDER);
        }
        document.tree.append_child(caption_box, caption);

        document.tree.append_child(root, preview);
        document.tree.append_child(root, caption_box);

        Self {
            root,
            image,
            caption,
        }
    }
}

/// The leading card holding the file input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddCard {
    pub root: NodeId,
    pub input: NodeId,
}

impl AddCard {
    pub fn build(document: &mut Document) -> Self {
        let root = document.create_element_with_class("div", "card add");
        let label = document.create_element_with_class("p", "label");
        let text = document.create_text_node("Drop images or tap to add");
        document.tree.append_child(label, text);

        let input = document.create_element("input");
        if let Some(element) = document.tree.get_element_mut(input) {
            element.set_attribute("type", "file");
            element.set_attribute("accept", "image/*");
            element.set_attribute("multiple", "");
        }

        document.tree.append_child(root, label);
        document.tree.append_child(root, input);
        Self { root, input }
    }
}
