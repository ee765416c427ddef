//! Headless box metrics.
//!
//! A deliberately small flow model: blocks fill their parent's width and
//! stack their children vertically, images scale to their width, and text
//! wraps on a fixed character grid.

use crate::document::Document;
use crate::node::{NodeData, NodeId};
use crate::style::StyleProperty;

/// Advance of one character.
pub const CHAR_WIDTH: f32 = 8.0;
/// Height of one line of text.
pub const LINE_HEIGHT: f32 = 20.0;

/// Inner width of `node`.
///
/// An explicit `width` wins; otherwise the node fills its parent, and the
/// top of the tree fills the viewport. `min-width` raises the result.
pub fn client_width(doc: &Document, node: NodeId) -> f32 {
    let Some(element) = doc.tree.get_element(node) else {
        return match doc.tree.parent(node) {
            Some(parent) => client_width(doc, parent),
            None => doc.viewport.width,
        };
    };

    let width = match element.style.px(StyleProperty::Width) {
        Some(width) => width,
        None => match doc.tree.parent(node) {
            Some(parent) if doc.tree.get_element(parent).is_some() => client_width(doc, parent),
            _ => doc.viewport.width,
        },
    };

    match element.style.px(StyleProperty::MinWidth) {
        Some(min) => width.max(min),
        None => width,
    }
}

/// Rendered height of `node`, honouring an explicit `height`.
pub fn offset_height(doc: &Document, node: NodeId) -> f32 {
    match doc.tree.get_element(node) {
        Some(element) => element
            .style
            .px(StyleProperty::Height)
            .unwrap_or_else(|| scroll_height(doc, node)),
        None => scroll_height(doc, node),
    }
}

/// Height of the content of `node`, ignoring any explicit `height`.
pub fn scroll_height(doc: &Document, node: NodeId) -> f32 {
    let Some(n) = doc.tree.get(node) else {
        return 0.0;
    };

    match &n.data {
        NodeData::Text { content } => {
            let width = client_width(doc, node);
            text_lines(content, width) as f32 * LINE_HEIGHT
        }
        NodeData::Element(element) => {
            if let Some(image) = &element.image {
                return image
                    .natural_size
                    .map(|size| size.height_for_width(client_width(doc, node)))
                    .unwrap_or(0.0);
            }
            if let Some(value) = &element.value {
                let width = client_width(doc, node);
                return text_lines(value, width).max(1) as f32 * LINE_HEIGHT;
            }
            doc.tree
                .children(node)
                .map(|child| offset_height(doc, child))
                .sum()
        }
        NodeData::Document => doc
            .tree
            .children(node)
            .map(|child| offset_height(doc, child))
            .sum(),
    }
}

/// Number of lines `text` wraps to in `width`.
///
/// Empty text takes no line.
pub fn text_lines(text: &str, width: f32) -> usize {
    if text.is_empty() {
        return 0;
    }
    let per_line = ((width / CHAR_WIDTH).floor() as usize).max(1);
    text.split('\n')
        .map(|line| line.chars().count().div_ceil(per_line).max(1))
        .sum()
}
