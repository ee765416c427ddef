//! DOM Node implementation.

use crate::element::ElementData;
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Unique identifier for a DOM node.
    pub struct NodeId;
}

/// Type of DOM node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Document = 9,
}

/// Data specific to each node type.
#[derive(Clone, Debug)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text { content: String },
}

/// A DOM node.
#[derive(Clone, Debug)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Node type.
    pub node_type: NodeType,
    /// Node-specific data.
    pub data: NodeData,
    /// Parent node.
    pub parent: Option<NodeId>,
    /// Child nodes, in document order.
    pub children: SmallVec<[NodeId; 8]>,
}

impl Node {
    pub fn new(id: NodeId, node_type: NodeType, data: NodeData) -> Self {
        Self {
            id,
            node_type,
            data,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn new_document(id: NodeId) -> Self {
        Self::new(id, NodeType::Document, NodeData::Document)
    }

    pub fn new_element(id: NodeId, data: ElementData) -> Self {
        Self::new(id, NodeType::Element, NodeData::Element(data))
    }

    pub fn new_text(id: NodeId, content: String) -> Self {
        Self::new(id, NodeType::Text, NodeData::Text { content })
    }

    /// Node name as reported by the DOM.
    pub fn node_name(&self) -> &str {
        match &self.data {
            NodeData::Document => "#document",
            NodeData::Element(elem) => elem.tag_name.as_str(),
            NodeData::Text { .. } => "#text",
        }
    }

    /// Check if this is an element node.
    #[inline]
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node.
    #[inline]
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get element data if this is an element.
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Get mutable element data if this is an element.
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Get text content if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text { content } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TagName;
    use slotmap::SlotMap;

    #[test]
    fn test_node_kinds() {
        let mut nodes: SlotMap<NodeId, ()> = SlotMap::with_key();
        let id = nodes.insert(());

        let element = Node::new_element(id, ElementData::new(TagName::textarea()));
        assert!(element.is_element());
        assert_eq!(element.node_name(), "textarea");
        assert!(element.as_text().is_none());

        let text = Node::new_text(id, "caption".to_string());
        assert!(text.is_text());
        assert_eq!(text.as_text(), Some("caption"));
        assert_eq!(text.node_name(), "#text");

        assert_eq!(Node::new_document(id).node_name(), "#document");
    }
}
