//! DOM Tree implementation.

use crate::element::ElementData;
use crate::node::{Node, NodeId};
use slotmap::SlotMap;
use std::collections::HashMap;

/// The DOM tree structure.
pub struct DomTree {
    /// All nodes in the tree.
    nodes: SlotMap<NodeId, Node>,
    /// Root node (document).
    root: NodeId,
    /// ID to node mapping for fast lookups.
    id_map: HashMap<String, NodeId>,
}

impl DomTree {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert_with_key(Node::new_document);
        Self {
            nodes,
            root,
            id_map: HashMap::new(),
        }
    }

    /// Get the root document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Get element data for a node.
    pub fn get_element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id).and_then(|n| n.as_element())
    }

    /// Get mutable element data for a node.
    pub fn get_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id).and_then(|n| n.as_element_mut())
    }

    /// Look up an element by its `id` attribute.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_map.get(id).copied()
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        let id_value = data.id.clone();
        let id = self
            .nodes
            .insert_with_key(|id| Node::new_element(id, data));

        if let Some(elem_id) = id_value {
            self.id_map.insert(elem_id.to_string(), id);
        }

        id
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        let content = content.into();
        self.nodes
            .insert_with_key(|id| Node::new_text(id, content))
    }

    /// Append a child to a parent node.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(parent) {
            return;
        }
        self.remove_from_parent(child);

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(child);
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
        }
    }

    /// Insert `child` right after `reference` under the same parent.
    ///
    /// Does nothing when `reference` has no parent.
    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) {
        if reference == child {
            return;
        }
        let Some(parent) = self.parent(reference) else {
            return;
        };
        self.remove_from_parent(child);

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            let pos = parent_node
                .children
                .iter()
                .position(|&id| id == reference)
                .map(|p| p + 1)
                .unwrap_or(parent_node.children.len());
            parent_node.children.insert(pos, child);
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
        }
    }

    /// Remove a node from its parent, keeping the node alive.
    pub fn remove_from_parent(&mut self, node: NodeId) {
        let parent = match self.nodes.get(node) {
            Some(n) => n.parent,
            None => return,
        };

        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent_id) {
                parent_node.children.retain(|id| *id != node);
            }
        }

        if let Some(node_data) = self.nodes.get_mut(node) {
            node_data.parent = None;
        }
    }

    /// Remove a node and its subtree from the tree.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.root {
            return;
        }
        self.remove_from_parent(node);

        let mut to_remove = vec![node];
        let mut i = 0;
        while i < to_remove.len() {
            if let Some(n) = self.nodes.get(to_remove[i]) {
                to_remove.extend(n.children.iter().copied());
            }
            i += 1;
        }

        for id in to_remove {
            if let Some(removed) = self.nodes.remove(id) {
                if let Some(elem_id) = removed.as_element().and_then(|e| e.id.clone()) {
                    self.id_map.remove(elem_id.as_ref());
                }
            }
        }
    }

    /// Get parent node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// Get first child.
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.children.first().copied())
    }

    /// Get the child at `index`.
    pub fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.children.get(index).copied())
    }

    /// Get all children.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|n| n.children.iter().copied())
    }

    /// Element children only, in order.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .filter(|&id| self.get(id).is_some_and(Node::is_element))
            .collect()
    }

    /// Get ancestors, nearest first.
    pub fn ancestors(&self, node: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(node),
        }
    }

    /// Descendants of `node` in document order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            result.push(current);
            let mut children: Vec<NodeId> = self.children(current).collect();
            children.reverse();
            stack.extend(children);
        }
        result
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(text) = self.get(node).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|id| self.get(id).and_then(Node::as_text))
            .collect()
    }

    /// Number of live nodes, the document included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's ancestors.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for AncestorIterator<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.tree.parent(current);
        Some(current)
    }
}
