// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM Node types
//!
//! Nodes live in a flat arena owned by the [`Document`](super::Document),
//! stored in document order. The arena is frozen once parsing completes;
//! a [`Node`] is a cheap, read-only handle (arena reference + index).
//!
//! Nothing here recurses per nesting level: pages can nest elements far
//! deeper than a worker thread's stack allows.

use std::collections::HashMap;
use std::sync::Arc;

/// Index of a node inside its document arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Document node
    Document,
    /// Element node (like <img>, <meta>, etc.)
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Document type node (<!DOCTYPE>)
    DocumentType,
}

/// Internal node data
#[derive(Debug)]
pub(crate) struct NodeData {
    pub node_type: NodeType,
    /// Lowercase tag name (elements only)
    pub tag_name: Option<String>,
    /// Text for text/comment nodes
    pub text: Option<String>,
    /// Attributes keyed by lowercase name
    pub attributes: HashMap<String, String>,
    pub children: Vec<NodeId>,
}

impl NodeData {
    fn with_type(node_type: NodeType) -> Self {
        Self {
            node_type,
            tag_name: None,
            text: None,
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn element(tag_name: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Element);
        data.tag_name = Some(tag_name.into().to_lowercase());
        data
    }

    pub fn text(content: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Text);
        data.text = Some(content.into());
        data
    }

    pub fn comment(content: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Comment);
        data.text = Some(content.into());
        data
    }

    pub fn doctype() -> Self {
        Self::with_type(NodeType::DocumentType)
    }

    pub fn document() -> Self {
        Self::with_type(NodeType::Document)
    }
}

/// Shared, frozen node storage
pub(crate) type NodeArena = Arc<Vec<NodeData>>;

/// Pre-order walk of the subtree rooted at `root`, `root` included
pub(crate) fn descendants(nodes: &[NodeData], root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    let mut stack = vec![root];
    std::iter::from_fn(move || {
        let id = stack.pop()?;
        stack.extend(nodes[id.0].children.iter().rev().copied());
        Some(id)
    })
}

/// A read-only reference to a node in the DOM tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Node ID
    pub id: NodeId,
    nodes: NodeArena,
}

impl Node {
    pub(crate) fn new(id: NodeId, nodes: NodeArena) -> Self {
        Self { id, nodes }
    }

    fn data(&self) -> &NodeData {
        &self.nodes[self.id.0]
    }

    /// Get the node type
    pub fn node_type(&self) -> NodeType {
        self.data().node_type
    }

    /// Get the tag name in lowercase
    pub fn local_name(&self) -> Option<&str> {
        self.data().tag_name.as_deref()
    }

    /// Get concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        descendants(&self.nodes, self.id)
            .filter_map(|id| {
                let node = &self.nodes[id.0];
                match node.node_type {
                    NodeType::Text => node.text.as_deref(),
                    _ => None,
                }
            })
            .collect()
    }

    /// Get an attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.data()
            .attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::parse_html;

    #[test]
    fn test_text_content_skips_comments() {
        let doc = parse_html("<p>Hello <!-- hidden --><b>there</b></p>").unwrap();
        let p = doc.query_selector("p").unwrap();
        assert_eq!(p.text_content(), "Hello there");
    }

    #[test]
    fn test_attribute_lookup_is_case_insensitive() {
        let doc = parse_html("<img SRC='a.jpg' Alt='x'>").unwrap();
        let img = doc.query_selector("img").unwrap();
        assert_eq!(img.get_attribute("src"), Some("a.jpg"));
        assert_eq!(img.get_attribute("ALT"), Some("x"));
    }
}
