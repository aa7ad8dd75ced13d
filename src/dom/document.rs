// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation

use std::sync::Arc;

use url::Url;

use super::element::Element;
use super::node::{descendants, Node, NodeArena, NodeData, NodeId, NodeType};
use super::selector::SelectorList;

/// Read-only HTML document
#[derive(Debug, Clone)]
pub struct Document {
    /// Document URL
    pub url: Option<Url>,
    title: String,
    nodes: NodeArena,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::from_parts(None, vec![NodeData::document()])
    }

    /// Assemble a document from a finished arena; index 0 is the root
    pub(crate) fn from_parts(url: Option<Url>, nodes: Vec<NodeData>) -> Self {
        let mut doc = Self {
            url,
            title: String::new(),
            nodes: Arc::new(nodes),
        };

        if let Some(title) = doc.query_selector("title") {
            doc.title = title.text_content().trim().to_string();
        }
        doc
    }

    /// Get document title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Query selector - find first matching element
    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        let list = SelectorList::parse(selector).ok()?;
        self.select_first(&list)
    }

    /// Query selector all - find all matching elements
    pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        SelectorList::parse(selector)
            .map(|list| self.matching(&list).collect())
            .unwrap_or_default()
    }

    /// First element, in document order, matching a pre-parsed selector list
    pub fn select_first(&self, list: &SelectorList) -> Option<Element> {
        self.matching(list).next()
    }

    fn matching<'a>(&'a self, list: &'a SelectorList) -> impl Iterator<Item = Element> + 'a {
        descendants(&self.nodes, NodeId(0))
            .filter(move |id| self.nodes[id.0].node_type == NodeType::Element)
            .map(move |id| Node::new(id, self.nodes.clone()))
            .filter(move |node| list.matches(node))
            .filter_map(Element::new)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(doc.url.is_none());
        assert!(doc.title().is_empty());
        assert!(doc.query_selector("img").is_none());
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let doc = parse_html("<img src='a.jpg'>").unwrap();
        assert!(doc.query_selector("img[").is_none());
        assert!(doc.query_selector_all("img > a").is_empty());
    }

    #[test]
    fn test_document_order() {
        let doc = parse_html(
            "<div><img src='1.jpg'><span><img src='2.jpg'></span></div><img src='3.jpg'>",
        )
        .unwrap();
        let srcs: Vec<_> = doc
            .query_selector_all("img")
            .iter()
            .map(|i| i.src().unwrap_or_default().to_string())
            .collect();
        assert_eq!(srcs, vec!["1.jpg", "2.jpg", "3.jpg"]);
    }
}
