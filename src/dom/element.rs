// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Element-specific DOM operations

use super::node::{Node, NodeType};

/// Element node with image and meta accessors
#[derive(Debug, Clone)]
pub struct Element {
    /// Inner node reference
    pub node: Node,
}

impl Element {
    /// Create a new element from a node
    pub fn new(node: Node) -> Option<Self> {
        if node.node_type() == NodeType::Element {
            Some(Self { node })
        } else {
            None
        }
    }

    /// Get src for images
    pub fn src(&self) -> Option<&str> {
        self.node.get_attribute("src")
    }

    /// Get responsive image candidates
    pub fn srcset(&self) -> Option<&str> {
        self.node.get_attribute("srcset")
    }
}

impl std::ops::Deref for Element {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}
