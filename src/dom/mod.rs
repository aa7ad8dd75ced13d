// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Read-only DOM for page snapshots
//!
//! Provides a DOM-like query interface built on top of html5ever.

mod document;
mod element;
mod node;
mod parser;
mod selector;

pub use document::Document;
pub use element::Element;
pub use node::{Node, NodeId, NodeType};
pub use parser::{parse_html, parse_html_with_url};
pub use selector::{Selector, SelectorList};
