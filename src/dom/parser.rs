// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use url::Url;

use super::document::Document;
use super::node::{NodeData, NodeId};
use crate::error::{Error, Result};

/// Parse HTML string into a Document
pub fn parse_html(html: &str) -> Result<Document> {
    parse_html_with_url(html, None)
}

/// Parse HTML string with a base URL
pub fn parse_html_with_url(html: &str, url: Option<Url>) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::HtmlParse(e.to_string()))?;

    Ok(Document::from_parts(url, flatten(&dom.document)))
}

/// Flatten the html5ever tree into a document-order arena
///
/// Walks with an explicit stack, so nesting depth is bounded by memory
/// rather than by the calling thread's stack.
fn flatten(root: &Handle) -> Vec<NodeData> {
    let mut nodes = vec![NodeData::document()];
    let mut pending: Vec<(Handle, NodeId)> = root
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (child.clone(), NodeId(0)))
        .collect();

    while let Some((handle, parent_id)) = pending.pop() {
        let Some(data) = convert(&handle) else {
            continue;
        };

        let node_id = NodeId(nodes.len());
        nodes.push(data);
        nodes[parent_id.0].children.push(node_id);

        pending.extend(
            handle
                .children
                .borrow()
                .iter()
                .rev()
                .map(|child| (child.clone(), node_id)),
        );
    }

    nodes
}

fn convert(handle: &Handle) -> Option<NodeData> {
    let data = match handle.data {
        RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => return None,
        RcNodeData::Doctype { .. } => NodeData::doctype(),
        RcNodeData::Text { ref contents } => {
            let text = contents.borrow().to_string();
            if text.trim().is_empty() && text.len() > 1 {
                // Whitespace-only runs carry nothing; single spaces separate words
                return None;
            }
            NodeData::text(text)
        }
        RcNodeData::Comment { ref contents } => NodeData::comment(contents.to_string()),
        RcNodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let mut data = NodeData::element(name.local.to_string());
            for attr in attrs.borrow().iter() {
                data.attributes
                    .entry(attr.name.local.to_string().to_lowercase())
                    .or_insert_with(|| attr.value.to_string());
            }
            data
        }
    };
    Some(data)
}
