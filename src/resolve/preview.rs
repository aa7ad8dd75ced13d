// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Open Graph preview image fallback

use crate::dom::Document;

/// `content` of the first non-empty `og:image` meta tag
///
/// `property="og:image"` is checked before `name="og:image"`.
pub fn extract_preview_image(document: &Document) -> Option<String> {
    ["meta[property='og:image']", "meta[name='og:image']"]
        .iter()
        .flat_map(|sel| document.query_selector_all(sel))
        .filter_map(|meta| meta.get_attribute("content").map(str::trim).map(str::to_string))
        .find(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_property_tag() {
        let doc = parse_html(
            r#"<head><meta property="og:title" content="x"><meta property="og:image" content=" https://cdn/og.jpg "></head>"#,
        )
        .unwrap();
        assert_eq!(extract_preview_image(&doc).as_deref(), Some("https://cdn/og.jpg"));
    }

    #[test]
    fn test_property_beats_name() {
        let doc = parse_html(
            r#"<meta name="og:image" content="https://cdn/name.jpg"><meta property="og:image" content="https://cdn/prop.jpg">"#,
        )
        .unwrap();
        assert_eq!(extract_preview_image(&doc).as_deref(), Some("https://cdn/prop.jpg"));
    }

    #[test]
    fn test_name_tag_and_empty_content() {
        let doc = parse_html(
            r#"<meta property="og:image" content=""><meta name="og:image" content="https://cdn/name.jpg">"#,
        )
        .unwrap();
        assert_eq!(extract_preview_image(&doc).as_deref(), Some("https://cdn/name.jpg"));
    }

    #[test]
    fn test_absent() {
        let doc = parse_html("<meta property='og:image'><p>nothing</p>").unwrap();
        assert_eq!(extract_preview_image(&doc), None);
    }
}
