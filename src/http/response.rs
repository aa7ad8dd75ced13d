// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Buffered responses for profile pages and images

use bytes::Bytes;
use reqwest::StatusCode;
use url::Url;

/// Buffered HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Declared `Content-Type`, if any
    pub content_type: Option<String>,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
}

impl Response {
    /// Create a new response
    pub fn new(status: StatusCode, content_type: Option<String>, body: Bytes, url: Url) -> Self {
        Self {
            status,
            content_type,
            body,
            url,
        }
    }

    /// Status as a plain code
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Media type without parameters, lowercased
    fn media_type(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|mt| mt.trim().to_ascii_lowercase())
            .filter(|mt| !mt.is_empty())
    }

    /// Whether the body is declared as an HTML page
    pub fn is_html(&self) -> bool {
        matches!(
            self.media_type().as_deref(),
            Some("text/html") | Some("application/xhtml+xml")
        )
    }

    /// Whether the body may hold an encoded image
    ///
    /// CDNs often omit the type or send a generic binary one, so only a
    /// declared non-image type rules the body out.
    pub fn is_image(&self) -> bool {
        match self.media_type() {
            None => true,
            Some(mt) => mt.starts_with("image/") || mt == "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, content_type: Option<&str>) -> Response {
        Response::new(
            status,
            content_type.map(str::to_string),
            Bytes::from_static(b"<html></html>"),
            Url::parse("https://www.example.com/someone/").unwrap(),
        )
    }

    #[test]
    fn test_profile_page_types() {
        let page = response(StatusCode::OK, Some("text/html; charset=utf-8"));
        assert!(page.is_success());
        assert!(page.is_html());
        assert!(!page.is_image());
        assert_eq!(page.text_lossy(), "<html></html>");

        let json = response(StatusCode::OK, Some("application/json"));
        assert!(!json.is_html());
        assert!(!response(StatusCode::NOT_FOUND, Some("TEXT/HTML")).is_success());
    }

    #[test]
    fn test_image_types() {
        assert!(response(StatusCode::OK, Some("image/jpeg")).is_image());
        assert!(response(StatusCode::OK, Some("Image/WebP")).is_image());
        assert!(response(StatusCode::OK, Some("application/octet-stream")).is_image());
        assert!(response(StatusCode::OK, None).is_image());
        assert!(!response(StatusCode::OK, Some("text/plain")).is_image());
        assert!(!response(StatusCode::OK, None).is_html());
    }
}
