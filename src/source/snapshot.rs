// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fetched page state handed to the resolution pipeline

use tracing::warn;
use url::Url;

use crate::dom::{parse_html_with_url, Document};

/// Whether a rendering source waited for the profile image element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementWait {
    /// The source does not render (plain HTTP) or skipped the wait
    #[default]
    NotAttempted,
    /// The element appeared before the deadline
    Appeared,
    /// The deadline passed without the element appearing
    TimedOut,
}

/// A fetched profile page
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// URL that was requested
    pub url: Url,
    /// HTTP status, when the source can observe it
    pub status: Option<u16>,
    /// Raw (or rendered) markup
    pub markup: String,
    /// Parsed markup
    pub document: Document,
    /// Outcome of the bounded element wait
    pub element_wait: ElementWait,
}

impl PageSnapshot {
    /// Build a snapshot by parsing `markup`
    ///
    /// Unparseable markup yields an empty document; the raw markup is
    /// still available to the text-based strategies.
    pub fn from_markup(url: Url, markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let document = match parse_html_with_url(&markup, Some(url.clone())) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(url = %url, error = %e, "could not parse page markup");
                Document::new()
            }
        };

        Self {
            url,
            status: None,
            markup,
            document,
            element_wait: ElementWait::NotAttempted,
        }
    }

    /// Record the HTTP status
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Record the element wait outcome
    pub fn with_element_wait(mut self, wait: ElementWait) -> Self {
        self.element_wait = wait;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_markup() {
        let url = Url::parse("https://www.example.com/someone/").unwrap();
        let snapshot = PageSnapshot::from_markup(url.clone(), "<html><head><title>someone</title></head></html>")
            .with_status(200)
            .with_element_wait(ElementWait::Appeared);

        assert_eq!(snapshot.url, url);
        assert_eq!(snapshot.status, Some(200));
        assert_eq!(snapshot.document.title(), "someone");
        assert_eq!(snapshot.document.url.as_ref(), Some(&url));
        assert_eq!(snapshot.element_wait, ElementWait::Appeared);
    }

    #[test]
    fn test_defaults() {
        let snapshot = PageSnapshot::from_markup(Url::parse("https://x.test/").unwrap(), "");
        assert_eq!(snapshot.status, None);
        assert_eq!(snapshot.element_wait, ElementWait::NotAttempted);
        assert!(snapshot.markup.is_empty());
    }
}
