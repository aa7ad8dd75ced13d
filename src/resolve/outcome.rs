// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Resolution outcomes and strategies

use std::fmt;

use serde::Serialize;

/// Why a fetch did not deliver usable markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchFailure {
    /// Non-success status other than 404
    HttpStatus(u16),
    /// Request or navigation timed out
    TimedOut,
    /// Connection-level failure
    Network(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::HttpStatus(code) => write!(f, "HTTP status {}", code),
            FetchFailure::TimedOut => write!(f, "timed out"),
            FetchFailure::Network(msg) => write!(f, "network error: {}", msg),
        }
    }
}

/// Terminal result of one resolution attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// Best profile picture URL
    Found { url: String },
    /// The account does not exist
    NotFound,
    /// The page loaded but no strategy produced a URL
    ExtractionFailed,
    /// The page could not be fetched
    FetchFailed { reason: FetchFailure },
}

impl ResolutionOutcome {
    pub fn found(url: impl Into<String>) -> Self {
        ResolutionOutcome::Found { url: url.into() }
    }

    pub fn fetch_failed(reason: FetchFailure) -> Self {
        ResolutionOutcome::FetchFailed { reason }
    }

    /// The resolved URL, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            ResolutionOutcome::Found { url } => Some(url),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionOutcome::Found { .. })
    }

    /// Short label used in logs and stats
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionOutcome::Found { .. } => "found",
            ResolutionOutcome::NotFound => "not_found",
            ResolutionOutcome::ExtractionFailed => "extraction_failed",
            ResolutionOutcome::FetchFailed { .. } => "fetch_failed",
        }
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            ResolutionOutcome::Found { .. } => 0,
            ResolutionOutcome::NotFound => 2,
            ResolutionOutcome::FetchFailed { .. } => 3,
            ResolutionOutcome::ExtractionFailed => 4,
        }
    }
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionOutcome::Found { url } => write!(f, "{}", url),
            ResolutionOutcome::NotFound => write!(f, "not found"),
            ResolutionOutcome::ExtractionFailed => write!(f, "no profile picture could be extracted"),
            ResolutionOutcome::FetchFailed { reason } => write!(f, "fetch failed: {}", reason),
        }
    }
}

/// Extraction strategies, in the order the pipeline tries them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The profile `<img>` (srcset, then src)
    ImageElement,
    /// JSON fragments embedded in the markup
    EmbeddedData,
    /// The `og:image` preview tag
    PreviewMeta,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::ImageElement,
        Strategy::EmbeddedData,
        Strategy::PreviewMeta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::ImageElement => "image_element",
            Strategy::EmbeddedData => "embedded_data",
            Strategy::PreviewMeta => "preview_meta",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let outcomes = [
            ResolutionOutcome::found("https://cdn/x.jpg"),
            ResolutionOutcome::NotFound,
            ResolutionOutcome::fetch_failed(FetchFailure::TimedOut),
            ResolutionOutcome::ExtractionFailed,
        ];
        let codes: Vec<u8> = outcomes.iter().map(|o| o.exit_code()).collect();
        assert_eq!(codes, vec![0, 2, 3, 4]);
    }

    #[test]
    fn test_url_accessor() {
        assert_eq!(ResolutionOutcome::found("https://cdn/x.jpg").url(), Some("https://cdn/x.jpg"));
        assert_eq!(ResolutionOutcome::NotFound.url(), None);
    }

    #[test]
    fn test_serialization() {
        let found = serde_json::to_value(ResolutionOutcome::found("https://cdn/x.jpg")).unwrap();
        assert_eq!(found, serde_json::json!({"outcome": "found", "url": "https://cdn/x.jpg"}));

        let failed = serde_json::to_value(ResolutionOutcome::fetch_failed(FetchFailure::HttpStatus(503))).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({"outcome": "fetch_failed", "reason": {"kind": "http_status", "detail": 503}})
        );

        let not_found = serde_json::to_value(ResolutionOutcome::NotFound).unwrap();
        assert_eq!(not_found, serde_json::json!({"outcome": "not_found"}));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ResolutionOutcome::fetch_failed(FetchFailure::Network("refused".into())).to_string(),
            "fetch failed: network error: refused"
        );
        assert_eq!(Strategy::PreviewMeta.to_string(), "preview_meta");
    }
}
