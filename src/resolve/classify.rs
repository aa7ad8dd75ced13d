// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fetch status classification
//!
//! Decides, before any extraction runs, whether what the source
//! reported already settles the outcome.

use super::outcome::{FetchFailure, ResolutionOutcome};
use crate::error::Error;

/// What a snapshot source reported about its fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// A response arrived with this status
    Completed(u16),
    /// The request or navigation timed out
    TimedOut,
    /// The connection failed
    NetworkError(String),
}

impl FetchStatus {
    /// Map a source error onto a fetch status
    pub fn from_error(error: &Error) -> Self {
        if error.is_timeout() {
            return FetchStatus::TimedOut;
        }
        match error {
            Error::NavigationFailed {
                status: Some(code), ..
            } => FetchStatus::Completed(*code),
            other => FetchStatus::NetworkError(other.to_string()),
        }
    }
}

/// Whether extraction should run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchVerdict {
    Proceed,
    Terminal(ResolutionOutcome),
}

/// Classify a fetch status
pub fn classify_fetch(status: &FetchStatus) -> FetchVerdict {
    match status {
        FetchStatus::Completed(code) if (200..300).contains(code) => FetchVerdict::Proceed,
        FetchStatus::Completed(404) => FetchVerdict::Terminal(ResolutionOutcome::NotFound),
        FetchStatus::Completed(code) => FetchVerdict::Terminal(ResolutionOutcome::fetch_failed(
            FetchFailure::HttpStatus(*code),
        )),
        FetchStatus::TimedOut => {
            FetchVerdict::Terminal(ResolutionOutcome::fetch_failed(FetchFailure::TimedOut))
        }
        FetchStatus::NetworkError(msg) => FetchVerdict::Terminal(ResolutionOutcome::fetch_failed(
            FetchFailure::Network(msg.clone()),
        )),
    }
}
