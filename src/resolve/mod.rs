// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Resolution engine
//!
//! Turns a fetched profile page into a single best profile picture URL,
//! or a classified reason why there is none.

pub mod classify;
pub mod embedded;
pub mod image_tag;
pub mod observer;
pub mod outcome;
pub mod pipeline;
pub mod preview;
pub mod srcset;

pub use classify::{classify_fetch, FetchStatus, FetchVerdict};
pub use embedded::extract_from_markup;
pub use image_tag::{extract_from_image_element, ImageTag, ImageTagMatcher, DEFAULT_ALT_PHRASES};
pub use observer::{ResolutionObserver, ResolutionStats, StatsReport, StrategyReport};
pub use outcome::{FetchFailure, ResolutionOutcome, Strategy};
pub use pipeline::{Pipeline, PipelineRun};
pub use preview::extract_preview_image;
pub use srcset::{parse_srcset, select_largest, SrcsetCandidate};
