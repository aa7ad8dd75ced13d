// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # pfp-resolver - Profile Picture Resolver
//!
//! Resolves a social-media username to the highest-resolution profile
//! picture the profile page exposes.
//!
//! The page is fetched with a plain HTTP request or, with the `chrome`
//! feature, rendered in headless Chrome while emulating a mobile device.
//! A fixed chain of extraction strategies then picks one URL:
//!
//! - the profile `<img>` element (widest `srcset` candidate, then `src`)
//! - JSON fragments embedded in the page scripts
//! - the `og:image` preview tag
//!
//! Fetch failures, missing accounts and pages nothing could be extracted
//! from are reported as distinct [`ResolutionOutcome`]s.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pfp_resolver::{Backend, ProfileResolver, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = ProfileResolver::from_settings(&Settings::default(), Backend::Plain)?;
//!
//!     let resolution = resolver.resolve("@someone").await;
//!     match resolution.url() {
//!         Some(url) => println!("{}", url),
//!         None => eprintln!("{}: {}", resolution.username, resolution.outcome),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod http;
pub mod profile;
pub mod resolve;
pub mod source;

// Configuration
pub use config::{FetchConfig, ResolverConfig, Settings};

// DOM
pub use dom::{Document, Element, Node};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{download_image, image_dimensions, image_extension, HttpClient, Response};

// Profiles
pub use profile::{profile_url, ProfileResolver, Resolution, Username};

// Resolution engine
pub use resolve::{
    classify_fetch, extract_from_image_element, extract_from_markup, extract_preview_image,
    parse_srcset, select_largest, FetchFailure, FetchStatus, FetchVerdict, ImageTag, Pipeline,
    PipelineRun, ResolutionObserver, ResolutionOutcome, ResolutionStats, SrcsetCandidate,
    Strategy,
};

// Sources
pub use source::{Backend, DeviceProfile, ElementWait, HttpSource, PageSnapshot, SnapshotSource};

#[cfg(feature = "chrome")]
pub use source::ChromeSource;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
