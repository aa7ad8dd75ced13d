// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer
//!
//! A thin, configured `reqwest` client shared by the plain page source,
//! the image dimension probe and the downloader.

mod client;
mod image;
mod response;

pub use self::image::{download_image, image_dimensions, image_extension, probe_dimensions};
pub use client::{HttpClient, HttpClientConfig};
pub use response::Response;

/// Default user agent string (desktop Chrome)
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
