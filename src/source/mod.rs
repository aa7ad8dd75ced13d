// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page snapshot sources
//!
//! A source turns a profile URL into a [`PageSnapshot`], or an error that
//! [`FetchStatus::from_error`](crate::resolve::FetchStatus::from_error)
//! can classify. Non-success HTTP statuses are not errors: they come back
//! on the snapshot so the caller classifies them the same way.

mod device;
mod plain;
mod snapshot;

#[cfg(feature = "chrome")]
mod chrome;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use url::Url;

use crate::error::{Error, Result};

pub use device::{DeviceProfile, DEVICES};
pub use plain::HttpSource;
pub use snapshot::{ElementWait, PageSnapshot};

#[cfg(feature = "chrome")]
pub use chrome::ChromeSource;

/// Something that can fetch a profile page
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Fetch `url` and return what was loaded
    async fn fetch(&self, url: &Url) -> Result<PageSnapshot>;
}

/// Available source backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Plain HTTP request, no rendering
    #[default]
    Plain,
    /// Headless Chrome (requires the `chrome` feature)
    Chrome,
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "http" => Ok(Backend::Plain),
            "chrome" | "browser" => Ok(Backend::Chrome),
            other => Err(Error::config(format!(
                "Unknown backend '{}'; expected 'plain' or 'chrome'",
                other
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Plain => f.write_str("plain"),
            Backend::Chrome => f.write_str("chrome"),
        }
    }
}
