// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Username resolution service
//!
//! Normalizes the username, builds the profile URL, fetches the page
//! through a [`SnapshotSource`], classifies the fetch and runs the
//! [`Pipeline`]. Every call produces exactly one [`Resolution`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::http::{download_image, probe_dimensions, HttpClient};
use crate::resolve::{
    classify_fetch, FetchFailure, FetchStatus, FetchVerdict, Pipeline, PipelineRun,
    ResolutionObserver, ResolutionOutcome, Strategy,
};
use crate::source::{Backend, HttpSource, SnapshotSource};

/// Characters that cannot appear in a profile path segment
const FORBIDDEN: &[char] = &['/', '?', '#', '%'];

/// Default number of usernames resolved at once
pub const DEFAULT_CONCURRENCY: usize = 4;

/// A normalized username
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Normalize user input: trim, then drop one leading `@`
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let name = trimmed.strip_prefix('@').unwrap_or(trimmed);

        if name.is_empty()
            || name.contains(FORBIDDEN)
            || name.chars().any(char::is_whitespace)
        {
            return Err(Error::InvalidUsername(input.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `<base>/<username>/`
pub fn profile_url(base: &Url, username: &Username) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| Error::config(format!("Base URL cannot hold a path: {}", base)))?
        .pop_if_empty()
        .push(username.as_str())
        .push("");
    Ok(url)
}

/// Report for one username
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Normalized username, or the raw input when it was invalid
    pub username: String,
    pub profile_url: Option<String>,
    #[serde(flatten)]
    pub outcome: ResolutionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub resolved_at: DateTime<Utc>,
}

impl Resolution {
    fn new(username: impl Into<String>, profile_url: Option<&Url>, run: PipelineRun) -> Self {
        Self {
            username: username.into(),
            profile_url: profile_url.map(|u| u.to_string()),
            outcome: run.outcome,
            strategy: run.strategy,
            width: None,
            height: None,
            resolved_at: Utc::now(),
        }
    }

    /// The resolved URL, if any
    pub fn url(&self) -> Option<&str> {
        self.outcome.url()
    }
}

/// Resolves usernames to profile picture URLs
pub struct ProfileResolver {
    source: Arc<dyn SnapshotSource>,
    pipeline: Pipeline,
    base: Url,
    http: Option<HttpClient>,
    probe_dimensions: bool,
    concurrency: usize,
    observers: Vec<Arc<dyn ResolutionObserver>>,
}

impl fmt::Debug for ProfileResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileResolver")
            .field("source", &self.source.name())
            .field("pipeline", &self.pipeline)
            .field("base", &self.base.as_str())
            .field("probe_dimensions", &self.probe_dimensions)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl ProfileResolver {
    /// Create a resolver
    pub fn new(source: Arc<dyn SnapshotSource>, pipeline: Pipeline, base: Url) -> Self {
        Self {
            source,
            pipeline,
            base,
            http: None,
            probe_dimensions: false,
            concurrency: DEFAULT_CONCURRENCY,
            observers: Vec::new(),
        }
    }

    /// Build a resolver, its source and its HTTP client from settings
    pub fn from_settings(settings: &Settings, backend: Backend) -> Result<Self> {
        let pipeline = Pipeline::new(&settings.resolver)?;
        let base = settings.fetch.base()?;
        let plain = HttpSource::new(&settings.fetch)?;
        let http = plain.client().clone();

        let source: Arc<dyn SnapshotSource> = match backend {
            Backend::Plain => Arc::new(plain),
            #[cfg(feature = "chrome")]
            Backend::Chrome => Arc::new(crate::source::ChromeSource::new(
                &settings.fetch,
                pipeline.image_selector(),
            )?),
            #[cfg(not(feature = "chrome"))]
            Backend::Chrome => {
                return Err(Error::config(
                    "The chrome backend is not available; rebuild with --features chrome",
                ))
            }
        };

        Ok(Self::new(source, pipeline, base).with_http(http))
    }

    /// HTTP client for the dimension probe and downloads
    pub fn with_http(mut self, client: HttpClient) -> Self {
        self.http = Some(client);
        self
    }

    /// Probe the image dimensions of found URLs
    pub fn probe_dimensions(mut self, enabled: bool) -> Self {
        self.probe_dimensions = enabled;
        self
    }

    /// Number of usernames `resolve_all` works on at once
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Attach an observer to this resolver and its pipeline
    pub fn with_observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.pipeline = self.pipeline.with_observer(observer.clone());
        self.observers.push(observer);
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Resolve one username
    pub async fn resolve(&self, input: &str) -> Resolution {
        let username = match Username::parse(input) {
            Ok(u) => u,
            Err(e) => {
                debug!(error = %e, "username rejected");
                return self.settle(Resolution::new(input.trim(), None, not_found()));
            }
        };

        let url = match profile_url(&self.base, &username) {
            Ok(u) => u,
            Err(e) => {
                debug!(%username, error = %e, "no profile URL");
                return self.settle(Resolution::new(username.as_str(), None, not_found()));
            }
        };

        let snapshot = match self.source.fetch(&url).await {
            Ok(s) => s,
            Err(e) => {
                let outcome = match classify_fetch(&FetchStatus::from_error(&e)) {
                    FetchVerdict::Terminal(outcome) => outcome,
                    FetchVerdict::Proceed => {
                        ResolutionOutcome::fetch_failed(FetchFailure::Network(e.to_string()))
                    }
                };
                info!(%username, source = self.source.name(), error = %e, "fetch failed");
                let run = PipelineRun {
                    outcome,
                    strategy: None,
                };
                return self.settle(Resolution::new(username.as_str(), Some(&url), run));
            }
        };

        if let Some(status) = snapshot.status {
            if let FetchVerdict::Terminal(outcome) = classify_fetch(&FetchStatus::Completed(status)) {
                info!(%username, status, outcome = outcome.label(), "fetch settled the outcome");
                let run = PipelineRun {
                    outcome,
                    strategy: None,
                };
                return self.settle(Resolution::new(username.as_str(), Some(&url), run));
            }
        }

        // the pipeline reports its own outcome to observers
        let mut resolution = Resolution::new(username.as_str(), Some(&url), self.pipeline.run(&snapshot));

        if self.probe_dimensions {
            if let (Some(client), Some(image)) = (&self.http, resolution.url().map(str::to_string)) {
                if let Some((w, h)) = probe_dimensions(client, &image).await {
                    resolution.width = Some(w);
                    resolution.height = Some(h);
                }
            }
        }
        resolution
    }

    /// Resolve many usernames concurrently, keeping input order
    pub async fn resolve_all<I, S>(&self, inputs: I) -> Vec<Resolution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        use futures::stream::{self, StreamExt};

        stream::iter(inputs)
            .map(|input| async move { self.resolve(input.as_ref()).await })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Save a resolved image as `<dir>/<username>.<ext>`
    pub async fn download(&self, resolution: &Resolution, dir: &Path) -> Result<PathBuf> {
        let client = self
            .http
            .as_ref()
            .ok_or_else(|| Error::config("No HTTP client configured for downloads"))?;
        let url = resolution.url().ok_or_else(|| {
            Error::other(format!(
                "Nothing to download for '{}': {}",
                resolution.username, resolution.outcome
            ))
        })?;
        download_image(client, url, dir, &resolution.username).await
    }

    /// Report an outcome that never reached the pipeline
    fn settle(&self, resolution: Resolution) -> Resolution {
        for observer in &self.observers {
            observer.on_outcome(&resolution.outcome, None);
        }
        resolution
    }
}

fn not_found() -> PipelineRun {
    PipelineRun {
        outcome: ResolutionOutcome::NotFound,
        strategy: None,
    }
}
