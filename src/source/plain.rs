// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Plain HTTP source

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use super::{PageSnapshot, SnapshotSource};
use crate::config::FetchConfig;
use crate::error::Result;
use crate::http::HttpClient;

/// Fetches profile pages with a single GET, without rendering
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: HttpClient,
}

impl HttpSource {
    /// Create a source from fetch settings
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = HttpClient::with_config(config.http_client_config()?)?;
        Ok(Self { client })
    }

    /// Underlying client, shared with the image probe and downloader
    pub fn client(&self) -> &HttpClient {
        &self.client
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    fn name(&self) -> &'static str {
        "plain"
    }

    async fn fetch(&self, url: &Url) -> Result<PageSnapshot> {
        let response = self.client.get_page(url).await?;
        debug!(
            url = %url,
            final_url = %response.url,
            status = response.status_code(),
            bytes = response.body.len(),
            "profile page fetched"
        );

        if response.is_success() && response.content_type.is_some() && !response.is_html() {
            warn!(
                url = %url,
                content_type = response.content_type.as_deref().unwrap_or_default(),
                "profile page is not declared as HTML"
            );
        }

        Ok(PageSnapshot::from_markup(url.clone(), response.text_lossy())
            .with_status(response.status_code()))
    }
}
