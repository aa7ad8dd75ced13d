// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Shared HTTP client for profile pages and image fetches

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// `Accept` sent for profile pages
const PAGE_ACCEPT: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";

/// `Accept` sent for profile pictures
const IMAGE_ACCEPT: &str = "image/avif,image/webp,image/jpeg,image/png,image/*;q=0.8";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept-Language header value
    pub accept_language: String,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_language: "en-US,en;q=0.9".to_string(),
            proxy: None,
        }
    }
}

/// Pooled HTTP client; cheap to clone
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|e| Error::config(format!("Invalid accept-language: {}", e)))?,
        );

        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .default_headers(headers);

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Fetch a profile page
    ///
    /// Non-2xx statuses are returned as responses, not errors; only transport
    /// failures (connect, TLS, timeout) produce `Err`.
    pub async fn get_page(&self, url: &Url) -> Result<Response> {
        self.get(url, PAGE_ACCEPT).await
    }

    /// Fetch an image, with the same status semantics as [`get_page`](Self::get_page)
    pub async fn get_image(&self, url: &Url) -> Result<Response> {
        self.get(url, IMAGE_ACCEPT).await
    }

    async fn get(&self, url: &Url, accept: &'static str) -> Result<Response> {
        let start = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, accept)
            .send()
            .await?;

        let status = response.status();
        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        debug!(
            url = %url,
            final_url = %final_url,
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or("-"),
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "GET complete"
        );

        Ok(Response::new(status, content_type, body, final_url))
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert_eq!(client.config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_proxy_is_config_error() {
        let config = HttpClientConfig {
            proxy: Some("http://exa mple.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            HttpClient::with_config(config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_accept_language_is_config_error() {
        let config = HttpClientConfig {
            accept_language: "en\nUS".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpClient::with_config(config),
            Err(Error::Config(_))
        ));
    }
}
