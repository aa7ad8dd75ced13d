// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Resolver and fetch configuration
//!
//! Both structs deserialize with defaults for every missing field, so a
//! settings file only needs to name what it changes:
//!
//! ```json
//! { "fetch": { "device": "Pixel 5", "element_wait": 8000 },
//!   "resolver": { "preview_fallback": false } }
//! ```
//!
//! Durations are written in milliseconds.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_USER_AGENT};
use crate::source::DeviceProfile;

/// Default "account does not exist" template, matched case-insensitively
pub const DEFAULT_NOT_FOUND_PATTERN: &str = r"Sorry, this page isn(?:'|’)t available\.";

/// Default profile base URL
pub const DEFAULT_BASE_URL: &str = "https://www.instagram.com";

/// Default device to emulate
pub const DEFAULT_DEVICE: &str = "iPhone 12 Pro";

/// Resolution engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Regex identifying the site's "account does not exist" page
    pub not_found_pattern: String,
    /// Alt-text phrases that mark the profile image element
    pub alt_phrases: Vec<String>,
    /// Fall back to the `og:image` preview tag
    pub preview_fallback: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            not_found_pattern: DEFAULT_NOT_FOUND_PATTERN.to_string(),
            alt_phrases: vec!["profile picture".to_string(), "profile photo".to_string()],
            preview_fallback: true,
        }
    }
}

impl ResolverConfig {
    /// Create a new resolver config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the not-found template pattern
    pub fn not_found_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.not_found_pattern = pattern.into();
        self
    }

    /// Replace the alt-text phrases
    pub fn alt_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alt_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// Enable/disable the preview meta fallback
    pub fn preview_fallback(mut self, enabled: bool) -> Self {
        self.preview_fallback = enabled;
        self
    }
}

/// Page source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Profile base URL; profiles live at `<base_url>/<username>/`
    pub base_url: String,
    /// Whole-request timeout
    #[serde(with = "duration_ms")]
    pub timeout: Duration,
    /// Bounded wait for the profile image element (browser source)
    #[serde(with = "duration_ms")]
    pub element_wait: Duration,
    /// Pause after navigation before reading the page (browser source)
    #[serde(with = "duration_ms")]
    pub settle_delay: Duration,
    /// Device to emulate; `None` sends a desktop user agent
    pub device: Option<String>,
    /// Explicit user agent, overriding the device's
    pub user_agent: Option<String>,
    /// Accept-Language header value
    pub accept_language: String,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Run the browser without a window
    pub headless: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            element_wait: Duration::from_secs(5),
            settle_delay: Duration::from_secs(2),
            device: Some(DEFAULT_DEVICE.to_string()),
            user_agent: None,
            accept_language: "en-US,en;q=0.9".to_string(),
            proxy: None,
            headless: true,
        }
    }
}

impl FetchConfig {
    /// Create a new fetch config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the profile base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the bounded element wait
    pub fn element_wait(mut self, wait: Duration) -> Self {
        self.element_wait = wait;
        self
    }

    /// Set the device to emulate
    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Set an explicit user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Config for the rendering browser source
    pub fn for_rendering() -> Self {
        Self {
            element_wait: Duration::from_secs(12),
            ..Default::default()
        }
    }

    /// Config for the plain HTTP source
    pub fn for_plain_http() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            element_wait: Duration::ZERO,
            settle_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Parsed base URL
    pub fn base(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Base URL cannot hold a path: {}",
                self.base_url
            )));
        }
        Ok(url)
    }

    /// The device profile, if one is configured
    pub fn device_profile(&self) -> Result<Option<&'static DeviceProfile>> {
        match self.device.as_deref() {
            None => Ok(None),
            Some(name) => DeviceProfile::lookup(name).map(Some).ok_or_else(|| {
                Error::config(format!(
                    "Unknown device '{}'; known devices: {}",
                    name,
                    DeviceProfile::known_names()
                ))
            }),
        }
    }

    /// Effective user agent: explicit, else the device's, else desktop
    pub fn effective_user_agent(&self) -> Result<String> {
        if let Some(ref ua) = self.user_agent {
            return Ok(ua.clone());
        }
        Ok(self
            .device_profile()?
            .map(|d| d.user_agent)
            .unwrap_or(DEFAULT_USER_AGENT)
            .to_string())
    }

    /// HTTP client settings derived from this config
    pub fn http_client_config(&self) -> Result<HttpClientConfig> {
        Ok(HttpClientConfig {
            user_agent: self.effective_user_agent()?,
            timeout: self.timeout,
            accept_language: self.accept_language.clone(),
            proxy: self.proxy.clone(),
            ..Default::default()
        })
    }
}

/// Full settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub resolver: ResolverConfig,
    pub fetch: FetchConfig,
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }
}

/// Serialize a `Duration` as integer milliseconds
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolver_config_builder() {
        let config = ResolverConfig::new()
            .alt_phrases(["foto de perfil"])
            .preview_fallback(false);

        assert_eq!(config.alt_phrases, vec!["foto de perfil".to_string()]);
        assert!(!config.preview_fallback);
        assert_eq!(config.not_found_pattern, DEFAULT_NOT_FOUND_PATTERN);
    }

    #[test]
    fn test_fetch_presets() {
        assert_eq!(FetchConfig::for_rendering().element_wait, Duration::from_secs(12));
        assert_eq!(FetchConfig::for_plain_http().element_wait, Duration::ZERO);
        assert_eq!(FetchConfig::default().device.as_deref(), Some(DEFAULT_DEVICE));
    }

    #[test]
    fn test_effective_user_agent() {
        let mobile = FetchConfig::default();
        assert!(mobile.effective_user_agent().unwrap().contains("iPhone"));

        let desktop = FetchConfig {
            device: None,
            ..Default::default()
        };
        assert_eq!(desktop.effective_user_agent().unwrap(), DEFAULT_USER_AGENT);

        let explicit = FetchConfig::default().user_agent("curl/8.0");
        assert_eq!(explicit.effective_user_agent().unwrap(), "curl/8.0");

        let unknown = FetchConfig::default().device("Nokia 3310");
        assert!(matches!(unknown.effective_user_agent(), Err(Error::Config(_))));
    }

    #[test]
    fn test_base_url_validation() {
        assert!(FetchConfig::default().base().is_ok());
        assert!(FetchConfig::default().base_url("mailto:x@y.z").base().is_err());
        assert!(FetchConfig::default().base_url("not a url").base().is_err());
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings = Settings::from_json_str(
            r#"{ "fetch": { "device": "Pixel 5", "element_wait": 8000 },
                 "resolver": { "preview_fallback": false } }"#,
        )
        .unwrap();

        assert_eq!(settings.fetch.device.as_deref(), Some("Pixel 5"));
        assert_eq!(settings.fetch.element_wait, Duration::from_millis(8000));
        assert_eq!(settings.fetch.timeout, Duration::from_secs(30));
        assert!(!settings.resolver.preview_fallback);
        assert_eq!(settings.resolver.alt_phrases.len(), 2);
    }

    #[test]
    fn test_settings_file_roundtrip() {
        let settings = Settings {
            fetch: FetchConfig::for_rendering().proxy("http://127.0.0.1:8080"),
            ..Default::default()
        };

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&settings).unwrap()).unwrap();

        let loaded = Settings::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_malformed_settings_file() {
        assert!(matches!(
            Settings::from_json_str("{ \"fetch\": 3 }"),
            Err(Error::Serialization(_))
        ));
        assert!(matches!(
            Settings::from_json_file("/nonexistent/pfp.json"),
            Err(Error::Io(_))
        ));
    }
}
