// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Headless Chrome source
//!
//! Renders the profile page in a real browser, emulating a device, and
//! waits a bounded time for the profile image element before reading
//! the DOM. Each fetch launches its own browser on a blocking thread;
//! the process is killed when the `Browser` is dropped at the end of
//! that closure, whichever way it exits.

use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use tracing::{debug, info};
use url::Url;

use super::{ElementWait, PageSnapshot, SnapshotSource};
use crate::config::FetchConfig;
use crate::error::{Error, Result};

/// Desktop window used when no device is emulated
const DESKTOP_WINDOW: (u32, u32) = (1366, 900);

#[derive(Debug, Clone)]
struct ChromeSettings {
    headless: bool,
    window: (u32, u32),
    user_agent: String,
    accept_language: String,
    platform: Option<&'static str>,
    timeout: Duration,
    element_wait: Duration,
    settle_delay: Duration,
    proxy: Option<String>,
}

/// Rendering source backed by headless Chrome
#[derive(Debug, Clone)]
pub struct ChromeSource {
    settings: ChromeSettings,
    wait_selector: String,
}

impl ChromeSource {
    /// Create a source that waits for `wait_selector` after navigation
    pub fn new(config: &FetchConfig, wait_selector: impl Into<String>) -> Result<Self> {
        let device = config.device_profile()?;
        let settings = ChromeSettings {
            headless: config.headless,
            window: device
                .map(|d| (d.width, d.height))
                .unwrap_or(DESKTOP_WINDOW),
            user_agent: config.effective_user_agent()?,
            accept_language: config.accept_language.clone(),
            platform: device.map(|d| d.platform),
            timeout: config.timeout,
            element_wait: config.element_wait,
            settle_delay: config.settle_delay,
            proxy: config.proxy.clone(),
        };

        Ok(Self {
            settings,
            wait_selector: wait_selector.into(),
        })
    }
}

#[async_trait]
impl SnapshotSource for ChromeSource {
    fn name(&self) -> &'static str {
        "chrome"
    }

    async fn fetch(&self, url: &Url) -> Result<PageSnapshot> {
        let settings = self.settings.clone();
        let selector = self.wait_selector.clone();
        let target = url.clone();

        tokio::task::spawn_blocking(move || render(&settings, &selector, target))
            .await
            .map_err(|e| Error::browser(format!("render task failed: {}", e)))?
    }
}

fn render(settings: &ChromeSettings, selector: &str, url: Url) -> Result<PageSnapshot> {
    let proxy_arg = settings.proxy.as_ref().map(|p| format!("--proxy-server={}", p));
    let args = proxy_arg
        .as_deref()
        .map(|a| vec![std::ffi::OsStr::new(a)])
        .unwrap_or_default();

    let options = LaunchOptions::default_builder()
        .headless(settings.headless)
        .sandbox(false)
        .window_size(Some(settings.window))
        .args(args)
        .build()
        .map_err(|e| Error::browser(format!("invalid launch options: {}", e)))?;

    let browser = Browser::new(options).map_err(|e| Error::browser(format!("launch failed: {}", e)))?;
    let tab = browser
        .new_tab()
        .map_err(|e| Error::browser(format!("could not open tab: {}", e)))?;

    tab.set_default_timeout(settings.timeout);
    tab.set_user_agent(
        &settings.user_agent,
        Some(&settings.accept_language),
        settings.platform,
    )
    .map_err(|e| Error::browser(format!("could not set user agent: {}", e)))?;

    debug!(url = %url, window = ?settings.window, "navigating");
    tab.navigate_to(url.as_str())
        .map_err(|e| Error::navigation_failed(url.as_str(), None, e.to_string()))?;
    tab.wait_until_navigated().map_err(|e| {
        if e.downcast_ref::<headless_chrome::util::Timeout>().is_some() {
            Error::timeout(
                format!("navigation to {}", url),
                settings.timeout.as_millis() as u64,
            )
        } else {
            Error::navigation_failed(url.as_str(), None, e.to_string())
        }
    })?;

    if !settings.settle_delay.is_zero() {
        std::thread::sleep(settings.settle_delay);
    }

    let element_wait = if settings.element_wait.is_zero() {
        ElementWait::NotAttempted
    } else {
        match tab.wait_for_element_with_custom_timeout(selector, settings.element_wait) {
            Ok(_) => ElementWait::Appeared,
            Err(e) => {
                debug!(url = %url, error = %e, "profile image element did not appear");
                ElementWait::TimedOut
            }
        }
    };

    let markup = tab
        .get_content()
        .map_err(|e| Error::browser(format!("could not read page content: {}", e)))?;

    info!(url = %url, bytes = markup.len(), wait = ?element_wait, "page rendered");
    Ok(PageSnapshot::from_markup(url, markup).with_element_wait(element_wait))
}
