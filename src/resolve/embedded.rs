// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Profile picture URLs embedded as JSON fragments in page scripts
//!
//! Three shapes are tried in order:
//!
//! 1. `"profile_pic_url_hd": "https://..."`
//! 2. `"hd_profile_pic_versions": [{"width": .., "url": ..}, ...]`
//! 3. `"hd_profile_pic_url_info": {"url": "https://...", ...}`
//!
//! The fragments are located with regexes rather than by parsing the
//! whole script payload, which is large and changes shape often.

use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

lazy_static! {
    static ref HD_URL: Regex =
        Regex::new(r#""profile_pic_url_hd"\s*:\s*"(https:[^"\\]+)""#).unwrap();
    static ref HD_VERSIONS: Regex =
        Regex::new(r#""hd_profile_pic_versions"\s*:\s*(\[[^\]]+\])"#).unwrap();
    static ref HD_URL_INFO: Regex =
        Regex::new(r#""hd_profile_pic_url_info"\s*:\s*\{([^}]+)\}"#).unwrap();
    static ref INFO_URL: Regex = Regex::new(r#""url"\s*:\s*"(https:[^"\\]+)""#).unwrap();
}

#[derive(Debug, Deserialize)]
struct PicVersion {
    #[serde(default)]
    width: f64,
    #[serde(default)]
    url: Option<serde_json::Value>,
}

/// Best embedded profile picture URL in raw page markup
pub fn extract_from_markup(markup: &str) -> Option<String> {
    let decoded = decode_html_entities(markup);
    extract_from_decoded(&decoded)
}

/// Same as [`extract_from_markup`] for markup that is already entity-decoded
pub(crate) fn extract_from_decoded(markup: &str) -> Option<String> {
    if let Some(caps) = HD_URL.captures(markup) {
        debug!("embedded data: profile_pic_url_hd");
        return Some(caps[1].to_string());
    }

    if let Some(url) = HD_VERSIONS
        .captures(markup)
        .and_then(|caps| widest_version(&caps[1]))
    {
        debug!("embedded data: hd_profile_pic_versions");
        return Some(url);
    }

    let info = HD_URL_INFO.captures(markup)?;
    let url = INFO_URL.captures(&info[1])?;
    debug!("embedded data: hd_profile_pic_url_info");
    Some(url[1].to_string())
}

/// URL of the widest version in a JSON array fragment
fn widest_version(fragment: &str) -> Option<String> {
    let mut versions: Vec<PicVersion> = match serde_json::from_str(fragment) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "hd_profile_pic_versions is not valid JSON");
            return None;
        }
    };

    // stable, so equal widths keep document order
    versions.sort_by(|a, b| b.width.total_cmp(&a.width));

    match versions.into_iter().next()?.url {
        Some(serde_json::Value::String(url)) if !url.is_empty() => Some(url),
        _ => None,
    }
}
