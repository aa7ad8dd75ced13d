// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Image fetching helpers: dimension probing and download-to-disk

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageReader;
use tracing::{debug, info};
use url::Url;

use super::client::HttpClient;
use crate::error::{Error, Result};

/// Extensions kept as-is when naming downloaded files
const KNOWN_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Read pixel dimensions from an encoded image's header
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}

/// File extension for an image URL; `jpg` unless the path names a known one
pub fn image_extension(url: &str) -> String {
    let path = Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.split(['?', '#']).next().unwrap_or_default().to_string());

    path.rsplit('/')
        .next()
        .and_then(|tail| tail.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| KNOWN_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or_else(|| "jpg".to_string())
}

/// Fetch an image and read its dimensions; `None` on any failure
pub async fn probe_dimensions(client: &HttpClient, url: &str) -> Option<(u32, u32)> {
    let parsed = Url::parse(url).ok()?;
    let response = match client.get_image(&parsed).await {
        Ok(r) if r.is_success() && r.is_image() => r,
        Ok(r) => {
            debug!(
                url,
                status = r.status_code(),
                content_type = r.content_type.as_deref().unwrap_or("-"),
                "dimension probe got no image"
            );
            return None;
        }
        Err(e) => {
            debug!(url, error = %e, "dimension probe failed");
            return None;
        }
    };

    match image_dimensions(&response.body) {
        Ok(dims) => Some(dims),
        Err(e) => {
            debug!(url, error = %e, "could not decode image header");
            None
        }
    }
}

/// Download an image into `dir` as `<stem>.<ext>` and return the written path
pub async fn download_image(
    client: &HttpClient,
    url: &str,
    dir: &Path,
    stem: &str,
) -> Result<PathBuf> {
    let parsed = Url::parse(url)?;
    let response = client.get_image(&parsed).await?;
    if !response.is_success() {
        return Err(Error::navigation_failed(
            url,
            Some(response.status_code()),
            "image fetch failed",
        ));
    }
    if !response.is_image() {
        return Err(Error::navigation_failed(
            url,
            Some(response.status_code()),
            format!(
                "expected an image, got {}",
                response.content_type.as_deref().unwrap_or_default()
            ),
        ));
    }

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("{}.{}", stem, image_extension(url)));
    tokio::fs::write(&path, &response.body).await?;

    info!(path = %path.display(), bytes = response.body.len(), "image saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("https://cdn.example.com/a/b/pic.PNG?x=1"), "png");
        assert_eq!(image_extension("https://cdn.example.com/pic.webp"), "webp");
        assert_eq!(image_extension("https://cdn.example.com/pic.heic"), "jpg");
        assert_eq!(image_extension("https://cdn.example.com/v/t51/noext"), "jpg");
        assert_eq!(image_extension("https://cdn.example.com/dir.d/file"), "jpg");
        assert_eq!(image_extension("relative/pic.jpeg?s=1"), "jpeg");
    }

    #[test]
    fn test_image_dimensions_rejects_garbage() {
        assert!(image_dimensions(b"not an image").is_err());
    }

    #[test]
    fn test_image_dimensions_png_header() {
        // 1x1 transparent PNG
        let png: &[u8] = &[
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
            0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
            0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78,
            0xDA, 0x63, 0x64, 0x60, 0xF8, 0x5F, 0x0F, 0x00, 0x02, 0x87, 0x01, 0x80, 0xEB, 0x47,
            0xBA, 0x92, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
        ];
        assert_eq!(image_dimensions(png).unwrap(), (1, 1));
    }
}
