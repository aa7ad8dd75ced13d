// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Locating the profile `<img>` by its alt text

use lazy_static::lazy_static;

use crate::dom::{Document, SelectorList};
use crate::error::{Error, Result};
use crate::source::PageSnapshot;

/// Alt-text phrases used when none are configured
pub const DEFAULT_ALT_PHRASES: &[&str] = &["profile picture", "profile photo"];

lazy_static! {
    static ref DEFAULT_MATCHER: ImageTagMatcher = ImageTagMatcher::new(DEFAULT_ALT_PHRASES)
        .expect("default alt phrases form a valid selector");
}

/// Attributes of the profile image element, verbatim
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageTag {
    pub src: String,
    pub srcset: String,
}

/// Compiled selector for the profile image element
///
/// The selector text is also what the browser source waits on, so both
/// agree on what "the profile image" is.
#[derive(Debug, Clone)]
pub struct ImageTagMatcher {
    selector: String,
    compiled: SelectorList,
}

impl ImageTagMatcher {
    /// Build a matcher for `img` elements whose alt contains any phrase
    pub fn new<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selector = alt_selector(phrases)?;
        let compiled = SelectorList::parse(&selector)?;
        Ok(Self { selector, compiled })
    }

    /// CSS selector text
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// First matching `img` in document order
    pub fn extract(&self, document: &Document) -> Option<ImageTag> {
        let img = document.select_first(&self.compiled)?;
        Some(ImageTag {
            src: img.src().unwrap_or_default().to_string(),
            srcset: img.srcset().unwrap_or_default().to_string(),
        })
    }
}

impl Default for ImageTagMatcher {
    fn default() -> Self {
        DEFAULT_MATCHER.clone()
    }
}

/// Profile image element of a snapshot, using the default alt phrases
pub fn extract_from_image_element(snapshot: &PageSnapshot) -> Option<ImageTag> {
    DEFAULT_MATCHER.extract(&snapshot.document)
}

/// `img[alt*='a' i], img[alt*='b' i]`
fn alt_selector<I, S>(phrases: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parts = Vec::new();
    for phrase in phrases {
        let phrase = phrase.as_ref().trim();
        if phrase.is_empty() {
            continue;
        }
        let quote = if !phrase.contains('\'') {
            '\''
        } else if !phrase.contains('"') {
            '"'
        } else {
            return Err(Error::config(format!(
                "Alt phrase mixes both quote characters: {}",
                phrase
            )));
        };
        let phrase = phrase.replace('\\', "\\\\");
        parts.push(format!("img[alt*={q}{p}{q} i]", q = quote, p = phrase));
    }

    if parts.is_empty() {
        return Err(Error::config("At least one alt phrase is required"));
    }
    Ok(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn snapshot(markup: &str) -> PageSnapshot {
        PageSnapshot::from_markup(Url::parse("https://www.example.com/user/").unwrap(), markup)
    }

    #[test]
    fn test_selector_text() {
        let matcher = ImageTagMatcher::new(["profile picture", "it's me"]).unwrap();
        assert_eq!(
            matcher.selector(),
            r#"img[alt*='profile picture' i], img[alt*="it's me" i]"#
        );
    }

    #[test]
    fn test_invalid_phrases() {
        assert!(ImageTagMatcher::new(Vec::<String>::new()).is_err());
        assert!(ImageTagMatcher::new(["  "]).is_err());
        assert!(ImageTagMatcher::new([r#"it's "me""#]).is_err());
    }

    #[test]
    fn test_extracts_first_match() {
        let snap = snapshot(
            r#"<html><body>
                <img alt="logo" src="https://cdn/logo.png">
                <img alt="someone's Profile Picture" src="https://cdn/small.jpg" srcset="https://cdn/a.jpg 150w, https://cdn/b.jpg 320w">
                <img alt="profile photo" src="https://cdn/other.jpg">
            </body></html>"#,
        );

        let tag = extract_from_image_element(&snap).unwrap();
        assert_eq!(tag.src, "https://cdn/small.jpg");
        assert_eq!(tag.srcset, "https://cdn/a.jpg 150w, https://cdn/b.jpg 320w");
    }

    #[test]
    fn test_profile_photo_phrase() {
        let snap = snapshot(r#"<img alt="Change PROFILE PHOTO">"#);
        assert_eq!(extract_from_image_element(&snap), Some(ImageTag::default()));
    }

    #[test]
    fn test_missing_element() {
        let snap = snapshot(r#"<img alt="avatar" src="https://cdn/x.jpg"><div alt="profile picture"></div>"#);
        assert_eq!(extract_from_image_element(&snap), None);
    }

    #[test]
    fn test_backslash_in_phrase_is_literal() {
        let matcher = ImageTagMatcher::new([r"a\b"]).unwrap();
        assert_eq!(matcher.selector(), r"img[alt*='a\\b' i]");

        let literal = snapshot(r#"<img alt="photo a\b" src="https://cdn/literal.jpg">"#);
        assert_eq!(matcher.extract(&literal.document).unwrap().src, "https://cdn/literal.jpg");

        let collapsed = snapshot(r#"<img alt="photo ab" src="https://cdn/collapsed.jpg">"#);
        assert_eq!(matcher.extract(&collapsed.document), None);
    }

    #[test]
    fn test_custom_phrases() {
        let matcher = ImageTagMatcher::new(["foto de perfil"]).unwrap();
        let snap = snapshot(r#"<img alt="Foto de perfil de alguien" src="https://cdn/es.jpg">"#);
        assert_eq!(matcher.extract(&snap.document).unwrap().src, "https://cdn/es.jpg");
        assert_eq!(extract_from_image_element(&snap), None);
    }
}
