// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! `srcset` width-descriptor parsing
//!
//! Only width descriptors (`640w`) are understood. Density descriptors
//! (`2x`) and bare URLs are skipped.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WIDTH_CANDIDATE: Regex = Regex::new(r"^(\S+)\s+(\d+)w").unwrap();
}

/// One `url width` pair from a srcset attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrcsetCandidate {
    pub url: String,
    pub width: u32,
}

/// Parse the width candidates of a srcset, in attribute order
pub fn parse_srcset(descriptor: &str) -> Vec<SrcsetCandidate> {
    descriptor
        .split(',')
        .filter_map(|segment| {
            let caps = WIDTH_CANDIDATE.captures(segment.trim())?;
            let width = caps[2].parse::<u32>().ok().filter(|w| *w > 0)?;
            Some(SrcsetCandidate {
                url: caps[1].to_string(),
                width,
            })
        })
        .collect()
}

/// URL of the widest candidate; the first one wins a tie
pub fn select_largest(descriptor: &str) -> Option<String> {
    let mut best: Option<SrcsetCandidate> = None;
    for candidate in parse_srcset(descriptor) {
        match best {
            Some(ref b) if candidate.width <= b.width => {}
            _ => best = Some(candidate),
        }
    }
    best.map(|c| c.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_widest() {
        let srcset = "https://a/150.jpg 150w, https://a/320.jpg 320w, https://a/640.jpg 640w";
        assert_eq!(select_largest(srcset).as_deref(), Some("https://a/640.jpg"));
    }

    #[test]
    fn test_order_does_not_matter() {
        let srcset = "https://a/640.jpg 640w, https://a/150.jpg 150w";
        assert_eq!(select_largest(srcset).as_deref(), Some("https://a/640.jpg"));
    }

    #[test]
    fn test_tie_keeps_first() {
        let srcset = "https://a/first.jpg 320w, https://a/second.jpg 320w";
        assert_eq!(select_largest(srcset).as_deref(), Some("https://a/first.jpg"));
    }

    #[test]
    fn test_skips_malformed_segments() {
        let srcset = "garbage, https://a/2x.jpg 2x, , https://a/ok.jpg 100w, https://a/0.jpg 0w";
        let candidates = parse_srcset(srcset);
        assert_eq!(
            candidates,
            vec![SrcsetCandidate {
                url: "https://a/ok.jpg".to_string(),
                width: 100
            }]
        );
    }

    #[test]
    fn test_width_overflow_is_skipped() {
        let srcset = "https://a/huge.jpg 99999999999999w, https://a/ok.jpg 10w";
        assert_eq!(select_largest(srcset).as_deref(), Some("https://a/ok.jpg"));
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(select_largest(""), None);
        assert_eq!(select_largest("https://a/x.jpg"), None);
        assert_eq!(select_largest("https://a/x.jpg 1.5x"), None);
    }

    #[test]
    fn test_query_strings_survive() {
        let srcset = "https://cdn/p.jpg?stp=dst-jpg_s150x150&_nc_ht=x 150w,\n  https://cdn/p.jpg?stp=dst-jpg_s320x320&_nc_ht=x 320w";
        assert_eq!(
            select_largest(srcset).as_deref(),
            Some("https://cdn/p.jpg?stp=dst-jpg_s320x320&_nc_ht=x")
        );
    }
}
