// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Resolution pipeline
//!
//! Runs the extraction strategies over a snapshot in a fixed order and
//! stops at the first one that yields a URL:
//!
//! 1. not-found template check (terminal)
//! 2. profile `<img>`: widest srcset candidate, then `src`
//! 3. embedded JSON fragments
//! 4. `og:image` preview tag (optional)
//!
//! The pipeline is immutable after construction and holds no state
//! between snapshots.

use std::fmt;
use std::sync::Arc;

use html_escape::decode_html_entities;
use regex::{Regex, RegexBuilder};
use tracing::{debug, info, warn};

use super::embedded::extract_from_decoded;
use super::image_tag::ImageTagMatcher;
use super::observer::ResolutionObserver;
use super::outcome::{ResolutionOutcome, Strategy};
use super::preview::extract_preview_image;
use super::srcset::select_largest;
use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::source::{ElementWait, PageSnapshot};

/// Result of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    pub outcome: ResolutionOutcome,
    /// Winning strategy, set only for `Found`
    pub strategy: Option<Strategy>,
}

/// Configured resolution pipeline
#[derive(Clone)]
pub struct Pipeline {
    not_found: Regex,
    image_tag: ImageTagMatcher,
    strategies: Vec<Strategy>,
    observers: Vec<Arc<dyn ResolutionObserver>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("not_found", &self.not_found.as_str())
            .field("image_selector", &self.image_tag.selector())
            .field("strategies", &self.strategies)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Pipeline {
    /// Build a pipeline from configuration
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let not_found = RegexBuilder::new(&config.not_found_pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::config(format!("Invalid not-found pattern: {}", e)))?;

        let image_tag = ImageTagMatcher::new(&config.alt_phrases)?;

        let strategies = Strategy::ALL
            .into_iter()
            .filter(|s| *s != Strategy::PreviewMeta || config.preview_fallback)
            .collect();

        Ok(Self {
            not_found,
            image_tag,
            strategies,
            observers: Vec::new(),
        })
    }

    /// Attach an observer
    pub fn with_observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Selector the profile image element is located with
    pub fn image_selector(&self) -> &str {
        self.image_tag.selector()
    }

    /// Strategies in the order they run
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Resolve a snapshot to an outcome
    pub fn resolve(&self, snapshot: &PageSnapshot) -> ResolutionOutcome {
        self.run(snapshot).outcome
    }

    /// Resolve a snapshot, also reporting which strategy won
    pub fn run(&self, snapshot: &PageSnapshot) -> PipelineRun {
        let decoded = decode_html_entities(&snapshot.markup);

        let run = if self.not_found.is_match(&decoded) {
            debug!(url = %snapshot.url, "not-found template matched");
            PipelineRun {
                outcome: ResolutionOutcome::NotFound,
                strategy: None,
            }
        } else {
            self.extract(snapshot, &decoded)
        };

        match &run.outcome {
            ResolutionOutcome::ExtractionFailed => {
                warn!(url = %snapshot.url, "no strategy produced a profile picture URL")
            }
            outcome => {
                info!(url = %snapshot.url, outcome = outcome.label(), strategy = ?run.strategy, "resolved")
            }
        }

        for observer in &self.observers {
            observer.on_outcome(&run.outcome, run.strategy);
        }
        run
    }

    fn extract(&self, snapshot: &PageSnapshot, decoded: &str) -> PipelineRun {
        let hit = self.strategies.iter().find_map(|&strategy| {
            let url = self.apply(strategy, snapshot, decoded);
            debug!(strategy = strategy.as_str(), hit = url.is_some(), "strategy ran");
            for observer in &self.observers {
                observer.on_strategy(strategy, url.is_some());
            }
            url.map(|u| (strategy, u))
        });

        match hit {
            Some((strategy, url)) => PipelineRun {
                outcome: ResolutionOutcome::found(url),
                strategy: Some(strategy),
            },
            // the element never rendered and nothing else matched either
            None if snapshot.element_wait == ElementWait::TimedOut => PipelineRun {
                outcome: ResolutionOutcome::NotFound,
                strategy: None,
            },
            None => PipelineRun {
                outcome: ResolutionOutcome::ExtractionFailed,
                strategy: None,
            },
        }
    }

    fn apply(&self, strategy: Strategy, snapshot: &PageSnapshot, decoded: &str) -> Option<String> {
        match strategy {
            Strategy::ImageElement => {
                let tag = self.image_tag.extract(&snapshot.document)?;
                select_largest(&tag.srcset).or_else(|| {
                    let src = tag.src.trim();
                    (!src.is_empty()).then(|| src.to_string())
                })
            }
            Strategy::EmbeddedData => extract_from_decoded(decoded),
            Strategy::PreviewMeta => extract_preview_image(&snapshot.document),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ResolutionStats;
    use url::Url;

    fn snapshot(markup: &str) -> PageSnapshot {
        PageSnapshot::from_markup(Url::parse("https://www.example.com/user/").unwrap(), markup)
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(&ResolverConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let config = ResolverConfig::default().not_found_pattern("(unclosed");
        assert!(matches!(Pipeline::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_srcset_beats_src() {
        let snap = snapshot(
            r#"<img alt="user's profile picture" src="https://cdn/src.jpg" srcset="https://cdn/150.jpg 150w, https://cdn/320.jpg 320w">"#,
        );
        let run = pipeline().run(&snap);
        assert_eq!(run.outcome, ResolutionOutcome::found("https://cdn/320.jpg"));
        assert_eq!(run.strategy, Some(Strategy::ImageElement));
    }

    #[test]
    fn test_src_when_srcset_unusable() {
        let snap = snapshot(r#"<img alt="profile picture" src="https://cdn/src.jpg" srcset="https://cdn/x.jpg 2x">"#);
        assert_eq!(pipeline().resolve(&snap), ResolutionOutcome::found("https://cdn/src.jpg"));
    }

    #[test]
    fn test_empty_image_falls_through_to_embedded() {
        let snap = snapshot(
            r#"<img alt="profile picture" src=""><script>{"profile_pic_url_hd":"https://cdn/hd.jpg"}</script>"#,
        );
        let run = pipeline().run(&snap);
        assert_eq!(run.outcome, ResolutionOutcome::found("https://cdn/hd.jpg"));
        assert_eq!(run.strategy, Some(Strategy::EmbeddedData));
    }

    #[test]
    fn test_preview_fallback() {
        let markup = r#"<head><meta property="og:image" content="https://cdn/og.jpg"></head>"#;
        let run = pipeline().run(&snapshot(markup));
        assert_eq!(run.outcome, ResolutionOutcome::found("https://cdn/og.jpg"));
        assert_eq!(run.strategy, Some(Strategy::PreviewMeta));

        let strict = Pipeline::new(&ResolverConfig::default().preview_fallback(false)).unwrap();
        assert_eq!(strict.strategies(), &[Strategy::ImageElement, Strategy::EmbeddedData]);
        assert_eq!(strict.resolve(&snapshot(markup)), ResolutionOutcome::ExtractionFailed);
    }

    #[test]
    fn test_template_wins_over_everything() {
        let snap = snapshot(
            r#"<h2>Sorry, this page isn&#x27;t available.</h2>
               <img alt="profile picture" src="https://cdn/src.jpg">"#,
        );
        assert_eq!(pipeline().resolve(&snap), ResolutionOutcome::NotFound);

        let curly = snapshot("<h2>SORRY, THIS PAGE ISN’T AVAILABLE.</h2>");
        assert_eq!(pipeline().resolve(&curly), ResolutionOutcome::NotFound);
    }

    #[test]
    fn test_custom_template() {
        let config = ResolverConfig::default().not_found_pattern(r"user not found");
        let snap = snapshot("<p>User Not Found</p>");
        assert_eq!(Pipeline::new(&config).unwrap().resolve(&snap), ResolutionOutcome::NotFound);
    }

    #[test]
    fn test_extraction_failed_vs_wait_timeout() {
        let markup = "<html><body><p>login wall</p></body></html>";
        assert_eq!(pipeline().resolve(&snapshot(markup)), ResolutionOutcome::ExtractionFailed);

        let waited = snapshot(markup).with_element_wait(ElementWait::TimedOut);
        assert_eq!(pipeline().resolve(&waited), ResolutionOutcome::NotFound);
    }

    #[test]
    fn test_wait_timeout_still_uses_fallbacks() {
        let snap = snapshot(r#"<meta property="og:image" content="https://cdn/og.jpg">"#)
            .with_element_wait(ElementWait::TimedOut);
        assert_eq!(pipeline().resolve(&snap), ResolutionOutcome::found("https://cdn/og.jpg"));
    }

    #[test]
    fn test_observer_sees_attempts() {
        let stats = Arc::new(ResolutionStats::new());
        let pipeline = pipeline().with_observer(stats.clone());

        pipeline.resolve(&snapshot(r#"<meta property="og:image" content="https://cdn/og.jpg">"#));
        pipeline.resolve(&snapshot("Sorry, this page isn't available."));

        let report = stats.report();
        assert_eq!(report.attempts, 2);
        assert_eq!(report.found, 1);
        assert_eq!(report.not_found, 1);
        assert_eq!(report.strategies["image_element"].runs, 1);
        assert_eq!(report.strategies["embedded_data"].runs, 1);
        assert_eq!(report.strategies["preview_meta"].hits, 1);
    }

    #[test]
    fn test_idempotent() {
        let snap = snapshot(r#"<img alt="profile photo" srcset="https://cdn/a.jpg 10w, https://cdn/b.jpg 20w">"#);
        let pipeline = pipeline();
        assert_eq!(pipeline.run(&snap), pipeline.run(&snap));
    }
}
