// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Resolution observers
//!
//! The pipeline and the profile resolver report to observers instead of
//! keeping state themselves. [`ResolutionStats`] is the stock observer:
//! outcome counts, strategy hit rates and fetch failure kinds.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::outcome::{FetchFailure, ResolutionOutcome, Strategy};

/// Receives resolution events
///
/// Every method has a no-op default.
pub trait ResolutionObserver: Send + Sync {
    /// A strategy ran; `hit` is whether it produced a URL
    fn on_strategy(&self, strategy: Strategy, hit: bool) {
        let _ = (strategy, hit);
    }

    /// An attempt finished; `strategy` is the winner for `Found`
    fn on_outcome(&self, outcome: &ResolutionOutcome, strategy: Option<Strategy>) {
        let _ = (outcome, strategy);
    }
}

/// Counting observer
#[derive(Debug)]
pub struct ResolutionStats {
    attempts: AtomicU64,
    found: AtomicU64,
    not_found: AtomicU64,
    extraction_failed: AtomicU64,
    fetch_failed: AtomicU64,
    /// Index by `Strategy as usize`
    strategy_runs: [AtomicU64; 3],
    strategy_hits: [AtomicU64; 3],
    failure_kinds: RwLock<BTreeMap<String, u64>>,
    start_time: Instant,
}

/// Per-strategy figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub runs: u64,
    pub hits: u64,
    pub hit_rate: f64,
}

/// Snapshot of [`ResolutionStats`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub uptime_secs: u64,
    pub attempts: u64,
    pub found: u64,
    pub not_found: u64,
    pub extraction_failed: u64,
    pub fetch_failed: u64,
    /// Share of attempts that ended in `Found`
    pub success_rate: f64,
    pub strategies: BTreeMap<String, StrategyReport>,
    /// Fetch failures by kind (`http_503`, `timed_out`, `network`)
    pub fetch_failures: BTreeMap<String, u64>,
}

impl Default for ResolutionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionStats {
    pub fn new() -> Self {
        Self {
            attempts: AtomicU64::new(0),
            found: AtomicU64::new(0),
            not_found: AtomicU64::new(0),
            extraction_failed: AtomicU64::new(0),
            fetch_failed: AtomicU64::new(0),
            strategy_runs: Default::default(),
            strategy_hits: Default::default(),
            failure_kinds: RwLock::new(BTreeMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Current figures
    pub fn report(&self) -> StatsReport {
        let attempts = self.attempts.load(Ordering::Relaxed);
        let found = self.found.load(Ordering::Relaxed);

        let strategies = Strategy::ALL
            .iter()
            .map(|s| {
                let runs = self.strategy_runs[*s as usize].load(Ordering::Relaxed);
                let hits = self.strategy_hits[*s as usize].load(Ordering::Relaxed);
                (
                    s.as_str().to_string(),
                    StrategyReport {
                        runs,
                        hits,
                        hit_rate: ratio(hits, runs),
                    },
                )
            })
            .collect();

        StatsReport {
            uptime_secs: self.start_time.elapsed().as_secs(),
            attempts,
            found,
            not_found: self.not_found.load(Ordering::Relaxed),
            extraction_failed: self.extraction_failed.load(Ordering::Relaxed),
            fetch_failed: self.fetch_failed.load(Ordering::Relaxed),
            success_rate: ratio(found, attempts),
            strategies,
            fetch_failures: self.failure_kinds.read().clone(),
        }
    }
}

impl ResolutionObserver for ResolutionStats {
    fn on_strategy(&self, strategy: Strategy, hit: bool) {
        self.strategy_runs[strategy as usize].fetch_add(1, Ordering::Relaxed);
        if hit {
            self.strategy_hits[strategy as usize].fetch_add(1, Ordering::Relaxed);
        }
    }

    fn on_outcome(&self, outcome: &ResolutionOutcome, _strategy: Option<Strategy>) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            ResolutionOutcome::Found { .. } => &self.found,
            ResolutionOutcome::NotFound => &self.not_found,
            ResolutionOutcome::ExtractionFailed => &self.extraction_failed,
            ResolutionOutcome::FetchFailed { reason } => {
                let kind = match reason {
                    FetchFailure::HttpStatus(code) => format!("http_{}", code),
                    FetchFailure::TimedOut => "timed_out".to_string(),
                    FetchFailure::Network(_) => "network".to_string(),
                };
                *self.failure_kinds.write().entry(kind).or_insert(0) += 1;
                &self.fetch_failed
            }
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = ResolutionStats::new().report();
        assert_eq!(report.attempts, 0);
        assert_eq!(report.success_rate, 0.0);
        assert_eq!(report.strategies.len(), 3);
        assert!(report.fetch_failures.is_empty());
    }

    #[test]
    fn test_counts() {
        let stats = ResolutionStats::new();

        stats.on_strategy(Strategy::ImageElement, false);
        stats.on_strategy(Strategy::EmbeddedData, true);
        stats.on_outcome(&ResolutionOutcome::found("https://cdn/x.jpg"), Some(Strategy::EmbeddedData));

        stats.on_outcome(&ResolutionOutcome::NotFound, None);
        stats.on_outcome(&ResolutionOutcome::fetch_failed(FetchFailure::HttpStatus(503)), None);
        stats.on_outcome(&ResolutionOutcome::fetch_failed(FetchFailure::HttpStatus(503)), None);
        stats.on_outcome(&ResolutionOutcome::fetch_failed(FetchFailure::TimedOut), None);

        let report = stats.report();
        assert_eq!(report.attempts, 5);
        assert_eq!(report.found, 1);
        assert_eq!(report.not_found, 1);
        assert_eq!(report.fetch_failed, 3);
        assert_eq!(report.success_rate, 0.2);
        assert_eq!(report.fetch_failures["http_503"], 2);
        assert_eq!(report.fetch_failures["timed_out"], 1);

        let embedded = &report.strategies["embedded_data"];
        assert_eq!((embedded.runs, embedded.hits), (1, 1));
        assert_eq!(report.strategies["image_element"].hit_rate, 0.0);
        assert_eq!(report.strategies["preview_meta"].runs, 0);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(ResolutionStats::new().report()).unwrap();
        assert!(json["strategies"]["image_element"].is_object());
    }
}
