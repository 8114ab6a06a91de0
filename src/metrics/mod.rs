//! Metrics collection module
//!
//! Tracks per-source fetch performance, error rates and dispatch totals.

use crate::entities::EntityKind;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Response times kept per source
const RESPONSE_WINDOW: usize = 100;

#[derive(Default)]
struct SourceCounters {
    fetches: AtomicU64,
    successes: AtomicU64,
    errors: AtomicU64,
    timeouts: AtomicU64,
    response_times: Mutex<VecDeque<u64>>,
}

/// Metrics collector shared by the search executor and dispatcher
pub struct Metrics {
    /// Total dispatched requests
    total_searches: AtomicU64,
    /// Requests that ended with no results
    empty_searches: AtomicU64,
    /// Instant searches that fell back to full
    fallbacks: AtomicU64,
    sources: HashMap<EntityKind, SourceCounters>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            empty_searches: AtomicU64::new(0),
            fallbacks: AtomicU64::new(0),
            sources: EntityKind::ALL
                .iter()
                .map(|kind| (*kind, SourceCounters::default()))
                .collect(),
        }
    }

    /// Increment total search count
    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a search that produced no results
    pub fn inc_empty(&self) {
        self.empty_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an instant-to-full fallback
    pub fn inc_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed fetch and its response time
    pub fn record_success(&self, kind: EntityKind, time_ms: u64) {
        let counters = self.counters(kind);
        counters.fetches.fetch_add(1, Ordering::Relaxed);
        counters.successes.fetch_add(1, Ordering::Relaxed);

        let mut times = counters
            .response_times
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if times.len() >= RESPONSE_WINDOW {
            times.pop_front();
        }
        times.push_back(time_ms);
    }

    /// Record a failed fetch
    pub fn record_error(&self, kind: EntityKind) {
        let counters = self.counters(kind);
        counters.fetches.fetch_add(1, Ordering::Relaxed);
        counters.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fetch that timed out
    pub fn record_timeout(&self, kind: EntityKind) {
        let counters = self.counters(kind);
        counters.fetches.fetch_add(1, Ordering::Relaxed);
        counters.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total searches
    pub fn get_total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    /// Get average response time for a source
    pub fn get_avg_response_time(&self, kind: EntityKind) -> Option<u64> {
        let times = self
            .counters(kind)
            .response_times
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<u64>() / times.len() as u64)
        }
    }

    /// Get reliability percentage for a source; timeouts count as failures
    pub fn get_reliability(&self, kind: EntityKind) -> f64 {
        let counters = self.counters(kind);
        let fetches = counters.fetches.load(Ordering::Relaxed);
        let successes = counters.successes.load(Ordering::Relaxed);

        if fetches == 0 {
            100.0
        } else {
            (successes as f64 / fetches as f64) * 100.0
        }
    }

    /// Snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        let sources = EntityKind::ALL
            .iter()
            .map(|kind| {
                let counters = self.counters(*kind);
                (
                    *kind,
                    SourceStats {
                        fetches: counters.fetches.load(Ordering::Relaxed),
                        errors: counters.errors.load(Ordering::Relaxed),
                        timeouts: counters.timeouts.load(Ordering::Relaxed),
                        avg_response_ms: self.get_avg_response_time(*kind),
                        reliability: self.get_reliability(*kind),
                    },
                )
            })
            .collect();

        MetricsSnapshot {
            total_searches: self.get_total_searches(),
            empty_searches: self.empty_searches.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            sources,
        }
    }

    fn counters(&self, kind: EntityKind) -> &SourceCounters {
        // Every kind is inserted in `new`
        &self.sources[&kind]
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for a single source
#[derive(Debug, Clone, Serialize)]
pub struct SourceStats {
    pub fetches: u64,
    pub errors: u64,
    pub timeouts: u64,
    pub avg_response_ms: Option<u64>,
    pub reliability: f64,
}

/// Point-in-time view of all metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_searches: u64,
    pub empty_searches: u64,
    pub fallbacks: u64,
    pub sources: BTreeMap<EntityKind, SourceStats>,
}
