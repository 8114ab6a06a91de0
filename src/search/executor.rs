//! Search execution: the instant and full strategies

use crate::entities::{Candidate, EntityKind, EntityRegistry, EntitySource, MatchMode};
use crate::error::SearchError;
use crate::metrics::Metrics;
use crate::query::StopTerms;
use crate::results::RankMerger;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Search executor that queries entity sources and merges their candidates
pub struct Search {
    /// Entity registry
    registry: Arc<EntityRegistry>,
    /// Stop-term filter applied once per strategy invocation
    stop_terms: Arc<StopTerms>,
    /// Per-kind cap and rank ordering
    merger: RankMerger,
    /// Metrics sink
    metrics: Arc<Metrics>,
    /// Default timeout
    default_timeout: Duration,
    /// Maximum timeout
    max_timeout: Duration,
}

impl Search {
    /// Create a new search executor
    pub fn new(registry: Arc<EntityRegistry>) -> Self {
        Self {
            registry,
            stop_terms: Arc::new(StopTerms::default()),
            merger: RankMerger::default(),
            metrics: Arc::new(Metrics::new()),
            default_timeout: Duration::from_secs_f64(crate::DEFAULT_TIMEOUT),
            max_timeout: Duration::from_secs_f64(crate::MAX_TIMEOUT),
        }
    }

    /// Set the stop-term filter
    pub fn with_stop_terms(mut self, stop_terms: StopTerms) -> Self {
        self.stop_terms = Arc::new(stop_terms);
        self
    }

    /// Set the per-kind candidate cap
    pub fn with_per_type_limit(mut self, limit: usize) -> Self {
        self.merger = RankMerger::new(limit);
        self
    }

    /// Share a metrics collector
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set default timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set maximum timeout
    pub fn with_max_timeout(mut self, timeout: Duration) -> Self {
        self.max_timeout = timeout;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Run the strategy for a match mode
    pub async fn execute(
        &self,
        mode: MatchMode,
        kinds: &[EntityKind],
        query: &str,
    ) -> Result<Vec<Candidate>, SearchError> {
        match mode {
            MatchMode::Instant => self.instant_search(kinds, query).await,
            MatchMode::Full => self.full_search(kinds, query).await,
        }
    }

    /// Fast match; falls back to a full search with the original query
    /// when no kind produces a candidate
    pub async fn instant_search(
        &self,
        kinds: &[EntityKind],
        query: &str,
    ) -> Result<Vec<Candidate>, SearchError> {
        let results = self.run(MatchMode::Instant, kinds, query).await?;
        if !results.is_empty() {
            return Ok(results);
        }

        debug!("Instant search found nothing, falling back to full search");
        self.metrics.inc_fallback();
        self.full_search(kinds, query).await
    }

    /// Exhaustive match; terminal, no fallback
    pub async fn full_search(
        &self,
        kinds: &[EntityKind],
        query: &str,
    ) -> Result<Vec<Candidate>, SearchError> {
        self.run(MatchMode::Full, kinds, query).await
    }

    /// Clean the query, fetch every kind concurrently and merge
    async fn run(
        &self,
        mode: MatchMode,
        kinds: &[EntityKind],
        query: &str,
    ) -> Result<Vec<Candidate>, SearchError> {
        let cleaned = self.stop_terms.strip(query);

        info!("Executing {} search on {} entity kinds", mode, kinds.len());
        debug!("Cleaned query: {:?}", cleaned);

        let fetches = kinds.iter().map(|kind| self.fetch(*kind, mode, &cleaned));

        // join_all keeps input order, so batches stay in scope order
        let batches = join_all(fetches)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.merger.merge(batches))
    }

    /// Fetch candidates of one kind; a timeout yields an empty batch
    async fn fetch(
        &self,
        kind: EntityKind,
        mode: MatchMode,
        query: &str,
    ) -> Result<Vec<Candidate>, SearchError> {
        let Some(source) = self.registry.get(kind) else {
            warn!("No source registered for {}", kind);
            return Ok(vec![]);
        };

        let source_timeout = self.source_timeout(kind);
        let start = Instant::now();
        let result = timeout(
            source_timeout,
            source.candidates(mode, query, self.merger.per_type_limit()),
        )
        .await;
        let elapsed = start.elapsed();

        match result {
            Ok(Ok(candidates)) => {
                self.metrics
                    .record_success(kind, elapsed.as_millis() as u64);
                debug!(
                    "Source {} returned {} candidates in {:?}",
                    source.name(),
                    candidates.len(),
                    elapsed
                );
                Ok(Self::own_kind(&**source, candidates))
            }
            Ok(Err(e)) => {
                warn!("Source {} failed: {}", source.name(), e);
                self.metrics.record_error(kind);
                Err(SearchError::SearchBackendUnavailable { kind, source: e })
            }
            Err(_) => {
                warn!(
                    "Timeout for source {} after {:?}",
                    source.name(),
                    source_timeout
                );
                self.metrics.record_timeout(kind);
                Ok(vec![])
            }
        }
    }

    fn source_timeout(&self, kind: EntityKind) -> Duration {
        let seconds = self
            .registry
            .get_timeout(kind, self.default_timeout.as_secs_f64())
            .min(self.max_timeout.as_secs_f64())
            .max(0.0);
        Duration::from_secs_f64(seconds)
    }

    /// Drop candidates a source returned for a kind it does not serve
    fn own_kind(source: &dyn EntitySource, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let kind = source.kind();
        let total = candidates.len();
        let owned: Vec<Candidate> = candidates
            .into_iter()
            .filter(|c| c.kind() == kind)
            .collect();
        if owned.len() < total {
            warn!(
                "Source {} returned {} candidates of another kind",
                source.name(),
                total - owned.len()
            );
        }
        owned
    }
}
