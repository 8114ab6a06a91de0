//! Entity source traits and types

use super::types::{Candidate, EntityKind};
use crate::error::SourceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which match capability of a source to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Fast, narrow match (typically prefix based)
    Instant,
    /// Exhaustive match
    Full,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranked-candidate capability for one entity kind.
///
/// Implementations receive an already cleaned query and should return
/// candidates ordered by descending rank. `limit` is a hint; callers
/// enforce the cap themselves.
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// Kind of entity this source produces
    fn kind(&self) -> EntityKind;

    /// Source name for logs and metrics
    fn name(&self) -> &str {
        self.kind().as_str()
    }

    /// Source-specific timeout in seconds
    fn timeout(&self) -> Option<f64> {
        None
    }

    /// Fast match candidates
    async fn instant_candidates(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Candidate>, SourceError>;

    /// Exhaustive match candidates
    async fn full_candidates(&self, query: &str, limit: usize)
        -> Result<Vec<Candidate>, SourceError>;

    /// Dispatch to the capability selected by `mode`
    async fn candidates(
        &self,
        mode: MatchMode,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Candidate>, SourceError> {
        match mode {
            MatchMode::Instant => self.instant_candidates(query, limit).await,
            MatchMode::Full => self.full_candidates(query, limit).await,
        }
    }
}
