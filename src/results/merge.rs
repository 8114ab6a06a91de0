//! Rank merger for combining per-kind candidate lists

use crate::entities::Candidate;
use std::cmp::Ordering;

/// Merges per-kind candidate batches into one rank-ordered list.
///
/// Each batch is capped before merging; the merged list is not capped
/// again. Equal ranks keep batch order (the scope's kind priority), then
/// the order the source returned them. NaN ranks sort last.
#[derive(Debug, Clone, Copy)]
pub struct RankMerger {
    per_type_limit: usize,
}

impl RankMerger {
    pub fn new(per_type_limit: usize) -> Self {
        Self { per_type_limit }
    }

    pub fn per_type_limit(&self) -> usize {
        self.per_type_limit
    }

    /// Order one batch by rank and keep the best `per_type_limit`
    pub fn cap(&self, mut batch: Vec<Candidate>) -> Vec<Candidate> {
        batch.sort_by(by_rank_desc);
        batch.truncate(self.per_type_limit);
        batch
    }

    /// Cap every batch, concatenate in batch order and sort by rank
    pub fn merge(&self, batches: Vec<Vec<Candidate>>) -> Vec<Candidate> {
        let mut merged: Vec<Candidate> = batches
            .into_iter()
            .flat_map(|batch| self.cap(batch))
            .collect();

        merged.sort_by(by_rank_desc);
        merged
    }
}

impl Default for RankMerger {
    fn default() -> Self {
        Self::new(crate::DEFAULT_PER_TYPE_LIMIT)
    }
}

fn rank_key(candidate: &Candidate) -> f64 {
    if candidate.rank.is_nan() {
        f64::NEG_INFINITY
    } else {
        candidate.rank
    }
}

/// Descending by rank; `sort_by` is stable so ties keep input order
fn by_rank_desc(a: &Candidate, b: &Candidate) -> Ordering {
    rank_key(b).total_cmp(&rank_key(a))
}
