//! Remote ranking backend source
//!
//! Queries `GET {base}/search/{kind}/{mode}?query=..&limit=..`, which answers
//! with a JSON array of the kind's native attributes plus a `rank` field.

use super::traits::{EntitySource, MatchMode};
use super::types::{Anime, Candidate, Character, Entity, EntityKind, Group, Manga, User};
use crate::error::SourceError;
use crate::network::{BackendResponse, HttpClient};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// One row of a backend response
#[derive(Debug, Deserialize)]
struct RankedRow<T> {
    #[serde(alias = "pg_search_rank")]
    rank: f64,
    #[serde(flatten)]
    record: T,
}

/// Entity source that delegates ranking to a remote backend
pub struct HttpSource {
    kind: EntityKind,
    base_url: String,
    client: HttpClient,
    timeout: Option<f64>,
}

impl HttpSource {
    pub fn new(kind: EntityKind, base_url: impl Into<String>, client: HttpClient) -> Self {
        Self {
            kind,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            timeout: None,
        }
    }

    /// Set a source-specific timeout in seconds
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Endpoint for a match mode
    pub fn endpoint(&self, mode: MatchMode) -> String {
        format!("{}/search/{}/{}", self.base_url, self.kind, mode)
    }

    async fn fetch(
        &self,
        mode: MatchMode,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Candidate>, SourceError> {
        let url = self.endpoint(mode);
        let params = [("query", query.to_string()), ("limit", limit.to_string())];

        let response = self
            .client
            .get(&url, &params)
            .await
            .map_err(|e| SourceError::Request(format!("{:#}", e)))?;

        if !response.is_success() {
            return Err(SourceError::Status(response.status));
        }

        let candidates = self.decode(&response)?;
        debug!(
            "Backend {} returned {} {} candidates",
            response.url,
            candidates.len(),
            self.kind
        );
        Ok(candidates)
    }

    fn decode(&self, response: &BackendResponse) -> Result<Vec<Candidate>, SourceError> {
        match self.kind {
            EntityKind::Anime => decode_rows::<Anime>(response),
            EntityKind::Manga => decode_rows::<Manga>(response),
            EntityKind::Character => decode_rows::<Character>(response),
            EntityKind::Group => decode_rows::<Group>(response),
            EntityKind::User => decode_rows::<User>(response),
        }
    }
}

fn decode_rows<T>(response: &BackendResponse) -> Result<Vec<Candidate>, SourceError>
where
    T: DeserializeOwned + Into<Entity>,
{
    let rows: Vec<RankedRow<T>> = response
        .json()
        .map_err(|e| SourceError::Decode(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|row| Candidate::new(row.record, row.rank))
        .collect())
}

#[async_trait]
impl EntitySource for HttpSource {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn timeout(&self) -> Option<f64> {
        self.timeout
    }

    async fn instant_candidates(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Candidate>, SourceError> {
        self.fetch(MatchMode::Instant, query, limit).await
    }

    async fn full_candidates(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Candidate>, SourceError> {
        self.fetch(MatchMode::Full, query, limit).await
    }
}
