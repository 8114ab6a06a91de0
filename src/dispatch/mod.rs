//! Dispatcher: the top-level search contract
//!
//! Validates a request, resolves its scope, picks the behaviour for its
//! depth, runs the matching strategy and presents the merged candidates.
//! Element depth bypasses presentation and returns anime or manga payloads.

use crate::entities::{Candidate, Entity, EntityKind};
use crate::error::SearchError;
use crate::images::ImageResolver;
use crate::metrics::Metrics;
use crate::presenters::{present_all, ViewerContext};
use crate::results::{AnimeElement, DisplayRecord, MangaElement};
use crate::search::{Depth, Scope, Search, SearchRequest};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Payload of a successful search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    /// Generic display records (instant and full depth)
    Records(Vec<DisplayRecord>),
    /// Element-depth anime payload
    Anime(Vec<AnimeElement>),
    /// Element-depth manga payload
    Manga(Vec<MangaElement>),
}

impl SearchResponse {
    pub fn len(&self) -> usize {
        match self {
            Self::Records(records) => records.len(),
            Self::Anime(elements) => elements.len(),
            Self::Manga(elements) => elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level search dispatcher
pub struct Dispatcher {
    search: Arc<Search>,
    images: Arc<dyn ImageResolver>,
    /// Style requested for instant-depth images
    instant_image_variant: String,
    /// Whether the reserved characters scope may be searched
    character_scope_enabled: bool,
}

impl Dispatcher {
    pub fn new(search: Arc<Search>, images: Arc<dyn ImageResolver>) -> Self {
        Self {
            search,
            images,
            instant_image_variant: "small".to_string(),
            character_scope_enabled: false,
        }
    }

    /// Set the image style used for instant-depth results
    pub fn with_instant_image_variant(mut self, variant: impl Into<String>) -> Self {
        self.instant_image_variant = variant.into();
        self
    }

    /// Allow or forbid the reserved characters scope
    pub fn with_character_scope(mut self, enabled: bool) -> Self {
        self.character_scope_enabled = enabled;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        self.search.metrics()
    }

    /// Handle one search request
    pub async fn dispatch(
        &self,
        request: &SearchRequest,
        viewer: &ViewerContext,
    ) -> Result<SearchResponse, SearchError> {
        self.metrics().inc_search();

        let result = self.run(request, viewer).await;
        if let Err(SearchError::NoResults) = result {
            self.metrics().inc_empty();
        }
        result
    }

    async fn run(
        &self,
        request: &SearchRequest,
        viewer: &ViewerContext,
    ) -> Result<SearchResponse, SearchError> {
        let request = request.normalize()?;
        let scope = self.resolve_scope(&request.scope)?;
        let depth: Depth = request.depth.parse()?;

        debug!("Dispatching {} search in scope {}", depth, scope);

        if depth == Depth::Element {
            return self.element_search(scope, &request.query).await;
        }

        let candidates = self
            .search
            .execute(depth.match_mode(), scope.entity_kinds(), &request.query)
            .await?;

        let mut records = present_all(&candidates, viewer);
        self.post_process(depth, &mut records);

        if records.is_empty() {
            return Err(SearchError::NoResults);
        }

        Ok(SearchResponse::Records(records))
    }

    fn resolve_scope(&self, scope_id: &str) -> Result<Scope, SearchError> {
        let scope: Scope = scope_id.parse()?;
        if scope == Scope::Characters && !self.character_scope_enabled {
            return Err(SearchError::InvalidScope(scope_id.to_string()));
        }
        Ok(scope)
    }

    /// Depth-specific rewriting of presented records
    fn post_process(&self, depth: Depth, records: &mut [DisplayRecord]) {
        match depth {
            Depth::Instant => {
                for record in records.iter_mut() {
                    record.image = record
                        .image
                        .take()
                        .map(|image| {
                            self.images
                                .resolve_variant(&image, &self.instant_image_variant)
                        });
                }
            }
            Depth::Full | Depth::Element => {}
        }
    }

    /// Instant search restricted to anime or manga, in the element schema
    pub async fn element_search(
        &self,
        scope: Scope,
        query: &str,
    ) -> Result<SearchResponse, SearchError> {
        match scope {
            Scope::Anime => {
                let candidates = self.search.instant_search(&[EntityKind::Anime], query).await?;
                Ok(SearchResponse::Anime(anime_elements(&candidates)))
            }
            Scope::Manga => {
                let candidates = self.search.instant_search(&[EntityKind::Manga], query).await?;
                Ok(SearchResponse::Manga(manga_elements(&candidates)))
            }
            Scope::All | Scope::Groups | Scope::Users | Scope::Characters => {
                Err(SearchError::InvalidScope(scope.to_string()))
            }
        }
    }
}

fn anime_elements(candidates: &[Candidate]) -> Vec<AnimeElement> {
    candidates
        .iter()
        .filter_map(|c| match &c.entity {
            Entity::Anime(anime) => Some(AnimeElement::from(anime)),
            _ => None,
        })
        .collect()
}

fn manga_elements(candidates: &[Candidate]) -> Vec<MangaElement> {
    candidates
        .iter()
        .filter_map(|c| match &c.entity {
            Entity::Manga(manga) => Some(MangaElement::from(manga)),
            _ => None,
        })
        .collect()
}
