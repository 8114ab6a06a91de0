//! Scripted entity source for unit tests

use super::traits::{EntitySource, MatchMode};
use super::types::{Anime, Candidate, Character, EntityKind, Group, Manga, User};
use crate::error::SourceError;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Source returning fixed candidates and recording every call
pub struct ScriptedSource {
    kind: EntityKind,
    instant: Vec<Candidate>,
    full: Vec<Candidate>,
    delay: Option<Duration>,
    failure: Option<SourceError>,
    calls: Mutex<Vec<(MatchMode, String)>>,
}

impl ScriptedSource {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            instant: vec![],
            full: vec![],
            delay: None,
            failure: None,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn instant(mut self, candidates: Vec<Candidate>) -> Self {
        self.instant = candidates;
        self
    }

    pub fn full(mut self, candidates: Vec<Candidate>) -> Self {
        self.full = candidates;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(mut self, error: SourceError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<(MatchMode, String)> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(&self, mode: MatchMode, query: &str) -> Result<Vec<Candidate>, SourceError> {
        self.calls.lock().unwrap().push((mode, query.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(ref error) = self.failure {
            return Err(error.clone());
        }
        Ok(match mode {
            MatchMode::Instant => self.instant.clone(),
            MatchMode::Full => self.full.clone(),
        })
    }
}

#[async_trait]
impl EntitySource for ScriptedSource {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    async fn instant_candidates(
        &self,
        query: &str,
        _limit: usize,
    ) -> Result<Vec<Candidate>, SourceError> {
        self.respond(MatchMode::Instant, query).await
    }

    async fn full_candidates(
        &self,
        query: &str,
        _limit: usize,
    ) -> Result<Vec<Candidate>, SourceError> {
        self.respond(MatchMode::Full, query).await
    }
}

pub fn anime(id: u64, title: &str, rank: f64) -> Candidate {
    Candidate::new(
        Anime {
            id,
            slug: title.to_lowercase().replace(' ', "-"),
            canonical_title: title.to_string(),
            synopsis: Some(format!("Synopsis of {}", title)),
            poster_image: Some(format!(
                "https://static.example.com/anime/poster_images/000/000/{:03}/original/poster.jpg?1400000000",
                id
            )),
            episode_count: Some(26),
            episode_length: Some(24),
            show_type: Some("TV".to_string()),
            age_rating: Some("PG-13".to_string()),
            ..Default::default()
        },
        rank,
    )
}

pub fn manga(id: u64, title: &str, rank: f64) -> Candidate {
    Candidate::new(
        Manga {
            id,
            slug: title.to_lowercase().replace(' ', "-"),
            canonical_title: title.to_string(),
            poster_image: Some(format!(
                "https://static.example.com/manga/poster_images/000/000/{:03}/original/cover.jpg",
                id
            )),
            volume_count: Some(41),
            ..Default::default()
        },
        rank,
    )
}

pub fn group(id: u64, name: &str, rank: f64) -> Candidate {
    Candidate::new(
        Group {
            id,
            slug: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            ..Default::default()
        },
        rank,
    )
}

pub fn user(id: u64, name: &str, rank: f64) -> Candidate {
    Candidate::new(
        User {
            id,
            name: name.to_string(),
            ..Default::default()
        },
        rank,
    )
}

pub fn character(id: u64, name: &str, rank: f64) -> Candidate {
    Candidate::new(
        Character {
            id,
            name: name.to_string(),
            ..Default::default()
        },
        rank,
    )
}
