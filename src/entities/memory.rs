//! In-process catalog source
//!
//! Stands in for the ranking backend when running standalone or under test.
//! Ranking is deliberately simple: the fraction of query tokens that match.

use super::traits::EntitySource;
use super::types::{Anime, Candidate, Character, Entity, EntityKind, Group, Manga, User};
use crate::error::SourceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A catalog of entities, as stored in a YAML catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub anime: Vec<Anime>,
    pub manga: Vec<Manga>,
    pub characters: Vec<Character>,
    pub groups: Vec<Group>,
    pub users: Vec<User>,
}

impl Catalog {
    /// Load a catalog from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SourceError::Catalog(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Parse a catalog from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, SourceError> {
        serde_yaml::from_str(content).map_err(|e| SourceError::Catalog(e.to_string()))
    }

    /// All entities of one kind
    pub fn entities(&self, kind: EntityKind) -> Vec<Entity> {
        match kind {
            EntityKind::Anime => self.anime.iter().cloned().map(Entity::from).collect(),
            EntityKind::Manga => self.manga.iter().cloned().map(Entity::from).collect(),
            EntityKind::Character => self.characters.iter().cloned().map(Entity::from).collect(),
            EntityKind::Group => self.groups.iter().cloned().map(Entity::from).collect(),
            EntityKind::User => self.users.iter().cloned().map(Entity::from).collect(),
        }
    }
}

/// Entity source backed by an in-memory list
pub struct MemorySource {
    kind: EntityKind,
    entities: Vec<Entity>,
}

impl MemorySource {
    /// Create a source over the given entities; entities of other kinds are ignored
    pub fn new(kind: EntityKind, entities: Vec<Entity>) -> Self {
        let entities = entities.into_iter().filter(|e| e.kind() == kind).collect();
        Self { kind, entities }
    }

    /// Create a source over one kind of a catalog
    pub fn from_catalog(kind: EntityKind, catalog: &Catalog) -> Self {
        Self::new(kind, catalog.entities(kind))
    }

    /// Number of entities held
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn rank_all<F>(&self, query: &str, limit: usize, score: F) -> Vec<Candidate>
    where
        F: Fn(&[String], &Entity) -> f64,
    {
        let terms = tokenize(query);
        if terms.is_empty() {
            return vec![];
        }

        let mut candidates: Vec<Candidate> = self
            .entities
            .iter()
            .filter_map(|entity| {
                let rank = score(&terms, entity);
                (rank > 0.0).then(|| Candidate::new(entity.clone(), rank))
            })
            .collect();

        candidates.sort_by(|a, b| b.rank.total_cmp(&a.rank));
        candidates.truncate(limit);
        candidates
    }
}

#[async_trait]
impl EntitySource for MemorySource {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    async fn instant_candidates(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Candidate>, SourceError> {
        Ok(self.rank_all(query, limit, instant_score))
    }

    async fn full_candidates(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Candidate>, SourceError> {
        Ok(self.rank_all(query, limit, full_score))
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Every query term must prefix some title word; shorter titles rank higher
fn instant_score(terms: &[String], entity: &Entity) -> f64 {
    entity
        .titles()
        .into_iter()
        .map(|title| {
            let words = tokenize(title);
            let all_match = terms
                .iter()
                .all(|term| words.iter().any(|word| word.starts_with(term.as_str())));
            if all_match && !words.is_empty() {
                terms.len().min(words.len()) as f64 / words.len() as f64
            } else {
                0.0
            }
        })
        .fold(0.0, f64::max)
}

/// Fraction of query terms found anywhere in titles or description
fn full_score(terms: &[String], entity: &Entity) -> f64 {
    let mut haystack = entity.titles().join(" ").to_lowercase();
    if let Some(description) = entity.description() {
        haystack.push(' ');
        haystack.push_str(&description.to_lowercase());
    }

    let found = terms
        .iter()
        .filter(|term| haystack.contains(term.as_str()))
        .count();
    found as f64 / terms.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    const CATALOG: &str = r#"
anime:
  - id: 1
    slug: naruto
    canonical_title: Naruto
    synopsis: A young ninja seeks recognition.
  - id: 2
    slug: naruto-shippuden
    canonical_title: "Naruto: Shippuuden"
    english_title: "Naruto Shippuden"
  - id: 3
    slug: boruto
    canonical_title: Boruto
    synopsis: The son of Naruto grows up.
manga:
  - id: 10
    slug: berserk
    canonical_title: Berserk
    volume_count: 41
"#;

    fn anime_source() -> MemorySource {
        let catalog = Catalog::from_yaml(CATALOG).unwrap();
        MemorySource::from_catalog(EntityKind::Anime, &catalog)
    }

    #[test]
    fn test_catalog_parse() {
        let catalog = Catalog::from_yaml(CATALOG).unwrap();
        assert_eq!(catalog.anime.len(), 3);
        assert_eq!(catalog.manga[0].volume_count, Some(41));
        assert!(catalog.users.is_empty());
        assert!(Catalog::from_yaml("anime: 12").is_err());
    }

    #[test]
    fn test_instant_prefix_match() {
        let source = anime_source();
        let results = block_on(source.instant_candidates("naru", 10)).unwrap();

        assert_eq!(results.len(), 2);
        // "Naruto" is a one-word title and ranks above the two-word sequel
        assert_eq!(results[0].rank, 1.0);
        assert!(results[0].rank > results[1].rank);
        assert!(block_on(source.instant_candidates("ninja", 10)).unwrap().is_empty());
    }

    #[test]
    fn test_full_matches_description() {
        let source = anime_source();
        let results = block_on(source.full_candidates("naruto", 10)).unwrap();
        assert_eq!(results.len(), 3);

        let ninja = block_on(source.full_candidates("ninja", 10)).unwrap();
        assert_eq!(ninja.len(), 1);
    }

    #[test]
    fn test_limit_and_empty_query() {
        let source = anime_source();
        assert_eq!(block_on(source.full_candidates("naruto", 1)).unwrap().len(), 1);
        assert!(block_on(source.full_candidates("   ", 10)).unwrap().is_empty());
    }

    #[test]
    fn test_ignores_other_kinds() {
        let catalog = Catalog::from_yaml(CATALOG).unwrap();
        let mut entities = catalog.entities(EntityKind::Anime);
        entities.extend(catalog.entities(EntityKind::Manga));

        let source = MemorySource::new(EntityKind::Manga, entities);
        assert_eq!(source.len(), 1);
    }
}
