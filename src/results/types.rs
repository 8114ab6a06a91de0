//! Result type definitions

use crate::entities::{Anime, EntityKind, Manga};
use serde::{Deserialize, Serialize};

/// A badge shown next to a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// CSS-like class of the badge
    pub class: String,
    /// Badge text
    pub content: String,
}

impl Badge {
    pub fn new(class: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            content: content.into(),
        }
    }
}

/// Uniform, presentation-ready search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRecord {
    /// Entity kind tag
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub title: String,
    pub desc: Option<String>,
    /// Image URL
    pub image: Option<String>,
    /// Token the client builds the entity link from
    pub link: String,
    pub rank: f64,
    pub badges: Vec<Badge>,
}

/// Element-depth anime payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeElement {
    pub id: u64,
    pub slug: String,
    pub canonical_title: String,
    pub english_title: Option<String>,
    pub romaji_title: Option<String>,
    pub synopsis: Option<String>,
    pub poster_image: Option<String>,
    pub episode_count: Option<u32>,
    pub episode_length: Option<u32>,
    pub show_type: Option<String>,
    pub age_rating: Option<String>,
}

impl From<&Anime> for AnimeElement {
    fn from(anime: &Anime) -> Self {
        Self {
            id: anime.id,
            slug: anime.slug.clone(),
            canonical_title: anime.canonical_title.clone(),
            english_title: anime.english_title.clone(),
            romaji_title: anime.romaji_title.clone(),
            synopsis: anime.synopsis.clone(),
            poster_image: anime.poster_image.clone(),
            episode_count: anime.episode_count,
            episode_length: anime.episode_length,
            show_type: anime.show_type.clone(),
            age_rating: anime.age_rating.clone(),
        }
    }
}

/// Element-depth manga payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MangaElement {
    pub id: u64,
    pub slug: String,
    pub canonical_title: String,
    pub english_title: Option<String>,
    pub romaji_title: Option<String>,
    pub synopsis: Option<String>,
    pub poster_image: Option<String>,
    pub volume_count: Option<u32>,
    pub chapter_count: Option<u32>,
    pub manga_type: Option<String>,
}

impl From<&Manga> for MangaElement {
    fn from(manga: &Manga) -> Self {
        Self {
            id: manga.id,
            slug: manga.slug.clone(),
            canonical_title: manga.canonical_title.clone(),
            english_title: manga.english_title.clone(),
            romaji_title: manga.romaji_title.clone(),
            synopsis: manga.synopsis.clone(),
            poster_image: manga.poster_image.clone(),
            volume_count: manga.volume_count,
            chapter_count: manga.chapter_count,
            manga_type: manga.manga_type.clone(),
        }
    }
}
