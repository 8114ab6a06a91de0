//! Presenters turning candidates into display records
//!
//! Every entity variant maps to exactly one presenter function; adding a
//! variant to [`Entity`] fails to compile until it gets a presenter here.

use crate::entities::{Anime, Candidate, Character, Entity, EntityKind, Group, Manga, User};
use crate::results::{Badge, DisplayRecord};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Separator used inside badge text
const BULLET: &str = "\u{2022}";

/// Title language a viewer prefers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleLanguage {
    #[default]
    Canonical,
    English,
    Romanized,
}

impl FromStr for TitleLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "canonical" => Ok(Self::Canonical),
            "english" => Ok(Self::English),
            "romanized" | "romaji" => Ok(Self::Romanized),
            other => Err(format!("unknown title language: {}", other)),
        }
    }
}

/// Request-scoped information about who is searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerContext {
    pub title_language: TitleLanguage,
}

impl ViewerContext {
    pub fn new(title_language: TitleLanguage) -> Self {
        Self { title_language }
    }

    /// Context for a signed-out visitor
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Present a candidate as a display record
pub fn present(candidate: &Candidate, viewer: &ViewerContext) -> DisplayRecord {
    let rank = candidate.rank;
    match &candidate.entity {
        Entity::Anime(anime) => present_anime(anime, rank, viewer),
        Entity::Manga(manga) => present_manga(manga, rank),
        Entity::Character(character) => present_character(character, rank),
        Entity::Group(group) => present_group(group, rank),
        Entity::User(user) => present_user(user, rank),
    }
}

/// Present every candidate, keeping their order
pub fn present_all(candidates: &[Candidate], viewer: &ViewerContext) -> Vec<DisplayRecord> {
    candidates.iter().map(|c| present(c, viewer)).collect()
}

fn present_anime(anime: &Anime, rank: f64, viewer: &ViewerContext) -> DisplayRecord {
    DisplayRecord {
        kind: EntityKind::Anime,
        title: anime.localized_title(viewer.title_language).to_string(),
        desc: anime.synopsis.clone(),
        image: anime.poster_image.clone(),
        link: anime.slug.clone(),
        rank,
        badges: vec![
            Badge::new("anime", "Anime"),
            Badge::new(
                "episodes",
                format!(
                    "{}ep {} {}min",
                    or_blank(anime.episode_count),
                    BULLET,
                    or_blank(anime.episode_length)
                ),
            ),
            Badge::new(
                "episodes",
                format!(
                    "{} {} {}",
                    or_blank(anime.show_type.as_deref()),
                    BULLET,
                    or_blank(anime.age_rating.as_deref())
                ),
            ),
        ],
    }
}

fn present_manga(manga: &Manga, rank: f64) -> DisplayRecord {
    DisplayRecord {
        kind: EntityKind::Manga,
        title: manga.canonical_title.clone(),
        desc: manga.synopsis.clone(),
        image: manga.poster_image.clone(),
        link: manga.slug.clone(),
        rank,
        badges: vec![
            Badge::new("manga", "Manga"),
            Badge::new(
                "episodes",
                format!(
                    "{}vol {} {}chap",
                    or_unknown(manga.volume_count),
                    BULLET,
                    or_unknown(manga.chapter_count)
                ),
            ),
        ],
    }
}

fn present_character(character: &Character, rank: f64) -> DisplayRecord {
    DisplayRecord {
        kind: EntityKind::Character,
        title: character.name.clone(),
        desc: character.description.clone(),
        image: character.image.clone(),
        link: character.id.to_string(),
        rank,
        badges: vec![Badge::new("character", "Character")],
    }
}

fn present_group(group: &Group, rank: f64) -> DisplayRecord {
    DisplayRecord {
        kind: EntityKind::Group,
        title: group.name.clone(),
        desc: group.bio.clone(),
        image: group.avatar.clone(),
        link: group.slug.clone(),
        rank,
        badges: vec![Badge::new("group", "Group")],
    }
}

fn present_user(user: &User, rank: f64) -> DisplayRecord {
    DisplayRecord {
        kind: EntityKind::User,
        title: user.name.clone(),
        desc: user.bio.clone(),
        image: user.avatar.clone(),
        link: user.name.clone(),
        rank,
        badges: vec![Badge::new("user", "User")],
    }
}

fn or_blank<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn or_unknown<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
}
