//! Entity variants and ranked candidates

use crate::presenters::TitleLanguage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of entity a search can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Anime,
    Manga,
    Character,
    Group,
    User,
}

impl EntityKind {
    /// Every kind, in priority order
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Anime,
        EntityKind::Manga,
        EntityKind::Character,
        EntityKind::Group,
        EntityKind::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
            Self::Character => "character",
            Self::Group => "group",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anime" => Ok(Self::Anime),
            "manga" => Ok(Self::Manga),
            "character" => Ok(Self::Character),
            "group" => Ok(Self::Group),
            "user" => Ok(Self::User),
            other => Err(format!("unknown entity kind: {}", other)),
        }
    }
}

/// An anime series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub id: u64,
    pub slug: String,
    pub canonical_title: String,
    #[serde(default)]
    pub english_title: Option<String>,
    #[serde(default)]
    pub romaji_title: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    /// Poster attachment URL (original style)
    #[serde(default)]
    pub poster_image: Option<String>,
    #[serde(default)]
    pub episode_count: Option<u32>,
    /// Episode length in minutes
    #[serde(default)]
    pub episode_length: Option<u32>,
    #[serde(default)]
    pub show_type: Option<String>,
    #[serde(default)]
    pub age_rating: Option<String>,
}

impl Anime {
    /// Title as the viewer prefers to read it
    pub fn localized_title(&self, preference: TitleLanguage) -> &str {
        let romaji = non_empty(&self.romaji_title);
        match preference {
            TitleLanguage::Canonical => self.canonical_title.as_str(),
            TitleLanguage::English => non_empty(&self.english_title)
                .or(romaji)
                .unwrap_or(self.canonical_title.as_str()),
            TitleLanguage::Romanized => romaji.unwrap_or(self.canonical_title.as_str()),
        }
    }
}

/// A manga series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manga {
    pub id: u64,
    pub slug: String,
    pub canonical_title: String,
    #[serde(default)]
    pub english_title: Option<String>,
    #[serde(default)]
    pub romaji_title: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub poster_image: Option<String>,
    #[serde(default)]
    pub volume_count: Option<u32>,
    #[serde(default)]
    pub chapter_count: Option<u32>,
    #[serde(default)]
    pub manga_type: Option<String>,
}

/// A character appearing in anime or manga
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A user group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A registered user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    /// Display name, also used as the profile link
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// One matched entity of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Anime(Anime),
    Manga(Manga),
    Character(Character),
    Group(Group),
    User(User),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Anime(_) => EntityKind::Anime,
            Self::Manga(_) => EntityKind::Manga,
            Self::Character(_) => EntityKind::Character,
            Self::Group(_) => EntityKind::Group,
            Self::User(_) => EntityKind::User,
        }
    }

    /// Every title-like string the entity can be matched by
    pub fn titles(&self) -> Vec<&str> {
        match self {
            Self::Anime(a) => titles_of(&a.canonical_title, &a.english_title, &a.romaji_title),
            Self::Manga(m) => titles_of(&m.canonical_title, &m.english_title, &m.romaji_title),
            Self::Character(c) => vec![c.name.as_str()],
            Self::Group(g) => vec![g.name.as_str()],
            Self::User(u) => vec![u.name.as_str()],
        }
    }

    /// Long-form text of the entity, if any
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Anime(a) => a.synopsis.as_deref(),
            Self::Manga(m) => m.synopsis.as_deref(),
            Self::Character(c) => c.description.as_deref(),
            Self::Group(g) => g.bio.as_deref(),
            Self::User(u) => u.bio.as_deref(),
        }
    }
}

impl From<Anime> for Entity {
    fn from(value: Anime) -> Self {
        Self::Anime(value)
    }
}

impl From<Manga> for Entity {
    fn from(value: Manga) -> Self {
        Self::Manga(value)
    }
}

impl From<Character> for Entity {
    fn from(value: Character) -> Self {
        Self::Character(value)
    }
}

impl From<Group> for Entity {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}

impl From<User> for Entity {
    fn from(value: User) -> Self {
        Self::User(value)
    }
}

/// An entity together with its relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub rank: f64,
}

impl Candidate {
    pub fn new(entity: impl Into<Entity>, rank: f64) -> Self {
        Self {
            entity: entity.into(),
            rank,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.entity.kind()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn titles_of<'a>(
    canonical: &'a str,
    english: &'a Option<String>,
    romaji: &'a Option<String>,
) -> Vec<&'a str> {
    let mut titles = vec![canonical];
    titles.extend(non_empty(english));
    titles.extend(non_empty(romaji));
    titles
}
