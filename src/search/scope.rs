//! Search scopes and the entity kinds they cover

use crate::entities::EntityKind;
use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A requested search scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    All,
    Anime,
    Manga,
    Groups,
    Users,
    /// Reserved; the dispatcher rejects it unless explicitly enabled
    Characters,
}

impl Scope {
    pub const ALL: [Scope; 6] = [
        Scope::All,
        Scope::Anime,
        Scope::Manga,
        Scope::Groups,
        Scope::Users,
        Scope::Characters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Anime => "anime",
            Self::Manga => "manga",
            Self::Groups => "groups",
            Self::Users => "users",
            Self::Characters => "characters",
        }
    }

    /// Entity kinds searched for this scope, in priority order
    pub fn entity_kinds(&self) -> &'static [EntityKind] {
        match self {
            Self::All => &[
                EntityKind::Anime,
                EntityKind::Manga,
                EntityKind::Group,
                EntityKind::User,
            ],
            Self::Anime => &[EntityKind::Anime],
            Self::Manga => &[EntityKind::Manga],
            Self::Groups => &[EntityKind::Group],
            Self::Users => &[EntityKind::User],
            Self::Characters => &[EntityKind::Character],
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| SearchError::InvalidScope(s.to_string()))
    }
}

/// Resolve a scope identifier to the entity kinds it covers
pub fn resolve(scope_id: &str) -> Result<&'static [EntityKind], SearchError> {
    Ok(scope_id.parse::<Scope>()?.entity_kinds())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_all() {
        assert_eq!(
            resolve("all").unwrap(),
            &[
                EntityKind::Anime,
                EntityKind::Manga,
                EntityKind::Group,
                EntityKind::User
            ]
        );
    }

    #[test]
    fn test_resolve_single_kinds() {
        assert_eq!(resolve("anime").unwrap(), &[EntityKind::Anime]);
        assert_eq!(resolve("manga").unwrap(), &[EntityKind::Manga]);
        assert_eq!(resolve("groups").unwrap(), &[EntityKind::Group]);
        assert_eq!(resolve("users").unwrap(), &[EntityKind::User]);
        assert_eq!(resolve("characters").unwrap(), &[EntityKind::Character]);
    }

    #[test]
    fn test_resolve_invalid() {
        assert_eq!(
            resolve("books").unwrap_err(),
            SearchError::InvalidScope("books".to_string())
        );
        // Identifiers are exact; no case folding or singular forms
        assert!(resolve("Anime").is_err());
        assert!(resolve("group").is_err());
    }

    #[test]
    fn test_round_trip_names() {
        for scope in Scope::ALL {
            assert_eq!(scope.as_str().parse::<Scope>().unwrap(), scope);
        }
    }
}
