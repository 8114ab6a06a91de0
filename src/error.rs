//! Error types for the search dispatcher
//!
//! Client-input and query-outcome conditions are kept apart from
//! collaborator faults so an outage never reads as "no results".

use crate::entities::EntityKind;

/// Failure of an entity source (the ranking backend or a local catalog)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The request to the backend could not be completed
    #[error("backend request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status
    #[error("backend returned HTTP {0}")]
    Status(u16),

    /// The backend answered with a body we could not decode
    #[error("failed to decode backend response: {0}")]
    Decode(String),

    /// A local catalog could not be read or parsed
    #[error("catalog error: {0}")]
    Catalog(String),
}

/// Errors surfaced by the dispatcher
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// A required request parameter was absent or blank
    #[error("param is missing or the value is empty: {0}")]
    MissingParameter(&'static str),

    /// The scope identifier is not one we search
    #[error("Invalid scope")]
    InvalidScope(String),

    /// The depth identifier is not one of instant, full or element
    #[error("Invalid depth")]
    InvalidDepth(String),

    /// The search completed but nothing matched
    #[error("No results")]
    NoResults,

    /// An entity source failed while fetching candidates
    #[error("search backend unavailable for {kind}: {source}")]
    SearchBackendUnavailable {
        kind: EntityKind,
        #[source]
        source: SourceError,
    },
}

impl SearchError {
    /// HTTP-equivalent status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingParameter(_) | Self::InvalidScope(_) | Self::InvalidDepth(_) => 422,
            Self::NoResults => 404,
            Self::SearchBackendUnavailable { .. } => 503,
        }
    }

    /// Whether this error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter(_) | Self::InvalidScope(_) | Self::InvalidDepth(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SearchError::MissingParameter("query").status_code(), 422);
        assert_eq!(SearchError::InvalidScope("books".into()).status_code(), 422);
        assert_eq!(SearchError::InvalidDepth("deep".into()).status_code(), 422);
        assert_eq!(SearchError::NoResults.status_code(), 404);

        let outage = SearchError::SearchBackendUnavailable {
            kind: EntityKind::Anime,
            source: SourceError::Status(500),
        };
        assert_eq!(outage.status_code(), 503);
        assert!(!outage.is_client_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            SearchError::MissingParameter("query").to_string(),
            "param is missing or the value is empty: query"
        );
        assert_eq!(SearchError::InvalidScope("x".into()).to_string(), "Invalid scope");
        assert_eq!(SearchError::NoResults.to_string(), "No results");

        let outage = SearchError::SearchBackendUnavailable {
            kind: EntityKind::Manga,
            source: SourceError::Request("connection refused".into()),
        };
        assert_eq!(
            outage.to_string(),
            "search backend unavailable for manga: backend request failed: connection refused"
        );
    }
}
