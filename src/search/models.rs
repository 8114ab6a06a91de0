//! Search request and related data models

use crate::entities::MatchMode;
use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Requested search depth, selecting strategy and output shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    /// Fast match with fallback to full; small images
    Instant,
    /// Exhaustive match
    Full,
    /// Narrow anime/manga serialization for embedded widgets
    Element,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Full => "full",
            Self::Element => "element",
        }
    }

    /// Match strategy backing this depth
    pub fn match_mode(&self) -> MatchMode {
        match self {
            Self::Instant | Self::Element => MatchMode::Instant,
            Self::Full => MatchMode::Full,
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Depth {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instant" => Ok(Self::Instant),
            "full" => Ok(Self::Full),
            "element" => Ok(Self::Element),
            other => Err(SearchError::InvalidDepth(other.to_string())),
        }
    }
}

/// Raw search parameters as supplied by a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub query: Option<String>,
    /// Scope identifier
    pub scope: Option<String>,
    /// Depth identifier
    pub depth: Option<String>,
    /// Legacy `type` parameter; only `"full"` is meaningful
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Request after validation of presence, with scope and depth still unparsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub query: String,
    pub scope: String,
    pub depth: String,
}

impl SearchRequest {
    /// Scope and depth forced by the legacy `type=full` parameter.
    ///
    /// Older clients send `type=full` without scope or depth and expect an
    /// instant search across every scope.
    pub const LEGACY_FULL_OVERRIDE: (&'static str, &'static str) = ("all", "instant");

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_depth(mut self, depth: impl Into<String>) -> Self {
        self.depth = Some(depth.into());
        self
    }

    /// Mark as a legacy `type=full` request
    pub fn legacy_full(mut self) -> Self {
        self.kind = Some("full".to_string());
        self
    }

    /// Compatibility shim: the canonical (scope, depth) pair for legacy callers
    pub fn legacy_override(&self) -> Option<(&'static str, &'static str)> {
        (self.kind.as_deref() == Some("full")).then_some(Self::LEGACY_FULL_OVERRIDE)
    }

    /// Check required parameters and apply the legacy override
    pub fn normalize(&self) -> Result<NormalizedRequest, SearchError> {
        let query = required(&self.query, "query")?;

        let (scope, depth) = match self.legacy_override() {
            Some((scope, depth)) => (scope.to_string(), depth.to_string()),
            None => (
                required(&self.scope, "scope")?.to_string(),
                required(&self.depth, "depth")?.to_string(),
            ),
        };

        Ok(NormalizedRequest {
            query: query.to_string(),
            scope,
            depth,
        })
    }
}

/// A parameter is present only if it is non-blank
fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, SearchError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(SearchError::MissingParameter(name))
}
