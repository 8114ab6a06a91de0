//! Query cleaning
//!
//! Strips stop terms (by default "season", in any letter case) from a query
//! before it reaches any entity source. The pattern is compiled once and
//! never changes afterwards.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Stop terms applied when none are configured
pub const DEFAULT_STOP_TERMS: &[&str] = &["season"];

static DEFAULT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)season").expect("default stop-term pattern is valid"));

/// Compiled stop-term filter
#[derive(Debug, Clone)]
pub struct StopTerms {
    pattern: Option<Regex>,
}

impl StopTerms {
    /// Build a filter from literal terms, matched case-insensitively
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Remove every stop term occurrence; surrounding whitespace is kept
    pub fn strip<'a>(&self, query: &'a str) -> Cow<'a, str> {
        match self.pattern {
            Some(ref pattern) => pattern.replace_all(query, ""),
            None => Cow::Borrowed(query),
        }
    }

    /// Whether the filter removes anything at all
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }
}

impl Default for StopTerms {
    fn default() -> Self {
        Self {
            pattern: Some(DEFAULT_PATTERN.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_season() {
        let terms = StopTerms::default();
        assert_eq!(terms.strip("Attack on Titan Season 3"), "Attack on Titan  3");
        assert_eq!(terms.strip("SEASON two"), " two");
        assert_eq!(terms.strip("naruto"), "naruto");
    }

    #[test]
    fn test_default_matches_configured_default() {
        let configured = StopTerms::new(DEFAULT_STOP_TERMS).unwrap();
        let query = "Haikyuu!! 2nd Season";
        assert_eq!(configured.strip(query), StopTerms::default().strip(query));
    }

    #[test]
    fn test_custom_terms_are_literal() {
        let terms = StopTerms::new(&["part", "a.b"]).unwrap();
        assert_eq!(terms.strip("JoJo Part 4"), "JoJo  4");
        assert_eq!(terms.strip("a.b axb"), " axb");
    }

    #[test]
    fn test_empty_terms() {
        let terms = StopTerms::new::<&str>(&["", "  "]).unwrap();
        assert!(terms.is_empty());
        assert_eq!(terms.strip("Season"), "Season");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let terms = StopTerms::default();
        let once = terms.strip("Season Seasons season").into_owned();
        assert_eq!(terms.strip(&once), once);
    }
}
