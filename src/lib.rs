//! Catalog Search: a federated search dispatcher for anime, manga,
//! groups, users and characters
//!
//! A request names a free-text query, a scope (which entity kinds to look
//! at) and a depth (how hard to look and how to shape the answer). The
//! dispatcher fans the query out to one source per entity kind, merges the
//! ranked candidates and renders them as uniform display records.

pub mod config;
pub mod dispatch;
pub mod entities;
pub mod error;
pub mod images;
pub mod metrics;
pub mod network;
pub mod presenters;
pub mod query;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use dispatch::{Dispatcher, SearchResponse};
pub use error::{SearchError, SourceError};
pub use results::DisplayRecord;
pub use search::{Search, SearchRequest};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for source requests in seconds
pub const DEFAULT_TIMEOUT: f64 = 2.0;

/// Maximum timeout that can be set
pub const MAX_TIMEOUT: f64 = 10.0;

/// Candidates kept per entity kind before merging
pub const DEFAULT_PER_TYPE_LIMIT: usize = 3;
