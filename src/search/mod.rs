//! Search orchestration module
//!
//! Resolves scopes to entity kinds and runs the instant and full match
//! strategies across the sources of those kinds.

mod executor;
mod models;
pub mod scope;

pub use executor::Search;
pub use models::*;
pub use scope::Scope;
