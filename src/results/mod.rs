//! Result types and the rank merger
//!
//! Defines the uniform display record, the element-depth payloads and the
//! merge step that orders candidates from several entity kinds.

mod merge;
mod types;

pub use merge::RankMerger;
pub use types::*;
