//! Entity module
//!
//! Defines the entity variants, the `EntitySource` capability trait and a
//! registry mapping each entity kind to its source.

mod http;
mod loader;
mod memory;
mod registry;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpSource;
pub use loader::SourceLoader;
pub use memory::{Catalog, MemorySource};
pub use registry::EntityRegistry;
pub use traits::*;
pub use types::*;
