//! Source loader for building the entity registry from configuration

use super::http::HttpSource;
use super::memory::{Catalog, MemorySource};
use super::registry::EntityRegistry;
use super::traits::EntitySource;
use crate::config::{Settings, SourceConfig};
use crate::network::HttpClient;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing entity sources from configuration
pub struct SourceLoader;

impl SourceLoader {
    /// Load all sources from settings
    pub fn load(settings: &Settings, client: &HttpClient) -> Result<EntityRegistry> {
        let mut registry = EntityRegistry::new();
        let mut catalogs: HashMap<PathBuf, Catalog> = HashMap::new();

        let enabled = settings.enabled_sources();
        let disabled = settings.sources.len() - enabled.len();
        if disabled > 0 {
            info!("Skipping {} disabled sources", disabled);
        }

        for config in enabled {
            match Self::create_source(config, client, &mut catalogs) {
                Ok(source) => {
                    info!("Loaded source: {} ({})", config.kind, config.backend);
                    registry.register(source, config.clone());
                }
                Err(e) => {
                    warn!("Failed to load source {}: {}", config.kind, e);
                }
            }
        }

        info!("Loaded {} sources", registry.len());
        Ok(registry)
    }

    /// Create a source instance for a config
    fn create_source(
        config: &SourceConfig,
        client: &HttpClient,
        catalogs: &mut HashMap<PathBuf, Catalog>,
    ) -> Result<Arc<dyn EntitySource>> {
        match config.backend.as_str() {
            "http" => {
                let url = config
                    .url
                    .as_deref()
                    .ok_or_else(|| anyhow!("http source requires a url"))?;
                let mut source = HttpSource::new(config.kind, url, client.clone());
                if let Some(timeout) = config.timeout {
                    source = source.with_timeout(timeout);
                }
                Ok(Arc::new(source))
            }
            "memory" => {
                let catalog = match config.catalog {
                    Some(ref path) => {
                        if !catalogs.contains_key(path) {
                            catalogs.insert(path.clone(), Catalog::from_file(path)?);
                        }
                        catalogs.get(path).cloned().unwrap_or_default()
                    }
                    None => Catalog::default(),
                };
                Ok(Arc::new(MemorySource::from_catalog(config.kind, &catalog)))
            }
            other => Err(anyhow!("Unknown source backend: {}", other)),
        }
    }
}
