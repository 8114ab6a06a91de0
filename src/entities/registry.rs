//! Entity registry for looking up the source of each entity kind

use super::traits::EntitySource;
use super::types::EntityKind;
use crate::config::SourceConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of entity sources, one per kind
pub struct EntityRegistry {
    /// Sources by kind
    sources: HashMap<EntityKind, Arc<dyn EntitySource>>,
    /// Source configurations
    configs: HashMap<EntityKind, SourceConfig>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            configs: HashMap::new(),
        }
    }

    /// Register a source, replacing any previous source for the same kind
    pub fn register(&mut self, source: Arc<dyn EntitySource>, config: SourceConfig) {
        let kind = source.kind();
        self.sources.insert(kind, source);
        self.configs.insert(kind, config);
    }

    /// Register a source with a default configuration
    pub fn register_source(&mut self, source: Arc<dyn EntitySource>) {
        let config = SourceConfig::new(source.kind(), "custom");
        self.register(source, config);
    }

    /// Get the source for a kind
    pub fn get(&self, kind: EntityKind) -> Option<&Arc<dyn EntitySource>> {
        self.sources.get(&kind)
    }

    /// Registered kinds, in priority order
    pub fn kinds(&self) -> Vec<EntityKind> {
        let mut kinds: Vec<EntityKind> = self.sources.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Check if a kind has a source
    pub fn contains(&self, kind: EntityKind) -> bool {
        self.sources.contains_key(&kind)
    }

    /// Get number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Get effective timeout for a kind, in seconds
    pub fn get_timeout(&self, kind: EntityKind, default: f64) -> f64 {
        self.configs
            .get(&kind)
            .and_then(|c| c.timeout)
            .or_else(|| self.sources.get(&kind).and_then(|s| s.timeout()))
            .unwrap_or(default)
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MemorySource;

    #[test]
    fn test_registry() {
        let mut registry = EntityRegistry::new();
        let mut config = SourceConfig::new(EntityKind::Manga, "memory");
        config.timeout = Some(0.5);

        registry.register(Arc::new(MemorySource::new(EntityKind::Manga, vec![])), config);
        registry.register_source(Arc::new(MemorySource::new(EntityKind::Anime, vec![])));

        assert!(registry.contains(EntityKind::Manga));
        assert!(!registry.contains(EntityKind::User));
        assert_eq!(registry.kinds(), vec![EntityKind::Anime, EntityKind::Manga]);
        assert_eq!(registry.get_timeout(EntityKind::Manga, 2.0), 0.5);
        assert_eq!(registry.get_timeout(EntityKind::Anime, 2.0), 2.0);
        assert_eq!(registry.get_timeout(EntityKind::User, 3.0), 3.0);
    }
}
