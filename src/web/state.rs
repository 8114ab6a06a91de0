//! Application state shared across handlers

use crate::config::Settings;
use crate::dispatch::Dispatcher;
use crate::entities::EntityRegistry;
use crate::images::StyleSegmentResolver;
use crate::metrics::Metrics;
use crate::query::StopTerms;
use crate::search::Search;
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Entity registry
    pub registry: Arc<EntityRegistry>,
    /// Search dispatcher
    pub dispatcher: Arc<Dispatcher>,
    /// Metrics shared with the search executor
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Wire the search pipeline described by the settings around a registry
    pub fn new(settings: Settings, registry: EntityRegistry) -> anyhow::Result<Self> {
        settings.search.validate()?;
        let stop_terms = StopTerms::new(&settings.search.stop_terms)
            .context("Invalid search.stop_terms")?;
        let metrics = Arc::new(Metrics::new());
        let registry = Arc::new(registry);

        let search = Search::new(registry.clone())
            .with_stop_terms(stop_terms)
            .with_per_type_limit(settings.search.per_type_limit)
            .with_metrics(metrics.clone())
            .with_timeout(Duration::from_secs_f64(settings.search.default_timeout))
            .with_max_timeout(Duration::from_secs_f64(settings.search.max_timeout));

        let images = StyleSegmentResolver::new(settings.search.original_image_style.clone());
        let dispatcher = Dispatcher::new(Arc::new(search), Arc::new(images))
            .with_instant_image_variant(settings.search.instant_image_variant.clone())
            .with_character_scope(settings.search.enable_character_scope);

        Ok(Self {
            settings: Arc::new(settings),
            registry,
            dispatcher: Arc::new(dispatcher),
            metrics,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
