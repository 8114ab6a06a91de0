//! Settings structures for catalog-search configuration

use crate::entities::EntityKind;
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default base URL of the ranking backend
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3001";

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub sources: Vec<SourceConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            server: ServerSettings::default(),
            search: SearchSettings::default(),
            outgoing: OutgoingSettings::default(),
            sources: default_sources(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (CATALOG_SEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("CATALOG_SEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("CATALOG_SEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("CATALOG_SEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("CATALOG_SEARCH_BACKEND_URL") {
            self.set_backend_url(&val);
        }
    }

    /// Point every http source at the given backend
    pub fn set_backend_url(&mut self, url: &str) {
        for source in self.sources.iter_mut().filter(|s| s.backend == "http") {
            source.url = Some(url.to_string());
        }
    }

    /// Get all enabled sources
    pub fn enabled_sources(&self) -> Vec<&SourceConfig> {
        self.sources.iter().filter(|s| !s.disabled).collect()
    }
}

/// A timeout must be a finite, positive number of seconds
fn ensure_seconds(name: &str, seconds: f64) -> Result<()> {
    ensure!(
        seconds.is_finite() && seconds > 0.0,
        "{} must be a positive number of seconds, got {}",
        name,
        seconds
    );
    Ok(())
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by the health endpoint
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "catalog-search".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum candidates taken from each entity kind before merging
    pub per_type_limit: usize,
    /// Terms stripped from queries (case-insensitive)
    pub stop_terms: Vec<String>,
    /// Default per-source fetch timeout in seconds
    pub default_timeout: f64,
    /// Upper bound for any per-source timeout
    pub max_timeout: f64,
    /// Allow the reserved `characters` scope
    pub enable_character_scope: bool,
    /// Image style used for instant-depth results
    pub instant_image_variant: String,
    /// Style segment present in stored image URLs
    pub original_image_style: String,
}

impl SearchSettings {
    /// Reject values the executor cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.per_type_limit > 0,
            "search.per_type_limit must be at least 1"
        );
        ensure_seconds("search.default_timeout", self.default_timeout)?;
        ensure_seconds("search.max_timeout", self.max_timeout)?;
        Ok(())
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            per_type_limit: crate::DEFAULT_PER_TYPE_LIMIT,
            stop_terms: vec!["season".to_string()],
            default_timeout: crate::DEFAULT_TIMEOUT,
            max_timeout: crate::MAX_TIMEOUT,
            enable_character_scope: false,
            instant_image_variant: "small".to_string(),
            original_image_style: "original".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Max idle connections per host
    pub pool_maxsize: usize,
    /// Appended to the user agent
    pub useragent_suffix: Option<String>,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl OutgoingSettings {
    /// Reject values the HTTP client cannot be built with
    pub fn validate(&self) -> Result<()> {
        ensure_seconds("outgoing.request_timeout", self.request_timeout)
    }
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            pool_maxsize: 20,
            useragent_suffix: None,
            extra_headers: HashMap::new(),
        }
    }
}

/// Configuration of the source serving one entity kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Entity kind served
    pub kind: EntityKind,
    /// Source implementation: "http" or "memory"
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Base URL for http sources
    #[serde(default)]
    pub url: Option<String>,
    /// Catalog file for memory sources
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Custom timeout for this source
    #[serde(default)]
    pub timeout: Option<f64>,
    /// Whether source is disabled
    #[serde(default)]
    pub disabled: bool,
}

impl SourceConfig {
    pub fn new(kind: EntityKind, backend: impl Into<String>) -> Self {
        Self {
            kind,
            backend: backend.into(),
            url: None,
            catalog: None,
            timeout: None,
            disabled: false,
        }
    }
}

fn default_backend() -> String {
    "http".to_string()
}

/// Default source configurations
fn default_sources() -> Vec<SourceConfig> {
    EntityKind::ALL
        .iter()
        .map(|kind| SourceConfig {
            url: Some(DEFAULT_BACKEND_URL.to_string()),
            ..SourceConfig::new(*kind, "http")
        })
        .collect()
}
