//! Catalog Search: federated search dispatcher
//!
//! This is the main entry point for the application.

use anyhow::Result;
use catalog_search::{
    config::{self, Settings},
    entities::SourceLoader,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Settings come first so `general.debug` can pick the log level
    let settings = config::load()?;
    init_logging(&settings);

    info!("Starting Catalog Search v{}", catalog_search::VERSION);
    info!("Loaded configuration for instance: {}", settings.general.instance_name);

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized ({})", client.user_agent());

    // Load entity sources
    let registry = SourceLoader::load(&settings, &client)?;
    info!("Registered sources: {:?}", registry.kinds());

    // Create application state
    let state = AppState::new(settings.clone(), registry)?;

    let app = create_router(state);

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Install the global subscriber; RUST_LOG wins over the configured default
fn init_logging(settings: &Settings) {
    let default_level = if settings.general.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
