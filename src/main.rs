//! genimage-gateway server entry point.
//!
//! Starts the Axum HTTP server with the generation and community feed
//! endpoints.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use genimage_gateway::api;
use genimage_gateway::app_state::AppState;
use genimage_gateway::config::GatewayConfig;
use genimage_gateway::domain::ImageCache;
use genimage_gateway::hosting::{CloudinaryHost, ImageHost};
use genimage_gateway::inference::InferenceClient;
use genimage_gateway::persistence::{MemoryPostStore, PostStore, PostgresPostStore};
use genimage_gateway::service::{GenerationService, PostService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = GatewayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(addr = %config.listen_addr, "starting genimage-gateway");

    // Build persistence layer
    let store: Arc<dyn PostStore> = if config.persistence_enabled {
        let store = PostgresPostStore::connect(&config).await?;
        store.migrate().await?;
        tracing::info!("document store connected");
        Arc::new(store)
    } else {
        tracing::warn!("persistence disabled; posts are kept in memory");
        Arc::new(MemoryPostStore::new())
    };

    // Build external clients
    let host: Arc<dyn ImageHost> = Arc::new(CloudinaryHost::from_config(&config)?);
    let inference = InferenceClient::from_config(&config)?;

    // Build domain layer
    let cache = Arc::new(ImageCache::new(config.image_cache_ttl()));
    if let Some(period) = config.image_cache_sweep_interval() {
        let _sweeper = cache.spawn_sweeper(period);
    }

    // Build application state
    let app_state = AppState {
        generation: Arc::new(GenerationService::new(cache, inference)),
        posts: Arc::new(PostService::new(store, host)),
    };

    // Build router
    let app = api::build_app(app_state, &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
