//! HTTP server for Quire.
//!
//! Exposes the render pipeline of a [`Site`] as a JSON API:
//!
//! - `GET /api/pages/{*identifier}` renders in the default language
//! - `GET /api/{language}/pages/{*identifier}` renders in `language`
//! - `GET /api/cache` returns cache statistics, `DELETE /api/cache` clears it
//! - `GET /health` answers `ok`
//!
//! Rendering runs on the blocking thread pool; page responses carry the
//! document digest as `ETag` and honor `If-None-Match`.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use quire_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         content_dir: PathBuf::from("content"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use quire_cache::{Cache, MemoryCache, NullCache};
use quire_site::{DEFAULT_LANGUAGE, RenderedArtifact, Site, SiteConfig};
use quire_storage::{DEFAULT_EXTENSION, FsStorage};

pub use app::create_router;
pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content root directory.
    pub content_dir: PathBuf,
    /// Document file extension, without the dot.
    pub extension: String,
    /// Language for `/api/pages/...` requests.
    pub default_language: String,
    /// Keep rendered artifacts in memory.
    pub cache_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            content_dir: PathBuf::from("content"),
            extension: DEFAULT_EXTENSION.to_owned(),
            default_language: DEFAULT_LANGUAGE.to_owned(),
            cache_enabled: true,
        }
    }
}

/// Build the [`Site`] described by `config`.
#[must_use]
pub fn build_site(config: &ServerConfig) -> Site {
    let storage = FsStorage::new(config.content_dir.clone()).with_extension(&config.extension);
    let cache: Arc<dyn Cache<RenderedArtifact>> = if config.cache_enabled {
        Arc::new(MemoryCache::<RenderedArtifact>::new())
    } else {
        Arc::new(NullCache::new())
    };

    Site::new(
        Arc::new(storage),
        cache,
        SiteConfig {
            default_language: config.default_language.clone(),
        },
    )
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let site = Arc::new(build_site(&config));
    let app = create_router(site);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Quire config.
#[must_use]
pub fn server_config_from_quire_config(config: &quire_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        content_dir: config.content_resolved.dir.clone(),
        extension: config.content_resolved.extension.clone(),
        default_language: config.content_resolved.default_language.clone(),
        cache_enabled: config.cache.enabled,
    }
}
