//! `quire serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config};
use quire_server::{run_server, server_config_from_quire_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content directory (overrides config).
    #[arg(short = 'd', long)]
    content_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable the render cache (default: enabled).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable the render cache.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let cache_enabled = self.resolve_cache_enabled();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            content_dir: self.content_dir,
            cache_enabled,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Content directory: {}",
            config.content_resolved.dir.display()
        ));
        if config.cache.enabled {
            output.info("Cache: enabled");
        } else {
            output.info("Cache: disabled");
        }

        run_server(server_config_from_quire_config(&config))
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    }

    /// Resolve `cache_enabled` from --cache/--no-cache flags.
    fn resolve_cache_enabled(&self) -> Option<bool> {
        self.no_cache.then_some(false).or(self.cache)
    }
}
