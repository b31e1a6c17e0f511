//! `quire render` command implementation.

use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config};
use quire_server::{build_site, server_config_from_quire_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document identifier, e.g. `guides/install`.
    identifier: String,

    /// Document language (default: `content.default_language`).
    #[arg(short, long)]
    language: Option<String>,

    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content directory (overrides config).
    #[arg(short = 'd', long)]
    content_dir: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command, printing the artifact as JSON on stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the document cannot be rendered.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let json = self.render_json()?;
        output.result(&json)?;
        Ok(())
    }

    fn render_json(self) -> Result<String, CliError> {
        let cli_settings = CliSettings {
            content_dir: self.content_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = build_site(&server_config_from_quire_config(&config));

        let language = self
            .language
            .unwrap_or_else(|| site.default_language().to_owned());
        let page = site.render(&language, &self.identifier)?;
        tracing::debug!(
            digest = %page.digest,
            language = %language,
            identifier = %self.identifier,
            "Rendered document"
        );

        Ok(serde_json::to_string_pretty(&*page.artifact)?)
    }
}
