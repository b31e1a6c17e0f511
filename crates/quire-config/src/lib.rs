//! Configuration management for Quire.
//!
//! Parses `quire.toml` with serde and discovers it in the current directory
//! or any parent. CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `server.host`, `content.dir`.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "quire.toml";

/// CLI settings that override configuration file values.
///
/// Only `Some` fields override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content directory.
    pub content_dir: Option<PathBuf>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content configuration as written in TOML.
    content: ContentConfigRaw,
    /// Render cache configuration.
    pub cache: CacheConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentConfigRaw {
    dir: Option<String>,
    extension: Option<String>,
    default_language: Option<String>,
}

/// Resolved content configuration.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Root of the `{language}/{identifier}.{extension}` tree.
    pub dir: PathBuf,
    /// Document file extension, without the dot.
    pub extension: String,
    /// Language used when a request names none.
    pub default_language: String,
}

/// Render cache configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether rendered artifacts are kept in memory.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`QUIRE_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `quire.toml` in the current directory and its parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// CLI settings are applied after path resolution and before validation.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, the file
    /// cannot be read or parsed, an environment variable is missing, or the
    /// final values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(dir) = &settings.content_dir {
            self.content_resolved.dir.clone_from(dir);
        }
        if let Some(enabled) = settings.cache_enabled {
            self.cache.enabled = enabled;
        }
    }

    /// Search for the config file in the current directory and parents.
    #[must_use]
    pub fn discover_config() -> Option<PathBuf> {
        Self::discover_config_from(&std::env::current_dir().ok()?)
    }

    /// Search for the config file in `start` and its parents.
    #[must_use]
    pub fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to the current directory.
    #[must_use]
    pub fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to `base`.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            cache: CacheConfig::default(),
            content_resolved: ContentConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called by [`load`](Self::load) after CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        let content = &self.content_resolved;
        require_non_empty(&content.extension, "content.extension")?;
        if content.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "content.extension must not start with '.'".to_owned(),
            ));
        }

        require_non_empty(&content.default_language, "content.default_language")?;
        if content.default_language.contains('/') || content.default_language.contains("..") {
            return Err(ConfigError::Validation(format!(
                "content.default_language is not a valid language: {}",
                content.default_language
            )));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        if let Some(ref dir) = self.content.dir {
            self.content.dir = Some(expand::expand_env(dir, "content.dir")?);
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        self.content_resolved = ContentConfig {
            dir: config_dir.join(self.content.dir.as_deref().unwrap_or("content")),
            extension: self
                .content
                .extension
                .clone()
                .unwrap_or_else(|| "md".to_owned()),
            default_language: self
                .content
                .default_language
                .clone()
                .unwrap_or_else(|| "en".to_owned()),
        };
    }
}
