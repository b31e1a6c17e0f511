//! Page rendering with content-addressed caching.
//!
//! [`Site`] runs the per-request pipeline:
//!
//! ```text
//! storage.load ─► Digest::of ─► cache.get_or_compute ─(miss)─► split + render
//! ```
//!
//! The cache key is the digest of the raw bytes, so an edited document is
//! re-rendered on its next request without any explicit invalidation.
//!
//! # Thread Safety
//!
//! `Site` is `Send + Sync` and meant to be shared behind an `Arc`. Concurrent
//! renders of the same bytes run the markdown pipeline once and share the
//! resulting [`RenderedArtifact`].

use std::sync::Arc;

use quire_cache::{Cache, CacheStats, Digest};
use quire_storage::{Storage, StorageError, StorageErrorKind};

use crate::artifact::RenderedArtifact;

/// Language used when none is given.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Configuration for [`Site`].
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Language for [`Site::render_default`].
    pub default_language: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

/// Result of rendering a page.
#[derive(Clone, Debug)]
pub struct PageRenderResult {
    /// Rendered HTML and metadata.
    pub artifact: Arc<RenderedArtifact>,
    /// Digest of the raw document bytes.
    pub digest: Digest,
    /// Whether the artifact came from the cache.
    pub from_cache: bool,
}

/// Error returned when page rendering fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No document exists for the language and identifier.
    #[error("Page not found: {language}/{identifier}")]
    NotFound {
        /// Requested language.
        language: String,
        /// Requested identifier.
        identifier: String,
    },
    /// The language or identifier cannot address a document.
    #[error("Invalid page path: {language}/{identifier}")]
    InvalidPath {
        /// Requested language.
        language: String,
        /// Requested identifier.
        identifier: String,
    },
    /// Storage failed for another reason.
    #[error("Storage error: {0}")]
    Storage(#[source] StorageError),
}

impl RenderError {
    fn from_storage(error: StorageError, language: &str, identifier: &str) -> Self {
        match error.kind {
            StorageErrorKind::NotFound => Self::NotFound {
                language: language.to_owned(),
                identifier: identifier.to_owned(),
            },
            StorageErrorKind::InvalidPath => Self::InvalidPath {
                language: language.to_owned(),
                identifier: identifier.to_owned(),
            },
            _ => Self::Storage(error),
        }
    }

    /// Whether the page does not exist or cannot be addressed.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidPath { .. })
    }
}

/// Document storage, render cache and configuration for one content tree.
pub struct Site {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn Cache<RenderedArtifact>>,
    config: SiteConfig,
}

impl Site {
    /// Create a new site.
    ///
    /// # Arguments
    ///
    /// * `storage` - Document storage backend
    /// * `cache` - Render cache (use `NullCache` to disable caching)
    /// * `config` - Site configuration
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        cache: Arc<dyn Cache<RenderedArtifact>>,
        config: SiteConfig,
    ) -> Self {
        Self {
            storage,
            cache,
            config,
        }
    }

    /// Render a document.
    ///
    /// On a cache miss the front matter is split off and the body rendered;
    /// on a hit the stored artifact is returned without parsing anything.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotFound`] if the document doesn't exist,
    /// [`RenderError::InvalidPath`] if the pair cannot address a document,
    /// and [`RenderError::Storage`] if it cannot be read. No cache entry is
    /// created in any of these cases.
    pub fn render(
        &self,
        language: &str,
        identifier: &str,
    ) -> Result<PageRenderResult, RenderError> {
        let raw = self.storage.load(language, identifier).map_err(|e| {
            let error = RenderError::from_storage(e, language, identifier);
            if error.is_not_found() {
                tracing::debug!(language, identifier, "Page not found");
            } else {
                tracing::warn!(language, identifier, error = %error, "Failed to load page");
            }
            error
        })?;

        let digest = Digest::of(&raw);
        let lookup = self
            .cache
            .get_or_compute(digest, &|| RenderedArtifact::from_bytes(&raw));

        if lookup.from_cache {
            tracing::debug!(%digest, language, identifier, "Cache hit");
        } else {
            tracing::debug!(%digest, language, identifier, "Cache miss");
        }

        Ok(PageRenderResult {
            artifact: lookup.value,
            digest,
            from_cache: lookup.from_cache,
        })
    }

    /// Render a document in the configured default language.
    ///
    /// # Errors
    ///
    /// Same as [`render`](Self::render).
    pub fn render_default(&self, identifier: &str) -> Result<PageRenderResult, RenderError> {
        self.render(&self.config.default_language, identifier)
    }

    /// Whether storage has a document for the pair, without loading it.
    #[must_use]
    pub fn exists(&self, language: &str, identifier: &str) -> bool {
        self.storage.exists(language, identifier)
    }

    /// Drop every cached artifact.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Cache hit/miss counters and size.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Language used by [`render_default`](Self::render_default).
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.config.default_language
    }

    /// Languages available in storage, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Storage`] if storage cannot be enumerated.
    pub fn languages(&self) -> Result<Vec<String>, RenderError> {
        self.storage.languages().map_err(RenderError::Storage)
    }
}
