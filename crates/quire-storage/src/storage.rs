//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for loading raw documents, along with
//! [`StorageError`] for unified error handling across backends.
//!
//! # Addressing
//!
//! Documents are addressed by a `(language, identifier)` pair:
//! - `language` - a single partition name (e.g., `"en"`, `"de"`)
//! - `identifier` - a slash-separated document name without extension
//!   (e.g., `"about"`, `"guides/install"`)
//!
//! Storage implementations handle the mapping from this pair to their internal format.

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Document does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid language or identifier (e.g., path traversal attempt).
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create an invalid path error.
    #[must_use]
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::InvalidPath).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// Check whether this error means the document does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for raw document retrieval.
///
/// Implementations return document content byte-for-byte; no decoding or
/// transformation happens at this layer.
pub trait Storage: Send + Sync {
    /// Load the raw bytes of a document.
    ///
    /// # Arguments
    ///
    /// * `language` - Language partition (e.g., "en")
    /// * `identifier` - Document identifier without extension (e.g., "guides/install")
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with kind [`StorageErrorKind::NotFound`] if the
    /// document doesn't exist, [`StorageErrorKind::InvalidPath`] if the pair
    /// cannot address a document, or another kind if it can't be read.
    fn load(&self, language: &str, identifier: &str) -> Result<Vec<u8>, StorageError>;

    /// Check if a document exists.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, language: &str, identifier: &str) -> bool;

    /// List available language partitions, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the partitions cannot be enumerated.
    fn languages(&self) -> Result<Vec<String>, StorageError>;
}
