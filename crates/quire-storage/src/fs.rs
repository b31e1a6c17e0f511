//! Filesystem storage backend.
//!
//! Documents live at `{root}/{language}/{identifier}.{extension}`:
//!
//! ```text
//! content/
//! ├── en/
//! │   ├── about.md          -> ("en", "about")
//! │   └── guides/
//! │       └── install.md    -> ("en", "guides/install")
//! └── de/
//!     └── about.md          -> ("de", "about")
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind};

const BACKEND: &str = "Fs";

/// Default document file extension.
pub const DEFAULT_EXTENSION: &str = "md";

/// Filesystem storage rooted at a content directory.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
    extension: String,
}

impl FsStorage {
    /// Create a new filesystem storage using the `md` extension.
    ///
    /// # Arguments
    ///
    /// * `root` - Content directory containing one subdirectory per language
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }

    /// Use a different document extension (without the leading dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Content root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Document file extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Validate a slash-separated name before it is joined onto the root.
    ///
    /// Rejects empty input, absolute paths, `.`/`..` and empty components,
    /// backslashes and NUL bytes. A language must also be a single component.
    fn validate(value: &str, single_component: bool) -> Result<(), StorageError> {
        let invalid = || {
            tracing::debug!(value, "Rejected document path");
            StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(value)
                .with_backend(BACKEND)
        };

        if value.is_empty() || value.starts_with('/') || value.contains(['\\', '\0']) {
            return Err(invalid());
        }
        if single_component && value.contains('/') {
            return Err(invalid());
        }
        if value
            .split('/')
            .any(|component| component.is_empty() || component == "." || component == "..")
        {
            return Err(invalid());
        }
        Ok(())
    }

    /// Resolve a `(language, identifier)` pair to a file path under the root.
    fn resolve(&self, language: &str, identifier: &str) -> Result<PathBuf, StorageError> {
        Self::validate(language, true)?;
        Self::validate(identifier, false)?;
        Ok(self
            .root
            .join(language)
            .join(format!("{identifier}.{}", self.extension)))
    }
}

impl Storage for FsStorage {
    fn load(&self, language: &str, identifier: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(language, identifier)?;
        // Directories with a document-like name are not documents.
        if path.is_dir() {
            return Err(StorageError::not_found(path).with_backend(BACKEND));
        }
        fs::read(&path).map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))
    }

    fn exists(&self, language: &str, identifier: &str) -> bool {
        self.resolve(language, identifier)
            .is_ok_and(|path| path.is_file())
    }

    fn languages(&self) -> Result<Vec<String>, StorageError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::io(e, Some(self.root.clone())).with_backend(BACKEND));
            }
        };

        let mut languages: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| !name.starts_with('.'))
            .collect();
        languages.sort();
        Ok(languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn write_doc(root: &Path, relative: &str, content: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_existing_document() {
        let temp_dir = create_test_dir();
        write_doc(temp_dir.path(), "en/about.md", b"# About\n\nText.");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let bytes = storage.load("en", "about").unwrap();

        assert_eq!(bytes, b"# About\n\nText.");
    }

    #[test]
    fn test_load_returns_bytes_unchanged() {
        let temp_dir = create_test_dir();
        let raw = b"\xEF\xBB\xBF---\r\ntitle: x\r\n---\r\n\xFF tail";
        write_doc(temp_dir.path(), "en/raw.md", raw);

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.load("en", "raw").unwrap(), raw);
    }

    #[test]
    fn test_load_nested_identifier() {
        let temp_dir = create_test_dir();
        write_doc(temp_dir.path(), "en/guides/install.md", b"Install");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.load("en", "guides/install").unwrap(), b"Install");
    }

    #[test]
    fn test_load_respects_language() {
        let temp_dir = create_test_dir();
        write_doc(temp_dir.path(), "en/about.md", b"About");
        write_doc(temp_dir.path(), "de/about.md", b"Uber");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.load("de", "about").unwrap(), b"Uber");
        assert_eq!(storage.load("en", "about").unwrap(), b"About");
    }

    #[test]
    fn test_load_custom_extension() {
        let temp_dir = create_test_dir();
        write_doc(temp_dir.path(), "en/notes.markdown", b"Notes");

        let storage = FsStorage::new(temp_dir.path().to_path_buf()).with_extension("markdown");

        assert_eq!(storage.extension(), "markdown");
        assert_eq!(storage.load("en", "notes").unwrap(), b"Notes");
    }

    #[test]
    fn test_load_missing_document() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.load("en", "missing").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(
            err.path.as_deref(),
            Some(temp_dir.path().join("en/missing.md").as_path())
        );
    }

    #[test]
    fn test_load_directory_is_not_found() {
        let temp_dir = create_test_dir();
        fs::create_dir_all(temp_dir.path().join("en/dir.md")).unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.load("en", "dir").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_load_rejects_path_traversal() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        for identifier in ["../secret", "guides/../../etc/passwd", "..", "a/./b"] {
            let err = storage.load("en", identifier).unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::InvalidPath, "{identifier}");
            assert_eq!(err.backend, Some("Fs"));
        }
    }

    #[test]
    fn test_load_rejects_malformed_identifiers() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        for identifier in ["", "/etc/passwd", "a\\b", "a\0b", "a//b", "trailing/"] {
            let err = storage.load("en", identifier).unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::InvalidPath, "{identifier:?}");
        }
    }

    #[test]
    fn test_load_rejects_malformed_languages() {
        let temp_dir = create_test_dir();
        write_doc(temp_dir.path(), "en/about.md", b"About");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        for language in ["", "..", "en/..", "/en", "en/sub"] {
            let err = storage.load(language, "about").unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::InvalidPath, "{language:?}");
        }
    }

    #[test]
    fn test_exists() {
        let temp_dir = create_test_dir();
        write_doc(temp_dir.path(), "en/about.md", b"About");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.exists("en", "about"));
        assert!(!storage.exists("en", "missing"));
        assert!(!storage.exists("de", "about"));
    }

    #[test]
    fn test_exists_rejects_path_traversal() {
        let temp_dir = create_test_dir();
        write_doc(temp_dir.path(), "en/about.md", b"About");

        let storage = FsStorage::new(temp_dir.path().join("en"));

        // Path traversal should return false (treated as non-existent)
        assert!(!storage.exists("..", "en/about"));
    }

    #[test]
    fn test_languages_sorted() {
        let temp_dir = create_test_dir();
        write_doc(temp_dir.path(), "en/a.md", b"");
        write_doc(temp_dir.path(), "de/a.md", b"");
        write_doc(temp_dir.path(), "fr/a.md", b"");
        fs::create_dir_all(temp_dir.path().join(".git")).unwrap();
        fs::write(temp_dir.path().join("README.md"), "readme").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.languages().unwrap(), vec!["de", "en", "fr"]);
    }

    #[test]
    fn test_languages_missing_root() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent/quire-content"));

        assert!(storage.languages().unwrap().is_empty());
    }
}
