//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind};

const BACKEND: &str = "Mock";

type Key = (String, String);

fn key(language: &str, identifier: &str) -> Key {
    (language.to_owned(), identifier.to_owned())
}

/// Mock storage for testing.
///
/// Stores documents in memory and counts how many times each one was loaded.
/// Use the builder methods to configure the mock with test data.
///
/// # Example
///
/// ```
/// use quire_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_document("en", "about", "# About");
///
/// assert_eq!(storage.load("en", "about").unwrap(), b"# About");
/// assert_eq!(storage.load_count("en", "about"), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    documents: RwLock<HashMap<Key, Vec<u8>>>,
    loads: RwLock<HashMap<Key, usize>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(
        self,
        language: &str,
        identifier: &str,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.set_document(language, identifier, content);
        self
    }

    /// Insert or replace a document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_document(&self, language: &str, identifier: &str, content: impl Into<Vec<u8>>) {
        self.documents
            .write()
            .unwrap()
            .insert(key(language, identifier), content.into());
    }

    /// Remove a document, returning whether it existed.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove_document(&self, language: &str, identifier: &str) -> bool {
        self.documents
            .write()
            .unwrap()
            .remove(&key(language, identifier))
            .is_some()
    }

    /// Number of `load` calls made for a document, including failed ones.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn load_count(&self, language: &str, identifier: &str) -> usize {
        self.loads
            .read()
            .unwrap()
            .get(&key(language, identifier))
            .copied()
            .unwrap_or(0)
    }
}

impl Storage for MockStorage {
    fn load(&self, language: &str, identifier: &str) -> Result<Vec<u8>, StorageError> {
        let key = key(language, identifier);
        *self.loads.write().unwrap().entry(key.clone()).or_default() += 1;

        if language.is_empty() || identifier.is_empty() || identifier.contains("..") {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(format!("{language}/{identifier}"))
                .with_backend(BACKEND));
        }

        self.documents
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| {
                StorageError::not_found(format!("{language}/{identifier}")).with_backend(BACKEND)
            })
    }

    fn exists(&self, language: &str, identifier: &str) -> bool {
        self.documents
            .read()
            .unwrap()
            .contains_key(&key(language, identifier))
    }

    fn languages(&self) -> Result<Vec<String>, StorageError> {
        let languages: BTreeSet<String> = self
            .documents
            .read()
            .unwrap()
            .keys()
            .map(|(language, _)| language.clone())
            .collect();
        Ok(languages.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mock_storage_is_send_sync() {
        assert_send_sync::<MockStorage>();
    }

    #[test]
    fn test_new_empty() {
        let storage = MockStorage::new();

        assert!(storage.languages().unwrap().is_empty());
    }

    #[test]
    fn test_with_document() {
        let storage = MockStorage::new().with_document("en", "about", "About");

        assert_eq!(storage.load("en", "about").unwrap(), b"About");
        assert!(storage.exists("en", "about"));
    }

    #[test]
    fn test_load_missing() {
        let storage = MockStorage::new();

        let err = storage.load("en", "missing").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_load_rejects_traversal() {
        let storage = MockStorage::new();

        let err = storage.load("en", "../secret").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_load_count_tracks_calls() {
        let storage = MockStorage::new().with_document("en", "about", "About");

        storage.load("en", "about").unwrap();
        storage.load("en", "about").unwrap();
        let _ = storage.load("en", "missing");

        assert_eq!(storage.load_count("en", "about"), 2);
        assert_eq!(storage.load_count("en", "missing"), 1);
        assert_eq!(storage.load_count("de", "about"), 0);
    }

    #[test]
    fn test_set_document_replaces_content() {
        let storage = MockStorage::new().with_document("en", "about", "v1");

        storage.set_document("en", "about", "v2");

        assert_eq!(storage.load("en", "about").unwrap(), b"v2");
    }

    #[test]
    fn test_remove_document() {
        let storage = MockStorage::new().with_document("en", "about", "About");

        assert!(storage.remove_document("en", "about"));
        assert!(!storage.remove_document("en", "about"));
        assert!(!storage.exists("en", "about"));
    }

    #[test]
    fn test_languages_sorted_unique() {
        let storage = MockStorage::new()
            .with_document("fr", "a", "")
            .with_document("en", "a", "")
            .with_document("en", "b", "");

        assert_eq!(storage.languages().unwrap(), vec!["en", "fr"]);
    }
}
