//! Document storage abstraction for Quire.
//!
//! This crate provides a [`Storage`] trait for loading raw document bytes from a
//! language-partitioned store. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (filesystem today, anything byte-addressable later)
//! - **Clean separation** between the rendering pipeline and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `load()`, `exists()`, and `languages()` methods
//! - [`FsStorage`] for `{root}/{language}/{identifier}.{extension}` layouts
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use quire_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("content"));
//! let bytes = storage.load("en", "about")?;
//! # Ok::<(), quire_storage::StorageError>(())
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::{DEFAULT_EXTENSION, FsStorage};
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
