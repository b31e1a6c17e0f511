//! Content-addressed render cache for Quire.
//!
//! Values are keyed by the [`Digest`] of the bytes they were computed from, so
//! an entry never goes stale: changed input means a different key.
//!
//! - [`Cache`]: Object-safe get-or-compute interface
//! - [`MemoryCache`]: In-process map with single-flight computation per digest
//! - [`NullCache`]: Always computes, used when caching is disabled
//!
//! # Example
//!
//! ```
//! use quire_cache::{Cache, Digest, MemoryCache};
//!
//! let cache: MemoryCache<String> = MemoryCache::new();
//! let digest = Digest::of(b"Hello *world*");
//!
//! let first = cache.get_or_compute(digest, &|| "rendered".to_owned());
//! let second = cache.get_or_compute(digest, &|| "recomputed".to_owned());
//!
//! assert!(!first.from_cache);
//! assert!(second.from_cache);
//! assert_eq!(*second.value, "rendered");
//! ```

mod digest;
mod memory;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

pub use digest::{DIGEST_LEN, Digest, ParseDigestError};
pub use memory::MemoryCache;

/// Outcome of [`Cache::get_or_compute`].
#[derive(Debug)]
pub struct Lookup<V> {
    /// Stored or freshly computed value.
    pub value: Arc<V>,
    /// Whether the value was already present.
    pub from_cache: bool,
}

/// Counters reported by [`Cache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a stored value.
    pub hits: u64,
    /// Lookups that ran the computation.
    pub misses: u64,
    /// Values currently stored.
    pub entries: usize,
}

/// Digest-keyed store with atomic get-or-compute.
pub trait Cache<V>: Send + Sync {
    /// Return the value for `digest`, computing and storing it on a miss.
    ///
    /// Implementations that store values run `compute` at most once per
    /// digest. Concurrent callers for the same digest wait for that
    /// computation and share its result. If `compute` panics nothing is
    /// stored and the panic propagates to the caller that ran it.
    fn get_or_compute(&self, digest: Digest, compute: &dyn Fn() -> V) -> Lookup<V>;

    /// Return the stored value for `digest` without computing.
    fn get(&self, digest: Digest) -> Option<Arc<V>>;

    /// Drop every stored value.
    fn clear(&self);

    /// Number of stored values.
    fn len(&self) -> usize;

    /// Whether no values are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit/miss counters and current size.
    fn stats(&self) -> CacheStats;
}

/// [`Cache`] that never stores anything.
///
/// Every lookup runs the computation and reports a miss.
#[derive(Debug, Default)]
pub struct NullCache {
    misses: AtomicU64,
}

impl NullCache {
    /// Create a new null cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V> Cache<V> for NullCache {
    fn get_or_compute(&self, _digest: Digest, compute: &dyn Fn() -> V) -> Lookup<V> {
        self.misses.fetch_add(1, Ordering::Relaxed);
        Lookup {
            value: Arc::new(compute()),
            from_cache: false,
        }
    }

    fn get(&self, _digest: Digest) -> Option<Arc<V>> {
        None
    }

    fn clear(&self) {}

    fn len(&self) -> usize {
        0
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: 0,
            misses: self.misses.load(Ordering::Relaxed),
            entries: 0,
        }
    }
}
