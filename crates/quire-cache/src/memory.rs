//! In-memory [`Cache`] with single-flight computation.
//!
//! Each digest owns a slot (`Arc<OnceLock<Arc<V>>>`) in a map guarded by a
//! `RwLock`. The map lock is only held to find or create a slot; the value is
//! computed through the slot's `OnceLock`, so callers racing on one digest
//! share a single computation while other digests proceed independently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use crate::{Cache, CacheStats, Digest, Lookup};

type Slot<V> = Arc<OnceLock<Arc<V>>>;

/// Unbounded in-process cache.
///
/// Grows with every distinct digest until [`Cache::clear`] is called.
///
/// # Panics
///
/// Cache operations panic if the slot map lock was poisoned by a panic
/// while it was held.
#[derive(Debug)]
pub struct MemoryCache<V> {
    slots: RwLock<HashMap<Digest, Slot<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V> Default for MemoryCache<V> {
    fn default() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl<V> MemoryCache<V> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the slot for `digest`, creating an empty one if needed.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    fn slot(&self, digest: Digest) -> Slot<V> {
        if let Some(slot) = self.slots.read().unwrap().get(&digest) {
            return Arc::clone(slot);
        }
        Arc::clone(self.slots.write().unwrap().entry(digest).or_default())
    }
}

impl<V: Send + Sync> Cache<V> for MemoryCache<V> {
    fn get_or_compute(&self, digest: Digest, compute: &dyn Fn() -> V) -> Lookup<V> {
        let slot = self.slot(digest);
        let mut computed = false;
        let value = Arc::clone(slot.get_or_init(|| {
            computed = true;
            Arc::new(compute())
        }));

        if computed {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }

        Lookup {
            value,
            from_cache: !computed,
        }
    }

    fn get(&self, digest: Digest) -> Option<Arc<V>> {
        self.slots
            .read()
            .unwrap()
            .get(&digest)
            .and_then(|slot| slot.get().cloned())
    }

    fn clear(&self) {
        let removed = {
            let mut slots = self.slots.write().unwrap();
            let removed = slots.values().filter(|slot| slot.get().is_some()).count();
            slots.clear();
            removed
        };
        tracing::info!(removed, "Cache cleared");
    }

    fn len(&self) -> usize {
        // Slots whose computation is in flight or panicked hold no value.
        self.slots
            .read()
            .unwrap()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::Barrier;
    use std::sync::atomic::AtomicUsize;
    use std::thread;
    use std::time::Duration;

    use super::*;

    static_assertions::assert_impl_all!(MemoryCache<String>: Send, Sync);

    #[test]
    fn test_miss_then_hit() {
        let cache: MemoryCache<String> = MemoryCache::new();
        let digest = Digest::of(b"doc");

        let first = cache.get_or_compute(digest, &|| "v1".to_owned());
        let second = cache.get_or_compute(digest, &|| "v2".to_owned());

        assert!(!first.from_cache);
        assert!(second.from_cache);
        assert_eq!(*second.value, "v1");
        assert!(Arc::ptr_eq(&first.value, &second.value));
    }

    #[test]
    fn test_hit_does_not_compute() {
        let cache: MemoryCache<u32> = MemoryCache::new();
        let calls = AtomicUsize::new(0);
        let digest = Digest::of(b"doc");
        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            7
        };

        for _ in 0..5 {
            cache.get_or_compute(digest, &compute);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 4,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_distinct_digests_are_distinct_entries() {
        let cache: MemoryCache<&'static str> = MemoryCache::new();

        cache.get_or_compute(Digest::of(b"a"), &|| "a");
        cache.get_or_compute(Digest::of(b"b"), &|| "b");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(Digest::of(b"a")).as_deref(), Some(&"a"));
        assert_eq!(cache.get(Digest::of(b"b")).as_deref(), Some(&"b"));
    }

    #[test]
    fn test_get_does_not_compute() {
        let cache: MemoryCache<u32> = MemoryCache::new();

        assert!(cache.get(Digest::of(b"doc")).is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_clear() {
        let cache: MemoryCache<u32> = MemoryCache::new();
        let digest = Digest::of(b"doc");
        cache.get_or_compute(digest, &|| 1);

        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.get(digest).is_none());
        let again = cache.get_or_compute(digest, &|| 2);
        assert!(!again.from_cache);
        assert_eq!(*again.value, 2);
    }

    #[test]
    fn test_panicking_compute_stores_nothing() {
        let cache: MemoryCache<u32> = MemoryCache::new();
        let digest = Digest::of(b"doc");

        let result = catch_unwind(AssertUnwindSafe(|| {
            cache.get_or_compute(digest, &|| panic!("render failed"));
        }));

        assert!(result.is_err());
        assert!(cache.get(digest).is_none());
        assert_eq!(cache.len(), 0);

        let retry = cache.get_or_compute(digest, &|| 3);
        assert!(!retry.from_cache);
        assert_eq!(*retry.value, 3);
    }

    #[test]
    fn test_concurrent_single_flight() {
        const THREADS: usize = 16;

        let cache: Arc<MemoryCache<String>> = Arc::new(MemoryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));
        let digest = Digest::of(b"shared");

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let lookup = cache.get_or_compute(digest, &|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(20));
                        "html".to_owned()
                    });
                    lookup.value
                })
            })
            .collect();

        let values: Vec<Arc<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(values.iter().all(|v| Arc::ptr_eq(v, &values[0])));
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, (THREADS - 1) as u64);
    }

    #[test]
    fn test_other_digests_do_not_wait() {
        let cache: Arc<MemoryCache<u32>> = Arc::new(MemoryCache::new());
        let started = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));

        let slow = {
            let cache = Arc::clone(&cache);
            let started = Arc::clone(&started);
            let release = Arc::clone(&release);
            thread::spawn(move || {
                cache.get_or_compute(Digest::of(b"slow"), &|| {
                    started.wait();
                    release.wait();
                    1
                })
            })
        };

        started.wait();
        // The slow computation is still running; another digest completes.
        let fast = cache.get_or_compute(Digest::of(b"fast"), &|| 2);
        assert_eq!(*fast.value, 2);
        assert!(cache.get(Digest::of(b"slow")).is_none());

        release.wait();
        let slow = slow.join().unwrap();
        assert_eq!(*slow.value, 1);
        assert_eq!(cache.len(), 2);
    }
}
