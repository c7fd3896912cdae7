//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.
//! Counters are atomic so lookups can record hits while holding only the
//! shared lock.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of lookups answered from the cache
    pub hits: u64,
    /// Number of lookups that found nothing fresh
    pub misses: u64,
    /// Number of entries evicted by the capacity bound
    pub evictions: u64,
    /// Current number of record entries held (fresh or stale)
    pub total_entries: usize,
    /// Whether a listing snapshot is currently held (fresh or stale)
    pub listing_cached: bool,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Shared live counters behind a [`CacheStats`] snapshot.
///
/// Cloning yields another handle onto the same counters, so the HTTP layer can
/// read stats without reaching into the cache itself.
#[derive(Debug, Clone, Default)]
pub struct StatsRecorder {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    total_entries: AtomicUsize,
    listing_cached: AtomicBool,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.inner.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.inner.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_eviction(&self) {
        self.inner.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Called with the exclusive lock held, after the entry map changed.
    pub fn set_total_entries(&self, count: usize) {
        self.inner.total_entries.store(count, Ordering::Relaxed);
    }

    pub fn set_listing_cached(&self, cached: bool) {
        self.inner.listing_cached.store(cached, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            evictions: self.inner.evictions.load(Ordering::Relaxed),
            total_entries: self.inner.total_entries.load(Ordering::Relaxed),
            listing_cached: self.inner.listing_cached.load(Ordering::Relaxed),
        }
    }
}
