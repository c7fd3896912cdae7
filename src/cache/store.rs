//! Cache Store Module
//!
//! Keyed record entries plus a single listing slot, each with passive TTL
//! expiry. Lookups take the shared lock; every mutation takes the exclusive
//! lock. Nothing in here ever awaits anything but the lock itself.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheStats, Clock, StatsRecorder, SystemClock, WriteOrder};

#[derive(Debug)]
struct Slots<V> {
    entries: HashMap<String, CacheEntry<V>>,
    listing: Option<CacheEntry<Vec<V>>>,
    /// Only maintained when a capacity bound is set
    write_order: WriteOrder,
}

// == Cache Store ==
/// TTL cache of individual values and one full listing.
///
/// Values are cloned on the way in and on the way out, so nothing a caller
/// does to a returned value can leak into a later hit. Expired items are
/// ignored by lookups but stay in memory until overwritten or removed.
#[derive(Debug)]
pub struct CacheStore<V> {
    slots: RwLock<Slots<V>>,
    ttl: Duration,
    max_entries: Option<usize>,
    clock: Arc<dyn Clock>,
    stats: StatsRecorder,
}

impl<V: Clone + Send + Sync> CacheStore<V> {
    // == Constructor ==
    /// Creates an unbounded store reading the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates an unbounded store with an explicit time source.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: RwLock::new(Slots {
                entries: HashMap::new(),
                listing: None,
                write_order: WriteOrder::new(),
            }),
            ttl,
            max_entries: None,
            clock,
            stats: StatsRecorder::new(),
        }
    }

    /// Bounds the number of record entries; `None` or `Some(0)` is unbounded.
    pub fn with_capacity(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries.filter(|max| *max > 0);
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get Entry ==
    /// Returns a copy of the value cached under `id`, if present and fresh.
    pub async fn get_entry(&self, id: &str) -> Option<V> {
        let slots = self.slots.read().await;
        let now = self.clock.now();
        match slots.entries.get(id).and_then(|entry| entry.fresh(now)) {
            Some(value) => {
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set Entry ==
    /// Stores a copy of `value` under `id` with a fresh TTL.
    ///
    /// If a capacity bound is set and `id` is new, the least recently written
    /// entry is evicted first.
    pub async fn set_entry(&self, id: &str, value: &V) {
        let mut slots = self.slots.write().await;
        self.put(&mut slots, id, value);
    }

    // == Refresh Entry ==
    /// Replaces the entry for `id` and drops the listing under one write
    /// lock, so no reader sees the new entry next to the old listing.
    pub async fn refresh_entry(&self, id: &str, value: &V) {
        let mut slots = self.slots.write().await;
        slots.listing = None;
        self.stats.set_listing_cached(false);
        self.put(&mut slots, id, value);
    }

    fn put(&self, slots: &mut Slots<V>, id: &str, value: &V) {
        let entry = CacheEntry::new(value.clone(), self.ttl, self.clock.now());

        if let Some(max_entries) = self.max_entries {
            if !slots.entries.contains_key(id) && slots.entries.len() >= max_entries {
                if let Some(evicted) = slots.write_order.evict_oldest() {
                    slots.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
            }
            slots.write_order.touch(id);
        }

        slots.entries.insert(id.to_string(), entry);
        self.stats.set_total_entries(slots.entries.len());
    }

    // == Delete Entry ==
    /// Removes the entry for `id`. Returns whether one was held.
    pub async fn delete_entry(&self, id: &str) -> bool {
        let mut slots = self.slots.write().await;
        let removed = slots.entries.remove(id).is_some();
        if self.max_entries.is_some() {
            slots.write_order.remove(id);
        }
        self.stats.set_total_entries(slots.entries.len());
        removed
    }

    // == Invalidate ==
    /// Removes the entry for `id` and drops the listing under one write lock.
    /// Returns whether an entry was held.
    pub async fn invalidate(&self, id: &str) -> bool {
        let mut slots = self.slots.write().await;
        slots.listing = None;
        self.stats.set_listing_cached(false);
        let removed = slots.entries.remove(id).is_some();
        if self.max_entries.is_some() {
            slots.write_order.remove(id);
        }
        self.stats.set_total_entries(slots.entries.len());
        removed
    }

    // == Get Listing ==
    /// Returns a copy of the cached listing, if present and fresh.
    pub async fn get_listing(&self) -> Option<Vec<V>> {
        let slots = self.slots.read().await;
        let now = self.clock.now();
        match slots.listing.as_ref().and_then(|listing| listing.fresh(now)) {
            Some(values) => {
                self.stats.record_hit();
                Some(values.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set Listing ==
    /// Replaces the listing slot with a copy of `values` and a fresh TTL.
    pub async fn set_listing(&self, values: &[V]) {
        let mut slots = self.slots.write().await;
        slots.listing = Some(CacheEntry::new(values.to_vec(), self.ttl, self.clock.now()));
        self.stats.set_listing_cached(true);
    }

    // == Clear Listing ==
    pub async fn clear_listing(&self) {
        let mut slots = self.slots.write().await;
        slots.listing = None;
        self.stats.set_listing_cached(false);
    }

    // == Length ==
    /// Number of record entries held, including stale ones.
    pub async fn len(&self) -> usize {
        self.slots.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Handle onto the live counters, for readers outside the cache.
    pub fn stats_recorder(&self) -> StatsRecorder {
        self.stats.clone()
    }
}
