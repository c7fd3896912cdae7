//! Caching Decorator Module
//!
//! Read-through, invalidate-on-write cache in front of any [`VehicleProvider`].
//!
//! Every operation delegates to the wrapped provider before touching the
//! cache, so the cache only ever holds state the store has confirmed. The
//! store lock is never held across a provider call: an operation is at most a
//! lookup, an unlocked provider round trip, then an update. Errors pass
//! through verbatim and are never cached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, Clock, StatsRecorder};
use crate::error::Result;
use crate::models::Vehicle;
use crate::repository::VehicleProvider;

// == Caching Provider ==
/// [`VehicleProvider`] that caches records and the full listing for one TTL.
#[derive(Debug)]
pub struct CachingVehicleProvider<P> {
    next: P,
    cache: CacheStore<Vehicle>,
}

impl<P: VehicleProvider> CachingVehicleProvider<P> {
    /// Wraps `next` with an unbounded cache on the system clock.
    pub fn new(next: P, ttl: Duration) -> Self {
        Self::with_store(next, CacheStore::new(ttl))
    }

    /// Wraps `next` with a cache on the given clock.
    pub fn with_clock(next: P, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self::with_store(next, CacheStore::with_clock(ttl, clock))
    }

    /// Wraps `next` with a preconfigured store, e.g. one with a capacity bound.
    pub fn with_store(next: P, cache: CacheStore<Vehicle>) -> Self {
        Self { next, cache }
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn stats_recorder(&self) -> StatsRecorder {
        self.cache.stats_recorder()
    }
}

#[async_trait]
impl<P: VehicleProvider> VehicleProvider for CachingVehicleProvider<P> {
    async fn list(&self) -> Result<Vec<Vehicle>> {
        if let Some(vehicles) = self.cache.get_listing().await {
            debug!("cache hit: listing ({} records)", vehicles.len());
            return Ok(vehicles);
        }

        let vehicles = self.next.list().await?;
        self.cache.set_listing(&vehicles).await;
        debug!("cache fill: listing ({} records)", vehicles.len());
        Ok(vehicles)
    }

    async fn get_by_id(&self, id: &str) -> Result<Vehicle> {
        if let Some(vehicle) = self.cache.get_entry(id).await {
            debug!("cache hit: vehicle {}", id);
            return Ok(vehicle);
        }

        let vehicle = self.next.get_by_id(id).await?;
        self.cache.set_entry(id, &vehicle).await;
        debug!("cache fill: vehicle {}", id);
        Ok(vehicle)
    }

    async fn insert(&self, vehicle: &mut Vehicle) -> Result<()> {
        self.next.insert(vehicle).await?;

        self.cache.refresh_entry(&vehicle.id, vehicle).await;
        debug!("cache refresh after insert: vehicle {}", vehicle.id);
        Ok(())
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<()> {
        self.next.update(vehicle).await?;

        self.cache.refresh_entry(&vehicle.id, vehicle).await;
        debug!("cache refresh after update: vehicle {}", vehicle.id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.next.delete(id).await?;

        self.cache.invalidate(id).await;
        debug!("cache invalidated after delete: vehicle {}", id);
        Ok(())
    }
}
