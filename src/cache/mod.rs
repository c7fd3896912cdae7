//! Cache Module
//!
//! In-memory TTL caching of vehicle records in front of a persistence
//! provider, with passive expiry and wholesale listing invalidation.

mod clock;
mod decorator;
mod entry;
mod stats;
mod store;
mod write_order;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use decorator::CachingVehicleProvider;
pub use entry::CacheEntry;
pub use stats::{CacheStats, StatsRecorder};
pub use store::CacheStore;
pub use write_order::WriteOrder;
