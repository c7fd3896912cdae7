//! Cache Entry Module
//!
//! Defines a cached value tagged with the instant it stops being fresh.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A cached value with its expiration instant.
///
/// Used both for single records and for the listing snapshot.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant after which the value is treated as absent
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that stays fresh for `ttl` from `now`.
    pub fn new(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is still fresh at exactly `expires_at` and
    /// expires strictly after it.
    pub fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    /// Returns the value if the entry is still fresh at `now`.
    pub fn fresh(&self, now: Instant) -> Option<&V> {
        (!self.is_expired(now)).then_some(&self.value)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_fresh_within_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", Duration::from_secs(60), now);

        assert!(!entry.is_expired(now));
        assert_eq!(entry.fresh(now + Duration::from_secs(30)), Some(&"value"));
    }

    #[test]
    fn test_entry_expiration() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", Duration::from_millis(200), now);

        assert!(entry.is_expired(now + Duration::from_millis(250)));
        assert!(entry.fresh(now + Duration::from_millis(250)).is_none());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", Duration::from_millis(200), now);

        assert!(!entry.is_expired(entry.expires_at), "Entry is fresh at the boundary");
        assert!(entry.is_expired(entry.expires_at + Duration::from_nanos(1)));
    }

    #[test]
    fn test_zero_ttl_expires_immediately_after_creation() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", Duration::ZERO, now);

        assert!(!entry.is_expired(now));
        assert!(entry.is_expired(now + Duration::from_millis(1)));
    }
}
