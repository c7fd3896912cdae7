//! Write Order Tracker Module
//!
//! Tracks the order in which record ids were last written so a bounded cache
//! can evict the stalest one. Reads never touch it, which keeps lookups on the
//! shared lock.

use std::collections::VecDeque;

// == Write Order ==
/// Tracks write order for capacity eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently written
/// - Back = Least recently written
#[derive(Debug, Default)]
pub struct WriteOrder {
    order: VecDeque<String>,
}

impl WriteOrder {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as just written (moves to front).
    pub fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently written key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
