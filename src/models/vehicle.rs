//! Vehicle record as held by the persistence layer and the cache.

use chrono::{DateTime, Utc};

/// Earliest model year accepted (the first production automobile).
pub const MIN_MODEL_YEAR: i32 = 1886;

/// A single vehicle record.
///
/// `id` and `created_at` are assigned by the persistence provider on insert;
/// before that they hold their default (empty id, Unix epoch).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Creates an unsaved record with no identifier yet.
    pub fn new(brand: impl Into<String>, model: impl Into<String>, year: i32) -> Self {
        Self {
            id: String::new(),
            brand: brand.into(),
            model: model.into(),
            year,
            created_at: DateTime::<Utc>::default(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}
