//! Repository Module
//!
//! The provider contract every vehicle store implements, plus the SQLite
//! implementation and its connection setup.

pub mod database;
mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Vehicle;

pub use sqlite::SqliteVehicleRepository;

/// Read/write contract for vehicle records.
///
/// Implemented by the durable store and by the caching decorator, so either
/// can sit behind the service layer. Dropping a returned future cancels the
/// underlying call; callers bound latency by wrapping calls in a timeout.
#[async_trait]
pub trait VehicleProvider: Send + Sync {
    /// All records, newest first.
    async fn list(&self) -> Result<Vec<Vehicle>>;

    /// One record by id. `NotFound` if absent.
    async fn get_by_id(&self, id: &str) -> Result<Vehicle>;

    /// Persists a new record, assigning `id` and `created_at` on success.
    async fn insert(&self, vehicle: &mut Vehicle) -> Result<()>;

    /// Replaces brand, model and year of an existing record. `NotFound` if
    /// the id is absent.
    async fn update(&self, vehicle: &Vehicle) -> Result<()>;

    /// Removes a record. `NotFound` if the id is absent.
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl<P: VehicleProvider + ?Sized> VehicleProvider for std::sync::Arc<P> {
    async fn list(&self) -> Result<Vec<Vehicle>> {
        (**self).list().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Vehicle> {
        (**self).get_by_id(id).await
    }

    async fn insert(&self, vehicle: &mut Vehicle) -> Result<()> {
        (**self).insert(vehicle).await
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<()> {
        (**self).update(vehicle).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id).await
    }
}
