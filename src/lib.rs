//! Vehicle Registry - A record service for vehicles with a TTL read-through cache
//!
//! The caching decorator in [`cache`] sits between [`service`] and the SQLite
//! repository and satisfies the same [`VehicleProvider`] contract.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repository;
pub mod service;

pub use api::AppState;
pub use cache::{CacheStats, CacheStore, CachingVehicleProvider};
pub use config::Config;
pub use error::{RegistryError, Result};
pub use metrics::HttpMetrics;
pub use models::Vehicle;
pub use repository::{SqliteVehicleRepository, VehicleProvider};
pub use service::VehicleService;
