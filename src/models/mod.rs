//! Domain record and the request/response models for the vehicle API
//!
//! Request/response types are the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP bodies; `Vehicle` is what the persistence
//! provider and the cache hold.

pub mod requests;
pub mod responses;
pub mod vehicle;

// Re-export commonly used types
pub use requests::{CreateVehicleRequest, UpdateVehicleRequest};
pub use responses::{
    to_responses, ErrorResponse, HealthResponse, StatsResponse, VehicleResponse,
};
pub use vehicle::{Vehicle, MIN_MODEL_YEAR};
