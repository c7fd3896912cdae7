//! API Module
//!
//! HTTP handlers and routing for the vehicle registry REST API.
//!
//! # Endpoints
//! - `POST /api/v1/vehicles` - Create a vehicle
//! - `GET /api/v1/vehicles` - List vehicles
//! - `GET /api/v1/vehicles/:id` - Fetch a vehicle
//! - `PATCH /api/v1/vehicles/:id` - Update a vehicle
//! - `DELETE /api/v1/vehicles/:id` - Delete a vehicle
//! - `GET /api/v1/cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
