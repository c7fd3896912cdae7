//! Response DTOs for the vehicle API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::vehicle::Vehicle;
use crate::cache::CacheStats;

/// Public view of a vehicle record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            created_at: vehicle.created_at,
        }
    }
}

/// Maps a listing of records into response bodies, preserving order.
pub fn to_responses(vehicles: Vec<Vehicle>) -> Vec<VehicleResponse> {
    vehicles.into_iter().map(VehicleResponse::from).collect()
}

/// Response body for the cache stats endpoint (GET /api/v1/cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of lookups answered from the cache
    pub hits: u64,
    /// Number of lookups that fell through to the store
    pub misses: u64,
    /// Number of records evicted by the capacity bound
    pub evictions: u64,
    /// Current number of records held, fresh or stale
    pub total_entries: usize,
    /// Whether a listing snapshot is currently held
    pub listing_cached: bool,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            listing_cached: stats.listing_cached,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_response_from_record() {
        let mut vehicle = Vehicle::new("Toyota", "Camry", 2021);
        vehicle.id = "8f0c9a3e-6a43-4d5c-9d0e-3b1f2c4d5e6f".to_string();

        let resp = VehicleResponse::from(vehicle);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"brand\":\"Toyota\""));
        assert!(json.contains("\"year\":2021"));
        assert!(json.contains("created_at"));
    }

    #[test]
    fn test_to_responses_keeps_order() {
        let vehicles = vec![
            Vehicle::new("Audi", "Quattro", 1985),
            Vehicle::new("Saab", "Sonett", 1970),
        ];
        let responses = to_responses(vehicles);
        assert_eq!(responses[0].brand, "Audi");
        assert_eq!(responses[1].brand, "Saab");
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            total_entries: 100,
            listing_cached: true,
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert!(resp.listing_cached);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("vehicle not found");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"error":"vehicle not found"}"#);
    }
}
