//! API Handlers
//!
//! HTTP request handlers for each vehicle registry endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::cache::{CacheStore, CachingVehicleProvider, StatsRecorder};
use crate::config::Config;
use crate::error::{RegistryError, Result};
use crate::models::{
    CreateVehicleRequest, HealthResponse, StatsResponse, UpdateVehicleRequest, VehicleResponse,
};
use crate::repository::{SqliteVehicleRepository, VehicleProvider};
use crate::service::VehicleService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: VehicleService,
    /// Live cache counters, None when caching is disabled
    pub cache_stats: Option<StatsRecorder>,
}

impl AppState {
    pub fn new(service: VehicleService, cache_stats: Option<StatsRecorder>) -> Self {
        Self {
            service,
            cache_stats,
        }
    }

    /// Wires the SQLite repository, the cache (unless disabled) and the
    /// service from configuration.
    pub fn from_config(config: &Config, pool: SqlitePool) -> Self {
        let repository = SqliteVehicleRepository::new(pool);

        let (provider, cache_stats) = if config.cache_enabled() {
            let store = CacheStore::new(config.cache_ttl()).with_capacity(config.cache_capacity());
            let cached = CachingVehicleProvider::with_store(repository, store);
            let stats = cached.stats_recorder();
            let provider: Arc<dyn VehicleProvider> = Arc::new(cached);
            (provider, Some(stats))
        } else {
            let provider: Arc<dyn VehicleProvider> = Arc::new(repository);
            (provider, None)
        };

        Self::new(
            VehicleService::new(provider, config.request_timeout()),
            cache_stats,
        )
    }
}

fn parse_id(id: &str) -> Result<()> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| RegistryError::InvalidInput("invalid id format, must be UUID".to_string()))
}

fn rejection_to_error(rejection: JsonRejection) -> RegistryError {
    RegistryError::InvalidInput(rejection.body_text())
}

/// Handler for POST /api/v1/vehicles
pub async fn create_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(req) = payload.map_err(rejection_to_error)?;

    let resp = state.service.create(req).await?;
    let location = format!("/api/v1/vehicles/{}", resp.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(resp)).into_response())
}

/// Handler for GET /api/v1/vehicles
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<VehicleResponse>>> {
    let vehicles = state.service.list().await?;
    Ok(Json(vehicles))
}

/// Handler for GET /api/v1/vehicles/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VehicleResponse>> {
    parse_id(&id)?;
    let vehicle = state.service.get(&id).await?;
    Ok(Json(vehicle))
}

/// Handler for PATCH /api/v1/vehicles/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> Result<Json<VehicleResponse>> {
    parse_id(&id)?;
    let Json(req) = payload.map_err(rejection_to_error)?;

    let vehicle = state.service.update(&id, req).await?;
    Ok(Json(vehicle))
}

/// Handler for DELETE /api/v1/vehicles/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    parse_id(&id)?;
    state.service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /api/v1/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state
        .cache_stats
        .as_ref()
        .ok_or_else(|| RegistryError::NotFound("caching is disabled".to_string()))?;

    Ok(Json(stats.snapshot().into()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
