//! API Routes
//!
//! Configures the Axum router with all vehicle registry endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, get_handler, health_handler, list_handler, stats_handler,
    update_handler, AppState,
};
use crate::metrics::{track_metrics, HttpMetrics};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/v1/vehicles` - Create a vehicle
/// - `GET /api/v1/vehicles` - List vehicles, newest first
/// - `GET /api/v1/vehicles/:id` - Fetch one vehicle
/// - `PATCH /api/v1/vehicles/:id` - Partially update a vehicle
/// - `DELETE /api/v1/vehicles/:id` - Delete a vehicle
/// - `GET /api/v1/cache/stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Metrics: Counts and times requests into `metrics`
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState, metrics: HttpMetrics) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/vehicles", post(create_handler).get(list_handler))
        .route(
            "/api/v1/vehicles/:id",
            get(get_handler).patch(update_handler).delete(delete_handler),
        )
        .route("/api/v1/cache/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn_with_state(metrics, track_metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
