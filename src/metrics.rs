//! Metrics Module
//!
//! Prometheus request metrics for the API router, exported in text format on
//! a separate listener.
//!
//! # Metrics
//! - `http_requests_total{method,route,status}` - Requests served
//! - `http_request_duration_seconds{method,route}` - Request latency

use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use prometheus::{
    register_histogram_vec_with_registry, register_int_counter_vec_with_registry, Encoder,
    HistogramVec, IntCounterVec, Registry, TextEncoder,
};
use tracing::error;

/// Route label for requests that matched no route
pub const UNMATCHED_ROUTE: &str = "unmatched";

// == HTTP Metrics ==
/// Request counters and latency histograms behind their own registry.
///
/// Cheap to clone; every clone records into the same metric families.
#[derive(Clone)]
pub struct HttpMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
}

impl HttpMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests_total = register_int_counter_vec_with_registry!(
            "http_requests_total",
            "Total number of HTTP requests labeled by method, route, and status.",
            &["method", "route", "status"],
            registry
        )?;

        let request_duration = register_histogram_vec_with_registry!(
            "http_request_duration_seconds",
            "HTTP request latency in seconds.",
            &["method", "route"],
            prometheus::DEFAULT_BUCKETS.to_vec(),
            registry
        )?;

        Ok(Self {
            registry,
            requests_total,
            request_duration,
        })
    }

    /// Records one finished request.
    ///
    /// `status` is labeled with its reason phrase ("OK", "Not Found").
    pub fn observe(&self, method: &str, route: &str, status: StatusCode, elapsed: Duration) {
        let status = status.canonical_reason().unwrap_or("Unknown");
        self.requests_total
            .with_label_values(&[method, route, status])
            .inc();
        self.request_duration
            .with_label_values(&[method, route])
            .observe(elapsed.as_secs_f64());
    }

    /// Renders every registered family in the Prometheus text format.
    pub fn render(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

// == Middleware ==
/// Times each request and labels it with the route template, not the raw
/// path, so `/api/v1/vehicles/:id` stays one series.
pub async fn track_metrics(
    State(metrics): State<HttpMetrics>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

    let response = next.run(req).await;
    metrics.observe(&method, &route, response.status(), start.elapsed());
    response
}

// == Exporter ==
/// Router for the metrics listener: `GET /metrics`.
pub fn metrics_router(metrics: HttpMetrics) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<HttpMetrics>) -> Response {
    match metrics.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, TextEncoder::new().format_type().to_string())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
