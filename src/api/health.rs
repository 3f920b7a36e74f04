//! Liveness and readiness probes.

use axum::{Json, Router, extract::State, routing::get};
use time::OffsetDateTime;

use super::{AppState, schemas::HealthStatus};

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
}

fn probe(state: &AppState, status: &str) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: status.to_string(),
        timestamp: OffsetDateTime::now_utc(),
        version: state.config.app_version.clone(),
    })
}

/// Report that the process is up and serving requests.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is healthy", body = HealthStatus))
)]
pub(crate) async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    probe(&state, "healthy")
}

/// Report that the service can accept traffic.
///
/// Storage is in-process, so readiness has no external dependencies to check.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses((status = 200, description = "Service is ready", body = HealthStatus))
)]
pub(crate) async fn readiness_check(State(state): State<AppState>) -> Json<HealthStatus> {
    probe(&state, "ready")
}
