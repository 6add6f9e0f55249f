//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (layout plans cleanly)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::server::dto::HealthResponse;
use crate::server::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 while every row still plans without error.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if check_layout_health(&state) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with dashboard details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let layout_ok = check_layout_health(&state);
    let dashboard = &state.dashboard;

    Json(HealthResponse {
        status: if layout_ok { "healthy" } else { "degraded" }.to_string(),
        dashboard: dashboard.title().to_string(),
        reload_interval: dashboard
            .reload_policy()
            .map(|p| p.to_string())
            .unwrap_or_else(|_| "unsupported".to_string()),
        layout: if layout_ok { "ok" } else { "error" }.to_string(),
        charts: dashboard.chart_count(),
        renders: state.render_count(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Planning is pure, so it doubles as a cheap layout check
fn check_layout_health(state: &AppState) -> bool {
    state.dashboard.plan().is_ok()
}
