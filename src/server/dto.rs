//! Data Transfer Objects
//!
//! JSON response types for the health endpoints.

use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Dashboard title
    pub dashboard: String,
    /// "page_refresh" or "never"
    pub reload_interval: String,
    /// Layout status: ok, error
    pub layout: String,
    /// Number of chart descriptors
    pub charts: usize,
    /// Pages rendered since startup
    pub renders: u64,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
