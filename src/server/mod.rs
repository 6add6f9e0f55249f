//! Pandex Web Server
//!
//! Serves a dashboard over HTTP, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /` - The rendered page
//! - `GET /_dash-layout` - Planned layout as JSON
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use pandex::dashboard::Dashboard;
//! use pandex::server::{serve, AppState, ServeOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dashboard = Arc::new(Dashboard::builder("Empty").build());
//!     let layout = dashboard.build_layout()?;
//!     let options = ServeOptions::new("127.0.0.1", 8050);
//!
//!     serve(AppState::new(dashboard, layout, options.clone()), &options).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use state::{AppState, ServeOptions};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let production = state.options.production_mode();
    let timeout = state.options.request_timeout();

    // Create shared state
    let shared_state = Arc::new(state);

    let router = Router::new()
        .route("/", get(routes::page::dashboard_page))
        .route("/_dash-layout", get(routes::page::dashboard_layout))
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http());

    let router = if production {
        router.layer(TimeoutLayer::new(timeout))
    } else {
        router
    };

    router.with_state(shared_state)
}

/// Start the server and block until shutdown
pub async fn serve(state: AppState, options: &ServeOptions) -> Result<(), ServerError> {
    let title = state.dashboard.title().to_string();
    let router = build_router(state);

    let addr = options.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        dashboard = %title,
        debug = options.debug,
        production = options.production_mode(),
        "Pandex listening on http://{}",
        addr
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Pandex shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
