//! Server Error Types
//!
//! Errors raised while serving the dashboard. A failed render pass becomes an
//! HTML error page for that request only.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::dashboard::{Dashboard, DashboardError};
use crate::layout::Theme;
use crate::render::{HtmlRenderer, RenderEngine};

/// Heading of every error page
const ERROR_TITLE: &str = "Error rendering dashboard";

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    /// Layout build or render pass failed
    #[error("Dashboard error: {0}")]
    Dashboard(#[from] DashboardError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    fn code(&self) -> &'static str {
        match self {
            ServerError::Dashboard(DashboardError::Configuration(_)) => "CONFIGURATION_ERROR",
            ServerError::Dashboard(DashboardError::DataResolution { .. }) => "DATA_ERROR",
            ServerError::Dashboard(_) => "RENDER_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Io(_) => "IO_ERROR",
        }
    }

    /// Log the failure under a fresh request id and return the page detail
    fn report(&self, show_details: bool) -> Option<String> {
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %self.code(),
            error_message = %self,
            "Dashboard request failed"
        );

        show_details.then(|| format!("{}\n\nrequest id: {}", self, request_id))
    }

    /// Error page drawn by the dashboard's renderer, with the failure detail
    /// only when asked for
    pub fn into_page(self, dashboard: &Dashboard, show_details: bool) -> Response {
        let detail = self.report(show_details);
        let page = dashboard.render_error_page(ERROR_TITLE, detail.as_deref());

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        self.report(false);
        let page = HtmlRenderer::new().error_page(ERROR_TITLE, Theme::Light, None);

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;
