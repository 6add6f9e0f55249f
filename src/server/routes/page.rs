//! Page Routes
//!
//! - GET / - The dashboard page
//! - GET /_dash-layout - Planned layout as JSON

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::dashboard::PageLayout;
use crate::server::error::ServerError;
use crate::server::state::AppState;

/// GET /
///
/// Renders every chart for this request under `page_refresh`, or serves the
/// page rendered at startup under `never`. A failing chart turns this
/// response into an error page; the server keeps running.
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Response {
    let show_details = state.options.show_error_details();

    let html = match &state.layout {
        PageLayout::Static(html) => html.to_string(),
        PageLayout::PerRequest => {
            let dashboard = Arc::clone(&state.dashboard);
            let rendered = tokio::task::spawn_blocking(move || dashboard.render_page())
                .await
                .map_err(|e| ServerError::Internal(format!("Render task failed: {}", e)))
                .and_then(|r| r.map_err(ServerError::from));

            match rendered {
                Ok(html) => html,
                Err(e) => return e.into_page(&state.dashboard, show_details),
            }
        }
    };

    let renders = state.record_render();
    tracing::debug!(renders, "Served dashboard page");

    Html(html).into_response()
}

/// GET /_dash-layout
///
/// The planned rows without resolving any data.
pub async fn dashboard_layout(State(state): State<Arc<AppState>>) -> Response {
    match state.dashboard.layout_snapshot() {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => ServerError::from(e).into_page(&state.dashboard, state.options.show_error_details()),
    }
}
