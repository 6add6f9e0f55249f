//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::ServerConfig;
use crate::dashboard::{Dashboard, PageLayout};

/// Shared application state for all handlers
pub struct AppState {
    /// Dashboard rendered for `GET /`
    pub dashboard: Arc<Dashboard>,
    /// Current page layout slot, filled before the server starts
    pub layout: PageLayout,
    /// Server options
    pub options: Arc<ServeOptions>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    renders: AtomicU64,
}

impl AppState {
    pub fn new(dashboard: Arc<Dashboard>, layout: PageLayout, options: ServeOptions) -> Self {
        Self {
            dashboard,
            layout,
            options: Arc::new(options),
            start_time: Instant::now(),
            renders: AtomicU64::new(0),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Count a page render, returning the new total
    pub fn record_render(&self) -> u64 {
        self.renders.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn render_count(&self) -> u64 {
        self.renders.load(Ordering::Relaxed)
    }
}

/// How the dashboard is served
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Show error details on error pages
    pub debug: bool,
    /// Production mode: request timeout layer and terse error pages.
    /// Ignored when `debug` is set.
    pub alternate_server: bool,
    /// Request timeout in seconds, production mode only
    pub request_timeout_secs: u64,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for ServeOptions {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            debug: config.debug,
            alternate_server: config.alternate_server,
            request_timeout_secs: config.request_timeout_secs,
        }
    }
}

impl ServeOptions {
    /// Create options with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Builder method: show error details
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builder method: serve in production mode
    pub fn alternate_server(mut self, alternate_server: bool) -> Self {
        self.alternate_server = alternate_server;
        self
    }

    /// Builder method: request timeout for production mode
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether the production middleware is installed; `debug` wins
    pub fn production_mode(&self) -> bool {
        self.alternate_server && !self.debug
    }

    /// Whether error pages carry the failure detail
    pub fn show_error_details(&self) -> bool {
        self.debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_options() {
        let options = ServeOptions::new("0.0.0.0", 9000).debug(true);
        assert_eq!(options.addr(), "0.0.0.0:9000");
        assert!(options.show_error_details());
        assert!(!options.production_mode());
        assert_eq!(options.request_timeout(), Duration::from_secs(30));

        let production = ServeOptions::default().alternate_server(true).request_timeout_secs(5);
        assert!(production.production_mode());
        assert!(!production.show_error_details());
        assert_eq!(production.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_debug_takes_precedence_over_alternate_server() {
        let options = ServeOptions::default().debug(true).alternate_server(true);
        assert!(options.show_error_details());
        assert!(!options.production_mode());
    }

    #[test]
    fn test_from_server_config() {
        let config = ServerConfig {
            port: 8123,
            debug: true,
            ..Default::default()
        };
        let options = ServeOptions::from(&config);
        assert_eq!(options.addr(), "127.0.0.1:8123");
        assert!(options.debug);
    }
}
