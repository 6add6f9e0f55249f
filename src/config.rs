//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::layout::LayoutDefaults;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub layout: LayoutDefaults,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Show error details on error pages and log verbosely
    #[serde(default)]
    pub debug: bool,

    /// Serve in production mode (request timeouts, terse errors).
    /// `debug` takes precedence.
    #[serde(default)]
    pub alternate_server: bool,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            alternate_server: false,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Dashboard-wide settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Page title; binaries fall back to their own
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub dark_theme: bool,

    /// "page_refresh" or "never"
    #[serde(default = "default_reload_interval")]
    pub reload_interval: String,

    /// Decimal places kept for float cells
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

fn default_reload_interval() -> String {
    "page_refresh".to_string()
}

fn default_decimal_places() -> u32 {
    crate::chart::DEFAULT_DECIMAL_PLACES
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: None,
            dark_theme: false,
            reload_interval: default_reload_interval(),
            decimal_places: default_decimal_places(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|s| s.to_lowercase() != "false" && s != "0")
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("pandex").join("config.toml")),
            Some(PathBuf::from("/etc/pandex/config.toml")),
            Some(PathBuf::from("./pandex.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("PANDEX_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PANDEX_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Some(debug) = env_flag("PANDEX_DEBUG") {
            self.server.debug = debug;
        }
        if let Some(alternate) = env_flag("PANDEX_ALTERNATE_SERVER") {
            self.server.alternate_server = alternate;
        }

        // Dashboard overrides
        if let Ok(title) = std::env::var("PANDEX_TITLE") {
            self.dashboard.title = Some(title);
        }
        if let Some(dark) = env_flag("PANDEX_DARK_THEME") {
            self.dashboard.dark_theme = dark;
        }
        if let Ok(interval) = std::env::var("PANDEX_RELOAD_INTERVAL") {
            self.dashboard.reload_interval = interval;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("PANDEX_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PANDEX_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Pandex Configuration
#
# Environment variables override these settings:
# - PANDEX_HOST
# - PANDEX_PORT
# - PANDEX_DEBUG
# - PANDEX_ALTERNATE_SERVER
# - PANDEX_TITLE
# - PANDEX_DARK_THEME
# - PANDEX_RELOAD_INTERVAL
# - PANDEX_LOG_LEVEL
# - PANDEX_LOG_FORMAT

[server]
# Host to bind to
host = "127.0.0.1"

# Port to listen on
port = 8050

# Show error details in error pages
debug = false

# Production mode: request timeouts and terse error pages.
# Ignored while debug is on.
alternate_server = false

# Request timeout in seconds (production mode only)
request_timeout_secs = 30

[dashboard]
# Defaults for every dashboard; a manifest's own settings win.
# Page title
# title = "Pandex Dashboard"

# Dark theme for pages, figures and tables
dark_theme = false

# When charts are recomputed: "page_refresh" or "never"
reload_interval = "page_refresh"

# Decimal places kept for float cells
decimal_places = 2

[layout]
# Figure defaults applied before per-chart overrides
autosize = true
height = 500
hovermode = "closest"
legend_orientation = "v"

[layout.margin]
l = 35
r = 35
b = 35
t = 20

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
