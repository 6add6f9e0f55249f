//! # Pandex
//!
//! Declarative web dashboards - describe a grid of charts, each backed by a
//! table or a function that produces one, and serve it as a page.
//!
//! ## Features
//!
//! - **Tidy reshaping**: wide tables become long-form (index, variable, value)
//! - **Grid layout**: up to four charts per row on a twelve-unit grid
//! - **Live data**: producers are re-run on every page load, or once at startup
//! - **Theming**: light and dark themes for pages, figures and tables
//! - **CSV manifests**: TOML dashboards over CSV files, served by `pandex-cli`
//!
//! ## Modules
//!
//! - [`table`]: Tables, series and the tidy reshaper
//! - [`chart`]: Chart kinds and descriptors
//! - [`layout`]: Grid planner, theme and figure defaults
//! - [`render`]: Render engine trait and the HTML renderer
//! - [`dashboard`]: Dashboards, reload policies and manifests
//! - [`server`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pandex::chart::{ChartDescriptor, ChartKind};
//! use pandex::dashboard::Dashboard;
//! use pandex::table::{Table, Value};
//!
//! let prices = Table::from_columns(vec![
//!     ("apples", vec![Value::Float(1.0), Value::Float(1.25)]),
//!     ("pears", vec![Value::Float(2.0), Value::Float(1.75)]),
//! ])?;
//!
//! let dashboard = Dashboard::builder("Fruit")
//!     .section("Prices")
//!     .row(vec![
//!         ChartDescriptor::simple(ChartKind::Line, "Trend", prices.clone()),
//!         ChartDescriptor::table("Raw", prices),
//!     ])
//!     .build();
//!
//! let html = dashboard.render_page()?;
//! assert!(html.contains("Fruit"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod layout;
pub mod logging;
pub mod render;
pub mod server;
pub mod table;

// Re-export top-level types for convenience
pub use table::{reshape, Column, Data, Series, Table, TableError, TableResult, TidyTable, Value};

pub use chart::{ChartDescriptor, ChartKind, DataSource, Producer, ProducerArgs};

pub use layout::{GridLayoutPlanner, LayoutDefaults, LayoutRow, RowItem, RowPlan, Theme};

pub use render::{HtmlRenderer, RenderEngine, RenderError};

pub use dashboard::{
    Dashboard, DashboardBuilder, DashboardError, DashboardManifest, DashboardResult,
    PageLayout, ReloadInterval,
};

pub use server::{build_router, serve, AppState, ServeOptions, ServerError};

pub use config::{Config, ConfigError, DashboardConfig, LoggingConfig, ServerConfig};
