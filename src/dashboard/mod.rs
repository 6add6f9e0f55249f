//! Pandex Dashboards
//!
//! A `Dashboard` is a title, rows of chart descriptors, a theme and a reload
//! policy. Rendering walks the rows top to bottom, resolving each chart's data
//! and handing it to the render engine; the first failure aborts the pass.
//!
//! # Example
//!
//! ```rust,no_run
//! use pandex::chart::{ChartDescriptor, ChartKind, Producer, ProducerArgs};
//! use pandex::dashboard::Dashboard;
//! use pandex::server::ServeOptions;
//! use pandex::table::{Table, Value};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let squares = Producer::new(|args: &ProducerArgs| {
//!         let rows = args.usize_or("rows", 10) as i64;
//!         Ok(Table::from_columns(vec![("square", (0..rows).map(|i| Value::Int(i * i)).collect())])?)
//!     });
//!
//!     let dashboard = Dashboard::builder("Squares")
//!         .row(vec![ChartDescriptor::simple(ChartKind::Line, "Squares", squares).arg("rows", 50)])
//!         .dark_theme(true)
//!         .build();
//!
//!     dashboard.run(ServeOptions::new("127.0.0.1", 8050)).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod manifest;

pub use error::{DashboardError, DashboardResult};
pub use manifest::{ChartManifest, DashboardManifest, RowManifest};

use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use crate::layout::{GridLayoutPlanner, LayoutDefaults, LayoutRow, RowItem, RowPlan, Theme};
use crate::render::{ChartRequest, HtmlRenderer, PageContext, RenderEngine};
use crate::server::{self, AppState, ServeOptions, ServerError};

/// Title used when neither the caller nor the config names the dashboard
pub const DEFAULT_TITLE: &str = "Pandex Dashboard";

/// When the page is recomputed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadInterval {
    /// Recompute every chart on every page load
    PageRefresh,
    /// Render once at startup and serve that page forever
    Never,
}

impl FromStr for ReloadInterval {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page_refresh" => Ok(ReloadInterval::PageRefresh),
            "never" => Ok(ReloadInterval::Never),
            other => Err(DashboardError::Configuration(format!(
                "reload_interval '{}' not yet supported",
                other
            ))),
        }
    }
}

impl fmt::Display for ReloadInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReloadInterval::PageRefresh => write!(f, "page_refresh"),
            ReloadInterval::Never => write!(f, "never"),
        }
    }
}

/// What the server hands out for `GET /`
#[derive(Debug, Clone)]
pub enum PageLayout {
    /// Render the dashboard for every request
    PerRequest,
    /// Serve this pre-rendered page
    Static(Arc<str>),
}

/// Planned layout, as exposed over HTTP and the CLI
#[derive(Debug, Clone, Serialize)]
pub struct LayoutSnapshot {
    pub title: String,
    pub dark_theme: bool,
    pub reload_interval: String,
    pub rows: Vec<RowPlan>,
}

/// A titled grid of charts
#[derive(Clone)]
pub struct Dashboard {
    title: String,
    rows: Vec<LayoutRow>,
    theme: Theme,
    reload_interval: String,
    defaults: LayoutDefaults,
    renderer: Arc<dyn RenderEngine>,
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("title", &self.title)
            .field("rows", &self.rows.len())
            .field("theme", &self.theme)
            .field("reload_interval", &self.reload_interval)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn builder(title: impl Into<String>) -> DashboardBuilder {
        DashboardBuilder::new(title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[LayoutRow] {
        &self.rows
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn layout_defaults(&self) -> &LayoutDefaults {
        &self.defaults
    }

    /// Number of chart descriptors across all rows
    pub fn chart_count(&self) -> usize {
        self.rows.iter().map(|r| r.charts().count()).sum()
    }

    /// Parse the configured reload policy
    pub fn reload_policy(&self) -> DashboardResult<ReloadInterval> {
        self.reload_interval.parse()
    }

    pub fn planner(&self) -> GridLayoutPlanner {
        GridLayoutPlanner::new(self.theme)
    }

    /// Plan every row without rendering anything
    pub fn plan(&self) -> DashboardResult<Vec<RowPlan>> {
        self.planner().plan(&self.rows)
    }

    pub fn layout_snapshot(&self) -> DashboardResult<LayoutSnapshot> {
        Ok(LayoutSnapshot {
            title: self.title.clone(),
            dark_theme: self.theme.is_dark(),
            reload_interval: self.reload_interval.clone(),
            rows: self.plan()?,
        })
    }

    /// Run one full render pass and return the page HTML
    pub fn render_page(&self) -> DashboardResult<String> {
        let started = Instant::now();
        let plans = self.plan()?;

        let mut rendered_rows = Vec::with_capacity(self.rows.len());
        for (row, plan) in self.rows.iter().zip(&plans) {
            let mut children = Vec::with_capacity(row.len());

            for (item, item_plan) in row.items().iter().zip(&plan.items) {
                let markup = match item {
                    RowItem::Section(title) => self.renderer.render_section(title, item_plan),
                    RowItem::Chart(chart) => {
                        let table = chart.prepared()?;
                        self.renderer.render_chart(&ChartRequest {
                            id: &chart.id,
                            title: &chart.title,
                            kind: chart.kind,
                            table: &table,
                            plan: item_plan,
                            defaults: &self.defaults,
                        })?
                    }
                };
                children.push(markup);
            }

            rendered_rows.push(self.renderer.container(children, "row"));
        }

        let page = self.renderer.page(
            &PageContext {
                title: &self.title,
                theme: self.theme,
                rendered_at: Utc::now(),
            },
            rendered_rows,
        );

        tracing::debug!(
            title = %self.title,
            rows = self.rows.len(),
            charts = self.chart_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Rendered dashboard"
        );

        Ok(page.into_string())
    }

    /// Error page in this dashboard's theme, from its own render engine
    pub fn render_error_page(&self, title: &str, detail: Option<&str>) -> String {
        self.renderer.error_page(title, self.theme, detail).into_string()
    }

    /// Validate the reload policy and prepare what `GET /` serves
    ///
    /// With `never` the page is rendered here, once.
    pub fn build_layout(&self) -> DashboardResult<PageLayout> {
        match self.reload_policy()? {
            ReloadInterval::PageRefresh => {
                self.plan()?;
                Ok(PageLayout::PerRequest)
            }
            ReloadInterval::Never => {
                let html = self.render_page()?;
                Ok(PageLayout::Static(Arc::from(html)))
            }
        }
    }

    /// Build the layout and serve the dashboard until shutdown
    pub async fn run(self, options: ServeOptions) -> Result<(), ServerError> {
        let dashboard = Arc::new(self);

        let for_layout = Arc::clone(&dashboard);
        let layout = tokio::task::spawn_blocking(move || for_layout.build_layout())
            .await
            .map_err(|e| ServerError::Internal(format!("Layout task failed: {}", e)))??;

        tracing::info!(
            title = %dashboard.title,
            rows = dashboard.rows.len(),
            charts = dashboard.chart_count(),
            reload_interval = %dashboard.reload_interval,
            "Dashboard layout ready"
        );

        let state = AppState::new(dashboard, layout, options.clone());
        server::serve(state, &options).await
    }
}

/// Builder for [`Dashboard`]
pub struct DashboardBuilder {
    title: String,
    rows: Vec<LayoutRow>,
    theme: Theme,
    reload_interval: String,
    defaults: LayoutDefaults,
    renderer: Arc<dyn RenderEngine>,
}

impl DashboardBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
            theme: Theme::Light,
            reload_interval: ReloadInterval::PageRefresh.to_string(),
            defaults: LayoutDefaults::default(),
            renderer: Arc::new(HtmlRenderer::new()),
        }
    }

    /// Append a row of charts and/or sections
    pub fn row<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RowItem>,
    {
        self.rows.push(LayoutRow::new(items));
        self
    }

    /// Append a row holding a single section heading
    pub fn section(self, title: impl Into<String>) -> Self {
        self.row(vec![RowItem::section(title)])
    }

    /// Append already built rows
    pub fn rows(mut self, rows: impl IntoIterator<Item = LayoutRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn dark_theme(mut self, dark: bool) -> Self {
        self.theme = Theme::from_dark_flag(dark);
        self
    }

    /// Reload policy by name; checked when the layout is built
    pub fn reload_interval(mut self, reload_interval: impl Into<String>) -> Self {
        self.reload_interval = reload_interval.into();
        self
    }

    pub fn layout_defaults(mut self, defaults: LayoutDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Use a different render engine
    pub fn renderer(mut self, renderer: impl RenderEngine + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    pub fn build(self) -> Dashboard {
        Dashboard {
            title: self.title,
            rows: self.rows,
            theme: self.theme,
            reload_interval: self.reload_interval,
            defaults: self.defaults,
            renderer: self.renderer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartDescriptor, ChartKind, Producer, ProducerArgs};
    use crate::table::{Table, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn table() -> Table {
        Table::from_columns(vec![
            ("a", vec![Value::Float(1.0), Value::Float(2.5)]),
            ("b", vec![Value::Float(3.25), Value::Float(4.0)]),
        ])
        .unwrap()
    }

    fn chart(title: &str) -> ChartDescriptor {
        ChartDescriptor::simple(ChartKind::Line, title, table())
    }

    #[test]
    fn test_reload_interval_parsing() {
        assert_eq!("page_refresh".parse::<ReloadInterval>().unwrap(), ReloadInterval::PageRefresh);
        assert_eq!("never".parse::<ReloadInterval>().unwrap(), ReloadInterval::Never);

        let err = "nightly".parse::<ReloadInterval>().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("not yet supported"));
    }

    #[test]
    fn test_unsupported_reload_interval_fails_at_layout_build() {
        let dashboard = Dashboard::builder("Nightly")
            .row(vec![chart("a")])
            .reload_interval("nightly")
            .build();

        match dashboard.build_layout() {
            Err(DashboardError::Configuration(msg)) => assert!(msg.contains("not yet supported")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_page_contains_rows_and_charts() {
        let dashboard = Dashboard::builder("Example Dashboard")
            .section("Overview")
            .row(vec![chart("Bar"), chart("Line")])
            .row(vec![chart("Scatter")])
            .build();

        let html = dashboard.render_page().unwrap();

        assert!(html.contains("Example Dashboard"));
        assert!(html.contains("Overview"));
        assert!(html.contains("six columns"));
        assert!(html.contains("twelve columns"));
        assert_eq!(html.matches("Plotly.newPlot(").count(), 3);
        assert_eq!(dashboard.chart_count(), 3);
    }

    #[test]
    fn test_five_chart_row_aborts_render() {
        let dashboard = Dashboard::builder("Too wide")
            .row((0..5).map(|i| chart(&format!("c{}", i))))
            .build();

        assert!(matches!(dashboard.render_page(), Err(DashboardError::Configuration(_))));
        assert!(matches!(dashboard.build_layout(), Err(DashboardError::Configuration(_))));
    }

    #[test]
    fn test_failing_producer_fails_the_pass() {
        let broken = Producer::new(|_: &ProducerArgs| -> anyhow::Result<Table> {
            anyhow::bail!("no data")
        });
        let dashboard = Dashboard::builder("Broken")
            .row(vec![chart("fine"), ChartDescriptor::new(ChartKind::Bar, "Broken chart", broken)])
            .build();

        match dashboard.render_page() {
            Err(DashboardError::DataResolution { title, .. }) => assert_eq!(title, "Broken chart"),
            other => panic!("expected data resolution error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_page_refresh_recomputes_and_never_renders_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let producer = Producer::new(move |_: &ProducerArgs| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(table())
        });

        let refreshing = Dashboard::builder("Live")
            .row(vec![ChartDescriptor::simple(ChartKind::Line, "Live", producer.clone())])
            .build();
        assert!(matches!(refreshing.build_layout().unwrap(), PageLayout::PerRequest));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        refreshing.render_page().unwrap();
        refreshing.render_page().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let frozen = Dashboard::builder("Frozen")
            .row(vec![ChartDescriptor::simple(ChartKind::Line, "Frozen", producer)])
            .reload_interval("never")
            .build();
        match frozen.build_layout().unwrap() {
            PageLayout::Static(html) => assert!(html.contains("Frozen")),
            PageLayout::PerRequest => panic!("expected a static page"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_layout_snapshot() {
        let dashboard = Dashboard::builder("Snap")
            .row(vec![chart("a").span(8), chart("b")])
            .dark_theme(true)
            .build();

        let snapshot = dashboard.layout_snapshot().unwrap();
        assert!(snapshot.dark_theme);
        assert_eq!(snapshot.reload_interval, "page_refresh");
        assert_eq!(snapshot.rows[0].items[0].span, 8);
        assert_eq!(snapshot.rows[0].items[1].span, 6);
        assert_eq!(snapshot.rows[0].items[1].layout["template"], "plotly_dark");
    }
}
