//! Rendering engine boundary
//!
//! The dashboard never builds markup itself. It hands resolved tables and
//! layout decisions to a `RenderEngine` and assembles whatever comes back.

use chrono::{DateTime, Utc};
use maud::Markup;

use super::error::RenderResult;
use crate::chart::ChartKind;
use crate::layout::{ItemPlan, LayoutDefaults, Theme};
use crate::table::Table;

/// Everything needed to render one chart
#[derive(Debug, Clone, Copy)]
pub struct ChartRequest<'a> {
    /// Element id
    pub id: &'a str,
    pub title: &'a str,
    pub kind: ChartKind,
    /// Resolved (and possibly reshaped) data
    pub table: &'a Table,
    /// Span, class, style and themed options for this chart
    pub plan: &'a ItemPlan,
    /// Page-wide figure defaults
    pub defaults: &'a LayoutDefaults,
}

/// Page-level rendering context
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub theme: Theme,
    pub rendered_at: DateTime<Utc>,
}

/// Turns chart requests into components and components into a page
pub trait RenderEngine: Send + Sync {
    /// Render one chart or table
    fn render_chart(&self, request: &ChartRequest<'_>) -> RenderResult<Markup>;

    /// Render a section heading occupying a row slot
    fn render_section(&self, title: &str, plan: &ItemPlan) -> Markup;

    /// Wrap components into a container with the given CSS class
    fn container(&self, children: Vec<Markup>, class_name: &str) -> Markup;

    /// Assemble the full page from rendered rows
    fn page(&self, context: &PageContext<'_>, rows: Vec<Markup>) -> Markup;

    /// Standalone page served when a render pass fails
    fn error_page(&self, title: &str, theme: Theme, detail: Option<&str>) -> Markup;
}
