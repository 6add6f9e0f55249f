//! Grid layout planning
//!
//! Maps rows of items onto a 12-unit grid. Each row holds one to four items;
//! items without a span override share the row evenly using floor division,
//! so rows whose length does not divide 12 leave the remainder unused.
//!
//! Planning is mutation-free: descriptors are read, never written, and the
//! result is a `RowPlan` per row keyed by descriptor id.

use serde::Serialize;

use super::theme::Theme;
use crate::chart::{ChartDescriptor, Options, Style};
use crate::dashboard::{DashboardError, DashboardResult};

/// Number of grid units in one row
pub const GRID_UNITS: u8 = 12;

/// Maximum number of items per row
pub const MAX_ITEMS_PER_ROW: usize = 4;

/// One slot in a layout row
#[derive(Debug, Clone)]
pub enum RowItem {
    Chart(ChartDescriptor),
    /// A centred heading
    Section(String),
}

impl RowItem {
    pub fn section(title: impl Into<String>) -> Self {
        RowItem::Section(title.into())
    }

    pub fn as_chart(&self) -> Option<&ChartDescriptor> {
        match self {
            RowItem::Chart(chart) => Some(chart),
            RowItem::Section(_) => None,
        }
    }
}

impl From<ChartDescriptor> for RowItem {
    fn from(chart: ChartDescriptor) -> Self {
        RowItem::Chart(chart)
    }
}

/// Ordered items rendered side by side
#[derive(Debug, Clone, Default)]
pub struct LayoutRow {
    items: Vec<RowItem>,
}

impl LayoutRow {
    pub fn new<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RowItem>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn items(&self) -> &[RowItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartDescriptor> {
        self.items.iter().filter_map(RowItem::as_chart)
    }
}

/// Layout decision for one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemPlan {
    /// Descriptor id; `None` for section headings
    pub id: Option<String>,
    pub title: String,
    /// Grid units occupied
    pub span: u8,
    /// Whether the span came from the descriptor
    pub span_overridden: bool,
    /// Grid class plus the descriptor's own classes
    pub class_name: String,
    pub style: Style,
    /// Rendering options with the theme applied
    pub options: Options,
    /// Figure layout overrides with the theme applied
    pub layout: Options,
}

/// Layout decisions for one row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowPlan {
    pub items: Vec<ItemPlan>,
}

impl RowPlan {
    /// Grid units used by the row
    pub fn used_units(&self) -> u32 {
        self.items.iter().map(|i| i.span as u32).sum()
    }
}

/// Assigns spans, styles and theme overlays to layout rows
#[derive(Debug, Clone, Copy, Default)]
pub struct GridLayoutPlanner {
    theme: Theme,
}

impl GridLayoutPlanner {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Plan every row, failing on the first invalid one
    pub fn plan(&self, rows: &[LayoutRow]) -> DashboardResult<Vec<RowPlan>> {
        rows.iter()
            .enumerate()
            .map(|(position, row)| self.plan_row(position, row))
            .collect()
    }

    /// Plan a single row; `position` is only used in error messages
    pub fn plan_row(&self, position: usize, row: &LayoutRow) -> DashboardResult<RowPlan> {
        let n = row.len();
        if n == 0 {
            return Err(DashboardError::Configuration(format!("row {} is empty", position)));
        }
        if n > MAX_ITEMS_PER_ROW {
            return Err(DashboardError::Configuration(format!(
                "row {} has {} items, can only have max {} graphs per row",
                position, n, MAX_ITEMS_PER_ROW
            )));
        }

        let default_span = GRID_UNITS / n as u8;
        let default_style = default_style(n);

        let items = row
            .items()
            .iter()
            .map(|item| match item {
                RowItem::Chart(chart) => self.plan_chart(position, chart, default_span, &default_style),
                RowItem::Section(title) => Ok(ItemPlan {
                    id: None,
                    title: title.clone(),
                    span: default_span,
                    span_overridden: false,
                    class_name: span_class(default_span),
                    style: default_style.clone(),
                    options: Options::new(),
                    layout: Options::new(),
                }),
            })
            .collect::<DashboardResult<Vec<_>>>()?;

        Ok(RowPlan { items })
    }

    fn plan_chart(
        &self,
        position: usize,
        chart: &ChartDescriptor,
        default_span: u8,
        default_style: &Style,
    ) -> DashboardResult<ItemPlan> {
        let span = match chart.span {
            Some(span) if (1..=GRID_UNITS).contains(&span) => span,
            Some(span) => {
                return Err(DashboardError::Configuration(format!(
                    "chart '{}' in row {} has span {}, expected 1-{}",
                    chart.title, position, span, GRID_UNITS
                )))
            }
            None => default_span,
        };

        let mut class_name = span_class(span);
        if !chart.class_name.is_empty() {
            class_name.push(' ');
            class_name.push_str(&chart.class_name);
        }

        let mut options = chart.options.clone();
        let mut layout = chart.layout.clone();
        self.theme.apply(chart.kind, &mut options, &mut layout);

        Ok(ItemPlan {
            id: Some(chart.id.clone()),
            title: chart.title.clone(),
            span,
            span_overridden: chart.span.is_some(),
            class_name,
            style: chart.style.clone().unwrap_or_else(|| default_style.clone()),
            options,
            layout,
        })
    }
}

/// Container style for an item in a row of `n`
fn default_style(n: usize) -> Style {
    let mut style = Style::new();
    style.insert("margin-left".to_string(), "0".to_string());
    style.insert("width".to_string(), format!("{}%", 100.0 / n as f64));
    style
}

/// Grid class for a span, e.g. `4` -> `"four columns"`
pub fn span_class(span: u8) -> String {
    const WORDS: [&str; 12] = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
        "twelve",
    ];

    let idx = (span.clamp(1, GRID_UNITS) - 1) as usize;
    format!("{} columns", WORDS[idx])
}
