//! Pandex Layout
//!
//! Grid placement and page-wide visual defaults:
//!
//! - **planner**: Rows of items to 12-unit grid spans, styles and overlays
//! - **theme**: Light/dark overlays per chart kind
//! - **defaults**: Figure layout defaults shared by every chart
//!
//! # Example
//!
//! ```rust
//! use pandex::chart::{ChartDescriptor, ChartKind};
//! use pandex::layout::{GridLayoutPlanner, LayoutRow, Theme};
//! use pandex::table::{Table, Value};
//!
//! let table = Table::from_columns(vec![("a", vec![Value::Int(1)])]).unwrap();
//! let row = LayoutRow::new(vec![
//!     ChartDescriptor::new(ChartKind::Line, "One", table.clone()),
//!     ChartDescriptor::new(ChartKind::Bar, "Two", table.clone()),
//!     ChartDescriptor::new(ChartKind::Area, "Three", table),
//! ]);
//!
//! let plan = GridLayoutPlanner::new(Theme::Light).plan(&[row]).unwrap();
//! assert!(plan[0].items.iter().all(|item| item.span == 4));
//! ```

pub mod defaults;
pub mod planner;
pub mod theme;

pub use defaults::{LayoutDefaults, Margin};
pub use planner::{
    span_class, GridLayoutPlanner, ItemPlan, LayoutRow, RowItem, RowPlan, GRID_UNITS,
    MAX_ITEMS_PER_ROW,
};
pub use theme::{template_layout, Theme, DARK_TEMPLATE, TEMPLATE_KEY};
