//! Pandex Rendering
//!
//! The boundary between dashboards and whatever draws them:
//!
//! - **engine**: The `RenderEngine` trait and its request types
//! - **html**: Default engine producing HTML pages with Plotly figures
//! - **figure**: Figure JSON for graphical chart kinds
//! - **error**: Error types

pub mod engine;
pub mod error;
pub mod figure;
pub mod html;

pub use engine::{ChartRequest, PageContext, RenderEngine};
pub use error::{RenderError, RenderResult};
pub use figure::{build_figure, merge_into};
pub use html::{css, HtmlRenderer, DEFAULT_PLOTLY_SRC};
