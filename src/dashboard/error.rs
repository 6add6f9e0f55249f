//! Dashboard error types
//!
//! Configuration problems and data failures surfaced while building or
//! rendering a dashboard.

use thiserror::Error;

use crate::render::RenderError;
use crate::table::TableError;

/// Errors that can occur while laying out or rendering a dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Invalid layout or settings (row sizes, spans, reload policy)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A chart's data source failed or produced an unusable shape
    #[error("Failed to resolve data for chart '{title}': {reason}")]
    DataResolution { title: String, reason: String },

    /// The render engine rejected a chart
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Table construction failed
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, DashboardError::Configuration(_))
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::Configuration("reload_interval 'nightly' not yet supported".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: reload_interval 'nightly' not yet supported"
        );
        assert!(err.is_configuration());

        let err = DashboardError::DataResolution {
            title: "Returns".to_string(),
            reason: "timeout".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to resolve data for chart 'Returns': timeout");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_table_error_conversion() {
        let err: DashboardError = TableError::NoColumns.into();
        assert!(matches!(err, DashboardError::Table(TableError::NoColumns)));
    }
}
