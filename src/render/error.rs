//! Render error types

use thiserror::Error;

/// Errors that can occur while turning resolved data into page markup
#[derive(Error, Debug)]
pub enum RenderError {
    /// An option names a column the table does not have
    #[error("Chart '{chart}' references missing column '{column}'")]
    MissingColumn { chart: String, column: String },

    /// An option has the wrong shape or is missing for this kind
    #[error("Chart '{chart}' has invalid option '{option}': {reason}")]
    InvalidOption {
        chart: String,
        option: String,
        reason: String,
    },

    /// Figure serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::MissingColumn {
            chart: "Scatter".to_string(),
            column: "sepal_width".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Chart 'Scatter' references missing column 'sepal_width'"
        );
    }
}
