//! Custom error types for the data refinement pipeline.
//!
//! Errors only arise at the boundary (reading and writing delimited text,
//! files, JSON) or when a numeric column holds a value that cannot be read
//! as a number. Degenerate tables (empty, single row, all-absent columns)
//! never produce an error.
//!
//! Errors are serializable so a presentation layer can show a stable code
//! alongside the message.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the refinement pipeline.
#[derive(Error, Debug)]
pub enum RefineError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A value in a numeric column could not be read as a number.
    #[error("Failed to convert column '{column}' to {target_type}: {reason}")]
    TypeConversionFailed {
        column: String,
        target_type: String,
        reason: String,
    },

    /// Source text could not be turned into a table.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Report generation failed.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<RefineError>,
    },
}

impl RefineError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        RefineError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for presentation layers.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::TypeConversionFailed { .. } => "TYPE_CONVERSION_FAILED",
            Self::MalformedInput(_) => "MALFORMED_INPUT",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error came from the input boundary rather than the repair core.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::MalformedInput(_) | Self::Io(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for RefineError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("RefineError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for refinement operations.
pub type Result<T> = std::result::Result<T, RefineError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| RefineError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            RefineError::InvalidConfig("precision".to_string()).error_code(),
            "INVALID_CONFIG"
        );
        assert_eq!(
            RefineError::MalformedInput("bad row".to_string()).error_code(),
            "MALFORMED_INPUT"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(RefineError::MalformedInput("x".to_string()).is_input_error());
        assert!(
            RefineError::MalformedInput("x".to_string())
                .with_context("Loading table")
                .is_input_error()
        );
        assert!(!RefineError::InvalidConfig("x".to_string()).is_input_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = RefineError::MalformedInput("unterminated quote".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("MALFORMED_INPUT"));
        assert!(json.contains("unterminated quote"));
    }

    #[test]
    fn test_with_context() {
        let error = RefineError::TypeConversionFailed {
            column: "age".to_string(),
            target_type: "Float64".to_string(),
            reason: "'abc' is not a number".to_string(),
        }
        .with_context("During interpolation");
        assert!(error.to_string().contains("During interpolation"));
        assert_eq!(error.error_code(), "TYPE_CONVERSION_FAILED");
    }
}
