//! Error types for the cutting tools crate.
//!
//! Only rejected inputs surface here. Degenerate geometry, oversized pieces
//! and patterns clipped away entirely are reported through results and logs.

use muntinkit_core::InputError;
use thiserror::Error;

/// Errors that can occur during cut-list, packing or sequencing operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CamToolError {
    /// A top-level input (opening, bar, stock) was rejected.
    #[error(transparent)]
    Input(#[from] InputError),

    /// A pattern or tool parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

impl CamToolError {
    /// Check if this error came from top-level input validation
    pub fn is_input_error(&self) -> bool {
        matches!(self, CamToolError::Input(_))
    }
}

impl From<CamToolError> for muntinkit_core::Error {
    fn from(err: CamToolError) -> Self {
        match err {
            CamToolError::Input(e) => muntinkit_core::Error::Input(e),
            other => muntinkit_core::Error::other(other.to_string()),
        }
    }
}

/// Errors related to pattern parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

impl ParameterError {
    pub fn out_of_range(name: &str, value: f64, min: f64, max: f64) -> Self {
        ParameterError::OutOfRange {
            name: name.to_string(),
            value,
            min,
            max,
        }
    }

    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ParameterError::InvalidValue {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for cutting tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
