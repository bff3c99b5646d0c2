//! Error handling for MuntinKit
//!
//! Only invalid top-level inputs are errors. Degenerate geometry (parallel
//! lines, zero-length offsets), oversized cuts and patterns that fall outside
//! the usable area all have defined fallbacks and never surface here.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Input validation error type
///
/// Raised before any computation starts when a request would otherwise
/// produce misleading geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Opening (glass area) dimensions are zero, negative or not finite
    #[error("Invalid opening dimensions: {width} x {height} mm (both must be > 0)")]
    InvalidOpening {
        /// The requested width in mm.
        width: f64,
        /// The requested height in mm.
        height: f64,
    },

    /// A bar whose axis has no length
    #[error("Bar {id} has a zero-length axis")]
    ZeroLengthBar {
        /// The id of the offending bar.
        id: usize,
    },

    /// Stock bar length must be strictly positive
    #[error("Invalid stock length: {length} mm (must be > 0)")]
    InvalidStockLength {
        /// The requested stock length in mm.
        length: f64,
    },

    /// Saw kerf cannot be negative
    #[error("Invalid saw kerf: {kerf} mm (must be >= 0)")]
    InvalidKerf {
        /// The requested kerf in mm.
        kerf: f64,
    },

    /// Repetition (sash count) factor of zero
    #[error("Repetition factor must be at least 1")]
    ZeroRepetition,

    /// A named numeric parameter is out of its valid range
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl InputError {
    /// Convenience constructor for [`InputError::InvalidParameter`]
    pub fn parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        InputError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for MuntinKit
///
/// A unified error type used by every public entry operation.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected input
    #[error(transparent)]
    Input(#[from] InputError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an input validation error
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Reject values that are not finite numbers.
pub fn ensure_finite(name: &str, value: f64) -> std::result::Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::parameter(name, format!("must be finite, got {value}")))
    }
}

/// Reject values that are negative or not finite.
pub fn ensure_non_negative(name: &str, value: f64) -> std::result::Result<(), InputError> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(InputError::parameter(name, format!("must be >= 0, got {value}")));
    }
    Ok(())
}
