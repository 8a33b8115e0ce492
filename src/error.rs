//! Error types for the buck converter calculator.
//!
//! The calculation core never fails: inconsistent or incomplete designs are
//! reported as data in a [`ValidationResult`](crate::validate::ValidationResult).
//! [`BuckError`] only covers the input boundary, where raw text, design files
//! and JSON are turned into a [`ParameterSet`](crate::params::ParameterSet).

use thiserror::Error;

/// Result type alias using [`BuckError`].
pub type Result<T> = std::result::Result<T, BuckError>;

/// Unified error type for all input handling.
#[derive(Error, Debug)]
pub enum BuckError {
    // ============ Value Parsing Errors ============
    /// Text that does not parse as a number with an optional SI suffix
    #[error("Invalid value '{text}' for parameter '{param}'")]
    InvalidValue { param: String, text: String },

    /// A value that parsed but is not finite
    #[error("Value for parameter '{param}' is not a finite number")]
    NonFiniteValue { param: String },

    /// Parameter name not recognized
    #[error("Unknown parameter '{name}'")]
    UnknownParameter { name: String },

    /// Assignment not of the form `name=value`
    #[error("Malformed assignment '{text}' (expected <name>=<value>)")]
    MalformedAssignment { text: String },

    /// Same parameter given twice in one request
    #[error("Parameter '{param}' given more than once")]
    DuplicateParameter { param: String },

    /// Unit name not valid for the parameter
    #[error("Unit '{unit}' is not valid for parameter '{param}'")]
    InvalidUnit { param: String, unit: String },

    // ============ I/O Errors ============
    /// Error reading a design file
    #[error("Failed to read design file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON design or request
    #[error("Invalid JSON: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
}

impl BuckError {
    /// Create an invalid value error
    pub fn invalid_value(param: impl Into<String>, text: impl Into<String>) -> Self {
        Self::InvalidValue {
            param: param.into(),
            text: text.into(),
        }
    }

    /// Create an unknown parameter error
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Self::UnknownParameter { name: name.into() }
    }
}
