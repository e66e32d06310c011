//! Error types for input validation

use thiserror::Error;

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Broad category of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong container type or missing capability
    Type,
    /// Wrong shape, range, length or content
    Value,
    /// Invalid validator configuration
    Config,
    /// Failure reading or decoding an input file
    Io,
}

/// Error types for input validation
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Input is not one of the accepted container types, or lacks a required capability
    #[error("Invalid type: {0}")]
    InvalidType(String),

    /// Input has the right type but violates a shape, range or content contract
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ValidationError {
    /// Create a new invalid type error
    pub fn invalid_type<S: Into<String>>(msg: S) -> Self {
        Self::InvalidType(msg.into())
    }

    /// Create a new invalid value error
    pub fn invalid_value<S: Into<String>>(msg: S) -> Self {
        Self::InvalidValue(msg.into())
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a length mismatch error between two named inputs
    pub fn length_mismatch(left: &str, left_len: usize, right: &str, right_len: usize) -> Self {
        Self::InvalidValue(format!(
            "{} and {} must be same length, but {} is length {} and {} is length {}.",
            left, right, left, left_len, right, right_len
        ))
    }

    /// Create a file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        Self::Io(std::io::Error::new(
            error.kind(),
            format!(
                "Failed to {} '{}': {}",
                operation,
                path.as_ref().display(),
                error
            ),
        ))
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidType(_) => ErrorKind::Type,
            Self::InvalidValue(_) => ErrorKind::Value,
            Self::InvalidConfig(_) => ErrorKind::Config,
            Self::Io(_) | Self::Json(_) => ErrorKind::Io,
        }
    }
}
