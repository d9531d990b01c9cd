//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is absent, null, or blank
    Empty { field: &'static str },

    /// Value present but not in the expected shape (e.g., non-integer limit)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Value outside the allowed set
    InvalidVariant { field: &'static str, value: String },

    /// Request body could not be parsed at all
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "missing required field: {}", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::MalformedBody { reason } => write!(f, "malformed request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
