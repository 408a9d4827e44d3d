//! Error types for the controller crate.

use std::fmt;

/// Result type for controller operations.
pub type Result<T> = std::result::Result<T, ControllerError>;

/// Errors that can occur when building a controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerError {
    /// A configuration value was non-finite or not strictly positive.
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { field, value } => {
                write!(
                    f,
                    "invalid controller config: {field} must be finite and positive, got {value}"
                )
            }
        }
    }
}

impl std::error::Error for ControllerError {}
