//! Error types for CQLValue

use std::fmt;
use thiserror::Error;

/// Result type alias for CQLValue operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CQLValue operations
///
/// Every error is raised at the offending call. Failed constructors, arithmetic
/// operators and container mutators leave their receiver untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Wrong value type, null where a value is required, unparseable input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Division or modulo by a zero-valued wrapper
    #[error("Divide by zero: {0}")]
    DivideByZero(String),

    /// Result outside the representable domain
    #[error("Range error: {0}")]
    Range(String),

    /// The collection builder rejected an element
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Unknown type name or a kind that cannot be represented
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a divide by zero error
    pub fn divide_by_zero(msg: impl Into<String>) -> Self {
        Self::DivideByZero(msg.into())
    }

    /// Create a range error
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an unsupported type error
    pub fn unsupported_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedType(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build the error raised when a value of the wrong type is supplied
    pub(crate) fn expecting(expected: impl fmt::Display, actual: impl fmt::Display) -> Self {
        Self::InvalidArgument(format!("expected {}, got {}", expected, actual))
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidArgument(_) => ErrorCategory::Argument,
            Error::DivideByZero(_) => ErrorCategory::Arithmetic,
            Error::Range(_) => ErrorCategory::Arithmetic,
            Error::Serialization(_) => ErrorCategory::Serialization,
            Error::UnsupportedType(_) => ErrorCategory::Type,
            Error::Configuration(_) => ErrorCategory::Configuration,
        }
    }
}

/// Error categories for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input to a constructor, operator or container
    Argument,
    /// Arithmetic outside the wrapper's domain
    Arithmetic,
    /// Wire encoding failures
    Serialization,
    /// Type name resolution failures
    Type,
    /// Configuration errors
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Argument => "Argument",
            ErrorCategory::Arithmetic => "Arithmetic",
            ErrorCategory::Serialization => "Serialization",
            ErrorCategory::Type => "Type",
            ErrorCategory::Configuration => "Configuration",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::divide_by_zero("Cannot divide by zero");
        assert!(matches!(err, Error::DivideByZero(_)));
        assert_eq!(err.to_string(), "Divide by zero: Cannot divide by zero");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::range("x").category(), ErrorCategory::Arithmetic);
        assert_eq!(Error::invalid_argument("x").category(), ErrorCategory::Argument);
        assert_eq!(Error::unsupported_type("x").category(), ErrorCategory::Type);
        assert_eq!(ErrorCategory::Serialization.to_string(), "Serialization");
    }

    #[test]
    fn test_expecting_message() {
        let err = Error::expecting("an int", "varchar");
        assert_eq!(err.to_string(), "Invalid argument: expected an int, got varchar");
    }
}
