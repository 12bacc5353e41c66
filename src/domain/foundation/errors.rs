//! Error types shared across the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Registration errors
    InvalidAction,
    DuplicateAction,

    // Not found errors
    ActionNotFound,

    // Slot filling errors
    ValidationRejected,

    // Setup errors
    CatalogueInvalid,
    ConfigurationInvalid,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidAction => "INVALID_ACTION",
            ErrorCode::DuplicateAction => "DUPLICATE_ACTION",
            ErrorCode::ActionNotFound => "ACTION_NOT_FOUND",
            ErrorCode::ValidationRejected => "VALIDATION_REJECTED",
            ErrorCode::CatalogueInvalid => "CATALOGUE_INVALID",
            ErrorCode::ConfigurationInvalid => "CONFIGURATION_INVALID",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// Every typed error of the crate converts into this shape for hosts that
/// want a single error type at their boundary.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ActionNotFound, "Action not found");
        assert_eq!(format!("{}", err), "[ACTION_NOT_FOUND] Action not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationRejected, "Rejected")
            .with_detail("alias", "name")
            .with_detail("action", "Greetings");

        assert_eq!(err.details.get("alias"), Some(&"name".to_string()));
        assert_eq!(err.details.get("action"), Some(&"Greetings".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::DuplicateAction), "DUPLICATE_ACTION");
        assert_eq!(format!("{}", ErrorCode::CatalogueInvalid), "CATALOGUE_INVALID");
    }
}
