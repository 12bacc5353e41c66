//! Configuration error types

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Default locale cannot be empty")]
    EmptyLocale,

    #[error("Catalogue path cannot be empty")]
    EmptyCataloguePath,

    #[error("Log filter cannot be empty")]
    EmptyLogFilter,
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        DomainError::new(ErrorCode::ConfigurationInvalid, err.to_string())
    }
}
