//! Error types for the action domain

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ValidationRejection;

use super::registry::MemoryUpdate;

/// Structural defects that keep an action out of the registry.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Action {action} has no intent")]
    MissingIntent { action: String },

    #[error("Action {action}: requirement {requirement} of constraint group {group} has no entity type")]
    MissingEntityType {
        action: String,
        group: usize,
        requirement: usize,
    },

    #[error("Action {action}: dependency group {group} contains an empty action name")]
    EmptyDependencyName { action: String, group: usize },

    #[error("Action {action} depends on itself")]
    SelfDependency { action: String },
}

/// Errors raised while building or querying the registry.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid action: {0}")]
    Invalid(#[from] ActionError),

    #[error("Action already registered: {0}")]
    DuplicateAction(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Action {action} depends on unregistered action {dependency}")]
    UnknownDependency { action: String, dependency: String },
}

/// Errors raised by the memory update pipeline.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UpdateMemoryError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Aliases committed before the rejection stay in memory and are
    /// listed in `update`.
    #[error("Value for {alias} rejected")]
    Rejected {
        alias: String,
        rejection: ValidationRejection,
        update: MemoryUpdate,
    },
}

impl UpdateMemoryError {
    /// Returns the rejection payload, if a validator refused a value.
    pub fn rejection(&self) -> Option<&ValidationRejection> {
        match self {
            UpdateMemoryError::Rejected { rejection, .. } => Some(rejection),
            UpdateMemoryError::UnknownAction(_) => None,
        }
    }
}

impl From<ActionError> for DomainError {
    fn from(err: ActionError) -> Self {
        DomainError::new(ErrorCode::InvalidAction, err.to_string())
    }
}

impl From<RegistryError> for DomainError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Invalid(inner) => inner.into(),
            RegistryError::DuplicateAction(ref name) => {
                DomainError::new(ErrorCode::DuplicateAction, err.to_string())
                    .with_detail("action", name.clone())
            }
            RegistryError::UnknownAction(ref name) => {
                DomainError::new(ErrorCode::ActionNotFound, err.to_string())
                    .with_detail("action", name.clone())
            }
            RegistryError::UnknownDependency {
                ref action,
                ref dependency,
            } => DomainError::new(ErrorCode::InvalidAction, err.to_string())
                .with_detail("action", action.clone())
                .with_detail("dependency", dependency.clone()),
        }
    }
}

impl From<UpdateMemoryError> for DomainError {
    fn from(err: UpdateMemoryError) -> Self {
        match err {
            UpdateMemoryError::UnknownAction(ref name) => {
                DomainError::new(ErrorCode::ActionNotFound, err.to_string())
                    .with_detail("action", name.clone())
            }
            UpdateMemoryError::Rejected { ref alias, .. } => {
                DomainError::new(ErrorCode::ValidationRejected, err.to_string())
                    .with_detail("alias", alias.clone())
            }
        }
    }
}
