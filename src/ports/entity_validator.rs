//! Entity Validator Port - Slot value validation interface.
//!
//! A validator decides whether a candidate entity may fill a slot and what
//! value gets stored. Validators may suspend (external lookups, geocoding)
//! before resolving, which is why the contract is async.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::conversation::{ExtractedEntity, Memory};
use crate::domain::foundation::LocalizedMessages;

/// Port for validating a candidate entity before it is committed to memory.
///
/// # Contract
///
/// Implementations must:
/// - Return the value to store under the requirement's alias on success
/// - Return a [`ValidationRejection`] with user-facing messages to refuse
/// - Not mutate memory; the registry commits the returned value
///
/// # Usage
///
/// ```rust,ignore
/// let requirement = EntityRequirement::new("datetime", "delivery-date")
///     .with_validator(Arc::new(MyDateValidator));
/// ```
#[async_trait]
pub trait EntityValidator: Send + Sync {
    async fn validate(
        &self,
        entity: &ExtractedEntity,
        memory: &Memory,
    ) -> Result<Value, ValidationRejection>;
}

/// A validator's refusal of a candidate entity.
///
/// Carries locale-keyed messages the host can show to re-prompt the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("Entity rejected by validator")]
pub struct ValidationRejection {
    pub messages: LocalizedMessages,
}

impl ValidationRejection {
    pub fn new(messages: LocalizedMessages) -> Self {
        Self { messages }
    }

    /// Creates a rejection with a single message for one locale.
    pub fn with_message(locale: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(LocalizedMessages::new().with(locale, [message.into()]))
    }
}
