//! RejectIfPresent - refuses to overwrite a slot that is already filled.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::conversation::{ExtractedEntity, Memory};
use crate::domain::foundation::LocalizedMessages;
use crate::ports::{EntityValidator, ValidationRejection};

/// Accepts a candidate only while `alias` is absent from memory.
///
/// Accepted candidates are stored as their full record.
#[derive(Debug, Clone)]
pub struct RejectIfPresent {
    alias: String,
    messages: LocalizedMessages,
}

impl RejectIfPresent {
    pub fn new(alias: impl Into<String>, messages: LocalizedMessages) -> Self {
        Self {
            alias: alias.into(),
            messages,
        }
    }
}

#[async_trait]
impl EntityValidator for RejectIfPresent {
    async fn validate(
        &self,
        entity: &ExtractedEntity,
        memory: &Memory,
    ) -> Result<Value, ValidationRejection> {
        if memory.contains(&self.alias) {
            return Err(ValidationRejection::new(self.messages.clone()));
        }
        Ok(entity.to_value())
    }
}
