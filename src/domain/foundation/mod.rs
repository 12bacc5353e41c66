//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the dialogue core.

mod errors;
mod ids;
mod localized;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::ConversationId;
pub use localized::LocalizedMessages;
pub use timestamp::Timestamp;
