//! Conversation domain module.
//!
//! Per-conversation state and the NLU output fed into it.

mod entity;
mod memory;
mod state;

pub use entity::{ExtractedEntities, ExtractedEntity};
pub use memory::Memory;
pub use state::Conversation;
