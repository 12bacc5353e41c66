//! Domain layer containing dialogue logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, localized messages, errors)
//! - `conversation` - Per-conversation state and extracted entities
//! - `action` - Action definitions, completion predicates, and the action registry

pub mod action;
pub mod conversation;
pub mod foundation;
