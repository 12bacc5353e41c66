//! Action domain module.
//!
//! Declared actions, their slot and dependency groups, the completion
//! predicates over a conversation, and the registry that drives slot filling.

mod definition;
mod errors;
mod groups;
mod registry;

pub use definition::{ActionDefinition, UnmetGroup};
pub use errors::{ActionError, RegistryError, UpdateMemoryError};
pub use groups::{ConstraintGroup, DependencyGroup, EntityRequirement};
pub use registry::{ActionRegistry, MemoryUpdate, DEFAULT_LOCALE};
