//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `validation` - Entity validator implementations
//! - `catalogue` - Declarative action sources (YAML)

pub mod catalogue;
pub mod validation;

pub use catalogue::{CatalogueError, YamlActionCatalogue};
pub use validation::{AsyncFnValidator, FnValidator, RejectIfPresent, ValidatorSet};
