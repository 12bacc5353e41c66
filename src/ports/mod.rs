//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EntityValidator` - Checks a candidate entity before it fills a slot

mod entity_validator;

pub use entity_validator::{EntityValidator, ValidationRejection};
