//! Validation Adapters - Entity validator implementations.
//!
//! Contains ready-made implementations of the `EntityValidator` port and
//! the named set catalogues resolve validator references against.

mod fn_validator;
mod reject_if_present;
mod validator_set;

pub use fn_validator::{AsyncFnValidator, FnValidator};
pub use reject_if_present::RejectIfPresent;
pub use validator_set::ValidatorSet;
