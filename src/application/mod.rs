//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations on behalf of the host.

pub mod handlers;

pub use handlers::{ProcessTurnCommand, ProcessTurnHandler, ProcessTurnResult, TurnOutcome};
