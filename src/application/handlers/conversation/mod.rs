//! Conversation handlers - per-turn dialogue processing.

mod process_turn;

pub use process_turn::{ProcessTurnCommand, ProcessTurnHandler, ProcessTurnResult, TurnOutcome};
