//! Dialogue Core - Action orchestration for rule-driven conversations
//!
//! This crate decides which declared actions are eligible to run, which
//! slots are still missing, and how entities extracted by an external NLU
//! component are validated and merged into per-conversation memory.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
