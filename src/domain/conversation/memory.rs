//! Per-conversation slot memory.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Captured values keyed by alias.
///
/// Values are opaque to the core: only presence is ever inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Memory(BTreeMap<String, Value>);

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.0.contains_key(alias)
    }

    pub fn get(&self, alias: &str) -> Option<&Value> {
        self.0.get(alias)
    }

    /// Stores a value, returning the one it replaced.
    pub fn insert(&mut self, alias: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(alias.into(), value)
    }

    pub fn remove(&mut self, alias: &str) -> Option<Value> {
        self.0.remove(alias)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(alias, value)| (alias.as_str(), value))
    }
}
