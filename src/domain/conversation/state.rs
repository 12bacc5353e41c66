//! Conversation state.
//!
//! Tracks everything the core knows about one conversation: opaque user
//! data, captured slot values, and which actions have been done. The host
//! creates and persists it; the registry mutates it in place.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::domain::foundation::{ConversationId, Timestamp};

use super::Memory;

/// Complete state of a single conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    /// Host-owned data; never read or written by the core.
    #[serde(default)]
    pub user_data: Map<String, Value>,
    #[serde(default)]
    pub memory: Memory,
    /// Done flag per action name. Absent means not done.
    #[serde(default)]
    pub action_states: HashMap<String, bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new() -> Self {
        Self::with_id(ConversationId::new())
    }

    /// Creates an empty conversation with a known identifier.
    pub fn with_id(id: ConversationId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_data: Map::new(),
            memory: Memory::new(),
            action_states: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns whether the named action has been marked done.
    pub fn is_action_done(&self, name: &str) -> bool {
        self.action_states.get(name).copied().unwrap_or(false)
    }

    /// Names of actions marked done, sorted.
    pub fn done_actions(&self) -> Vec<&str> {
        let mut done: Vec<&str> = self
            .action_states
            .iter()
            .filter(|(_, done)| **done)
            .map(|(name, _)| name.as_str())
            .collect();
        done.sort_unstable();
        done
    }

    /// Sets the done flag. Returns false when it was already set.
    pub(crate) fn set_done(&mut self, name: &str) -> bool {
        if self.is_action_done(name) {
            return false;
        }
        self.action_states.insert(name.to_string(), true);
        self.updated_at = Timestamp::now();
        true
    }

    /// Stores a validated slot value.
    pub(crate) fn commit(&mut self, alias: &str, value: Value) {
        self.memory.insert(alias, value);
        self.updated_at = Timestamp::now();
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_conversation_is_empty() {
        let conversation = Conversation::new();
        assert!(conversation.user_data.is_empty());
        assert!(conversation.memory.is_empty());
        assert!(conversation.action_states.is_empty());
        assert_eq!(conversation.created_at, conversation.updated_at);
    }

    #[test]
    fn unknown_action_is_not_done() {
        assert!(!Conversation::new().is_action_done("Greetings"));
    }

    #[test]
    fn explicit_false_flag_is_not_done() {
        let mut conversation = Conversation::new();
        conversation.action_states.insert("Order".to_string(), false);
        assert!(!conversation.is_action_done("Order"));
        assert!(conversation.done_actions().is_empty());
    }

    #[test]
    fn set_done_reports_first_change_only() {
        let mut conversation = Conversation::new();
        assert!(conversation.set_done("Greetings"));
        assert!(!conversation.set_done("Greetings"));
        assert!(conversation.is_action_done("Greetings"));
    }

    #[test]
    fn done_actions_are_sorted() {
        let mut conversation = Conversation::new();
        conversation.set_done("Order");
        conversation.set_done("Delivery");
        assert_eq!(conversation.done_actions(), vec!["Delivery", "Order"]);
    }

    #[test]
    fn commit_stores_value_and_leaves_user_data_alone() {
        let mut conversation = Conversation::new();
        conversation.user_data.insert("channel".to_string(), json!("web"));

        conversation.commit("name", json!({ "raw": "Jean Valjean" }));

        assert!(conversation.memory.contains("name"));
        assert_eq!(conversation.user_data.get("channel"), Some(&json!("web")));
    }

    #[test]
    fn round_trips_through_json() {
        let mut conversation = Conversation::new();
        conversation.commit("product", json!({ "raw": "one", "value": 1 }));
        conversation.set_done("Greetings");

        let json = serde_json::to_string(&conversation).unwrap();
        let restored: Conversation = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, conversation);
    }
}
