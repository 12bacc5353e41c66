//! Constraint and dependency groups.
//!
//! A constraint group lists the slots an action needs; a dependency group
//! lists the actions that must be done first. Both carry the prompts shown
//! to the user while the group is unmet. Every member of a group must hold
//! for the group to hold.

use std::fmt;
use std::sync::Arc;

use crate::domain::conversation::{Conversation, Memory};
use crate::domain::foundation::LocalizedMessages;
use crate::ports::EntityValidator;

/// A single slot: which entity type to read and where to store it.
#[derive(Clone)]
pub struct EntityRequirement {
    /// NLU entity category to read (`person`, `datetime`, ...).
    pub entity: String,
    /// Memory key the validated value is stored under.
    pub alias: String,
    pub validator: Option<Arc<dyn EntityValidator>>,
}

impl EntityRequirement {
    pub fn new(entity: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            alias: alias.into(),
            validator: None,
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn EntityValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn is_filled(&self, memory: &Memory) -> bool {
        memory.contains(&self.alias)
    }
}

impl fmt::Debug for EntityRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRequirement")
            .field("entity", &self.entity)
            .field("alias", &self.alias)
            .field("validator", &self.validator.as_ref().map(|_| "<validator>"))
            .finish()
    }
}

/// Slots that must all be filled, plus the prompts asking for them.
#[derive(Debug, Clone, Default)]
pub struct ConstraintGroup {
    pub prompts: LocalizedMessages,
    pub requirements: Vec<EntityRequirement>,
}

impl ConstraintGroup {
    pub fn new(prompts: LocalizedMessages) -> Self {
        Self {
            prompts,
            requirements: Vec::new(),
        }
    }

    pub fn with_requirement(mut self, requirement: EntityRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn is_satisfied(&self, memory: &Memory) -> bool {
        self.requirements.iter().all(|r| r.is_filled(memory))
    }

    /// Aliases not yet present in memory, in declaration order.
    pub fn missing_aliases<'a>(&'a self, memory: &'a Memory) -> impl Iterator<Item = &'a str> {
        self.requirements
            .iter()
            .filter(move |r| !r.is_filled(memory))
            .map(|r| r.alias.as_str())
    }
}

/// Actions that must all be done, plus the prompts explaining why.
#[derive(Debug, Clone, Default)]
pub struct DependencyGroup {
    pub prompts: LocalizedMessages,
    pub actions: Vec<String>,
}

impl DependencyGroup {
    pub fn new(prompts: LocalizedMessages) -> Self {
        Self {
            prompts,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, name: impl Into<String>) -> Self {
        self.actions.push(name.into());
        self
    }

    pub fn is_satisfied(&self, conversation: &Conversation) -> bool {
        self.actions.iter().all(|name| conversation.is_action_done(name))
    }

    /// Required actions not yet done, in declaration order.
    pub fn missing_actions<'a>(
        &'a self,
        conversation: &'a Conversation,
    ) -> impl Iterator<Item = &'a str> {
        self.actions
            .iter()
            .filter(move |name| !conversation.is_action_done(name))
            .map(String::as_str)
    }
}
