//! Action Definition
//!
//! The declarative unit of dialogue: an intent, the slots it needs and the
//! actions it depends on. Behavior is uniform across actions; only the
//! declared data varies.

use crate::domain::conversation::{Conversation, Memory};
use crate::domain::foundation::LocalizedMessages;

use super::errors::ActionError;
use super::groups::{ConstraintGroup, DependencyGroup, EntityRequirement};

/// A declared action, immutable once registered.
#[derive(Debug, Clone)]
pub struct ActionDefinition {
    name: String,
    intent: String,
    constraint_groups: Vec<ConstraintGroup>,
    dependency_groups: Vec<DependencyGroup>,
}

/// The first group keeping an action from being complete.
#[derive(Debug, Clone, Copy)]
pub enum UnmetGroup<'a> {
    Dependency(&'a DependencyGroup),
    Constraint(&'a ConstraintGroup),
}

impl<'a> UnmetGroup<'a> {
    pub fn prompts(&self) -> &'a LocalizedMessages {
        match self {
            UnmetGroup::Dependency(group) => &group.prompts,
            UnmetGroup::Constraint(group) => &group.prompts,
        }
    }
}

impl ActionDefinition {
    /// Creates an action with no constraints or dependencies.
    pub fn new(name: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            intent: intent.into(),
            constraint_groups: Vec::new(),
            dependency_groups: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, group: ConstraintGroup) -> Self {
        self.constraint_groups.push(group);
        self
    }

    pub fn with_dependency(mut self, group: DependencyGroup) -> Self {
        self.dependency_groups.push(group);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intent(&self) -> &str {
        &self.intent
    }

    pub fn constraint_groups(&self) -> &[ConstraintGroup] {
        &self.constraint_groups
    }

    pub fn dependency_groups(&self) -> &[DependencyGroup] {
        &self.dependency_groups
    }

    /// Every requirement across all constraint groups, in declaration order.
    pub fn requirements(&self) -> impl Iterator<Item = &EntityRequirement> {
        self.constraint_groups
            .iter()
            .flat_map(|group| group.requirements.iter())
    }

    /// Names of every action this one depends on, in declaration order.
    pub fn required_actions(&self) -> impl Iterator<Item = &str> {
        self.dependency_groups
            .iter()
            .flat_map(|group| group.actions.iter().map(String::as_str))
    }

    /// Returns the first structural defect, if any.
    pub fn check(&self) -> Result<(), ActionError> {
        if self.intent.trim().is_empty() {
            return Err(ActionError::MissingIntent {
                action: self.name.clone(),
            });
        }

        for (group_index, group) in self.constraint_groups.iter().enumerate() {
            for (requirement_index, requirement) in group.requirements.iter().enumerate() {
                if requirement.entity.trim().is_empty() {
                    return Err(ActionError::MissingEntityType {
                        action: self.name.clone(),
                        group: group_index,
                        requirement: requirement_index,
                    });
                }
            }
        }

        for (group_index, group) in self.dependency_groups.iter().enumerate() {
            for required in &group.actions {
                if required.trim().is_empty() {
                    return Err(ActionError::EmptyDependencyName {
                        action: self.name.clone(),
                        group: group_index,
                    });
                }
                if *required == self.name {
                    return Err(ActionError::SelfDependency {
                        action: self.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns true when the action is structurally valid.
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// True when every alias of every constraint group is in memory.
    pub fn constraints_are_complete(&self, memory: &Memory) -> bool {
        self.constraint_groups.iter().all(|g| g.is_satisfied(memory))
    }

    /// True when every action of every dependency group is done.
    pub fn dependencies_are_complete(&self, conversation: &Conversation) -> bool {
        self.dependency_groups
            .iter()
            .all(|g| g.is_satisfied(conversation))
    }

    /// Readiness: slots filled and prerequisites done.
    ///
    /// Independent of whether this action itself has been marked done.
    pub fn is_complete(&self, conversation: &Conversation) -> bool {
        self.constraints_are_complete(&conversation.memory)
            && self.dependencies_are_complete(conversation)
    }

    pub fn is_done(&self, conversation: &Conversation) -> bool {
        conversation.is_action_done(&self.name)
    }

    /// Candidate for invocation: prerequisites done, not yet done itself.
    pub fn is_actionable(&self, conversation: &Conversation) -> bool {
        self.dependencies_are_complete(conversation) && !self.is_done(conversation)
    }

    pub fn unmet_constraint_groups<'a>(
        &'a self,
        memory: &'a Memory,
    ) -> impl Iterator<Item = &'a ConstraintGroup> {
        self.constraint_groups
            .iter()
            .filter(move |g| !g.is_satisfied(memory))
    }

    pub fn unmet_dependency_groups<'a>(
        &'a self,
        conversation: &'a Conversation,
    ) -> impl Iterator<Item = &'a DependencyGroup> {
        self.dependency_groups
            .iter()
            .filter(move |g| !g.is_satisfied(conversation))
    }

    /// The group to prompt for next: unmet dependencies before unmet slots.
    pub fn first_unmet_group<'a>(&'a self, conversation: &'a Conversation) -> Option<UnmetGroup<'a>> {
        if let Some(group) = self.unmet_dependency_groups(conversation).next() {
            return Some(UnmetGroup::Dependency(group));
        }
        self.unmet_constraint_groups(&conversation.memory)
            .next()
            .map(UnmetGroup::Constraint)
    }
}

impl AsRef<str> for ActionDefinition {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
