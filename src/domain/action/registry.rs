//! Action Registry - dialogue orchestration
//!
//! Owns every registered action and runs the operations that touch a
//! conversation: done tracking and the entity validation and commit
//! pipeline. Holds no conversation state of its own; conversations are
//! always passed in explicitly so any number of them can be driven
//! concurrently against one shared registry.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::domain::conversation::{Conversation, ExtractedEntities};
use crate::domain::foundation::LocalizedMessages;

use super::definition::ActionDefinition;
use super::errors::{RegistryError, UpdateMemoryError};

/// Locale used for prompt selection when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Aliases touched by one `update_memory` call, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryUpdate {
    pub committed: Vec<String>,
    /// Requirements with no candidate entity this turn.
    pub skipped: Vec<String>,
}

/// Registry of actions keyed by name.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    actions: HashMap<String, ActionDefinition>,
    default_locale: String,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Sets the locale prompts fall back to.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Registers an action after structural validation.
    ///
    /// # Errors
    ///
    /// - `RegistryError::Invalid` if the action fails [`ActionDefinition::check`]
    /// - `RegistryError::DuplicateAction` if the name is already taken
    pub fn register(&mut self, action: ActionDefinition) -> Result<(), RegistryError> {
        action.check()?;

        if self.actions.contains_key(action.name()) {
            return Err(RegistryError::DuplicateAction(action.name().to_string()));
        }

        self.insert(action);
        Ok(())
    }

    /// Registers a batch of actions, all or nothing.
    ///
    /// Every action is checked before any is inserted, so on error the
    /// registry is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Same as [`ActionRegistry::register`], reported for the first failing
    /// action of the batch. A name repeated within the batch is a duplicate.
    pub fn register_all<I>(&mut self, actions: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = ActionDefinition>,
    {
        let actions: Vec<ActionDefinition> = actions.into_iter().collect();

        let mut batch = HashSet::new();
        for action in &actions {
            action.check()?;
            if self.actions.contains_key(action.name()) || !batch.insert(action.name()) {
                return Err(RegistryError::DuplicateAction(action.name().to_string()));
            }
        }

        for action in actions {
            self.insert(action);
        }
        Ok(())
    }

    /// Verifies that every dependency names a registered action.
    ///
    /// Run once setup is finished; registration alone accepts forward
    /// references. An action depending on an unregistered name could never
    /// become complete.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownDependency` for the first dangling
    /// reference, ordered by action name.
    pub fn check_dependencies(&self) -> Result<(), RegistryError> {
        let mut dangling: Vec<(&str, &str)> = Vec::new();
        for action in self.actions.values() {
            for required in action.required_actions() {
                if !self.contains(required) {
                    dangling.push((action.name(), required));
                }
            }
        }
        dangling.sort_unstable();

        for (action, dependency) in &dangling {
            warn!(action = %action, dependency = %dependency, "Dependency on unregistered action");
        }

        match dangling.first() {
            Some((action, dependency)) => Err(RegistryError::UnknownDependency {
                action: action.to_string(),
                dependency: dependency.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn insert(&mut self, action: ActionDefinition) {
        info!(action = %action.name(), intent = %action.intent(), "Registered action");
        self.actions.insert(action.name().to_string(), action);
    }

    pub fn get(&self, name: &str) -> Option<&ActionDefinition> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered action names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.actions.values()
    }

    /// The action handling an intent. Ties resolve to the smallest name.
    pub fn action_for_intent(&self, intent: &str) -> Option<&ActionDefinition> {
        self.actions
            .values()
            .filter(|action| action.intent() == intent)
            .min_by(|a, b| a.name().cmp(b.name()))
    }

    /// Actions whose dependencies are done and which are not done yet, sorted by name.
    pub fn actionable(&self, conversation: &Conversation) -> Vec<&ActionDefinition> {
        let mut actionable: Vec<&ActionDefinition> = self
            .actions
            .values()
            .filter(|action| action.is_actionable(conversation))
            .collect();
        actionable.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        actionable
    }

    /// Marks an action done, by name or by definition. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownAction` for unregistered names; the
    /// conversation is left untouched.
    pub fn mark_done(
        &self,
        action: impl AsRef<str>,
        conversation: &mut Conversation,
    ) -> Result<(), RegistryError> {
        let name = action.as_ref();
        if !self.contains(name) {
            warn!(conversation_id = %conversation.id, action = %name, "Cannot mark unknown action as done");
            return Err(RegistryError::UnknownAction(name.to_string()));
        }

        if conversation.set_done(name) {
            debug!(conversation_id = %conversation.id, action = %name, "Action marked done");
        }
        Ok(())
    }

    /// Whether an action has been marked done, by name or by definition.
    pub fn is_done(&self, action: impl AsRef<str>, conversation: &Conversation) -> bool {
        conversation.is_action_done(action.as_ref())
    }

    /// Whether the named action has its slots filled and prerequisites done.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownAction` for unregistered names.
    pub fn is_complete(
        &self,
        action: impl AsRef<str>,
        conversation: &Conversation,
    ) -> Result<bool, RegistryError> {
        let name = action.as_ref();
        self.get(name)
            .map(|definition| definition.is_complete(conversation))
            .ok_or_else(|| RegistryError::UnknownAction(name.to_string()))
    }

    /// Selects prompts for a locale, falling back to the default locale.
    pub fn select_prompts(
        &self,
        messages: &LocalizedMessages,
        locale: &str,
    ) -> Vec<String> {
        messages
            .for_locale_or(locale, &self.default_locale)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    /// Prompts of the first unmet group of an action.
    ///
    /// Returns `Ok(None)` when the action is complete. A group without
    /// prompts in either locale yields an empty list.
    pub fn missing_prompts(
        &self,
        action: impl AsRef<str>,
        conversation: &Conversation,
        locale: &str,
    ) -> Result<Option<Vec<String>>, RegistryError> {
        let name = action.as_ref();
        let definition = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownAction(name.to_string()))?;

        Ok(definition
            .first_unmet_group(conversation)
            .map(|group| self.select_prompts(group.prompts(), locale)))
    }

    /// Validates extracted entities for an action and commits them to memory.
    ///
    /// Requirements are processed one at a time in declaration order; each
    /// validator finishes before the next requirement starts. A requirement
    /// with no candidate is skipped. Each accepted value is committed
    /// immediately and stays committed even if a later validator rejects.
    ///
    /// # Errors
    ///
    /// - `UpdateMemoryError::UnknownAction` for unregistered names
    /// - `UpdateMemoryError::Rejected` when a validator refuses a value; the
    ///   remaining requirements are not processed and the error reports
    ///   what was committed before it
    pub async fn update_memory(
        &self,
        action: impl AsRef<str>,
        entities: &ExtractedEntities,
        conversation: &mut Conversation,
    ) -> Result<MemoryUpdate, UpdateMemoryError> {
        let name = action.as_ref();
        let definition = self
            .get(name)
            .ok_or_else(|| UpdateMemoryError::UnknownAction(name.to_string()))?;

        let mut update = MemoryUpdate::default();

        for requirement in definition.requirements() {
            let Some(candidate) = entities.first(&requirement.entity) else {
                debug!(
                    conversation_id = %conversation.id,
                    action = %name,
                    entity = %requirement.entity,
                    "No candidate entity, skipping"
                );
                update.skipped.push(requirement.alias.clone());
                continue;
            };

            let value = match &requirement.validator {
                Some(validator) => {
                    match validator.validate(candidate, &conversation.memory).await {
                        Ok(value) => value,
                        Err(rejection) => {
                            warn!(
                                conversation_id = %conversation.id,
                                action = %name,
                                alias = %requirement.alias,
                                "Validator rejected candidate entity"
                            );
                            return Err(UpdateMemoryError::Rejected {
                                alias: requirement.alias.clone(),
                                rejection,
                                update,
                            });
                        }
                    }
                }
                None => candidate.to_value(),
            };

            conversation.commit(&requirement.alias, value);
            debug!(
                conversation_id = %conversation.id,
                action = %name,
                alias = %requirement.alias,
                "Committed slot value"
            );
            update.committed.push(requirement.alias.clone());
        }

        Ok(update)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
