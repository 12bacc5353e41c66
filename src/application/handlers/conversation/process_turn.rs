//! ProcessTurn command handler.
//!
//! Handles one user turn: resolves the action for the recognized intent,
//! merges the extracted entities into conversation memory, and reports
//! what the host should do next. The handler never marks actions done;
//! the host does that once it has actually run the action.

use std::sync::Arc;

use tracing::debug;

use crate::domain::action::{ActionRegistry, MemoryUpdate, UnmetGroup, UpdateMemoryError};
use crate::domain::conversation::{Conversation, ExtractedEntities};
use crate::domain::foundation::DomainError;

/// Command carrying the NLU output for one turn.
#[derive(Debug, Clone)]
pub struct ProcessTurnCommand {
    /// The recognized intent.
    pub intent: String,
    /// Entities extracted from the utterance.
    pub entities: ExtractedEntities,
    /// Locale to select prompts in.
    pub locale: String,
}

impl ProcessTurnCommand {
    /// Creates a new process turn command.
    pub fn new(
        intent: impl Into<String>,
        entities: ExtractedEntities,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            intent: intent.into(),
            entities,
            locale: locale.into(),
        }
    }
}

/// What the host should do after a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// No registered action handles the intent.
    UnknownIntent { intent: String },

    /// The action was already done in this conversation.
    AlreadyDone { action: String },

    /// A validator refused a value; re-prompt with its messages.
    Rejected {
        action: String,
        alias: String,
        messages: Vec<String>,
    },

    /// Prerequisite actions still need to run.
    AwaitingDependencies {
        action: String,
        missing_actions: Vec<String>,
        prompts: Vec<String>,
    },

    /// Slots are still empty.
    AwaitingInformation {
        action: String,
        missing_aliases: Vec<String>,
        prompts: Vec<String>,
    },

    /// The action is complete and can be invoked.
    Ready { action: String },
}

/// Result of processing a turn.
#[derive(Debug, Clone)]
pub struct ProcessTurnResult {
    pub outcome: TurnOutcome,
    /// Memory changes made this turn, absent when the action was not
    /// processed. Present on rejection too, since earlier slots stay committed.
    pub update: Option<MemoryUpdate>,
}

/// Handler for processing user turns.
pub struct ProcessTurnHandler {
    registry: Arc<ActionRegistry>,
}

impl ProcessTurnHandler {
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(
        &self,
        cmd: ProcessTurnCommand,
        conversation: &mut Conversation,
    ) -> Result<ProcessTurnResult, DomainError> {
        // 1. Resolve the action for the intent
        let Some(action) = self.registry.action_for_intent(&cmd.intent) else {
            debug!(conversation_id = %conversation.id, intent = %cmd.intent, "No action for intent");
            return Ok(ProcessTurnResult {
                outcome: TurnOutcome::UnknownIntent { intent: cmd.intent },
                update: None,
            });
        };
        let name = action.name().to_string();

        // 2. Finished actions are not re-run
        if action.is_done(conversation) {
            return Ok(ProcessTurnResult {
                outcome: TurnOutcome::AlreadyDone { action: name },
                update: None,
            });
        }

        // 3. Merge extracted entities into memory
        let update = match self
            .registry
            .update_memory(&name, &cmd.entities, conversation)
            .await
        {
            Ok(update) => update,
            Err(UpdateMemoryError::Rejected {
                alias,
                rejection,
                update,
            }) => {
                let messages = self.registry.select_prompts(&rejection.messages, &cmd.locale);
                return Ok(ProcessTurnResult {
                    outcome: TurnOutcome::Rejected {
                        action: name,
                        alias,
                        messages,
                    },
                    update: Some(update),
                });
            }
            Err(err) => return Err(err.into()),
        };

        // 4. Report the first unmet group, dependencies first
        let outcome = match action.first_unmet_group(conversation) {
            Some(UnmetGroup::Dependency(group)) => TurnOutcome::AwaitingDependencies {
                action: name,
                missing_actions: group
                    .missing_actions(conversation)
                    .map(str::to_string)
                    .collect(),
                prompts: self.registry.select_prompts(&group.prompts, &cmd.locale),
            },
            Some(UnmetGroup::Constraint(group)) => TurnOutcome::AwaitingInformation {
                action: name,
                missing_aliases: group
                    .missing_aliases(&conversation.memory)
                    .map(str::to_string)
                    .collect(),
                prompts: self.registry.select_prompts(&group.prompts, &cmd.locale),
            },
            None => TurnOutcome::Ready { action: name },
        };

        debug!(conversation_id = %conversation.id, outcome = ?outcome, "Processed turn");

        Ok(ProcessTurnResult {
            outcome,
            update: Some(update),
        })
    }
}
