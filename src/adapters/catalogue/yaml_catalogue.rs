//! YAML Action Catalogue
//!
//! Reads action declarations from YAML and turns them into registered
//! `ActionDefinition`s. Validators are referenced by name and resolved
//! against a host-supplied `ValidatorSet`.
//!
//! ```yaml
//! actions:
//!   - name: Order
//!     intent: order
//!     constraints:
//!       - prompts: { en: ["What product would you like?"] }
//!         entities:
//!           - { entity: number, alias: product, validator: reject_if_present }
//!     dependencies:
//!       - actions: [Greetings]
//! ```

use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::adapters::validation::ValidatorSet;
use crate::domain::action::{
    ActionDefinition, ActionRegistry, ConstraintGroup, DependencyGroup, EntityRequirement,
    RegistryError,
};
use crate::domain::foundation::{DomainError, ErrorCode, LocalizedMessages};

/// Errors that can occur while loading a catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Malformed catalogue: {0}")]
    Malformed(String),

    #[error("Action {action} references unknown validator {validator}")]
    UnknownValidator { action: String, validator: String },

    #[error("Registration failed: {0}")]
    Registry(#[from] RegistryError),
}

impl From<CatalogueError> for DomainError {
    fn from(err: CatalogueError) -> Self {
        match err {
            CatalogueError::Registry(inner) => inner.into(),
            other => DomainError::new(ErrorCode::CatalogueInvalid, other.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogueDocument {
    #[serde(default)]
    actions: Vec<ActionDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActionDoc {
    name: String,
    #[serde(default)]
    intent: String,
    #[serde(default)]
    constraints: Vec<ConstraintDoc>,
    #[serde(default)]
    dependencies: Vec<DependencyDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConstraintDoc {
    #[serde(default)]
    prompts: LocalizedMessages,
    #[serde(default)]
    entities: Vec<RequirementDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequirementDoc {
    #[serde(default)]
    entity: String,
    alias: String,
    validator: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DependencyDoc {
    #[serde(default)]
    prompts: LocalizedMessages,
    actions: Vec<String>,
}

/// Builds actions from YAML documents.
#[derive(Debug, Clone, Default)]
pub struct YamlActionCatalogue {
    validators: ValidatorSet,
}

impl YamlActionCatalogue {
    pub fn new(validators: ValidatorSet) -> Self {
        Self { validators }
    }

    /// Parses a YAML document into action definitions.
    ///
    /// Actions are returned unvalidated; registration checks their structure.
    pub fn parse(&self, yaml: &str) -> Result<Vec<ActionDefinition>, CatalogueError> {
        let document: CatalogueDocument =
            serde_yaml::from_str(yaml).map_err(|e| CatalogueError::Malformed(e.to_string()))?;

        document
            .actions
            .into_iter()
            .map(|doc| self.build_action(doc))
            .collect()
    }

    /// Reads and parses a catalogue file.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Vec<ActionDefinition>, CatalogueError> {
        let yaml = fs::read_to_string(path.as_ref())
            .await
            .map_err(|e| CatalogueError::IoError(e.to_string()))?;

        self.parse(&yaml)
    }

    /// Parses a document and registers its actions, all or nothing.
    ///
    /// Returns the number of actions registered.
    pub fn load_into(&self, yaml: &str, registry: &mut ActionRegistry) -> Result<usize, CatalogueError> {
        let actions = self.parse(yaml)?;
        let count = actions.len();
        registry.register_all(actions)?;
        info!(count, "Loaded action catalogue");
        Ok(count)
    }

    fn build_action(&self, doc: ActionDoc) -> Result<ActionDefinition, CatalogueError> {
        let mut action = ActionDefinition::new(doc.name.clone(), doc.intent);

        for constraint in doc.constraints {
            let mut group = ConstraintGroup::new(constraint.prompts);
            for entity in constraint.entities {
                let mut requirement = EntityRequirement::new(entity.entity, entity.alias);
                if let Some(name) = entity.validator {
                    let validator =
                        self.validators
                            .get(&name)
                            .ok_or_else(|| CatalogueError::UnknownValidator {
                                action: doc.name.clone(),
                                validator: name.clone(),
                            })?;
                    requirement = requirement.with_validator(validator);
                }
                group = group.with_requirement(requirement);
            }
            action = action.with_constraint(group);
        }

        for dependency in doc.dependencies {
            let group = dependency
                .actions
                .into_iter()
                .fold(DependencyGroup::new(dependency.prompts), |group, name| {
                    group.with_action(name)
                });
            action = action.with_dependency(group);
        }

        Ok(action)
    }
}
