//! Entities extracted from user input by the external NLU component.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A single candidate entity record.
///
/// Carries at least the raw text it was extracted from. Any additional
/// fields (parsed values, geocoding, date metadata) pass through untouched
/// to validators and memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    /// The text span the entity was extracted from.
    pub raw: String,
    /// Remaining fields produced by the extractor.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ExtractedEntity {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            fields: Map::new(),
        }
    }

    /// Adds an extra field to the record.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the record as a JSON object, `raw` included.
    pub fn to_value(&self) -> Value {
        let mut object = self.fields.clone();
        object.insert("raw".to_string(), Value::String(self.raw.clone()));
        Value::Object(object)
    }
}

/// Candidate entities keyed by entity type, each list in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedEntities(HashMap<String, Vec<ExtractedEntity>>);

impl ExtractedEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a candidate for an entity type.
    pub fn with(mut self, entity_type: impl Into<String>, entity: ExtractedEntity) -> Self {
        self.push(entity_type, entity);
        self
    }

    pub fn push(&mut self, entity_type: impl Into<String>, entity: ExtractedEntity) {
        self.0.entry(entity_type.into()).or_default().push(entity);
    }

    /// Returns the candidate used for slot filling: the first one extracted.
    pub fn first(&self, entity_type: &str) -> Option<&ExtractedEntity> {
        self.0.get(entity_type).and_then(|candidates| candidates.first())
    }

    /// Returns every candidate for an entity type.
    pub fn all(&self, entity_type: &str) -> &[ExtractedEntity] {
        self.0.get(entity_type).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}
