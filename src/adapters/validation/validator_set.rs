//! Named validators available to declarative action catalogues.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::ports::EntityValidator;

/// Validators a catalogue may reference by name.
#[derive(Clone, Default)]
pub struct ValidatorSet {
    validators: HashMap<String, Arc<dyn EntityValidator>>,
}

impl ValidatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a validator under `name`, replacing any previous one.
    pub fn with(mut self, name: impl Into<String>, validator: Arc<dyn EntityValidator>) -> Self {
        self.insert(name, validator);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, validator: Arc<dyn EntityValidator>) {
        self.validators.insert(name.into(), validator);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn EntityValidator>> {
        self.validators.get(name).cloned()
    }
}

impl fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ValidatorSet").field("validators", &names).finish()
    }
}
