//! Dialogue engine configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::action::DEFAULT_LOCALE;

/// Dialogue engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Locale prompts fall back to when the requested one is missing
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// YAML action catalogue to load at startup
    pub catalogue_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_locale.trim().is_empty() {
            return Err(ValidationError::EmptyLocale);
        }
        if self
            .catalogue_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ValidationError::EmptyCataloguePath);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            catalogue_path: None,
        }
    }
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}
