//! Locale-keyed message sets.
//!
//! Used for the prompts of unmet constraint and dependency groups and for
//! the payload of validator rejections. The core only selects a locale; it
//! never formats or translates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered messages keyed by locale (`"en"`, `"fr"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedMessages(BTreeMap<String, Vec<String>>);

impl LocalizedMessages {
    /// Creates an empty message set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the messages for a locale, replacing any previous entry.
    pub fn with<I, S>(mut self, locale: impl Into<String>, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(locale, messages);
        self
    }

    /// Inserts the messages for a locale, replacing any previous entry.
    pub fn insert<I, S>(&mut self, locale: impl Into<String>, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(locale.into(), messages.into_iter().map(Into::into).collect());
    }

    /// Returns the messages for exactly this locale.
    pub fn for_locale(&self, locale: &str) -> Option<&[String]> {
        self.0.get(locale).map(Vec::as_slice)
    }

    /// Returns the messages for `locale`, falling back to `fallback`.
    pub fn for_locale_or(&self, locale: &str, fallback: &str) -> Option<&[String]> {
        self.for_locale(locale).or_else(|| self.for_locale(fallback))
    }

    /// Returns the locales that have messages.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L, I, S> FromIterator<(L, I)> for LocalizedMessages
where
    L: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (L, I)>>(iter: T) -> Self {
        let mut messages = Self::new();
        for (locale, items) in iter {
            messages.insert(locale, items);
        }
        messages
    }
}
