//! Language resolution for localized labels, placeholders and options

use serde::{Deserialize, Serialize};

use super::field::{FieldDescriptor, LocalizedText, OptionLabel};
use crate::error::{FormError, Result};

/// What to do when a localized attribute has no entry for the active language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTranslationPolicy {
    /// Fail with [`FormError::MissingTranslation`] (default)
    #[default]
    Error,
    /// Substitute an empty string and log a warning
    Empty,
}

/// Resolves [`LocalizedText`] to a single language
///
/// There is no fallback chain: a missing tag is never answered with another
/// language.
#[derive(Debug, Clone, Copy)]
pub struct Localizer<'a> {
    language: &'a str,
    policy: MissingTranslationPolicy,
}

impl<'a> Localizer<'a> {
    /// Create a localizer for a language tag
    #[must_use]
    pub const fn new(language: &'a str, policy: MissingTranslationPolicy) -> Self {
        Self { language, policy }
    }

    /// Active language tag
    #[must_use]
    pub const fn language(&self) -> &'a str {
        self.language
    }

    /// Translation for the active language, without applying the policy
    #[must_use]
    pub fn lookup<'t>(&self, text: &'t LocalizedText) -> Option<&'t str> {
        text.get(self.language)
    }

    /// Resolve a localized attribute of the descriptor at `index`
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingTranslation`] when the language is absent
    /// and the policy is [`MissingTranslationPolicy::Error`].
    pub fn resolve<'t>(
        &self,
        text: &'t LocalizedText,
        index: usize,
        field: &FieldDescriptor,
    ) -> Result<&'t str> {
        if let Some(value) = self.lookup(text) {
            return Ok(value);
        }
        match self.policy {
            MissingTranslationPolicy::Error => Err(FormError::MissingTranslation {
                index,
                field: field.display_name().to_string(),
                language: self.language.to_string(),
            }),
            MissingTranslationPolicy::Empty => {
                tracing::warn!(
                    index,
                    field = field.display_name(),
                    language = self.language,
                    "Missing translation, rendering empty text"
                );
                Ok("")
            }
        }
    }

    /// Resolve an optional attribute; `None` when the descriptor has no such attribute
    pub fn resolve_optional<'t>(
        &self,
        text: Option<&'t LocalizedText>,
        index: usize,
        field: &FieldDescriptor,
    ) -> Result<Option<&'t str>> {
        text.map(|t| self.resolve(t, index, field)).transpose()
    }

    /// Display label of an option
    ///
    /// Plain labels are used as-is, localized labels resolve to the active
    /// language, and anything else falls back to the option key.
    #[must_use]
    pub fn option_label<'t>(&self, key: &'t str, label: &'t OptionLabel) -> &'t str {
        match label {
            OptionLabel::Plain(text) => text,
            OptionLabel::Localized(text) => self.lookup(text).unwrap_or(key),
        }
    }
}
