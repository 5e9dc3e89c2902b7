//! Error types and error handling

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors raised while rendering a form or mapping it to columns
#[derive(Debug, Error)]
pub enum FormError {
    /// A localized attribute has no entry for the active language
    #[error("Missing translation: field #{index} ({field}) has no '{language}' entry")]
    MissingTranslation {
        /// Position of the descriptor in the input sequence
        index: usize,
        /// Database field name, or the kind when the field has none
        field: String,
        /// Language tag that was looked up
        language: String,
    },

    /// A descriptor lacks an attribute its kind requires, or carries an invalid one
    #[error("Invalid descriptor: field #{index} ({kind}): {reason}")]
    InvalidDescriptor {
        /// Position of the descriptor in the input sequence
        index: usize,
        /// Kind of the offending descriptor
        kind: String,
        /// What is wrong with it
        reason: String,
    },

    /// The container template has no `{FORM}` slot for the rendered fields
    #[error("Container template must contain {{FORM}}")]
    MissingContainerSlot,

    /// Descriptor JSON could not be parsed
    #[error("Descriptor parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormError {
    pub(crate) fn invalid(index: usize, kind: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            index,
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }
}
