//! Configuration management for form-creator
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `FORM_CREATOR_` prefix, `__` for nesting)
//! 2. `./form-creator.toml` (or an explicit file passed to [`FormConfig::load_from`])
//! 3. Hardcoded defaults (fallback)
//!
//! Environment variable format: `FORM_CREATOR_SECTION__FIELD_NAME`
//! - Use `__` (double underscore) to separate nested sections
//! - Example: `FORM_CREATOR_STYLES__FORM_CONTROL=form-control-sm`
//!
//! # Example Configuration
//!
//! ```toml
//! # form-creator.toml
//! language = "nl"
//! missing_translation = "empty"
//! container = '<div class="row">{FORM}</div>'
//!
//! [styles]
//! form_group = "form-group"
//! form_control = "form-control"
//! col = "col-md"
//!
//! [sanitizer]
//! allowed_tags = ["p", "a", "strong"]
//! ```
//!
//! # Usage
//!
//! ```rust
//! use form_creator::config::FormConfig;
//!
//! let config = FormConfig::default();
//! assert_eq!(config.language, "en");
//! assert_eq!(config.styles.form_control, "form-control");
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::forms::{MissingTranslationPolicy, DEFAULT_ALLOWED_TAGS};

/// Placeholder in [`FormConfig::container`] replaced by the rendered fields
pub const CONTAINER_SLOT: &str = "{FORM}";

/// Default local configuration file
pub const DEFAULT_CONFIG_FILE: &str = "./form-creator.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "FORM_CREATOR_";

/// CSS class names written into the markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormStyles {
    /// Wrapper class of every field cell
    pub form_group: String,

    /// Class of inputs and selects
    pub form_control: String,

    /// Grid column prefix; the span is appended as `-<size>`
    pub col: String,

    /// Wrapper class of each checkbox or radio option
    pub form_check: String,

    /// Class of checkbox and radio inputs
    pub form_check_input: String,

    /// Class of checkbox and radio labels
    pub form_check_label: String,

    /// Class of the submit button
    pub button: String,
}

impl Default for FormStyles {
    fn default() -> Self {
        Self {
            form_group: "form-group".to_string(),
            form_control: "form-control".to_string(),
            col: "col".to_string(),
            form_check: "form-check".to_string(),
            form_check_input: "form-check-input".to_string(),
            form_check_label: "form-check-label".to_string(),
            button: "btn btn-primary".to_string(),
        }
    }
}

/// Free-text sanitization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerSettings {
    /// Tags kept in `text` fields; everything else is stripped
    pub allowed_tags: Vec<String>,
}

impl Default for SanitizerSettings {
    fn default() -> Self {
        Self {
            allowed_tags: DEFAULT_ALLOWED_TAGS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Complete form-creator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Language tag used to resolve titles, placeholders and options
    pub language: String,

    /// Markup wrapped around the fields; must contain `{FORM}`
    pub container: String,

    /// Behaviour when a localized attribute lacks the active language
    pub missing_translation: MissingTranslationPolicy,

    /// CSS class names
    pub styles: FormStyles,

    /// Free-text sanitization
    pub sanitizer: SanitizerSettings,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            container: format!(r#"<div class="row">{CONTAINER_SLOT}</div>"#),
            missing_translation: MissingTranslationPolicy::default(),
            styles: FormStyles::default(),
            sanitizer: SanitizerSettings::default(),
        }
    }
}

impl FormConfig {
    /// Load configuration from `./form-creator.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - Configuration file contains invalid TOML syntax
    /// - Configuration values fail type conversion
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Self::defaults()?;

        let local_config = Path::new(DEFAULT_CONFIG_FILE);
        if local_config.exists() {
            figment = figment.merge(Toml::file(local_config));
        }

        Self::extract(figment.merge(Self::environment()))
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - Configuration file contains invalid TOML syntax
    /// - Configuration values fail type conversion
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use form_creator::config::FormConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = FormConfig::load_from("./config/forms.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let figment = Self::defaults()?
            .merge(Toml::file(path.as_ref()))
            .merge(Self::environment());
        Self::extract(figment)
    }

    /// Set the language tag
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the missing-translation policy
    #[must_use]
    pub const fn with_missing_translation(mut self, policy: MissingTranslationPolicy) -> Self {
        self.missing_translation = policy;
        self
    }

    /// Replace the style classes
    #[must_use]
    pub fn with_styles(mut self, styles: FormStyles) -> Self {
        self.styles = styles;
        self
    }

    fn defaults() -> anyhow::Result<Figment> {
        Ok(Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?)))
    }

    fn environment() -> Env {
        Env::prefixed(ENV_PREFIX).split("__").lowercase(true)
    }

    fn extract(figment: Figment) -> anyhow::Result<Self> {
        let config: Self = figment.extract()?;
        if !config.container.contains(CONTAINER_SLOT) {
            anyhow::bail!("container template must contain {CONTAINER_SLOT}");
        }
        tracing::debug!(language = %config.language, "Loaded form configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert_eq!(config.language, "en");
        assert_eq!(config.container, r#"<div class="row">{FORM}</div>"#);
        assert_eq!(config.missing_translation, MissingTranslationPolicy::Error);
        assert!(config.sanitizer.allowed_tags.contains(&"blockquote".to_string()));
    }

    #[test]
    fn test_style_defaults() {
        let styles = FormStyles::default();
        assert_eq!(styles.form_group, "form-group");
        assert_eq!(styles.form_control, "form-control");
        assert_eq!(styles.col, "col");
        assert_eq!(styles.button, "btn btn-primary");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
language = "nl"
missing_translation = "empty"

[styles]
col = "col-md"
"#
        )
        .unwrap();

        let config = FormConfig::load_from(file.path()).unwrap();
        assert_eq!(config.language, "nl");
        assert_eq!(config.missing_translation, MissingTranslationPolicy::Empty);
        assert_eq!(config.styles.col, "col-md");
        // Untouched sections keep their defaults
        assert_eq!(config.styles.form_group, "form-group");
    }

    #[test]
    fn test_container_without_slot_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"container = "<div></div>""#).unwrap();

        assert!(FormConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_builders() {
        let config = FormConfig::default()
            .with_language("fr")
            .with_missing_translation(MissingTranslationPolicy::Empty);
        assert_eq!(config.language, "fr");
        assert_eq!(config.missing_translation, MissingTranslationPolicy::Empty);
    }
}
