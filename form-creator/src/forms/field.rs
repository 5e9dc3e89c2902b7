//! Field descriptors and their building blocks
//!
//! A [`FieldDescriptor`] is the declarative description of one form field.
//! Descriptors are usually deserialized from JSON:
//!
//! ```rust
//! use form_creator::forms::{FieldDescriptor, FieldKind};
//!
//! let fields = FieldDescriptor::list_from_json(r#"[
//!     {
//!         "type": "input",
//!         "dbField": "email",
//!         "subtype": "email",
//!         "title": { "en": "Email", "nl": "E-mail" },
//!         "required": true,
//!         "size": 6
//!     }
//! ]"#).unwrap();
//!
//! assert_eq!(fields[0].kind, FieldKind::Input);
//! assert_eq!(fields[0].effective_size(), 6);
//! ```

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FormError, Result};

/// Grid span used when a descriptor has no `size`
pub const DEFAULT_SIZE: u8 = 12;

/// Input subtype used when a descriptor has no `subtype`
pub const DEFAULT_SUBTYPE: &str = "text";

/// Kind of form field
///
/// Unrecognised kind strings deserialize to [`FieldKind::Unknown`], which is
/// rendered with the input renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    /// Single-line `<input>` (default)
    #[default]
    Input,
    /// Boolean checkbox
    Checkbox,
    /// Dropdown with options
    Select,
    /// Radio button group
    Radio,
    /// Free-text HTML block
    Text,
    /// Submit button
    ButtonSubmit,
    /// Empty full-width cell that starts a new grid row
    ColumnReset,
    /// Any kind string not listed above
    Unknown,
}

impl FieldKind {
    /// Parse a kind string, falling back to [`FieldKind::Unknown`]
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "input" => Self::Input,
            "checkbox" => Self::Checkbox,
            "select" => Self::Select,
            "radio" => Self::Radio,
            "text" => Self::Text,
            "button_submit" | "buttonsubmit" | "button-submit" | "submit" => Self::ButtonSubmit,
            "colreset" | "column_reset" | "columnreset" | "col-reset" => Self::ColumnReset,
            _ => Self::Unknown,
        }
    }

    /// Canonical kind string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Text => "text",
            Self::ButtonSubmit => "button_submit",
            Self::ColumnReset => "colreset",
            Self::Unknown => "unknown",
        }
    }

    /// Whether descriptors of this kind must carry a `dbField`
    #[must_use]
    pub const fn requires_db_field(&self) -> bool {
        matches!(
            self,
            Self::Input | Self::Checkbox | Self::Select | Self::Radio | Self::Unknown
        )
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text keyed by language tag, e.g. `{ "en": "Name", "fr": "Nom" }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(IndexMap<String, String>);

impl LocalizedText {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation
    #[must_use]
    pub fn with(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(language.into(), text.into());
        self
    }

    /// Translation for a language tag, if present
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    /// Language tags in insertion order
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Whether no translation is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Display label of a select or radio option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionLabel {
    /// Same label in every language
    Plain(String),
    /// Label keyed by language tag
    Localized(LocalizedText),
}

impl From<&str> for OptionLabel {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl From<String> for OptionLabel {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<LocalizedText> for OptionLabel {
    fn from(value: LocalizedText) -> Self {
        Self::Localized(value)
    }
}

/// Extra description attached to a field
///
/// Only the `title` kind is rendered, as a tooltip attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// Description kind (`"title"` renders a tooltip)
    #[serde(alias = "type")]
    pub kind: String,
    /// Localized description text
    #[serde(default)]
    pub value: LocalizedText,
}

impl Description {
    /// Create a tooltip description
    #[must_use]
    pub fn title(value: LocalizedText) -> Self {
        Self {
            kind: "title".to_string(),
            value,
        }
    }

    /// Whether this description renders as a tooltip
    #[must_use]
    pub fn is_title(&self) -> bool {
        self.kind == "title"
    }
}

/// Declarative description of one form field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDescriptor {
    /// Field kind, selects the renderer
    #[serde(alias = "type")]
    pub kind: FieldKind,
    /// Database column / form field name
    #[serde(alias = "db_field", skip_serializing_if = "Option::is_none")]
    pub db_field: Option<String>,
    /// Input subtype (`text`, `email`, `date`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Label, or button text for submit buttons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<LocalizedText>,
    /// Placeholder text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<LocalizedText>,
    /// Optional description (tooltip)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    /// Current value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Options for select and radio fields, in display order
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, OptionLabel>,
    /// Whether the field is required
    pub required: bool,
    /// Grid column span (1-12)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u8>,
}

impl FieldDescriptor {
    /// Create a descriptor of the given kind
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Create an input field
    #[must_use]
    pub fn input(db_field: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            db_field: Some(db_field.into()),
            subtype: Some(subtype.into()),
            ..Self::new(FieldKind::Input)
        }
    }

    /// Create a checkbox field
    #[must_use]
    pub fn checkbox(db_field: impl Into<String>) -> Self {
        Self::named(FieldKind::Checkbox, db_field)
    }

    /// Create a select field
    #[must_use]
    pub fn select(db_field: impl Into<String>) -> Self {
        Self::named(FieldKind::Select, db_field)
    }

    /// Create a radio button group
    #[must_use]
    pub fn radio(db_field: impl Into<String>) -> Self {
        Self::named(FieldKind::Radio, db_field)
    }

    /// Create a free-text HTML block
    #[must_use]
    pub fn text(html: impl Into<String>) -> Self {
        let html: String = html.into();
        Self::new(FieldKind::Text).value(html)
    }

    /// Create a submit button
    #[must_use]
    pub fn button_submit(title: LocalizedText) -> Self {
        Self::new(FieldKind::ButtonSubmit).title(title)
    }

    /// Create a row break
    #[must_use]
    pub fn column_reset() -> Self {
        Self::new(FieldKind::ColumnReset)
    }

    fn named(kind: FieldKind, db_field: impl Into<String>) -> Self {
        Self {
            db_field: Some(db_field.into()),
            ..Self::new(kind)
        }
    }

    /// Set the label
    #[must_use]
    pub fn title(mut self, title: LocalizedText) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the placeholder
    #[must_use]
    pub fn placeholder(mut self, placeholder: LocalizedText) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Attach a tooltip description
    #[must_use]
    pub fn tooltip(mut self, text: LocalizedText) -> Self {
        self.description = Some(Description::title(text));
        self
    }

    /// Set the current value
    #[must_use]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Append an option
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, label: impl Into<OptionLabel>) -> Self {
        self.options.insert(key.into(), label.into());
        self
    }

    /// Mark the field as required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the grid column span
    #[must_use]
    pub const fn size(mut self, size: u8) -> Self {
        self.size = Some(size);
        self
    }

    /// Parse a JSON array of descriptors
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Grid span with the default applied
    #[must_use]
    pub fn effective_size(&self) -> u8 {
        self.size.unwrap_or(DEFAULT_SIZE)
    }

    /// Input subtype with the default applied
    #[must_use]
    pub fn effective_subtype(&self) -> &str {
        self.subtype.as_deref().unwrap_or(DEFAULT_SUBTYPE)
    }

    /// Name used in error messages and logs
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.db_field.as_deref().unwrap_or(self.kind.as_str())
    }

    /// Check the attributes required by this descriptor's kind
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.kind.requires_db_field() {
            self.require_db_field(index)?;
        }
        if let Some(size) = self.size {
            if !(1..=DEFAULT_SIZE).contains(&size) {
                return Err(FormError::invalid(
                    index,
                    self.kind,
                    format!("size must be between 1 and {DEFAULT_SIZE}, got {size}"),
                ));
            }
        }
        Ok(())
    }

    /// The `dbField`, or an error naming this descriptor
    pub fn require_db_field(&self, index: usize) -> Result<&str> {
        match self.db_field.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(FormError::invalid(index, self.kind, "dbField is required")),
        }
    }
}

/// Truthiness of a descriptor value (`false`, `0`, `""`, `"0"`, `null`, `[]` are false)
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Text form of a descriptor value as written into markup
#[must_use]
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null | Value::Bool(false) => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("1"),
        Value::String(s) => Cow::Borrowed(s),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// Loose comparison of an option key with a descriptor value
///
/// Equal text matches; otherwise both sides match when they parse as the
/// same number, so `"1"`, `1` and `"1.0"` are all equal.
#[must_use]
pub fn loosely_equals(key: &str, value: &Value) -> bool {
    let text = value_text(value);
    if key == text {
        return true;
    }
    match (key.trim().parse::<f64>(), text.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => (a - b).abs() < f64::EPSILON,
        _ => false,
    }
}
