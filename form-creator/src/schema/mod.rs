//! Database column definitions derived from field descriptors
//!
//! Every field that submits a value (input, checkbox, select, radio) maps to
//! one column named after its `dbField`. Text blocks, submit buttons and row
//! breaks produce no column.
//!
//! # Storage Types
//!
//! | field | storage type | SQL |
//! |---|---|---|
//! | input `text`, `email`, `tel`, `password`, `color`, `search`, `url` | `short-text` | `VARCHAR(255)` |
//! | input `date`, `datetime-local`, `week`, `month`, `time` | `timestamp` | `DATETIME` |
//! | input `number`, `range` | `integer` | `INT` |
//! | input with any other subtype | `short-text` | `VARCHAR(255)` |
//! | checkbox | `boolean` | `TINYINT(1)`, default `0`, not null |
//! | select, radio | `short-text` | `VARCHAR(255)`, nullable |
//!
//! # Examples
//!
//! ```
//! use form_creator::forms::FieldDescriptor;
//! use form_creator::schema::{SchemaMapper, StorageType};
//!
//! let fields = vec![
//!     FieldDescriptor::input("born", "date"),
//!     FieldDescriptor::checkbox("newsletter"),
//!     FieldDescriptor::column_reset(),
//! ];
//! let columns = SchemaMapper::columns(&fields).unwrap();
//!
//! assert_eq!(columns.len(), 2);
//! assert_eq!(columns[0].storage_type, StorageType::Timestamp);
//! assert_eq!(columns[1].to_sql(), "newsletter TINYINT(1) NOT NULL DEFAULT 0");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::error::Result;
use crate::forms::{FieldDescriptor, FieldKind};

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageType {
    /// Short string (VARCHAR)
    ShortText,
    /// Date and/or time
    Timestamp,
    /// Whole number
    Integer,
    /// Boolean stored as a small integer
    Boolean,
}

impl StorageType {
    /// Storage type for an input subtype
    #[must_use]
    pub fn for_subtype(subtype: &str) -> Self {
        match subtype.trim().to_lowercase().as_str() {
            "date" | "datetime-local" | "week" | "month" | "time" => Self::Timestamp,
            "number" | "range" => Self::Integer,
            // text, email, tel, password, color, search, url and anything unrecognised
            _ => Self::ShortText,
        }
    }

    /// Storage type name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ShortText => "short-text",
            Self::Timestamp => "timestamp",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }

    /// SQL column type
    #[must_use]
    pub const fn sql_type(&self) -> &'static str {
        match self {
            Self::ShortText => "VARCHAR(255)",
            Self::Timestamp => "DATETIME",
            Self::Integer => "INT",
            Self::Boolean => "TINYINT(1)",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A column implied by one field descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name (the field's `dbField`)
    pub name: String,
    /// Storage type
    pub storage_type: StorageType,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Default value, if any
    pub default: Option<Value>,
}

impl ColumnDefinition {
    /// Column definition as it appears inside `CREATE TABLE`
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = format!(
            "{} {} {}",
            self.name,
            self.storage_type.sql_type(),
            if self.nullable { "NULL" } else { "NOT NULL" }
        );
        if let Some(ref default) = self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&sql_literal(default));
        }
        sql
    }
}

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

/// Maps field descriptors to column definitions
pub struct SchemaMapper;

impl SchemaMapper {
    /// Column for the descriptor at `index`, or `None` for kinds that store nothing
    pub fn column(index: usize, field: &FieldDescriptor) -> Result<Option<ColumnDefinition>> {
        let (storage_type, nullable, default) = match field.kind {
            FieldKind::Input | FieldKind::Unknown => {
                (StorageType::for_subtype(field.effective_subtype()), true, None)
            }
            FieldKind::Checkbox => (StorageType::Boolean, false, Some(Value::from(0))),
            FieldKind::Select | FieldKind::Radio => (StorageType::ShortText, true, None),
            FieldKind::Text | FieldKind::ButtonSubmit | FieldKind::ColumnReset => return Ok(None),
        };

        Ok(Some(ColumnDefinition {
            name: field.require_db_field(index)?.to_string(),
            storage_type,
            nullable,
            default,
        }))
    }

    /// Columns for every storing descriptor, in input order
    #[instrument(level = "debug", skip_all, fields(fields = fields.len()))]
    pub fn columns(fields: &[FieldDescriptor]) -> Result<Vec<ColumnDefinition>> {
        let mut columns = Vec::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            if let Some(column) = Self::column(index, field)? {
                tracing::trace!(index, column = %column.name, storage = %column.storage_type, "Mapped column");
                columns.push(column);
            }
        }
        Ok(columns)
    }

    /// `CREATE TABLE` statement for a set of columns
    #[must_use]
    pub fn create_table_sql(table: &str, columns: &[ColumnDefinition]) -> String {
        let body = columns
            .iter()
            .map(|column| format!("    {}", column.to_sql()))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("CREATE TABLE {table} (\n{body}\n);")
    }
}

fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => u8::from(*b).to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Array(_) | Value::Object(_) => format!("'{}'", value.to_string().replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::forms::LocalizedText;

    #[test]
    fn test_subtype_table() {
        let test_cases = vec![
            ("text", StorageType::ShortText),
            ("email", StorageType::ShortText),
            ("tel", StorageType::ShortText),
            ("password", StorageType::ShortText),
            ("color", StorageType::ShortText),
            ("search", StorageType::ShortText),
            ("url", StorageType::ShortText),
            ("date", StorageType::Timestamp),
            ("datetime-local", StorageType::Timestamp),
            ("week", StorageType::Timestamp),
            ("month", StorageType::Timestamp),
            ("time", StorageType::Timestamp),
            ("number", StorageType::Integer),
            ("range", StorageType::Integer),
            ("hologram", StorageType::ShortText),
        ];

        for (subtype, expected) in test_cases {
            assert_eq!(StorageType::for_subtype(subtype), expected, "subtype {subtype}");
        }
    }

    #[test]
    fn test_storage_type_names() {
        assert_eq!(StorageType::Timestamp.as_str(), "timestamp");
        assert_eq!(StorageType::Integer.to_string(), "integer");
        assert_eq!(StorageType::ShortText.to_string(), "short-text");
        assert_eq!(
            serde_json::to_string(&StorageType::ShortText).unwrap(),
            r#""short-text""#
        );
    }

    #[test]
    fn test_checkbox_column() {
        let column = SchemaMapper::column(0, &FieldDescriptor::checkbox("active"))
            .unwrap()
            .unwrap();
        assert_eq!(column.storage_type, StorageType::Boolean);
        assert!(!column.nullable);
        assert_eq!(column.default, Some(Value::from(0)));
    }

    #[test]
    fn test_select_and_radio_nullable_text() {
        for field in [FieldDescriptor::select("s"), FieldDescriptor::radio("r")] {
            let column = SchemaMapper::column(0, &field).unwrap().unwrap();
            assert_eq!(column.storage_type, StorageType::ShortText);
            assert!(column.nullable);
            assert_eq!(column.default, None);
        }
    }

    #[test]
    fn test_non_storing_kinds() {
        let fields = [
            FieldDescriptor::text("<p>hi</p>"),
            FieldDescriptor::button_submit(LocalizedText::new().with("en", "Go")),
            FieldDescriptor::column_reset(),
        ];
        for field in &fields {
            assert_eq!(SchemaMapper::column(0, field).unwrap(), None);
        }
    }

    #[test]
    fn test_columns_preserve_order() {
        let fields = vec![
            FieldDescriptor::input("name", "text"),
            FieldDescriptor::text("<p>between</p>"),
            FieldDescriptor::input("age", "number"),
            FieldDescriptor::radio("gender"),
        ];
        let names: Vec<_> = SchemaMapper::columns(&fields)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["name", "age", "gender"]);
    }

    #[test]
    fn test_missing_db_field() {
        let mut field = FieldDescriptor::input("x", "text");
        field.db_field = None;
        assert!(matches!(
            SchemaMapper::columns(&[field]),
            Err(FormError::InvalidDescriptor { index: 0, .. })
        ));
    }

    #[test]
    fn test_create_table_sql() {
        let columns = SchemaMapper::columns(&[
            FieldDescriptor::input("email", "email"),
            FieldDescriptor::checkbox("newsletter"),
        ])
        .unwrap();

        assert_eq!(
            SchemaMapper::create_table_sql("subscribers", &columns),
            "CREATE TABLE subscribers (\n    email VARCHAR(255) NULL,\n    newsletter TINYINT(1) NOT NULL DEFAULT 0\n);"
        );
    }

    #[test]
    fn test_sql_literal_quotes_strings() {
        assert_eq!(sql_literal(&Value::from("it's")), "'it''s'");
        assert_eq!(sql_literal(&Value::from(true)), "1");
        assert_eq!(sql_literal(&Value::Null), "NULL");
    }
}
