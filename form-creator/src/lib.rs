//! form-creator: HTML form markup and database columns from field descriptors
//!
//! A form is described as an ordered list of field descriptors, usually
//! loaded from JSON. From that single description the crate produces:
//! - The form body markup, localized to one language and laid out on a
//!   12-column grid
//! - The column definitions a table needs to store the submitted values
//!
//! # Quick Start
//!
//! ```rust
//! use form_creator::prelude::*;
//!
//! # fn main() -> form_creator::error::Result<()> {
//! let fields = FieldDescriptor::list_from_json(r#"[
//!     {"kind": "input", "dbField": "name", "subtype": "text", "title": {"en": "Name"}, "size": 6},
//!     {"kind": "input", "dbField": "born", "subtype": "date", "title": {"en": "Born"}, "size": 6},
//!     {"kind": "checkbox", "dbField": "newsletter", "title": {"en": "Newsletter"}},
//!     {"kind": "button_submit", "title": {"en": "Save"}}
//! ]"#)?;
//!
//! let html = FormRenderer::default().render(&fields)?;
//! assert!(html.contains(r#"name="born""#));
//!
//! let columns = SchemaMapper::columns(&fields)?;
//! assert_eq!(columns.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`forms`]: descriptors, localization, sanitization and rendering
//! - [`schema`]: storage types and column definitions
//! - [`config`]: styles, language and container template
//! - [`observability`]: tracing subscriber setup for binaries

// Lint configuration is handled at the workspace level in Cargo.toml
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod forms;
pub mod observability;
pub mod schema;

pub mod prelude {
    //! Convenience re-exports for common types
    //!
    //! # Examples
    //!
    //! ```rust
    //! use form_creator::prelude::*;
    //! ```

    pub use crate::config::{FormConfig, FormStyles};
    pub use crate::error::FormError;
    pub use crate::forms::{
        FieldDescriptor, FieldKind, FormRenderer, IdGenerator, LocalizedText,
        MissingTranslationPolicy, OptionLabel, Sanitizer, SequentialIds,
    };
    pub use crate::schema::{ColumnDefinition, SchemaMapper, StorageType};

    pub use serde_json::json;
}
