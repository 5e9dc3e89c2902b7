//! Form rendering from declarative field descriptors
//!
//! This module turns a sequence of [`FieldDescriptor`]s into the markup of a
//! form body:
//! - One grid cell per descriptor, dispatched on [`FieldKind`]
//! - Labels, placeholders and options resolved to one language
//! - Free-text blocks restricted to an allow list of tags
//! - Missing optional attributes filled with defaults (size 12, subtype `text`)
//!
//! # Quick Start
//!
//! ```rust
//! use form_creator::forms::{FieldDescriptor, FormRenderer, LocalizedText};
//!
//! let fields = vec![
//!     FieldDescriptor::input("email", "email")
//!         .title(LocalizedText::new().with("en", "Email").with("nl", "E-mail"))
//!         .required(),
//!     FieldDescriptor::select("country")
//!         .title(LocalizedText::new().with("en", "Country").with("nl", "Land"))
//!         .option("be", "Belgium")
//!         .option("nl", LocalizedText::new().with("en", "Netherlands").with("nl", "Nederland"))
//!         .value("be"),
//!     FieldDescriptor::button_submit(LocalizedText::new().with("en", "Send").with("nl", "Verzenden")),
//! ];
//!
//! let html = FormRenderer::default().render_in(&fields, "nl").unwrap();
//! assert!(html.contains("Nederland"));
//! assert!(html.contains("Verzenden"));
//! ```
//!
//! # Ids
//!
//! Element ids look like `input-4821-email`. The numeric part comes from an
//! [`IdGenerator`]; [`FormRenderer::render`] draws random numbers, while
//! [`FormRenderer::render_with_ids`] accepts e.g. [`SequentialIds`] for
//! reproducible output.

mod field;
mod ids;
mod localize;
mod render;
mod sanitize;

pub use field::{
    is_truthy, loosely_equals, value_text, Description, FieldDescriptor, FieldKind,
    LocalizedText, OptionLabel, DEFAULT_SIZE, DEFAULT_SUBTYPE,
};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use localize::{Localizer, MissingTranslationPolicy};
pub use render::{normalize_whitespace, FormRenderer};
pub use sanitize::{Sanitizer, DEFAULT_ALLOWED_TAGS};
