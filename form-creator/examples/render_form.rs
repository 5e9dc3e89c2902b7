//! Render a form and its table definition from a JSON descriptor file
//!
//! Run with: `cargo run --example render_form -- [descriptors.json] [language]`
//!
//! Without arguments a built-in contact form is rendered in English.
//! Configuration is read from `./form-creator.toml` and `FORM_CREATOR_*`
//! environment variables.

use form_creator::config::FormConfig;
use form_creator::forms::{FieldDescriptor, FormRenderer};
use form_creator::observability;
use form_creator::schema::SchemaMapper;

const CONTACT_FORM: &str = r#"[
    {"type": "input", "dbField": "name", "subtype": "text", "size": 6,
     "title": {"en": "Name", "nl": "Naam"}, "required": true},
    {"type": "input", "dbField": "email", "subtype": "email", "size": 6,
     "title": {"en": "Email", "nl": "E-mail"},
     "placeholder": {"en": "you@example.com", "nl": "jij@voorbeeld.be"}},
    {"type": "colreset"},
    {"type": "select", "dbField": "topic", "title": {"en": "Topic", "nl": "Onderwerp"},
     "options": {"sales": {"en": "Sales", "nl": "Verkoop"}, "support": "Support"}},
    {"type": "checkbox", "dbField": "newsletter",
     "title": {"en": "Keep me posted", "nl": "Hou me op de hoogte"}},
    {"type": "text", "value": "<p>We reply within <strong>two</strong> days.</p>"},
    {"type": "button_submit", "title": {"en": "Send", "nl": "Verzenden"}}
]"#;

fn main() -> anyhow::Result<()> {
    observability::init()?;

    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(path) => std::fs::read_to_string(&path)?,
        None => CONTACT_FORM.to_string(),
    };

    let mut config = FormConfig::load()?;
    if let Some(language) = args.next() {
        config = config.with_language(language);
    }

    let fields = FieldDescriptor::list_from_json(&source)?;
    tracing::info!(fields = fields.len(), language = %config.language, "Rendering form");

    let renderer = FormRenderer::new(config);
    let html = renderer.render(&fields)?;
    let columns = SchemaMapper::columns(&fields)?;

    println!("<form method=\"post\">{html}</form>");
    println!();
    println!("{}", SchemaMapper::create_table_sql("submissions", &columns));

    Ok(())
}
