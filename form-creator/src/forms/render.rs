//! Form rendering to HTML
//!
//! Renders descriptor sequences to the markup of a form body. Each
//! descriptor becomes one `<div>` grid cell; the cells are joined in input
//! order and placed into the configured container template. The caller owns
//! the surrounding `<form>` element.

use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::instrument;

use super::field::{is_truthy, loosely_equals, value_text, FieldDescriptor, FieldKind};
use super::ids::{IdGenerator, RandomIds};
use super::localize::Localizer;
use super::sanitize::Sanitizer;
use crate::config::{FormConfig, CONTAINER_SLOT};
use crate::error::{FormError, Result};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// One descriptor with its position and the localizer for this render
struct FieldContext<'a> {
    index: usize,
    field: &'a FieldDescriptor,
    localizer: Localizer<'a>,
}

impl<'a> FieldContext<'a> {
    fn db_field(&self) -> Result<&'a str> {
        self.field.require_db_field(self.index)
    }

    fn title(&self) -> Result<Option<&'a str>> {
        self.localizer
            .resolve_optional(self.field.title.as_ref(), self.index, self.field)
    }

    fn placeholder(&self) -> Result<Option<&'a str>> {
        Ok(self
            .localizer
            .resolve_optional(self.field.placeholder.as_ref(), self.index, self.field)?
            .filter(|text| !text.is_empty()))
    }

    /// Select placeholders are optional per language; a lookup miss omits them
    fn select_placeholder(&self) -> Option<&'a str> {
        self.field
            .placeholder
            .as_ref()
            .and_then(|placeholder| self.localizer.lookup(placeholder))
            .filter(|text| !text.is_empty())
    }

    fn tooltip(&self) -> Result<Option<&'a str>> {
        let description = self
            .field
            .description
            .as_ref()
            .filter(|description| description.is_title())
            .map(|description| &description.value);
        Ok(self
            .localizer
            .resolve_optional(description, self.index, self.field)?
            .filter(|text| !text.is_empty()))
    }
}

/// Renders field descriptors to HTML
///
/// The renderer is immutable after construction and can be shared between
/// threads; every render call uses its own id generator.
///
/// ```rust
/// use form_creator::forms::{FieldDescriptor, FormRenderer, LocalizedText};
///
/// let fields = vec![
///     FieldDescriptor::input("name", "text")
///         .title(LocalizedText::new().with("en", "Name"))
///         .size(6),
///     FieldDescriptor::checkbox("newsletter")
///         .title(LocalizedText::new().with("en", "Subscribe"))
///         .value(true),
/// ];
///
/// let html = FormRenderer::default().render(&fields).unwrap();
/// assert!(html.starts_with(r#"<div class="row">"#));
/// assert!(html.contains("col-6"));
/// assert!(html.contains(" checked"));
/// ```
#[derive(Debug, Clone)]
pub struct FormRenderer {
    config: FormConfig,
    sanitizer: Sanitizer,
}

impl Default for FormRenderer {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

impl FormRenderer {
    /// Create a renderer from configuration
    #[must_use]
    pub fn new(config: FormConfig) -> Self {
        let sanitizer = Sanitizer::new(config.sanitizer.allowed_tags.iter().cloned());
        Self { config, sanitizer }
    }

    /// Configuration this renderer was built with
    #[must_use]
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Sanitizer applied to `text` fields
    #[must_use]
    pub const fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    /// Render a form body in the configured language
    pub fn render(&self, fields: &[FieldDescriptor]) -> Result<String> {
        self.render_in(fields, &self.config.language)
    }

    /// Render a form body in a specific language
    pub fn render_in(&self, fields: &[FieldDescriptor], language: &str) -> Result<String> {
        let mut ids = RandomIds::default();
        self.render_with_ids(fields, language, &mut ids)
    }

    /// Render a form body with a caller-supplied id generator
    #[instrument(level = "debug", skip_all, fields(fields = fields.len(), language = %language))]
    pub fn render_with_ids(
        &self,
        fields: &[FieldDescriptor],
        language: &str,
        ids: &mut dyn IdGenerator,
    ) -> Result<String> {
        if !self.config.container.contains(CONTAINER_SLOT) {
            return Err(FormError::MissingContainerSlot);
        }
        let body = self.render_fragments(fields, language, ids)?.concat();
        Ok(self.config.container.replace(CONTAINER_SLOT, &body))
    }

    /// Render each descriptor to its own fragment, in input order
    pub fn render_fragments(
        &self,
        fields: &[FieldDescriptor],
        language: &str,
        ids: &mut dyn IdGenerator,
    ) -> Result<Vec<String>> {
        let mut fragments = Vec::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            fragments.push(self.render_field(index, field, language, ids)?);
        }
        Ok(fragments)
    }

    /// Render the descriptor at `index` to a single fragment
    pub fn render_field(
        &self,
        index: usize,
        field: &FieldDescriptor,
        language: &str,
        ids: &mut dyn IdGenerator,
    ) -> Result<String> {
        field.validate(index)?;

        let cx = FieldContext {
            index,
            field,
            localizer: Localizer::new(language, self.config.missing_translation),
        };

        let html = match field.kind {
            FieldKind::Input => self.render_input(&cx, ids)?,
            FieldKind::Checkbox => self.render_checkbox(&cx, ids)?,
            FieldKind::Radio => self.render_radio(&cx, ids)?,
            FieldKind::Select => self.render_select(&cx, ids)?,
            FieldKind::Text => self.render_text(&cx, ids),
            FieldKind::ButtonSubmit => self.render_button(&cx)?,
            FieldKind::ColumnReset => self.render_column_reset(),
            FieldKind::Unknown => {
                tracing::warn!(
                    index,
                    field = field.display_name(),
                    "Unknown field kind, rendering as input"
                );
                self.render_input(&cx, ids)?
            }
        };

        tracing::trace!(index, kind = %field.kind, "Rendered field");
        Ok(normalize_whitespace(&html))
    }

    fn render_input(&self, cx: &FieldContext<'_>, ids: &mut dyn IdGenerator) -> Result<String> {
        let db_field = cx.db_field()?;
        let id = format!("input-{}-{db_field}", ids.next_id());
        let mut html = String::with_capacity(256);

        self.open_group(&mut html, cx.field);
        if let Some(title) = cx.title()? {
            Self::write_label(&mut html, Some(&id), None, title);
        }

        html.push_str("<input");
        Self::write_attr(&mut html, "id", &id);
        Self::write_attr(&mut html, "name", db_field);
        Self::write_attr(&mut html, "type", cx.field.effective_subtype());
        if let Some(placeholder) = cx.placeholder()? {
            Self::write_attr(&mut html, "placeholder", placeholder);
        }
        if let Some(tooltip) = cx.tooltip()? {
            Self::write_attr(&mut html, "title", tooltip);
        }
        if let Some(ref value) = cx.field.value {
            Self::write_attr(&mut html, "value", &value_text(value));
        }
        Self::write_attr(&mut html, "class", &self.config.styles.form_control);
        if cx.field.required {
            html.push_str(" required");
        }
        html.push_str("></div>");
        Ok(html)
    }

    fn render_checkbox(&self, cx: &FieldContext<'_>, ids: &mut dyn IdGenerator) -> Result<String> {
        let styles = &self.config.styles;
        let db_field = cx.db_field()?;
        let id = format!("input-{}-{db_field}", ids.next_id());
        let mut html = String::with_capacity(256);

        self.open_group(&mut html, cx.field);
        let _ = write!(html, r#"<div class="{}">"#, Self::escape_attr(&styles.form_check));

        html.push_str("<input");
        Self::write_attr(&mut html, "id", &id);
        Self::write_attr(&mut html, "name", db_field);
        Self::write_attr(&mut html, "type", "checkbox");
        Self::write_attr(&mut html, "value", "1");
        Self::write_attr(&mut html, "class", &styles.form_check_input);
        if let Some(tooltip) = cx.tooltip()? {
            Self::write_attr(&mut html, "title", tooltip);
        }
        if cx.field.value.as_ref().is_some_and(is_truthy) {
            html.push_str(" checked");
        }
        if cx.field.required {
            html.push_str(" required");
        }
        html.push('>');

        // Checkbox label comes after input
        if let Some(title) = cx.title()? {
            Self::write_label(&mut html, Some(&id), Some(&styles.form_check_label), title);
        }
        html.push_str("</div></div>");
        Ok(html)
    }

    fn render_radio(&self, cx: &FieldContext<'_>, ids: &mut dyn IdGenerator) -> Result<String> {
        let styles = &self.config.styles;
        let db_field = cx.db_field()?;
        let id = format!("input-{}-{db_field}", ids.next_id());
        let mut html = String::with_capacity(512);

        self.open_group(&mut html, cx.field);
        if let Some(title) = cx.title()? {
            Self::write_label(&mut html, None, None, title);
        }

        for (i, (key, label)) in cx.field.options.iter().enumerate() {
            let option_id = format!("{id}-{}", i + 1);
            let _ = write!(html, r#"<div class="{}">"#, Self::escape_attr(&styles.form_check));
            html.push_str("<input");
            Self::write_attr(&mut html, "id", &option_id);
            Self::write_attr(&mut html, "name", db_field);
            Self::write_attr(&mut html, "type", "radio");
            Self::write_attr(&mut html, "value", key);
            Self::write_attr(&mut html, "class", &styles.form_check_input);
            if cx.field.value.as_ref().is_some_and(|value| loosely_equals(key, value)) {
                html.push_str(" checked");
            }
            if cx.field.required && i == 0 {
                html.push_str(" required");
            }
            html.push('>');
            Self::write_label(
                &mut html,
                Some(&option_id),
                Some(&styles.form_check_label),
                cx.localizer.option_label(key, label),
            );
            html.push_str("</div>");
        }

        html.push_str("</div>");
        Ok(html)
    }

    fn render_select(&self, cx: &FieldContext<'_>, ids: &mut dyn IdGenerator) -> Result<String> {
        let db_field = cx.db_field()?;
        let id = format!("input-{}-{db_field}", ids.next_id());
        let mut html = String::with_capacity(512);

        self.open_group(&mut html, cx.field);
        if let Some(title) = cx.title()? {
            Self::write_label(&mut html, Some(&id), None, title);
        }

        html.push_str("<select");
        Self::write_attr(&mut html, "id", &id);
        Self::write_attr(&mut html, "name", db_field);
        Self::write_attr(&mut html, "class", &self.config.styles.form_control);
        if let Some(placeholder) = cx.select_placeholder() {
            Self::write_attr(&mut html, "placeholder", placeholder);
        }
        if let Some(tooltip) = cx.tooltip()? {
            Self::write_attr(&mut html, "title", tooltip);
        }
        if cx.field.required {
            html.push_str(" required");
        }
        html.push('>');

        for (key, label) in &cx.field.options {
            html.push_str("<option");
            Self::write_attr(&mut html, "value", key);
            if cx.field.value.as_ref().is_some_and(|value| loosely_equals(key, value)) {
                html.push_str(" selected");
            }
            html.push('>');
            html.push_str(&Self::escape_html(cx.localizer.option_label(key, label)));
            html.push_str("</option>");
        }

        html.push_str("</select></div>");
        Ok(html)
    }

    fn render_text(&self, cx: &FieldContext<'_>, ids: &mut dyn IdGenerator) -> String {
        let source = cx.field.value.as_ref().map(value_text).unwrap_or_default();
        let mut html = String::with_capacity(source.len() + 64);

        let _ = write!(
            html,
            r#"<div id="text-{}" class="{}">"#,
            Self::escape_attr(&ids.next_id()),
            Self::escape_attr(&self.group_class(cx.field))
        );
        html.push_str(&self.sanitizer.sanitize(&source));
        html.push_str("</div>");
        html
    }

    fn render_button(&self, cx: &FieldContext<'_>) -> Result<String> {
        let label = cx.title()?.unwrap_or_default();
        let mut html = String::with_capacity(128);

        let _ = write!(
            html,
            r#"<div class="{}">"#,
            Self::escape_attr(&self.column_class(cx.field.effective_size()))
        );
        html.push_str(r#"<button type="submit""#);
        Self::write_attr(&mut html, "class", &self.config.styles.button);
        html.push('>');
        html.push_str(&Self::escape_html(label));
        html.push_str("</button></div>");
        Ok(html)
    }

    fn render_column_reset(&self) -> String {
        format!(
            r#"<div class="{}"></div>"#,
            Self::escape_attr(&self.column_class(super::field::DEFAULT_SIZE))
        )
    }

    fn open_group(&self, html: &mut String, field: &FieldDescriptor) {
        html.push_str("<div");
        Self::write_attr(html, "class", &self.group_class(field));
        html.push('>');
    }

    fn group_class(&self, field: &FieldDescriptor) -> String {
        format!(
            "{} {}",
            self.config.styles.form_group,
            self.column_class(field.effective_size())
        )
    }

    fn column_class(&self, size: u8) -> String {
        format!("{}-{size}", self.config.styles.col)
    }

    fn write_label(html: &mut String, for_id: Option<&str>, class: Option<&str>, text: &str) {
        html.push_str("<label");
        if let Some(class) = class {
            Self::write_attr(html, "class", class);
        }
        if let Some(for_id) = for_id {
            Self::write_attr(html, "for", for_id);
        }
        html.push('>');
        html.push_str(&Self::escape_html(text));
        html.push_str("</label>");
    }

    fn write_attr(html: &mut String, name: &str, value: &str) {
        html.push(' ');
        html.push_str(name);
        html.push_str("=\"");
        html.push_str(&Self::escape_attr(value));
        html.push('"');
    }

    /// Escape a string for use in HTML attribute values
    fn escape_attr(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('"', "&quot;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    /// Escape a string for use in HTML content
    fn escape_html(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }
}

/// Collapse whitespace runs to one space and trim the ends
#[must_use]
pub fn normalize_whitespace(html: &str) -> String {
    WHITESPACE.replace_all(html.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::forms::{LocalizedText, MissingTranslationPolicy, SequentialIds};
    use serde_json::json;

    fn en(text: &str) -> LocalizedText {
        LocalizedText::new().with("en", text)
    }

    fn render_one(field: &FieldDescriptor) -> String {
        FormRenderer::default()
            .render_field(0, field, "en", &mut SequentialIds::default())
            .unwrap()
    }

    #[test]
    fn test_render_input_field() {
        let field = FieldDescriptor::input("email", "email")
            .title(en("Email"))
            .required();

        assert_eq!(
            render_one(&field),
            concat!(
                r#"<div class="form-group col-12">"#,
                r#"<label for="input-1000-email">Email</label>"#,
                r#"<input id="input-1000-email" name="email" type="email" class="form-control" required>"#,
                "</div>"
            )
        );
    }

    #[test]
    fn test_render_input_optional_attributes() {
        let field = FieldDescriptor::input("zip", "text")
            .title(en("Zip"))
            .placeholder(en("1000"))
            .tooltip(en("Postal code"))
            .value("9000")
            .size(4);
        let html = render_one(&field);

        assert!(html.contains(r#"class="form-group col-4""#));
        assert!(html.contains(r#"placeholder="1000""#));
        assert!(html.contains(r#"title="Postal code""#));
        assert!(html.contains(r#"value="9000""#));
        assert!(!html.contains("required"));
    }

    #[test]
    fn test_non_title_description_ignored() {
        let mut field = FieldDescriptor::input("zip", "text");
        field.description = Some(crate::forms::Description {
            kind: "help".to_string(),
            value: en("Shown elsewhere"),
        });
        assert!(!render_one(&field).contains("title="));
    }

    #[test]
    fn test_render_checkbox() {
        let checked = FieldDescriptor::checkbox("terms")
            .title(en("I agree"))
            .value(true);
        let unchecked = FieldDescriptor::checkbox("terms")
            .title(en("I agree"))
            .value(false);

        let html = render_one(&checked);
        assert!(html.contains(r#"type="checkbox""#));
        assert!(html.contains(" checked"));
        assert!(html.contains(r#"<label class="form-check-label" for="input-1000-terms">I agree</label>"#));
        assert!(!render_one(&unchecked).contains("checked"));
    }

    #[test]
    fn test_render_radio_ids_and_labels() {
        let field = FieldDescriptor::radio("color")
            .title(en("Color"))
            .option("r", "Red")
            .option("g", LocalizedText::new().with("en", "Green"))
            .option("b", LocalizedText::new().with("nl", "Blauw"))
            .value("g")
            .required();
        let html = render_one(&field);

        assert!(html.contains(r#"id="input-1000-color-1""#));
        assert!(html.contains(r#"id="input-1000-color-2""#));
        assert!(html.contains(r#"id="input-1000-color-3""#));
        assert!(html.contains(">Red</label>"));
        assert!(html.contains(">Green</label>"));
        assert!(html.contains(">b</label>"));
        assert!(html.contains(r#"value="g" class="form-check-input" checked>"#));
        assert_eq!(html.matches(" required").count(), 1);
    }

    #[test]
    fn test_render_select_selected() {
        let field = FieldDescriptor::select("letter")
            .option("a", "Alpha")
            .option("b", "Beta")
            .value("b");
        let html = render_one(&field);

        assert!(html.contains(r#"<option value="a">Alpha</option>"#));
        assert!(html.contains(r#"<option value="b" selected>Beta</option>"#));
        assert!(html.find("Alpha") < html.find("Beta"));
    }

    #[test]
    fn test_render_select_numeric_value() {
        let field = FieldDescriptor::select("count")
            .option("1", "One")
            .option("2", "Two")
            .value(2);
        assert!(render_one(&field).contains(r#"<option value="2" selected>Two</option>"#));
    }

    #[test]
    fn test_select_placeholder_only_when_translated() {
        let with = FieldDescriptor::select("s").placeholder(en("Pick one"));
        let without = FieldDescriptor::select("s");
        assert!(render_one(&with).contains(r#"placeholder="Pick one""#));
        assert!(!render_one(&without).contains("placeholder"));
    }

    #[test]
    fn test_select_placeholder_omitted_for_other_language() {
        let field = FieldDescriptor::select("s")
            .option("a", "A")
            .placeholder(LocalizedText::new().with("nl", "Kies"));
        let html = render_one(&field);
        assert!(html.starts_with(r#"<div class="form-group col-12">"#));
        assert!(!html.contains("placeholder"));
    }

    #[test]
    fn test_container_without_slot_rejected() {
        let mut config = FormConfig::default();
        config.container = "<div></div>".to_string();
        let renderer = FormRenderer::new(config);

        assert!(matches!(
            renderer.render(&[FieldDescriptor::column_reset()]),
            Err(FormError::MissingContainerSlot)
        ));
    }

    #[test]
    fn test_render_text_sanitized() {
        let field = FieldDescriptor::text("<script>x</script><p>ok</p>");
        assert_eq!(
            render_one(&field),
            r#"<div id="text-1000" class="form-group col-12"><p>ok</p></div>"#
        );
    }

    #[test]
    fn test_render_button_and_reset() {
        let button = FieldDescriptor::button_submit(en("Send"));
        assert_eq!(
            render_one(&button),
            r#"<div class="col-12"><button type="submit" class="btn btn-primary">Send</button></div>"#
        );
        assert_eq!(
            render_one(&FieldDescriptor::column_reset()),
            r#"<div class="col-12"></div>"#
        );
    }

    #[test]
    fn test_unknown_kind_renders_as_input() {
        let field: FieldDescriptor =
            serde_json::from_value(json!({ "type": "slider", "dbField": "level", "subtype": "range" }))
                .unwrap();
        let html = render_one(&field);
        assert!(html.contains(r#"<input id="input-1000-level" name="level" type="range""#));
    }

    #[test]
    fn test_missing_db_field_fails() {
        let field = FieldDescriptor::new(FieldKind::Select);
        let error = FormRenderer::default()
            .render(&[FieldDescriptor::column_reset(), field])
            .unwrap_err();
        assert!(matches!(
            error,
            FormError::InvalidDescriptor { index: 1, .. }
        ));
    }

    #[test]
    fn test_missing_translation_policies() {
        let fields = [FieldDescriptor::input("name", "text").title(en("Name"))];

        let strict = FormRenderer::default();
        assert!(matches!(
            strict.render_in(&fields, "de"),
            Err(FormError::MissingTranslation { index: 0, .. })
        ));

        let lenient = FormRenderer::new(
            FormConfig::default().with_missing_translation(MissingTranslationPolicy::Empty),
        );
        let html = lenient.render_in(&fields, "de").unwrap();
        assert!(html.contains("></label>"));
    }

    #[test]
    fn test_attribute_escaping() {
        let field = FieldDescriptor::input("q", "search")
            .title(en("<b>Search</b>"))
            .value(r#"say "hi""#);
        let html = render_one(&field);
        assert!(html.contains("&lt;b&gt;Search&lt;/b&gt;"));
        assert!(html.contains(r#"value="say &quot;hi&quot;""#));
    }

    #[test]
    fn test_custom_styles() {
        let mut config = FormConfig::default();
        config.styles.form_group = "mb-3".to_string();
        config.styles.col = "col-md".to_string();
        let renderer = FormRenderer::new(config);

        let html = renderer
            .render_with_ids(
                &[FieldDescriptor::input("a", "text").size(6)],
                "en",
                &mut SequentialIds::default(),
            )
            .unwrap();
        assert!(html.contains(r#"class="mb-3 col-md-6""#));
    }

    #[test]
    fn test_container_wraps_fragments() {
        let html = FormRenderer::default()
            .render(&[FieldDescriptor::column_reset()])
            .unwrap();
        assert_eq!(html, r#"<div class="row"><div class="col-12"></div></div>"#);
    }

    #[test]
    fn test_input_not_mutated() {
        let fields = vec![FieldDescriptor::input("a", "text")];
        let before = fields.clone();
        FormRenderer::default().render(&fields).unwrap();
        assert_eq!(fields, before);
        assert_eq!(fields[0].size, None);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  <div>\n\t  a   b </div> "), "<div> a b </div>");
    }

    #[test]
    fn test_renderer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FormRenderer>();
    }
}
