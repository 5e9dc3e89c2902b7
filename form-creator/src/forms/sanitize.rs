//! Allow-list sanitization for free-text HTML blocks
//!
//! Tags outside the allow list are removed and their text content kept.
//! `script` and `style` elements are dropped together with their content.
//!
//! Attributes on allowed tags are not filtered. Event handlers, inline styles
//! and `javascript:` links survive, so this is not a security boundary: callers
//! must not feed untrusted markup where that matters.

use std::collections::HashSet;
use std::fmt;

/// Tags kept by [`Sanitizer::default`]
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "p", "span", "a", "b", "i", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6", "strong",
    "em", "italic", "code", "pre", "mark", "small", "del", "ins", "sub", "sup", "q", "blockquote",
    "abbr", "address", "cite", "bdo", "br",
];

/// Elements removed together with everything inside them
const CONTENT_STRIPPED_TAGS: &[&str] = &["script", "style"];

/// Every attribute name starts with the empty prefix
const ANY_ATTRIBUTE: &str = "";

/// URL schemes kept in `href`/`src` values; ammonia always checks these
const URL_SCHEMES: &[&str] = &[
    "about", "bitcoin", "blob", "data", "file", "ftp", "ftps", "geo", "http", "https", "im",
    "irc", "ircs", "javascript", "magnet", "mailto", "mms", "mx", "news", "nntp", "openpgp4fpr",
    "sip", "sms", "smsto", "ssh", "tel", "url", "vbscript", "webcal", "wtai", "xmpp",
];

/// Restricts HTML to an explicit tag allow list
///
/// Allowed tags keep all of their attributes, so the output is not safe
/// against attribute-level injection.
#[derive(Clone, PartialEq, Eq)]
pub struct Sanitizer {
    allowed_tags: Vec<String>,
}

impl Sanitizer {
    /// Create a sanitizer with a custom allow list
    pub fn new<I, S>(allowed_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_tags: allowed_tags
                .into_iter()
                .map(|tag| tag.into().trim().to_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    /// Tags this sanitizer keeps
    #[must_use]
    pub fn allowed_tags(&self) -> &[String] {
        &self.allowed_tags
    }

    /// Strip every tag outside the allow list, keeping text content
    #[must_use]
    pub fn sanitize(&self, html: &str) -> String {
        let tags: HashSet<&str> = self
            .allowed_tags
            .iter()
            .map(String::as_str)
            .filter(|tag| !CONTENT_STRIPPED_TAGS.contains(tag))
            .collect();

        ammonia::Builder::default()
            .tags(tags)
            .clean_content_tags(CONTENT_STRIPPED_TAGS.iter().copied().collect())
            .generic_attribute_prefixes(HashSet::from([ANY_ATTRIBUTE]))
            .url_schemes(URL_SCHEMES.iter().copied().collect())
            .link_rel(None)
            .clean(html)
            .to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_TAGS.iter().copied())
    }
}

impl fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sanitizer")
            .field("allowed_tags", &self.allowed_tags.len())
            .finish()
    }
}
