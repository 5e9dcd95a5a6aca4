//! Property value extraction
//!
//! This module decides where the string value of a non-item property comes
//! from. The source is picked by tag name alone: a fixed table maps media
//! elements to `src`, links to `href`, and so on, with everything else
//! falling back to the element's text content.

use url::Url;

use crate::backend::DocumentNode;

/// Where the value of a property element is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// The `content` attribute (`meta`)
    Content,
    /// The `src` attribute, resolved against the base URL
    Src,
    /// The `href` attribute, resolved against the base URL
    Href,
    /// The `data` attribute (`object`), taken verbatim
    Data,
    /// The `value` attribute (`data`, `meter`)
    Value,
    /// The `datetime` attribute (`time`)
    Datetime,
    /// Concatenated text of all descendant text nodes
    Text,
}

impl ValueSource {
    /// The attribute this source reads, or `None` for text content
    pub fn attribute(self) -> Option<&'static str> {
        match self {
            ValueSource::Content => Some("content"),
            ValueSource::Src => Some("src"),
            ValueSource::Href => Some("href"),
            ValueSource::Data => Some("data"),
            ValueSource::Value => Some("value"),
            ValueSource::Datetime => Some("datetime"),
            ValueSource::Text => None,
        }
    }

    /// Whether values from this source are URLs to resolve
    pub fn is_url(self) -> bool {
        matches!(self, ValueSource::Src | ValueSource::Href)
    }
}

/// Get the value source for an element with the given (lower-case) tag name
pub fn value_source(tag: &str) -> ValueSource {
    match tag {
        "meta" => ValueSource::Content,
        "audio" | "embed" | "iframe" | "img" | "source" | "track" | "video" => ValueSource::Src,
        "a" | "area" | "link" => ValueSource::Href,
        "object" => ValueSource::Data,
        "data" | "meter" => ValueSource::Value,
        "time" => ValueSource::Datetime,
        _ => ValueSource::Text,
    }
}

/// Extract the string value of a property element
///
/// A missing attribute yields the empty string, as does a URL that cannot
/// be resolved against `base`. Text content is returned verbatim, without
/// trimming.
pub fn property_value<N: DocumentNode>(node: &N, base: &Url) -> String {
    let source = node.tag_name().map_or(ValueSource::Text, value_source);

    let Some(attribute) = source.attribute() else {
        return node.text_content();
    };

    match node.attr(attribute) {
        Some(value) if source.is_url() => resolve_url(base, value).unwrap_or_default(),
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

/// Resolve a possibly relative URL reference against a base URL
///
/// Returns `None` if the reference cannot be resolved; the failure is logged
/// and otherwise swallowed, as extraction never aborts on a bad URL.
///
/// ```
/// use url::Url;
/// use microdata::resolve_url;
///
/// let base = Url::parse("http://example.com/").unwrap();
/// assert_eq!(
///     resolve_url(&base, "test.png").as_deref(),
///     Some("http://example.com/test.png")
/// );
/// ```
pub fn resolve_url(base: &Url, reference: &str) -> Option<String> {
    match base.join(reference) {
        Ok(url) => Some(url.into()),
        Err(error) => {
            tracing::debug!(%base, reference, %error, "failed to resolve URL reference");
            None
        }
    }
}
