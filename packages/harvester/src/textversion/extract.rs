//! Plain-text rendering of text-version documents.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use roxmltree::{Document, Node, ParsingOptions};

use crate::config::{TEXT_BODY_TAGS, TEXT_SECTION_TAGS};
use crate::error::Result;
use crate::xml::has_tag;

/// An ampersand plus whatever entity reference follows it, if any.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static AMPERSAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+;|#x[0-9a-fA-F]+;|[A-Za-z][A-Za-z0-9]*;)?").expect("valid regex")
});

const PREDEFINED_ENTITIES: [&str; 5] = ["amp;", "lt;", "gt;", "quot;", "apos;"];

/// Named entities declared by the bill DTDs that show up in scraped text,
/// with their code points.
const NAMED_ENTITIES: [(&str, u32); 23] = [
    ("nbsp;", 160),
    ("cent;", 162),
    ("pound;", 163),
    ("sect;", 167),
    ("deg;", 176),
    ("para;", 182),
    ("frac14;", 188),
    ("frac12;", 189),
    ("frac34;", 190),
    ("times;", 215),
    ("eacute;", 233),
    ("ntilde;", 241),
    ("ensp;", 8194),
    ("emsp;", 8195),
    ("thinsp;", 8201),
    ("ndash;", 8211),
    ("mdash;", 8212),
    ("lsquo;", 8216),
    ("rsquo;", 8217),
    ("ldquo;", 8220),
    ("rdquo;", 8221),
    ("bull;", 8226),
    ("hellip;", 8230),
];

fn named_entity(name: &str) -> Option<u32> {
    NAMED_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, code)| *code)
}

/// Escape ampersands that do not start a predefined or numeric entity.
///
/// Upstream bill text sometimes carries a literal `&` (e.g. "Research & Development")
/// that would otherwise make the document unparseable. Common DTD entities
/// such as `&mdash;` become numeric references; any other name is kept as
/// literal text (`&foo;` reads "&foo;").
///
/// # Examples
/// ```
/// use congress_harvester::textversion::escape_bare_ampersands;
///
/// assert_eq!(escape_bare_ampersands("R & D"), "R &amp; D");
/// assert_eq!(escape_bare_ampersands("R &amp; D &#8212;"), "R &amp; D &#8212;");
/// assert_eq!(escape_bare_ampersands("2015&mdash;2016"), "2015&#8212;2016");
/// ```
pub fn escape_bare_ampersands(xml: &str) -> Cow<'_, str> {
    AMPERSAND.replace_all(xml, |caps: &Captures<'_>| match caps.get(1) {
        Some(entity)
            if entity.as_str().starts_with('#')
                || PREDEFINED_ENTITIES.contains(&entity.as_str()) =>
        {
            caps[0].to_string()
        }
        Some(entity) => match named_entity(entity.as_str()) {
            Some(code) => format!("&#{code};"),
            None => format!("&amp;{}", entity.as_str()),
        },
        None => "&amp;".to_string(),
    })
}

/// Parse a text-version document, tolerating its DOCTYPE declaration.
pub(crate) fn with_document<T>(xml: &str, f: impl FnOnce(&Document<'_>) -> T) -> Result<T> {
    let xml = escape_bare_ampersands(xml.trim());
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(&xml, options)?;
    Ok(f(&doc))
}

/// All text nodes under `node`, joined with single spaces.
pub(crate) fn joined_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse every run of whitespace to one space and trim the ends.
pub(crate) fn singularize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_descendant<'a, 'input>(doc: &'a Document<'input>, tag: &str) -> Option<Node<'a, 'input>> {
    doc.descendants().find(|n| has_tag(*n, tag))
}

/// Whole-document plain text: markup stripped, text nodes joined by a
/// space, ends trimmed. This is the canonical rendering used by the join.
pub fn extract_text(xml: &str) -> Result<String> {
    with_document(xml, |doc| joined_text(doc.root()).trim().to_string())
}

/// Text of the first `<legis-body>` or `<resolution-body>`, if the document has one.
pub fn extract_body_text(xml: &str) -> Result<Option<String>> {
    with_document(xml, |doc| {
        TEXT_BODY_TAGS
            .iter()
            .find_map(|tag| first_descendant(doc, tag))
            .map(|body| joined_text(body).trim().to_string())
    })
}

/// Known document sections in a fixed order, each with whitespace
/// singularized, separated by blank lines. Absent sections are skipped.
pub fn extract_sectioned_text(xml: &str) -> Result<String> {
    with_document(xml, |doc| {
        TEXT_SECTION_TAGS
            .iter()
            .filter_map(|tag| first_descendant(doc, tag))
            .map(|section| singularize_whitespace(&joined_text(section)))
            .collect::<Vec<_>>()
            .join("\n\n")
    })
}
