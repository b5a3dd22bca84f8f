//! Self-describing metadata of DTD-flavor text-version documents.
//!
//! Bill and resolution texts open with root attributes, a
//! `<metadata><dublinCore>` block and a `<form>` cover page. Every field is
//! best-effort: older documents omit many of them and USLM documents use a
//! different layout altogether.

use chrono::NaiveDate;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::extract::{joined_text, singularize_whitespace};
use crate::config::DUBLIN_CORE_NS;
use crate::dates::parse_date;
use crate::xml::{find_by_path, find_child, find_child_ns, get_attribute, get_tag_name};

/// Attributes of the document root (`<bill>` or `<resolution>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAttributes {
    pub dms_id: Option<String>,
    pub key: Option<String>,
    pub public_private: Option<String>,
    /// `bill-stage` or `resolution-stage` (e.g., "Introduced-in-Senate").
    pub stage: Option<String>,
    /// `bill-type` or `resolution-type` (e.g., "olc", "house-concurrent").
    pub doc_type: Option<String>,
    pub stage_count: Option<u32>,
    pub star_print: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDublinCore {
    pub dc_title: Option<String>,
    pub dc_publisher: Option<String>,
    pub dc_date: Option<NaiveDate>,
    pub dc_format: Option<String>,
    pub dc_language: Option<String>,
    pub dc_rights: Option<String>,
}

/// Cover-page fields from `<form>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentForm {
    pub distribution_code: Option<String>,
    pub congress: Option<String>,
    pub session: Option<String>,
    pub legis_num: Option<String>,
    pub current_chamber: Option<String>,
    pub legis_type: Option<String>,
    pub official_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Root element name (e.g., "bill", "resolution", "amendment-doc").
    pub root_tag: String,
    pub attributes: DocumentAttributes,
    pub dublin_core: DocumentDublinCore,
    pub form: DocumentForm,
}

impl DocumentMetadata {
    /// Read metadata from a parsed text-version document.
    pub fn from_document(doc: &Document<'_>) -> Self {
        let root = doc.root_element();
        let root_tag = get_tag_name(root).to_string();

        Self {
            attributes: parse_attributes(root, &root_tag),
            dublin_core: parse_dublin_core(find_by_path(root, "metadata/dublinCore")),
            form: parse_form(find_child(root, "form")),
            root_tag,
        }
    }
}

fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    get_attribute(node, name).map(str::to_string)
}

fn parse_attributes(root: Node<'_, '_>, root_tag: &str) -> DocumentAttributes {
    let stage_count = get_attribute(root, "stage-count").and_then(|value| {
        let parsed = value.trim().parse().ok();
        if parsed.is_none() {
            debug!(value, "ignoring non-numeric stage-count");
        }
        parsed
    });

    DocumentAttributes {
        dms_id: attr(root, "dms-id"),
        key: attr(root, "key"),
        public_private: attr(root, "public-private"),
        stage: attr(root, &format!("{root_tag}-stage")),
        doc_type: attr(root, &format!("{root_tag}-type")),
        stage_count,
        star_print: attr(root, "star-print"),
    }
}

fn parse_dublin_core(node: Option<Node<'_, '_>>) -> DocumentDublinCore {
    let Some(node) = node else {
        return DocumentDublinCore::default();
    };
    let dc = |tag: &str| {
        find_child_ns(node, DUBLIN_CORE_NS, tag)
            .and_then(|n| n.text())
            .map(|text| text.trim().to_string())
    };

    DocumentDublinCore {
        dc_title: dc("title"),
        dc_publisher: dc("publisher"),
        dc_date: dc("date").and_then(|date| parse_date(&date)),
        dc_format: dc("format"),
        dc_language: dc("language"),
        dc_rights: dc("rights"),
    }
}

fn parse_form(node: Option<Node<'_, '_>>) -> DocumentForm {
    let Some(node) = node else {
        return DocumentForm::default();
    };
    // Form fields may hold inline markup, so take all nested text.
    let field = |tag: &str| {
        find_child(node, tag)
            .map(|n| singularize_whitespace(&joined_text(n)))
            .filter(|text| !text.is_empty())
    };

    DocumentForm {
        distribution_code: field("distribution-code"),
        congress: field("congress"),
        session: field("session"),
        legis_num: field("legis-num"),
        current_chamber: field("current-chamber"),
        legis_type: field("legis-type"),
        official_title: field("official-title"),
    }
}
