//! Bill-status (`fdsys_billstatus.xml`) parsing.
//!
//! A bill-status document has the shape
//!
//! ```text
//! <billStatus>
//!   <version>3.0.0</version>
//!   <bill> ... </bill>
//!   <dublinCore> ... </dublinCore>
//! </billStatus>
//! ```
//!
//! Each sub-structure of `<bill>` has its own record type and parser in a
//! submodule; [`BillStatus::from_xml_str`] assembles them.

mod actions;
mod amendments;
mod committees;
mod dublin_core;
mod fields;
mod notes;
mod people;
mod related;
mod text_versions;
mod titles;

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::error::{HarvesterError, Result};
use crate::xml::{element_children, expect_tag, find_child, get_tag_name, has_tag, text_or_none};
use fields::{
    coerce_u32, missing, optional_datetime, optional_text, required_date, required_datetime,
    required_text, required_u32,
};

pub use actions::{Action, SourceSystem};
pub use amendments::{AmendedBill, Amendment, AmendmentAction, RecordedVote};
pub use committees::{Activity, Committee, CommitteeReport, Subcommittee};
pub use dublin_core::DublinCore;
pub use notes::{CboCostEstimate, Law, Link, Note};
pub use people::{Cosponsor, Identifiers, Sponsor};
pub use related::{RelatedBill, RelationshipDetail};
pub use text_versions::TextVersionRef;
pub use titles::{parse_policy_area, parse_subjects, Summary, Title};

/// Canonical per-bill record parsed from one bill-status document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillStatus {
    /// Schema version from the top-level `<version>` element (absent in older congresses).
    pub version: Option<String>,
    pub number: u32,
    pub update_date: DateTime<Utc>,
    pub update_date_including_text: Option<DateTime<Utc>>,
    pub origin_chamber: String,
    pub origin_chamber_code: Option<String>,
    /// Bill type as written in the document (e.g., "HR", "S", "hconres").
    #[serde(rename = "type")]
    pub bill_type: String,
    pub introduced_date: NaiveDate,
    pub congress: u32,
    pub committees: Vec<Committee>,
    pub committee_reports: Vec<CommitteeReport>,
    pub related_bills: Vec<RelatedBill>,
    pub actions: Vec<Action>,
    pub sponsors: Vec<Sponsor>,
    pub cosponsors: Vec<Cosponsor>,
    pub laws: Vec<Law>,
    pub notes: Vec<Note>,
    pub cbo_cost_estimates: Vec<CboCostEstimate>,
    pub policy_area: Option<String>,
    pub subjects: Vec<String>,
    pub summaries: Vec<Summary>,
    pub title: String,
    pub titles: Vec<Title>,
    pub amendments: Vec<Amendment>,
    pub text_versions: Vec<TextVersionRef>,
    pub latest_action: Action,
    pub dublin_core: DublinCore,
}

impl BillStatus {
    /// Parse the raw XML text of one bill-status document.
    ///
    /// Fails on malformed XML, on missing required elements, on disagreeing
    /// `<number>`/`<billNumber>` or `<type>`/`<billType>` tags and on
    /// text versions with more than one distinct URL.
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)?;
        Self::from_document(&doc)
    }

    /// Parse an already-parsed bill-status document.
    pub fn from_document(doc: &Document<'_>) -> Result<Self> {
        let root = doc.root_element();
        if !has_tag(root, "billStatus") {
            return Err(HarvesterError::MissingElement {
                element: "billStatus".to_string(),
                context: format!("document root <{}>", get_tag_name(root)),
            });
        }

        let bill = find_child(root, "bill").ok_or_else(|| missing(root, "bill"))?;
        let latest_action =
            find_child(bill, "latestAction").ok_or_else(|| missing(bill, "latestAction"))?;
        let dublin_core =
            find_child(root, "dublinCore").ok_or_else(|| missing(root, "dublinCore"))?;

        Ok(Self {
            version: optional_text(root, "version"),
            number: get_number(bill)?,
            update_date: required_datetime(bill, "updateDate")?,
            update_date_including_text: optional_datetime(bill, "updateDateIncludingText")?,
            origin_chamber: required_text(bill, "originChamber")?,
            origin_chamber_code: optional_text(bill, "originChamberCode"),
            bill_type: get_type(bill)?,
            introduced_date: required_date(bill, "introducedDate")?,
            congress: required_u32(bill, "congress")?,
            committees: Committee::list_from_node(find_child(bill, "committees"))?,
            committee_reports: CommitteeReport::list_from_node(find_child(
                bill,
                "committeeReports",
            ))?,
            related_bills: RelatedBill::list_from_node(find_child(bill, "relatedBills"))?,
            actions: Action::list_from_node(find_child(bill, "actions"))?,
            sponsors: Sponsor::list_from_node(find_child(bill, "sponsors"))?,
            cosponsors: Cosponsor::list_from_node(find_child(bill, "cosponsors"))?,
            laws: Law::list_from_node(find_child(bill, "laws"))?,
            notes: Note::list_from_node(find_child(bill, "notes"))?,
            cbo_cost_estimates: CboCostEstimate::list_from_node(find_child(
                bill,
                "cboCostEstimates",
            ))?,
            policy_area: parse_policy_area(find_child(bill, "policyArea")),
            subjects: parse_subjects(find_child(bill, "subjects")),
            summaries: Summary::list_from_node(find_child(bill, "summaries"))?,
            title: required_text(bill, "title")?,
            titles: Title::list_from_node(find_child(bill, "titles"))?,
            amendments: Amendment::list_from_node(find_child(bill, "amendments"))?,
            text_versions: TextVersionRef::list_from_node(find_child(bill, "textVersions"))?,
            latest_action: Action::from_node(latest_action)?,
            dublin_core: DublinCore::from_node(dublin_core)?,
        })
    }

    /// Identity key `{congress}-{type}-{number}`, with the type lowercased.
    ///
    /// Lowercasing makes the key agree with the one derived from the scrape
    /// path (`data/114/bills/hr/hr22/...`) whatever case the document uses.
    pub fn legis_id(&self) -> String {
        format!(
            "{}-{}-{}",
            self.congress,
            self.bill_type.to_lowercase(),
            self.number
        )
    }
}

/// Convenience wrapper around [`BillStatus::from_xml_str`].
pub fn parse_bill_status(xml: &str) -> Result<BillStatus> {
    BillStatus::from_xml_str(xml)
}

/// Resolve a value carried by a current tag and/or its legacy twin.
///
/// Exactly one of the two may be present, or both with identical text.
fn redundant_text(
    bill: Node<'_, '_>,
    field: &'static str,
    primary_tag: &str,
    legacy_tag: &str,
) -> Result<String> {
    let primary = find_child(bill, primary_tag);
    let legacy = find_child(bill, legacy_tag);

    match (primary, legacy) {
        (None, None) => Err(missing(bill, primary_tag)),
        (Some(node), None) | (None, Some(node)) => {
            text_or_none(Some(node))
                .map(str::to_string)
                .ok_or_else(|| missing(bill, get_tag_name(node)))
        }
        (Some(primary), Some(legacy)) => {
            let primary = text_or_none(Some(primary));
            let legacy = text_or_none(Some(legacy));
            match (primary, legacy) {
                (Some(p), Some(l)) if p == l => Ok(p.to_string()),
                _ => Err(HarvesterError::FieldMismatch {
                    field,
                    primary: primary.map(str::to_string),
                    legacy: legacy.map(str::to_string),
                }),
            }
        }
    }
}

/// Bill number from `<number>` or the legacy `<billNumber>`.
pub fn get_number(bill: Node<'_, '_>) -> Result<u32> {
    expect_tag(bill, "bill");
    let text = redundant_text(bill, "number", "number", "billNumber")?;
    coerce_u32(bill, "number", &text)
}

/// Bill type from `<type>` or the legacy `<billType>`.
pub fn get_type(bill: Node<'_, '_>) -> Result<String> {
    expect_tag(bill, "bill");
    redundant_text(bill, "type", "type", "billType")
}

/// Count the immediate child tags of `<bill>` across bill-status documents.
///
/// Useful for spotting elements that appear or disappear between congresses.
pub fn tag_counts<'a, I>(xmls: I) -> Result<BTreeMap<String, usize>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = BTreeMap::new();

    for xml in xmls {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();
        let bill = find_child(root, "bill").ok_or_else(|| missing(root, "bill"))?;
        for child in element_children(bill) {
            *counts.entry(get_tag_name(child).to_string()).or_insert(0) += 1;
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill_with(extra: &str) -> String {
        format!("<bill>{extra}</bill>")
    }

    fn number_of(xml: &str) -> Result<u32> {
        let doc = Document::parse(xml).unwrap();
        get_number(doc.root_element())
    }

    fn type_of(xml: &str) -> Result<String> {
        let doc = Document::parse(xml).unwrap();
        get_type(doc.root_element())
    }

    #[test]
    fn test_get_number_either_tag() {
        assert_eq!(number_of(&bill_with("<number>22</number>")).unwrap(), 22);
        assert_eq!(number_of(&bill_with("<billNumber>22</billNumber>")).unwrap(), 22);
        assert_eq!(
            number_of(&bill_with("<number>22</number><billNumber>22</billNumber>")).unwrap(),
            22
        );
    }

    #[test]
    fn test_get_number_mismatch() {
        let err = number_of(&bill_with("<number>22</number><billNumber>23</billNumber>"))
            .unwrap_err();
        assert!(matches!(err, HarvesterError::FieldMismatch { field: "number", .. }));
    }

    #[test]
    fn test_get_number_absent() {
        let err = number_of(&bill_with("<congress>114</congress>")).unwrap_err();
        assert!(matches!(err, HarvesterError::MissingElement { .. }));
    }

    #[test]
    fn test_get_number_not_numeric() {
        let err = number_of(&bill_with("<number>XXII</number>")).unwrap_err();
        assert!(matches!(err, HarvesterError::InvalidValue { .. }));
    }

    #[test]
    fn test_get_type() {
        assert_eq!(
            type_of(&bill_with("<type>hr</type><billType>hr</billType>")).unwrap(),
            "hr"
        );
        assert_eq!(type_of(&bill_with("<billType>S</billType>")).unwrap(), "S");

        let err = type_of(&bill_with("<type>hr</type><billType>s</billType>")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Conflicting values for type: Some(\"hr\") vs legacy Some(\"s\")"
        );
    }

    #[test]
    #[should_panic(expected = "expected <bill> element")]
    fn test_get_type_wrong_element_panics() {
        let _ = type_of("<billStatus><type>hr</type></billStatus>");
    }

    #[test]
    fn test_wrong_root_is_an_error() {
        let err = BillStatus::from_xml_str("<html><body>Service Unavailable</body></html>")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required XML element: billStatus in document root <html>"
        );
    }

    #[test]
    fn test_tag_counts() {
        let a = r#"<billStatus><bill><number>1</number><type>S</type><title>A</title></bill></billStatus>"#;
        let b = r#"<billStatus><bill><billNumber>2</billNumber><billType>S</billType><title>B</title></bill></billStatus>"#;
        let counts = tag_counts([a, b]).unwrap();

        assert_eq!(counts.get("title"), Some(&2));
        assert_eq!(counts.get("number"), Some(&1));
        assert_eq!(counts.get("billNumber"), Some(&1));
        assert_eq!(counts.get("congress"), None);
    }

    #[test]
    fn test_tag_counts_invalid_xml() {
        assert!(matches!(
            tag_counts(["<billStatus>"]),
            Err(HarvesterError::XmlParse(_))
        ));
    }
}
