//! Sponsors and cosponsors.

use chrono::NaiveDate;
use roxmltree::Node;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fields::{optional_text, required_bool, required_date, required_text};
use crate::error::Result;
use crate::xml::{child_tags, expect_tag, find_child, items, node_path};

/// Cross-system member identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifiers {
    pub bioguide_id: String,
    pub lis_id: Option<String>,
    pub gpo_id: Option<String>,
}

impl Identifiers {
    /// Parse an optional `<identifiers>` element.
    pub fn from_node(node: Option<Node<'_, '_>>) -> Result<Option<Self>> {
        let Some(node) = node else {
            return Ok(None);
        };
        expect_tag(node, "identifiers");
        Ok(Some(Self {
            bioguide_id: required_text(node, "bioguideId")?,
            lis_id: optional_text(node, "lisID"),
            gpo_id: optional_text(node, "gpoId"),
        }))
    }
}

/// Sponsor of a bill or amendment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsor {
    pub bioguide_id: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub party: String,
    pub state: String,
    pub identifiers: Option<Identifiers>,
    pub middle_name: Option<String>,
    pub district: Option<String>,
    pub is_by_request: Option<String>,
}

impl Sponsor {
    /// Parse a `<sponsors>` container.
    ///
    /// Items carrying nothing but a `<name>` are skipped: some amendments are
    /// sponsored by a body such as "Rules Committee", which has no member
    /// identifiers.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "sponsors", "item")
            .filter(|item| {
                let name_only = child_tags(*item) == ["name"];
                if name_only {
                    debug!(path = %node_path(*item), "skipping name-only sponsor");
                }
                !name_only
            })
            .map(|item| {
                Ok(Self {
                    bioguide_id: required_text(item, "bioguideId")?,
                    full_name: required_text(item, "fullName")?,
                    first_name: required_text(item, "firstName")?,
                    last_name: required_text(item, "lastName")?,
                    party: required_text(item, "party")?,
                    state: required_text(item, "state")?,
                    identifiers: Identifiers::from_node(find_child(item, "identifiers"))?,
                    middle_name: optional_text(item, "middleName"),
                    district: optional_text(item, "district"),
                    is_by_request: optional_text(item, "isByRequest"),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosponsor {
    pub bioguide_id: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub party: String,
    pub state: String,
    pub middle_name: Option<String>,
    pub district: Option<String>,
    pub sponsorship_date: NaiveDate,
    pub is_original_cosponsor: bool,
}

impl Cosponsor {
    /// Parse a `<cosponsors>` container.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "cosponsors", "item")
            .map(|item| {
                Ok(Self {
                    bioguide_id: required_text(item, "bioguideId")?,
                    full_name: required_text(item, "fullName")?,
                    first_name: required_text(item, "firstName")?,
                    last_name: required_text(item, "lastName")?,
                    party: required_text(item, "party")?,
                    state: required_text(item, "state")?,
                    middle_name: optional_text(item, "middleName"),
                    district: optional_text(item, "district"),
                    sponsorship_date: required_date(item, "sponsorshipDate")?,
                    is_original_cosponsor: required_bool(item, "isOriginalCosponsor")?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const SPONSORS: &str = r#"<sponsors>
      <item>
        <name>Rules Committee</name>
      </item>
      <item>
        <bioguideId>H000338</bioguideId>
        <fullName>Sen. Hatch, Orrin G. [R-UT]</fullName>
        <firstName>ORRIN</firstName>
        <lastName>HATCH</lastName>
        <party>R</party>
        <state>UT</state>
        <identifiers>
          <lisID>1356</lisID>
          <bioguideId>H000338</bioguideId>
          <gpoId>8255</gpoId>
        </identifiers>
        <middleName>G.</middleName>
        <isByRequest>N</isByRequest>
      </item>
    </sponsors>"#;

    #[test]
    fn test_sponsor_skips_name_only_item() {
        let doc = Document::parse(SPONSORS).unwrap();
        let sponsors = Sponsor::list_from_node(Some(doc.root_element())).unwrap();

        assert_eq!(sponsors.len(), 1);
        let sponsor = &sponsors[0];
        assert_eq!(sponsor.bioguide_id, "H000338");
        assert_eq!(sponsor.middle_name.as_deref(), Some("G."));
        assert_eq!(sponsor.district, None);
        assert_eq!(sponsor.is_by_request.as_deref(), Some("N"));
        assert_eq!(
            sponsor.identifiers,
            Some(Identifiers {
                bioguide_id: "H000338".to_string(),
                lis_id: Some("1356".to_string()),
                gpo_id: Some("8255".to_string()),
            })
        );
    }

    #[test]
    fn test_sponsor_name_plus_other_fields_is_not_skipped() {
        // Only a bare <name> is skipped; a name with other children must parse (and fail here).
        let xml = r#"<sponsors><item><name>Someone</name><party>D</party></item></sponsors>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(Sponsor::list_from_node(Some(doc.root_element())).is_err());
    }

    #[test]
    fn test_cosponsors() {
        let xml = r#"<cosponsors>
          <item>
            <bioguideId>W000805</bioguideId>
            <fullName>Sen. Warner, Mark R. [D-VA]</fullName>
            <firstName>Mark</firstName>
            <lastName>Warner</lastName>
            <party>D</party>
            <state>VA</state>
            <middleName>R.</middleName>
            <sponsorshipDate>2015-01-07</sponsorshipDate>
            <isOriginalCosponsor>True</isOriginalCosponsor>
          </item>
          <item>
            <bioguideId>K000383</bioguideId>
            <fullName>Sen. King, Angus S., Jr. [I-ME]</fullName>
            <firstName>Angus</firstName>
            <lastName>King</lastName>
            <party>I</party>
            <state>ME</state>
            <sponsorshipDate>2015-03-02</sponsorshipDate>
            <isOriginalCosponsor>False</isOriginalCosponsor>
          </item>
        </cosponsors>"#;
        let doc = Document::parse(xml).unwrap();
        let cosponsors = Cosponsor::list_from_node(Some(doc.root_element())).unwrap();

        assert_eq!(cosponsors.len(), 2);
        assert!(cosponsors[0].is_original_cosponsor);
        assert!(!cosponsors[1].is_original_cosponsor);
        assert_eq!(cosponsors[1].sponsorship_date.to_string(), "2015-03-02");
        assert_eq!(cosponsors[1].middle_name, None);
    }
}
