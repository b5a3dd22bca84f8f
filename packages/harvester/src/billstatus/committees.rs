//! Committee referrals, their activities and committee reports.

use chrono::{DateTime, Utc};
use roxmltree::Node;
use serde::{Deserialize, Serialize};

use super::fields::{optional_text, required_datetime, required_text};
use crate::error::Result;
use crate::xml::{find_child, items};

/// Something a committee or subcommittee did with the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Activity name (e.g., "Referred to", "Markup by").
    pub name: String,
    pub date: DateTime<Utc>,
}

impl Activity {
    /// Parse an `<activities>` container.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "activities", "item")
            .map(|item| {
                Ok(Self {
                    name: required_text(item, "name")?,
                    date: required_datetime(item, "date")?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcommittee {
    pub system_code: String,
    pub name: String,
    pub activities: Vec<Activity>,
}

impl Subcommittee {
    /// Parse a `<subcommittees>` container.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "subcommittees", "item")
            .map(|item| {
                Ok(Self {
                    system_code: required_text(item, "systemCode")?,
                    name: required_text(item, "name")?,
                    activities: Activity::list_from_node(find_child(item, "activities"))?,
                })
            })
            .collect()
    }
}

/// A committee the bill was referred to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
    /// Committee system code (e.g., "ssfi00").
    pub system_code: String,
    pub name: String,
    pub chamber: Option<String>,
    #[serde(rename = "type")]
    pub committee_type: Option<String>,
    pub subcommittees: Vec<Subcommittee>,
    pub activities: Vec<Activity>,
}

impl Committee {
    /// Parse a `<committees>` container.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "committees", "item")
            .map(|item| {
                Ok(Self {
                    system_code: required_text(item, "systemCode")?,
                    name: required_text(item, "name")?,
                    chamber: optional_text(item, "chamber"),
                    committee_type: optional_text(item, "type"),
                    subcommittees: Subcommittee::list_from_node(find_child(
                        item,
                        "subcommittees",
                    ))?,
                    activities: Activity::list_from_node(find_child(item, "activities"))?,
                })
            })
            .collect()
    }
}

/// Citation of a committee report (e.g., "H. Rept. 114-12").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeReport {
    pub citation: String,
}

impl CommitteeReport {
    /// Parse a `<committeeReports>` container.
    ///
    /// Entries are `<committeeReport>` elements rather than `<item>`.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "committeeReports", "committeeReport")
            .map(|item| {
                Ok(Self {
                    citation: required_text(item, "citation")?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    const COMMITTEES: &str = r#"<committees>
      <item>
        <systemCode>hsif00</systemCode>
        <name>Energy and Commerce Committee</name>
        <chamber>House</chamber>
        <type>Standing</type>
        <subcommittees>
          <item>
            <systemCode>hsif14</systemCode>
            <name>Health Subcommittee</name>
            <activities>
              <item>
                <name>Referred to</name>
                <date>2015-01-09T21:29:10Z</date>
              </item>
            </activities>
          </item>
        </subcommittees>
        <activities>
          <item>
            <name>Referred to</name>
            <date>2015-01-06T20:00:30Z</date>
          </item>
          <item>
            <name>Markup by</name>
            <date>2015-02-03T15:00:00Z</date>
          </item>
        </activities>
      </item>
    </committees>"#;

    #[test]
    fn test_committee_nested_structure() {
        let doc = Document::parse(COMMITTEES).unwrap();
        let committees = Committee::list_from_node(Some(doc.root_element())).unwrap();

        assert_eq!(committees.len(), 1);
        let committee = &committees[0];
        assert_eq!(committee.system_code, "hsif00");
        assert_eq!(committee.chamber.as_deref(), Some("House"));
        assert_eq!(committee.committee_type.as_deref(), Some("Standing"));
        assert_eq!(committee.activities.len(), 2);
        assert_eq!(committee.activities[1].name, "Markup by");

        assert_eq!(committee.subcommittees.len(), 1);
        assert_eq!(committee.subcommittees[0].name, "Health Subcommittee");
        assert_eq!(committee.subcommittees[0].activities.len(), 1);
    }

    #[test]
    fn test_committee_optional_fields_absent() {
        let xml = r#"<committees><item><systemCode>ssfi00</systemCode><name>Finance Committee</name></item></committees>"#;
        let doc = Document::parse(xml).unwrap();
        let committees = Committee::list_from_node(Some(doc.root_element())).unwrap();

        assert_eq!(committees[0].chamber, None);
        assert_eq!(committees[0].committee_type, None);
        assert!(committees[0].subcommittees.is_empty());
        assert!(committees[0].activities.is_empty());
    }

    #[test]
    fn test_activity_requires_date() {
        let xml = r#"<activities><item><name>Referred to</name></item></activities>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(Activity::list_from_node(Some(doc.root_element())).is_err());
    }

    #[test]
    fn test_committee_reports_use_own_item_tag() {
        let xml = r#"<committeeReports>
            <committeeReport><citation>H. Rept. 114-12</citation></committeeReport>
            <item><citation>ignored</citation></item>
        </committeeReports>"#;
        let doc = Document::parse(xml).unwrap();
        let reports = CommitteeReport::list_from_node(Some(doc.root_element())).unwrap();

        assert_eq!(
            reports,
            vec![CommitteeReport {
                citation: "H. Rept. 114-12".to_string()
            }]
        );
    }

    #[test]
    fn test_absent_container_is_empty() {
        assert!(Committee::list_from_node(None).unwrap().is_empty());
        assert!(CommitteeReport::list_from_node(None).unwrap().is_empty());
    }
}
