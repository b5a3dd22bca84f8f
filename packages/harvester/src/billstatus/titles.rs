//! Titles, summaries, subjects and policy area.

use chrono::{DateTime, NaiveDate, Utc};
use roxmltree::Node;
use serde::{Deserialize, Serialize};

use super::fields::{optional_text, required_date, required_datetime, required_text};
use crate::error::Result;
use crate::xml::{expect_tag, find_child, items, text_or_none};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Title type (e.g., "Official Title as Introduced", "Short Titles as Passed Senate").
    pub title_type: String,
    pub title: String,
    pub chamber_code: Option<String>,
    pub chamber_name: Option<String>,
    pub bill_text_version_name: Option<String>,
    pub bill_text_version_code: Option<String>,
}

impl Title {
    /// Parse a `<titles>` container.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "titles", "item")
            .map(|item| {
                Ok(Self {
                    title_type: required_text(item, "titleType")?,
                    title: required_text(item, "title")?,
                    chamber_code: optional_text(item, "chamberCode"),
                    chamber_name: optional_text(item, "chamberName"),
                    bill_text_version_name: optional_text(item, "billTextVersionName"),
                    bill_text_version_code: optional_text(item, "billTextVersionCode"),
                })
            })
            .collect()
    }
}

/// CRS summary of one bill version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub version_code: String,
    pub action_date: NaiveDate,
    pub action_desc: String,
    pub update_date: DateTime<Utc>,
    /// Summary body; HTML markup from the CDATA section is kept as-is.
    pub text: String,
}

impl Summary {
    /// Parse a `<summaries>` container of `<summary>` elements.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "summaries", "summary")
            .map(|item| {
                Ok(Self {
                    version_code: required_text(item, "versionCode")?,
                    action_date: required_date(item, "actionDate")?,
                    action_desc: required_text(item, "actionDesc")?,
                    update_date: required_datetime(item, "updateDate")?,
                    text: required_text(item, "text")?,
                })
            })
            .collect()
    }
}

/// Legislative subject terms from `<subjects><legislativeSubjects>`.
///
/// Items without a name contribute nothing.
pub fn parse_subjects(container: Option<Node<'_, '_>>) -> Vec<String> {
    let Some(subjects) = container else {
        return Vec::new();
    };
    expect_tag(subjects, "subjects");

    items(
        find_child(subjects, "legislativeSubjects"),
        "legislativeSubjects",
        "item",
    )
    .filter_map(|item| text_or_none(find_child(item, "name")).map(str::to_string))
    .collect()
}

/// Name of the bill's policy area, if one was assigned.
pub fn parse_policy_area(node: Option<Node<'_, '_>>) -> Option<String> {
    let node = node?;
    expect_tag(node, "policyArea");
    optional_text(node, "name")
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_titles() {
        let xml = r#"<titles>
          <item>
            <titleType>Display Title</titleType>
            <title>Hire More Heroes Act of 2015</title>
          </item>
          <item>
            <titleType>Short Titles as Introduced</titleType>
            <title>Hire More Heroes Act of 2015</title>
            <chamberCode>H</chamberCode>
            <chamberName>House</chamberName>
            <billTextVersionName>Introduced in House</billTextVersionName>
            <billTextVersionCode>IH</billTextVersionCode>
          </item>
        </titles>"#;
        let doc = Document::parse(xml).unwrap();
        let titles = Title::list_from_node(Some(doc.root_element())).unwrap();

        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].chamber_code, None);
        assert_eq!(titles[1].bill_text_version_code.as_deref(), Some("IH"));
    }

    #[test]
    fn test_summaries_keep_cdata_markup() {
        let xml = r#"<summaries>
          <summary>
            <versionCode>00</versionCode>
            <actionDate>2015-01-06</actionDate>
            <actionDesc>Introduced in House</actionDesc>
            <updateDate>2015-01-21T19:02:35Z</updateDate>
            <text><![CDATA[<p><b>Hire More Heroes Act</b></p>]]></text>
          </summary>
        </summaries>"#;
        let doc = Document::parse(xml).unwrap();
        let summaries = Summary::list_from_node(Some(doc.root_element())).unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].text, "<p><b>Hire More Heroes Act</b></p>");
        assert_eq!(summaries[0].action_date.to_string(), "2015-01-06");
    }

    #[test]
    fn test_subjects() {
        let xml = r#"<subjects>
          <legislativeSubjects>
            <item><name>Employment taxes</name></item>
            <item><name>Veterans' education, employment, rehabilitation</name></item>
          </legislativeSubjects>
          <policyArea><name>Taxation</name></policyArea>
        </subjects>"#;
        let doc = Document::parse(xml).unwrap();
        let subjects = parse_subjects(Some(doc.root_element()));

        assert_eq!(
            subjects,
            vec![
                "Employment taxes".to_string(),
                "Veterans' education, employment, rehabilitation".to_string(),
            ]
        );
    }

    #[test]
    fn test_subjects_without_legislative_subjects() {
        let xml = r#"<subjects><policyArea><name>Taxation</name></policyArea></subjects>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(parse_subjects(Some(doc.root_element())).is_empty());
        assert!(parse_subjects(None).is_empty());
    }

    #[test]
    fn test_policy_area() {
        let xml = r#"<policyArea><name>Taxation</name></policyArea>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            parse_policy_area(Some(doc.root_element())).as_deref(),
            Some("Taxation")
        );
        assert_eq!(parse_policy_area(None), None);
    }
}
