//! Bill actions and the systems that recorded them.

use chrono::NaiveDate;
use roxmltree::Node;
use serde::{Deserialize, Serialize};

use super::committees::Committee;
use super::fields::{optional_text, required_date, required_text};
use crate::error::Result;
use crate::xml::{expect_tag, find_child, items};

/// System that recorded an action (e.g., "House floor actions").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSystem {
    pub name: String,
    pub code: Option<String>,
}

impl SourceSystem {
    /// Parse an optional `<sourceSystem>` element.
    pub fn from_node(node: Option<Node<'_, '_>>) -> Result<Option<Self>> {
        let Some(node) = node else {
            return Ok(None);
        };
        expect_tag(node, "sourceSystem");
        Ok(Some(Self {
            name: required_text(node, "name")?,
            code: optional_text(node, "code"),
        }))
    }
}

/// A step in the legislative history of a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub action_date: NaiveDate,
    pub text: String,
    #[serde(rename = "type")]
    pub action_type: Option<String>,
    pub action_code: Option<String>,
    pub source_system: Option<SourceSystem>,
    pub committees: Vec<Committee>,
}

impl Action {
    /// Parse one action element.
    ///
    /// Used both for `<actions><item>` entries and for `<latestAction>`,
    /// so the element tag is not checked.
    pub fn from_node(node: Node<'_, '_>) -> Result<Self> {
        Ok(Self {
            action_date: required_date(node, "actionDate")?,
            text: required_text(node, "text")?,
            action_type: optional_text(node, "type"),
            action_code: optional_text(node, "actionCode"),
            source_system: SourceSystem::from_node(find_child(node, "sourceSystem"))?,
            committees: Committee::list_from_node(find_child(node, "committees"))?,
        })
    }

    /// Parse a top-level `<actions>` container.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "actions", "item")
            .map(Self::from_node)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_actions_with_source_system_and_committees() {
        let xml = r#"<actions>
          <item>
            <actionDate>2015-01-06</actionDate>
            <committees>
              <item>
                <systemCode>hsif00</systemCode>
                <name>Energy and Commerce Committee</name>
              </item>
            </committees>
            <sourceSystem>
              <code>2</code>
              <name>House floor actions</name>
            </sourceSystem>
            <text>Referred to the House Committee on Energy and Commerce.</text>
            <type>IntroReferral</type>
            <actionCode>H11100</actionCode>
          </item>
          <item>
            <actionDate>2015-01-06</actionDate>
            <text>Introduced in House</text>
          </item>
        </actions>"#;
        let doc = Document::parse(xml).unwrap();
        let actions = Action::list_from_node(Some(doc.root_element())).unwrap();

        assert_eq!(actions.len(), 2);
        let first = &actions[0];
        assert_eq!(first.action_date.to_string(), "2015-01-06");
        assert_eq!(first.action_type.as_deref(), Some("IntroReferral"));
        assert_eq!(first.action_code.as_deref(), Some("H11100"));
        assert_eq!(
            first.source_system,
            Some(SourceSystem {
                name: "House floor actions".to_string(),
                code: Some("2".to_string()),
            })
        );
        assert_eq!(first.committees.len(), 1);

        assert_eq!(actions[1].source_system, None);
        assert!(actions[1].committees.is_empty());
    }

    #[test]
    fn test_action_missing_text_fails() {
        let xml = r#"<latestAction><actionDate>2015-01-06</actionDate></latestAction>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(Action::from_node(doc.root_element()).is_err());
    }

    #[test]
    fn test_source_system_absent() {
        assert_eq!(SourceSystem::from_node(None).unwrap(), None);
    }
}
