//! Related bills and how they relate.

use roxmltree::Node;
use serde::{Deserialize, Serialize};

use super::actions::Action;
use super::fields::{missing, optional_text, required_text, required_u32};
use crate::error::Result;
use crate::xml::{find_child, items};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipDetail {
    /// Relationship type (e.g., "Identical bill", "Related bill").
    #[serde(rename = "type")]
    pub relationship_type: String,
    /// Who identified the relationship (e.g., "CRS", "House").
    pub identified_by: String,
}

impl RelationshipDetail {
    /// Parse a `<relationshipDetails>` container.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "relationshipDetails", "item")
            .map(|item| {
                Ok(Self {
                    relationship_type: required_text(item, "type")?,
                    identified_by: required_text(item, "identifiedBy")?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedBill {
    pub title: Option<String>,
    pub congress: u32,
    pub number: u32,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub latest_action: Action,
    pub relationship_details: Vec<RelationshipDetail>,
}

impl RelatedBill {
    /// Parse a `<relatedBills>` container.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "relatedBills", "item")
            .map(|item| {
                let latest_action = find_child(item, "latestAction")
                    .ok_or_else(|| missing(item, "latestAction"))?;
                Ok(Self {
                    title: optional_text(item, "title"),
                    congress: required_u32(item, "congress")?,
                    number: required_u32(item, "number")?,
                    bill_type: required_text(item, "type")?,
                    latest_action: Action::from_node(latest_action)?,
                    relationship_details: RelationshipDetail::list_from_node(find_child(
                        item,
                        "relationshipDetails",
                    ))?,
                })
            })
            .collect()
    }
}
