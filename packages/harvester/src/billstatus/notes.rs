//! Notes, links, enacted laws and CBO cost estimates.

use chrono::{DateTime, Utc};
use roxmltree::Node;
use serde::{Deserialize, Serialize};

use super::fields::{optional_text, required_datetime, required_text};
use crate::error::Result;
use crate::xml::{find_child, items};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

impl Link {
    /// Parse a `<links>` container of `<link>` elements.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "links", "link")
            .map(|item| {
                Ok(Self {
                    name: required_text(item, "name")?,
                    url: required_text(item, "url")?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    pub links: Vec<Link>,
}

impl Note {
    /// Parse a `<notes>` container.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "notes", "item")
            .map(|item| {
                Ok(Self {
                    text: required_text(item, "text")?,
                    links: Link::list_from_node(find_child(item, "links"))?,
                })
            })
            .collect()
    }
}

/// Public or private law enacted from the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Law {
    /// Law type (e.g., "Public Law").
    #[serde(rename = "type")]
    pub law_type: String,
    /// Law number (e.g., "114-41").
    pub number: String,
}

impl Law {
    /// Parse a `<laws>` container.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "laws", "item")
            .map(|item| {
                Ok(Self {
                    law_type: required_text(item, "type")?,
                    number: required_text(item, "number")?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CboCostEstimate {
    pub pub_date: DateTime<Utc>,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

impl CboCostEstimate {
    /// Parse a `<cboCostEstimates>` container.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        items(container, "cboCostEstimates", "item")
            .map(|item| {
                Ok(Self {
                    pub_date: required_datetime(item, "pubDate")?,
                    title: required_text(item, "title")?,
                    url: required_text(item, "url")?,
                    description: optional_text(item, "description"),
                })
            })
            .collect()
    }
}
