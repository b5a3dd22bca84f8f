//! Text versions declared by a bill-status document.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use roxmltree::Node;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fields::{optional_datetime, optional_text, required_text};
use crate::error::{HarvesterError, Result};
use crate::xml::{find_child, items, node_path};

/// One `<textVersions><item>` entry: the declared version type, its date and
/// the URL of the XML rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextVersionRef {
    /// Version type (e.g., "Introduced in Senate", "Enrolled Bill").
    #[serde(rename = "type")]
    pub version_type: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub url: Option<String>,
}

impl TextVersionRef {
    /// Parse a `<textVersions>` container.
    ///
    /// Each item's `<formats>` must resolve to at most one distinct URL,
    /// and every format must carry a `<url>`. Items with no type, date or
    /// URL are dropped.
    pub fn list_from_node(container: Option<Node<'_, '_>>) -> Result<Vec<Self>> {
        let mut refs = Vec::new();

        for item in items(container, "textVersions", "item") {
            let url = resolve_format_url(find_child(item, "formats"))?;
            let version_type = optional_text(item, "type");
            let date = optional_datetime(item, "date")?;

            if url.is_none() && version_type.is_none() && date.is_none() {
                debug!(path = %node_path(item), "dropping empty text version reference");
                continue;
            }

            refs.push(Self {
                version_type,
                date,
                url,
            });
        }

        Ok(refs)
    }

    /// Final path segment of the URL, used as the join key against scraped
    /// text-version files.
    ///
    /// # Examples
    /// ```
    /// use congress_harvester::billstatus::TextVersionRef;
    ///
    /// let tv = TextVersionRef {
    ///     version_type: Some("Introduced in Senate".to_string()),
    ///     date: None,
    ///     url: Some("https://www.govinfo.gov/content/pkg/BILLS-114s1is/xml/BILLS-114s1is.xml".to_string()),
    /// };
    /// assert_eq!(tv.file_name(), Some("BILLS-114s1is.xml"));
    /// ```
    pub fn file_name(&self) -> Option<&str> {
        let url = self.url.as_deref()?;
        url.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

/// Distinct `<formats><item><url>` values of one text version.
fn resolve_format_url(formats: Option<Node<'_, '_>>) -> Result<Option<String>> {
    let urls = items(formats, "formats", "item")
        .map(|item| required_text(item, "url"))
        .collect::<Result<BTreeSet<String>>>()?;

    match urls.len() {
        0 => Ok(None),
        1 => Ok(urls.into_iter().next()),
        _ => Err(HarvesterError::AmbiguousUrl {
            urls: urls.into_iter().collect(),
        }),
    }
}
