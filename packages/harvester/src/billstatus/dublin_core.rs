//! Dublin Core block at the end of every bill-status document.

use roxmltree::Node;
use serde::{Deserialize, Serialize};

use super::fields::missing;
use crate::config::DUBLIN_CORE_NS;
use crate::error::Result;
use crate::xml::{expect_tag, find_child_ns, text_or_none};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DublinCore {
    pub dc_format: String,
    pub dc_language: String,
    pub dc_rights: String,
    pub dc_contributor: String,
    pub dc_description: String,
}

impl DublinCore {
    /// Parse a `<dublinCore>` element. All five `dc:` fields are required.
    pub fn from_node(node: Node<'_, '_>) -> Result<Self> {
        expect_tag(node, "dublinCore");
        let dc = |tag: &str| {
            text_or_none(find_child_ns(node, DUBLIN_CORE_NS, tag))
                .map(str::to_string)
                .ok_or_else(|| missing(node, &format!("dc:{tag}")))
        };

        Ok(Self {
            dc_format: dc("format")?,
            dc_language: dc("language")?,
            dc_rights: dc("rights")?,
            dc_contributor: dc("contributor")?,
            dc_description: dc("description")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarvesterError;
    use roxmltree::Document;

    const DUBLIN_CORE: &str = r#"<dublinCore xmlns:dc="http://purl.org/dc/elements/1.1/">
      <dc:format>text/xml</dc:format>
      <dc:language>EN</dc:language>
      <dc:rights>Pursuant to Title 17 Section 105 of the United States Code, this file is not subject to copyright protection and is in the public domain.</dc:rights>
      <dc:contributor>Congressional Research Service, Library of Congress</dc:contributor>
      <dc:description>This file contains bill summaries and statuses for federal legislation.</dc:description>
    </dublinCore>"#;

    #[test]
    fn test_dublin_core() {
        let doc = Document::parse(DUBLIN_CORE).unwrap();
        let dc = DublinCore::from_node(doc.root_element()).unwrap();

        assert_eq!(dc.dc_format, "text/xml");
        assert_eq!(dc.dc_language, "EN");
        assert_eq!(
            dc.dc_contributor,
            "Congressional Research Service, Library of Congress"
        );
    }

    #[test]
    fn test_dublin_core_requires_namespace() {
        // Same local names without the dc namespace do not count.
        let xml = r#"<dublinCore>
          <format>text/xml</format>
          <language>EN</language>
          <rights>public domain</rights>
          <contributor>CRS</contributor>
          <description>statuses</description>
        </dublinCore>"#;
        let doc = Document::parse(xml).unwrap();
        let err = DublinCore::from_node(doc.root_element()).unwrap_err();
        assert!(matches!(
            err,
            HarvesterError::MissingElement { ref element, .. } if element == "dc:format"
        ));
    }
}
