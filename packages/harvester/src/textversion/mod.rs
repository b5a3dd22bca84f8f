//! Text-version documents: the record built from a scraped file, its
//! plain-text renderings and its embedded metadata.

mod extract;
mod metadata;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scrape::{LegisClass, TextVersionFileName, XmlType};

pub use extract::{escape_bare_ampersands, extract_body_text, extract_sectioned_text, extract_text};
pub use metadata::{DocumentAttributes, DocumentDublinCore, DocumentForm, DocumentMetadata};

/// One scraped text-version file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextVersion {
    /// `{congress}-{type}-{number}-{version}-{xml_type}`, unique per file.
    pub text_id: String,
    pub legis_id: String,
    pub congress_num: u32,
    pub legis_type: String,
    pub legis_num: u32,
    pub legis_version: String,
    pub legis_class: LegisClass,
    pub xml_type: XmlType,
    /// Path relative to the scrape root.
    pub scrape_path: String,
    pub file_name: String,
    pub lastmod: DateTime<Utc>,
    pub xml: String,
}

impl TextVersion {
    pub fn new(
        file: &TextVersionFileName,
        xml_type: XmlType,
        scrape_path: impl Into<String>,
        lastmod: DateTime<Utc>,
        xml: impl Into<String>,
    ) -> Self {
        let xml: String = xml.into();
        Self {
            text_id: file.text_id(xml_type),
            legis_id: file.legis_id(),
            congress_num: file.congress_num,
            legis_type: file.legis_type.clone(),
            legis_num: file.legis_num,
            legis_version: file.legis_version.clone(),
            legis_class: file.legis_class,
            xml_type,
            scrape_path: scrape_path.into(),
            file_name: file.file_name.clone(),
            lastmod,
            xml: xml.trim().to_string(),
        }
    }

    /// Canonical plain text of the document (see [`extract_text`]).
    pub fn text(&self) -> Result<String> {
        extract_text(&self.xml)
    }

    /// Metadata embedded in the document (see [`parse_metadata`]).
    pub fn metadata(&self) -> Result<DocumentMetadata> {
        parse_metadata(&self.xml)
    }
}

/// Read the embedded metadata of a text-version document.
///
/// Only malformed XML fails; absent metadata elements leave fields empty.
pub fn parse_metadata(xml: &str) -> Result<DocumentMetadata> {
    extract::with_document(xml, DocumentMetadata::from_document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::parse_text_version_file_name;

    #[test]
    fn test_text_version_new() {
        let file = parse_text_version_file_name("BILLS-114s1is.xml").unwrap();
        let lastmod = "2023-01-11T13:31:58Z".parse().unwrap();
        let tv = TextVersion::new(
            &file,
            XmlType::Dtd,
            "data/114/bills/s/s1/text-versions/is/BILLS-114s1is.xml",
            lastmod,
            "\n<bill><legis-body>Be it enacted</legis-body></bill>\n",
        );

        assert_eq!(tv.text_id, "114-s-1-is-dtd");
        assert_eq!(tv.legis_id, "114-s-1");
        assert_eq!(tv.file_name, "BILLS-114s1is.xml");
        assert!(tv.xml.starts_with("<bill>"));
        assert_eq!(tv.text().unwrap(), "Be it enacted");
        assert_eq!(tv.metadata().unwrap().root_tag, "bill");
    }
}
