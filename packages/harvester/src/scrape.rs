//! File-name and path conventions of the scraper output tree.
//!
//! Everything here works on path strings relative to the scrape root, with
//! `/` separators; nothing touches the file system.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{
    BILLSTATUS_LASTMOD_FILE_NAME, BILLSTATUS_PATH_PATTERN, BILLS_PATTERN, LASTMOD_SUFFIX,
    PLAW_PATTERN, PLAW_VERSION, USLM_DIR_NAME,
};
use crate::dates::parse_datetime;
use crate::error::{HarvesterError, Result};

/// Dialect of a text-version document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XmlType {
    /// Legacy DTD-based bill markup.
    Dtd,
    /// United States Legislative Markup.
    Uslm,
}

impl XmlType {
    pub fn as_str(self) -> &'static str {
        match self {
            XmlType::Dtd => "dtd",
            XmlType::Uslm => "uslm",
        }
    }
}

impl fmt::Display for XmlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of text-version file: a bill text or an enacted public law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegisClass {
    Bills,
    Plaw,
}

impl LegisClass {
    pub fn as_str(self) -> &'static str {
        match self {
            LegisClass::Bills => "bills",
            LegisClass::Plaw => "plaw",
        }
    }
}

impl fmt::Display for LegisClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity fields encoded in a bill-status path
/// (`data/114/bills/hr/hr22/fdsys_billstatus.xml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillStatusPath {
    pub congress_num: u32,
    /// Directory class (e.g., "bills", "amendments").
    pub legis_class: String,
    pub legis_type: String,
    pub legis_num: u32,
    pub legis_id: String,
}

/// Parse a bill-status path relative to the scrape root.
///
/// # Examples
/// ```
/// use congress_harvester::scrape::parse_billstatus_path;
///
/// let path = parse_billstatus_path("data/114/bills/hr/hr22/fdsys_billstatus.xml").unwrap();
/// assert_eq!(path.legis_id, "114-hr-22");
///
/// assert!(parse_billstatus_path("data/114/bills/hr/hr22/BILLS-114hr22ih.xml").is_err());
/// ```
pub fn parse_billstatus_path(relative_path: &str) -> Result<BillStatusPath> {
    let caps = BILLSTATUS_PATH_PATTERN
        .captures(relative_path)
        .ok_or_else(|| HarvesterError::InvalidFileName(relative_path.to_string()))?;

    let congress_num = parse_num(&caps[1], relative_path)?;
    let legis_type = caps[3].to_lowercase();
    let legis_num = parse_num(&caps[5], relative_path)?;

    Ok(BillStatusPath {
        congress_num,
        legis_class: caps[2].to_string(),
        legis_id: format!("{congress_num}-{legis_type}-{legis_num}"),
        legis_type,
        legis_num,
    })
}

/// Identity fields encoded in a text-version file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextVersionFileName {
    pub file_name: String,
    pub congress_num: u32,
    pub legis_type: String,
    pub legis_num: u32,
    /// Version code (e.g., "ih", "enr"); `plaw` for public laws.
    pub legis_version: String,
    pub legis_class: LegisClass,
}

impl TextVersionFileName {
    pub fn legis_id(&self) -> String {
        format!("{}-{}-{}", self.congress_num, self.legis_type, self.legis_num)
    }

    /// `{congress}-{type}-{number}-{version}-{xml_type}`.
    pub fn text_id(&self, xml_type: XmlType) -> String {
        format!("{}-{}-{}", self.legis_id(), self.legis_version, xml_type)
    }
}

/// Parse a `BILLS-...` or `PLAW-...` file name.
///
/// # Examples
/// ```
/// use congress_harvester::scrape::{parse_text_version_file_name, LegisClass, XmlType};
///
/// let bill = parse_text_version_file_name("BILLS-114s1is.xml").unwrap();
/// assert_eq!(bill.text_id(XmlType::Dtd), "114-s-1-is-dtd");
///
/// let law = parse_text_version_file_name("PLAW-114publ41.xml").unwrap();
/// assert_eq!(law.legis_class, LegisClass::Plaw);
/// assert_eq!(law.legis_version, "plaw");
/// ```
pub fn parse_text_version_file_name(file_name: &str) -> Result<TextVersionFileName> {
    let invalid = || HarvesterError::InvalidFileName(file_name.to_string());

    if let Some(caps) = BILLS_PATTERN.captures(file_name) {
        return Ok(TextVersionFileName {
            file_name: file_name.to_string(),
            congress_num: parse_num(&caps[1], file_name)?,
            legis_type: caps[2].to_lowercase(),
            legis_num: parse_num(&caps[3], file_name)?,
            legis_version: caps[4].to_string(),
            legis_class: LegisClass::Bills,
        });
    }

    let caps = PLAW_PATTERN.captures(file_name).ok_or_else(invalid)?;
    Ok(TextVersionFileName {
        file_name: file_name.to_string(),
        congress_num: parse_num(&caps[1], file_name)?,
        legis_type: caps[2].to_lowercase(),
        legis_num: parse_num(&caps[3], file_name)?,
        legis_version: PLAW_VERSION.to_string(),
        legis_class: LegisClass::Plaw,
    })
}

/// USLM when any directory of the path is named `uslm`, DTD otherwise.
pub fn xml_type_for_path(relative_path: &str) -> XmlType {
    let components: Vec<&str> = relative_path.split(['/', '\\']).collect();
    // The last component is the file itself.
    let dirs = &components[..components.len().saturating_sub(1)];
    if dirs.contains(&USLM_DIR_NAME) {
        XmlType::Uslm
    } else {
        XmlType::Dtd
    }
}

/// Name of the companion last-modified file of a bill-status document.
pub fn billstatus_lastmod_file_name() -> &'static str {
    BILLSTATUS_LASTMOD_FILE_NAME
}

/// Name of the companion last-modified file of a text-version document.
///
/// # Examples
/// ```
/// use congress_harvester::scrape::text_version_lastmod_file_name;
///
/// assert_eq!(text_version_lastmod_file_name("BILLS-114s1is.xml"), "BILLS-114s1is-lastmod.txt");
/// ```
pub fn text_version_lastmod_file_name(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    format!("{stem}{LASTMOD_SUFFIX}")
}

/// Parse the contents of a last-modified file.
pub fn parse_lastmod(text: &str) -> Result<DateTime<Utc>> {
    parse_datetime(text).ok_or_else(|| HarvesterError::InvalidValue {
        element: "lastmod".to_string(),
        context: "last-modified file".to_string(),
        value: text.trim().to_string(),
        expected: "a timestamp",
    })
}

fn parse_num(digits: &str, source: &str) -> Result<u32> {
    digits
        .parse()
        .map_err(|_| HarvesterError::InvalidFileName(source.to_string()))
}
