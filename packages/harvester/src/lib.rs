//! Congress Harvester - parse scraped U.S. Congress bill XML.
//!
//! This crate turns bill-status documents and bill text-version documents,
//! as written by the `unitedstates/congress` scraper, into structured
//! records, and joins the two into one unified record per bill.
//!
//! # Example
//!
//! ```
//! use congress_harvester::scrape::{parse_text_version_file_name, XmlType};
//!
//! let file = parse_text_version_file_name("BILLS-114s1is.xml").unwrap();
//! assert_eq!(file.legis_id(), "114-s-1");
//! assert_eq!(file.text_id(XmlType::Dtd), "114-s-1-is-dtd");
//! ```
//!
//! # Architecture
//!
//! The crate works on in-memory strings only; reading files is up to the
//! caller.
//!
//! - [`xml`]: XML element accessors
//! - [`billstatus`]: Record parsers and the [`BillStatus`] aggregate parser
//! - [`textversion`]: The [`TextVersion`] record and plain-text extraction
//! - [`scrape`]: Scrape path and file-name conventions
//! - [`unify`]: The bill-status / text-version join
//! - [`config`]: Constants and file-name patterns
//! - [`dates`]: Lenient date parsing
//! - [`error`]: Error types and Result alias

pub mod billstatus;
pub mod config;
pub mod dates;
pub mod error;
pub mod scrape;
pub mod textversion;
pub mod unify;
pub mod xml;

// Re-export commonly used items
pub use billstatus::{parse_bill_status, tag_counts, BillStatus, TextVersionRef};
pub use error::{HarvesterError, Result};
pub use scrape::{
    parse_billstatus_path, parse_text_version_file_name, BillStatusPath, LegisClass,
    TextVersionFileName, XmlType,
};
pub use textversion::{extract_text, DocumentMetadata, TextVersion};
pub use unify::{unify_all, unify_bill, JoinReport, UnifiedBill, UnifiedTextVersion};
