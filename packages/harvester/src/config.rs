//! Configuration constants for the harvester.
//!
//! Scrape layout and file naming follow the output of the
//! `unitedstates/congress` scraper.

use regex::Regex;
use std::sync::LazyLock;

/// Dublin Core element namespace used in bill-status and bill-text metadata.
pub const DUBLIN_CORE_NS: &str = "http://purl.org/dc/elements/1.1/";

/// File name of every bill-status document in the scrape tree.
pub const BILLSTATUS_FILE_NAME: &str = "fdsys_billstatus.xml";

/// Companion file holding the bill-status last-modified timestamp.
pub const BILLSTATUS_LASTMOD_FILE_NAME: &str = "fdsys_billstatus-lastmod.txt";

/// Suffix of the companion last-modified file for a text version
/// (`BILLS-114s1is.xml` -> `BILLS-114s1is-lastmod.txt`).
pub const LASTMOD_SUFFIX: &str = "-lastmod.txt";

/// Directory name that marks USLM-flavored text versions.
pub const USLM_DIR_NAME: &str = "uslm";

/// Version tag assigned to public-law texts, whose file names carry none.
pub const PLAW_VERSION: &str = "plaw";

/// Bill text file name: `BILLS-{congress}{type}{number}{version}.xml`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static BILLS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^BILLS-(\d{3})([a-zA-Z]+)(\d+)(\w+)\.xml$").expect("valid regex")
});

/// Public law file name: `PLAW-{congress}{type}{number}.xml`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static PLAW_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PLAW-(\d{3})([a-zA-Z]+)(\d+)\.xml$").expect("valid regex")
});

/// Bill-status path relative to the scrape root:
/// `data/{congress}/{class}/{type}/{type}{number}/fdsys_billstatus.xml`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static BILLSTATUS_PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data/(\d{3})/(\w+)/(\w+)/([a-zA-Z]+)(\d+)/fdsys_billstatus\.xml$")
        .expect("valid regex")
});

/// Tags whose text makes up the sectioned plain-text rendering, in output order.
pub const TEXT_SECTION_TAGS: [&str; 9] = [
    "metadata",
    "form",
    "preamble",
    "legis-body",
    "resolution-body",
    "official-title-amendment",
    "impeachment-resolution-signature",
    "attestation",
    "endorsement",
];

/// Body tags for the body-only plain-text rendering.
pub const TEXT_BODY_TAGS: [&str; 2] = ["legis-body", "resolution-body"];
