//! Per-congress batch processing.
//!
//! Each document is handled on its own: read failures count as skipped,
//! parse failures count as failed, and both are logged with the path and
//! the reason before moving on. The join works the same way per bill; only
//! duplicate text-version ids stop a congress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use congress_harvester::unify::TextVersionIndex;
use congress_harvester::{unify_bill, BillStatus, JoinReport, TextVersion, UnifiedBill, XmlType};

use crate::error::{PipelineError, Result};
use crate::scan::{BillStatusFile, CongressFiles, TextVersionFile};

/// Outcome counts for one class of documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.succeeded += other.succeeded;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Congresses fully processed and written, or abandoned.
    pub congresses: BatchReport,
    pub billstatus: BatchReport,
    pub text_versions: BatchReport,
    /// Bills joined with their text versions; failures are join fan-outs.
    pub unified: BatchReport,
    pub join: JoinReport,
}

impl RunReport {
    pub fn merge(&mut self, other: RunReport) {
        self.congresses.merge(other.congresses);
        self.billstatus.merge(other.billstatus);
        self.text_versions.merge(other.text_versions);
        self.unified.merge(other.unified);
        self.join.merge(other.join);
    }
}

/// One row of the parsed bill-status dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedBillStatus {
    pub legis_id: String,
    pub congress_num: u32,
    pub legis_type: String,
    pub legis_num: u32,
    pub scrape_path: String,
    pub lastmod: DateTime<Utc>,
    pub billstatus: BillStatus,
}

/// Everything produced for one congress.
#[derive(Debug, Clone, Default)]
pub struct CongressOutput {
    pub congress_num: u32,
    pub billstatus: Vec<ParsedBillStatus>,
    pub text_versions: Vec<TextVersion>,
    pub unified: Vec<UnifiedBill>,
}

impl CongressOutput {
    pub fn text_versions_of(&self, xml_type: XmlType) -> Vec<&TextVersion> {
        self.text_versions
            .iter()
            .filter(|tv| tv.xml_type == xml_type)
            .collect()
    }
}

enum Outcome<T> {
    Parsed(T),
    Skipped,
    Failed,
}

fn parse_billstatus_file(file: &BillStatusFile) -> Outcome<ParsedBillStatus> {
    let raw = match file.read() {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %file.scrape_path, error = %e, "skipping unreadable bill status");
            return Outcome::Skipped;
        }
    };

    let parsed = BillStatus::from_xml_str(&raw.xml)
        .map_err(PipelineError::from)
        .and_then(|billstatus| {
            let document_id = billstatus.legis_id();
            if document_id != file.path.legis_id {
                return Err(PipelineError::LegisIdMismatch {
                    path_id: file.path.legis_id.clone(),
                    document_id,
                });
            }
            Ok(billstatus)
        });

    match parsed {
        Ok(billstatus) => Outcome::Parsed(ParsedBillStatus {
            legis_id: file.path.legis_id.clone(),
            congress_num: file.path.congress_num,
            legis_type: file.path.legis_type.clone(),
            legis_num: file.path.legis_num,
            scrape_path: file.scrape_path.clone(),
            lastmod: raw.lastmod,
            billstatus,
        }),
        Err(e) => {
            error!(path = %file.scrape_path, error = %e, "failed to parse bill status");
            Outcome::Failed
        }
    }
}

fn read_text_version_file(file: &TextVersionFile) -> Outcome<TextVersion> {
    match file.read() {
        Ok(raw) => Outcome::Parsed(TextVersion::new(
            &file.name,
            file.xml_type,
            file.scrape_path.clone(),
            raw.lastmod,
            raw.xml,
        )),
        Err(e) => {
            warn!(path = %file.scrape_path, error = %e, "skipping unreadable text version");
            Outcome::Skipped
        }
    }
}

fn collect<F, T>(
    files: &[F],
    handle: impl Fn(&F) -> Outcome<T>,
    report: &mut BatchReport,
    out: &mut Vec<T>,
) {
    for file in files {
        match handle(file) {
            Outcome::Parsed(value) => {
                report.succeeded += 1;
                out.push(value);
            }
            Outcome::Skipped => report.skipped += 1,
            Outcome::Failed => report.failed += 1,
        }
    }
}

/// Parse all documents of one congress and join them.
///
/// Every text version of the congress is read before the join starts.
/// Fails only when two text versions share a `text_id`.
pub fn process_congress(
    congress_num: u32,
    files: &CongressFiles,
) -> Result<(CongressOutput, RunReport)> {
    let mut report = RunReport::default();
    let mut output = CongressOutput {
        congress_num,
        ..CongressOutput::default()
    };

    collect(
        &files.billstatus,
        parse_billstatus_file,
        &mut report.billstatus,
        &mut output.billstatus,
    );
    collect(
        &files.text_versions,
        read_text_version_file,
        &mut report.text_versions,
        &mut output.text_versions,
    );

    let index = TextVersionIndex::new(&output.text_versions)?;
    for row in &output.billstatus {
        match unify_bill(&row.billstatus, &index, &mut report.join) {
            Ok(bill) => {
                report.unified.succeeded += 1;
                output.unified.push(bill);
            }
            Err(e) => {
                error!(path = %row.scrape_path, error = %e, "failed to unify bill");
                report.unified.failed += 1;
            }
        }
    }

    info!(
        congress = congress_num,
        billstatus_ok = report.billstatus.succeeded,
        billstatus_failed = report.billstatus.failed,
        text_versions = report.text_versions.succeeded,
        unify_failed = report.unified.failed,
        matched = report.join.matched,
        missing = report.join.missing_total(),
        unrenderable = report.join.unrenderable_total(),
        "processed congress"
    );

    Ok((output, report))
}
