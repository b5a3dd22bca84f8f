//! Discovery of bill-status and text-version files in a scrape tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use walkdir::WalkDir;

use congress_harvester::config::BILLSTATUS_FILE_NAME;
use congress_harvester::scrape::{
    billstatus_lastmod_file_name, parse_billstatus_path, parse_lastmod,
    parse_text_version_file_name, text_version_lastmod_file_name, xml_type_for_path,
    BillStatusPath, TextVersionFileName, XmlType,
};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};

/// A bill-status document found in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillStatusFile {
    pub path: BillStatusPath,
    /// Path relative to the scrape root, `/`-separated.
    pub scrape_path: String,
    pub file: PathBuf,
}

/// A text-version document found in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextVersionFile {
    pub name: TextVersionFileName,
    pub xml_type: XmlType,
    pub scrape_path: String,
    pub file: PathBuf,
}

/// Contents of a document and its companion last-modified file.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub xml: String,
    pub lastmod: DateTime<Utc>,
}

impl BillStatusFile {
    pub fn lastmod_file(&self) -> PathBuf {
        sibling(&self.file, billstatus_lastmod_file_name())
    }

    pub fn read(&self) -> Result<RawDocument> {
        read_document(&self.file, &self.lastmod_file())
    }

    /// The document alone, without its last-modified companion.
    pub fn read_xml(&self) -> Result<String> {
        Ok(read_to_string(&self.file)?.trim().to_string())
    }
}

impl TextVersionFile {
    pub fn lastmod_file(&self) -> PathBuf {
        sibling(
            &self.file,
            &text_version_lastmod_file_name(&self.name.file_name),
        )
    }

    pub fn read(&self) -> Result<RawDocument> {
        read_document(&self.file, &self.lastmod_file())
    }
}

/// Files of one congress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CongressFiles {
    pub billstatus: Vec<BillStatusFile>,
    pub text_versions: Vec<TextVersionFile>,
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub congresses: BTreeMap<u32, CongressFiles>,
    /// `.xml` files that matched no known naming pattern.
    pub skipped: Vec<PathBuf>,
}

impl ScanResult {
    pub fn billstatus_count(&self) -> usize {
        self.congresses.values().map(|c| c.billstatus.len()).sum()
    }

    pub fn text_version_count(&self) -> usize {
        self.congresses.values().map(|c| c.text_versions.len()).sum()
    }
}

/// Walk `{scrape_path}/data` and classify every `.xml` file.
///
/// Congresses outside the configured filter are left out, as are USLM text
/// versions unless the configuration asks for them.
pub fn scan(config: &PipelineConfig) -> Result<ScanResult> {
    let data_path = config.data_path();
    if !data_path.is_dir() {
        return Err(PipelineError::Config(format!(
            "scrape data directory does not exist: {}",
            data_path.display()
        )));
    }

    let mut result = ScanResult::default();

    for entry in WalkDir::new(&data_path)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let file = entry.path();
        if !entry.file_type().is_file() || file.extension().is_none_or(|ext| ext != "xml") {
            continue;
        }

        let scrape_path = relative_scrape_path(&config.scrape_path, file);
        let file_name = entry.file_name().to_string_lossy();

        if file_name == BILLSTATUS_FILE_NAME {
            match parse_billstatus_path(&scrape_path) {
                Ok(path) if config.includes_congress(path.congress_num) => {
                    result
                        .congresses
                        .entry(path.congress_num)
                        .or_default()
                        .billstatus
                        .push(BillStatusFile {
                            path,
                            scrape_path,
                            file: file.to_path_buf(),
                        });
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(path = %scrape_path, error = %e, "skipping bill-status file");
                    result.skipped.push(file.to_path_buf());
                }
            }
            continue;
        }

        match parse_text_version_file_name(&file_name) {
            Ok(name) if config.includes_congress(name.congress_num) => {
                let xml_type = xml_type_for_path(&scrape_path);
                if xml_type == XmlType::Uslm && !config.include_uslm {
                    debug!(path = %scrape_path, "ignoring USLM text version");
                    continue;
                }
                result
                    .congresses
                    .entry(name.congress_num)
                    .or_default()
                    .text_versions
                    .push(TextVersionFile {
                        name,
                        xml_type,
                        scrape_path,
                        file: file.to_path_buf(),
                    });
            }
            Ok(_) => {}
            Err(e) => {
                warn!(path = %scrape_path, error = %e, "skipping unrecognized xml file");
                result.skipped.push(file.to_path_buf());
            }
        }
    }

    debug!(
        congresses = result.congresses.len(),
        billstatus = result.billstatus_count(),
        text_versions = result.text_version_count(),
        skipped = result.skipped.len(),
        "scan complete"
    );

    Ok(result)
}

/// `file` relative to `root`, joined with `/` whatever the platform.
fn relative_scrape_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn sibling(file: &Path, name: &str) -> PathBuf {
    file.parent()
        .map(|dir| dir.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}

pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_document(file: &Path, lastmod_file: &Path) -> Result<RawDocument> {
    let xml = read_to_string(file)?.trim().to_string();
    let lastmod = parse_lastmod(&read_to_string(lastmod_file)?)?;
    Ok(RawDocument { xml, lastmod })
}
