//! JSON Lines datasets, one set of files per congress.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use congress_harvester::XmlType;

use crate::batch::CongressOutput;
use crate::error::{PipelineError, Result};

pub fn billstatus_file_name(congress_num: u32) -> String {
    format!("usc-{congress_num}-billstatus-parsed.jsonl")
}

pub fn text_versions_file_name(congress_num: u32, xml_type: XmlType) -> String {
    format!("usc-{congress_num}-textversions-{xml_type}.jsonl")
}

pub fn unified_file_name(congress_num: u32) -> String {
    format!("usc-{congress_num}-unified-v1.jsonl")
}

/// Write `records` to `path`, one JSON object per line.
///
/// The file is written next to its destination and renamed into place, so
/// readers never see a partial dataset. Returns the number of lines written.
pub fn write_jsonl<'a, T, I>(path: &Path, records: I) -> Result<usize>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let write_err = |source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(write_err)?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    let mut count = 0;
    {
        let file = File::create(&temp_file).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n").map_err(write_err)?;
            count += 1;
        }
        let file = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
        file.sync_all().map_err(write_err)?;
    }

    fs::rename(&temp_file, path).map_err(write_err)?;
    Ok(count)
}

/// Write every dataset of one congress below `output_path`.
///
/// Returns the paths written, in a fixed order.
pub fn write_congress(
    output_path: &Path,
    output: &CongressOutput,
    include_uslm: bool,
) -> Result<Vec<PathBuf>> {
    let cn = output.congress_num;
    let mut written = Vec::new();

    let path = output_path.join(billstatus_file_name(cn));
    let rows = write_jsonl(&path, &output.billstatus)?;
    info!(path = %path.display(), rows, "wrote bill statuses");
    written.push(path);

    let mut xml_types = vec![XmlType::Dtd];
    if include_uslm {
        xml_types.push(XmlType::Uslm);
    }
    for xml_type in xml_types {
        let path = output_path.join(text_versions_file_name(cn, xml_type));
        let rows = write_jsonl(&path, output.text_versions_of(xml_type))?;
        info!(path = %path.display(), rows, "wrote text versions");
        written.push(path);
    }

    let path = output_path.join(unified_file_name(cn));
    let rows = write_jsonl(&path, &output.unified)?;
    info!(path = %path.display(), rows, "wrote unified bills");
    written.push(path);

    Ok(written)
}
