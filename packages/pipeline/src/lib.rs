//! Congress Pipeline - batch parsing of a `unitedstates/congress` scrape tree.
//!
//! Finds bill-status and text-version files below `{scrape}/data`, parses
//! them with [`congress_harvester`], joins them per congress and writes the
//! results as JSON Lines.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scan;

pub use batch::{process_congress, BatchReport, CongressOutput, ParsedBillStatus, RunReport};
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use output::{write_congress, write_jsonl};
pub use scan::{scan, ScanResult};
