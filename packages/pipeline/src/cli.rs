//! Command-line interface for the pipeline.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use congress_harvester::textversion::{extract_body_text, extract_sectioned_text, extract_text};
use congress_harvester::{tag_counts, BillStatus};

use crate::batch::{process_congress, BatchReport, RunReport};
use crate::config::{PipelineConfig, SCRAPE_PATH_ENV};
use crate::error::{PipelineError, Result};
use crate::output::write_congress;
use crate::scan::{read_to_string, scan};

/// Congress Pipeline - Parse scraped bill-status and bill-text XML into datasets.
#[derive(Parser)]
#[command(name = "congress-pipeline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a whole scrape tree and write JSON Lines datasets.
    Run {
        /// Scraper output directory containing `data/` (default: $CONGRESS_SCRAPE_PATH)
        #[arg(short, long)]
        scrape: Option<PathBuf>,

        /// Output directory (default: $CONGRESS_OUTPUT_PATH or congress-hf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only these congresses (e.g., 113,114)
        #[arg(short, long, value_delimiter = ',')]
        congress: Vec<u32>,

        /// Also write USLM text-version datasets
        #[arg(long)]
        uslm: bool,
    },

    /// Parse one bill-status file and print it as JSON.
    Parse {
        /// Path to a fdsys_billstatus.xml file
        file: PathBuf,
    },

    /// Print the plain text of one text-version file.
    Text {
        /// Path to a BILLS-*.xml or PLAW-*.xml file
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = TextMode::Whole)]
        mode: TextMode,
    },

    /// Count the child tags of <bill> across all bill-status files.
    Tags {
        /// Scraper output directory containing `data/`
        scrape: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TextMode {
    /// All text nodes of the document
    Whole,
    /// Only the legislative body
    Body,
    /// One line per section-level element
    Sections,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scrape,
            output,
            congress,
            uslm,
        } => {
            let config = resolve_config(scrape, output, congress, uslm)?;
            run_command(&config).map(|_| ())
        }
        Commands::Parse { file } => parse_command(&file),
        Commands::Text { file, mode } => text_command(&file, mode),
        Commands::Tags { scrape } => tags_command(&scrape),
    }
}

/// Environment settings, overridden by whatever flags were given.
fn resolve_config(
    scrape: Option<PathBuf>,
    output: Option<PathBuf>,
    congress: Vec<u32>,
    uslm: bool,
) -> Result<PipelineConfig> {
    let mut config = match scrape {
        Some(scrape) => PipelineConfig::from_lookup(|key| match key {
            SCRAPE_PATH_ENV => Some(scrape.display().to_string()),
            _ => std::env::var(key).ok(),
        })?,
        None => PipelineConfig::from_env()?,
    };

    if let Some(output) = output {
        config.output_path = output;
    }
    if !congress.is_empty() {
        config = config.with_congress_nums(congress);
    }
    if uslm {
        config = config.with_uslm(true);
    }

    Ok(config)
}

/// Execute the full pipeline.
///
/// A congress that cannot be processed or written is logged and counted
/// as failed; the remaining congresses still run.
pub fn run_command(config: &PipelineConfig) -> Result<RunReport> {
    println!(
        "{} {} into {}",
        style("Parsing").bold(),
        style(config.scrape_path.display()).cyan(),
        style(config.output_path.display()).green()
    );
    println!();

    let scanned = scan(config)?;
    println!(
        "  Found {} bill statuses and {} text versions in {} congresses",
        scanned.billstatus_count(),
        scanned.text_version_count(),
        scanned.congresses.len()
    );

    let pb = ProgressBar::new(scanned.congresses.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let mut report = RunReport::default();
    let mut files_written = 0;

    for (&congress_num, files) in &scanned.congresses {
        pb.set_message(format!("congress {congress_num}"));

        let written = process_congress(congress_num, files).and_then(|(output, processed)| {
            report.merge(processed);
            write_congress(&config.output_path, &output, config.include_uslm)
        });
        match written {
            Ok(paths) => {
                report.congresses.succeeded += 1;
                files_written += paths.len();
            }
            Err(e) => {
                error!(congress = congress_num, error = %e, "failed to process congress");
                report.congresses.failed += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    println!("  Congresses: {}", summary(&report.congresses));
    println!("  Bill statuses: {}", summary(&report.billstatus));
    println!("  Text versions: {}", summary(&report.text_versions));
    println!("  Joined bills: {}", summary(&report.unified));
    println!("  Text versions matched: {}", report.join.matched);
    if report.join.bills_without_text > 0 {
        println!(
            "  Bills without text: {}",
            style(report.join.bills_without_text).yellow()
        );
    }
    if !report.join.missing.is_empty() {
        println!(
            "  Declared versions not found: {}",
            style(report.join.missing_total()).yellow().bold()
        );
    }
    if !report.join.unrenderable.is_empty() {
        println!(
            "  Unrenderable text versions: {}",
            style(report.join.unrenderable_total()).yellow().bold()
        );
    }
    if !scanned.skipped.is_empty() {
        println!(
            "  Unrecognized files: {}",
            style(scanned.skipped.len()).yellow()
        );
    }

    println!();
    println!(
        "{} {} files in {}",
        style("Wrote").green().bold(),
        files_written,
        config.output_path.display()
    );

    Ok(report)
}

fn summary(batch: &BatchReport) -> String {
    let failed = if batch.failed > 0 {
        style(batch.failed).red().bold().to_string()
    } else {
        batch.failed.to_string()
    };
    format!(
        "{} ok, {} skipped, {} failed",
        style(batch.succeeded).green(),
        batch.skipped,
        failed
    )
}

fn parse_command(file: &Path) -> Result<()> {
    let xml = read_to_string(file)?;
    let billstatus = BillStatus::from_xml_str(xml.trim())?;
    println!("{}", serde_json::to_string_pretty(&billstatus)?);
    Ok(())
}

fn text_command(file: &Path, mode: TextMode) -> Result<()> {
    let xml = read_to_string(file)?;

    match mode {
        TextMode::Whole => println!("{}", extract_text(&xml)?),
        TextMode::Sections => println!("{}", extract_sectioned_text(&xml)?),
        TextMode::Body => match extract_body_text(&xml)? {
            Some(text) => println!("{text}"),
            None => eprintln!(
                "{} no legislative body in {}",
                style("Warning:").yellow().bold(),
                file.display()
            ),
        },
    }

    Ok(())
}

fn tags_command(scrape: &Path) -> Result<()> {
    let config = PipelineConfig::new(scrape, PathBuf::new());
    let scanned = scan(&config)?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut documents = 0;

    for file in scanned.congresses.values().flat_map(|c| &c.billstatus) {
        let counted = file
            .read_xml()
            .and_then(|xml| tag_counts([xml.as_str()]).map_err(PipelineError::from));
        match counted {
            Ok(doc_counts) => {
                documents += 1;
                for (tag, count) in doc_counts {
                    *counts.entry(tag).or_insert(0) += count;
                }
            }
            Err(e) => warn!(path = %file.scrape_path, error = %e, "skipping bill status"),
        }
    }

    let mut by_count: Vec<_> = counts.into_iter().collect();
    by_count.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    println!(
        "{} {} bill-status documents",
        style("Counted").bold(),
        style(documents).cyan()
    );
    for (tag, count) in by_count {
        println!("  {count:>8}  {tag}");
    }

    Ok(())
}
