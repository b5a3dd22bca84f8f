use std::path::PathBuf;

use congress_harvester::HarvesterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Harvester(#[from] HarvesterError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk scrape tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("legis_id mismatch: path says {path_id}, document says {document_id}")]
    LegisIdMismatch {
        path_id: String,
        document_id: String,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
