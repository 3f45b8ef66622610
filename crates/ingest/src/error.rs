use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the job before any country is processed.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot read country list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("country list is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("country list must be a JSON object or array of names, found {0}")]
    Shape(&'static str),
}
