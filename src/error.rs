use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Message shown to the user whenever a load fails. Details go to the log.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load data. Check the catalog resource.";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog payload is not a JSON array of records: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid catalog location: {0}")]
    InvalidLocation(String),
}

impl LoadError {
    pub fn user_message(&self) -> &'static str { LOAD_ERROR_MESSAGE }
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
