//! Error types for habaki-data

use habaki_core::TableId;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Fetch, parse and configuration errors
///
/// None of these are cached or retried; the next call fetches again.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document {0} is an empty array")]
    EmptyDocument(String),

    #[error("Cached table {0} has an unexpected row type")]
    TableType(TableId),

    #[error("Invalid configuration: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Invalid language preference in {}: {source}", .path.display())]
    Preference {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An error delivered to every caller waiting on the same fetch
    #[error(transparent)]
    Shared(Arc<Error>),
}

impl Error {
    /// The underlying error, looking through `Shared`
    ///
    /// Cache fills always hand out `Shared`, so match on this when the
    /// concrete cause matters.
    pub fn root(&self) -> &Error {
        match self {
            Error::Shared(inner) => inner.root(),
            other => other,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
