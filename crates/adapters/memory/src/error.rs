//! Memory adapter error types.

use std::path::PathBuf;

use carehub_domain::error::CareHubError;

/// Errors specific to the in-memory backend.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The fixture file could not be read.
    #[error("failed to read fixture {path}")]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fixture is not valid JSON.
    #[error("failed to parse fixture")]
    FixtureParse(#[source] serde_json::Error),

    /// The fixture parsed but does not map table names to arrays of records.
    #[error("invalid fixture: {0}")]
    FixtureShape(String),

    /// The requested table is not known to the backend.
    #[error("table {0:?} does not exist")]
    UnknownTable(String),
}

impl From<MemoryError> for CareHubError {
    fn from(err: MemoryError) -> Self {
        CareHubError::Transport(Box::new(err))
    }
}
