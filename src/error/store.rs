use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Failures of the on-disk credential store.
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("failed to access credential file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("credential file {path} is not a valid credential: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize credential: {0}")]
    Serialize(#[from] serde_json::Error),
}
