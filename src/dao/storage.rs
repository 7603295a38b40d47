use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by the player store when a snapshot cannot be committed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The registry could not be encoded as JSON.
    #[error("failed to encode player registry")]
    Encode(#[source] serde_json::Error),
    /// Writing or syncing the temporary snapshot failed.
    #[error("failed to write snapshot `{}`", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Replacing the canonical file with the new snapshot failed.
    #[error("failed to replace `{}`", .path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The canonical document exists but is not a JSON object.
    #[error("player registry `{}` is not valid JSON", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The backing location cannot be read.
    #[error("storage unavailable at `{}`", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
