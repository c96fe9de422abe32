//! Error types for the sync module

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Stored value is not a `{ "fen": ... }` record
    #[error("Malformed shared game record: {0}")]
    MalformedRecord(#[from] serde_json::Error),

    /// The host's property space is gone
    #[error("Host property space unavailable")]
    HostUnavailable,
}

pub type SyncResult<T> = Result<T, SyncError>;
