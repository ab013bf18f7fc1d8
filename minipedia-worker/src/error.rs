//! Worker-level errors and the collaborator error types

use minipedia_core::{ExtractError, FormatError};
use thiserror::Error;

/// Failure reported by an encyclopedia client
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ClientError(pub String);

/// Failure reported by a session store or extract cache
#[derive(Error, Debug)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Failure reported by a reply transport
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Anything that can go wrong while processing one inbound message
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The encyclopedia client failed
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// The session store or extract cache failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The reply transport failed
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// An article extract could not be parsed or decoded
    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Content could not be fitted into a message
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// A stored session is missing data its state requires
    #[error("invalid session: {0}")]
    InvalidSession(&'static str),
}

/// Result type for worker operations
pub type Result<T> = std::result::Result<T, WorkerError>;
