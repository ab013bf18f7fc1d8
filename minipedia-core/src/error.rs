//! Error types for extract parsing and content formatting

use thiserror::Error;

/// Errors raised while building an article tree from raw extract text
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A marker-delimited segment did not match the section shape
    #[error("malformed section {index}: {snippet:?}")]
    MalformedSection {
        /// 1-based position of the segment among the marker-delimited ones
        index: usize,
        /// Leading characters of the offending segment
        snippet: String,
    },

    /// A serialized tree could not be decoded
    #[error("invalid serialized extract: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Errors raised while fitting content into a message
#[derive(Error, Debug)]
pub enum FormatError {
    /// The fixed decorations alone exceed the message limit
    #[error("ellipsis and postfix need {needed} characters but the limit is {limit}")]
    PostfixTooLong {
        /// Characters taken up by the ellipsis plus the postfix
        needed: usize,
        /// The applicable message limit
        limit: usize,
    },
}

/// Result type for extract operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type for formatting operations
pub type FormatResult<T> = std::result::Result<T, FormatError>;
