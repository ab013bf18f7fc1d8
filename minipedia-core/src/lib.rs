//! Article section trees and message-sized content formatting
//!
//! This crate holds the text algorithms behind the minipedia front-end:
//! parsing the marker-delimited plain-text extracts MediaWiki produces into
//! a section tree, flattening sections back into display text, and fitting
//! that text into USSD/SMS-sized messages with resumable pagination.
//!
//! # Example
//!
//! ```
//! use minipedia_core::{ArticleExtract, ContentFormatter, Paginator};
//!
//! let raw = "intro text\n\u{FFFD}\u{FFFD}2\u{FFFD}\u{FFFD}History\nIt began long ago.";
//! let extract = ArticleExtract::parse(raw)?;
//! assert_eq!(extract.section_titles(), vec!["History"]);
//!
//! let formatter = ContentFormatter::new(160, 70);
//! let chunks: Vec<String> = Paginator::new(
//!     &formatter,
//!     "It began long ago.",
//!     " (more)",
//!     " (no more)",
//! )
//! .collect::<Result<_, _>>()?;
//! assert_eq!(chunks, vec!["It began long ago. (no more)"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod extract;
pub mod format;
pub mod mangle;

// Re-export key types
pub use error::{ExtractError, ExtractResult, FormatError, FormatResult};
pub use extract::{ArticleExtract, ArticleSection, SectionLevel};
pub use format::{ContentFormatter, Paginator};
pub use mangle::{convert_unicode, is_unicode, mangle_text, normalize_whitespace};
