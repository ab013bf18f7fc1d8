//! Minipedia CLI library
//!
//! Command-line front-end over the minipedia crates: inspect parsed article
//! trees, paginate text the way the messaging channels would, and drive the
//! full conversation worker against a canned article set.

pub mod commands;
pub mod error;
pub mod fixture;

pub use error::{CliError, CliResult};
