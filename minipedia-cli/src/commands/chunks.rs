//! Chunks command implementation

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use minipedia_core::{normalize_whitespace, ContentFormatter, Paginator};

use crate::error::CliResult;

/// Arguments for the chunks command
#[derive(Debug, Args)]
pub struct ChunksArgs {
    /// Text file to paginate
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Message budget for GSM-compatible text
    #[arg(long, default_value_t = 160)]
    pub ascii_limit: usize,

    /// Message budget once the text contains non-ASCII characters
    #[arg(long, default_value_t = 70)]
    pub unicode_limit: usize,

    /// Suffix for chunks with more to follow
    #[arg(long, default_value = " (reply for more)")]
    pub more: String,

    /// Suffix for the final chunk
    #[arg(long, default_value = " (end of section)")]
    pub no_more: String,

    /// Sentence-break window near the cut; 0 disables
    #[arg(long, default_value_t = 10)]
    pub sentence_break: usize,
}

impl ChunksArgs {
    /// Execute the chunks command
    pub fn execute(&self) -> CliResult<()> {
        log::info!("Paginating content");
        log::debug!("Arguments: {:?}", self);

        let raw = fs::read_to_string(&self.input)
            .with_context(|| format!("reading {}", self.input.display()))?;
        let content = normalize_whitespace(&raw);

        let formatter = ContentFormatter::new(self.ascii_limit, self.unicode_limit)
            .sentence_break_threshold(self.sentence_break);
        let pager = Paginator::new(&formatter, &content, &self.more, &self.no_more);
        for (index, chunk) in pager.enumerate() {
            println!("{:>3}: {}", index + 1, chunk?);
        }
        Ok(())
    }
}
