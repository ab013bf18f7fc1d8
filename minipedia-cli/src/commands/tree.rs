//! Tree command implementation

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use minipedia_core::mangle::char_len;
use minipedia_core::{ArticleExtract, ArticleSection};

use crate::error::CliResult;

/// Arguments for the tree command
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Extract file to parse (marker-delimited plain text)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Print the serialized tree instead of an outline
    #[arg(long)]
    pub json: bool,
}

impl TreeArgs {
    /// Execute the tree command
    pub fn execute(&self) -> CliResult<()> {
        log::info!("Parsing article extract");
        log::debug!("Arguments: {:?}", self);

        let raw = fs::read_to_string(&self.input)
            .with_context(|| format!("reading {}", self.input.display()))?;
        let extract = ArticleExtract::parse(&raw)
            .with_context(|| format!("parsing {}", self.input.display()))?;

        if self.json {
            println!("{}", extract.to_json()?);
            return Ok(());
        }
        for section in extract.sections() {
            print_outline(section, 0);
        }
        Ok(())
    }
}

fn print_outline(section: &ArticleSection, depth: usize) {
    let pad = "  ".repeat(depth);
    let title = section.title().unwrap_or("(intro)");
    println!("{pad}{title} [{} chars]", char_len(section.text()));
    for sub in section.subsections() {
        print_outline(sub, depth + 1);
    }
}
