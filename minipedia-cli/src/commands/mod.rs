//! CLI command implementations

use clap::Subcommand;

use crate::error::CliResult;

pub mod chunks;
pub mod demo;
pub mod tree;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse an article extract and print its section tree
    Tree(tree::TreeArgs),

    /// Paginate a text file into message-sized chunks
    Chunks(chunks::ChunksArgs),

    /// Drive the conversation worker interactively over fixture articles
    Demo(demo::DemoArgs),
}

impl Commands {
    /// Run the selected command.
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Tree(args) => args.execute(),
            Commands::Chunks(args) => args.execute(),
            Commands::Demo(args) => args.execute(),
        }
    }
}
