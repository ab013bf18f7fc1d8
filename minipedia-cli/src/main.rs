//! Command-line front-end for the minipedia USSD/SMS encyclopedia

use anyhow::Result;
use clap::Parser;

use minipedia_cli::commands::Commands;

/// Browse encyclopedia articles the way a feature phone would
#[derive(Debug, Parser)]
#[command(name = "minipedia", version, about)]
struct Cli {
    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);
    cli.command.execute()
}

fn init_logging(quiet: bool, verbose: u8) {
    if quiet {
        return;
    }
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}
