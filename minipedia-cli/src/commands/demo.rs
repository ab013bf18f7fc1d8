//! Demo command implementation
//!
//! Runs the conversation worker against fixture articles with stdin as the
//! handset: plain lines are USSD input, `/more` simulates the inbound SMS
//! that requests the next content chunk, `/close` hangs the session up.
//! Outbound messages print as `USSD<` and `SMS<` blocks.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use minipedia_worker::{
    InMemoryExtractCache, InMemorySessionStore, InboundMessage, ReplyTransport, SessionEvent,
    TransportError, UssdWorker, WorkerConfig,
};

use crate::error::{CliError, CliResult};
use crate::fixture::FixtureClient;

/// Arguments for the demo command
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Fixture article set (JSON)
    #[arg(long, value_name = "FILE")]
    pub fixtures: PathBuf,

    /// Sender address of the simulated user
    #[arg(long, default_value = "+15551234567", value_name = "MSISDN")]
    pub from: String,

    /// Worker configuration overrides (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl DemoArgs {
    /// Execute the demo command
    pub fn execute(&self) -> CliResult<()> {
        log::info!("Starting demo conversation");
        log::debug!("Arguments: {:?}", self);

        let client = FixtureClient::from_path(&self.fixtures)?;
        let config = self.load_config()?;
        let mut worker = UssdWorker::new(
            config,
            Box::new(client),
            Box::new(InMemorySessionStore::new()),
            Box::new(InMemoryExtractCache::new()),
            Box::new(StdoutTransport),
        );

        println!(
            "Dialing in as {}. Plain lines are USSD input, /more requests the next SMS chunk, \
             /close hangs up, /quit exits.\n",
            self.from
        );
        let dial = InboundMessage::new(self.from.clone(), None).with_event(SessionEvent::New);
        worker.handle_ussd_message(&dial)?;

        for line in io::stdin().lock().lines() {
            let line = line.context("reading stdin")?;
            let input = line.trim();
            match input {
                "/quit" => break,
                "/close" => {
                    let msg = InboundMessage::new(self.from.clone(), None)
                        .with_event(SessionEvent::Close);
                    worker.handle_ussd_message(&msg)?;
                    println!("(session closed)\n");
                }
                "/more" => {
                    let msg = InboundMessage::new(self.from.clone(), Some("more".to_string()));
                    worker.handle_sms_message(&msg)?;
                }
                _ => {
                    let msg = InboundMessage::new(self.from.clone(), Some(input.to_string()));
                    worker.handle_ussd_message(&msg)?;
                }
            }
        }
        Ok(())
    }

    fn load_config(&self) -> CliResult<WorkerConfig> {
        let Some(path) = &self.config else {
            return Ok(WorkerConfig::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .map_err(|err| CliError::ConfigError(err.to_string()))?;
        Ok(config)
    }
}

/// Prints outbound messages instead of delivering them.
struct StdoutTransport;

impl ReplyTransport for StdoutTransport {
    fn reply(
        &mut self,
        to_addr: &str,
        text: &str,
        expect_reply: bool,
    ) -> Result<(), TransportError> {
        let tail = if expect_reply { "" } else { " (session over)" };
        println!("USSD< [{to_addr}]{tail}\n{text}\n");
        Ok(())
    }

    fn send_sms(&mut self, to_addr: &str, text: &str) -> Result<(), TransportError> {
        println!("SMS< [{to_addr}]\n{text}\n");
        Ok(())
    }
}
