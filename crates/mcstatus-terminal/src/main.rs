mod command;
mod config;
mod error;
mod interpreter;
mod logging;
mod plain;
mod session;
mod tui;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mcstatus_sdk::{
    DescriptionGenerator, GeminiClient, GeminiConfig, StatusClient, UnavailableGenerator,
};
use tracing::{info, warn};

use crate::config::TerminalConfig;
use crate::interpreter::Interpreter;
use crate::logging::LogTarget;

#[derive(Parser, Debug)]
#[command(name = "mcstatus-terminal")]
#[command(author, version, about = "Minecraft server status terminal", long_about = None)]
pub struct Cli {
    /// Status lookup API root (overrides STATUS_API_URL)
    #[arg(long)]
    pub status_api_url: Option<String>,

    /// Gemini model used by `describe` (overrides GEMINI_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Read commands from stdin and print the transcript to stdout
    #[arg(long)]
    pub plain: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Spinner tick interval in milliseconds
    #[arg(long, default_value_t = 250)]
    pub tick_rate: u64,
}

/// A generator that can actually answer, or one that explains why not.
fn build_generator(config: GeminiConfig) -> Box<dyn DescriptionGenerator> {
    match GeminiClient::new(config) {
        Ok(client) => {
            info!(model = %client.model_name(), "description generator ready");
            Box::new(client)
        }
        Err(err) => {
            warn!(error = %err, "description generator unavailable, `describe` will fail");
            Box::new(UnavailableGenerator::new(err.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&LogTarget::select(cli.log_file.clone(), cli.plain))?;

    let mut config = TerminalConfig::from_env();
    if let Some(url) = cli.status_api_url {
        config.status_api_url = url;
    }
    if let Some(model) = cli.model {
        config.gemini.model = model;
    }
    info!(
        status_api_url = %config.status_api_url,
        model = %config.gemini.model,
        plain = cli.plain,
        "starting"
    );

    let lookup = StatusClient::new(&config.status_api_url).context("invalid status API URL")?;
    let interpreter = Interpreter::new(lookup, build_generator(config.gemini));

    if cli.plain {
        plain::run(interpreter).await
    } else {
        ui::run(interpreter, cli.tick_rate).await
    }
}
