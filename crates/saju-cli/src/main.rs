//! Saju coach command-line application.
//!
//! One-shot commands for plan extraction, calendars and single model calls,
//! an interactive session shell, and an MCP server over stdio.

mod args;
mod cli;
mod mcp;
mod renderer;
mod repl;

use Commands::*;
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{SajuMcpServer, run_stdio_server};
use renderer::TerminalRenderer;
use repl::Repl;
use saju_core::{CoachBuilder, CoachConfig};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        api_key,
        model,
        no_color,
        command,
    } = Args::parse();

    let config = CoachConfig::from_env().context("Failed to load configuration")?;
    let coach = CoachBuilder::from_config(config)
        .with_api_key(api_key)
        .with_model(model)
        .build()
        .context("Failed to initialize coach")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Saju coach started");

    match command {
        Some(Extract(args)) => Cli::new(coach, renderer).extract(args),
        Some(Calendar(args)) => Cli::new(coach, renderer).calendar(args),
        Some(Elements(args)) => Cli::new(coach, renderer).elements(args),
        Some(Analyze(args)) => Cli::new(coach, renderer).analyze(args).await,
        Some(Ask(args)) => Cli::new(coach, renderer).ask(args).await,
        Some(Plan(args)) => Cli::new(coach, renderer).plan(args).await,
        Some(Serve) => run_stdio_server(SajuMcpServer::new(coach))
            .await
            .context("MCP server failed"),
        Some(Session) | None => Repl::new(coach, renderer).run().await,
    }
}
