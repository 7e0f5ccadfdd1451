//! Rill - asset pipeline and dev server for static sites.

mod cli;
mod config;
mod core;
mod embed;
mod graph;
mod logger;
mod reload;
mod resolve;
mod serve;
mod task;
mod transform;
mod utils;
mod watch;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PipelineConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = PipelineConfig::load(&cli)?;

    match &cli.command {
        None | Some(Commands::Dev { .. }) => cli::dev::run(&config),
        Some(Commands::Build) => cli::build::run(&config),
        Some(Commands::Preview { .. }) => cli::preview::run(&config),
        Some(Commands::Init { name }) => cli::init::run(name.as_deref()),
    }
}
