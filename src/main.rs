//! Inkpot - a live compile-and-preview studio for Ink stories.

mod actor;
mod cli;
mod compiler;
mod config;
mod core;
mod document;
mod embed;
mod export;
mod logger;
mod preview;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{StudioConfig, init_config};

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

    let config = init_config(StudioConfig::load(&cli)?);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve(&config),
        Commands::Export { args } => cli::export::run_export(args, &config),
        Commands::Check { args } => cli::check::run_check(args, &config),
    }
}
