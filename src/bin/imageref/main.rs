//! imageref CLI - base image reference page generator

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; stdout carries the page
    let filter = if cli.verbose {
        EnvFilter::new("imageref=debug")
    } else {
        EnvFilter::new("imageref=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let global = commands::GlobalOptions::from_cli(&cli);

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(&global, args),
        Commands::Check(args) => commands::check::execute(&global, args),
        Commands::Fetch(args) => commands::fetch::execute(&global, args),
    }
}
