//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// imageref - generate the base image reference page from contracts
#[derive(Parser)]
#[command(name = "imageref")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to ./imageref.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Contract repository root, overriding `repository.path`
    #[arg(long, global = true, env = "IMAGEREF_REPO", value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Clone or update the contract repository before running
    #[arg(long, global = true)]
    pub fetch: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the base image reference page
    Generate(GenerateArgs),

    /// Report every missing or malformed contract
    Check(CheckArgs),

    /// Clone or update the contract repository
    Fetch(FetchArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Write the page to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct FetchArgs {
    /// Branch to check out, overriding `repository.branch`
    #[arg(long)]
    pub branch: Option<String>,
}
