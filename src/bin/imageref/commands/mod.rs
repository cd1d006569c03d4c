//! Command implementations

pub mod check;
pub mod fetch;
pub mod generate;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::Cli;
use imageref::sources::ContractSource;
use imageref::Config;

/// Options shared by every command.
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub repo: Option<PathBuf>,
    pub fetch: bool,
    pub color: bool,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        GlobalOptions {
            config: cli.config.clone(),
            repo: cli.repo.clone(),
            fetch: cli.fetch,
            color: !cli.no_color,
        }
    }

    /// Load the configuration with command line overrides applied.
    pub fn load_config(&self) -> Result<Config> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let mut config = Config::discover(self.config.as_deref(), &cwd)?;

        if let Some(ref repo) = self.repo {
            config.repository.path = repo.clone();
        }

        Ok(config)
    }

    /// Load the configuration, fetching contracts first when `--fetch` is set.
    pub fn prepare(&self) -> Result<Config> {
        let config = self.load_config()?;
        if self.fetch {
            fetch::fetch_contracts(&ContractSource::from_config(&config.repository)?)?;
        }
        Ok(config)
    }
}
