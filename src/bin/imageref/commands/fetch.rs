//! `imageref fetch` command

use anyhow::Result;

use super::GlobalOptions;
use crate::cli::FetchArgs;
use imageref::sources::ContractSource;

pub fn execute(global: &GlobalOptions, args: FetchArgs) -> Result<()> {
    let mut config = global.load_config()?;
    if let Some(branch) = args.branch {
        config.repository.branch = branch;
    }

    let source = ContractSource::from_config(&config.repository)?;
    fetch_contracts(&source)
}

/// Clone or update the checkout and report the commit.
pub fn fetch_contracts(source: &ContractSource) -> Result<()> {
    let commit = source.fetch()?;
    eprintln!(
        "     Fetched {} at {}",
        source.checkout_path().display(),
        &commit[..commit.len().min(12)]
    );
    Ok(())
}
