//! `imageref check` command

use anyhow::{bail, Result};

use super::GlobalOptions;
use crate::cli::CheckArgs;
use imageref::ops::check_contracts;
use imageref::util::diagnostic::emit;

pub fn execute(global: &GlobalOptions, args: CheckArgs) -> Result<()> {
    let config = global.prepare()?;
    let report = check_contracts(&config)?;

    for diagnostic in &report.diagnostics {
        emit(diagnostic, global.color);
    }

    let errors = report.errors();
    let warnings = report.warnings();
    let failing = if args.strict { errors + warnings } else { errors };

    if failing > 0 {
        bail!(
            "{} contract problem{} found ({} errors, {} warnings)",
            failing,
            if failing == 1 { "" } else { "s" },
            errors,
            warnings
        );
    }

    eprintln!(
        "     Checked {} contracts ({} warnings)",
        report.checked, warnings
    );
    Ok(())
}
