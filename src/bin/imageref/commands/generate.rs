//! `imageref generate` command

use std::io::Write;

use anyhow::Result;

use super::GlobalOptions;
use crate::cli::GenerateArgs;
use imageref::ops::generate_page;
use imageref::util::fs::write_string;

pub fn execute(global: &GlobalOptions, args: GenerateArgs) -> Result<()> {
    let config = global.prepare()?;

    let summary = match args.output {
        Some(path) => {
            let mut page = Vec::new();
            let summary = generate_page(&config, &mut page)?;
            write_string(&path, &String::from_utf8_lossy(&page))?;
            eprintln!("       Wrote {}", path.display());
            summary
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            let summary = generate_page(&config, &mut stdout)?;
            stdout.flush()?;
            summary
        }
    };

    tracing::info!(
        "{} images for {} devices in {} sections ({} combinations unavailable)",
        summary.rows,
        summary.devices,
        summary.sections,
        summary.skipped
    );

    Ok(())
}
