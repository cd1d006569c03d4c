//! Contract repository checks.
//!
//! Page generation stops at the first bad contract. `check` instead loads
//! everything the page would load and reports each problem it finds.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::Value;

use crate::core::catalog::Catalog;
use crate::core::contract::{ContractError, ContractKind, ContractRepo};
use crate::resolver::{extract_tags, FALLBACK_OS, HOST_OS};
use crate::util::config::Config;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Outcome of a contract check.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub diagnostics: Vec<Diagnostic>,
    pub checked: usize,
}

impl CheckReport {
    pub fn errors(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warnings(&self) -> usize {
        self.diagnostics.len() - self.errors()
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Check every contract the page depends on.
pub fn check_contracts(config: &Config) -> Result<CheckReport> {
    let repo = ContractRepo::new(&config.repository.path);
    let catalog = Catalog::discover(&repo, config)?;
    let mut report = CheckReport::default();

    for os in &catalog.operating_systems {
        report.checked += 1;
        match repo.read_json::<Value>(ContractKind::Os, os) {
            Ok(contract) if os != HOST_OS => {
                if let Err(e) = extract_tags(os, &contract) {
                    report.push(contract_diagnostic(&repo, ContractKind::Os, os, &e));
                }
            }
            Ok(_) => {}
            Err(e) => report.push(contract_diagnostic(&repo, ContractKind::Os, os, &e)),
        }
    }

    for lang in &catalog.languages {
        report.checked += 1;
        if let Err(e) = repo.read_raw(ContractKind::Stack, lang) {
            report.push(contract_diagnostic(&repo, ContractKind::Stack, lang, &e));
        }
    }

    for device in &catalog.devices {
        if config.is_excluded(device) {
            continue;
        }
        if !repo.has_contract_dir(ContractKind::DeviceType, device) {
            report.push(
                Diagnostic::warning(format!("device `{}` has no contract directory", device))
                    .with_location(repo.contract_dir(ContractKind::DeviceType, device))
                    .with_context("the device will be left off the page"),
            );
            continue;
        }

        report.checked += 1;
        match repo.read_device(device) {
            Ok(contract) if !catalog.architectures.contains(&contract.data.arch) => {
                report.push(
                    Diagnostic::warning(format!(
                        "device `{}` has architecture `{}` with no page section",
                        device, contract.data.arch
                    ))
                    .with_location(repo.contract_path(ContractKind::DeviceType, device))
                    .with_suggestion(suggestions::EXCLUDE_DEVICE),
                );
            }
            Ok(_) => {}
            Err(e) => {
                report.push(contract_diagnostic(&repo, ContractKind::DeviceType, device, &e))
            }
        }
    }

    check_tag_overrides(&repo, &catalog, config, &mut report);

    Ok(report)
}

/// Overrides that can never remove a tag: the OS has no tag list of its own,
/// its contract does not load, or it does not publish the named tag.
fn check_tag_overrides(
    repo: &ContractRepo,
    catalog: &Catalog,
    config: &Config,
    report: &mut CheckReport,
) {
    for (arch, by_os) in &config.incompatible {
        for (os, tag) in by_os {
            if os == HOST_OS || !catalog.operating_systems.contains(os) {
                report.push(
                    Diagnostic::warning(format!(
                        "tag override `{}` for {} on {} never applies",
                        tag, os, arch
                    ))
                    .with_context(format!(
                        "`{}` has no tag list; its rows use the {} tags",
                        os, FALLBACK_OS
                    ))
                    .with_suggestion(suggestions::FIX_OVERRIDE),
                );
                continue;
            }

            let tags = repo
                .read_json::<Value>(ContractKind::Os, os)
                .and_then(|contract| extract_tags(os, &contract));
            match tags {
                Ok(tags) if !tags.contains(tag) => report.push(
                    Diagnostic::warning(format!(
                        "tag override `{}` for {} on {} matches no tag",
                        tag, os, arch
                    ))
                    .with_context(format!("{} tags: {}", os, tags.join(", ")))
                    .with_suggestion(suggestions::FIX_OVERRIDE),
                ),
                Ok(_) => {}
                Err(e) => report.push(
                    Diagnostic::warning(format!(
                        "tag override `{}` for {} on {} cannot be checked",
                        tag, os, arch
                    ))
                    .with_location(contract_location(repo, ContractKind::Os, os, &e))
                    .with_context(e.to_string()),
                ),
            }
        }
    }
}

/// The file an error points at, or the contract's expected path.
fn contract_location(
    repo: &ContractRepo,
    kind: ContractKind,
    name: &str,
    err: &ContractError,
) -> PathBuf {
    err.path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| repo.contract_path(kind, name))
}

fn contract_diagnostic(
    repo: &ContractRepo,
    kind: ContractKind,
    name: &str,
    err: &ContractError,
) -> Diagnostic {
    let mut diag =
        Diagnostic::error(err.to_string()).with_location(contract_location(repo, kind, name, err));

    match err {
        ContractError::Missing { .. } => {
            diag = diag.with_suggestion(suggestions::FETCH_CONTRACTS);
        }
        ContractError::Malformed { source, .. } => {
            diag = diag.with_context(source.to_string());
        }
        ContractError::Io { source, .. } => {
            diag = diag.with_context(source.to_string());
        }
        ContractError::MissingField { .. } => {}
    }

    diag
}
