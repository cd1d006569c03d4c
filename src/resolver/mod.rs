//! Compatibility resolution.
//!
//! Works out three maps from the raw contracts:
//! - architecture -> distros that can be built for it
//! - language -> architectures and operating systems it cannot run on
//! - operating system -> published tags
//!
//! Compatibility is decided by looking for identifiers in the raw contract
//! text (see [`MatchMode`]), not by reading structured fields.

pub mod matching;
pub mod tags;

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::core::catalog::Catalog;
use crate::core::contract::{ContractError, ContractKind, ContractRepo};
use crate::core::listing::{Distro, Flavor};

pub use matching::MatchMode;
pub use tags::{extract_tags, LATEST};

/// OS whose contract is not an image flavor and gets no tag list.
pub const HOST_OS: &str = "resinos";

/// OS whose tags are shown when a distro has no tag list of its own.
pub const FALLBACK_OS: &str = "debian";

/// Where a language cannot be used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Incompatibility {
    pub architectures: BTreeSet<String>,
    pub operating_systems: BTreeSet<String>,
}

impl Incompatibility {
    /// Whether images for `arch`/`distro` cannot carry this language.
    pub fn excludes(&self, arch: &str, distro: &Distro) -> bool {
        self.architectures.contains(arch)
            || distro
                .os()
                .is_some_and(|os| self.operating_systems.contains(os))
    }
}

/// Result of resolving the contract repository.
#[derive(Debug, Clone, Default)]
pub struct Compatibility {
    pub arch_distros: BTreeMap<String, Vec<Distro>>,
    pub incompatible: BTreeMap<String, Incompatibility>,
    pub os_tags: BTreeMap<String, Vec<String>>,
}

impl Compatibility {
    /// Distros for `arch`; empty for an architecture outside the catalog.
    pub fn distros_for(&self, arch: &str) -> &[Distro] {
        self.arch_distros.get(arch).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tags for a distro together with the OS they were taken from.
    ///
    /// Distros without a tag list of their own (no OS, or an OS such as
    /// `resinos`) use the `debian` tags.
    pub fn tags_for(&self, distro: &Distro) -> Option<(&str, &[String])> {
        distro
            .os()
            .and_then(|os| self.os_tags.get_key_value(os))
            .or_else(|| self.os_tags.get_key_value(FALLBACK_OS))
            .map(|(os, tags)| (os.as_str(), tags.as_slice()))
    }

    /// Whether the row for `flavor` on `arch`/`distro` must be left out.
    pub fn is_incompatible(&self, flavor: &Flavor, arch: &str, distro: &Distro) -> bool {
        flavor
            .language()
            .and_then(|lang| self.incompatible.get(lang))
            .is_some_and(|inc| inc.excludes(arch, distro))
    }
}

/// Resolve compatibility for everything in `catalog`.
pub fn resolve(repo: &ContractRepo, catalog: &Catalog, mode: MatchMode) -> Result<Compatibility> {
    let mut os_text = BTreeMap::new();
    for os in &catalog.operating_systems {
        os_text.insert(os.as_str(), repo.read_raw(ContractKind::Os, os)?);
    }

    let mut arch_distros = BTreeMap::new();
    for arch in &catalog.architectures {
        let mut distros = vec![Distro::Unspecified];
        for os in &catalog.operating_systems {
            if mode.mentions(&os_text[os.as_str()], arch) {
                distros.push(Distro::Os(os.clone()));
            }
        }
        tracing::debug!("{}: {} distros", arch, distros.len() - 1);
        arch_distros.insert(arch.clone(), distros);
    }

    let mut os_tags = BTreeMap::new();
    for os in catalog.operating_systems.iter().filter(|os| *os != HOST_OS) {
        let contract: Value = serde_json::from_str(&os_text[os.as_str()]).map_err(|source| {
            ContractError::Malformed {
                kind: ContractKind::Os,
                name: os.clone(),
                path: repo.contract_path(ContractKind::Os, os),
                source,
            }
        })?;
        let tags = extract_tags(os, &contract)?;
        tracing::debug!("{} tags: {}", os, tags.join(", "));
        os_tags.insert(os.clone(), tags);
    }

    let mut incompatible = BTreeMap::new();
    for lang in &catalog.languages {
        let text = repo
            .read_raw(ContractKind::Stack, lang)
            .with_context(|| format!("failed to resolve language `{}`", lang))?;

        let inc = Incompatibility {
            architectures: catalog
                .architectures
                .iter()
                .filter(|arch| !mode.mentions(&text, arch))
                .cloned()
                .collect(),
            operating_systems: os_tags
                .keys()
                .filter(|os| !mode.mentions(&text, os))
                .cloned()
                .collect(),
        };

        if !inc.architectures.is_empty() || !inc.operating_systems.is_empty() {
            tracing::debug!(
                "{} unavailable on [{}] [{}]",
                lang,
                inc.architectures.iter().cloned().collect::<Vec<_>>().join(", "),
                inc.operating_systems.iter().cloned().collect::<Vec<_>>().join(", ")
            );
        }
        incompatible.insert(lang.clone(), inc);
    }

    Ok(Compatibility {
        arch_distros,
        incompatible,
        os_tags,
    })
}
