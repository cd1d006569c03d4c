//! The catalog of everything the page enumerates.
//!
//! Each list comes from the configuration when it is set there, otherwise
//! from the contract repository's directory listing. Architectures default
//! to the architectures that have a page section.

use anyhow::{Context, Result};

use crate::core::contract::{ContractKind, ContractRepo};
use crate::core::listing::Flavor;
use crate::util::config::Config;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub devices: Vec<String>,
    pub architectures: Vec<String>,
    pub operating_systems: Vec<String>,
    pub languages: Vec<String>,
}

impl Catalog {
    /// Build the catalog from configuration, falling back to the repository.
    pub fn discover(repo: &ContractRepo, config: &Config) -> Result<Self> {
        let listed = |explicit: &Option<Vec<String>>, kind: ContractKind| -> Result<Vec<String>> {
            match explicit {
                Some(names) => Ok(names.clone()),
                None => repo
                    .list(kind)
                    .with_context(|| format!("failed to enumerate {} contracts", kind)),
            }
        };

        let catalog = Catalog {
            devices: listed(&config.catalog.devices, ContractKind::DeviceType)?,
            architectures: config
                .catalog
                .architectures
                .clone()
                .unwrap_or_else(|| config.header_arches().map(str::to_string).collect()),
            operating_systems: listed(&config.catalog.operating_systems, ContractKind::Os)?,
            languages: listed(&config.catalog.languages, ContractKind::Stack)?,
        };

        tracing::debug!(
            "catalog: {} devices, {} architectures, {} operating systems, {} languages",
            catalog.devices.len(),
            catalog.architectures.len(),
            catalog.operating_systems.len(),
            catalog.languages.len()
        );

        Ok(catalog)
    }

    /// Language flavors in render order, base image first.
    pub fn flavors(&self) -> Vec<Flavor> {
        std::iter::once(Flavor::Base)
            .chain(self.languages.iter().cloned().map(Flavor::Language))
            .collect()
    }
}
