//! Listing builder: one record per device on the page.

use anyhow::Result;

use crate::core::catalog::Catalog;
use crate::core::contract::{ContractKind, ContractRepo};
use crate::core::listing::Listing;
use crate::resolver::Compatibility;
use crate::util::config::Config;

/// Build listings in catalog order.
///
/// Excluded devices and devices without a contract directory are skipped.
/// A device whose directory exists but whose contract is missing or
/// malformed is an error.
pub fn build_listings(
    repo: &ContractRepo,
    catalog: &Catalog,
    compat: &Compatibility,
    config: &Config,
) -> Result<Vec<Listing>> {
    let mut listings = Vec::new();

    for device in &catalog.devices {
        if config.is_excluded(device) {
            tracing::debug!("skipping excluded device {}", device);
            continue;
        }

        if !repo.has_contract_dir(ContractKind::DeviceType, device) {
            tracing::debug!("skipping {}: no device contract", device);
            continue;
        }

        let contract = repo.read_device(device)?;
        let distros = compat.distros_for(&contract.data.arch).to_vec();

        listings.push(Listing {
            id: contract.slug,
            name: contract.name,
            arch: contract.data.arch,
            distros,
        });
    }

    tracing::debug!("{} device listings", listings.len());
    Ok(listings)
}
