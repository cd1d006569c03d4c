//! The full page generation pipeline.

use std::io::Write;

use anyhow::{Context, Result};

use crate::core::catalog::Catalog;
use crate::core::contract::ContractRepo;
use crate::ops::listing::build_listings;
use crate::ops::render::{PageRenderer, PageSummary};
use crate::resolver::resolve;
use crate::util::config::Config;

/// Read the contracts named by `config` and write the page to `out`.
///
/// Any missing or malformed contract aborts generation; nothing is
/// guaranteed about what was written before the error.
pub fn generate_page(config: &Config, out: &mut dyn Write) -> Result<PageSummary> {
    let repo = ContractRepo::new(&config.repository.path);
    tracing::info!("Reading contracts from {}", repo.root().display());

    let catalog = Catalog::discover(&repo, config)?;
    let compat = resolve(&repo, &catalog, config.match_mode)
        .context("failed to resolve image compatibility")?;
    let listings = build_listings(&repo, &catalog, &compat, config)
        .context("failed to load device contracts")?;

    let summary = PageRenderer::new(config, &compat, catalog.flavors()).render(&listings, out)?;
    out.flush()?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contract::ContractKind;
    use crate::test_support::fixtures::ContractRepoFixture;

    #[test]
    fn test_generate_sample_page() {
        let fixture = ContractRepoFixture::sample();
        let mut out = Vec::new();

        let summary = generate_page(&fixture.config(), &mut out).unwrap();
        let page = String::from_utf8(out).unwrap();

        assert_eq!(summary.sections, 3);
        assert!(page.contains("### ARM v7:"));
        assert!(page.contains("##### Raspberry Pi 3"));
    }

    #[test]
    fn test_idempotent() {
        let fixture = ContractRepoFixture::sample();
        let config = fixture.config();

        let mut first = Vec::new();
        let mut second = Vec::new();
        generate_page(&config, &mut first).unwrap();
        generate_page(&config, &mut second).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_stack_contract_aborts() {
        let fixture = ContractRepoFixture::sample();
        let mut config = fixture.config();
        config.catalog.languages = Some(vec!["python".into(), "rust".into()]);

        let mut out = Vec::new();
        let err = generate_page(&config, &mut out).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("failed to resolve image compatibility"));
        assert!(message.contains("stack contract `rust` not found"));
    }

    #[test]
    fn test_malformed_os_contract_aborts() {
        let fixture = ContractRepoFixture::sample().raw(ContractKind::Os, "ubuntu", "{ not json");

        let mut out = Vec::new();
        let err = generate_page(&fixture.config(), &mut out).unwrap_err();
        assert!(format!("{:#}", err).contains("malformed operating system contract `ubuntu`"));
    }

    #[test]
    fn test_os_contract_without_variants_aborts() {
        let fixture = ContractRepoFixture::sample().raw(
            ContractKind::Os,
            "ubuntu",
            r#"{"slug": "ubuntu", "data": {"arch": ["amd64"]}}"#,
        );

        let mut out = Vec::new();
        let err = generate_page(&fixture.config(), &mut out).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("failed to resolve image compatibility"));
        assert!(message.contains("operating system contract `ubuntu` has no usable `variants`"));
        assert!(!String::from_utf8(out).unwrap().contains("intel-nuc-ubuntu"));
    }
}
