//! imageref - base image reference page generator
//!
//! This crate reads device, operating system and language stack contracts,
//! works out which combinations are compatible, and renders the markdown
//! page listing every available base image and its tags.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Test utilities for imageref unit tests.
///
/// Builds throwaway contract repositories on disk so the resolver, listing
/// builder and renderer can be exercised against real files.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    catalog::Catalog,
    contract::{ContractError, ContractKind, ContractRepo},
    listing::{Distro, Flavor, Listing},
};

pub use resolver::Compatibility;
pub use util::config::Config;
