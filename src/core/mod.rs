//! Core data structures for imageref.
//!
//! This module contains the types the pipeline is built from:
//! - Contract repository access and contract errors
//! - The catalog of devices, architectures, operating systems and languages
//! - Listings and the distro/flavor variants rendered per device

pub mod catalog;
pub mod contract;
pub mod listing;

pub use catalog::Catalog;
pub use contract::{ContractError, ContractKind, ContractRepo, DeviceContract};
pub use listing::{Distro, Flavor, Listing};
