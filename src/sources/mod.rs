//! Contract sources.
//!
//! The contract repository is normally a git checkout kept next to the
//! documentation; this module keeps it up to date.

pub mod git;

pub use git::ContractSource;
