//! Test utilities for imageref unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::fixtures::ContractRepoFixture;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = ContractRepoFixture::new()
//!         .os("debian", &["amd64"], &["bookworm"])
//!         .device("intel-nuc", "Intel NUC", "amd64");
//!
//!     let repo = fixture.repo();
//!     // Resolve, build listings, render...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
