//! High-level operations.
//!
//! This module contains the implementation of imageref commands.

pub mod check;
pub mod generate;
pub mod listing;
pub mod render;

pub use check::{check_contracts, CheckReport};
pub use generate::generate_page;
pub use listing::build_listings;
pub use render::{PageRenderer, PageSummary, Row};
