#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared helpers for the hoist workspace.
//!
//! - [`utils`]: identifier casing and validation used when deriving type names
//! - [`Colors`]: ANSI palette for CLI output

mod colors;
pub mod utils;


pub use colors::Colors;
