//! Hoist: extract anonymous record literals into named types.
//!
//! The engine ([`extract`]) is written against the [`extract::SemanticModel`]
//! trait. This crate also ships a reference host for a C#-like language
//! ([`parser`], [`semantic`]) and a [`Document`] facade tying them together.
//!
//! # Example
//!
//! ```
//! use hoist_lib::Document;
//!
//! let source = "class P { void M() { var point = new { X = 1, Y = 2 }; } }";
//! let doc = Document::parse(source).expect("out of fuel");
//! let extraction = doc.extract(&Default::default()).expect("applicable");
//! assert!(extraction.text().contains("new Point { X = 1, Y = 2 }"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod document;
pub mod extract;
pub mod parser;
pub mod semantic;

#[cfg(test)]
mod test_utils;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use document::{Document, FixAll};
pub use extract::{ExtractConfig, ExtractError, ExtractRequest, Extraction, RuleDescriptor};

/// Fatal front-end errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

pub type Result<T> = std::result::Result<T, Error>;
