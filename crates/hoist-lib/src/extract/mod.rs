//! Extraction of anonymous types into named declarations.
//!
//! The engine only talks to its host through [`SemanticModel`]:
//!
//! - [`detect`] finds candidate sites (anonymous creations with structural types)
//! - [`shape`] lists the data members of a structural type
//! - [`allocate`] picks a collision-free name in the target namespace
//! - [`synthesize`] builds the declaration as green nodes
//! - [`rewrite`] turns matching creations into `new Name { ... }`
//! - [`extract`] composes all of the above and inserts the declaration
//!
//! Every step works on immutable `rowan` trees and returns a new tree, so
//! requests against the same snapshot are independent.

mod analyzer;
mod cancel;
mod config;
mod detect;
mod error;
mod model;
mod naming;
mod orchestrator;
mod rewrite;
mod shape;
mod synthesize;

#[cfg(test)]
mod rewrite_tests;
#[cfg(test)]
mod synthesize_tests;

pub use analyzer::analyze;
pub use cancel::CancellationToken;
pub use config::{ExtractConfig, MemberStyle, NamingStrategy, RuleDescriptor};
pub use detect::{CandidateSite, SiteKind, detect};
pub use error::{ExtractError, Result, Unsupported};
pub use model::{MemberKind, ScopeContext, SemanticModel, TypeMember};
pub use naming::{allocate, base_name};
pub use orchestrator::{
    ExtractRequest, Extraction, ExtractionPlan, extract, extract_at, plan, plan_at_site,
};
pub use rewrite::{Rewrite, rewrite};
pub use shape::{MemberDescriptor, shape};
pub use synthesize::{Layout, synthesize};
