//! Name allocation for extracted types.

use hoist_core::utils::{is_identifier, to_pascal_case};
use indexmap::IndexSet;

use crate::parser::SyntaxKind;
use crate::parser::lexer::lex;

use super::config::{ExtractConfig, NamingStrategy};
use super::detect::CandidateSite;
use super::error::{ExtractError, Result};

/// Smallest free name: `base`, then `base1`, `base2`, ...
///
/// `existing` holds every name the new type must avoid. Deterministic for
/// the same inputs.
pub fn allocate(base: &str, existing: &IndexSet<String>) -> Result<String> {
    if !is_type_name(base) {
        return Err(ExtractError::InvalidTypeName(base.to_string()));
    }
    if !existing.contains(base) {
        return Ok(base.to_string());
    }
    (1..=u32::MAX)
        .map(|suffix| format!("{}{}", base, suffix))
        .find(|candidate| !existing.contains(candidate))
        .ok_or_else(|| ExtractError::NameAllocationExhausted(base.to_string()))
}

/// Base name for a new type.
///
/// An explicit name wins. Otherwise the first declared variable among
/// `sites` names the type, unless the strategy is fixed.
pub fn base_name(explicit: Option<&str>, config: &ExtractConfig, sites: &[CandidateSite]) -> String {
    if let Some(name) = explicit {
        return name.to_string();
    }
    if config.naming == NamingStrategy::Fixed {
        return config.fallback_name.clone();
    }
    sites
        .iter()
        .find_map(CandidateSite::variable_name)
        .map(|v| to_pascal_case(&v))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| config.fallback_name.clone())
}

/// An identifier that is not a keyword of the host language.
fn is_type_name(name: &str) -> bool {
    if !is_identifier(name) {
        return false;
    }
    matches!(lex(name).as_slice(), [token] if token.kind == SyntaxKind::Id)
}
