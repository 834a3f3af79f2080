//! Front end for the host language: a C#-like subset with classes, structs,
//! properties, methods, lambdas, and object/array/anonymous creation.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy lexing: tokens carry spans, text is sliced only when building tree nodes
//! - Trivia buffering: whitespace and comments are collected, then attached as leading trivia
//! - Checkpoint-based wrapping: binary operators, postfix forms and member kinds are
//!   wrapped retroactively once the parser knows what it is looking at
//! - Explicit recovery sets: per-production sets decide when to bail vs consume
//!
//! Losslessness matters downstream: the extraction engine rewrites green nodes in place
//! and relies on `root.to_string()` reproducing every untouched byte.
//!
//! # Recovery Strategy
//!
//! The parser always produces a tree:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume
//! 3. Recovery sets define synchronization points per production
//! 4. On recursion limit, remaining input goes into a single Error node
//!
//! Fuel exhaustion (exec fuel, recursion fuel) returns an actual error.

pub mod ast;
pub mod cst;
pub mod lexer;
pub mod printer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod lexer_tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::{AnonMember, AnonObjectCreation, Expr, Item, Member, Root, Stmt, Type, TypeDecl};

pub use core::{ParseResult, Parser};
pub use printer::SyntaxPrinter;

use crate::Error;
use lexer::lex;

pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
pub const DEFAULT_RECURSION_FUEL: u32 = 512;

/// Main entry point with default fuel limits. Returns `Err` only on fuel exhaustion;
/// syntax errors are reported through `ParseResult::diagnostics`.
pub fn parse(source: &str) -> Result<ParseResult, Error> {
    Parser::new(source, lex(source))
        .with_exec_fuel(Some(DEFAULT_EXEC_FUEL))
        .with_recursion_fuel(Some(DEFAULT_RECURSION_FUEL))
        .parse()
}
