//! Shared helpers for unit tests.

use crate::Document;
use crate::extract::{ExtractError, ExtractRequest};
use crate::parser::ast::VarDeclarator;
use crate::parser::{ParseResult, SyntaxPrinter, parse};

pub fn parse_ok(source: &str) -> ParseResult {
    let result = parse(source).expect("fuel");
    assert!(
        result.diagnostics.is_empty(),
        "unexpected syntax errors:\n{}",
        result.diagnostics.render(source)
    );
    result
}

/// CST dump without trivia; asserts the input is error-free.
pub fn dump_cst(source: &str) -> String {
    let result = parse_ok(source);
    SyntaxPrinter::new(result.root.as_cst()).dump()
}

/// CST dump of input that may contain syntax errors.
pub fn dump_cst_lossy(source: &str) -> String {
    let result = parse(source).expect("fuel");
    SyntaxPrinter::new(result.root.as_cst()).dump()
}

/// Filtered syntax errors, one plain line each.
pub fn syntax_errors(source: &str) -> String {
    let result = parse(source).expect("fuel");
    let filtered = result.diagnostics.filtered().sorted();
    assert!(!filtered.is_empty(), "expected syntax errors");
    filtered.printer().render()
}

/// Parsed and analyzed document; asserts the input is error-free.
pub fn doc(source: &str) -> Document {
    let doc = Document::parse(source).expect("fuel");
    assert!(
        doc.diagnostics().is_empty(),
        "unexpected errors:\n{}",
        doc.diagnostics().render(source)
    );
    doc
}

/// Syntax and semantic errors, one plain line each.
pub fn document_errors(source: &str) -> String {
    let doc = Document::parse(source).expect("fuel");
    doc.diagnostics().clone().sorted().printer().render()
}

/// `name: type` for every variable declarator, in document order.
pub fn declarator_types(source: &str) -> String {
    let doc = doc(source);
    doc.syntax()
        .descendants()
        .filter_map(VarDeclarator::cast)
        .map(|d| {
            let name = d.name().map(|t| t.text().to_string()).unwrap_or_default();
            format!("{}: {}", name, doc.model().describe_node(d.as_cst()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text after extracting the first candidate's type.
pub fn extract_text(source: &str, request: &ExtractRequest) -> String {
    doc(source)
        .extract(request)
        .expect("extraction applies")
        .text()
}

pub fn extract_err(source: &str, request: &ExtractRequest) -> ExtractError {
    doc(source)
        .extract(request)
        .expect_err("extraction must not apply")
}
