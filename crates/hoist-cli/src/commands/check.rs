//! Report syntax errors and extractable anonymous types.

use std::path::PathBuf;

use hoist_lib::diagnostics::DiagnosticReport;
use hoist_lib::{Diagnostics, Document, RuleDescriptor};
use serde::Serialize;

use super::parse_or_exit;
use super::source_loader::load_or_exit;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct CheckArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub format: OutputFormat,
    pub color: bool,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    source: &'a str,
    rule: RuleInfo<'a>,
    errors: usize,
    diagnostics: Vec<DiagnosticReport>,
}

#[derive(Serialize)]
struct RuleInfo<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
}

pub fn run(args: CheckArgs) {
    let source = load_or_exit(args.source_path.as_deref(), args.source_text.as_deref());
    let doc = parse_or_exit(source.text);

    let rule = RuleDescriptor::default();
    let diagnostics = findings(&doc, &rule);
    tracing::debug!(
        findings = diagnostics.len(),
        errors = diagnostics.error_count(),
        "check finished"
    );

    match args.format {
        OutputFormat::Text => print_text(&diagnostics, doc.source(), &source.name, args.color),
        OutputFormat::Json => print_json(&diagnostics, doc.source(), &source.name, &rule),
    }

    if diagnostics.has_errors() {
        std::process::exit(1);
    }
}

/// Syntax and semantic errors plus one finding per extractable site, in source order.
pub fn findings(doc: &Document, rule: &RuleDescriptor) -> Diagnostics {
    let mut diagnostics = doc.diagnostics().clone();
    diagnostics.extend(doc.analyze(rule));
    diagnostics.sorted()
}

fn print_text(diagnostics: &Diagnostics, text: &str, name: &str, color: bool) {
    if diagnostics.is_empty() {
        return;
    }
    print!(
        "{}",
        diagnostics
            .printer()
            .source(text)
            .path(name)
            .colored(color)
            .render()
    );
}

pub fn json_report(
    diagnostics: &Diagnostics,
    text: &str,
    name: &str,
    rule: &RuleDescriptor,
) -> serde_json::Result<String> {
    let report = CheckReport {
        source: name,
        rule: RuleInfo {
            id: &rule.id,
            title: &rule.title,
            category: &rule.category,
        },
        errors: diagnostics.error_count(),
        diagnostics: diagnostics.to_reports(text),
    };
    serde_json::to_string_pretty(&report)
}

fn print_json(diagnostics: &Diagnostics, text: &str, name: &str, rule: &RuleDescriptor) {
    match json_report(diagnostics, text, name, rule) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}
