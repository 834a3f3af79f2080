//! Tests for CLI dispatch: arguments parse and land in the right params.

use std::path::PathBuf;

use hoist_lib::extract::MemberStyle;

use super::*;
use crate::cli::commands::{ast_command, check_command, extract_command};
use crate::commands::check::OutputFormat;
use crate::commands::cursor::Cursor;

#[test]
fn cli_definition_is_consistent() {
    build_cli().debug_assert();
}

#[test]
fn check_defaults() {
    let m = check_command()
        .try_get_matches_from(["check", "Order.cs"])
        .expect("parses");
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.source_path, Some(PathBuf::from("Order.cs")));
    assert_eq!(params.source_text, None);
    assert_eq!(params.format, OutputFormat::Text);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn check_json_never_colors() {
    let m = check_command()
        .try_get_matches_from(["check", "-s", "class C { }", "--format", "json", "--color", "always"])
        .expect("parses");
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.source_text.as_deref(), Some("class C { }"));
    assert_eq!(params.color, ColorChoice::Always);

    let args: crate::commands::check::CheckArgs = params.into();
    assert!(!args.color);
}

#[test]
fn check_rejects_unknown_format() {
    let result = check_command().try_get_matches_from(["check", "Order.cs", "--format", "xml"]);
    assert!(result.is_err());
}

#[test]
fn source_path_and_text_conflict() {
    let result = ast_command().try_get_matches_from(["ast", "Order.cs", "-s", "class C { }"]);
    assert!(result.is_err());
}

#[test]
fn ast_flags() {
    let m = ast_command()
        .try_get_matches_from(["ast", "-", "--raw", "--spans", "--color", "never"])
        .expect("parses");
    let params = AstParams::from_matches(&m);

    assert_eq!(params.source_path, Some(PathBuf::from("-")));
    assert!(params.raw);
    assert!(params.spans);
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn extract_all_flags() {
    let m = extract_command()
        .try_get_matches_from([
            "extract", "Order.cs", "--at", "12:24", "--name", "Line", "--style", "field", "-o",
            "out.cs",
        ])
        .expect("parses");
    let params = ExtractParams::from_matches(&m);

    assert_eq!(params.source_path, Some(PathBuf::from("Order.cs")));
    assert_eq!(
        params.at,
        Some(Cursor {
            line: 12,
            column: 24
        })
    );
    assert_eq!(params.name.as_deref(), Some("Line"));
    assert_eq!(params.style, MemberStyle::Field);
    assert_eq!(params.output, Some(PathBuf::from("out.cs")));
    assert!(!params.write);
}

#[test]
fn extract_defaults() {
    let m = extract_command()
        .try_get_matches_from(["extract", "Order.cs"])
        .expect("parses");
    let params = ExtractParams::from_matches(&m);

    assert_eq!(params.at, None);
    assert_eq!(params.name, None);
    assert_eq!(params.style, MemberStyle::Property);
    assert!(!params.write);
}

#[test]
fn extract_rejects_bad_cursor() {
    let result = extract_command().try_get_matches_from(["extract", "Order.cs", "--at", "12"]);
    assert!(result.is_err());
}

#[test]
fn write_conflicts_with_output() {
    let result =
        extract_command().try_get_matches_from(["extract", "Order.cs", "--write", "-o", "out.cs"]);
    assert!(result.is_err());
}

#[test]
fn write_conflicts_with_inline_source() {
    let result = extract_command().try_get_matches_from(["extract", "-s", "class C { }", "-w"]);
    assert!(result.is_err());
}
