use rowan::TextRange;

use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
    insta::assert_snapshot!(format!("{}", Severity::Info), @"info");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedType, TextRange::new(0.into(), 5.into()))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    let message = diagnostics.iter().next().unwrap();
    assert_eq!(message.message(), "expected a type");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::ExpectedIdentifier,
            TextRange::new(0.into(), 5.into()),
        )
        .message("type name")
        .emit();

    let message = diagnostics.iter().next().unwrap();
    assert_eq!(message.message(), "expected type name");
}

#[test]
fn builder_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedBrace, TextRange::new(0.into(), 5.into()))
        .message("primary")
        .related_to("related info", TextRange::new(6.into(), 10.into()))
        .emit();

    let result = diagnostics.printer().source("hello world!").render();
    insta::assert_snapshot!(result, @r"
    error: missing closing `}`; primary
      |
    1 | hello world!
      | ^^^^^ ---- related info
    ");
}

#[test]
fn builder_with_fix() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::UnexpectedToken,
            TextRange::new(0.into(), 5.into()),
        )
        .message("fixable")
        .fix("apply this fix", "fixed")
        .emit();

    let result = diagnostics.printer().source("hello world").render();
    insta::assert_snapshot!(result, @r"
    error: fixable
      |
    1 | hello world
      | ^^^^^
      |
    help: apply this fix
      |
    1 - hello world
    1 + fixed world
      |
    ");
}

#[test]
fn info_with_code() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::AnonymousTypeDeclaration,
            TextRange::new(4.into(), 5.into()),
        )
        .message("Variable 'a' is an anonymous type")
        .code("HX0001")
        .fix_titled("Extract type from anonymous declaration")
        .emit();

    assert!(!diagnostics.has_errors());
    let message = diagnostics.iter().next().unwrap();
    assert_eq!(message.severity(), Severity::Info);
    assert_eq!(message.code(), Some("HX0001"));
    assert_eq!(
        message.fix().map(|f| f.description()),
        Some("Extract type from anonymous declaration")
    );
    assert_eq!(message.fix().and_then(|f| f.replacement()), None);

    let plain = diagnostics.printer().render();
    insta::assert_snapshot!(plain, @"info at 4..5: Variable 'a' is an anonymous type [HX0001] (fix: Extract type from anonymous declaration)");
}

#[test]
fn severity_override() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::AnonymousTypeUsage, TextRange::empty(0.into()))
        .severity(Severity::Warning)
        .emit();

    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedMember, TextRange::new(0.into(), 5.into()))
        .message("test")
        .emit();

    let result = diagnostics.printer().source("hello").colored(true).render();
    assert!(result.contains("test"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    let result = diagnostics.printer().source("source").render();
    assert!(result.is_empty());
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::DuplicateAnonymousMember,
            TextRange::new(0.into(), 5.into()),
        )
        .message("hello")
        .emit();

    let result = diagnostics
        .printer()
        .source("hello world")
        .path("Program.cs")
        .render();
    insta::assert_snapshot!(result, @r"
    error: anonymous type member `hello` is declared more than once
     --> Program.cs:1:1
      |
    1 | hello world
      | ^^^^^
    ");
}

#[test]
fn printer_states_message_once() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, TextRange::new(6.into(), 11.into()))
        .message("expected `;`")
        .emit();

    let result = diagnostics.printer().source("hello world").render();
    assert_eq!(result.matches("expected `;`").count(), 1);
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, TextRange::empty(0.into()))
        .emit();

    let result = diagnostics.printer().source("hello").render();
    insta::assert_snapshot!(result, @r"
    error: expected an expression
      |
    1 | hello
      | ^
    ");
}

#[test]
fn diagnostic_kind_suppression_order() {
    assert!(DiagnosticKind::UnclosedBrace.suppresses(&DiagnosticKind::UnexpectedToken));
    assert!(DiagnosticKind::ExpectedExpression.suppresses(&DiagnosticKind::MissingSemicolon));
    assert!(!DiagnosticKind::UnclosedBrace.suppresses(&DiagnosticKind::UnclosedBrace));
    assert!(!DiagnosticKind::UnexpectedToken.suppresses(&DiagnosticKind::UnclosedParen));
}

#[test]
fn diagnostic_kind_message_rendering() {
    assert_eq!(
        DiagnosticKind::UnclosedParen.message(None),
        "missing closing `)`"
    );
    assert_eq!(
        DiagnosticKind::UnclosedParen.message(Some("opened here")),
        "missing closing `)`; opened here"
    );
    assert_eq!(
        DiagnosticKind::MissingSemicolon.message(Some("after statement")),
        "missing `;`: after statement"
    );
    assert_eq!(
        DiagnosticKind::UnexpectedToken.message(Some("expected `{`")),
        "expected `{`"
    );
}

#[test]
fn filtered_no_suppression_disjoint_spans() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedBrace, TextRange::new(0.into(), 5.into()))
        .emit();
    diagnostics
        .report(
            DiagnosticKind::UnexpectedToken,
            TextRange::new(10.into(), 15.into()),
        )
        .emit();

    assert_eq!(diagnostics.filtered().len(), 2);
}

#[test]
fn filtered_suppresses_lower_priority_contained() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedBrace, TextRange::new(0.into(), 20.into()))
        .emit();
    diagnostics
        .report(
            DiagnosticKind::UnexpectedToken,
            TextRange::new(5.into(), 15.into()),
        )
        .emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        filtered.iter().next().map(|m| m.kind()),
        Some(DiagnosticKind::UnclosedBrace)
    );
}

#[test]
fn filtered_root_cause_beats_structural_at_same_start() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedParen, TextRange::new(3.into(), 9.into()))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, TextRange::new(3.into(), 4.into()))
        .emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        filtered.iter().next().map(|m| m.kind()),
        Some(DiagnosticKind::ExpectedExpression)
    );
}

#[test]
fn filtered_keeps_findings_inside_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedBrace, TextRange::new(0.into(), 30.into()))
        .emit();
    diagnostics
        .report(DiagnosticKind::AnonymousTypeUsage, TextRange::new(8.into(), 11.into()))
        .emit();

    assert_eq!(diagnostics.filtered().len(), 2);
}

#[test]
fn reports_use_line_and_column() {
    let source = "class A\n{\n  x\n}";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedMember, TextRange::new(12.into(), 13.into()))
        .emit();

    let reports = diagnostics.to_reports(source);
    assert_eq!(reports[0].start, Position { line: 3, column: 3 });
    assert_eq!(reports[0].end, Position { line: 3, column: 4 });

    let json = serde_json::to_string(&reports).unwrap();
    insta::assert_snapshot!(json, @r#"[{"severity":"error","message":"expected a member declaration","start":{"line":3,"column":3},"end":{"line":3,"column":4}}]"#);
}

#[test]
fn sorted_orders_by_position() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, TextRange::new(9.into(), 10.into()))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedType, TextRange::new(2.into(), 3.into()))
        .emit();

    let kinds: Vec<_> = diagnostics.sorted().iter().map(|m| m.kind()).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::ExpectedType, DiagnosticKind::UnexpectedToken]
    );
}
