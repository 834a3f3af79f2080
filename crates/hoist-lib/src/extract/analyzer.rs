use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::SyntaxNode;

use super::config::RuleDescriptor;
use super::detect::{SiteKind, detect};
use super::model::SemanticModel;

/// One informational diagnostic per candidate site, each offering the extraction fix.
pub fn analyze<M: SemanticModel + ?Sized>(
    root: &SyntaxNode,
    model: &M,
    rule: &RuleDescriptor,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for site in detect(root, model) {
        let (kind, message) = match &site.kind {
            SiteKind::Declaration(_) => (
                DiagnosticKind::AnonymousTypeDeclaration,
                rule.declaration_message(&site.variable_name().unwrap_or_default()),
            ),
            SiteKind::Expression => (DiagnosticKind::AnonymousTypeUsage, rule.usage_message.clone()),
        };
        diagnostics
            .report(kind, site.focus_range())
            .message(message)
            .severity(rule.severity)
            .code(rule.id.clone())
            .fix_titled(rule.fix_title.clone())
            .emit();
    }
    tracing::debug!(findings = diagnostics.len(), rule = %rule.id, "analysis finished");
    diagnostics
}
