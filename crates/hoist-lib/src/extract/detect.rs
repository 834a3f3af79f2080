//! Candidate detection: which anonymous creations could be extracted.

use rowan::TextRange;

use crate::parser::ast::{AnonObjectCreation, LocalDecl, VarDeclarator};
use crate::parser::{SyntaxKind, SyntaxNode};
use crate::semantic::TypeId;

use super::model::SemanticModel;

/// How an anonymous creation is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteKind {
    /// `var name = new { ... };`, the only declarator of its statement.
    Declaration(VarDeclarator),
    /// Any other position: arguments, returns, explicit types, lambda bodies.
    Expression,
}

/// One anonymous creation whose type is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSite {
    pub node: AnonObjectCreation,
    pub kind: SiteKind,
    pub ty: TypeId,
    pub in_lambda: bool,
}

impl CandidateSite {
    pub fn variable_name(&self) -> Option<String> {
        match &self.kind {
            SiteKind::Declaration(declarator) => declarator.name().map(|t| t.text().to_string()),
            SiteKind::Expression => None,
        }
    }

    /// Where a diagnostic for this site points: the variable name, or `new`.
    pub fn focus_range(&self) -> TextRange {
        let token = match &self.kind {
            SiteKind::Declaration(declarator) => declarator.name(),
            SiteKind::Expression => self.node.new_keyword(),
        };
        token.map_or_else(|| self.node.as_cst().text_range(), |t| t.text_range())
    }

    /// Range used to pick the site for a cursor offset.
    pub fn covering_range(&self) -> TextRange {
        match &self.kind {
            SiteKind::Declaration(declarator) => declarator.as_cst().text_range(),
            SiteKind::Expression => self.node.as_cst().text_range(),
        }
    }
}

/// Candidate sites of a tree, in document order.
///
/// Lazy and side-effect free: dropping the iterator early is fine, and calling
/// again on a newer tree starts over.
pub fn detect<'m, M: SemanticModel + ?Sized>(
    root: &SyntaxNode,
    model: &'m M,
) -> impl Iterator<Item = CandidateSite> + use<'m, M> {
    root.descendants()
        .filter_map(AnonObjectCreation::cast)
        .filter_map(move |node| {
            let ty = model.type_of(node.as_cst())?;
            if !model.is_structural(ty) {
                return None;
            }
            let kind = match declaration_of(&node, model, ty) {
                Some(declarator) => SiteKind::Declaration(declarator),
                None => SiteKind::Expression,
            };
            let in_lambda = node
                .as_cst()
                .ancestors()
                .any(|a| a.kind() == SyntaxKind::Lambda);
            tracing::trace!(range = ?node.as_cst().text_range(), ?kind, in_lambda, "candidate site");
            Some(CandidateSite {
                node,
                kind,
                ty,
                in_lambda,
            })
        })
}

/// The declarator `node` initializes, when it forms a declaration candidate.
fn declaration_of<M: SemanticModel + ?Sized>(
    node: &AnonObjectCreation,
    model: &M,
    ty: TypeId,
) -> Option<VarDeclarator> {
    let declarator = node.as_cst().parent().and_then(VarDeclarator::cast)?;
    let local = declarator.as_cst().parent().and_then(LocalDecl::cast)?;
    if !local.is_var() || local.declarators().count() != 1 {
        return None;
    }
    let declared = model.type_of(declarator.as_cst())?;
    model
        .structurally_equal(declared, ty)
        .then_some(declarator)
}
