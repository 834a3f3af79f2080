//! Extraction: detect, scope, name, shape, synthesize, rewrite, insert.

use rowan::{GreenNode, NodeOrToken, TextRange, TextSize};

use crate::parser::{SyntaxKind, SyntaxNode};
use crate::semantic::TypeId;

use super::cancel::CancellationToken;
use super::config::ExtractConfig;
use super::detect::{CandidateSite, detect};
use super::error::{ExtractError, Result};
use super::model::{ScopeContext, SemanticModel};
use super::naming::{allocate, base_name};
use super::rewrite::rewrite;
use super::shape::{MemberDescriptor, shape};
use super::synthesize::{Layout, synthesize};

/// One extraction request.
#[derive(Clone, Debug, Default)]
pub struct ExtractRequest {
    pub(crate) name: Option<String>,
    pub(crate) config: ExtractConfig,
    pub(crate) cancel: CancellationToken,
}

impl ExtractRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preferred name for the new type; still made unique.
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn config(mut self, value: ExtractConfig) -> Self {
        self.config = value;
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }
}

/// Everything decided before the tree is changed.
#[derive(Debug, Clone)]
pub struct ExtractionPlan {
    pub target: TypeId,
    /// Sites of `target` inside the containing type, in document order.
    pub sites: Vec<CandidateSite>,
    pub new_name: String,
    pub members: Vec<MemberDescriptor>,
    pub declaration: GreenNode,
    pub scope: ScopeContext,
    layout: Layout,
}

/// Result of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub root: GreenNode,
    pub type_name: String,
    /// Input ranges of the rewritten creations.
    pub rewritten: Vec<TextRange>,
    /// Range of the inserted declaration in the new tree.
    pub declaration_range: TextRange,
}

impl Extraction {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.root.clone())
    }

    pub fn text(&self) -> String {
        self.syntax().to_string()
    }
}

/// Build the plan for extracting `target`, anchored at its first site.
pub fn plan<M: SemanticModel + ?Sized>(
    root: &SyntaxNode,
    model: &M,
    target: TypeId,
    request: &ExtractRequest,
) -> Result<ExtractionPlan> {
    request.cancel.check()?;
    let anchor = detect(root, model)
        .find(|site| model.structurally_equal(site.ty, target))
        .ok_or(ExtractError::NoCandidateFound)?;
    plan_at_site(root, model, &anchor, request)
}

/// Build the plan for extracting the type of `anchor` from the type containing it.
pub fn plan_at_site<M: SemanticModel + ?Sized>(
    root: &SyntaxNode,
    model: &M,
    anchor: &CandidateSite,
    request: &ExtractRequest,
) -> Result<ExtractionPlan> {
    request.cancel.check()?;
    let target = anchor.ty;
    let scope = model.containing_scope(anchor.node.as_cst())?;
    let container = scope.container.as_cst().clone();
    let sites: Vec<CandidateSite> = detect(root, model)
        .filter(|site| model.structurally_equal(site.ty, target))
        .filter(|site| site.node.as_cst().ancestors().any(|a| a == container))
        .collect();
    tracing::debug!(
        container = %scope.container_name(),
        sites = sites.len(),
        "extraction scope resolved"
    );

    request.cancel.check()?;
    let members = shape(model, target)?;

    // A member cannot share the name of its declaring type
    let mut taken = scope.taken_names();
    taken.extend(members.iter().map(|m| m.name.clone()));
    let base = base_name(request.name.as_deref(), &request.config, &sites);
    let new_name = allocate(&base, &taken)?;
    tracing::debug!(%base, %new_name, "type name allocated");

    let displays = members
        .iter()
        .map(|m| {
            model
                .display_type(m.ty, &scope, &new_name)
                .ok_or_else(|| ExtractError::UnsupportedMemberType(m.name.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    request.cancel.check()?;
    let text = root.to_string();
    let layout = Layout::at(&text, usize::from(container.text_range().start()));
    let declaration = synthesize(&new_name, &members, &displays, &request.config, &layout);
    tracing::debug!(members = members.len(), "declaration synthesized");

    Ok(ExtractionPlan {
        target,
        sites,
        new_name,
        members,
        declaration,
        scope,
        layout,
    })
}

impl ExtractionPlan {
    /// Rewrite the sites and insert the declaration after the containing type.
    pub fn apply<M: SemanticModel + ?Sized>(
        self,
        model: &M,
        cancel: &CancellationToken,
    ) -> Result<Extraction> {
        cancel.check()?;
        let container = self.scope.container.as_cst();
        let rewritten = rewrite(container, model, self.target, &self.new_name)?;
        tracing::debug!(sites = rewritten.sites.len(), "use sites rewritten");

        let container_start = container.text_range().start();
        let container_end = container_start + rewritten.green.text_len();
        let separator = format!(
            "{}{}{}",
            self.layout.line_break, self.layout.line_break, self.layout.base_indent
        );
        let declaration_start = container_end + TextSize::of(separator.as_str());
        let declaration_range =
            TextRange::at(declaration_start, self.declaration.text_len());

        let mut inserted = vec![
            NodeOrToken::Node(rewritten.green),
            NodeOrToken::Token(rowan::GreenToken::new(
                SyntaxKind::Newline.into(),
                self.layout.line_break,
            )),
            NodeOrToken::Token(rowan::GreenToken::new(
                SyntaxKind::Newline.into(),
                self.layout.line_break,
            )),
        ];
        if !self.layout.base_indent.is_empty() {
            inserted.push(NodeOrToken::Token(rowan::GreenToken::new(
                SyntaxKind::Whitespace.into(),
                &self.layout.base_indent,
            )));
        }
        inserted.push(NodeOrToken::Node(self.declaration));

        let root = match container.parent() {
            Some(parent) => {
                let index = container.index();
                let new_parent = parent.green().splice_children(index..index + 1, inserted);
                parent.replace_with(new_parent)
            }
            None => return Err(ExtractError::NoEnclosingType),
        };

        Ok(Extraction {
            root,
            type_name: self.new_name,
            rewritten: rewritten.sites,
            declaration_range,
        })
    }
}

/// Extract the structural type `target`.
pub fn extract<M: SemanticModel + ?Sized>(
    root: &SyntaxNode,
    model: &M,
    target: TypeId,
    request: &ExtractRequest,
) -> Result<Extraction> {
    plan(root, model, target, request)?.apply(model, &request.cancel)
}

/// Extract the type of the candidate site covering `offset`.
///
/// The innermost covering site wins. Only sites of that type inside the
/// same containing type are rewritten.
pub fn extract_at<M: SemanticModel + ?Sized>(
    root: &SyntaxNode,
    model: &M,
    offset: TextSize,
    request: &ExtractRequest,
) -> Result<Extraction> {
    let site = detect(root, model)
        .filter(|site| site.covering_range().contains_inclusive(offset))
        .min_by_key(|site| site.covering_range().len())
        .ok_or(ExtractError::NoCandidateFound)?;
    plan_at_site(root, model, &site, request)?.apply(model, &request.cancel)
}
