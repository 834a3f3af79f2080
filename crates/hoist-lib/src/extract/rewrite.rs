//! Use-site rewriting.
//!
//! Rebuilds green nodes bottom-up. Subtrees without a matching site are
//! shared with the input; the input tree itself is never touched.

use rowan::{GreenNode, GreenToken, NodeOrToken, TextRange};

use crate::parser::ast::{AnonMember, AnonObjectCreation};
use crate::parser::{SyntaxKind, SyntaxNode};
use crate::semantic::TypeId;

use super::error::{Result, Unsupported};
use super::model::SemanticModel;

type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Outcome of a rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten subtree, or the input's green node when nothing matched.
    pub green: GreenNode,
    /// Input ranges of the creations that were rewritten, in document order.
    pub sites: Vec<TextRange>,
}

impl Rewrite {
    pub fn is_unchanged(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Turn every `new { ... }` under `node` whose type equals `target` into `new NewName { ... }`.
///
/// All or nothing: if any matching creation cannot be rewritten, the whole
/// pass fails.
pub fn rewrite<M: SemanticModel + ?Sized>(
    node: &SyntaxNode,
    model: &M,
    target: TypeId,
    new_name: &str,
) -> Result<Rewrite> {
    let mut rewriter = Rewriter {
        model,
        target,
        new_name,
        sites: Vec::new(),
    };
    let green = rewriter
        .node(node)?
        .unwrap_or_else(|| node.green().into_owned());
    Ok(Rewrite {
        green,
        sites: rewriter.sites,
    })
}

struct Rewriter<'a, M: ?Sized> {
    model: &'a M,
    target: TypeId,
    new_name: &'a str,
    sites: Vec<TextRange>,
}

impl<M: SemanticModel + ?Sized> Rewriter<'_, M> {
    /// `None` when nothing under `node` changed.
    fn node(&mut self, node: &SyntaxNode) -> Result<Option<GreenNode>> {
        if let Some(creation) = AnonObjectCreation::cast(node.clone())
            && self.matches(&creation)
        {
            return self.named_creation(&creation).map(Some);
        }

        let mut changed = false;
        let mut children = Vec::new();
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => match self.node(&n)? {
                    Some(green) => {
                        changed = true;
                        children.push(NodeOrToken::Node(green));
                    }
                    None => children.push(NodeOrToken::Node(n.green().into_owned())),
                },
                NodeOrToken::Token(t) => children.push(NodeOrToken::Token(t.green().to_owned())),
            }
        }

        if !changed {
            return Ok(None);
        }
        Ok(Some(GreenNode::new(node.kind().into(), children)))
    }

    fn matches(&self, creation: &AnonObjectCreation) -> bool {
        self.model
            .type_of(creation.as_cst())
            .is_some_and(|ty| self.model.structurally_equal(ty, self.target))
    }

    /// `new { A = 1, p.B }` becomes `new Name { A = 1, B = p.B }`.
    fn named_creation(&mut self, creation: &AnonObjectCreation) -> Result<GreenNode> {
        let node = creation.as_cst();
        if node.ancestors().any(|a| a.kind() == SyntaxKind::Lambda) {
            return Err(Unsupported::LambdaProjection.into());
        }
        self.sites.push(node.text_range());
        tracing::trace!(range = ?node.text_range(), name = self.new_name, "rewriting creation");

        let mut outer: Vec<GreenElement> = Vec::new();
        let mut init: Vec<GreenElement> = Vec::new();
        let mut in_braces = false;

        for child in node.children_with_tokens() {
            let element = match child {
                NodeOrToken::Token(t) if t.kind() == SyntaxKind::KwNew => {
                    outer.push(NodeOrToken::Token(t.green().to_owned()));
                    outer.push(token(SyntaxKind::Whitespace, " "));
                    outer.push(NodeOrToken::Node(GreenNode::new(
                        SyntaxKind::NamedType.into(),
                        [token(SyntaxKind::Id, self.new_name)],
                    )));
                    continue;
                }
                NodeOrToken::Token(t) => {
                    if t.kind() == SyntaxKind::BraceOpen {
                        in_braces = true;
                    }
                    NodeOrToken::Token(t.green().to_owned())
                }
                NodeOrToken::Node(n) => match AnonMember::cast(n.clone()) {
                    Some(member) => NodeOrToken::Node(self.member_init(&member)?),
                    None => NodeOrToken::Node(self.node(&n)?.unwrap_or_else(|| n.green().into_owned())),
                },
            };
            if in_braces {
                init.push(element);
            } else {
                outer.push(element);
            }
        }

        outer.push(NodeOrToken::Node(GreenNode::new(
            SyntaxKind::ObjectInit.into(),
            init,
        )));
        Ok(GreenNode::new(SyntaxKind::ObjectCreation.into(), outer))
    }

    /// `A = expr` keeps its tokens; a projected `p.A` gains an explicit `A = `.
    fn member_init(&mut self, member: &AnonMember) -> Result<GreenNode> {
        let mut children: Vec<GreenElement> = Vec::new();
        if member.name_token().is_none()
            && let Some(name) = member.name()
        {
            children.push(token(SyntaxKind::Id, &name));
            children.push(token(SyntaxKind::Whitespace, " "));
            children.push(token(SyntaxKind::Equals, "="));
            children.push(token(SyntaxKind::Whitespace, " "));
        }

        for child in member.as_cst().children_with_tokens() {
            children.push(match child {
                NodeOrToken::Node(n) => {
                    NodeOrToken::Node(self.node(&n)?.unwrap_or_else(|| n.green().into_owned()))
                }
                NodeOrToken::Token(t) => NodeOrToken::Token(t.green().to_owned()),
            });
        }
        Ok(GreenNode::new(SyntaxKind::MemberInit.into(), children))
    }
}

fn token(kind: SyntaxKind, text: &str) -> GreenElement {
    NodeOrToken::Token(GreenToken::new(kind.into(), text))
}
