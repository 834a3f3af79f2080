//! The host interface the engine is written against.

use indexmap::IndexSet;

use crate::parser::SyntaxNode;
use crate::parser::ast::TypeDecl;
use crate::semantic::TypeId;
use crate::semantic::display::TypeDisplay;

use super::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Property,
    Field,
    Method,
    Indexer,
    Event,
}

impl MemberKind {
    pub fn is_data(self) -> bool {
        matches!(self, MemberKind::Property | MemberKind::Field)
    }
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MemberKind::Property => "property",
            MemberKind::Field => "field",
            MemberKind::Method => "method",
            MemberKind::Indexer => "indexer",
            MemberKind::Event => "event",
        };
        f.write_str(s)
    }
}

/// One member of a type as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMember {
    pub name: String,
    pub kind: MemberKind,
    pub ty: TypeId,
}

impl TypeMember {
    pub fn new(name: impl Into<String>, kind: MemberKind, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
        }
    }
}

/// The declaration that will host a synthesized type, and the names it must avoid.
#[derive(Debug, Clone)]
pub struct ScopeContext {
    /// Top-level type enclosing the anchor site.
    pub container: TypeDecl,
    /// Namespace the container is declared in; `None` for the global namespace.
    pub namespace: Option<String>,
    /// Type names declared directly in that namespace.
    pub existing_names: IndexSet<String>,
    /// Names a new type would shadow inside the container: its nested types,
    /// and type or namespace names its code refers to by simple name.
    pub reserved_names: IndexSet<String>,
}

impl ScopeContext {
    pub fn container_name(&self) -> String {
        self.container
            .name()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    /// Every name a new type declared next to the container must avoid.
    pub fn taken_names(&self) -> IndexSet<String> {
        self.existing_names
            .iter()
            .chain(&self.reserved_names)
            .cloned()
            .collect()
    }
}

/// Semantic queries the engine needs from its host.
///
/// Implementations must be pure: the same tree and model always answer the
/// same way, so detection and extraction can run concurrently.
pub trait SemanticModel {
    /// Resolved type of an expression or variable declarator.
    fn type_of(&self, node: &SyntaxNode) -> Option<TypeId>;

    /// Whether `ty` is an anonymous (structural) type.
    fn is_structural(&self, ty: TypeId) -> bool;

    /// The only equality the engine uses to group sites.
    fn structurally_equal(&self, a: TypeId, b: TypeId) -> bool;

    /// Declared members of `ty`, in declaration order.
    fn members(&self, ty: TypeId) -> Vec<TypeMember>;

    /// Scope that would host a declaration extracted at `node`.
    fn containing_scope(&self, node: &SyntaxNode) -> Result<ScopeContext>;

    /// Type names declared directly in `namespace`.
    fn declared_type_names(&self, namespace: Option<&str>) -> IndexSet<String>;

    /// How `ty` is spelled inside `scope` once a type called `new_name` is
    /// declared next to the container, or `None` if it cannot be written.
    ///
    /// A simple name equal to `new_name` would bind to the new type, so it
    /// must come back qualified.
    fn display_type(&self, ty: TypeId, scope: &ScopeContext, new_name: &str) -> Option<TypeDisplay>;
}
