//! Semantic model of the reference host.
//!
//! Resolves every expression and variable declarator of one compilation unit
//! to an interned [`TypeId`]. Built once per tree; immutable afterwards, so a
//! model can be shared across threads.

mod declared;
pub mod display;
mod infer;
mod library;
pub mod types;

#[cfg(test)]
mod types_tests;

use std::collections::HashMap;
use std::iter;

use indexmap::IndexSet;

use crate::Diagnostics;
use crate::extract::{ExtractError, MemberKind, ScopeContext, SemanticModel, TypeMember};
use crate::parser::ast::{NameRef, Root, TypeDecl};
use crate::parser::{SyntaxKind, SyntaxNode};

use declared::{DeclaredTypes, NameContext};
use display::TypeDisplay;
use infer::{Inference, NodeKey, node_key};

pub use types::{AnonField, Primitive, TypeContext, TypeId, TypeShape};

#[derive(Debug, Clone)]
pub struct Model {
    types: TypeContext,
    declared: DeclaredTypes,
    node_types: HashMap<NodeKey, TypeId>,
}

impl Model {
    /// Build the model for a parsed tree.
    ///
    /// Returns semantic errors (such as duplicate anonymous members) alongside
    /// the model; they never prevent building it.
    pub fn build(root: &Root) -> (Self, Diagnostics) {
        let mut types = TypeContext::new();
        let mut diagnostics = Diagnostics::new();
        let declared = DeclaredTypes::collect(root, &mut types);
        let node_types = Inference::new(&mut types, &declared, &mut diagnostics).run(root);

        tracing::debug!(
            types = types.len(),
            declared = declared.len(),
            nodes = node_types.len(),
            "semantic model built"
        );

        let model = Self {
            types,
            declared,
            node_types,
        };
        (model, diagnostics)
    }

    pub fn types(&self) -> &TypeContext {
        &self.types
    }

    /// Human-readable type of a node, `?` when unresolved.
    pub fn describe_node(&self, node: &SyntaxNode) -> String {
        match self.type_of(node) {
            Some(ty) => self.types.describe(ty),
            None => "?".to_string(),
        }
    }

    /// `shadow` is a non-generic type about to be declared in the context's
    /// namespace; a path may not start with it.
    fn display(&self, ty: TypeId, ctx: &NameContext, shadow: &str) -> Option<TypeDisplay> {
        match self.types.get_type(ty)? {
            TypeShape::Primitive(p) => Some(TypeDisplay::keyword(p.keyword())),
            TypeShape::Array(element) => Some(TypeDisplay::Array(Box::new(
                self.display(*element, ctx, shadow)?,
            ))),
            TypeShape::Nullable(inner) => Some(TypeDisplay::Nullable(Box::new(
                self.display(*inner, ctx, shadow)?,
            ))),
            TypeShape::Named {
                namespace,
                name,
                args,
            } => {
                let args = args
                    .iter()
                    .map(|a| self.display(*a, ctx, shadow))
                    .collect::<Option<Vec<_>>>()?;
                let shadowed = args.is_empty() && name == shadow;
                let resolves_here = !shadowed
                    && self.declared.resolve_name(name, args.len(), ctx).as_ref() == Some(namespace);
                let path = match namespace {
                    Some(ns) if !resolves_here => {
                        if ns.split('.').next() == Some(shadow) {
                            return None;
                        }
                        TypeDisplay::path(ns.split('.').chain(iter::once(name.as_str())))
                    }
                    // a global type cannot be qualified past the shadow
                    None if shadowed => return None,
                    _ => TypeDisplay::path([name.as_str()]),
                };
                Some(path.with_args(args))
            }
            TypeShape::Unknown
            | TypeShape::Void
            | TypeShape::Null
            | TypeShape::Lambda
            | TypeShape::Anonymous(_) => None,
        }
    }

    /// Names that would change meaning once a type of the same name is
    /// declared next to `container`: types nested in it, and simple names the
    /// file uses for types or namespaces.
    fn reserved_names(&self, container: &TypeDecl) -> IndexSet<String> {
        let mut reserved: IndexSet<String> = container
            .as_cst()
            .descendants()
            .skip(1)
            .filter_map(TypeDecl::cast)
            .filter_map(|d| d.name())
            .map(|t| t.text().to_string())
            .collect();

        let Some(root) = container.as_cst().ancestors().last() else {
            return reserved;
        };
        for node in root.descendants() {
            let name = match node.kind() {
                SyntaxKind::NamedType => node
                    .children_with_tokens()
                    .filter_map(|e| e.into_token())
                    .find(|t| t.kind() == SyntaxKind::Id),
                SyntaxKind::NameRef => NameRef::cast(node)
                    .and_then(|n| n.name())
                    .filter(|t| t.kind() == SyntaxKind::Id)
                    .filter(|t| self.declared.names_type_or_namespace(t.text())),
                _ => None,
            };
            if let Some(name) = name {
                reserved.insert(name.text().to_string());
            }
        }
        reserved
    }
}

const OBJECT_METHODS: [(&str, Primitive); 3] = [
    ("Equals", Primitive::Bool),
    ("GetHashCode", Primitive::Int),
    ("ToString", Primitive::String),
];

impl SemanticModel for Model {
    fn type_of(&self, node: &SyntaxNode) -> Option<TypeId> {
        self.node_types.get(&node_key(node)).copied()
    }

    fn is_structural(&self, ty: TypeId) -> bool {
        self.types.get_type(ty).is_some_and(TypeShape::is_anonymous)
    }

    fn structurally_equal(&self, a: TypeId, b: TypeId) -> bool {
        // Anonymous types are interned by shape
        a == b
    }

    fn members(&self, ty: TypeId) -> Vec<TypeMember> {
        let mut members: Vec<TypeMember> = match self.types.get_type(ty) {
            Some(TypeShape::Anonymous(fields)) => fields
                .iter()
                .map(|f| TypeMember::new(f.name.clone(), MemberKind::Property, f.type_id))
                .collect(),
            Some(TypeShape::Named {
                namespace, name, ..
            }) => match self.declared.get(namespace.as_deref(), name) {
                Some(decl) => decl
                    .members
                    .iter()
                    .map(|(n, t)| TypeMember::new(n.clone(), MemberKind::Property, *t))
                    .chain(
                        decl.methods
                            .iter()
                            .map(|(n, t)| TypeMember::new(n.clone(), MemberKind::Method, *t)),
                    )
                    .collect(),
                None => Vec::new(),
            },
            _ => return Vec::new(),
        };

        for (name, ret) in OBJECT_METHODS {
            if !members.iter().any(|m| m.name == name) {
                members.push(TypeMember::new(name, MemberKind::Method, self.types.primitive(ret)));
            }
        }
        members
    }

    fn containing_scope(&self, node: &SyntaxNode) -> Result<ScopeContext, ExtractError> {
        let container = node
            .ancestors()
            .filter_map(TypeDecl::cast)
            .last()
            .ok_or(ExtractError::NoEnclosingType)?;
        let name = container.name().ok_or(ExtractError::NoEnclosingType)?;
        let ctx = NameContext::of_type_decl(&container);

        if let Some(decl) = self.declared.get(ctx.namespace.as_deref(), name.text())
            && decl.partial
            && decl.declarations.len() > 1
        {
            return Err(ExtractError::AmbiguousContainingType(name.text().to_string()));
        }

        let reserved_names = self.reserved_names(&container);
        Ok(ScopeContext {
            existing_names: self.declared.names_in(ctx.namespace.as_deref()),
            reserved_names,
            namespace: ctx.namespace,
            container,
        })
    }

    fn declared_type_names(&self, namespace: Option<&str>) -> IndexSet<String> {
        self.declared.names_in(namespace)
    }

    fn display_type(&self, ty: TypeId, scope: &ScopeContext, new_name: &str) -> Option<TypeDisplay> {
        let ctx = NameContext::of_type_decl(&scope.container);
        self.display(ty, &ctx, new_name)
    }
}
