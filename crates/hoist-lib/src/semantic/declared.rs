//! Declared types: collection and name resolution.
//!
//! Two-pass approach:
//! 1. Collect every top-level `class`/`struct` by namespace and name
//! 2. Resolve field, property and method types against the collected names

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use rowan::TextRange;

use crate::parser::ast::{self, Item, Member, Type};

use super::library;
use super::types::{Primitive, TYPE_UNKNOWN, TYPE_VOID, TypeContext, TypeId, TypeShape};

/// Namespace and `using` directives in effect at some point of a file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameContext {
    pub namespace: Option<String>,
    pub usings: Vec<String>,
}

impl NameContext {
    pub fn enter_namespace(&self, decl: &ast::NamespaceDecl) -> Self {
        let name = decl.path().map(|p| p.text()).unwrap_or_default();
        let namespace = match &self.namespace {
            Some(outer) => format!("{}.{}", outer, name),
            None => name,
        };
        let mut usings = self.usings.clone();
        usings.extend(using_paths(decl.usings()));
        Self {
            namespace: Some(namespace),
            usings,
        }
    }

    /// Context at the top of a compilation unit.
    pub fn of_root(root: &ast::Root) -> Self {
        Self {
            namespace: None,
            usings: using_paths(root.usings()).collect(),
        }
    }

    /// Context in effect for a type declaration, from its ancestors.
    pub fn of_type_decl(decl: &ast::TypeDecl) -> Self {
        let mut namespaces: Vec<ast::NamespaceDecl> = decl
            .as_cst()
            .ancestors()
            .filter_map(ast::NamespaceDecl::cast)
            .collect();
        namespaces.reverse();

        let root = decl.as_cst().ancestors().find_map(ast::Root::cast);
        let mut ctx = root.map(|r| Self::of_root(&r)).unwrap_or_default();
        for ns in &namespaces {
            ctx = ctx.enter_namespace(ns);
        }
        ctx
    }
}

fn has_segment(path: &str, segment: &str) -> bool {
    path.split('.').any(|s| s == segment)
}

fn using_paths(usings: impl Iterator<Item = ast::UsingDirective>) -> impl Iterator<Item = String> {
    usings.filter_map(|u| u.path()).map(|p| p.text())
}

/// Call `f` for every top-level type declaration with the context it is declared in.
pub fn for_each_type_decl(root: &ast::Root, mut f: impl FnMut(&ast::TypeDecl, &NameContext)) {
    fn walk(
        items: impl Iterator<Item = Item>,
        ctx: &NameContext,
        f: &mut impl FnMut(&ast::TypeDecl, &NameContext),
    ) {
        for item in items {
            match item {
                Item::Type(decl) => f(&decl, ctx),
                Item::Namespace(ns) => walk(ns.items(), &ctx.enter_namespace(&ns), f),
                Item::Using(_) | Item::Stmt(_) => {}
            }
        }
    }

    let ctx = NameContext::of_root(root);
    walk(root.items(), &ctx, &mut f);
}

#[derive(Clone, Debug)]
pub struct DeclaredType {
    pub namespace: Option<String>,
    pub name: String,
    /// One range per declaration; more than one only for `partial` types.
    pub declarations: Vec<TextRange>,
    pub partial: bool,
    /// Fields and properties.
    pub members: IndexMap<String, TypeId>,
    /// Method return types.
    pub methods: IndexMap<String, TypeId>,
}

type TypeKey = (Option<String>, String);

/// Registry of declared types of one compilation unit.
#[derive(Clone, Debug, Default)]
pub struct DeclaredTypes {
    table: IndexMap<TypeKey, DeclaredType>,
    namespaces: HashSet<String>,
}

impl DeclaredTypes {
    pub fn collect(root: &ast::Root, types: &mut TypeContext) -> Self {
        let mut declared = Self::default();

        for_each_type_decl(root, |decl, ctx| {
            let Some(name) = decl.name() else {
                return;
            };
            if let Some(ns) = &ctx.namespace {
                declared.add_namespace(ns);
            }
            let key = (ctx.namespace.clone(), name.text().to_string());
            let entry = declared
                .table
                .entry(key)
                .or_insert_with(|| DeclaredType {
                    namespace: ctx.namespace.clone(),
                    name: name.text().to_string(),
                    declarations: Vec::new(),
                    partial: false,
                    members: IndexMap::new(),
                    methods: IndexMap::new(),
                });
            entry.declarations.push(decl.as_cst().text_range());
            entry.partial |= decl.is_partial();
        });

        let mut resolved = Vec::new();
        for_each_type_decl(root, |decl, ctx| {
            let Some(name) = decl.name() else {
                return;
            };
            let key = (ctx.namespace.clone(), name.text().to_string());
            for member in decl.members() {
                match member {
                    Member::Field(field) => {
                        let ty = declared.resolve_opt(types, field.ty(), ctx);
                        for declarator in field.declarators() {
                            if let Some(n) = declarator.name() {
                                resolved.push((key.clone(), n.text().to_string(), ty, false));
                            }
                        }
                    }
                    Member::Property(prop) => {
                        let ty = declared.resolve_opt(types, prop.ty(), ctx);
                        if let Some(n) = prop.name() {
                            resolved.push((key.clone(), n.text().to_string(), ty, false));
                        }
                    }
                    Member::Method(method) => {
                        let ty = match method.return_type() {
                            Some(t) => declared.resolve_type(types, &t, ctx),
                            None => TYPE_VOID,
                        };
                        if let Some(n) = method.name() {
                            resolved.push((key.clone(), n.text().to_string(), ty, true));
                        }
                    }
                    Member::Constructor(_) | Member::Type(_) => {}
                }
            }
        });

        for (key, name, ty, is_method) in resolved {
            let Some(entry) = declared.table.get_mut(&key) else {
                continue;
            };
            let target = if is_method {
                &mut entry.methods
            } else {
                &mut entry.members
            };
            target.entry(name).or_insert(ty);
        }

        declared
    }

    fn add_namespace(&mut self, namespace: &str) {
        let mut prefix = namespace;
        loop {
            self.namespaces.insert(prefix.to_string());
            match prefix.rsplit_once('.') {
                Some((parent, _)) => prefix = parent,
                None => break,
            }
        }
    }

    pub fn get(&self, namespace: Option<&str>, name: &str) -> Option<&DeclaredType> {
        self.table
            .get(&(namespace.map(str::to_string), name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeclaredType> {
        self.table.values()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Names of types declared directly in `namespace` (`None` is the global namespace).
    pub fn names_in(&self, namespace: Option<&str>) -> IndexSet<String> {
        self.table
            .values()
            .filter(|t| t.namespace.as_deref() == namespace)
            .map(|t| t.name.clone())
            .collect()
    }

    pub fn is_namespace(&self, path: &str) -> bool {
        self.namespaces.contains(path) || library::is_namespace(path)
    }

    /// Whether `name` is the simple name of some non-generic type or a segment
    /// of some namespace, in any namespace.
    pub fn names_type_or_namespace(&self, name: &str) -> bool {
        self.iter().any(|t| t.name == name)
            || library::types_named(name, 0).next().is_some()
            || self.namespaces.iter().any(|ns| has_segment(ns, name))
            || library::TYPES.iter().any(|t| has_segment(t.namespace, name))
    }

    fn type_exists(&self, namespace: Option<&str>, name: &str, arity: usize) -> bool {
        if arity == 0 && self.get(namespace, name).is_some() {
            return true;
        }
        namespace.is_some_and(|ns| library::find(ns, name, arity).is_some())
    }

    /// Namespace a simple type name resolves to, if it resolves unambiguously.
    ///
    /// The enclosing namespaces are searched innermost first; `using`
    /// namespaces are searched last and must agree on a single match.
    pub fn resolve_name(&self, name: &str, arity: usize, ctx: &NameContext) -> Option<Option<String>> {
        let mut scope = ctx.namespace.clone();
        loop {
            if self.type_exists(scope.as_deref(), name, arity) {
                return Some(scope);
            }
            match scope {
                Some(ns) => scope = ns.rsplit_once('.').map(|(parent, _)| parent.to_string()),
                None => break,
            }
        }

        let mut found: Option<&String> = None;
        for using in &ctx.usings {
            if !self.type_exists(Some(using), name, arity) {
                continue;
            }
            match found {
                Some(prev) if prev != using => return None,
                _ => found = Some(using),
            }
        }
        found.map(|ns| Some(ns.clone()))
    }

    /// Type named by a dotted path, such as `System.Text.StringBuilder` or `Order`.
    pub fn resolve_path(
        &self,
        types: &mut TypeContext,
        segments: &[String],
        args: Vec<TypeId>,
        ctx: &NameContext,
    ) -> TypeId {
        let Some((name, qualifier)) = segments.split_last() else {
            return TYPE_UNKNOWN;
        };
        if qualifier.is_empty() {
            return match self.resolve_name(name, args.len(), ctx) {
                Some(ns) => types.intern_named(ns.as_deref(), name, args),
                None => TYPE_UNKNOWN,
            };
        }
        let namespace = qualifier.join(".");
        if self.type_exists(Some(&namespace), name, args.len()) {
            types.intern_named(Some(&namespace), name, args)
        } else {
            TYPE_UNKNOWN
        }
    }

    pub fn resolve_type(&self, types: &mut TypeContext, ty: &Type, ctx: &NameContext) -> TypeId {
        match ty {
            Type::Predef(p) => p
                .keyword()
                .and_then(|k| Primitive::from_keyword(k.text()))
                .map_or(TYPE_UNKNOWN, |p| types.primitive(p)),
            Type::Named(n) => {
                let segments: Vec<String> = n.segments().map(|s| s.text().to_string()).collect();
                let args = n
                    .type_args()
                    .map(|list| {
                        list.types()
                            .map(|t| self.resolve_type(types, &t, ctx))
                            .collect()
                    })
                    .unwrap_or_default();
                self.resolve_path(types, &segments, args, ctx)
            }
            Type::Array(a) => {
                let element = self.resolve_opt(types, a.element(), ctx);
                if element.is_unknown() {
                    return TYPE_UNKNOWN;
                }
                types.intern_array(element)
            }
            Type::Nullable(n) => {
                let inner = self.resolve_opt(types, n.inner(), ctx);
                if inner.is_unknown() {
                    return TYPE_UNKNOWN;
                }
                types.intern_nullable(inner)
            }
        }
    }

    pub fn resolve_opt(&self, types: &mut TypeContext, ty: Option<Type>, ctx: &NameContext) -> TypeId {
        ty.map_or(TYPE_UNKNOWN, |t| self.resolve_type(types, &t, ctx))
    }

    fn declared_of(&self, types: &TypeContext, ty: TypeId) -> Option<&DeclaredType> {
        match types.get_type(ty)? {
            TypeShape::Named {
                namespace,
                name,
                args,
            } if args.is_empty() => self.get(namespace.as_deref(), name),
            _ => None,
        }
    }

    /// Field or property type on a declared type.
    pub fn member(&self, types: &TypeContext, ty: TypeId, name: &str) -> Option<TypeId> {
        self.declared_of(types, ty)?.members.get(name).copied()
    }

    /// Method return type on a declared type.
    pub fn method(&self, types: &TypeContext, ty: TypeId, name: &str) -> Option<TypeId> {
        self.declared_of(types, ty)?.methods.get(name).copied()
    }
}
