//! Expression typing.
//!
//! Walks every type member and top-level statement once, recording the type
//! of each expression and variable declarator. Anonymous creations are
//! interned by shape, so equal shapes share a `TypeId`.

use std::collections::HashMap;

use indexmap::IndexMap;
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::ast::{self, Expr, Item, LiteralKind, Member, Stmt};
use crate::parser::{SyntaxKind, SyntaxNode};

use super::declared::{DeclaredTypes, NameContext};
use super::library;
use super::types::{
    AnonField, Primitive, TYPE_LAMBDA, TYPE_NULL, TYPE_UNKNOWN, TypeContext, TypeId, TypeShape,
};

/// Identifies a node across materializations of the same green tree.
pub type NodeKey = (SyntaxKind, TextRange);

pub fn node_key(node: &SyntaxNode) -> NodeKey {
    (node.kind(), node.text_range())
}

/// What a name or dotted prefix in expression position refers to.
enum Resolved {
    Value(TypeId),
    TypeRef(TypeId),
    Namespace(String),
    Unresolved,
}

pub struct Inference<'a> {
    types: &'a mut TypeContext,
    declared: &'a DeclaredTypes,
    node_types: HashMap<NodeKey, TypeId>,
    diagnostics: &'a mut Diagnostics,
    ctx: NameContext,
    this_type: Option<TypeId>,
    scopes: Vec<IndexMap<String, TypeId>>,
}

impl<'a> Inference<'a> {
    pub fn new(
        types: &'a mut TypeContext,
        declared: &'a DeclaredTypes,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            types,
            declared,
            node_types: HashMap::new(),
            diagnostics,
            ctx: NameContext::default(),
            this_type: None,
            scopes: Vec::new(),
        }
    }

    pub fn run(mut self, root: &ast::Root) -> HashMap<NodeKey, TypeId> {
        self.ctx = NameContext::of_root(root);
        // Script context: top-level statements share one scope
        self.scopes.push(IndexMap::new());
        self.items(root.items());
        self.node_types
    }

    fn record(&mut self, node: &SyntaxNode, ty: TypeId) {
        self.node_types.insert(node_key(node), ty);
    }

    fn items(&mut self, items: impl Iterator<Item = Item>) {
        for item in items {
            match item {
                Item::Using(_) => {}
                Item::Namespace(ns) => {
                    let inner = self.ctx.enter_namespace(&ns);
                    let outer = std::mem::replace(&mut self.ctx, inner);
                    self.items(ns.items());
                    self.ctx = outer;
                }
                Item::Type(decl) => self.type_decl(&decl, false),
                Item::Stmt(stmt) => self.stmt(&stmt),
            }
        }
    }

    fn type_decl(&mut self, decl: &ast::TypeDecl, nested: bool) {
        let this_type = match decl.name() {
            Some(name) if !nested => {
                let ns = self.ctx.namespace.clone();
                Some(self.types.intern_named(ns.as_deref(), name.text(), Vec::new()))
            }
            _ => None,
        };
        let outer_this = std::mem::replace(&mut self.this_type, this_type);
        let outer_scopes = std::mem::take(&mut self.scopes);

        for member in decl.members() {
            self.member(&member);
        }

        self.scopes = outer_scopes;
        self.this_type = outer_this;
    }

    fn member(&mut self, member: &Member) {
        match member {
            Member::Field(field) => {
                let ty = self.resolve_type(field.ty());
                for declarator in field.declarators() {
                    if let Some(init) = declarator.initializer() {
                        self.expr(&init);
                    }
                    self.record(declarator.as_cst(), ty);
                }
            }
            Member::Property(prop) => {
                if let Some(value) = prop.value() {
                    self.expr(&value);
                }
                let accessors = prop.accessors();
                for accessor in accessors.iter().flat_map(|l| l.accessors()) {
                    if let Some(body) = accessor.body() {
                        self.block(&body);
                    }
                }
            }
            Member::Method(method) => {
                self.scopes.push(IndexMap::new());
                self.params(method.params());
                if let Some(body) = method.body() {
                    self.block(&body);
                }
                if let Some(body) = method.expr_body() {
                    self.expr(&body);
                }
                self.scopes.pop();
            }
            Member::Constructor(ctor) => {
                self.scopes.push(IndexMap::new());
                self.params(ctor.params());
                if let Some(body) = ctor.body() {
                    self.block(&body);
                }
                self.scopes.pop();
            }
            Member::Type(nested) => self.type_decl(nested, true),
        }
    }

    fn params(&mut self, params: impl Iterator<Item = ast::Param>) {
        for param in params {
            let ty = self.resolve_type(param.ty());
            if let Some(name) = param.name() {
                self.bind(name.text(), ty);
            }
        }
    }

    fn resolve_type(&mut self, ty: Option<ast::Type>) -> TypeId {
        self.declared.resolve_opt(self.types, ty, &self.ctx)
    }

    fn bind(&mut self, name: &str, ty: TypeId) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), ty);
        }
    }

    fn lookup_value(&self, name: &str) -> Option<TypeId> {
        if let Some(ty) = self.scopes.iter().rev().find_map(|s| s.get(name)) {
            return Some(*ty);
        }
        let this_type = self.this_type?;
        self.declared.member(&*self.types, this_type, name)
    }

    fn block(&mut self, block: &ast::Block) {
        self.scopes.push(IndexMap::new());
        for stmt in block.statements() {
            self.stmt(&stmt);
        }
        self.scopes.pop();
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => self.block(block),
            Stmt::Local(local) => {
                let declared_ty = if local.is_var() {
                    None
                } else {
                    Some(self.resolve_type(local.ty()))
                };
                for declarator in local.declarators() {
                    let init_ty = declarator.initializer().map(|init| self.expr(&init));
                    let ty = declared_ty.or(init_ty).unwrap_or(TYPE_UNKNOWN);
                    self.record(declarator.as_cst(), ty);
                    if let Some(name) = declarator.name() {
                        self.bind(name.text(), ty);
                    }
                }
            }
            Stmt::Expr(s) => {
                if let Some(e) = s.expr() {
                    self.expr(&e);
                }
            }
            Stmt::Return(s) => {
                if let Some(e) = s.expr() {
                    self.expr(&e);
                }
            }
            Stmt::If(s) => {
                if let Some(cond) = s.condition() {
                    self.expr(&cond);
                }
                for branch in s.branches() {
                    self.scopes.push(IndexMap::new());
                    self.stmt(&branch);
                    self.scopes.pop();
                }
            }
            Stmt::Foreach(s) => {
                let iterable = s.iterable().map_or(TYPE_UNKNOWN, |e| self.expr(&e));
                let ty = if s.is_var() {
                    library::element_type(self.types, iterable).unwrap_or(TYPE_UNKNOWN)
                } else {
                    self.resolve_type(s.ty())
                };
                self.scopes.push(IndexMap::new());
                if let Some(name) = s.name() {
                    self.bind(name.text(), ty);
                }
                if let Some(body) = s.body() {
                    self.stmt(&body);
                }
                self.scopes.pop();
            }
        }
    }

    fn expr(&mut self, expr: &Expr) -> TypeId {
        let ty = self.expr_inner(expr);
        self.record(expr.as_cst(), ty);
        ty
    }

    fn expr_inner(&mut self, expr: &Expr) -> TypeId {
        match expr {
            Expr::Literal(lit) => self.literal(lit),
            Expr::Name(_) | Expr::Member(_) => match self.resolve(expr) {
                Resolved::Value(ty) => ty,
                _ => TYPE_UNKNOWN,
            },
            Expr::This(_) => self.this_type.unwrap_or(TYPE_UNKNOWN),
            Expr::Paren(p) => p.expr().map_or(TYPE_UNKNOWN, |e| self.expr(&e)),
            Expr::Call(call) => self.call(call),
            Expr::Index(index) => {
                let receiver = index.receiver().map_or(TYPE_UNKNOWN, |e| self.expr(&e));
                if let Some(i) = index.index() {
                    self.expr(&i);
                }
                library::indexer(self.types, receiver).unwrap_or(TYPE_UNKNOWN)
            }
            Expr::Prefix(prefix) => {
                let operand = prefix.operand().map_or(TYPE_UNKNOWN, |e| self.expr(&e));
                match prefix.op().map(|t| t.kind()) {
                    Some(SyntaxKind::Bang) => self.types.primitive(Primitive::Bool),
                    _ => operand,
                }
            }
            Expr::Postfix(postfix) => postfix.operand().map_or(TYPE_UNKNOWN, |e| self.expr(&e)),
            Expr::Binary(binary) => self.binary(binary),
            Expr::Assign(assign) => {
                if let Some(target) = assign.target() {
                    self.expr(&target);
                }
                assign.value().map_or(TYPE_UNKNOWN, |e| self.expr(&e))
            }
            Expr::Conditional(cond) => {
                if let Some(c) = cond.condition() {
                    self.expr(&c);
                }
                let then_ty = cond.then_branch().map_or(TYPE_UNKNOWN, |e| self.expr(&e));
                let else_ty = cond.else_branch().map_or(TYPE_UNKNOWN, |e| self.expr(&e));
                if then_ty == TYPE_NULL { else_ty } else { then_ty }
            }
            Expr::Cast(cast) => {
                if let Some(e) = cast.expr() {
                    self.expr(&e);
                }
                self.resolve_type(cast.ty())
            }
            Expr::Lambda(lambda) => {
                self.lambda(lambda, &[]);
                TYPE_LAMBDA
            }
            Expr::AnonObject(anon) => self.anonymous(anon),
            Expr::Object(object) => {
                for arg in object.args() {
                    self.expr(&arg);
                }
                if let Some(init) = object.initializer() {
                    for member in init.members() {
                        if let Some(value) = member.value() {
                            self.expr(&value);
                        }
                    }
                    for element in init.elements() {
                        self.expr(&element);
                    }
                }
                self.resolve_type(object.ty())
            }
            Expr::Array(array) => self.array(array),
        }
    }

    fn literal(&mut self, lit: &ast::Literal) -> TypeId {
        let Some(kind) = lit.kind() else {
            return TYPE_UNKNOWN;
        };
        let text = lit
            .token()
            .map(|t| t.text().to_ascii_lowercase())
            .unwrap_or_default();
        let primitive = match kind {
            LiteralKind::Null => return TYPE_NULL,
            LiteralKind::String => Primitive::String,
            LiteralKind::Char => Primitive::Char,
            LiteralKind::Bool => Primitive::Bool,
            LiteralKind::Int => int_literal_type(&text),
            LiteralKind::Real => match text.chars().last() {
                Some('f') => Primitive::Float,
                Some('m') => Primitive::Decimal,
                _ => Primitive::Double,
            },
        };
        self.types.primitive(primitive)
    }

    fn binary(&mut self, binary: &ast::BinaryExpr) -> TypeId {
        let lhs = binary.lhs().map_or(TYPE_UNKNOWN, |e| self.expr(&e));
        let rhs = binary.rhs().map_or(TYPE_UNKNOWN, |e| self.expr(&e));
        let Some(op) = binary.op().map(|t| t.kind()) else {
            return TYPE_UNKNOWN;
        };

        let string = self.types.primitive(Primitive::String);
        match op {
            SyntaxKind::EqEq
            | SyntaxKind::BangEq
            | SyntaxKind::Lt
            | SyntaxKind::Gt
            | SyntaxKind::LtEq
            | SyntaxKind::GtEq
            | SyntaxKind::AmpAmp
            | SyntaxKind::PipePipe => self.types.primitive(Primitive::Bool),
            SyntaxKind::QuestionQuestion => match self.types.get_type(lhs) {
                Some(TypeShape::Nullable(inner))
                    if !matches!(self.types.get_type(rhs), Some(TypeShape::Nullable(_))) =>
                {
                    *inner
                }
                Some(TypeShape::Null) => rhs,
                _ => lhs,
            },
            SyntaxKind::Plus if lhs == string || rhs == string => string,
            _ => {
                let a = self.types.get_type(lhs).and_then(TypeShape::as_primitive);
                let b = self.types.get_type(rhs).and_then(TypeShape::as_primitive);
                match (a, b) {
                    (Some(a), Some(b)) if a.is_numeric() && b.is_numeric() => {
                        self.types.primitive(Primitive::promote(a, b))
                    }
                    _ => TYPE_UNKNOWN,
                }
            }
        }
    }

    fn resolve(&mut self, expr: &Expr) -> Resolved {
        match expr {
            Expr::Name(name_ref) => {
                let Some(token) = name_ref.name() else {
                    return Resolved::Unresolved;
                };
                if token.kind() == SyntaxKind::PredefinedType {
                    return match Primitive::from_keyword(token.text()) {
                        Some(p) => Resolved::TypeRef(self.types.primitive(p)),
                        None => Resolved::Unresolved,
                    };
                }
                let name = token.text();
                if let Some(ty) = self.lookup_value(name) {
                    self.record(name_ref.as_cst(), ty);
                    return Resolved::Value(ty);
                }
                let ty = self
                    .declared
                    .resolve_path(self.types, &[name.to_string()], Vec::new(), &self.ctx);
                if !ty.is_unknown() {
                    return Resolved::TypeRef(ty);
                }
                if self.declared.is_namespace(name) {
                    return Resolved::Namespace(name.to_string());
                }
                Resolved::Unresolved
            }
            Expr::Member(access) => {
                let Some(name) = access.name() else {
                    return Resolved::Unresolved;
                };
                let name = name.text();
                let receiver = match access.receiver() {
                    Some(r) => self.resolve(&r),
                    None => Resolved::Unresolved,
                };
                let resolved = match receiver {
                    Resolved::Namespace(ns) => {
                        let mut segments: Vec<String> = ns.split('.').map(str::to_string).collect();
                        segments.push(name.to_string());
                        let ty = self
                            .declared
                            .resolve_path(self.types, &segments, Vec::new(), &self.ctx);
                        let path = segments.join(".");
                        if !ty.is_unknown() {
                            Resolved::TypeRef(ty)
                        } else if self.declared.is_namespace(&path) {
                            Resolved::Namespace(path)
                        } else {
                            Resolved::Unresolved
                        }
                    }
                    Resolved::TypeRef(owner) => self
                        .declared
                        .member(self.types, owner, name)
                        .or_else(|| library::static_member(self.types, owner, name))
                        .map_or(Resolved::Unresolved, Resolved::Value),
                    Resolved::Value(receiver) => self
                        .declared
                        .member(self.types, receiver, name)
                        .or_else(|| library::instance_member(self.types, receiver, name))
                        .map_or(Resolved::Unresolved, Resolved::Value),
                    Resolved::Unresolved => Resolved::Unresolved,
                };
                if let Resolved::Value(ty) = resolved {
                    self.record(access.as_cst(), ty);
                }
                resolved
            }
            other => Resolved::Value(self.expr(other)),
        }
    }

    fn call(&mut self, call: &ast::Call) -> TypeId {
        let args: Vec<Expr> = call.args().collect();
        let Some(callee) = call.callee() else {
            self.args(&args);
            return TYPE_UNKNOWN;
        };

        match &callee {
            Expr::Member(access) => {
                let Some(name) = access.name() else {
                    self.args(&args);
                    return TYPE_UNKNOWN;
                };
                let name = name.text();
                let receiver = match access.receiver() {
                    Some(r) => self.resolve(&r),
                    None => Resolved::Unresolved,
                };
                match receiver {
                    Resolved::Value(receiver) => {
                        if let Some(result) = self.linq_call(receiver, name, &args) {
                            return result;
                        }
                        self.args(&args);
                        self.declared
                            .method(self.types, receiver, name)
                            .or_else(|| library::instance_method(self.types, receiver, name))
                            .unwrap_or(TYPE_UNKNOWN)
                    }
                    Resolved::TypeRef(owner) => {
                        self.args(&args);
                        self.declared
                            .method(self.types, owner, name)
                            .or_else(|| library::static_method(self.types, owner, name))
                            .unwrap_or(TYPE_UNKNOWN)
                    }
                    Resolved::Namespace(_) | Resolved::Unresolved => {
                        self.args(&args);
                        TYPE_UNKNOWN
                    }
                }
            }
            Expr::Name(name_ref) => {
                self.args(&args);
                let this_type = self.this_type;
                name_ref
                    .name()
                    .zip(this_type)
                    .and_then(|(name, this)| self.declared.method(&*self.types, this, name.text()))
                    .unwrap_or(TYPE_UNKNOWN)
            }
            other => {
                self.expr(other);
                self.args(&args);
                TYPE_UNKNOWN
            }
        }
    }

    /// LINQ operator over an enumerable receiver; lambdas see the element type.
    fn linq_call(&mut self, receiver: TypeId, method: &str, args: &[Expr]) -> Option<TypeId> {
        let is_string = self.types.get_type(receiver)?.as_primitive() == Some(Primitive::String);
        let is_linq = library::takes_element_lambda(method)
            || matches!(method, "ToList" | "ToArray" | "Distinct" | "Reverse");
        if is_string || !is_linq {
            return None;
        }
        let element = library::element_type(self.types, receiver)?;

        let mut projected = None;
        for arg in args {
            match arg {
                Expr::Lambda(lambda) => {
                    let result = self.lambda(lambda, &[element]);
                    self.record(lambda.as_cst(), TYPE_LAMBDA);
                    projected.get_or_insert(result);
                }
                other => {
                    self.expr(other);
                }
            }
        }
        Some(library::linq(self.types, method, element, projected).unwrap_or(TYPE_UNKNOWN))
    }

    fn args(&mut self, args: &[Expr]) {
        for arg in args {
            self.expr(arg);
        }
    }

    /// Types a lambda body with its parameters bound to `params`; returns the body type.
    fn lambda(&mut self, lambda: &ast::Lambda, params: &[TypeId]) -> TypeId {
        self.scopes.push(IndexMap::new());
        for (i, param) in lambda.params().enumerate() {
            let ty = params.get(i).copied().unwrap_or(TYPE_UNKNOWN);
            self.record(param.as_cst(), ty);
            if let Some(name) = param.name() {
                self.bind(name.text(), ty);
            }
        }

        let result = if let Some(body) = lambda.body_expr() {
            self.expr(&body)
        } else if let Some(block) = lambda.body_block() {
            self.block(&block);
            self.block_result(lambda.as_cst(), &block)
        } else {
            TYPE_UNKNOWN
        };

        self.scopes.pop();
        result
    }

    /// Type of the first `return` that belongs to `lambda` itself.
    fn block_result(&self, lambda: &SyntaxNode, block: &ast::Block) -> TypeId {
        block
            .as_cst()
            .descendants()
            .filter_map(ast::ReturnStmt::cast)
            .filter(|ret| {
                ret.as_cst()
                    .ancestors()
                    .find(|a| a.kind() == SyntaxKind::Lambda)
                    .is_some_and(|owner| &owner == lambda)
            })
            .find_map(|ret| ret.expr())
            .and_then(|e| self.node_types.get(&node_key(e.as_cst())).copied())
            .unwrap_or(TYPE_UNKNOWN)
    }

    fn anonymous(&mut self, anon: &ast::AnonObjectCreation) -> TypeId {
        let mut fields: Vec<AnonField> = Vec::new();
        let mut valid = true;

        for member in anon.members() {
            let ty = member.value().map_or(TYPE_UNKNOWN, |e| self.expr(&e));
            let Some(name) = member.name() else {
                self.diagnostics
                    .report(DiagnosticKind::InvalidAnonymousMember, member.as_cst().text_range())
                    .emit();
                valid = false;
                continue;
            };
            if fields.iter().any(|f| f.name == name) {
                self.diagnostics
                    .report(DiagnosticKind::DuplicateAnonymousMember, member.as_cst().text_range())
                    .message(name)
                    .emit();
                valid = false;
                continue;
            }
            fields.push(AnonField { name, type_id: ty });
        }

        if !valid {
            return TYPE_UNKNOWN;
        }
        self.types.intern_anonymous(fields)
    }

    fn array(&mut self, array: &ast::ArrayCreation) -> TypeId {
        // `new T[n]`: the size is the only direct expression child
        for size in array.as_cst().children().filter_map(Expr::cast) {
            self.expr(&size);
        }
        let elements: Vec<TypeId> = array
            .initializer()
            .map(|init| init.elements().collect::<Vec<_>>())
            .unwrap_or_default()
            .iter()
            .map(|e| self.expr(e))
            .collect();

        match array.ty() {
            Some(ty) if array.is_sized() => {
                let element = self.resolve_type(Some(ty));
                if element.is_unknown() {
                    return TYPE_UNKNOWN;
                }
                self.types.intern_array(element)
            }
            Some(ty) => self.resolve_type(Some(ty)),
            None => {
                let element = elements
                    .into_iter()
                    .find(|t| *t != TYPE_NULL && !t.is_unknown());
                match element {
                    Some(element) => self.types.intern_array(element),
                    None => TYPE_UNKNOWN,
                }
            }
        }
    }
}

fn int_literal_type(text: &str) -> Primitive {
    let digits_end = text.trim_end_matches(['u', 'l']);
    let suffix = &text[digits_end.len()..];
    match (suffix.contains('u'), suffix.contains('l')) {
        (true, true) => Primitive::ULong,
        (false, true) => Primitive::Long,
        (true, false) => Primitive::UInt,
        (false, false) => Primitive::Int,
    }
}
