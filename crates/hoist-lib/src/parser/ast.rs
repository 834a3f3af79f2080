//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(UsingDirective, UsingDirective);
ast_node!(NamespaceDecl, NamespaceDecl);
ast_node!(Path, Path);
ast_node!(TypeDecl, TypeDecl);
ast_node!(BaseList, BaseList);
ast_node!(FieldDecl, FieldDecl);
ast_node!(PropertyDecl, PropertyDecl);
ast_node!(AccessorList, AccessorList);
ast_node!(Accessor, Accessor);
ast_node!(MethodDecl, MethodDecl);
ast_node!(ConstructorDecl, ConstructorDecl);
ast_node!(ParamList, ParamList);
ast_node!(Param, Param);
ast_node!(PredefType, PredefType);
ast_node!(NamedType, NamedType);
ast_node!(TypeArgList, TypeArgList);
ast_node!(ArrayType, ArrayType);
ast_node!(NullableType, NullableType);
ast_node!(Block, Block);
ast_node!(LocalDecl, LocalDecl);
ast_node!(VarDeclarator, VarDeclarator);
ast_node!(ExprStmt, ExprStmt);
ast_node!(ReturnStmt, ReturnStmt);
ast_node!(IfStmt, IfStmt);
ast_node!(ForeachStmt, ForeachStmt);
ast_node!(Literal, Literal);
ast_node!(NameRef, NameRef);
ast_node!(ThisExpr, ThisExpr);
ast_node!(ParenExpr, ParenExpr);
ast_node!(MemberAccess, MemberAccess);
ast_node!(Call, Call);
ast_node!(ArgList, ArgList);
ast_node!(IndexExpr, IndexExpr);
ast_node!(PrefixExpr, PrefixExpr);
ast_node!(PostfixExpr, PostfixExpr);
ast_node!(BinaryExpr, BinaryExpr);
ast_node!(AssignExpr, AssignExpr);
ast_node!(ConditionalExpr, ConditionalExpr);
ast_node!(CastExpr, CastExpr);
ast_node!(Lambda, Lambda);
ast_node!(LambdaParamList, LambdaParamList);
ast_node!(LambdaParam, LambdaParam);
ast_node!(AnonObjectCreation, AnonObjectCreation);
ast_node!(AnonMember, AnonMember);
ast_node!(ObjectCreation, ObjectCreation);
ast_node!(ObjectInit, ObjectInit);
ast_node!(MemberInit, MemberInit);
ast_node!(ArrayCreation, ArrayCreation);
ast_node!(ArrayInit, ArrayInit);

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens().filter_map(|it| it.into_token())
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    tokens(node).find(|t| t.kind() == kind)
}

/// Members of a compilation unit or namespace body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Using(UsingDirective),
    Namespace(NamespaceDecl),
    Type(TypeDecl),
    /// Top-level statement (script context).
    Stmt(Stmt),
}

impl Item {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::UsingDirective => UsingDirective::cast(node).map(Item::Using),
            SyntaxKind::NamespaceDecl => NamespaceDecl::cast(node).map(Item::Namespace),
            SyntaxKind::TypeDecl => TypeDecl::cast(node).map(Item::Type),
            _ => Stmt::cast(node).map(Item::Stmt),
        }
    }
}

impl Root {
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    pub fn usings(&self) -> impl Iterator<Item = UsingDirective> + '_ {
        self.0.children().filter_map(UsingDirective::cast)
    }

    pub fn type_decls(&self) -> impl Iterator<Item = TypeDecl> + '_ {
        self.0.children().filter_map(TypeDecl::cast)
    }
}

impl UsingDirective {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }
}

impl Path {
    pub fn segments(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Id)
    }

    /// Dotted text without trivia: `System.Collections.Generic`.
    pub fn text(&self) -> String {
        self.segments()
            .map(|t| t.text().to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl NamespaceDecl {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }

    /// File-scoped namespaces (`namespace N;`) own the rest of the file.
    pub fn is_file_scoped(&self) -> bool {
        token(&self.0, SyntaxKind::Semicolon).is_some()
    }

    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    pub fn usings(&self) -> impl Iterator<Item = UsingDirective> + '_ {
        self.0.children().filter_map(UsingDirective::cast)
    }

    pub fn type_decls(&self) -> impl Iterator<Item = TypeDecl> + '_ {
        self.0.children().filter_map(TypeDecl::cast)
    }
}

/// Class member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Type(TypeDecl),
}

impl Member {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::FieldDecl => FieldDecl::cast(node).map(Member::Field),
            SyntaxKind::PropertyDecl => PropertyDecl::cast(node).map(Member::Property),
            SyntaxKind::MethodDecl => MethodDecl::cast(node).map(Member::Method),
            SyntaxKind::ConstructorDecl => ConstructorDecl::cast(node).map(Member::Constructor),
            SyntaxKind::TypeDecl => TypeDecl::cast(node).map(Member::Type),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Member::Field(n) => n.as_cst(),
            Member::Property(n) => n.as_cst(),
            Member::Method(n) => n.as_cst(),
            Member::Constructor(n) => n.as_cst(),
            Member::Type(n) => n.as_cst(),
        }
    }
}

impl TypeDecl {
    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0).filter(|t| t.kind().is_modifier())
    }

    pub fn has_modifier(&self, kind: SyntaxKind) -> bool {
        self.modifiers().any(|t| t.kind() == kind)
    }

    pub fn is_partial(&self) -> bool {
        self.has_modifier(SyntaxKind::KwPartial)
    }

    /// `class` or `struct` keyword.
    pub fn keyword(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| matches!(t.kind(), SyntaxKind::KwClass | SyntaxKind::KwStruct))
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn base_list(&self) -> Option<BaseList> {
        self.0.children().find_map(BaseList::cast)
    }

    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.0.children().filter_map(Member::cast)
    }

    pub fn r_brace(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::BraceClose)
    }
}

impl BaseList {
    pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
        self.0.children().filter_map(Type::cast)
    }
}

impl FieldDecl {
    pub fn is_static(&self) -> bool {
        token(&self.0, SyntaxKind::KwStatic).is_some()
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VarDeclarator> + '_ {
        self.0.children().filter_map(VarDeclarator::cast)
    }
}

impl PropertyDecl {
    pub fn is_static(&self) -> bool {
        token(&self.0, SyntaxKind::KwStatic).is_some()
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn accessors(&self) -> Option<AccessorList> {
        self.0.children().find_map(AccessorList::cast)
    }

    /// Initializer after `= ` or expression body after `=>`.
    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl AccessorList {
    pub fn accessors(&self) -> impl Iterator<Item = Accessor> + '_ {
        self.0.children().filter_map(Accessor::cast)
    }
}

impl Accessor {
    /// `get` or `set`.
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl MethodDecl {
    pub fn is_static(&self) -> bool {
        token(&self.0, SyntaxKind::KwStatic).is_some()
    }

    /// `None` for `void` methods.
    pub fn return_type(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        self.0
            .children()
            .find_map(ParamList::cast)
            .into_iter()
            .flat_map(|list| list.0.children().filter_map(Param::cast).collect::<Vec<_>>())
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    pub fn expr_body(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ConstructorDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        self.0
            .children()
            .find_map(ParamList::cast)
            .into_iter()
            .flat_map(|list| list.0.children().filter_map(Param::cast).collect::<Vec<_>>())
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl Param {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}

/// Type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Predef(PredefType),
    Named(NamedType),
    Array(ArrayType),
    Nullable(NullableType),
}

impl Type {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PredefType => PredefType::cast(node).map(Type::Predef),
            SyntaxKind::NamedType => NamedType::cast(node).map(Type::Named),
            SyntaxKind::ArrayType => ArrayType::cast(node).map(Type::Array),
            SyntaxKind::NullableType => NullableType::cast(node).map(Type::Nullable),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Type::Predef(n) => n.as_cst(),
            Type::Named(n) => n.as_cst(),
            Type::Array(n) => n.as_cst(),
            Type::Nullable(n) => n.as_cst(),
        }
    }
}

impl PredefType {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::PredefinedType)
    }
}

impl NamedType {
    pub fn segments(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn type_args(&self) -> Option<TypeArgList> {
        self.0.children().find_map(TypeArgList::cast)
    }
}

impl TypeArgList {
    pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
        self.0.children().filter_map(Type::cast)
    }
}

impl ArrayType {
    pub fn element(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

impl NullableType {
    pub fn inner(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

/// Statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Block(Block),
    Local(LocalDecl),
    Expr(ExprStmt),
    Return(ReturnStmt),
    If(IfStmt),
    Foreach(ForeachStmt),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Block => Block::cast(node).map(Stmt::Block),
            SyntaxKind::LocalDecl => LocalDecl::cast(node).map(Stmt::Local),
            SyntaxKind::ExprStmt => ExprStmt::cast(node).map(Stmt::Expr),
            SyntaxKind::ReturnStmt => ReturnStmt::cast(node).map(Stmt::Return),
            SyntaxKind::IfStmt => IfStmt::cast(node).map(Stmt::If),
            SyntaxKind::ForeachStmt => ForeachStmt::cast(node).map(Stmt::Foreach),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Stmt::Block(n) => n.as_cst(),
            Stmt::Local(n) => n.as_cst(),
            Stmt::Expr(n) => n.as_cst(),
            Stmt::Return(n) => n.as_cst(),
            Stmt::If(n) => n.as_cst(),
            Stmt::Foreach(n) => n.as_cst(),
        }
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl LocalDecl {
    /// Declared with `var`: the type comes from the initializer.
    pub fn is_var(&self) -> bool {
        token(&self.0, SyntaxKind::KwVar).is_some()
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VarDeclarator> + '_ {
        self.0.children().filter_map(VarDeclarator::cast)
    }
}

impl VarDeclarator {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn initializer(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ExprStmt {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ReturnStmt {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl IfStmt {
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// Then-branch followed by the optional else-branch.
    pub fn branches(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl ForeachStmt {
    pub fn is_var(&self) -> bool {
        token(&self.0, SyntaxKind::KwVar).is_some()
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn iterable(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn body(&self) -> Option<Stmt> {
        self.0.children().find_map(Stmt::cast)
    }
}

/// Expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Literal(Literal),
    Name(NameRef),
    This(ThisExpr),
    Paren(ParenExpr),
    Member(MemberAccess),
    Call(Call),
    Index(IndexExpr),
    Prefix(PrefixExpr),
    Postfix(PostfixExpr),
    Binary(BinaryExpr),
    Assign(AssignExpr),
    Conditional(ConditionalExpr),
    Cast(CastExpr),
    Lambda(Lambda),
    AnonObject(AnonObjectCreation),
    Object(ObjectCreation),
    Array(ArrayCreation),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Literal => Literal::cast(node).map(Expr::Literal),
            SyntaxKind::NameRef => NameRef::cast(node).map(Expr::Name),
            SyntaxKind::ThisExpr => ThisExpr::cast(node).map(Expr::This),
            SyntaxKind::ParenExpr => ParenExpr::cast(node).map(Expr::Paren),
            SyntaxKind::MemberAccess => MemberAccess::cast(node).map(Expr::Member),
            SyntaxKind::Call => Call::cast(node).map(Expr::Call),
            SyntaxKind::IndexExpr => IndexExpr::cast(node).map(Expr::Index),
            SyntaxKind::PrefixExpr => PrefixExpr::cast(node).map(Expr::Prefix),
            SyntaxKind::PostfixExpr => PostfixExpr::cast(node).map(Expr::Postfix),
            SyntaxKind::BinaryExpr => BinaryExpr::cast(node).map(Expr::Binary),
            SyntaxKind::AssignExpr => AssignExpr::cast(node).map(Expr::Assign),
            SyntaxKind::ConditionalExpr => ConditionalExpr::cast(node).map(Expr::Conditional),
            SyntaxKind::CastExpr => CastExpr::cast(node).map(Expr::Cast),
            SyntaxKind::Lambda => Lambda::cast(node).map(Expr::Lambda),
            SyntaxKind::AnonObjectCreation => {
                AnonObjectCreation::cast(node).map(Expr::AnonObject)
            }
            SyntaxKind::ObjectCreation => ObjectCreation::cast(node).map(Expr::Object),
            SyntaxKind::ArrayCreation => ArrayCreation::cast(node).map(Expr::Array),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Literal(n) => n.as_cst(),
            Expr::Name(n) => n.as_cst(),
            Expr::This(n) => n.as_cst(),
            Expr::Paren(n) => n.as_cst(),
            Expr::Member(n) => n.as_cst(),
            Expr::Call(n) => n.as_cst(),
            Expr::Index(n) => n.as_cst(),
            Expr::Prefix(n) => n.as_cst(),
            Expr::Postfix(n) => n.as_cst(),
            Expr::Binary(n) => n.as_cst(),
            Expr::Assign(n) => n.as_cst(),
            Expr::Conditional(n) => n.as_cst(),
            Expr::Cast(n) => n.as_cst(),
            Expr::Lambda(n) => n.as_cst(),
            Expr::AnonObject(n) => n.as_cst(),
            Expr::Object(n) => n.as_cst(),
            Expr::Array(n) => n.as_cst(),
        }
    }

    fn children_of(node: &SyntaxNode) -> impl Iterator<Item = Expr> + '_ {
        node.children().filter_map(Expr::cast)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    Char,
    Int,
    Real,
    Bool,
    Null,
}

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).next()
    }

    pub fn kind(&self) -> Option<LiteralKind> {
        let kind = match self.token()?.kind() {
            SyntaxKind::StringLiteral => LiteralKind::String,
            SyntaxKind::CharLiteral => LiteralKind::Char,
            SyntaxKind::IntLiteral => LiteralKind::Int,
            SyntaxKind::RealLiteral => LiteralKind::Real,
            SyntaxKind::KwTrue | SyntaxKind::KwFalse => LiteralKind::Bool,
            SyntaxKind::KwNull => LiteralKind::Null,
            _ => return None,
        };
        Some(kind)
    }
}

impl NameRef {
    /// Identifier, or a type keyword used as a receiver (`string.Join`).
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| matches!(t.kind(), SyntaxKind::Id | SyntaxKind::PredefinedType))
    }
}

impl ParenExpr {
    pub fn expr(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }
}

impl MemberAccess {
    pub fn receiver(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}

impl Call {
    pub fn callee(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }

    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .children()
            .find_map(ArgList::cast)
            .into_iter()
            .flat_map(|list| list.args().collect::<Vec<_>>())
    }
}

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        Expr::children_of(&self.0)
    }
}

impl IndexExpr {
    pub fn receiver(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }

    pub fn index(&self) -> Option<Expr> {
        Expr::children_of(&self.0).nth(1)
    }
}

impl PrefixExpr {
    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }

    pub fn operand(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }
}

impl PostfixExpr {
    pub fn operand(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }

    pub fn rhs(&self) -> Option<Expr> {
        Expr::children_of(&self.0).nth(1)
    }
}

impl AssignExpr {
    pub fn target(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }

    pub fn value(&self) -> Option<Expr> {
        Expr::children_of(&self.0).nth(1)
    }
}

impl ConditionalExpr {
    pub fn condition(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }

    pub fn then_branch(&self) -> Option<Expr> {
        Expr::children_of(&self.0).nth(1)
    }

    pub fn else_branch(&self) -> Option<Expr> {
        Expr::children_of(&self.0).nth(2)
    }
}

impl CastExpr {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn expr(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }
}

impl Lambda {
    pub fn params(&self) -> impl Iterator<Item = LambdaParam> + '_ {
        self.0
            .children()
            .find_map(LambdaParamList::cast)
            .into_iter()
            .flat_map(|list| list.0.children().filter_map(LambdaParam::cast).collect::<Vec<_>>())
    }

    pub fn body_expr(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }

    pub fn body_block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl LambdaParam {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}

impl AnonObjectCreation {
    pub fn new_keyword(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::KwNew)
    }

    pub fn members(&self) -> impl Iterator<Item = AnonMember> + '_ {
        self.0.children().filter_map(AnonMember::cast)
    }
}

impl AnonMember {
    /// Explicit `Name =` part, if written.
    pub fn name_token(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Equals)?;
        token(&self.0, SyntaxKind::Id)
    }

    pub fn value(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }

    /// Member name: explicit, or projected from a simple name or member access.
    pub fn name(&self) -> Option<String> {
        if let Some(name) = self.name_token() {
            return Some(name.text().to_string());
        }
        let projected = match self.value()? {
            Expr::Name(n) => n.name(),
            Expr::Member(m) => m.name(),
            _ => None,
        }?;
        Some(projected.text().to_string())
    }
}

impl ObjectCreation {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .children()
            .find_map(ArgList::cast)
            .into_iter()
            .flat_map(|list| list.args().collect::<Vec<_>>())
    }

    pub fn initializer(&self) -> Option<ObjectInit> {
        self.0.children().find_map(ObjectInit::cast)
    }
}

impl ObjectInit {
    pub fn members(&self) -> impl Iterator<Item = MemberInit> + '_ {
        self.0.children().filter_map(MemberInit::cast)
    }

    /// Collection-initializer elements.
    pub fn elements(&self) -> impl Iterator<Item = Expr> + '_ {
        Expr::children_of(&self.0)
    }
}

impl MemberInit {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn value(&self) -> Option<Expr> {
        Expr::children_of(&self.0).next()
    }
}

impl ArrayCreation {
    /// Array type for `new T[] { ... }`, element type for `new T[n]`, `None` for `new[]`.
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn is_sized(&self) -> bool {
        Expr::children_of(&self.0).next().is_some()
    }

    pub fn initializer(&self) -> Option<ArrayInit> {
        self.0.children().find_map(ArrayInit::cast)
    }
}

impl ArrayInit {
    pub fn elements(&self) -> impl Iterator<Item = Expr> + '_ {
        Expr::children_of(&self.0)
    }
}
