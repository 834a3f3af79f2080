//! Syntax kinds for the host language.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds lack token/regex attributes.
//! `CsLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(":")]
    Colon,

    #[token("?")]
    Question,

    #[token("??")]
    QuestionQuestion,

    /// Lambda arrow and expression bodies.
    #[token("=>")]
    FatArrow,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("=")]
    Equals,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("!")]
    Bang,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    /// Also opens type argument lists.
    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    /// Regular, verbatim (`@"..."`) and interpolated (`$"..."`) strings.
    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r#"@"(?:[^"]|"")*""#)]
    #[regex(r#"\$"(?:[^"\\\n]|\\.)*""#)]
    StringLiteral,

    #[regex(r"'(?:[^'\\\n]|\\.)+'")]
    CharLiteral,

    /// Integer literal, optionally hex, with `u`/`l` suffixes.
    #[regex(r"[0-9][0-9_]*(?:[uU][lL]?|[lL][uU]?)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+(?:[uU][lL]?|[lL][uU]?)?")]
    IntLiteral,

    /// Real literal. A `f`, `d` or `m` suffix picks float, double or decimal.
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*(?:[eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[fFdDmM]")]
    RealLiteral,

    #[token("using")]
    KwUsing,

    #[token("namespace")]
    KwNamespace,

    #[token("class")]
    KwClass,

    #[token("struct")]
    KwStruct,

    #[token("public")]
    KwPublic,

    #[token("private")]
    KwPrivate,

    #[token("protected")]
    KwProtected,

    #[token("internal")]
    KwInternal,

    #[token("static")]
    KwStatic,

    #[token("partial")]
    KwPartial,

    #[token("readonly")]
    KwReadonly,

    #[token("abstract")]
    KwAbstract,

    #[token("sealed")]
    KwSealed,

    #[token("var")]
    KwVar,

    #[token("new")]
    KwNew,

    #[token("return")]
    KwReturn,

    #[token("if")]
    KwIf,

    #[token("else")]
    KwElse,

    #[token("foreach")]
    KwForeach,

    #[token("in")]
    KwIn,

    #[token("this")]
    KwThis,

    #[token("null")]
    KwNull,

    #[token("true")]
    KwTrue,

    #[token("false")]
    KwFalse,

    #[token("void")]
    KwVoid,

    /// Built-in type keywords: `int`, `string`, `object`, ...
    #[token("bool")]
    #[token("byte")]
    #[token("char")]
    #[token("decimal")]
    #[token("double")]
    #[token("float")]
    #[token("int")]
    #[token("long")]
    #[token("object")]
    #[token("short")]
    #[token("string")]
    #[token("uint")]
    #[token("ulong")]
    PredefinedType,

    /// Identifier. Defined after keywords so they take precedence.
    /// `get` and `set` are contextual and lex as identifiers.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    UsingDirective,
    NamespaceDecl,
    /// Dotted name in `using` and `namespace` headers.
    Path,
    /// `class` or `struct` declaration.
    TypeDecl,
    BaseList,
    FieldDecl,
    PropertyDecl,
    AccessorList,
    Accessor,
    MethodDecl,
    ConstructorDecl,
    ParamList,
    Param,

    PredefType,
    NamedType,
    TypeArgList,
    ArrayType,
    NullableType,

    Block,
    LocalDecl,
    VarDeclarator,
    ExprStmt,
    ReturnStmt,
    IfStmt,
    ForeachStmt,

    Literal,
    NameRef,
    ThisExpr,
    ParenExpr,
    MemberAccess,
    Call,
    ArgList,
    IndexExpr,
    PrefixExpr,
    PostfixExpr,
    BinaryExpr,
    AssignExpr,
    ConditionalExpr,
    CastExpr,
    Lambda,
    LambdaParamList,
    LambdaParam,
    /// `new { A = 1, B }`
    AnonObjectCreation,
    AnonMember,
    /// `new T(args) { A = 1 }`
    ObjectCreation,
    ObjectInit,
    MemberInit,
    /// `new[] { ... }`, `new T[] { ... }`, `new T[n]`
    ArrayCreation,
    ArrayInit,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    #[inline]
    pub fn is_modifier(self) -> bool {
        token_sets::MODIFIERS.contains(self)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CsLang {}

impl Language for CsLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<CsLang>;
pub type SyntaxToken = rowan::SyntaxToken<CsLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 128-bit bitset of token `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..128u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    pub const MODIFIERS: TokenSet = TokenSet::new(&[
        KwPublic,
        KwPrivate,
        KwProtected,
        KwInternal,
        KwStatic,
        KwPartial,
        KwReadonly,
        KwAbstract,
        KwSealed,
    ]);

    pub const LITERALS: TokenSet = TokenSet::new(&[
        StringLiteral,
        CharLiteral,
        IntLiteral,
        RealLiteral,
        KwNull,
        KwTrue,
        KwFalse,
    ]);

    /// FIRST set of expressions.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[
        StringLiteral,
        CharLiteral,
        IntLiteral,
        RealLiteral,
        KwNull,
        KwTrue,
        KwFalse,
        KwThis,
        KwNew,
        Id,
        PredefinedType,
        ParenOpen,
        Bang,
        Minus,
        Plus,
        PlusPlus,
        MinusMinus,
    ]);

    pub const PREFIX_OPS: TokenSet = TokenSet::new(&[Bang, Minus, Plus, PlusPlus, MinusMinus]);

    pub const ASSIGN_OPS: TokenSet = TokenSet::new(&[Equals, PlusEq, MinusEq]);

    pub const TRIVIA: TokenSet = TokenSet::new(&[Whitespace, Newline, LineComment, BlockComment]);

    /// Tokens that may begin a namespace or compilation-unit member.
    pub const ITEM_FIRST: TokenSet = MODIFIERS.union(TokenSet::new(&[
        KwUsing,
        KwNamespace,
        KwClass,
        KwStruct,
    ]));

    /// Synchronization points inside a type body.
    pub const MEMBER_RECOVERY: TokenSet = MODIFIERS.union(TokenSet::new(&[
        BraceClose,
        KwClass,
        KwStruct,
        KwVoid,
        PredefinedType,
        Id,
    ]));

    /// Synchronization points inside a block.
    pub const STMT_RECOVERY: TokenSet = TokenSet::new(&[
        Semicolon,
        BraceClose,
        KwReturn,
        KwIf,
        KwForeach,
        KwVar,
    ]);

    /// Closers that end an argument or initializer list.
    pub const LIST_RECOVERY: TokenSet =
        TokenSet::new(&[ParenClose, BraceClose, BracketClose, Semicolon]);
}
