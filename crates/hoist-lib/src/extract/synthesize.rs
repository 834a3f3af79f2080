//! Type declaration synthesis.
//!
//! Declarations are built token by token as green nodes with the same shape
//! the parser produces for the equivalent text.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::parser::SyntaxKind;
use crate::semantic::display::TypeDisplay;

use super::config::{ExtractConfig, MemberStyle};
use super::shape::MemberDescriptor;

/// Whitespace conventions of the surrounding source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Indentation of the line the declaration starts on.
    pub base_indent: String,
    pub line_break: &'static str,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            base_indent: String::new(),
            line_break: "\n",
        }
    }
}

impl Layout {
    /// Layout for a declaration placed next to the node starting at `offset` in `text`.
    pub fn at(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let prefix = &text[line_start..offset];
        let base_indent = if prefix.chars().all(|c| c == ' ' || c == '\t') {
            prefix.to_string()
        } else {
            String::new()
        };
        let line_break = if text.contains("\r\n") { "\r\n" } else { "\n" };
        Self {
            base_indent,
            line_break,
        }
    }
}

/// Build `class Name { ... }` with one public member per descriptor, in order.
///
/// `displays[i]` spells the type of `members[i]`.
pub fn synthesize(
    name: &str,
    members: &[MemberDescriptor],
    displays: &[TypeDisplay],
    config: &ExtractConfig,
    layout: &Layout,
) -> GreenNode {
    let mut b = DeclBuilder {
        builder: GreenNodeBuilder::new(),
        layout,
    };
    let member_indent = format!("{}{}", layout.base_indent, config.indent);

    b.start(SyntaxKind::TypeDecl);
    b.token(SyntaxKind::KwClass, "class");
    b.space();
    b.token(SyntaxKind::Id, name);
    b.line(&layout.base_indent);
    b.token(SyntaxKind::BraceOpen, "{");

    for (member, display) in members.iter().zip(displays) {
        b.line(&member_indent);
        match config.member_style {
            MemberStyle::Property => b.property(&member.name, display),
            MemberStyle::Field => b.field(&member.name, display),
        }
    }

    b.line(&layout.base_indent);
    b.token(SyntaxKind::BraceClose, "}");
    b.finish();
    b.builder.finish()
}

struct DeclBuilder<'l> {
    builder: GreenNodeBuilder<'static>,
    layout: &'l Layout,
}

impl DeclBuilder<'_> {
    fn start(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish(&mut self) {
        self.builder.finish_node();
    }

    fn token(&mut self, kind: SyntaxKind, text: &str) {
        self.builder.token(kind.into(), text);
    }

    fn space(&mut self) {
        self.token(SyntaxKind::Whitespace, " ");
    }

    fn line(&mut self, indent: &str) {
        self.token(SyntaxKind::Newline, self.layout.line_break);
        if !indent.is_empty() {
            self.token(SyntaxKind::Whitespace, indent);
        }
    }

    fn property(&mut self, name: &str, display: &TypeDisplay) {
        self.start(SyntaxKind::PropertyDecl);
        self.token(SyntaxKind::KwPublic, "public");
        self.space();
        self.ty(display);
        self.space();
        self.token(SyntaxKind::Id, name);
        self.space();

        self.start(SyntaxKind::AccessorList);
        self.token(SyntaxKind::BraceOpen, "{");
        for accessor in ["get", "set"] {
            self.space();
            self.start(SyntaxKind::Accessor);
            self.token(SyntaxKind::Id, accessor);
            self.token(SyntaxKind::Semicolon, ";");
            self.finish();
        }
        self.space();
        self.token(SyntaxKind::BraceClose, "}");
        self.finish();

        self.finish();
    }

    fn field(&mut self, name: &str, display: &TypeDisplay) {
        self.start(SyntaxKind::FieldDecl);
        self.token(SyntaxKind::KwPublic, "public");
        self.space();
        self.ty(display);
        self.space();
        self.start(SyntaxKind::VarDeclarator);
        self.token(SyntaxKind::Id, name);
        self.finish();
        self.token(SyntaxKind::Semicolon, ";");
        self.finish();
    }

    fn ty(&mut self, display: &TypeDisplay) {
        match display {
            TypeDisplay::Keyword(keyword) => {
                self.start(SyntaxKind::PredefType);
                self.token(SyntaxKind::PredefinedType, keyword);
                self.finish();
            }
            TypeDisplay::Path { segments, args } => {
                self.start(SyntaxKind::NamedType);
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        self.token(SyntaxKind::Dot, ".");
                    }
                    self.token(SyntaxKind::Id, segment);
                }
                if !args.is_empty() {
                    self.start(SyntaxKind::TypeArgList);
                    self.token(SyntaxKind::Lt, "<");
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            self.token(SyntaxKind::Comma, ",");
                            self.space();
                        }
                        self.ty(arg);
                    }
                    self.token(SyntaxKind::Gt, ">");
                    self.finish();
                }
                self.finish();
            }
            TypeDisplay::Array(element) => {
                self.start(SyntaxKind::ArrayType);
                self.ty(element);
                self.token(SyntaxKind::BracketOpen, "[");
                self.token(SyntaxKind::BracketClose, "]");
                self.finish();
            }
            TypeDisplay::Nullable(inner) => {
                self.start(SyntaxKind::NullableType);
                self.ty(inner);
                self.token(SyntaxKind::Question, "?");
                self.finish();
            }
        }
    }
}
