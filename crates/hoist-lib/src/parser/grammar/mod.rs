//! Grammar productions for the host language.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Items (usings, namespaces, type declarations and members) live here;
//! types, statements and expressions have their own files.

mod exprs;
mod stmts;
mod types;

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{LIST_RECOVERY, MEMBER_RECOVERY};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);
        self.parse_items(false);
        self.eat_trivia();
        self.finish_node();
    }

    /// Items until EOF, or until the closing `}` of a namespace body when `braced`.
    fn parse_items(&mut self, braced: bool) {
        while !self.at_eof() {
            match self.current() {
                SyntaxKind::BraceClose if braced => break,
                SyntaxKind::KwUsing => self.parse_using(),
                SyntaxKind::KwNamespace => self.parse_namespace(),
                SyntaxKind::KwClass | SyntaxKind::KwStruct => self.parse_type_decl(),
                kind if kind.is_modifier() => self.parse_type_decl(),
                _ => self.parse_stmt(),
            }
        }
    }

    /// `using System.Text;`
    fn parse_using(&mut self) {
        self.start_node(SyntaxKind::UsingDirective);
        self.assert_current(SyntaxKind::KwUsing);
        self.bump();
        self.parse_path("namespace name");
        self.expect_semicolon();
        self.finish_node();
    }

    /// `namespace A.B { ... }` or file-scoped `namespace A.B;`
    fn parse_namespace(&mut self) {
        self.start_node(SyntaxKind::NamespaceDecl);
        self.assert_current(SyntaxKind::KwNamespace);
        self.bump();
        self.parse_path("namespace name");

        if self.eat_token(SyntaxKind::Semicolon) {
            self.parse_items(false);
        } else if self.currently_is(SyntaxKind::BraceOpen) {
            self.push_delimiter();
            self.bump();
            self.parse_items(true);
            self.close_delimiter(SyntaxKind::BraceClose, DiagnosticKind::UnclosedBrace);
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `{` or `;`");
        }

        self.finish_node();
    }

    fn parse_path(&mut self, what: &str) {
        if !self.currently_is(SyntaxKind::Id) {
            self.error_msg(DiagnosticKind::ExpectedIdentifier, what);
            return;
        }
        self.start_node(SyntaxKind::Path);
        self.bump();
        while self.currently_is(SyntaxKind::Dot) && self.next_is(SyntaxKind::Id) {
            self.bump();
            self.expect(SyntaxKind::Id, "identifier after `.`");
        }
        self.finish_node();
    }

    fn parse_modifiers(&mut self) -> bool {
        let mut any = false;
        while self.current().is_modifier() {
            self.bump();
            any = true;
        }
        any
    }

    fn parse_type_decl(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_modifiers();
        self.parse_type_decl_rest(checkpoint);
    }

    /// `class Name : Base { members }` after modifiers were consumed since `checkpoint`.
    fn parse_type_decl_rest(&mut self, checkpoint: rowan::Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::TypeDecl);

        if !self.eat_token(SyntaxKind::KwClass) && !self.eat_token(SyntaxKind::KwStruct) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `class` or `struct`");
            self.finish_node();
            return;
        }

        self.expect_name("type name");

        if self.currently_is(SyntaxKind::Colon) {
            self.parse_base_list();
        }

        if self.currently_is(SyntaxKind::BraceOpen) {
            self.push_delimiter();
            self.bump();
            while !self.at_eof() && !self.currently_is(SyntaxKind::BraceClose) {
                self.parse_member();
            }
            self.close_delimiter(SyntaxKind::BraceClose, DiagnosticKind::UnclosedBrace);
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `{`");
        }

        self.finish_node();
    }

    /// `: Base, IFace`
    fn parse_base_list(&mut self) {
        self.start_node(SyntaxKind::BaseList);
        self.bump();
        loop {
            if self.parse_type().is_none() {
                break;
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    /// Field, property, method, constructor or nested type.
    ///
    /// The node kind is only known after the type and name, so everything is
    /// wrapped retroactively from a checkpoint taken before the modifiers.
    fn parse_member(&mut self) {
        let checkpoint = self.checkpoint();
        let has_modifiers = self.parse_modifiers();

        match self.current() {
            SyntaxKind::KwClass | SyntaxKind::KwStruct => {
                self.parse_type_decl_rest(checkpoint);
            }
            SyntaxKind::Id if self.next_is(SyntaxKind::ParenOpen) => {
                self.start_node_at(checkpoint, SyntaxKind::ConstructorDecl);
                self.bump();
                self.parse_param_list();
                self.parse_method_body();
                self.finish_node();
            }
            SyntaxKind::KwVoid => {
                self.start_node_at(checkpoint, SyntaxKind::MethodDecl);
                self.bump();
                self.expect_name("method name");
                self.parse_param_list();
                self.parse_method_body();
                self.finish_node();
            }
            SyntaxKind::Id | SyntaxKind::PredefinedType => {
                self.parse_typed_member(checkpoint);
            }
            _ if has_modifiers => {
                self.error(DiagnosticKind::ExpectedMember);
            }
            _ => {
                self.error_recover(DiagnosticKind::ExpectedMember, MEMBER_RECOVERY);
            }
        }
    }

    /// Member starting with a type: method, property or field.
    fn parse_typed_member(&mut self, checkpoint: rowan::Checkpoint) {
        self.parse_type();
        let name_checkpoint = self.checkpoint();
        let has_name = self.expect_name("member name");

        match self.current() {
            SyntaxKind::ParenOpen if has_name => {
                self.start_node_at(checkpoint, SyntaxKind::MethodDecl);
                self.parse_param_list();
                self.parse_method_body();
                self.finish_node();
            }
            SyntaxKind::BraceOpen if has_name => {
                self.start_node_at(checkpoint, SyntaxKind::PropertyDecl);
                self.parse_accessor_list();
                if self.eat_token(SyntaxKind::Equals) {
                    self.parse_expr_required("property initializer");
                    self.expect_semicolon();
                }
                self.finish_node();
            }
            SyntaxKind::FatArrow if has_name => {
                self.start_node_at(checkpoint, SyntaxKind::PropertyDecl);
                self.bump();
                self.parse_expr_required("property body");
                self.expect_semicolon();
                self.finish_node();
            }
            _ => {
                self.start_node_at(checkpoint, SyntaxKind::FieldDecl);
                if has_name {
                    self.start_node_at(name_checkpoint, SyntaxKind::VarDeclarator);
                    if self.eat_token(SyntaxKind::Equals) {
                        self.parse_expr_required("field initializer");
                    }
                    self.finish_node();
                    while self.eat_token(SyntaxKind::Comma) {
                        self.parse_var_declarator();
                    }
                }
                self.expect_semicolon();
                self.finish_node();
            }
        }
    }

    /// `{ get; private set; }`
    fn parse_accessor_list(&mut self) {
        self.start_node(SyntaxKind::AccessorList);
        self.push_delimiter();
        self.bump();
        while !self.at_eof() && !self.currently_is(SyntaxKind::BraceClose) {
            let checkpoint = self.checkpoint();
            self.parse_modifiers();
            let text = self.current_text();
            if self.currently_is(SyntaxKind::Id) && matches!(text, "get" | "set" | "init") {
                self.start_node_at(checkpoint, SyntaxKind::Accessor);
                self.bump();
                match self.current() {
                    SyntaxKind::BraceOpen => self.parse_block(),
                    SyntaxKind::FatArrow => {
                        self.bump();
                        self.parse_expr_required("accessor body");
                        self.expect_semicolon();
                    }
                    _ => {
                        self.expect_semicolon();
                    }
                }
                self.finish_node();
            } else {
                self.error_and_bump(DiagnosticKind::ExpectedAccessor);
            }
        }
        self.close_delimiter(SyntaxKind::BraceClose, DiagnosticKind::UnclosedBrace);
        self.finish_node();
    }

    /// `(int a, string b)`
    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::ParamList);
        if !self.currently_is(SyntaxKind::ParenOpen) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(`");
            self.finish_node();
            return;
        }
        self.push_delimiter();
        self.bump();
        while !self.at_eof() && !self.currently_is(SyntaxKind::ParenClose) {
            if !matches!(self.current(), SyntaxKind::Id | SyntaxKind::PredefinedType) {
                if self.currently_is_one_of(LIST_RECOVERY) {
                    break;
                }
                self.error_and_bump(DiagnosticKind::ExpectedType);
                continue;
            }
            self.start_node(SyntaxKind::Param);
            self.parse_type();
            self.expect_name("parameter name");
            if self.eat_token(SyntaxKind::Equals) {
                self.parse_expr_required("default value");
            }
            self.finish_node();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.close_delimiter(SyntaxKind::ParenClose, DiagnosticKind::UnclosedParen);
        self.finish_node();
    }

    /// Block, `=> expr;`, or `;` for bodiless declarations.
    fn parse_method_body(&mut self) {
        match self.current() {
            SyntaxKind::BraceOpen => self.parse_block(),
            SyntaxKind::FatArrow => {
                self.bump();
                self.parse_expr_required("method body");
                self.expect_semicolon();
            }
            _ => {
                self.expect_semicolon();
            }
        }
    }

    pub(super) fn expect_name(&mut self, what: &str) -> bool {
        if self.eat_token(SyntaxKind::Id) {
            return true;
        }
        self.error_msg(DiagnosticKind::ExpectedIdentifier, what);
        false
    }

    /// Pops the delimiter pushed for the matching opener and consumes `close`.
    pub(super) fn close_delimiter(&mut self, close: SyntaxKind, kind: DiagnosticKind) {
        let open = self.pop_delimiter();
        if self.eat_token(close) {
            return;
        }
        if let Some(open) = open {
            self.error_unclosed_delimiter(kind, "opened here", open.span);
        }
    }

    /// Recursion limit hit: swallow the rest of the input into one `Error` node.
    pub(super) fn bail_out(&mut self) {
        self.start_node(SyntaxKind::Error);
        while !self.should_stop() {
            self.bump();
        }
        self.finish_node();
    }
}
