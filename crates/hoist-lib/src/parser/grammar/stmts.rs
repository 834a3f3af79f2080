//! Statements: blocks, locals, `return`, `if`, `foreach` and expression statements.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{EXPR_FIRST, STMT_RECOVERY};

impl Parser<'_> {
    pub(crate) fn parse_stmt(&mut self) {
        if !self.enter_recursion() {
            self.bail_out();
            return;
        }

        match self.current() {
            SyntaxKind::BraceOpen => self.parse_block(),
            SyntaxKind::KwReturn => self.parse_return(),
            SyntaxKind::KwIf => self.parse_if(),
            SyntaxKind::KwForeach => self.parse_foreach(),
            SyntaxKind::Semicolon => {
                self.start_node(SyntaxKind::ExprStmt);
                self.bump();
                self.finish_node();
            }
            _ if self.at_local_decl() => self.parse_local_decl(),
            kind if EXPR_FIRST.contains(kind) => self.parse_expr_stmt(),
            _ => self.error_and_bump(DiagnosticKind::ExpectedStatement),
        }

        self.exit_recursion();
    }

    /// `var x =` or `T x =`, `T x;`, `T x,`
    fn at_local_decl(&mut self) -> bool {
        if self.currently_is(SyntaxKind::KwVar) {
            return self.next_is(SyntaxKind::Id);
        }
        let Some(after_type) = self.scan_type(0) else {
            return false;
        };
        self.peek_nth(after_type) == SyntaxKind::Id
            && matches!(
                self.peek_nth(after_type + 1),
                SyntaxKind::Equals | SyntaxKind::Semicolon | SyntaxKind::Comma
            )
    }

    pub(crate) fn parse_block(&mut self) {
        self.start_node(SyntaxKind::Block);
        self.assert_current(SyntaxKind::BraceOpen);
        self.push_delimiter();
        self.bump();
        while !self.at_eof() && !self.currently_is(SyntaxKind::BraceClose) {
            self.parse_stmt();
        }
        self.close_delimiter(SyntaxKind::BraceClose, DiagnosticKind::UnclosedBrace);
        self.finish_node();
    }

    fn parse_local_decl(&mut self) {
        self.start_node(SyntaxKind::LocalDecl);
        if !self.eat_token(SyntaxKind::KwVar) {
            self.parse_type();
        }
        self.parse_var_declarator();
        while self.eat_token(SyntaxKind::Comma) {
            self.parse_var_declarator();
        }
        self.expect_semicolon();
        self.finish_node();
    }

    /// `name` or `name = expr`
    pub(crate) fn parse_var_declarator(&mut self) {
        // leading trivia stays with the previous token
        self.skip_trivia_to_buffer();
        self.start_node(SyntaxKind::VarDeclarator);
        self.expect_name("variable name");
        if self.eat_token(SyntaxKind::Equals) {
            self.parse_expr_required("initializer");
        }
        self.finish_node();
    }

    fn parse_return(&mut self) {
        self.start_node(SyntaxKind::ReturnStmt);
        self.bump();
        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_expr();
        }
        self.expect_semicolon();
        self.finish_node();
    }

    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IfStmt);
        self.bump();
        self.parse_paren_condition();
        self.parse_embedded_stmt();
        if self.eat_token(SyntaxKind::KwElse) {
            self.parse_embedded_stmt();
        }
        self.finish_node();
    }

    /// `foreach (var x in xs) body`
    fn parse_foreach(&mut self) {
        self.start_node(SyntaxKind::ForeachStmt);
        self.bump();
        if !self.currently_is(SyntaxKind::ParenOpen) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(`");
            self.finish_node();
            return;
        }
        self.push_delimiter();
        self.bump();
        if !self.eat_token(SyntaxKind::KwVar) {
            self.parse_type();
        }
        self.expect_name("loop variable");
        self.expect(SyntaxKind::KwIn, "`in`");
        self.parse_expr_required("collection");
        self.close_delimiter(SyntaxKind::ParenClose, DiagnosticKind::UnclosedParen);
        self.parse_embedded_stmt();
        self.finish_node();
    }

    fn parse_paren_condition(&mut self) {
        if !self.currently_is(SyntaxKind::ParenOpen) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(`");
            return;
        }
        self.push_delimiter();
        self.bump();
        self.parse_expr_required("condition");
        self.close_delimiter(SyntaxKind::ParenClose, DiagnosticKind::UnclosedParen);
    }

    fn parse_embedded_stmt(&mut self) {
        if self.at_eof() || self.currently_is(SyntaxKind::BraceClose) {
            self.error(DiagnosticKind::ExpectedStatement);
            return;
        }
        self.parse_stmt();
    }

    fn parse_expr_stmt(&mut self) {
        self.start_node(SyntaxKind::ExprStmt);
        self.parse_expr();
        if !self.expect_semicolon() && !self.currently_is_one_of(STMT_RECOVERY) {
            self.error_recover(DiagnosticKind::UnexpectedToken, STMT_RECOVERY);
            self.eat_token(SyntaxKind::Semicolon);
        }
        self.finish_node();
    }
}
