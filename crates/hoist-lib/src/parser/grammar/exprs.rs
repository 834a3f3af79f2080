//! Expressions: precedence climbing over unary and postfix forms, plus
//! lambdas and the `new` family (object, array and anonymous creation).

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{ASSIGN_OPS, EXPR_FIRST, LIST_RECOVERY, LITERALS, PREFIX_OPS};

/// Binding power of a binary operator; higher binds tighter.
fn infix_binding(kind: SyntaxKind) -> Option<u8> {
    let power = match kind {
        SyntaxKind::QuestionQuestion => 1,
        SyntaxKind::PipePipe => 2,
        SyntaxKind::AmpAmp => 3,
        SyntaxKind::EqEq | SyntaxKind::BangEq => 4,
        SyntaxKind::Lt | SyntaxKind::Gt | SyntaxKind::LtEq | SyntaxKind::GtEq => 5,
        SyntaxKind::Plus | SyntaxKind::Minus => 6,
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => 7,
        _ => return None,
    };
    Some(power)
}

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) {
        if !self.enter_recursion() {
            self.bail_out();
            return;
        }

        if self.at_lambda() {
            self.parse_lambda();
            self.exit_recursion();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_conditional();

        if self.currently_is_one_of(ASSIGN_OPS) {
            self.start_node_at(checkpoint, SyntaxKind::AssignExpr);
            self.bump();
            self.parse_expr_required("value");
            self.finish_node();
        }

        self.exit_recursion();
    }

    /// Expression in a position where one is mandatory; reports without consuming otherwise.
    pub(crate) fn parse_expr_required(&mut self, what: &str) {
        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_expr();
        } else {
            self.error_msg(DiagnosticKind::ExpectedExpression, what);
        }
    }

    fn parse_conditional(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_binary(1);

        if !self.currently_is(SyntaxKind::Question) {
            return;
        }
        self.start_node_at(checkpoint, SyntaxKind::ConditionalExpr);
        self.bump();
        self.parse_expr_required("then-branch");
        self.expect(SyntaxKind::Colon, "`:`");
        self.parse_expr_required("else-branch");
        self.finish_node();
    }

    fn parse_binary(&mut self, min_power: u8) {
        let checkpoint = self.checkpoint();
        self.parse_unary();

        loop {
            let op = self.current();
            let Some(power) = infix_binding(op) else {
                break;
            };
            if power < min_power {
                break;
            }
            self.start_node_at(checkpoint, SyntaxKind::BinaryExpr);
            self.bump();
            // `??` is right-associative
            let next_min = if op == SyntaxKind::QuestionQuestion {
                power
            } else {
                power + 1
            };
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_binary(next_min);
            } else {
                self.error_msg(DiagnosticKind::ExpectedExpression, "right operand");
            }
            self.finish_node();
        }
    }

    fn parse_unary(&mut self) {
        if self.currently_is_one_of(PREFIX_OPS) {
            if !self.enter_recursion() {
                self.bail_out();
                return;
            }
            self.start_node(SyntaxKind::PrefixExpr);
            self.bump();
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_unary();
            } else {
                self.error_msg(DiagnosticKind::ExpectedExpression, "operand");
            }
            self.finish_node();
            self.exit_recursion();
            return;
        }

        if self.at_cast() {
            self.start_node(SyntaxKind::CastExpr);
            self.bump();
            self.parse_type();
            self.expect(SyntaxKind::ParenClose, "`)`");
            self.parse_unary();
            self.finish_node();
            return;
        }

        self.parse_postfix();
    }

    /// `(int)x`, or `(Name)x` when the operand cannot be read as a binary continuation.
    fn at_cast(&mut self) -> bool {
        if !self.currently_is(SyntaxKind::ParenOpen) {
            return false;
        }
        let Some(after_type) = self.scan_type(1) else {
            return false;
        };
        if self.peek_nth(after_type) != SyntaxKind::ParenClose {
            return false;
        }
        let operand = self.peek_nth(after_type + 1);
        if self.peek_nth(1) == SyntaxKind::PredefinedType {
            return EXPR_FIRST.contains(operand);
        }
        LITERALS.contains(operand)
            || matches!(
                operand,
                SyntaxKind::Id | SyntaxKind::KwThis | SyntaxKind::KwNew | SyntaxKind::Bang
            )
    }

    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        if !self.parse_primary() {
            return;
        }

        loop {
            match self.current() {
                SyntaxKind::Dot => {
                    self.start_node_at(checkpoint, SyntaxKind::MemberAccess);
                    self.bump();
                    self.expect_name("member name");
                    self.finish_node();
                }
                SyntaxKind::ParenOpen => {
                    self.start_node_at(checkpoint, SyntaxKind::Call);
                    self.parse_arg_list();
                    self.finish_node();
                }
                SyntaxKind::BracketOpen => {
                    self.start_node_at(checkpoint, SyntaxKind::IndexExpr);
                    self.push_delimiter();
                    self.bump();
                    self.parse_expr_required("index");
                    self.close_delimiter(SyntaxKind::BracketClose, DiagnosticKind::UnclosedBracket);
                    self.finish_node();
                }
                SyntaxKind::PlusPlus | SyntaxKind::MinusMinus => {
                    self.start_node_at(checkpoint, SyntaxKind::PostfixExpr);
                    self.bump();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    /// Returns `false` when nothing was parsed.
    fn parse_primary(&mut self) -> bool {
        match self.current() {
            kind if LITERALS.contains(kind) => {
                self.start_node(SyntaxKind::Literal);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::Id | SyntaxKind::PredefinedType => {
                self.start_node(SyntaxKind::NameRef);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::KwThis => {
                self.start_node(SyntaxKind::ThisExpr);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::ParenOpen => {
                self.start_node(SyntaxKind::ParenExpr);
                self.push_delimiter();
                self.bump();
                self.parse_expr_required("expression");
                self.close_delimiter(SyntaxKind::ParenClose, DiagnosticKind::UnclosedParen);
                self.finish_node();
            }
            SyntaxKind::KwNew => self.parse_new(),
            _ => {
                self.error(DiagnosticKind::ExpectedExpression);
                return false;
            }
        }
        true
    }

    /// `(a, b)`
    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ArgList);
        self.parse_comma_list(
            SyntaxKind::ParenClose,
            DiagnosticKind::UnclosedParen,
            Self::parse_expr,
        );
        self.finish_node();
    }

    /// Consumes the opener at the current position, then `item`s separated by
    /// commas (trailing comma allowed) up to `close`.
    fn parse_comma_list(
        &mut self,
        close: SyntaxKind,
        unclosed: DiagnosticKind,
        item: fn(&mut Self),
    ) {
        self.push_delimiter();
        self.bump();
        while !self.at_eof() && !self.currently_is(close) {
            if !self.currently_is_one_of(EXPR_FIRST) {
                if self.currently_is_one_of(LIST_RECOVERY) {
                    break;
                }
                self.error_and_bump(DiagnosticKind::ExpectedExpression);
                continue;
            }
            item(self);
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.close_delimiter(close, unclosed);
    }

    fn parse_new(&mut self) {
        let checkpoint = self.checkpoint();
        self.assert_current(SyntaxKind::KwNew);
        self.bump();

        match self.current() {
            SyntaxKind::BraceOpen => {
                self.start_node_at(checkpoint, SyntaxKind::AnonObjectCreation);
                self.parse_comma_list(
                    SyntaxKind::BraceClose,
                    DiagnosticKind::UnclosedBrace,
                    Self::parse_anon_member,
                );
                self.finish_node();
            }
            SyntaxKind::BracketOpen => {
                // implicitly typed `new[] { ... }`
                self.start_node_at(checkpoint, SyntaxKind::ArrayCreation);
                self.bump();
                self.expect(SyntaxKind::BracketClose, "`]`");
                self.parse_array_init_required();
                self.finish_node();
            }
            SyntaxKind::Id | SyntaxKind::PredefinedType => {
                let ty = self.parse_type();
                if self.currently_is(SyntaxKind::BracketOpen) {
                    self.start_node_at(checkpoint, SyntaxKind::ArrayCreation);
                    self.push_delimiter();
                    self.bump();
                    self.parse_expr_required("array size");
                    self.close_delimiter(SyntaxKind::BracketClose, DiagnosticKind::UnclosedBracket);
                    if self.currently_is(SyntaxKind::BraceOpen) {
                        self.parse_array_init();
                    }
                    self.finish_node();
                } else if ty == Some(SyntaxKind::ArrayType) {
                    self.start_node_at(checkpoint, SyntaxKind::ArrayCreation);
                    self.parse_array_init_required();
                    self.finish_node();
                } else {
                    self.start_node_at(checkpoint, SyntaxKind::ObjectCreation);
                    let has_args = self.currently_is(SyntaxKind::ParenOpen);
                    if has_args {
                        self.parse_arg_list();
                    }
                    if self.currently_is(SyntaxKind::BraceOpen) {
                        self.parse_object_init();
                    } else if ty.is_some() && !has_args {
                        self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(` or `{`");
                    }
                    self.finish_node();
                }
            }
            _ => {
                self.start_node_at(checkpoint, SyntaxKind::ObjectCreation);
                self.error(DiagnosticKind::ExpectedType);
                self.finish_node();
            }
        }
    }

    /// `Name = expr` or a projection initializer (`x`, `p.Name`).
    fn parse_anon_member(&mut self) {
        self.start_node(SyntaxKind::AnonMember);
        if self.currently_is(SyntaxKind::Id) && self.next_is(SyntaxKind::Equals) {
            self.bump();
            self.expect(SyntaxKind::Equals, "`=`");
            self.parse_expr_required("member value");
        } else {
            self.parse_expr();
        }
        self.finish_node();
    }

    /// `{ A = 1, B = 2 }` or collection form `{ 1, 2 }`.
    fn parse_object_init(&mut self) {
        self.start_node(SyntaxKind::ObjectInit);
        self.parse_comma_list(
            SyntaxKind::BraceClose,
            DiagnosticKind::UnclosedBrace,
            Self::parse_init_element,
        );
        self.finish_node();
    }

    fn parse_init_element(&mut self) {
        if self.currently_is(SyntaxKind::Id) && self.next_is(SyntaxKind::Equals) {
            self.start_node(SyntaxKind::MemberInit);
            self.bump();
            self.expect(SyntaxKind::Equals, "`=`");
            self.parse_expr_required("member value");
            self.finish_node();
        } else {
            self.parse_expr();
        }
    }

    fn parse_array_init_required(&mut self) {
        if self.currently_is(SyntaxKind::BraceOpen) {
            self.parse_array_init();
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected array initializer");
        }
    }

    fn parse_array_init(&mut self) {
        self.start_node(SyntaxKind::ArrayInit);
        self.parse_comma_list(
            SyntaxKind::BraceClose,
            DiagnosticKind::UnclosedBrace,
            Self::parse_expr,
        );
        self.finish_node();
    }

    /// `x =>`, `() =>`, `(a, b) =>`
    fn at_lambda(&mut self) -> bool {
        match self.current() {
            SyntaxKind::Id => self.next_is(SyntaxKind::FatArrow),
            SyntaxKind::ParenOpen => {
                let mut i = 1;
                if self.peek_nth(i) == SyntaxKind::Id {
                    i += 1;
                    while self.peek_nth(i) == SyntaxKind::Comma
                        && self.peek_nth(i + 1) == SyntaxKind::Id
                    {
                        i += 2;
                    }
                }
                self.peek_nth(i) == SyntaxKind::ParenClose
                    && self.peek_nth(i + 1) == SyntaxKind::FatArrow
            }
            _ => false,
        }
    }

    fn parse_lambda(&mut self) {
        self.start_node(SyntaxKind::Lambda);
        self.start_node(SyntaxKind::LambdaParamList);
        if self.currently_is(SyntaxKind::Id) {
            self.parse_lambda_param();
        } else {
            self.bump();
            while self.currently_is(SyntaxKind::Id) {
                self.parse_lambda_param();
                if !self.eat_token(SyntaxKind::Comma) {
                    break;
                }
            }
            self.expect(SyntaxKind::ParenClose, "`)`");
        }
        self.finish_node();

        self.expect(SyntaxKind::FatArrow, "`=>`");
        if self.currently_is(SyntaxKind::BraceOpen) {
            self.parse_block();
        } else {
            self.parse_expr_required("lambda body");
        }
        self.finish_node();
    }

    fn parse_lambda_param(&mut self) {
        self.start_node(SyntaxKind::LambdaParam);
        self.bump();
        self.finish_node();
    }
}
