//! Type syntax: `int`, `A.B<T>`, `T[]`, `T?`.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind;

impl Parser<'_> {
    /// Parses a type and returns the kind of the outermost node, or `None`
    /// (after reporting) when no type starts here.
    pub(crate) fn parse_type(&mut self) -> Option<SyntaxKind> {
        self.skip_trivia_to_buffer();
        let checkpoint = self.checkpoint();

        let mut kind = match self.current() {
            SyntaxKind::PredefinedType => {
                self.start_node(SyntaxKind::PredefType);
                self.bump();
                self.finish_node();
                SyntaxKind::PredefType
            }
            SyntaxKind::Id => {
                self.parse_named_type();
                SyntaxKind::NamedType
            }
            _ => {
                self.error(DiagnosticKind::ExpectedType);
                return None;
            }
        };

        loop {
            match self.current() {
                SyntaxKind::BracketOpen if self.next_is(SyntaxKind::BracketClose) => {
                    self.start_node_at(checkpoint, SyntaxKind::ArrayType);
                    self.bump();
                    self.expect(SyntaxKind::BracketClose, "`]`");
                    self.finish_node();
                    kind = SyntaxKind::ArrayType;
                }
                SyntaxKind::Question if kind != SyntaxKind::NullableType => {
                    self.start_node_at(checkpoint, SyntaxKind::NullableType);
                    self.bump();
                    self.finish_node();
                    kind = SyntaxKind::NullableType;
                }
                _ => break,
            }
        }

        Some(kind)
    }

    fn parse_named_type(&mut self) {
        self.start_node(SyntaxKind::NamedType);
        self.bump();
        while self.currently_is(SyntaxKind::Dot) && self.next_is(SyntaxKind::Id) {
            self.bump();
            self.expect(SyntaxKind::Id, "identifier after `.`");
        }
        if self.currently_is(SyntaxKind::Lt) {
            self.parse_type_arg_list();
        }
        self.finish_node();
    }

    /// `<K, V>`
    fn parse_type_arg_list(&mut self) {
        self.start_node(SyntaxKind::TypeArgList);
        self.bump();
        loop {
            if self.parse_type().is_none() {
                break;
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::Gt, "`>`");
        self.finish_node();
    }

    /// Lookahead-only type scan starting at the `n`th non-trivia token.
    ///
    /// Returns the index of the first token after the type, or `None` when the
    /// tokens there do not form a type.
    pub(crate) fn scan_type(&mut self, n: usize) -> Option<usize> {
        let mut i = n;
        match self.peek_nth(i) {
            SyntaxKind::PredefinedType => i += 1,
            SyntaxKind::Id => {
                i += 1;
                while self.peek_nth(i) == SyntaxKind::Dot && self.peek_nth(i + 1) == SyntaxKind::Id {
                    i += 2;
                }
                if self.peek_nth(i) == SyntaxKind::Lt {
                    i += 1;
                    loop {
                        i = self.scan_type(i)?;
                        if self.peek_nth(i) != SyntaxKind::Comma {
                            break;
                        }
                        i += 1;
                    }
                    if self.peek_nth(i) != SyntaxKind::Gt {
                        return None;
                    }
                    i += 1;
                }
            }
            _ => return None,
        }

        loop {
            match self.peek_nth(i) {
                SyntaxKind::BracketOpen if self.peek_nth(i + 1) == SyntaxKind::BracketClose => {
                    i += 2
                }
                SyntaxKind::Question => i += 1,
                _ => return Some(i),
            }
        }
    }
}
