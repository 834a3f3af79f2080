//! Indented dump of a syntax tree, one element per line.

use std::fmt::Write;

use hoist_core::Colors;
use rowan::{NodeOrToken, TextRange};

use super::cst::SyntaxNode;

pub struct SyntaxPrinter<'n> {
    node: &'n SyntaxNode,
    trivia: bool,
    spans: bool,
    colors: Colors,
}

impl<'n> SyntaxPrinter<'n> {
    pub fn new(node: &'n SyntaxNode) -> Self {
        Self {
            node,
            trivia: false,
            spans: false,
            colors: Colors::OFF,
        }
    }

    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_node(self.node, 0, w)
    }

    fn format_node(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let c = self.colors;
        let prefix = "  ".repeat(indent);
        let span = self.span_str(node.text_range());
        writeln!(w, "{}{}{:?}{}{}", prefix, c.blue, node.kind(), c.reset, span)?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_node(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    let trivia = t.kind().is_trivia();
                    if trivia && !self.trivia {
                        continue;
                    }
                    let child_prefix = "  ".repeat(indent + 1);
                    let child_span = self.span_str(t.text_range());
                    let text_color = if trivia { c.dim } else { c.green };
                    writeln!(
                        w,
                        "{}{:?}{} {}{:?}{}",
                        child_prefix,
                        t.kind(),
                        child_span,
                        text_color,
                        t.text(),
                        c.reset
                    )?;
                }
            }
        }
        Ok(())
    }

    fn span_str(&self, range: TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        let c = self.colors;
        format!(
            " {}[{}..{}]{}",
            c.dim,
            u32::from(range.start()),
            u32::from(range.end()),
            c.reset
        )
    }
}
