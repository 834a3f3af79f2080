//! Show the syntax tree of a source file.

use std::path::PathBuf;

use hoist_core::Colors;
use hoist_lib::parser::SyntaxPrinter;

use super::parse_or_exit;
use super::source_loader::load_or_exit;

pub struct AstArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub raw: bool,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let source = load_or_exit(args.source_path.as_deref(), args.source_text.as_deref());
    let doc = parse_or_exit(source.text);

    // Syntax errors do not stop the dump; the tree still covers every byte.
    let diagnostics = doc.diagnostics();
    if diagnostics.has_errors() {
        eprint!(
            "{}",
            diagnostics
                .printer()
                .source(doc.source())
                .path(&source.name)
                .colored(args.color)
                .render()
        );
    }

    let root = doc.syntax();
    let output = SyntaxPrinter::new(&root)
        .with_trivia(args.raw)
        .with_spans(args.spans)
        .colors(Colors::new(args.color))
        .dump();
    print!("{}", output);
}
