pub mod ast;
pub mod check;
pub mod cursor;
pub mod extract;
pub mod source_loader;

#[cfg(test)]
mod cursor_tests;

use hoist_lib::Document;

/// Parse a document or exit when the parser gives up.
fn parse_or_exit(text: String) -> Document {
    Document::parse(text).unwrap_or_else(|err| {
        eprintln!("error: {}", err);
        std::process::exit(1);
    })
}
