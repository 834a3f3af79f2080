use super::cst::SyntaxKind::{self, *};
use super::lexer::{lex, token_text};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    lex(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

fn texts(source: &str) -> Vec<&str> {
    lex(source)
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| token_text(source, t))
        .collect()
}

#[test]
fn keywords_beat_identifiers() {
    assert_eq!(
        kinds("var newer new string strings"),
        vec![KwVar, Id, KwNew, PredefinedType, Id]
    );
}

#[test]
fn contextual_accessor_names_are_identifiers() {
    assert_eq!(kinds("get; set;"), vec![Id, Semicolon, Id, Semicolon]);
}

#[test]
fn numeric_literals() {
    assert_eq!(
        kinds("42 42L 7u 0xFF 1.5 2.5f 3m 1e10"),
        vec![
            IntLiteral,
            IntLiteral,
            IntLiteral,
            IntLiteral,
            RealLiteral,
            RealLiteral,
            RealLiteral,
            RealLiteral,
        ]
    );
}

#[test]
fn string_literals() {
    let source = r#""a\"b" @"c""d" $"x {y}" 'z'"#;
    assert_eq!(
        kinds(source),
        vec![StringLiteral, StringLiteral, StringLiteral, CharLiteral]
    );
    assert_eq!(texts(source)[1], r#"@"c""d""#);
}

#[test]
fn multi_char_operators() {
    assert_eq!(
        kinds("a => b == c != d ?? e && f || g <= h >= i += 1"),
        vec![
            Id, FatArrow, Id, EqEq, Id, BangEq, Id, QuestionQuestion, Id, AmpAmp, Id, PipePipe,
            Id, LtEq, Id, GtEq, Id, PlusEq, IntLiteral,
        ]
    );
}

#[test]
fn comments_are_trivia() {
    let tokens = lex("a // line\n/* block */ b");
    let all: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        all,
        vec![Id, Whitespace, LineComment, Newline, BlockComment, Whitespace, Id]
    );
}

#[test]
fn garbage_is_coalesced() {
    let source = "a ### b";
    let tokens = lex(source);
    let garbage: Vec<_> = tokens.iter().filter(|t| t.kind == Garbage).collect();
    assert_eq!(garbage.len(), 1);
    assert_eq!(token_text(source, garbage[0]), "###");
}

#[test]
fn trailing_garbage() {
    let source = "a #";
    let tokens = lex(source);
    assert_eq!(tokens.last().map(|t| t.kind), Some(Garbage));
}
