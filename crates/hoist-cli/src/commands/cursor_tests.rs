use super::cursor::{Cursor, parse_cursor};

fn at(line: usize, column: usize) -> Cursor {
    Cursor { line, column }
}

#[test]
fn parses_line_and_column() {
    assert_eq!(parse_cursor("12:5"), Ok(at(12, 5)));
    assert_eq!(at(12, 5).to_string(), "12:5");
}

#[test]
fn rejects_malformed_positions() {
    insta::assert_snapshot!(parse_cursor("12").unwrap_err(), @"expected LINE:COL, got '12'");
    insta::assert_snapshot!(parse_cursor("0:1").unwrap_err(), @"line must be a positive number, got '0'");
    insta::assert_snapshot!(parse_cursor("3:x").unwrap_err(), @"column must be a positive number, got 'x'");
}

#[test]
fn offsets_are_bytes() {
    let source = "class C\n{\n    var é = new { X = 1 };\n}\n";

    assert_eq!(at(1, 1).to_offset(source), Some(0));
    assert_eq!(at(2, 1).to_offset(source), Some(8));
    assert_eq!(at(3, 5).to_offset(source), Some(14));
    // `é` is two bytes wide.
    let new_kw = source.find("new").unwrap();
    assert_eq!(at(3, 13).to_offset(source), Some(new_kw));
}

#[test]
fn end_of_line_is_addressable() {
    let source = "ab\ncd";
    assert_eq!(at(1, 3).to_offset(source), Some(2));
    assert_eq!(at(2, 3).to_offset(source), Some(5));
}

#[test]
fn out_of_range_positions() {
    let source = "ab\ncd";
    assert_eq!(at(1, 4).to_offset(source), None);
    assert_eq!(at(3, 1).to_offset(source), None);
}
