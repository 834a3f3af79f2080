use indoc::indoc;
use rowan::NodeOrToken;

use crate::parser::{SyntaxKind, SyntaxNode};
use crate::semantic::TypeId;
use crate::semantic::display::TypeDisplay;
use crate::test_utils::parse_ok;

use super::config::{ExtractConfig, MemberStyle};
use super::shape::MemberDescriptor;
use super::synthesize::{Layout, synthesize};

fn members(names: &[&str]) -> Vec<MemberDescriptor> {
    names
        .iter()
        .map(|n| MemberDescriptor {
            name: n.to_string(),
            ty: TypeId(0),
        })
        .collect()
}

fn render(
    name: &str,
    fields: &[(&str, TypeDisplay)],
    config: &ExtractConfig,
    layout: &Layout,
) -> String {
    let names: Vec<&str> = fields.iter().map(|(n, _)| *n).collect();
    let displays: Vec<TypeDisplay> = fields.iter().map(|(_, d)| d.clone()).collect();
    let green = synthesize(name, &members(&names), &displays, config, layout);
    SyntaxNode::new_root(green).to_string()
}

#[test]
fn properties_in_order() {
    let text = render(
        "NewName",
        &[
            ("Foo", TypeDisplay::keyword("string")),
            ("Qux", TypeDisplay::keyword("int")),
        ],
        &ExtractConfig::default(),
        &Layout::default(),
    );

    insta::assert_snapshot!(text, @r"
    class NewName
    {
        public string Foo { get; set; }
        public int Qux { get; set; }
    }
    ");
}

#[test]
fn field_style() {
    let config = ExtractConfig::new().member_style(MemberStyle::Field);
    let text = render(
        "Point",
        &[
            ("X", TypeDisplay::keyword("double")),
            ("Y", TypeDisplay::keyword("double")),
        ],
        &config,
        &Layout::default(),
    );

    insta::assert_snapshot!(text, @r"
    class Point
    {
        public double X;
        public double Y;
    }
    ");
}

#[test]
fn composite_type_spellings() {
    let list = TypeDisplay::path(["List"]).with_args(vec![TypeDisplay::keyword("string")]);
    let dict = TypeDisplay::path(["System", "Collections", "Generic", "Dictionary"])
        .with_args(vec![TypeDisplay::keyword("string"), list.clone()]);
    let text = render(
        "Row",
        &[
            ("At", TypeDisplay::path(["System", "DateTime"])),
            ("Tags", list),
            ("Index", dict),
            ("Scores", TypeDisplay::Array(Box::new(TypeDisplay::keyword("int")))),
            (
                "Limit",
                TypeDisplay::Nullable(Box::new(TypeDisplay::keyword("int"))),
            ),
        ],
        &ExtractConfig::default(),
        &Layout::default(),
    );

    insta::assert_snapshot!(text, @r"
    class Row
    {
        public System.DateTime At { get; set; }
        public List<string> Tags { get; set; }
        public System.Collections.Generic.Dictionary<string, List<string>> Index { get; set; }
        public int[] Scores { get; set; }
        public int? Limit { get; set; }
    }
    ");
}

#[test]
fn empty_type() {
    let text = render("Empty", &[], &ExtractConfig::default(), &Layout::default());
    assert_eq!(text, "class Empty\n{\n}");
}

#[test]
fn layout_follows_surroundings() {
    let layout = Layout {
        base_indent: "\t".to_string(),
        line_break: "\r\n",
    };
    let config = ExtractConfig::new().indent("\t");
    let text = render("P", &[("A", TypeDisplay::keyword("int"))], &config, &layout);
    assert_eq!(text, "class P\r\n\t{\r\n\t\tpublic int A { get; set; }\r\n\t}");
}

#[test]
fn layout_at() {
    let text = "namespace N\r\n{\r\n    class C { }\r\n}";
    let offset = text.find("class").unwrap();
    assert_eq!(
        Layout::at(text, offset),
        Layout {
            base_indent: "    ".to_string(),
            line_break: "\r\n",
        }
    );

    // Code before the node on the same line: no indentation to copy
    let text = "namespace N { class C { } }";
    let offset = text.find("class").unwrap();
    assert_eq!(Layout::at(text, offset), Layout::default());
}

#[test]
fn same_tree_as_parser() {
    let source = indoc! {"
    class Row
    {
        public System.DateTime At { get; set; }
        public List<string> Tags { get; set; }
        public int[] Scores { get; set; }
        public int? Limit { get; set; }
    }"};
    let parsed = parse_ok(source);
    let parsed_decl = parsed
        .root
        .as_cst()
        .children()
        .find(|n| n.kind() == SyntaxKind::TypeDecl)
        .expect("type declaration");

    let green = synthesize(
        "Row",
        &members(&["At", "Tags", "Scores", "Limit"]),
        &[
            TypeDisplay::path(["System", "DateTime"]),
            TypeDisplay::path(["List"]).with_args(vec![TypeDisplay::keyword("string")]),
            TypeDisplay::Array(Box::new(TypeDisplay::keyword("int"))),
            TypeDisplay::Nullable(Box::new(TypeDisplay::keyword("int"))),
        ],
        &ExtractConfig::default(),
        &Layout::default(),
    );

    assert_eq!(parsed_decl.green().into_owned(), green);
}

#[test]
fn field_tree_matches_parser() {
    let source = "class P\n{\n    public int X;\n}";
    let parsed = parse_ok(source);
    let parsed_decl = parsed
        .root
        .as_cst()
        .children()
        .find(|n| n.kind() == SyntaxKind::TypeDecl)
        .expect("type declaration");

    let config = ExtractConfig::new().member_style(MemberStyle::Field);
    let green = synthesize(
        "P",
        &members(&["X"]),
        &[TypeDisplay::keyword("int")],
        &config,
        &Layout::default(),
    );

    let synthesized = SyntaxNode::new_root(green);
    let kinds = |node: &SyntaxNode| -> Vec<SyntaxKind> {
        node.descendants_with_tokens()
            .map(|e| match e {
                NodeOrToken::Node(n) => n.kind(),
                NodeOrToken::Token(t) => t.kind(),
            })
            .collect()
    };
    assert_eq!(kinds(&parsed_decl), kinds(&synthesized));
}
