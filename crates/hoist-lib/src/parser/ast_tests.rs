use indoc::indoc;

use super::ast::{Expr, Item, LiteralKind, Member, Stmt, Type};
use super::cst::SyntaxKind;
use crate::test_utils::parse_ok;

fn first_initializer(source: &str) -> Expr {
    let root = parse_ok(source).root;
    let Some(Item::Stmt(Stmt::Local(local))) = root.items().next() else {
        panic!("expected a local declaration");
    };
    local
        .declarators()
        .next()
        .and_then(|d| d.initializer())
        .expect("initializer")
}

#[test]
fn anonymous_member_names() {
    let Expr::AnonObject(anon) = first_initializer("var a = new { X = 1, p.Name, y, 1 + 2 };")
    else {
        panic!("expected anonymous object");
    };

    let names: Vec<_> = anon.members().map(|m| m.name()).collect();
    assert_eq!(
        names,
        vec![
            Some("X".to_string()),
            Some("Name".to_string()),
            Some("y".to_string()),
            None
        ]
    );

    let explicit: Vec<_> = anon
        .members()
        .map(|m| m.name_token().map(|t| t.text().to_string()))
        .collect();
    assert_eq!(explicit, vec![Some("X".to_string()), None, None, None]);
    assert_eq!(anon.new_keyword().map(|t| t.text().to_string()).as_deref(), Some("new"));
}

#[test]
fn type_declarations() {
    let input = indoc! {r#"
    namespace N
    {
        public static partial class Util : Base, IFoo
        {
            int a, b = 2;
            public string Name { get; private set; } = "";
            static void Run(int x, string y) { }
            int Sum() => a + b;
        }
    }
    "#};

    let root = parse_ok(input).root;
    let Some(Item::Namespace(ns)) = root.items().next() else {
        panic!("expected namespace");
    };
    assert!(!ns.is_file_scoped());
    assert_eq!(ns.path().map(|p| p.text()).as_deref(), Some("N"));

    let decl = ns.type_decls().next().unwrap();
    assert_eq!(decl.name().unwrap().text(), "Util");
    assert!(decl.is_partial());
    assert!(decl.has_modifier(SyntaxKind::KwStatic));
    assert_eq!(decl.keyword().unwrap().kind(), SyntaxKind::KwClass);
    assert_eq!(decl.base_list().unwrap().types().count(), 2);
    assert!(decl.r_brace().is_some());

    let members: Vec<_> = decl.members().collect();
    assert_eq!(members.len(), 4);

    let Member::Field(field) = &members[0] else {
        panic!("expected field");
    };
    let names: Vec<_> = field
        .declarators()
        .map(|d| d.name().unwrap().text().to_string())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(field.declarators().nth(1).unwrap().initializer().is_some());

    let Member::Property(prop) = &members[1] else {
        panic!("expected property");
    };
    assert_eq!(prop.name().unwrap().text(), "Name");
    assert!(matches!(prop.ty(), Some(Type::Predef(_))));
    assert_eq!(prop.accessors().unwrap().accessors().count(), 2);
    assert!(prop.value().is_some());

    let Member::Method(run) = &members[2] else {
        panic!("expected method");
    };
    assert!(run.is_static());
    assert!(run.return_type().is_none());
    let params: Vec<_> = run
        .params()
        .map(|p| p.name().unwrap().text().to_string())
        .collect();
    assert_eq!(params, vec!["x", "y"]);
    assert!(run.body().is_some());

    let Member::Method(sum) = &members[3] else {
        panic!("expected method");
    };
    assert!(matches!(sum.expr_body(), Some(Expr::Binary(_))));
    assert!(sum.body().is_none());
}

#[test]
fn named_type_segments_and_args() {
    let root = parse_ok("System.Collections.Generic.Dictionary<string, int[]> d;").root;
    let Some(Item::Stmt(Stmt::Local(local))) = root.items().next() else {
        panic!("expected local");
    };
    let Some(Type::Named(named)) = local.ty() else {
        panic!("expected named type");
    };
    let segments: Vec<_> = named.segments().map(|t| t.text().to_string()).collect();
    assert_eq!(segments, vec!["System", "Collections", "Generic", "Dictionary"]);

    let args: Vec<_> = named.type_args().unwrap().types().collect();
    assert!(matches!(args[0], Type::Predef(_)));
    let Type::Array(array) = &args[1] else {
        panic!("expected array type");
    };
    assert!(matches!(array.element(), Some(Type::Predef(_))));
}

#[test]
fn literal_kinds() {
    let cases = [
        ("var a = \"s\";", LiteralKind::String),
        ("var a = 'c';", LiteralKind::Char),
        ("var a = 10;", LiteralKind::Int),
        ("var a = 1.5;", LiteralKind::Real),
        ("var a = true;", LiteralKind::Bool),
        ("var a = null;", LiteralKind::Null),
    ];
    for (source, expected) in cases {
        let Expr::Literal(lit) = first_initializer(source) else {
            panic!("expected literal in {source}");
        };
        assert_eq!(lit.kind(), Some(expected), "{source}");
    }
}

#[test]
fn lambda_parts() {
    let Expr::Lambda(lambda) = first_initializer("var f = (a, b) => a;") else {
        panic!("expected lambda");
    };
    let params: Vec<_> = lambda
        .params()
        .map(|p| p.name().unwrap().text().to_string())
        .collect();
    assert_eq!(params, vec!["a", "b"]);
    assert!(matches!(lambda.body_expr(), Some(Expr::Name(_))));
    assert!(lambda.body_block().is_none());
}

#[test]
fn object_and_array_creation() {
    let Expr::Object(obj) = first_initializer("var o = new Point { X = 1, Y = 2 };") else {
        panic!("expected object creation");
    };
    assert!(matches!(obj.ty(), Some(Type::Named(_))));
    assert_eq!(obj.args().count(), 0);
    let inits: Vec<_> = obj
        .initializer()
        .unwrap()
        .members()
        .map(|m| m.name().unwrap().text().to_string())
        .collect();
    assert_eq!(inits, vec!["X", "Y"]);

    let Expr::Array(sized) = first_initializer("var a = new int[3];") else {
        panic!("expected array creation");
    };
    assert!(sized.is_sized());
    assert!(sized.initializer().is_none());

    let Expr::Array(implicit) = first_initializer("var a = new[] { 1, 2 };") else {
        panic!("expected array creation");
    };
    assert!(implicit.ty().is_none());
    assert_eq!(implicit.initializer().unwrap().elements().count(), 2);
}

#[test]
fn foreach_parts() {
    let root = parse_ok("foreach (var x in xs) { }").root;
    let Some(Item::Stmt(Stmt::Foreach(each))) = root.items().next() else {
        panic!("expected foreach");
    };
    assert!(each.is_var());
    assert_eq!(each.name().unwrap().text(), "x");
    assert!(matches!(each.iterable(), Some(Expr::Name(_))));
    assert!(matches!(each.body(), Some(Stmt::Block(_))));
}

#[test]
fn declarator_starts_at_its_name() {
    let input = "var first = 1,  second = new { X = 1 };";
    let root = parse_ok(input).root;
    let Some(Item::Stmt(Stmt::Local(local))) = root.items().next() else {
        panic!("expected a local declaration");
    };

    let texts: Vec<_> = local
        .declarators()
        .map(|d| d.as_cst().text().to_string())
        .collect();
    assert_eq!(texts, ["first = 1", "second = new { X = 1 }"]);
}
