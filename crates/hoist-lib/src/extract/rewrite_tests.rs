use indoc::indoc;

use crate::Document;
use crate::parser::SyntaxNode;
use crate::test_utils::{doc, dump_cst};

use super::error::{ExtractError, Unsupported};
use super::rewrite::rewrite;

/// Rewrite the type of the first candidate to `name`; returns the new text.
fn rewritten(doc: &Document, name: &str) -> String {
    let root = doc.syntax();
    let target = doc.candidates()[0].ty;
    let result = rewrite(&root, doc.model(), target, name).expect("rewrite");
    SyntaxNode::new_root(result.green).to_string()
}

#[test]
fn rewrites_every_matching_site() {
    let input = indoc! {r#"
    class C
    {
        void M()
        {
            var a = new { Foo = "Bar", Qux = 42 };
            var b = new { Foo = "B4r", Qux = 43 };
            var other = new { Foo = "x" };
        }
    }
    "#};

    insta::assert_snapshot!(rewritten(&doc(input), "NewName"), @r#"
    class C
    {
        void M()
        {
            var a = new NewName { Foo = "Bar", Qux = 42 };
            var b = new NewName { Foo = "B4r", Qux = 43 };
            var other = new { Foo = "x" };
        }
    }
    "#);
}

#[test]
fn projections_gain_explicit_names() {
    let input = indoc! {r#"
    class C
    {
        string title;

        object M(int id)
        {
            return new { id, this.title, Total = id * 2 };
        }
    }
    "#};

    insta::assert_snapshot!(rewritten(&doc(input), "Summary"), @r#"
    class C
    {
        string title;

        object M(int id)
        {
            return new Summary { id = id, title = this.title, Total = id * 2 };
        }
    }
    "#);
}

#[test]
fn result_parses_like_handwritten_code() {
    let input = indoc! {r#"
    class C
    {
        void M(int id)
        {
            var a = new { Id = id, Name = "n" };
        }
    }
    "#};

    let text = rewritten(&doc(input), "Row");
    let handwritten = indoc! {r#"
    class C
    {
        void M(int id)
        {
            var a = new Row { Id = id, Name = "n" };
        }
    }
    "#};
    assert_eq!(text, handwritten);

    let doc = doc(input);
    let root = doc.syntax();
    let result = rewrite(&root, doc.model(), doc.candidates()[0].ty, "Row").expect("rewrite");
    let parsed = crate::test_utils::parse_ok(handwritten);
    assert_eq!(result.green, parsed.root.as_cst().green().into_owned());
    assert_eq!(dump_cst(&text), dump_cst(handwritten));
}

#[test]
fn nested_creations_are_rewritten_inside_arguments() {
    let input = indoc! {r#"
    class C
    {
        void Log(object o) { }

        void M()
        {
            Log(new { Code = 1 });
            Log(new object[] { new { Code = 2 }, new { Code = 3 } });
        }
    }
    "#};

    insta::assert_snapshot!(rewritten(&doc(input), "Entry"), @r#"
    class C
    {
        void Log(object o) { }

        void M()
        {
            Log(new Entry { Code = 1 });
            Log(new object[] { new Entry { Code = 2 }, new Entry { Code = 3 } });
        }
    }
    "#);
}

#[test]
fn reports_rewritten_ranges() {
    let input = "class C { void M() { var a = new { X = 1 }; var b = new { X = 2 }; } }";
    let doc = doc(input);
    let root = doc.syntax();
    let result = rewrite(&root, doc.model(), doc.candidates()[0].ty, "P").expect("rewrite");

    let sites: Vec<&str> = result.sites.iter().map(|r| &input[*r]).collect();
    assert_eq!(sites, ["new { X = 1 }", "new { X = 2 }"]);
}

#[test]
fn no_match_shares_input() {
    let input = "class C { void M() { var a = new { X = 1 }; } }";
    let doc = doc(input);
    let root = doc.syntax();
    let int = doc
        .model()
        .types()
        .primitive(crate::semantic::Primitive::Int);

    let result = rewrite(&root, doc.model(), int, "P").expect("rewrite");
    assert!(result.is_unchanged());
    assert_eq!(&result.green, doc.green());
}

#[test]
fn second_pass_is_a_no_op() {
    let input = indoc! {r#"
    class C
    {
        void M()
        {
            var a = new { X = 1 };
        }
    }
    "#};
    let doc = doc(input);
    let root = doc.syntax();
    let target = doc.candidates()[0].ty;

    let first = rewrite(&root, doc.model(), target, "P").expect("rewrite");
    let again = rewrite(&SyntaxNode::new_root(first.green.clone()), doc.model(), target, "P")
        .expect("rewrite");
    assert!(again.is_unchanged());
    assert_eq!(again.green, first.green);
}

#[test]
fn creation_in_lambda_is_not_supported() {
    let input = indoc! {r#"
    class C
    {
        void M(string[] names)
        {
            var a = new { Name = "x" };
            var rows = names.Select(n => new { Name = n });
        }
    }
    "#};

    let doc = doc(input);
    let root = doc.syntax();
    let target = doc.candidates()[0].ty;
    assert_eq!(
        rewrite(&root, doc.model(), target, "Row"),
        Err(ExtractError::NotSupported(Unsupported::LambdaProjection))
    );
}
