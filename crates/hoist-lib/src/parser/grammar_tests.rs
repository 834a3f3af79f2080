use indoc::indoc;

use crate::test_utils::dump_cst;

#[test]
fn empty_input() {
    insta::assert_snapshot!(dump_cst(""), @"Root");
}

#[test]
fn anonymous_object_declaration() {
    let input = r#"var p = new { Name = "x", Age = 3 };"#;

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      LocalDecl
        KwVar "var"
        VarDeclarator
          Id "p"
          Equals "="
          AnonObjectCreation
            KwNew "new"
            BraceOpen "{"
            AnonMember
              Id "Name"
              Equals "="
              Literal
                StringLiteral "\"x\""
            Comma ","
            AnonMember
              Id "Age"
              Equals "="
              Literal
                IntLiteral "3"
            BraceClose "}"
        Semicolon ";"
    "#);
}

#[test]
fn projection_initializers() {
    let input = "var q = new { p.Name, count };";

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      LocalDecl
        KwVar "var"
        VarDeclarator
          Id "q"
          Equals "="
          AnonObjectCreation
            KwNew "new"
            BraceOpen "{"
            AnonMember
              MemberAccess
                NameRef
                  Id "p"
                Dot "."
                Id "Name"
            Comma ","
            AnonMember
              NameRef
                Id "count"
            BraceClose "}"
        Semicolon ";"
    "#);
}

#[test]
fn class_with_members() {
    let input = indoc! {r#"
    namespace Demo;

    public class Foo : Base
    {
        private int count;
        public string Name { get; set; }
        void Run() { }
    }
    "#};

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      NamespaceDecl
        KwNamespace "namespace"
        Path
          Id "Demo"
        Semicolon ";"
        TypeDecl
          KwPublic "public"
          KwClass "class"
          Id "Foo"
          BaseList
            Colon ":"
            NamedType
              Id "Base"
          BraceOpen "{"
          FieldDecl
            KwPrivate "private"
            PredefType
              PredefinedType "int"
            VarDeclarator
              Id "count"
            Semicolon ";"
          PropertyDecl
            KwPublic "public"
            PredefType
              PredefinedType "string"
            Id "Name"
            AccessorList
              BraceOpen "{"
              Accessor
                Id "get"
                Semicolon ";"
              Accessor
                Id "set"
                Semicolon ";"
              BraceClose "}"
          MethodDecl
            KwVoid "void"
            Id "Run"
            ParamList
              ParenOpen "("
              ParenClose ")"
            Block
              BraceOpen "{"
              BraceClose "}"
          BraceClose "}"
    "#);
}

#[test]
fn braced_namespace_with_using() {
    let input = indoc! {r#"
    using System.Text;
    namespace A.B { struct S { } }
    "#};

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      UsingDirective
        KwUsing "using"
        Path
          Id "System"
          Dot "."
          Id "Text"
        Semicolon ";"
      NamespaceDecl
        KwNamespace "namespace"
        Path
          Id "A"
          Dot "."
          Id "B"
        BraceOpen "{"
        TypeDecl
          KwStruct "struct"
          Id "S"
          BraceOpen "{"
          BraceClose "}"
        BraceClose "}"
    "#);
}

#[test]
fn generic_array_and_nullable_types() {
    let input = "List<int[]> xs; int? n = null;";

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      LocalDecl
        NamedType
          Id "List"
          TypeArgList
            Lt "<"
            ArrayType
              PredefType
                PredefinedType "int"
              BracketOpen "["
              BracketClose "]"
            Gt ">"
        VarDeclarator
          Id "xs"
        Semicolon ";"
      LocalDecl
        NullableType
          PredefType
            PredefinedType "int"
          Question "?"
        VarDeclarator
          Id "n"
          Equals "="
          Literal
            KwNull "null"
        Semicolon ";"
    "#);
}

#[test]
fn binary_precedence() {
    let input = "x = a + b * c;";

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      ExprStmt
        AssignExpr
          NameRef
            Id "x"
          Equals "="
          BinaryExpr
            NameRef
              Id "a"
            Plus "+"
            BinaryExpr
              NameRef
                Id "b"
              Star "*"
              NameRef
                Id "c"
        Semicolon ";"
    "#);
}

#[test]
fn conditional_and_coalesce() {
    let input = "var v = ok ? a ?? b : c;";

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      LocalDecl
        KwVar "var"
        VarDeclarator
          Id "v"
          Equals "="
          ConditionalExpr
            NameRef
              Id "ok"
            Question "?"
            BinaryExpr
              NameRef
                Id "a"
              QuestionQuestion "??"
              NameRef
                Id "b"
            Colon ":"
            NameRef
              Id "c"
        Semicolon ";"
    "#);
}

#[test]
fn call_chain_with_lambda() {
    let input = "var r = xs.Select(x => new { x.Id }).ToList();";

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      LocalDecl
        KwVar "var"
        VarDeclarator
          Id "r"
          Equals "="
          Call
            MemberAccess
              Call
                MemberAccess
                  NameRef
                    Id "xs"
                  Dot "."
                  Id "Select"
                ArgList
                  ParenOpen "("
                  Lambda
                    LambdaParamList
                      LambdaParam
                        Id "x"
                    FatArrow "=>"
                    AnonObjectCreation
                      KwNew "new"
                      BraceOpen "{"
                      AnonMember
                        MemberAccess
                          NameRef
                            Id "x"
                          Dot "."
                          Id "Id"
                      BraceClose "}"
                  ParenClose ")"
              Dot "."
              Id "ToList"
            ArgList
              ParenOpen "("
              ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn parenthesized_lambda_with_block() {
    let input = "f = (a, b) => { return a; };";

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      ExprStmt
        AssignExpr
          NameRef
            Id "f"
          Equals "="
          Lambda
            LambdaParamList
              ParenOpen "("
              LambdaParam
                Id "a"
              Comma ","
              LambdaParam
                Id "b"
              ParenClose ")"
            FatArrow "=>"
            Block
              BraceOpen "{"
              ReturnStmt
                KwReturn "return"
                NameRef
                  Id "a"
                Semicolon ";"
              BraceClose "}"
        Semicolon ";"
    "#);
}

#[test]
fn object_creation_with_initializer() {
    let input = "var o = new Point(1) { X = 2 };";

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      LocalDecl
        KwVar "var"
        VarDeclarator
          Id "o"
          Equals "="
          ObjectCreation
            KwNew "new"
            NamedType
              Id "Point"
            ArgList
              ParenOpen "("
              Literal
                IntLiteral "1"
              ParenClose ")"
            ObjectInit
              BraceOpen "{"
              MemberInit
                Id "X"
                Equals "="
                Literal
                  IntLiteral "2"
              BraceClose "}"
        Semicolon ";"
    "#);
}

#[test]
fn array_creations() {
    let input = "var a = new[] { 1 }; var b = new int[2]; var c = new string[] { };";

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      LocalDecl
        KwVar "var"
        VarDeclarator
          Id "a"
          Equals "="
          ArrayCreation
            KwNew "new"
            BracketOpen "["
            BracketClose "]"
            ArrayInit
              BraceOpen "{"
              Literal
                IntLiteral "1"
              BraceClose "}"
        Semicolon ";"
      LocalDecl
        KwVar "var"
        VarDeclarator
          Id "b"
          Equals "="
          ArrayCreation
            KwNew "new"
            PredefType
              PredefinedType "int"
            BracketOpen "["
            Literal
              IntLiteral "2"
            BracketClose "]"
        Semicolon ";"
      LocalDecl
        KwVar "var"
        VarDeclarator
          Id "c"
          Equals "="
          ArrayCreation
            KwNew "new"
            ArrayType
              PredefType
                PredefinedType "string"
              BracketOpen "["
              BracketClose "]"
            ArrayInit
              BraceOpen "{"
              BraceClose "}"
        Semicolon ";"
    "#);
}

#[test]
fn cast_versus_parenthesized() {
    let input = "var a = (int)x; var b = (y) + 1;";

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      LocalDecl
        KwVar "var"
        VarDeclarator
          Id "a"
          Equals "="
          CastExpr
            ParenOpen "("
            PredefType
              PredefinedType "int"
            ParenClose ")"
            NameRef
              Id "x"
        Semicolon ";"
      LocalDecl
        KwVar "var"
        VarDeclarator
          Id "b"
          Equals "="
          BinaryExpr
            ParenExpr
              ParenOpen "("
              NameRef
                Id "y"
              ParenClose ")"
            Plus "+"
            Literal
              IntLiteral "1"
        Semicolon ";"
    "#);
}

#[test]
fn control_flow_statements() {
    let input = indoc! {r#"
    foreach (var item in items)
        if (item.Ok) { count++; } else return;
    "#};

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      ForeachStmt
        KwForeach "foreach"
        ParenOpen "("
        KwVar "var"
        Id "item"
        KwIn "in"
        NameRef
          Id "items"
        ParenClose ")"
        IfStmt
          KwIf "if"
          ParenOpen "("
          MemberAccess
            NameRef
              Id "item"
            Dot "."
            Id "Ok"
          ParenClose ")"
          Block
            BraceOpen "{"
            ExprStmt
              PostfixExpr
                NameRef
                  Id "count"
                PlusPlus "++"
              Semicolon ";"
            BraceClose "}"
          KwElse "else"
          ReturnStmt
            KwReturn "return"
            Semicolon ";"
    "#);
}

#[test]
fn constructor_and_expression_bodied_members() {
    let input = indoc! {r#"
    class C
    {
        C(int x) { }
        int Twice(int v) => v * 2;
        int Answer => 42;
    }
    "#};

    insta::assert_snapshot!(dump_cst(input), @r#"
    Root
      TypeDecl
        KwClass "class"
        Id "C"
        BraceOpen "{"
        ConstructorDecl
          Id "C"
          ParamList
            ParenOpen "("
            Param
              PredefType
                PredefinedType "int"
              Id "x"
            ParenClose ")"
          Block
            BraceOpen "{"
            BraceClose "}"
        MethodDecl
          PredefType
            PredefinedType "int"
          Id "Twice"
          ParamList
            ParenOpen "("
            Param
              PredefType
                PredefinedType "int"
              Id "v"
            ParenClose ")"
          FatArrow "=>"
          BinaryExpr
            NameRef
              Id "v"
            Star "*"
            Literal
              IntLiteral "2"
          Semicolon ";"
        PropertyDecl
          PredefType
            PredefinedType "int"
          Id "Answer"
          FatArrow "=>"
          Literal
            IntLiteral "42"
          Semicolon ";"
        BraceClose "}"
    "#);
}

#[test]
fn trivia_is_preserved_losslessly() {
    let input = indoc! {r#"
    // leading
    class A { /* inner */ int x = new { V = 1 }.V ; }
    "#};

    let result = crate::parser::parse(input).unwrap();
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.root.as_cst().to_string(), input);
}

#[test]
fn spaced_token_pairs() {
    let input = indoc! {r#"
    using System . Collections;
    class A
    {
        Dictionary<string, int [ ]> map;
        void M()
        {
            var p = new { Name = "x" };
            var q = new Point { X = (int ) 2 };
        }
    }
    "#};

    let result = crate::parser::parse(input).unwrap();
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.root.as_cst().to_string(), input);
}
