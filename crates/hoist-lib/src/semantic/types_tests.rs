use super::types::{
    AnonField, Primitive, TYPE_LAMBDA, TYPE_NULL, TYPE_UNKNOWN, TYPE_VOID, TypeContext, TypeShape,
};

fn field(name: &str, type_id: super::TypeId) -> AnonField {
    AnonField {
        name: name.to_string(),
        type_id,
    }
}

#[test]
fn reserved_ids_precede_primitives() {
    let ctx = TypeContext::new();

    assert_eq!(ctx.get_type(TYPE_UNKNOWN), Some(&TypeShape::Unknown));
    assert_eq!(ctx.get_type(TYPE_VOID), Some(&TypeShape::Void));
    assert_eq!(ctx.get_type(TYPE_NULL), Some(&TypeShape::Null));
    assert_eq!(ctx.get_type(TYPE_LAMBDA), Some(&TypeShape::Lambda));
    for p in Primitive::ALL {
        assert_eq!(ctx.get_type(ctx.primitive(p)), Some(&TypeShape::Primitive(p)));
    }
    assert_eq!(ctx.len(), 4 + Primitive::ALL.len());
}

#[test]
fn interning_deduplicates() {
    let mut ctx = TypeContext::new();
    let int = ctx.primitive(Primitive::Int);

    let a = ctx.intern_array(int);
    let b = ctx.intern_array(int);
    assert_eq!(a, b);

    let list = ctx.intern_named(Some("System.Collections.Generic"), "List", vec![int]);
    let same = ctx.intern_named(Some("System.Collections.Generic"), "List", vec![int]);
    let other = ctx.intern_named(None, "List", vec![int]);
    assert_eq!(list, same);
    assert_ne!(list, other);
}

#[test]
fn nullable_does_not_nest() {
    let mut ctx = TypeContext::new();
    let int = ctx.primitive(Primitive::Int);

    let once = ctx.intern_nullable(int);
    let twice = ctx.intern_nullable(once);
    assert_eq!(once, twice);
}

#[test]
fn anonymous_types_are_interned_by_shape() {
    let mut ctx = TypeContext::new();
    let string = ctx.primitive(Primitive::String);
    let int = ctx.primitive(Primitive::Int);

    let a = ctx.intern_anonymous(vec![field("Foo", string), field("Qux", int)]);
    let b = ctx.intern_anonymous(vec![field("Foo", string), field("Qux", int)]);
    assert_eq!(a, b);

    // Member order is part of the shape
    let swapped = ctx.intern_anonymous(vec![field("Qux", int), field("Foo", string)]);
    assert_ne!(a, swapped);

    let retyped = ctx.intern_anonymous(vec![field("Foo", string), field("Qux", string)]);
    assert_ne!(a, retyped);

    assert_eq!(ctx.anonymous_fields(a).map(<[AnonField]>::len), Some(2));
    assert_eq!(ctx.anonymous_fields(int), None);
}

#[test]
fn describe() {
    let mut ctx = TypeContext::new();
    let int = ctx.primitive(Primitive::Int);
    let string = ctx.primitive(Primitive::String);
    let date = ctx.intern_named(Some("System"), "DateTime", Vec::new());
    let dict = ctx.intern_named(
        Some("System.Collections.Generic"),
        "Dictionary",
        vec![string, int],
    );
    let nullable = ctx.intern_nullable(date);
    let array = ctx.intern_array(nullable);
    let anon = ctx.intern_anonymous(vec![field("Id", int), field("Tags", array)]);

    let rendered: Vec<_> = [TYPE_UNKNOWN, TYPE_NULL, int, date, dict, array, anon]
        .into_iter()
        .map(|t| ctx.describe(t))
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    ?
    null
    int
    System.DateTime
    System.Collections.Generic.Dictionary<string, int>
    System.DateTime?[]
    new { Id: int, Tags: System.DateTime?[] }
    ");
}

#[test]
fn keywords_round_trip() {
    for p in Primitive::ALL {
        assert_eq!(Primitive::from_keyword(p.keyword()), Some(p));
    }
    assert_eq!(Primitive::from_keyword("var"), None);
}

#[test]
fn numeric_promotion() {
    assert_eq!(Primitive::promote(Primitive::Int, Primitive::Long), Primitive::Long);
    assert_eq!(Primitive::promote(Primitive::Int, Primitive::Double), Primitive::Double);
    assert_eq!(Primitive::promote(Primitive::Byte, Primitive::Short), Primitive::Int);
    assert!(!Primitive::String.is_numeric());
}
