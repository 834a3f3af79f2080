//! Interned type representation for the reference host.
//!
//! Types are interned so that equality is a handle comparison. Anonymous
//! types are interned by shape: two anonymous creations with the same member
//! names, member types and order get the same `TypeId`.

use std::collections::HashMap;

/// Interned type identifier.
///
/// Index into the type registry. Values 0-3 are reserved for the special
/// types below; primitives follow.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TypeId(pub u32);

pub const TYPE_UNKNOWN: TypeId = TypeId(0);
pub const TYPE_VOID: TypeId = TypeId(1);
pub const TYPE_NULL: TypeId = TypeId(2);
pub const TYPE_LAMBDA: TypeId = TypeId(3);

impl TypeId {
    pub fn is_unknown(self) -> bool {
        self == TYPE_UNKNOWN
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Primitive {
    Bool,
    Byte,
    Char,
    Decimal,
    Double,
    Float,
    Int,
    Long,
    Object,
    Short,
    String,
    UInt,
    ULong,
}

impl Primitive {
    pub const ALL: [Primitive; 13] = [
        Primitive::Bool,
        Primitive::Byte,
        Primitive::Char,
        Primitive::Decimal,
        Primitive::Double,
        Primitive::Float,
        Primitive::Int,
        Primitive::Long,
        Primitive::Object,
        Primitive::Short,
        Primitive::String,
        Primitive::UInt,
        Primitive::ULong,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Decimal => "decimal",
            Primitive::Double => "double",
            Primitive::Float => "float",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Object => "object",
            Primitive::Short => "short",
            Primitive::String => "string",
            Primitive::UInt => "uint",
            Primitive::ULong => "ulong",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            Primitive::Bool | Primitive::Char | Primitive::Object | Primitive::String
        )
    }

    /// Rank for binary numeric promotion; the wider operand wins.
    fn numeric_rank(self) -> u8 {
        match self {
            Primitive::Byte | Primitive::Short | Primitive::Char => 0,
            Primitive::Int => 1,
            Primitive::UInt => 2,
            Primitive::Long => 3,
            Primitive::ULong => 4,
            Primitive::Float => 5,
            Primitive::Double => 6,
            Primitive::Decimal => 7,
            _ => 0,
        }
    }

    /// Result of `a op b` for arithmetic operators.
    pub fn promote(a: Primitive, b: Primitive) -> Primitive {
        let wider = if a.numeric_rank() >= b.numeric_rank() { a } else { b };
        match wider {
            Primitive::Byte | Primitive::Short | Primitive::Char => Primitive::Int,
            other => other,
        }
    }
}

/// Member of an anonymous type, in declaration order.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct AnonField {
    pub name: String,
    pub type_id: TypeId,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeShape {
    /// Unresolved: the expression could not be typed.
    Unknown,
    Void,
    /// Type of the `null` literal.
    Null,
    /// Lambda expression without a target type.
    Lambda,
    Primitive(Primitive),
    /// Declared or library type, identified by namespace and name.
    Named {
        namespace: Option<String>,
        name: String,
        args: Vec<TypeId>,
    },
    Array(TypeId),
    Nullable(TypeId),
    /// Compiler-generated record type of `new { ... }`.
    Anonymous(Vec<AnonField>),
}

impl TypeShape {
    pub fn named(namespace: Option<&str>, name: &str, args: Vec<TypeId>) -> Self {
        TypeShape::Named {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            args,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, TypeShape::Anonymous(_))
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            TypeShape::Primitive(p) => Some(*p),
            _ => None,
        }
    }
}

/// Central registry for interned types.
#[derive(Clone, Debug)]
pub struct TypeContext {
    types: Vec<TypeShape>,
    type_map: HashMap<TypeShape, TypeId>,
}

impl Default for TypeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeContext {
    pub fn new() -> Self {
        let mut ctx = Self {
            types: Vec::new(),
            type_map: HashMap::new(),
        };

        // Pre-register special types at their expected IDs
        let unknown_id = ctx.intern_type(TypeShape::Unknown);
        debug_assert_eq!(unknown_id, TYPE_UNKNOWN);

        let void_id = ctx.intern_type(TypeShape::Void);
        debug_assert_eq!(void_id, TYPE_VOID);

        let null_id = ctx.intern_type(TypeShape::Null);
        debug_assert_eq!(null_id, TYPE_NULL);

        let lambda_id = ctx.intern_type(TypeShape::Lambda);
        debug_assert_eq!(lambda_id, TYPE_LAMBDA);

        for primitive in Primitive::ALL {
            ctx.intern_type(TypeShape::Primitive(primitive));
        }

        ctx
    }

    /// Intern a type, returning its ID. Deduplicates identical types.
    pub fn intern_type(&mut self, shape: TypeShape) -> TypeId {
        if let Some(&id) = self.type_map.get(&shape) {
            return id;
        }

        let id = TypeId(self.types.len() as u32);
        self.types.push(shape.clone());
        self.type_map.insert(shape, id);
        id
    }

    pub fn get_type(&self, id: TypeId) -> Option<&TypeShape> {
        self.types.get(id.0 as usize)
    }

    /// ID of an already-interned type, without interning it.
    pub fn lookup(&self, shape: &TypeShape) -> Option<TypeId> {
        self.type_map.get(shape).copied()
    }

    pub fn primitive(&self, primitive: Primitive) -> TypeId {
        // Primitives are registered right after the special types, in `ALL` order
        let index = Primitive::ALL
            .iter()
            .position(|p| *p == primitive)
            .unwrap_or_default();
        TypeId(TYPE_LAMBDA.0 + 1 + index as u32)
    }

    pub fn intern_named(&mut self, namespace: Option<&str>, name: &str, args: Vec<TypeId>) -> TypeId {
        self.intern_type(TypeShape::named(namespace, name, args))
    }

    pub fn intern_array(&mut self, element: TypeId) -> TypeId {
        self.intern_type(TypeShape::Array(element))
    }

    pub fn intern_nullable(&mut self, inner: TypeId) -> TypeId {
        if matches!(self.get_type(inner), Some(TypeShape::Nullable(_))) {
            return inner;
        }
        self.intern_type(TypeShape::Nullable(inner))
    }

    pub fn intern_anonymous(&mut self, fields: Vec<AnonField>) -> TypeId {
        self.intern_type(TypeShape::Anonymous(fields))
    }

    pub fn anonymous_fields(&self, id: TypeId) -> Option<&[AnonField]> {
        match self.get_type(id)? {
            TypeShape::Anonymous(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Human-readable rendering for logs and test output.
    pub fn describe(&self, id: TypeId) -> String {
        match self.get_type(id) {
            None | Some(TypeShape::Unknown) => "?".to_string(),
            Some(TypeShape::Void) => "void".to_string(),
            Some(TypeShape::Null) => "null".to_string(),
            Some(TypeShape::Lambda) => "lambda".to_string(),
            Some(TypeShape::Primitive(p)) => p.keyword().to_string(),
            Some(TypeShape::Named {
                namespace,
                name,
                args,
            }) => {
                let mut out = match namespace {
                    Some(ns) => format!("{}.{}", ns, name),
                    None => name.clone(),
                };
                if !args.is_empty() {
                    let args: Vec<_> = args.iter().map(|a| self.describe(*a)).collect();
                    out.push('<');
                    out.push_str(&args.join(", "));
                    out.push('>');
                }
                out
            }
            Some(TypeShape::Array(element)) => format!("{}[]", self.describe(*element)),
            Some(TypeShape::Nullable(inner)) => format!("{}?", self.describe(*inner)),
            Some(TypeShape::Anonymous(fields)) => {
                let fields: Vec<_> = fields
                    .iter()
                    .map(|f| format!("{}: {}", f.name, self.describe(f.type_id)))
                    .collect();
                format!("new {{ {} }}", fields.join(", "))
            }
        }
    }
}
