//! Well-known library types the reference host can resolve without metadata.
//!
//! A small fixed catalog: enough of `System`, `System.Text` and
//! `System.Collections.Generic` for member types in realistic snippets, plus
//! the LINQ operators whose lambdas commonly project anonymous objects.

use super::types::{Primitive, TYPE_VOID, TypeContext, TypeId, TypeShape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryType {
    pub namespace: &'static str,
    pub name: &'static str,
    pub arity: usize,
}

const fn lib(namespace: &'static str, name: &'static str, arity: usize) -> LibraryType {
    LibraryType {
        namespace,
        name,
        arity,
    }
}

pub const TYPES: &[LibraryType] = &[
    lib("System", "DateTime", 0),
    lib("System", "Guid", 0),
    lib("System", "TimeSpan", 0),
    lib("System", "Uri", 0),
    lib("System", "Exception", 0),
    lib("System.Text", "StringBuilder", 0),
    lib("System.Collections.Generic", "List", 1),
    lib("System.Collections.Generic", "Dictionary", 2),
    lib("System.Collections.Generic", "IEnumerable", 1),
];

pub fn find(namespace: &str, name: &str, arity: usize) -> Option<&'static LibraryType> {
    TYPES
        .iter()
        .find(|t| t.namespace == namespace && t.name == name && t.arity == arity)
}

pub fn types_named(name: &str, arity: usize) -> impl Iterator<Item = &'static LibraryType> + '_ {
    TYPES
        .iter()
        .filter(move |t| t.name == name && t.arity == arity)
}

/// Whether `path` names a library namespace or a prefix of one.
pub fn is_namespace(path: &str) -> bool {
    TYPES.iter().any(|t| {
        t.namespace == path
            || t.namespace
                .strip_prefix(path)
                .is_some_and(|rest| rest.starts_with('.'))
    })
}

fn named_parts(types: &TypeContext, ty: TypeId) -> Option<(&str, &str, &[TypeId])> {
    match types.get_type(ty)? {
        TypeShape::Named {
            namespace: Some(ns),
            name,
            args,
        } => Some((ns.as_str(), name.as_str(), args.as_slice())),
        _ => None,
    }
}

fn system(types: &mut TypeContext, name: &str) -> TypeId {
    types.intern_named(Some("System"), name, Vec::new())
}

fn generic(types: &mut TypeContext, name: &str, args: Vec<TypeId>) -> TypeId {
    types.intern_named(Some("System.Collections.Generic"), name, args)
}

pub fn enumerable_of(types: &mut TypeContext, element: TypeId) -> TypeId {
    generic(types, "IEnumerable", vec![element])
}

pub fn list_of(types: &mut TypeContext, element: TypeId) -> TypeId {
    generic(types, "List", vec![element])
}

/// Element type when `ty` can be enumerated.
pub fn element_type(types: &TypeContext, ty: TypeId) -> Option<TypeId> {
    match types.get_type(ty)? {
        TypeShape::Array(element) => Some(*element),
        TypeShape::Primitive(Primitive::String) => Some(types.primitive(Primitive::Char)),
        TypeShape::Named {
            namespace: Some(ns),
            name,
            args,
        } if ns == "System.Collections.Generic" => match (name.as_str(), args.as_slice()) {
            ("List" | "IEnumerable", [element]) => Some(*element),
            _ => None,
        },
        _ => None,
    }
}

/// Type of `receiver[index]`.
pub fn indexer(types: &TypeContext, receiver: TypeId) -> Option<TypeId> {
    if let Some((ns, name, args)) = named_parts(types, receiver)
        && ns == "System.Collections.Generic"
        && name == "Dictionary"
    {
        return args.get(1).copied();
    }
    match types.get_type(receiver)? {
        TypeShape::Named { name, .. } if name == "IEnumerable" => None,
        _ => element_type(types, receiver),
    }
}

/// Instance property or field on a library type (or an array).
pub fn instance_member(types: &mut TypeContext, receiver: TypeId, member: &str) -> Option<TypeId> {
    let int = types.primitive(Primitive::Int);
    match types.get_type(receiver)? {
        TypeShape::Array(_) => return (member == "Length").then_some(int),
        TypeShape::Primitive(Primitive::String) => return (member == "Length").then_some(int),
        _ => {}
    }

    let (ns, name, args) = named_parts(types, receiver)?;
    let args = args.to_vec();
    let result = match (ns, name, member) {
        ("System", "DateTime", "Year" | "Month" | "Day" | "Hour" | "Minute" | "Second") => int,
        ("System", "DateTime", "Date") => receiver,
        ("System", "DateTime", "TimeOfDay") => system(types, "TimeSpan"),
        ("System", "TimeSpan", "Days" | "Hours" | "Minutes" | "Seconds") => int,
        ("System", "TimeSpan", "TotalDays" | "TotalHours" | "TotalSeconds") => {
            types.primitive(Primitive::Double)
        }
        ("System", "Uri", "Host" | "AbsoluteUri" | "Scheme") => {
            types.primitive(Primitive::String)
        }
        ("System", "Exception", "Message") => types.primitive(Primitive::String),
        ("System.Text", "StringBuilder", "Length") => int,
        ("System.Collections.Generic", "List" | "Dictionary", "Count") => int,
        ("System.Collections.Generic", "Dictionary", "Keys") => {
            let key = *args.first()?;
            enumerable_of(types, key)
        }
        ("System.Collections.Generic", "Dictionary", "Values") => {
            let value = *args.get(1)?;
            enumerable_of(types, value)
        }
        _ => return None,
    };
    Some(result)
}

/// Static property or field, such as `DateTime.Now` or `string.Empty`.
pub fn static_member(types: &mut TypeContext, owner: TypeId, member: &str) -> Option<TypeId> {
    if types.get_type(owner)?.as_primitive() == Some(Primitive::String) {
        return (member == "Empty").then_some(owner);
    }
    let (ns, name, _) = named_parts(types, owner)?;
    let result = match (ns, name, member) {
        ("System", "DateTime", "Now" | "UtcNow" | "Today" | "MinValue" | "MaxValue") => owner,
        ("System", "Guid", "Empty") => owner,
        ("System", "TimeSpan", "Zero") => owner,
        _ => return None,
    };
    Some(result)
}

/// Return type of a static method call, such as `Guid.NewGuid()`.
pub fn static_method(types: &mut TypeContext, owner: TypeId, method: &str) -> Option<TypeId> {
    if types.get_type(owner)?.as_primitive() == Some(Primitive::String) {
        return matches!(method, "Join" | "Format" | "Concat").then_some(owner);
    }
    let (ns, name, _) = named_parts(types, owner)?;
    let result = match (ns, name, method) {
        ("System", "Guid", "NewGuid" | "Parse") => owner,
        ("System", "DateTime", "Parse") => owner,
        ("System", "TimeSpan", "FromDays" | "FromHours" | "FromMinutes" | "FromSeconds") => owner,
        _ => return None,
    };
    Some(result)
}

/// Return type of an instance method call that does not take a lambda.
pub fn instance_method(types: &mut TypeContext, receiver: TypeId, method: &str) -> Option<TypeId> {
    match method {
        "ToString" => return Some(types.primitive(Primitive::String)),
        "GetHashCode" => return Some(types.primitive(Primitive::Int)),
        "Equals" => return Some(types.primitive(Primitive::Bool)),
        _ => {}
    }

    if let Some(element) = element_type(types, receiver)
        && types.get_type(receiver)?.as_primitive().is_none()
        && let Some(result) = linq(types, method, element, None)
    {
        return Some(result);
    }

    if types.get_type(receiver)?.as_primitive() == Some(Primitive::String) {
        return match method {
            "ToUpper" | "ToLower" | "Trim" | "Substring" | "Replace" => Some(receiver),
            "Contains" | "StartsWith" | "EndsWith" => Some(types.primitive(Primitive::Bool)),
            "IndexOf" => Some(types.primitive(Primitive::Int)),
            _ => None,
        };
    }

    let (ns, name, _) = named_parts(types, receiver)?;
    let result = match (ns, name, method) {
        ("System", "DateTime", "AddDays" | "AddHours" | "AddMinutes" | "AddYears") => receiver,
        ("System.Text", "StringBuilder", "Append" | "AppendLine") => receiver,
        ("System.Collections.Generic", "List", "Add" | "Clear") => TYPE_VOID,
        ("System.Collections.Generic", "List", "Contains") => types.primitive(Primitive::Bool),
        ("System.Collections.Generic", "Dictionary", "ContainsKey") => {
            types.primitive(Primitive::Bool)
        }
        ("System.Collections.Generic", "Dictionary", "Add") => TYPE_VOID,
        _ => return None,
    };
    Some(result)
}

/// Whether `method` is a LINQ operator whose first argument is a lambda over elements.
pub fn takes_element_lambda(method: &str) -> bool {
    matches!(
        method,
        "Select" | "Where" | "OrderBy" | "OrderByDescending" | "Any" | "All" | "First"
            | "FirstOrDefault" | "Count"
    )
}

/// Result type of a LINQ operator over `element`. `projected` is the lambda
/// result for operators that take one.
pub fn linq(
    types: &mut TypeContext,
    method: &str,
    element: TypeId,
    projected: Option<TypeId>,
) -> Option<TypeId> {
    let result = match method {
        "Select" => {
            let projected = projected?;
            enumerable_of(types, projected)
        }
        "Where" | "OrderBy" | "OrderByDescending" | "Distinct" | "Skip" | "Take" | "Reverse" => {
            enumerable_of(types, element)
        }
        "First" | "FirstOrDefault" | "Last" | "LastOrDefault" | "Single" => element,
        "ToList" => list_of(types, element),
        "ToArray" => types.intern_array(element),
        "Any" | "All" => types.primitive(Primitive::Bool),
        "Count" => types.primitive(Primitive::Int),
        _ => return None,
    };
    Some(result)
}
