//! Structured rendering of a type as it should be written in source.

use std::fmt;

/// How a member type is spelled in a synthesized declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDisplay {
    /// `int`, `string`, ...
    Keyword(String),
    /// `DateTime`, `System.Guid`, `List<Order>`
    Path {
        segments: Vec<String>,
        args: Vec<TypeDisplay>,
    },
    Array(Box<TypeDisplay>),
    Nullable(Box<TypeDisplay>),
}

impl TypeDisplay {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        TypeDisplay::Keyword(keyword.into())
    }

    pub fn path<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        TypeDisplay::Path {
            segments: segments.into_iter().map(Into::into).collect(),
            args: Vec::new(),
        }
    }

    pub fn with_args(self, new_args: Vec<TypeDisplay>) -> Self {
        match self {
            TypeDisplay::Path { segments, .. } => TypeDisplay::Path {
                segments,
                args: new_args,
            },
            other => other,
        }
    }
}

impl fmt::Display for TypeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDisplay::Keyword(k) => f.write_str(k),
            TypeDisplay::Path { segments, args } => {
                f.write_str(&segments.join("."))?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeDisplay::Array(element) => write!(f, "{}[]", element),
            TypeDisplay::Nullable(inner) => write!(f, "{}?", inner),
        }
    }
}
