use super::model::MemberKind;

/// Why an extraction request could not be carried out.
///
/// Every variant is local to one request: the input tree is never left
/// partially rewritten.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("no anonymous type to extract here")]
    NoCandidateFound,

    #[error("anonymous type is not declared inside a type that can host a declaration")]
    NoEnclosingType,

    #[error("containing type `{0}` is declared in more than one place")]
    AmbiguousContainingType(String),

    #[error("{kind} `{name}` cannot be carried by a declared type")]
    UnsupportedMemberKind { name: String, kind: MemberKind },

    #[error("type of member `{0}` cannot be written in a declaration")]
    UnsupportedMemberType(String),

    #[error("not supported: {0}")]
    NotSupported(Unsupported),

    #[error("`{0}` is not a valid type name")]
    InvalidTypeName(String),

    #[error("no free type name derived from `{0}`")]
    NameAllocationExhausted(String),

    #[error("extraction cancelled")]
    Cancelled,
}

/// Constructs the engine recognizes but does not rewrite.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Unsupported {
    #[error("anonymous type created inside a lambda")]
    LambdaProjection,

    #[error("member `{0}` has an anonymous type itself")]
    NestedStructuralMember(String),
}

impl ExtractError {
    /// Whether the host should quietly not offer the fix, rather than report a failure.
    pub fn is_not_applicable(&self) -> bool {
        !matches!(self, ExtractError::Cancelled)
    }
}

impl From<Unsupported> for ExtractError {
    fn from(value: Unsupported) -> Self {
        ExtractError::NotSupported(value)
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
