use rowan::TextRange;
use serde::Serialize;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics have overlapping spans, the higher-priority one
/// suppresses the lower-priority one. This prevents cascading error noise.
///
/// Priority rationale:
/// - Unclosed delimiters cause massive cascading errors downstream
/// - Expected token errors are root causes the user should fix first
/// - Unexpected tokens are specific mistakes at a location
/// - Semantic findings assume valid syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // These cause cascading errors throughout the rest of the file
    UnclosedBrace,
    UnclosedParen,
    UnclosedBracket,

    // User omitted something required - root cause errors
    ExpectedExpression,
    ExpectedType,
    ExpectedIdentifier,
    ExpectedMember,
    ExpectedAccessor,
    ExpectedStatement,
    MissingSemicolon,

    // User wrote something that doesn't belong
    UnexpectedToken,

    // Valid syntax, invalid semantics
    InvalidAnonymousMember,
    DuplicateAnonymousMember,

    // Refactoring opportunities
    AnonymousTypeDeclaration,
    AnonymousTypeUsage,
}

impl DiagnosticKind {
    /// Default severity for this kind. Can be overridden per message.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::AnonymousTypeDeclaration | Self::AnonymousTypeUsage => Severity::Info,
            _ => Severity::Error,
        }
    }

    /// Whether this kind suppresses `other` when spans overlap.
    ///
    /// Uses enum discriminant ordering: lower position = higher priority.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Structural errors are Unclosed* - they cause cascading errors but
    /// should be suppressed by root-cause errors at the same position.
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            Self::UnclosedBrace | Self::UnclosedParen | Self::UnclosedBracket
        )
    }

    /// Root cause errors - user omitted something required.
    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedExpression
                | Self::ExpectedType
                | Self::ExpectedIdentifier
                | Self::ExpectedMember
                | Self::ExpectedAccessor
                | Self::ExpectedStatement
                | Self::MissingSemicolon
        )
    }

    /// Findings that never take part in syntax-error suppression.
    pub fn is_finding(&self) -> bool {
        matches!(
            self,
            Self::AnonymousTypeDeclaration | Self::AnonymousTypeUsage
        )
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedBrace => "missing closing `}`",
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBracket => "missing closing `]`",

            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedType => "expected a type",
            Self::ExpectedIdentifier => "expected an identifier",
            Self::ExpectedMember => "expected a member declaration",
            Self::ExpectedAccessor => "expected `get` or `set`",
            Self::ExpectedStatement => "expected a statement",
            Self::MissingSemicolon => "missing `;`",

            Self::UnexpectedToken => "unexpected token",

            Self::InvalidAnonymousMember => "invalid anonymous type member declarator",
            Self::DuplicateAnonymousMember => "duplicate anonymous type member",

            Self::AnonymousTypeDeclaration => "variable is an anonymous type",
            Self::AnonymousTypeUsage => "anonymous type used",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnclosedBrace | Self::UnclosedParen | Self::UnclosedBracket => {
                format!("{}; {{}}", self.fallback_message())
            }

            // Caller names what was expected
            Self::ExpectedExpression
            | Self::ExpectedType
            | Self::ExpectedIdentifier
            | Self::ExpectedStatement => "expected {}".to_string(),

            Self::DuplicateAnonymousMember => {
                "anonymous type member `{}` is declared more than once".to_string()
            }

            // Caller provides the complete message
            Self::UnexpectedToken | Self::AnonymousTypeDeclaration | Self::AnonymousTypeUsage => {
                "{}".to_string()
            }

            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A suggested fix. Textual fixes carry a replacement for `range`; fixes
/// computed elsewhere (such as a refactoring) carry only their title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) range: TextRange,
    pub(crate) replacement: Option<String>,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(
        range: TextRange,
        replacement: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            range,
            replacement: Some(replacement.into()),
            description: description.into(),
        }
    }

    pub fn titled(range: TextRange, description: impl Into<String>) -> Self {
        Self {
            range,
            replacement: None,
            description: description.into(),
        }
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    /// The range used for suppression logic. Errors within another error's
    /// suppression_range may be suppressed. Defaults to `range` but can be
    /// set to a parent context (e.g., enclosing block span) for better cascading
    /// error suppression.
    pub(crate) suppression_range: TextRange,
    pub(crate) message: String,
    pub(crate) severity: Severity,
    /// Rule identifier for analyzer findings.
    pub(crate) code: Option<String>,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            suppression_range: range,
            message: message.into(),
            severity: kind.default_severity(),
            code: None,
            fix: None,
            related: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn fix(&self) -> Option<&Fix> {
        self.fix.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        if let Some(code) = &self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}
