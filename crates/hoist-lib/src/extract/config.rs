//! Configuration for extraction and its diagnostics.

use crate::diagnostics::Severity;

/// Identity and presentation of the "anonymous type" diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleDescriptor {
    pub id: String,
    pub title: String,
    pub category: String,
    pub severity: Severity,
    /// Message for declaration sites; `{0}` is replaced by the variable name.
    pub declaration_message: String,
    /// Message for expression sites.
    pub usage_message: String,
    /// Title of the offered fix.
    pub fix_title: String,
}

impl Default for RuleDescriptor {
    fn default() -> Self {
        Self {
            id: "HX0001".to_string(),
            title: "Anonymous type can be extracted".to_string(),
            category: "Refactoring".to_string(),
            severity: Severity::Info,
            declaration_message: "Variable '{0}' is an anonymous type".to_string(),
            usage_message: "Anonymous type used".to_string(),
            fix_title: "Extract type from anonymous declaration".to_string(),
        }
    }
}

impl RuleDescriptor {
    pub fn declaration_message(&self, variable: &str) -> String {
        self.declaration_message.replace("{0}", variable)
    }
}

/// Where the base name of a new type comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NamingStrategy {
    /// PascalCase of the first declared variable (`person` → `Person`),
    /// or the fallback base for expression-only types.
    #[default]
    FromVariable,
    /// Always the fallback base.
    Fixed,
}

/// How members of the synthesized type are declared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemberStyle {
    /// `public T Name { get; set; }`
    #[default]
    Property,
    /// `public T Name;`
    Field,
}

/// Configuration for extraction.
#[derive(Clone, Debug)]
pub struct ExtractConfig {
    pub(crate) naming: NamingStrategy,
    pub(crate) fallback_name: String,
    pub(crate) member_style: MemberStyle,
    pub(crate) indent: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            naming: NamingStrategy::default(),
            fallback_name: "Anon".to_string(),
            member_style: MemberStyle::default(),
            indent: "    ".to_string(),
        }
    }
}

impl ExtractConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn naming(mut self, value: NamingStrategy) -> Self {
        self.naming = value;
        self
    }

    /// Base name used when no variable name is available.
    pub fn fallback_name(mut self, value: impl Into<String>) -> Self {
        self.fallback_name = value.into();
        self
    }

    pub fn member_style(mut self, value: MemberStyle) -> Self {
        self.member_style = value;
        self
    }

    /// One level of indentation in synthesized declarations.
    pub fn indent(mut self, value: impl Into<String>) -> Self {
        self.indent = value.into();
        self
    }
}
