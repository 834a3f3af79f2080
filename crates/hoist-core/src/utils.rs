/// Convert a variable-style name to PascalCase.
///
/// Words are separated by `_`, `-`, `.` or spaces. Inside a word, existing
/// camel humps are kept (`customerInfo` becomes `CustomerInfo`), while
/// all-uppercase words are normalized (`FOO_BAR` becomes `FooBar`).
///
/// # Examples
/// ```
/// use hoist_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("foo_bar"), "FooBar");
/// assert_eq!(to_pascal_case("orderLine"), "OrderLine");
/// assert_eq!(to_pascal_case("FooBar"), "FooBar");  // idempotent
/// ```
pub fn to_pascal_case(s: &str) -> String {
    fn is_separator(c: char) -> bool {
        matches!(c, '_' | '-' | '.' | ' ')
    }

    let mut result = String::with_capacity(s.len());
    for word in s.split(is_separator).filter(|w| !w.is_empty()) {
        let shouting = !word.chars().any(|c| c.is_lowercase());
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
        }
        for c in chars {
            if shouting {
                result.extend(c.to_lowercase());
            } else {
                result.push(c);
            }
        }
    }
    result
}

/// Whether `s` is a syntactically valid identifier: a letter or `_`,
/// followed by letters, digits or `_`.
///
/// Keywords are not rejected here; that is language-specific.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_') && chars.all(|c| c.is_alphanumeric() || c == '_')
}
