//! JavaScript/TypeScript identifier utilities.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_codegen::common::typescript::to_js_identifier;
//!
//! assert_eq!(to_js_identifier("accountId"), "accountId");
//! assert_eq!(to_js_identifier("class"), "class_");
//! assert_eq!(to_js_identifier("2fa-code"), "_2fa_code");
//! ```

/// Reserved words that cannot name a parameter in strict-mode JavaScript
/// or in a TypeScript declaration.
const RESERVED_WORDS: &[&str] = &[
    "arguments",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Returns `true` if `name` is a reserved word.
///
/// # Examples
///
/// ```
/// use rsocket_export_codegen::common::typescript::is_reserved_word;
///
/// assert!(is_reserved_word("delete"));
/// assert!(!is_reserved_word("remove"));
/// ```
#[must_use]
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Turns an arbitrary name into a usable JavaScript identifier.
///
/// Invalid characters become `_`, a leading digit gets a `_` prefix, and
/// reserved words get a `_` suffix.
#[must_use]
pub fn to_js_identifier(name: &str) -> String {
    let mut result: String = name
        .chars()
        .map(|ch| if is_identifier_char(ch) { ch } else { '_' })
        .collect();

    if result.is_empty() {
        return "_".to_string();
    }

    if result.starts_with(|ch: char| ch.is_ascii_digit()) {
        result.insert(0, '_');
    }

    if is_reserved_word(&result) {
        result.push('_');
    }

    result
}

/// Wraps a static type in parentheses when it is a union, so that an array
/// suffix or `| null` binds correctly.
///
/// # Examples
///
/// ```
/// use rsocket_export_codegen::common::typescript::parenthesize_union;
///
/// assert_eq!(parenthesize_union("string"), "string");
/// assert_eq!(parenthesize_union("A[] | Observable<A>"), "(A[] | Observable<A>)");
/// ```
#[must_use]
pub fn parenthesize_union(ts_type: &str) -> String {
    if ts_type.contains('|') {
        format!("({ts_type})")
    } else {
        ts_type.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifiers_unchanged() {
        for name in ["id", "nick", "$value", "_private", "updates2"] {
            assert_eq!(to_js_identifier(name), name);
        }
    }

    #[test]
    fn test_reserved_words_get_suffix() {
        assert_eq!(to_js_identifier("new"), "new_");
        assert_eq!(to_js_identifier("function"), "function_");
    }

    #[test]
    fn test_invalid_characters_replaced() {
        assert_eq!(to_js_identifier("first-name"), "first_name");
        assert_eq!(to_js_identifier("a b"), "a_b");
        assert_eq!(to_js_identifier(""), "_");
    }

    #[test]
    fn test_leading_digit() {
        assert_eq!(to_js_identifier("1st"), "_1st");
    }
}
