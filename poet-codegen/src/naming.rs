//! Identifier sanitization for generated Python.

/// Language-specific naming rules.
///
/// Holds the reserved words of a target language and the function used to
/// disambiguate an identifier that collides with one of them.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "class" -> "class_" in Python)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        self.safe_name_with(name, &[])
    }

    /// Get a safe name, also escaping names in `extra_reserved`.
    pub fn safe_name_with(&self, name: &str, extra_reserved: &[&str]) -> String {
        if self.is_reserved(name) || extra_reserved.contains(&name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }
}

fn escape_py_reserved(name: &str) -> String {
    format!("{name}_")
}

/// Python naming conventions.
pub const PY_NAMING: NamingConvention = NamingConvention {
    reserved_words: &[
        // Python 3 keywords
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield",
        // Python 2 statements
        "exec", "print",
    ],
    escape_reserved: escape_py_reserved,
};

/// Map a raw name to a safe Python identifier.
pub fn sanitize(name: &str) -> String {
    PY_NAMING.safe_name(name)
}

/// Map a raw name to a safe Python identifier, also avoiding `extra_reserved`.
pub fn sanitize_with(name: &str, extra_reserved: &[&str]) -> String {
    PY_NAMING.safe_name_with(name, extra_reserved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_py_reserved_words() {
        assert!(PY_NAMING.is_reserved("class"));
        assert!(PY_NAMING.is_reserved("None"));
        assert!(PY_NAMING.is_reserved("print"));
        assert!(!PY_NAMING.is_reserved("street"));
        assert!(!PY_NAMING.is_reserved("none"));
    }

    #[test]
    fn test_sanitize_escapes_keywords() {
        assert_eq!(sanitize("class"), "class_");
        assert_eq!(sanitize("from"), "from_");
        assert_eq!(sanitize("street"), "street");
    }

    #[test]
    fn test_sanitize_extra_reserved() {
        assert_eq!(sanitize_with("fields", &["fields"]), "fields_");
        assert_eq!(sanitize_with("fields", &[]), "fields");
        assert_eq!(sanitize_with("import", &["fields"]), "import_");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for name in ["class", "street", "fields", "None"] {
            let once = sanitize_with(name, &["fields"]);
            assert_eq!(sanitize_with(&once, &["fields"]), once);
        }
    }
}
