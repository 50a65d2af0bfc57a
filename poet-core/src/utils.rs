//! Shared utility functions for code generation.

/// Convert a string to snake_case (e.g., "unitNumber" -> "unit_number").
///
/// Acronyms are kept together, so "HTTPServer" becomes "http_server".
/// Hyphens are treated as word separators.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' {
            result.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let starts_word = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if starts_word {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }
    result
}
