//! Python literal escaping.

/// Render `s` as a single-quoted Python string literal.
pub fn string_literal(s: &str) -> String {
    quoted(s, '\'')
}

/// Render `s` as a double-quoted Python string literal.
pub fn double_quoted_literal(s: &str) -> String {
    quoted(s, '"')
}

fn quoted(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Escape text for the inside of a `"""` docstring.
pub fn escape_docstring(text: &str) -> String {
    text.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"")
}

/// Render `text` as a one-line `"""..."""` docstring.
///
/// Line breaks collapse into single spaces. Every trailing quote is escaped
/// so none of them can merge with the closing delimiter.
pub fn inline_docstring(text: &str) -> String {
    let text = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let body = text.trim_end_matches('"');
    let trailing = text.len() - body.len();
    format!(
        "\"\"\"{}{}\"\"\"",
        escape_docstring(body),
        "\\\"".repeat(trailing)
    )
}
