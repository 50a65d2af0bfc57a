//! Post-parse validation of declaration names and packages.

use std::collections::HashSet;

use miette::SourceSpan;

use crate::{Manifest, Result, error::SourceContext};

/// Tables whose `name` key names a declaration.
const DECLARATION_TABLES: &[&str] = &["[[beans]]", "[[enums]]", "[[aliases]]"];

pub(crate) fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    let mut seen = HashSet::new();

    for (kind, name, package) in manifest.declarations() {
        if name.trim().is_empty() {
            return Err(ctx.validation_error(format!("{kind} declaration has an empty name"), None));
        }

        let spans = find_declaration_spans(ctx.src(), name, package);
        if package.trim().is_empty() {
            return Err(ctx.validation_error(
                format!("{kind} '{name}' has an empty package"),
                spans.first().copied(),
            ));
        }
        if let Some(reason) = validate_package(package) {
            return Err(ctx.validation_error(
                format!("{kind} '{name}' has invalid package '{package}': {reason}"),
                spans.first().copied(),
            ));
        }

        if !seen.insert((package, name)) {
            return Err(ctx.duplicate_name_error(
                name,
                package,
                spans.first().copied(),
                spans.get(1).copied(),
            ));
        }
    }
    Ok(())
}

/// Returns None if `package` is a dotted name, Some(reason) otherwise.
pub(crate) fn validate_package(package: &str) -> Option<&'static str> {
    if package.split('.').any(str::is_empty) {
        return Some("package segments cannot be empty");
    }
    if package.chars().any(char::is_whitespace) {
        return Some("package cannot contain whitespace");
    }
    None
}

/// Find the `name = "<name>"` line of every declaration table in `package`,
/// in source order.
///
/// Spans cover the name without its quotes.
pub(crate) fn find_declaration_spans(src: &str, name: &str, package: &str) -> Vec<SourceSpan> {
    let mut spans = Vec::new();
    let mut table: Option<DeclarationTable<'_>> = None;
    let mut offset = 0;

    for line in src.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            if let Some(span) = table.take().and_then(|t| t.span_for(package)) {
                spans.push(span);
            }
            if DECLARATION_TABLES.contains(&trimmed) {
                table = Some(DeclarationTable::default());
            }
        } else if let Some(current) = table.as_mut() {
            if let Some((start, value)) = key_value(line, "name") {
                if value == name {
                    current.name = Some(SourceSpan::from((offset + start, name.len())));
                }
            } else if let Some((_, value)) = key_value(line, "package") {
                current.package = Some(value);
            }
        }
        offset += line.len();
    }
    if let Some(span) = table.and_then(|t| t.span_for(package)) {
        spans.push(span);
    }
    spans
}

/// Keys of one `[[beans]]`, `[[enums]]` or `[[aliases]]` table.
#[derive(Default)]
struct DeclarationTable<'a> {
    /// Span of the name, set only when it matched.
    name: Option<SourceSpan>,
    package: Option<&'a str>,
}

impl DeclarationTable<'_> {
    fn span_for(&self, package: &str) -> Option<SourceSpan> {
        self.name.filter(|_| self.package == Some(package))
    }
}

/// Parse `<key> = "value"` and return the value with its byte offset in `line`.
fn key_value<'a>(line: &'a str, key: &str) -> Option<(usize, &'a str)> {
    let indent = line.len() - line.trim_start().len();
    let rest = line[indent..].strip_prefix(key)?;
    let after_key = rest.trim_start().strip_prefix('=')?;
    let value = after_key.trim_start();
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let inner = &value[1..];
    let end = inner.find(quote)?;
    let start = line.len() - inner.len();
    Some((start, &inner[..end]))
}
