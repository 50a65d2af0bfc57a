use miette::Diagnostic;
use thiserror::Error;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors raised while rendering a declaration or assembling a module.
///
/// Every error is local to the declaration (or module) being rendered and
/// names it, so one bad declaration never hides which one failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RenderError {
    #[error("declaration '{declaration}' is missing a value for {what}")]
    #[diagnostic(code(poet::missing_value))]
    MissingValue { declaration: String, what: String },

    #[error(
        "field '{field}' of '{declaration}' is rendered as '{name}', which is already used by field '{conflicts_with}'"
    )]
    #[diagnostic(
        code(poet::duplicate_attribute),
        help("rename one of the fields so they stay distinct after keyword escaping")
    )]
    DuplicateAttribute {
        declaration: String,
        field: String,
        conflicts_with: String,
        name: String,
    },

    #[error(
        "field '{field}' of '{declaration}' would be stored in slot '{slot}', which is already used by field '{conflicts_with}'"
    )]
    #[diagnostic(
        code(poet::duplicate_slot),
        help("rename one of the fields so their backing slots stay distinct")
    )]
    DuplicateSlot {
        declaration: String,
        field: String,
        conflicts_with: String,
        slot: String,
    },

    #[error(
        "field '{field}' of '{declaration}' is rendered as '{name}', which is reserved for the generated class"
    )]
    #[diagnostic(
        code(poet::reserved_attribute),
        help("rename the field; its wire name can stay the same")
    )]
    ReservedAttribute {
        declaration: String,
        field: String,
        name: String,
    },

    #[error("enum '{declaration}' declares value '{value}' more than once")]
    #[diagnostic(code(poet::duplicate_enum_value))]
    DuplicateEnumValue { declaration: String, value: String },

    #[error("module '{package}' contains more than one declaration named '{class_name}'")]
    #[diagnostic(code(poet::duplicate_declaration))]
    DuplicateDeclaration { package: String, class_name: String },

    #[error("writer finished with unbalanced indentation (depth {depth})")]
    #[diagnostic(code(poet::unbalanced_indent))]
    UnbalancedIndent { depth: usize },

    #[error("writer indentation was decreased below zero")]
    #[diagnostic(code(poet::indent_underflow))]
    IndentUnderflow,
}

impl RenderError {
    /// Create a missing value error.
    pub fn missing(declaration: impl Into<String>, what: impl Into<String>) -> Self {
        Self::MissingValue {
            declaration: declaration.into(),
            what: what.into(),
        }
    }
}

/// Fail with [`RenderError::MissingValue`] when `value` is empty.
pub(crate) fn require(value: &str, declaration: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RenderError::missing(declaration, what));
    }
    Ok(())
}
