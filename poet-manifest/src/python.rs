use serde::Deserialize;

/// Output options from the `[python]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PythonConfig {
    /// Spaces per indentation level
    #[serde(default = "default_indent")]
    pub indent: u8,

    /// Comment written as the first line of every generated module
    #[serde(default)]
    pub header: Option<String>,

    /// Render the declarations of a module concurrently
    #[serde(default)]
    pub parallel: bool,
}

fn default_indent() -> u8 {
    4
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            header: None,
            parallel: false,
        }
    }
}
