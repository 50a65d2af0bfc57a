use std::{fmt, path::PathBuf};

/// A dotted Python package name (e.g. `my_api.product`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PythonPackage(String);

impl PythonPackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory of the package relative to the output root.
    pub fn to_path(&self) -> PathBuf {
        self.0.split('.').filter(|s| !s.is_empty()).collect()
    }

    /// Prefix used for internal class identifiers (`my_api.product` -> `my_api_product`).
    pub fn class_prefix(&self) -> String {
        self.0.replace('.', "_")
    }
}

impl fmt::Display for PythonPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PythonPackage {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
