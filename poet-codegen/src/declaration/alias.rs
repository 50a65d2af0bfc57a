//! Type alias declarations.

use super::PythonPackage;
use crate::{Result, builder::PoetWriter, error::require, imports::ImportSet};

/// A module-level name bound to a type expression (`UserId = str`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDeclaration {
    class_name: String,
    package: PythonPackage,
    type_expr: String,
    docs: Option<String>,
    imports: ImportSet,
    sort_key: Option<String>,
}

impl AliasDeclaration {
    pub fn new(
        class_name: impl Into<String>,
        package: impl Into<PythonPackage>,
        type_expr: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            package: package.into(),
            type_expr: type_expr.into(),
            docs: None,
            imports: ImportSet::new(),
            sort_key: None,
        }
    }

    pub fn doc(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    /// Imports needed by the aliased type expression.
    pub fn with_imports(mut self, imports: ImportSet) -> Self {
        self.imports.merge(&imports);
        self
    }

    pub fn sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn package(&self) -> &PythonPackage {
        &self.package
    }

    pub fn type_expr(&self) -> &str {
        &self.type_expr
    }

    pub fn docs(&self) -> Option<&str> {
        self.docs.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn key(&self) -> &str {
        self.sort_key.as_deref().unwrap_or(&self.class_name)
    }

    pub fn imports(&self) -> ImportSet {
        self.imports.clone()
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.class_name, "<unnamed alias>", "class name")?;
        require(self.package.as_str(), &self.class_name, "package")?;
        require(&self.type_expr, &self.class_name, "type")
    }

    pub fn render(&self, writer: &mut PoetWriter) -> Result<()> {
        self.validate()?;
        writer.write_indented_line(format!("{} = {}", self.class_name, self.type_expr));
        if let Some(docs) = self.docs() {
            writer.write_docstring(docs);
        }
        Ok(())
    }
}
