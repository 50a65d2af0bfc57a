//! Enumeration declarations.

use std::collections::HashSet;

use super::{PythonPackage, export::rename_class};
use crate::{
    RenderError, Result,
    builder::{
        PoetWriter,
        literal::{inline_docstring, string_literal},
    },
    error::require,
    imports::ImportSet,
    naming::sanitize,
};

/// Catch-all member for values unknown to this version of the definition.
pub const UNKNOWN_VALUE: &str = "UNKNOWN";

/// A single enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub value: String,
    pub docs: Option<String>,
}

impl EnumValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            docs: None,
        }
    }

    pub fn doc(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }
}

/// An enumeration of string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDeclaration {
    class_name: String,
    definition_name: String,
    package: PythonPackage,
    docs: Option<String>,
    values: Vec<EnumValue>,
    sort_key: Option<String>,
}

impl EnumDeclaration {
    pub fn new(
        class_name: impl Into<String>,
        definition_name: impl Into<String>,
        package: impl Into<PythonPackage>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            definition_name: definition_name.into(),
            package: package.into(),
            docs: None,
            values: Vec::new(),
            sort_key: None,
        }
    }

    pub fn doc(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    pub fn value(mut self, value: EnumValue) -> Self {
        self.values.push(value);
        self
    }

    pub fn values(mut self, values: impl IntoIterator<Item = EnumValue>) -> Self {
        self.values.extend(values);
        self
    }

    pub fn sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn definition_name(&self) -> &str {
        &self.definition_name
    }

    pub fn package(&self) -> &PythonPackage {
        &self.package
    }

    pub fn docs(&self) -> Option<&str> {
        self.docs.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn value_list(&self) -> &[EnumValue] {
        &self.values
    }

    pub fn key(&self) -> &str {
        self.sort_key.as_deref().unwrap_or(&self.class_name)
    }

    pub fn imports(&self) -> ImportSet {
        ImportSet::new()
            .with("conjure_python_client", &["ConjureEnumType"])
            .with_module("builtins")
    }

    /// Check required values and reject repeated members.
    pub fn validate(&self) -> Result<()> {
        let declaration = self.class_name.as_str();
        require(declaration, "<unnamed enum>", "class name")?;
        require(&self.definition_name, declaration, "definition name")?;
        require(self.package.as_str(), declaration, "package")?;

        let mut seen = HashSet::with_capacity(self.values.len());
        for (index, value) in self.values.iter().enumerate() {
            require(&value.value, declaration, &format!("enum value #{index}"))?;
            // Distinct values may still share a member name once escaped.
            if !seen.insert(sanitize(&value.value)) {
                return Err(RenderError::DuplicateEnumValue {
                    declaration: declaration.to_string(),
                    value: value.value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Render the class, its members and the export aliasing lines.
    pub fn render(&self, writer: &mut PoetWriter) -> Result<()> {
        self.validate()?;

        writer.write_indented_line(format!("class {}(ConjureEnumType):", self.class_name));
        writer.indented(|w| {
            if let Some(docs) = self.docs() {
                w.write_docstring(docs);
            }

            w.write_line();
            for value in &self.values {
                let docs = value
                    .docs
                    .as_deref()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or(&value.value);
                write_member(w, &value.value, docs);
            }
            if !self.values.iter().any(|v| v.value == UNKNOWN_VALUE) {
                write_member(w, UNKNOWN_VALUE, UNKNOWN_VALUE);
            }

            w.write_line();
            w.write_indented_line("def __reduce_ex__(self, proto):");
            w.indented(|w| {
                w.write_indented_line("return self.__class__, (self.name,)");
                Ok(())
            })
        })?;

        writer.write_line();
        rename_class(writer, &self.class_name, &self.package, &self.definition_name);
        Ok(())
    }
}

fn write_member(w: &mut PoetWriter, value: &str, docs: &str) {
    w.write_indented_line(format!("{} = {}", sanitize(value), string_literal(value)))
        .write_indented_line(inline_docstring(docs));
}
