//! Import collection for generated Python modules.

use std::collections::{BTreeMap, BTreeSet};

use crate::builder::PoetWriter;

/// A symbol imported from a module, optionally renamed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamedImport {
    pub name: String,
    pub alias: Option<String>,
}

impl NamedImport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Import the symbol under another name (`name as alias`).
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} as {}", self.name, alias),
            None => self.name.clone(),
        }
    }
}

/// Tracks imports and deduplicates them.
///
/// Modules and symbols are kept in lexicographic order so the rendered
/// import block is identical across runs, whatever order declarations
/// contributed their imports in.
///
/// # Example
///
/// ```
/// use beanpoet_codegen::imports::ImportSet;
///
/// let mut imports = ImportSet::new();
/// imports.add("typing", "List");
/// imports.add("typing", "Dict");
/// imports.add_module("builtins");
///
/// assert_eq!(
///     imports.render_lines(),
///     vec!["import builtins", "from typing import Dict, List"]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    /// Module specifier -> named imports (`from m import a, b`)
    named: BTreeMap<String, BTreeSet<NamedImport>>,
    /// Whole-module imports (`import m`)
    modules: BTreeSet<String>,
}

impl ImportSet {
    /// Create a new empty import set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.add_named(module, NamedImport::new(symbol));
    }

    /// Add a possibly aliased symbol import from a module.
    pub fn add_named(&mut self, module: &str, import: NamedImport) {
        self.named
            .entry(module.to_string())
            .or_default()
            .insert(import);
    }

    /// Add a whole-module import (`import builtins`).
    pub fn add_module(&mut self, module: &str) {
        self.modules.insert(module.to_string());
    }

    /// Builder-style [`ImportSet::add`].
    pub fn with(mut self, module: &str, symbols: &[&str]) -> Self {
        for symbol in symbols {
            self.add(module, symbol);
        }
        self
    }

    /// Builder-style [`ImportSet::add_module`].
    pub fn with_module(mut self, module: &str) -> Self {
        self.add_module(module);
        self
    }

    /// Merge another set into this one (set-union per module).
    pub fn merge(&mut self, other: &ImportSet) {
        for (module, symbols) in &other.named {
            let entry = self.named.entry(module.clone()).or_default();
            entry.extend(symbols.iter().cloned());
        }
        self.modules.extend(other.modules.iter().cloned());
    }

    /// Check if a module is imported, either whole or by symbol.
    pub fn has_module(&self, module: &str) -> bool {
        self.modules.contains(module) || self.named.contains_key(module)
    }

    /// Check if a specific symbol is imported from a module.
    pub fn has_symbol(&self, module: &str, symbol: &str) -> bool {
        self.named
            .get(module)
            .is_some_and(|symbols| symbols.iter().any(|s| s.name == symbol))
    }

    /// Iterate over named imports in module order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<NamedImport>)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.modules.is_empty()
    }

    /// Number of distinct modules referenced.
    pub fn len(&self) -> usize {
        self.modules
            .iter()
            .chain(self.named.keys())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Render the import statements, ordered by module specifier.
    ///
    /// A module imported both whole and by symbol yields `import m` first.
    pub fn render_lines(&self) -> Vec<String> {
        let specifiers: BTreeSet<&str> = self
            .modules
            .iter()
            .chain(self.named.keys())
            .map(String::as_str)
            .collect();

        let mut lines = Vec::new();
        for module in specifiers {
            if self.modules.contains(module) {
                lines.push(format!("import {module}"));
            }
            if let Some(symbols) = self.named.get(module).filter(|s| !s.is_empty()) {
                let symbols: Vec<String> = symbols.iter().map(NamedImport::render).collect();
                lines.push(format!("from {} import {}", module, symbols.join(", ")));
            }
        }
        lines
    }

    /// Write the import statements at the writer's current depth.
    pub fn render(&self, writer: &mut PoetWriter) {
        for line in self.render_lines() {
            writer.write_indented_line(line);
        }
    }
}

impl Extend<ImportSet> for ImportSet {
    fn extend<T: IntoIterator<Item = ImportSet>>(&mut self, iter: T) {
        for other in iter {
            self.merge(&other);
        }
    }
}
