//! Assembling declarations into one Python module.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use beanpoet_core::GeneratedFile;
use tracing::{debug, trace};

use crate::{
    RenderError, Result,
    builder::{Indent, PoetWriter},
    declaration::{Declaration, PythonPackage},
    imports::ImportSet,
};

/// Options applied to every module of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub indent: Indent,
    /// Comment emitted as the first line of every module (without `# `).
    pub header: Option<String>,
    /// Render the declarations of a module on worker threads.
    pub parallel: bool,
}

/// All declarations of one package, rendered as `<package>/__init__.py`.
///
/// Declarations are emitted sorted by `(sort_key, class_name)`, below one
/// merged import block, so regenerating from the same input is byte-stable.
#[derive(Debug, Clone)]
pub struct PythonModule {
    package: PythonPackage,
    declarations: Vec<Declaration>,
    options: RenderOptions,
}

impl PythonModule {
    pub fn new(package: impl Into<PythonPackage>) -> Self {
        Self {
            package: package.into(),
            declarations: Vec::new(),
            options: RenderOptions::default(),
        }
    }

    pub fn declaration(mut self, declaration: impl Into<Declaration>) -> Self {
        self.declarations.push(declaration.into());
        self
    }

    pub fn push(&mut self, declaration: impl Into<Declaration>) {
        self.declarations.push(declaration.into());
    }

    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn package(&self) -> &PythonPackage {
        &self.package
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Union of every declaration's imports.
    pub fn imports(&self) -> ImportSet {
        let mut imports = ImportSet::new();
        imports.extend(self.declarations.iter().map(Declaration::imports));
        imports
    }

    /// Declarations in emission order.
    fn ordered(&self) -> Result<Vec<&Declaration>> {
        let mut seen = HashSet::with_capacity(self.declarations.len());
        for declaration in &self.declarations {
            if !seen.insert(declaration.class_name()) {
                return Err(RenderError::DuplicateDeclaration {
                    package: self.package.to_string(),
                    class_name: declaration.class_name().to_string(),
                });
            }
        }

        let mut ordered: Vec<&Declaration> = self.declarations.iter().collect();
        ordered.sort_by(|a, b| {
            a.sort_key()
                .cmp(b.sort_key())
                .then_with(|| a.class_name().cmp(b.class_name()))
        });
        Ok(ordered)
    }

    /// Render every declaration, keeping the given order.
    fn render_declarations(&self, ordered: &[&Declaration]) -> Result<Vec<String>> {
        let indent = self.options.indent;
        if !self.options.parallel || ordered.len() < 2 {
            return ordered
                .iter()
                .map(|declaration| declaration.render_to_string(indent))
                .collect();
        }

        std::thread::scope(|scope| {
            let handles: Vec<_> = ordered
                .iter()
                .map(|&declaration| scope.spawn(move || declaration.render_to_string(indent)))
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(rendered) => rendered,
                    Err(payload) => std::panic::resume_unwind(payload),
                })
                .collect()
        })
    }

    /// Render the complete module text.
    pub fn to_source(&self) -> Result<String> {
        let ordered = self.ordered()?;
        debug!(
            package = %self.package,
            declarations = ordered.len(),
            parallel = self.options.parallel,
            "rendering module"
        );
        trace!(
            order = ?ordered.iter().map(|d| d.class_name()).collect::<Vec<_>>(),
            "declaration order"
        );

        let rendered = self.render_declarations(&ordered)?;

        let mut writer = PoetWriter::new(self.options.indent);
        let header = self.options.header.as_deref().map(str::trim);
        if let Some(header) = header.filter(|h| !h.is_empty()) {
            writer.write_indented_line(format!("# {header}")).write_line();
        }

        let imports = self.imports();
        imports.render(&mut writer);
        if !imports.is_empty() && !rendered.is_empty() {
            writer.write_line().write_line();
        }

        for (i, text) in rendered.iter().enumerate() {
            if i > 0 {
                writer.write_line().write_line();
            }
            writer.write_block(text);
        }

        writer.into_text()
    }
}

impl GeneratedFile for PythonModule {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.package.to_path()).join("__init__.py")
    }

    fn render(&self) -> eyre::Result<String> {
        Ok(self.to_source()?)
    }
}
