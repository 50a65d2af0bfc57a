use std::{path::Path, str::FromStr};

use serde::Deserialize;

use crate::{
    AliasDef, BeanDef, EnumDef, Error, PythonConfig, Result, error::SourceContext,
    validate::validate_manifest,
};

/// Root manifest for poet.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Output options
    #[serde(default)]
    pub python: PythonConfig,

    #[serde(default)]
    pub beans: Vec<BeanDef>,

    #[serde(default)]
    pub enums: Vec<EnumDef>,

    #[serde(default)]
    pub aliases: Vec<AliasDef>,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "poet.toml")
    }
}

impl Manifest {
    /// Parse a poet.toml file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a poet.toml from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let manifest: Self = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        validate_manifest(&manifest, &ctx)?;
        Ok(manifest)
    }

    /// `(kind, name, package)` of every declaration, beans first.
    pub fn declarations(&self) -> impl Iterator<Item = (&'static str, &str, &str)> {
        let beans = self
            .beans
            .iter()
            .map(|b| ("bean", b.name.as_str(), b.package.as_str()));
        let enums = self
            .enums
            .iter()
            .map(|e| ("enum", e.name.as_str(), e.package.as_str()));
        let aliases = self
            .aliases
            .iter()
            .map(|a| ("alias", a.name.as_str(), a.package.as_str()));
        beans.chain(enums).chain(aliases)
    }

    /// Total number of declarations.
    pub fn declaration_count(&self) -> usize {
        self.beans.len() + self.enums.len() + self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declaration_count() == 0
    }
}
