//! Emittable declarations.
//!
//! - [`BeanDeclaration`] - record types with named, immutable fields
//! - [`EnumDeclaration`] - string enumerations
//! - [`AliasDeclaration`] - module-level type aliases
//!
//! [`Declaration`] is the closed set of variants a module can hold.

mod alias;
mod bean;
mod enums;
mod export;
mod field;
mod package;

pub use alias::AliasDeclaration;
pub use bean::{BeanDeclaration, FIELDS_ACCESSOR, PROTECTED_FIELDS};
pub use enums::{EnumDeclaration, EnumValue, UNKNOWN_VALUE};
pub use export::rename_class;
pub use field::FieldDescriptor;
pub use package::PythonPackage;

use crate::{
    RenderError, Result,
    builder::{Indent, PoetWriter},
    imports::ImportSet,
};

/// Anything that can render itself into a [`PoetWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Bean(BeanDeclaration),
    Enum(EnumDeclaration),
    Alias(AliasDeclaration),
}

impl Declaration {
    /// The identifier the declaration is rendered under.
    pub fn class_name(&self) -> &str {
        match self {
            Self::Bean(bean) => bean.class_name(),
            Self::Enum(enumeration) => enumeration.class_name(),
            Self::Alias(alias) => alias.class_name(),
        }
    }

    /// Key used to order declarations within a module.
    pub fn sort_key(&self) -> &str {
        match self {
            Self::Bean(bean) => bean.key(),
            Self::Enum(enumeration) => enumeration.key(),
            Self::Alias(alias) => alias.key(),
        }
    }

    pub fn package(&self) -> &PythonPackage {
        match self {
            Self::Bean(bean) => bean.package(),
            Self::Enum(enumeration) => enumeration.package(),
            Self::Alias(alias) => alias.package(),
        }
    }

    /// Imports the rendered text depends on.
    pub fn imports(&self) -> ImportSet {
        match self {
            Self::Bean(bean) => bean.imports(),
            Self::Enum(enumeration) => enumeration.imports(),
            Self::Alias(alias) => alias.imports(),
        }
    }

    /// Render into `writer`, leaving its depth where it was.
    pub fn render(&self, writer: &mut PoetWriter) -> Result<()> {
        let depth = writer.depth();
        match self {
            Self::Bean(bean) => bean.render(writer)?,
            Self::Enum(enumeration) => enumeration.render(writer)?,
            Self::Alias(alias) => alias.render(writer)?,
        }
        if writer.depth() != depth {
            return Err(RenderError::UnbalancedIndent {
                depth: writer.depth(),
            });
        }
        Ok(())
    }

    /// Render into a fresh writer and capture its text.
    pub fn render_to_string(&self, indent: Indent) -> Result<String> {
        let mut writer = PoetWriter::new(indent);
        self.render(&mut writer)?;
        writer.into_text()
    }
}

impl From<BeanDeclaration> for Declaration {
    fn from(bean: BeanDeclaration) -> Self {
        Self::Bean(bean)
    }
}

impl From<EnumDeclaration> for Declaration {
    fn from(enumeration: EnumDeclaration) -> Self {
        Self::Enum(enumeration)
    }
}

impl From<AliasDeclaration> for Declaration {
    fn from(alias: AliasDeclaration) -> Self {
        Self::Alias(alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let declarations: Vec<Declaration> = vec![
            BeanDeclaration::new("product_Address", "Address", "product").into(),
            EnumDeclaration::new("product_Color", "Color", "product").into(),
            AliasDeclaration::new("product_UserId", "product", "str")
                .sort_key("0")
                .into(),
        ];

        let keys: Vec<&str> = declarations.iter().map(Declaration::sort_key).collect();
        assert_eq!(keys, vec!["product_Address", "product_Color", "0"]);
        assert!(declarations[0].imports().has_symbol("conjure_python_client", "ConjureBeanType"));
        assert!(declarations[1].imports().has_symbol("conjure_python_client", "ConjureEnumType"));
        assert!(declarations[2].imports().is_empty());
    }

    #[test]
    fn test_render_keeps_starting_depth() {
        let declaration: Declaration =
            BeanDeclaration::new("product_Empty", "Empty", "product").into();
        let mut writer = PoetWriter::python();
        writer.increase_indent();
        declaration.render(&mut writer).unwrap();
        assert_eq!(writer.depth(), 1);
        assert_eq!(writer.lines()[0], "    class product_Empty(ConjureBeanType):");
    }

    #[test]
    fn test_render_to_string_with_tabs() {
        let declaration: Declaration =
            BeanDeclaration::new("product_Empty", "Empty", "product").into();
        let text = declaration.render_to_string(Indent::Tab).unwrap();
        assert!(text.contains("\n\t__slots__: List[str] = []\n"));
    }
}
