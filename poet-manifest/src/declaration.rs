//! Resolved declaration tables: `[[beans]]`, `[[enums]]` and `[[aliases]]`.
//!
//! Type expressions are target-language text, already resolved from the
//! interface definition, and are passed through verbatim.

use serde::Deserialize;

/// A record type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BeanDef {
    /// Definition name (e.g. "Address")
    pub name: String,
    /// Dotted Python package (e.g. "my_api.product")
    pub package: String,
    #[serde(default)]
    pub docs: Option<String>,
    /// Overrides the generated class identifier
    #[serde(default)]
    pub class_name: Option<String>,
    /// Overrides the ordering key within the module
    #[serde(default)]
    pub sort_key: Option<String>,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// One record field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FieldDef {
    pub name: String,
    /// Serialized name, defaults to `name`
    #[serde(default)]
    pub wire: Option<String>,
    /// Runtime type expression stored in the field registry
    #[serde(rename = "type")]
    pub ty: String,
    /// Annotation used in signatures, defaults to `type`
    #[serde(default)]
    pub declared_type: Option<String>,
    #[serde(default)]
    pub docs: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub imports: Vec<ImportDef>,
}

impl FieldDef {
    pub fn wire_name(&self) -> &str {
        self.wire.as_deref().unwrap_or(&self.name)
    }

    pub fn declared_type(&self) -> &str {
        self.declared_type.as_deref().unwrap_or(&self.ty)
    }
}

/// An import needed by a type expression.
///
/// Without `names` the whole module is imported (`import module`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportDef {
    pub module: String,
    #[serde(default)]
    pub names: Vec<String>,
}

/// A string enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EnumDef {
    pub name: String,
    pub package: String,
    #[serde(default)]
    pub docs: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub sort_key: Option<String>,
    #[serde(default)]
    pub values: Vec<EnumValueDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumValueDef {
    pub value: String,
    #[serde(default)]
    pub docs: Option<String>,
}

/// A named type expression.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AliasDef {
    pub name: String,
    pub package: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub docs: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub sort_key: Option<String>,
    #[serde(default)]
    pub imports: Vec<ImportDef>,
}
