//! Record ("bean") declarations.

use indexmap::IndexMap;

use super::{FieldDescriptor, PythonPackage, export::rename_class};
use crate::{
    RenderError, Result,
    builder::{PoetWriter, literal::string_literal},
    error::require,
    imports::ImportSet,
    naming::sanitize_with,
};

/// Name of the class-level field registry accessor.
pub const FIELDS_ACCESSOR: &str = "_fields";

/// Names that backing slots must avoid.
///
/// A slot is `_` + name, so a field called `fields` would otherwise shadow
/// the `_fields` registry accessor.
pub const PROTECTED_FIELDS: &[&str] = &["fields"];

/// A record type with named, typed and immutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanDeclaration {
    class_name: String,
    definition_name: String,
    package: PythonPackage,
    docs: Option<String>,
    fields: Vec<FieldDescriptor>,
    sort_key: Option<String>,
}

/// A field together with the identifiers it renders as.
struct ResolvedField<'a> {
    field: &'a FieldDescriptor,
    name: String,
    slot: String,
}

impl BeanDeclaration {
    /// Create a new bean with no fields.
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
            fields: Vec::new(),
            sort_key: None,
        }
    }

    /// Set documentation.
    pub fn doc(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    /// Add a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Add multiple fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Override the key used to order declarations within a module.
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

    /// Fields in declared order.
    pub fn field_list(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Ordering key, the class name unless overridden.
    pub fn key(&self) -> &str {
        self.sort_key.as_deref().unwrap_or(&self.class_name)
    }

    /// Imports every bean needs regardless of its fields.
    pub fn default_imports() -> ImportSet {
        ImportSet::new()
            .with(
                "conjure_python_client",
                &["ConjureBeanType", "ConjureFieldDefinition"],
            )
            .with_module("builtins")
            .with("typing", &["Dict", "List"])
    }

    /// Baseline imports merged with every field's contributions.
    pub fn imports(&self) -> ImportSet {
        let mut imports = Self::default_imports();
        for field in &self.fields {
            imports.merge(field.imports());
        }
        imports
    }

    /// Check required values and compute each field's identifiers.
    ///
    /// Fails when a field's public name would replace the registry accessor,
    /// or when two fields end up with the same public name or the same
    /// backing slot after sanitization.
    fn resolve(&self) -> Result<Vec<ResolvedField<'_>>> {
        let declaration = self.class_name.as_str();
        require(declaration, "<unnamed bean>", "class name")?;
        require(&self.definition_name, declaration, "definition name")?;
        require(self.package.as_str(), declaration, "package")?;

        let mut names: IndexMap<String, &str> = IndexMap::new();
        let mut slots: IndexMap<String, &str> = IndexMap::new();
        let mut resolved = Vec::with_capacity(self.fields.len());

        for (index, field) in self.fields.iter().enumerate() {
            let attribute = field.attribute_name();
            require(attribute, declaration, &format!("attribute name of field #{index}"))?;
            require(field.wire_name(), declaration, &format!("wire name of field '{attribute}'"))?;
            require(field.type_expr(), declaration, &format!("type of field '{attribute}'"))?;
            require(
                field.declared_type_expr(),
                declaration,
                &format!("declared type of field '{attribute}'"),
            )?;

            let name = field.public_name();
            if name == FIELDS_ACCESSOR {
                return Err(RenderError::ReservedAttribute {
                    declaration: declaration.to_string(),
                    field: attribute.to_string(),
                    name,
                });
            }
            if let Some(first) = names.get(&name) {
                return Err(RenderError::DuplicateAttribute {
                    declaration: declaration.to_string(),
                    field: attribute.to_string(),
                    conflicts_with: first.to_string(),
                    name,
                });
            }

            let slot = format!("_{}", sanitize_with(attribute, PROTECTED_FIELDS));
            if let Some(first) = slots.get(&slot) {
                return Err(RenderError::DuplicateSlot {
                    declaration: declaration.to_string(),
                    field: attribute.to_string(),
                    conflicts_with: first.to_string(),
                    slot,
                });
            }

            names.insert(name.clone(), attribute);
            slots.insert(slot.clone(), attribute);
            resolved.push(ResolvedField { field, name, slot });
        }

        Ok(resolved)
    }

    /// Check the declaration without rendering it.
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    /// Render the class followed by its export aliasing lines.
    pub fn render(&self, writer: &mut PoetWriter) -> Result<()> {
        let fields = self.resolve()?;

        writer.write_indented_line(format!("class {}(ConjureBeanType):", self.class_name));
        writer.indented(|w| {
            if let Some(docs) = self.docs() {
                w.write_docstring(docs);
            }

            w.write_line();
            render_registry(w, &fields)?;

            w.write_line();
            render_slots(w, &fields);

            if !fields.is_empty() {
                w.write_line();
                render_constructor(w, &fields)?;
            }

            for resolved in &fields {
                w.write_line();
                render_property(w, resolved)?;
            }
            Ok(())
        })?;

        writer.write_line();
        rename_class(writer, &self.class_name, &self.package, &self.definition_name);
        Ok(())
    }
}

/// Field registry consumed by the serialization runtime, in declared order.
fn render_registry(w: &mut PoetWriter, fields: &[ResolvedField<'_>]) -> Result<()> {
    w.write_indented_line("@builtins.classmethod");
    w.write_indented_line(format!(
        "def {FIELDS_ACCESSOR}(cls) -> Dict[str, ConjureFieldDefinition]:"
    ));
    w.indented(|w| {
        if fields.is_empty() {
            w.write_indented_line("return {}");
            return Ok(());
        }
        w.write_indented_line("return {");
        w.indented(|w| {
            let last = fields.len() - 1;
            for (i, resolved) in fields.iter().enumerate() {
                w.write_indented_line(format!(
                    "{}: ConjureFieldDefinition({}, {}){}",
                    string_literal(&resolved.name),
                    string_literal(resolved.field.wire_name()),
                    resolved.field.type_expr(),
                    if i == last { "" } else { "," }
                ));
            }
            Ok(())
        })?;
        w.write_indented_line("}");
        Ok(())
    })
}

fn render_slots(w: &mut PoetWriter, fields: &[ResolvedField<'_>]) {
    let slots: Vec<String> = fields.iter().map(|f| string_literal(&f.slot)).collect();
    w.write_indented_line(format!("__slots__: List[str] = [{}]", slots.join(", ")));
}

/// Constructor taking required fields before optional ones.
fn render_constructor(w: &mut PoetWriter, fields: &[ResolvedField<'_>]) -> Result<()> {
    let mut params: Vec<&ResolvedField<'_>> = fields.iter().collect();
    params.sort_by(|a, b| FieldDescriptor::signature_cmp(a.field, b.field));

    let params: Vec<String> = params
        .into_iter()
        .map(|resolved| {
            let param = format!("{}: {}", resolved.name, resolved.field.declared_type_expr());
            if resolved.field.is_optional() {
                format!("{param} = None")
            } else {
                param
            }
        })
        .collect();

    w.write_indented_line(format!("def __init__(self, {}) -> None:", params.join(", ")));
    w.indented(|w| {
        for resolved in fields {
            w.write_indented_line(format!("self.{} = {}", resolved.slot, resolved.name));
        }
        Ok(())
    })
}

/// Read-only accessor; records have no setters.
fn render_property(w: &mut PoetWriter, resolved: &ResolvedField<'_>) -> Result<()> {
    w.write_indented_line("@builtins.property");
    w.write_indented_line(format!(
        "def {}(self) -> {}:",
        resolved.name,
        resolved.field.declared_type_expr()
    ));
    w.indented(|w| {
        if let Some(docs) = resolved.field.docs() {
            w.write_docstring(docs);
        }
        w.write_indented_line(format!("return self.{}", resolved.slot));
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn street() -> FieldDescriptor {
        FieldDescriptor::new("street", "street", "str", "str")
    }

    fn unit() -> FieldDescriptor {
        FieldDescriptor::new("unit", "unit", "OptionalTypeWrapper[str]", "Optional[str]").optional()
    }

    fn render(bean: &BeanDeclaration) -> String {
        let mut writer = PoetWriter::python();
        bean.render(&mut writer).unwrap();
        writer.into_text().unwrap()
    }

    fn line_index(text: &str, needle: &str) -> usize {
        text.lines()
            .position(|l| l.contains(needle))
            .unwrap_or_else(|| panic!("'{needle}' not found in:\n{text}"))
    }

    #[test]
    fn test_render_address() {
        let bean = BeanDeclaration::new("product_Address", "Address", "product")
            .field(street())
            .field(unit());

        let expected = "\
class product_Address(ConjureBeanType):

    @builtins.classmethod
    def _fields(cls) -> Dict[str, ConjureFieldDefinition]:
        return {
            'street': ConjureFieldDefinition('street', str),
            'unit': ConjureFieldDefinition('unit', OptionalTypeWrapper[str])
        }

    __slots__: List[str] = ['_street', '_unit']

    def __init__(self, street: str, unit: Optional[str] = None) -> None:
        self._street = street
        self._unit = unit

    @builtins.property
    def street(self) -> str:
        return self._street

    @builtins.property
    def unit(self) -> Optional[str]:
        return self._unit

product_Address.__name__ = \"Address\"
product_Address.__qualname__ = \"Address\"
product_Address.__module__ = \"product\"
";
        assert_eq!(render(&bean), expected);
    }

    #[test]
    fn test_registry_and_signature_orders_diverge() {
        let bean = BeanDeclaration::new("product_Address", "Address", "product")
            .field(unit())
            .field(street());
        let text = render(&bean);

        assert!(line_index(&text, "'unit': ConjureFieldDefinition") < line_index(&text, "'street': ConjureFieldDefinition"));
        assert!(text.contains("def __init__(self, street: str, unit: Optional[str] = None) -> None:"));
        assert!(line_index(&text, "self._unit = unit") < line_index(&text, "self._street = street"));
        assert!(text.contains("__slots__: List[str] = ['_unit', '_street']"));
    }

    #[test]
    fn test_empty_bean() {
        let text = render(&BeanDeclaration::new("product_Empty", "Empty", "product"));
        let expected = "\
class product_Empty(ConjureBeanType):

    @builtins.classmethod
    def _fields(cls) -> Dict[str, ConjureFieldDefinition]:
        return {}

    __slots__: List[str] = []

product_Empty.__name__ = \"Empty\"
product_Empty.__qualname__ = \"Empty\"
product_Empty.__module__ = \"product\"
";
        assert_eq!(text, expected);
        assert!(!text.contains("__init__"));
    }

    #[test]
    fn test_docs_are_rendered_as_docstrings() {
        let bean = BeanDeclaration::new("product_Address", "Address", "product")
            .doc("  A postal address.\nUsed for shipping.  ")
            .field(street().doc("The street line."));
        let text = render(&bean);

        assert!(text.starts_with(
            "class product_Address(ConjureBeanType):\n    \"\"\"\n    A postal address.\n    Used for shipping.\n    \"\"\"\n\n    @builtins.classmethod\n"
        ));
        assert!(text.contains(
            "    def street(self) -> str:\n        \"\"\"\n        The street line.\n        \"\"\"\n        return self._street\n"
        ));
    }

    #[test]
    fn test_field_named_like_registry_gets_distinct_slot() {
        let bean = BeanDeclaration::new("product_Meta", "Meta", "product")
            .field(FieldDescriptor::new("fields", "fields", "List[str]", "List[str]"))
            .field(street());
        let text = render(&bean);

        assert!(text.contains("__slots__: List[str] = ['_fields_', '_street']"));
        assert!(text.contains("'fields': ConjureFieldDefinition('fields', List[str]),"));
        assert!(text.contains("self._fields_ = fields"));
        assert!(text.contains("def fields(self) -> List[str]:"));
        assert!(text.contains("return self._fields_"));
        assert!(text.contains("def _fields(cls)"));
    }

    #[test]
    fn test_field_named_like_registry_accessor_is_rejected() {
        let bean = BeanDeclaration::new("product_Meta", "Meta", "product")
            .field(FieldDescriptor::new("_fields", "_fields", "str", "str"))
            .field(street());

        let mut writer = PoetWriter::python();
        let err = bean.render(&mut writer).unwrap_err();
        assert_eq!(
            err,
            RenderError::ReservedAttribute {
                declaration: "product_Meta".into(),
                field: "_fields".into(),
                name: FIELDS_ACCESSOR.into(),
            }
        );
        assert!(writer.lines().is_empty());
    }

    #[test]
    fn test_keyword_fields_are_sanitized() {
        let bean = BeanDeclaration::new("product_Route", "Route", "product")
            .field(FieldDescriptor::new("from", "from", "str", "str"));
        let text = render(&bean);

        assert!(text.contains("'from_': ConjureFieldDefinition('from', str)"));
        assert!(text.contains("def __init__(self, from_: str) -> None:"));
        assert!(text.contains("self._from_ = from_"));
    }

    #[test]
    fn test_slot_collision_is_rejected() {
        let bean = BeanDeclaration::new("product_Meta", "Meta", "product")
            .field(FieldDescriptor::new("fields", "fields", "str", "str"))
            .field(FieldDescriptor::new("fields_", "fields_", "str", "str"));

        let mut writer = PoetWriter::python();
        let err = bean.render(&mut writer).unwrap_err();
        assert_eq!(
            err,
            RenderError::DuplicateSlot {
                declaration: "product_Meta".into(),
                field: "fields_".into(),
                conflicts_with: "fields".into(),
                slot: "_fields_".into(),
            }
        );
        assert!(writer.lines().is_empty());
    }

    #[test]
    fn test_public_name_collision_is_rejected() {
        let bean = BeanDeclaration::new("product_Route", "Route", "product")
            .field(FieldDescriptor::new("class", "class", "str", "str"))
            .field(FieldDescriptor::new("class_", "class_", "str", "str"));

        assert!(matches!(
            bean.validate(),
            Err(RenderError::DuplicateAttribute { ref name, .. }) if name == "class_"
        ));
    }

    #[test]
    fn test_missing_values_are_rejected() {
        let unnamed = BeanDeclaration::new("", "Address", "product");
        assert!(matches!(unnamed.validate(), Err(RenderError::MissingValue { .. })));

        let untyped = BeanDeclaration::new("product_Address", "Address", "product")
            .field(FieldDescriptor::new("street", "street", "", "str"));
        assert_eq!(
            untyped.validate(),
            Err(RenderError::missing("product_Address", "type of field 'street'"))
        );
    }

    #[test]
    fn test_imports_merge_field_contributions() {
        let bean = BeanDeclaration::new("product_Address", "Address", "product").field(
            unit().with_imports(
                ImportSet::new()
                    .with("typing", &["Optional"])
                    .with("conjure_python_client", &["OptionalTypeWrapper"]),
            ),
        );

        assert_eq!(
            bean.imports().render_lines(),
            vec![
                "import builtins",
                "from conjure_python_client import ConjureBeanType, ConjureFieldDefinition, OptionalTypeWrapper",
                "from typing import Dict, List, Optional",
            ]
        );
    }

    #[test]
    fn test_sort_key_defaults_to_class_name() {
        let bean = BeanDeclaration::new("product_Address", "Address", "product");
        assert_eq!(bean.key(), "product_Address");
        assert_eq!(bean.sort_key("0").key(), "0");
    }
}
