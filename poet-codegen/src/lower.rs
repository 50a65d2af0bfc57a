//! Lowering `poet.toml` declarations into renderable modules.

use std::collections::BTreeMap;

use beanpoet_core::to_snake_case;
use beanpoet_manifest::{AliasDef, BeanDef, EnumDef, FieldDef, ImportDef, Manifest, PythonConfig};
use tracing::{debug, trace};

use crate::{
    builder::Indent,
    declaration::{
        AliasDeclaration, BeanDeclaration, EnumDeclaration, EnumValue, FieldDescriptor,
        PythonPackage,
    },
    imports::ImportSet,
    module::{PythonModule, RenderOptions},
};

/// Build one module per package, ordered by package name.
pub fn lower(manifest: &Manifest) -> Vec<PythonModule> {
    let options = render_options(&manifest.python);
    let mut modules: BTreeMap<PythonPackage, PythonModule> = BTreeMap::new();

    for bean in &manifest.beans {
        module_for(&mut modules, &bean.package, &options).push(lower_bean(bean));
    }
    for enumeration in &manifest.enums {
        module_for(&mut modules, &enumeration.package, &options).push(lower_enum(enumeration));
    }
    for alias in &manifest.aliases {
        module_for(&mut modules, &alias.package, &options).push(lower_alias(alias));
    }

    debug!(
        modules = modules.len(),
        declarations = manifest.declaration_count(),
        "lowered manifest"
    );
    modules.into_values().collect()
}

fn module_for<'a>(
    modules: &'a mut BTreeMap<PythonPackage, PythonModule>,
    package: &str,
    options: &RenderOptions,
) -> &'a mut PythonModule {
    let package = PythonPackage::new(package);
    modules
        .entry(package.clone())
        .or_insert_with(|| PythonModule::new(package).options(options.clone()))
}

/// Output options from the `[python]` table.
pub fn render_options(config: &PythonConfig) -> RenderOptions {
    RenderOptions {
        indent: Indent::Spaces(config.indent),
        header: config.header.clone(),
        parallel: config.parallel,
    }
}

/// Internal class identifier: the package prefix joined to the definition name.
pub fn class_name(package: &str, name: &str) -> String {
    format!("{}_{}", PythonPackage::new(package).class_prefix(), name)
}

fn lower_bean(bean: &BeanDef) -> BeanDeclaration {
    let class_name = bean
        .class_name
        .clone()
        .unwrap_or_else(|| class_name(&bean.package, &bean.name));
    trace!(class = %class_name, fields = bean.fields.len(), "lowering bean");

    let mut declaration = BeanDeclaration::new(class_name, &bean.name, bean.package.as_str())
        .fields(bean.fields.iter().map(lower_field));
    if let Some(docs) = &bean.docs {
        declaration = declaration.doc(docs);
    }
    if let Some(key) = &bean.sort_key {
        declaration = declaration.sort_key(key);
    }
    declaration
}

fn lower_field(field: &FieldDef) -> FieldDescriptor {
    let mut descriptor = FieldDescriptor::new(
        to_snake_case(&field.name),
        field.wire_name(),
        &field.ty,
        field.declared_type(),
    )
    .with_imports(lower_imports(&field.imports));
    if field.optional {
        descriptor = descriptor.optional();
    }
    if let Some(docs) = &field.docs {
        descriptor = descriptor.doc(docs);
    }
    descriptor
}

fn lower_enum(enumeration: &EnumDef) -> EnumDeclaration {
    let class_name = enumeration
        .class_name
        .clone()
        .unwrap_or_else(|| class_name(&enumeration.package, &enumeration.name));
    trace!(class = %class_name, values = enumeration.values.len(), "lowering enum");

    let values = enumeration.values.iter().map(|v| {
        let value = EnumValue::new(&v.value);
        match &v.docs {
            Some(docs) => value.doc(docs),
            None => value,
        }
    });
    let mut declaration =
        EnumDeclaration::new(class_name, &enumeration.name, enumeration.package.as_str())
            .values(values);
    if let Some(docs) = &enumeration.docs {
        declaration = declaration.doc(docs);
    }
    if let Some(key) = &enumeration.sort_key {
        declaration = declaration.sort_key(key);
    }
    declaration
}

fn lower_alias(alias: &AliasDef) -> AliasDeclaration {
    let class_name = alias
        .class_name
        .clone()
        .unwrap_or_else(|| class_name(&alias.package, &alias.name));
    trace!(class = %class_name, "lowering alias");

    let mut declaration = AliasDeclaration::new(class_name, alias.package.as_str(), &alias.ty)
        .with_imports(lower_imports(&alias.imports));
    if let Some(docs) = &alias.docs {
        declaration = declaration.doc(docs);
    }
    if let Some(key) = &alias.sort_key {
        declaration = declaration.sort_key(key);
    }
    declaration
}

fn lower_imports(imports: &[ImportDef]) -> ImportSet {
    let mut set = ImportSet::new();
    for import in imports {
        if import.names.is_empty() {
            set.add_module(&import.module);
        }
        for name in &import.names {
            set.add(&import.module, name);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::declaration::Declaration;

    const MANIFEST: &str = r#"
[python]
indent = 2
parallel = true

[[beans]]
name = "Address"
package = "my_api.product"

[[beans.fields]]
name = "unitNumber"
type = "OptionalTypeWrapper[str]"
declared-type = "Optional[str]"
optional = true
imports = [{ module = "typing", names = ["Optional"] }]

[[aliases]]
name = "Id"
package = "billing"
type = "str"
class-name = "InvoiceId"

[[enums]]
name = "Color"
package = "my_api.product"
values = [{ value = "RED" }]
"#;

    #[test]
    fn test_groups_by_package() {
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let modules = lower(&manifest);

        let packages: Vec<&str> = modules.iter().map(|m| m.package().as_str()).collect();
        assert_eq!(packages, vec!["billing", "my_api.product"]);
        assert_eq!(modules[1].declarations().len(), 2);
    }

    #[test]
    fn test_field_lowering() {
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let modules = lower(&manifest);

        let Declaration::Bean(bean) = &modules[1].declarations()[0] else {
            panic!("expected a bean");
        };
        assert_eq!(bean.class_name(), "my_api_product_Address");
        assert_eq!(bean.definition_name(), "Address");

        let field = &bean.field_list()[0];
        assert_eq!(field.attribute_name(), "unit_number");
        assert_eq!(field.wire_name(), "unitNumber");
        assert_eq!(field.declared_type_expr(), "Optional[str]");
        assert!(field.is_optional());
        assert!(bean.imports().has_symbol("typing", "Optional"));
    }

    #[test]
    fn test_class_name_override_and_options() {
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let modules = lower(&manifest);

        assert_eq!(modules[0].declarations()[0].class_name(), "InvoiceId");
        let text = modules[1].to_source().unwrap();
        assert!(text.contains("\n  @builtins.classmethod\n"));
    }

    #[test]
    fn test_whole_module_imports() {
        let imports = lower_imports(&[ImportDef {
            module: "datetime".into(),
            names: vec![],
        }]);
        assert_eq!(imports.render_lines(), vec!["import datetime"]);
    }

    #[test]
    fn test_class_name() {
        assert_eq!(class_name("product", "Address"), "product_Address");
        assert_eq!(class_name("my_api.product", "Address"), "my_api_product_Address");
    }
}
