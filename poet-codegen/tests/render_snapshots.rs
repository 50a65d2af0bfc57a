//! Snapshot tests for rendered Python modules.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::str::FromStr;

use beanpoet_codegen::lower;
use beanpoet_manifest::Manifest;

/// Lower a manifest and render the module of `package`.
fn render_package(manifest_toml: &str, package: &str) -> String {
    let manifest = Manifest::from_str(manifest_toml).expect("Failed to parse manifest");
    let module = lower(&manifest)
        .into_iter()
        .find(|m| m.package().as_str() == package)
        .expect("Package not found");
    module.to_source().expect("Render failed")
}

#[test]
fn test_product_module() {
    let source = render_package(
        r#"
        [python]
        header = "coding=utf-8"

        [[beans]]
        name = "Address"
        package = "product"
        docs = "A postal address."

        [[beans.fields]]
        name = "street"
        type = "str"
        docs = "First line of the address."

        [[beans.fields]]
        name = "unitNumber"
        type = "OptionalTypeWrapper[str]"
        declared-type = "Optional[str]"
        optional = true
        imports = [
            { module = "typing", names = ["Optional"] },
            { module = "conjure_python_client", names = ["OptionalTypeWrapper"] },
        ]

        [[beans.fields]]
        name = "fields"
        type = "List[str]"

        [[enums]]
        name = "Color"
        package = "product"
        values = [{ value = "RED" }, { value = "BLUE", docs = "Blue." }]

        [[aliases]]
        name = "UserId"
        package = "product"
        type = "str"
        docs = "Opaque user identifier."
        "#,
        "product",
    );

    insta::assert_snapshot!("product_module", source);
}

#[test]
fn test_keywords_and_sort_keys() {
    let source = render_package(
        r#"
        [[beans]]
        name = "Route"
        package = "travel"

        [[beans.fields]]
        name = "from"
        type = "str"

        [[beans.fields]]
        name = "to"
        type = "str"

        [[beans.fields]]
        name = "via"
        type = "OptionalTypeWrapper[List[str]]"
        declared-type = "Optional[List[str]]"
        optional = true
        imports = [
            { module = "typing", names = ["Optional"] },
            { module = "conjure_python_client", names = ["OptionalTypeWrapper"] },
        ]

        [[beans]]
        name = "Empty"
        package = "travel"
        sort-key = "zzz"

        [[enums]]
        name = "Mode"
        package = "travel"
        docs = "How to get there."
        values = [{ value = "None" }, { value = "UNKNOWN", docs = "Unrecognized mode." }]
        "#,
        "travel",
    );

    insta::assert_snapshot!("keywords_and_sort_keys", source);
}
