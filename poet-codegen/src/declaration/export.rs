//! Binding an internal class identifier to its public definition name.

use super::PythonPackage;
use crate::builder::{PoetWriter, literal::double_quoted_literal};

/// Rename `class_name` so introspection and pickling report the IDL name.
///
/// The generated class keeps its package-prefixed identifier inside the
/// module while `__name__`, `__qualname__` and `__module__` point at the
/// namespaced definition.
pub fn rename_class(
    writer: &mut PoetWriter,
    class_name: &str,
    package: &PythonPackage,
    definition_name: &str,
) {
    let name = double_quoted_literal(definition_name);
    writer
        .write_indented_line(format!("{class_name}.__name__ = {name}"))
        .write_indented_line(format!("{class_name}.__qualname__ = {name}"))
        .write_indented_line(format!(
            "{class_name}.__module__ = {}",
            double_quoted_literal(package.as_str())
        ));
}
