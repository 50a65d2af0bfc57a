use std::cmp::Ordering;

use crate::{imports::ImportSet, naming::sanitize};

/// One member of a record declaration.
///
/// `type_expr` is the runtime type expression stored in the field registry,
/// while `declared_type_expr` is the annotation used in signatures; the two
/// differ for wrapped types such as optionals (`OptionalTypeWrapper[str]`
/// versus `Optional[str]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    attribute_name: String,
    wire_name: String,
    type_expr: String,
    declared_type_expr: String,
    docs: Option<String>,
    optional: bool,
    imports: ImportSet,
}

impl FieldDescriptor {
    /// Create a new required field.
    pub fn new(
        attribute_name: impl Into<String>,
        wire_name: impl Into<String>,
        type_expr: impl Into<String>,
        declared_type_expr: impl Into<String>,
    ) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            wire_name: wire_name.into(),
            type_expr: type_expr.into(),
            declared_type_expr: declared_type_expr.into(),
            docs: None,
            optional: false,
            imports: ImportSet::new(),
        }
    }

    /// Set documentation.
    pub fn doc(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    /// Mark this field as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Imports needed to reference this field's type expressions.
    pub fn with_imports(mut self, imports: ImportSet) -> Self {
        self.imports.merge(&imports);
        self
    }

    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    pub fn type_expr(&self) -> &str {
        &self.type_expr
    }

    pub fn declared_type_expr(&self) -> &str {
        &self.declared_type_expr
    }

    /// Documentation, if present and not blank.
    pub fn docs(&self) -> Option<&str> {
        self.docs.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn imports(&self) -> &ImportSet {
        &self.imports
    }

    /// The identifier used for the parameter, property and registry key.
    pub fn public_name(&self) -> String {
        sanitize(&self.attribute_name)
    }

    /// Order fields for a constructor signature.
    ///
    /// Required fields come first and optional fields last; within each group
    /// the declared order is kept (the sort is stable).
    pub fn signature_order(fields: &[FieldDescriptor]) -> Vec<&FieldDescriptor> {
        let mut ordered: Vec<&FieldDescriptor> = fields.iter().collect();
        ordered.sort_by(|a, b| Self::signature_cmp(a, b));
        ordered
    }

    /// Comparator behind [`FieldDescriptor::signature_order`]: required before optional.
    pub fn signature_cmp(a: &FieldDescriptor, b: &FieldDescriptor) -> Ordering {
        a.is_optional().cmp(&b.is_optional())
    }
}
