//! Structured Python code emission for beanpoet.
//!
//! This crate turns resolved declarations into Python source text:
//!
//! - [`builder`] - indent-tracking writer and literal escaping
//! - [`naming`] - keyword-safe identifiers
//! - [`imports`] - deterministic import blocks
//! - [`declaration`] - record, enum and alias renderers
//! - [`module`] - one `__init__.py` per package
//! - [`lower`] - `poet.toml` declarations to modules
//!
//! # Example
//!
//! ```
//! use beanpoet_codegen::declaration::{BeanDeclaration, FieldDescriptor};
//! use beanpoet_codegen::module::PythonModule;
//!
//! let address = BeanDeclaration::new("product_Address", "Address", "product")
//!     .field(FieldDescriptor::new("street", "street", "str", "str"));
//! let source = PythonModule::new("product").declaration(address).to_source().unwrap();
//!
//! assert!(source.contains("class product_Address(ConjureBeanType):"));
//! assert!(source.contains("'street': ConjureFieldDefinition('street', str)"));
//! ```

pub mod builder;
pub mod declaration;
mod error;
pub mod imports;
pub mod lower;
pub mod module;
pub mod naming;

pub use error::{RenderError, Result};
pub use lower::lower;
pub use module::{PythonModule, RenderOptions};
