//! Parsing and validation of `poet.toml`.
//!
//! The manifest lists resolved declarations (records, enums and aliases)
//! together with the Python output options. Errors carry the manifest
//! source so they render with labelled spans through [`miette`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod declaration;
mod error;
mod manifest;
mod python;
mod validate;

pub use declaration::{AliasDef, BeanDef, EnumDef, EnumValueDef, FieldDef, ImportDef};
pub use error::{Error, Result, SourceContext};
pub use manifest::Manifest;
pub use python::PythonConfig;
