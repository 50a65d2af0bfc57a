//! Core utilities for the beanpoet Python code generator.
//!
//! This crate provides the small, language-independent pieces shared by the
//! rest of the workspace: identifier case conversion and writing generated
//! files to disk.

mod file;
mod utils;

// File operations
pub use file::{File, GeneratedFile, WriteResult};
// String utilities
pub use utils::to_snake_case;
