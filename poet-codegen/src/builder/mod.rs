//! Code emission building blocks.
//!
//! - [`PoetWriter`] - append-only line writer with depth tracking
//! - [`Indent`] - indentation configuration
//! - [`literal`] - Python string and docstring escaping

mod indent;
pub mod literal;
mod writer;

pub use indent::Indent;
pub use writer::PoetWriter;
