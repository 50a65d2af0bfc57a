//! Indent-tracking line writer for generated Python source.

use super::{Indent, literal::escape_docstring};
use crate::{RenderError, Result};

/// Append-only line sink that tracks the current nesting depth.
///
/// Lines are stored without their trailing newline and are never removed or
/// reordered once written. Indentation must be balanced by the time the text
/// is captured with [`PoetWriter::finish`] or [`PoetWriter::into_text`].
///
/// # Example
///
/// ```
/// use beanpoet_codegen::builder::PoetWriter;
///
/// let mut writer = PoetWriter::python();
/// writer
///     .write_indented_line("def greet() -> None:")
///     .increase_indent()
///     .write_indented_line("print('hi')")
///     .decrease_indent();
///
/// assert_eq!(writer.into_text().unwrap(), "def greet() -> None:\n    print('hi')\n");
/// ```
#[derive(Debug, Clone)]
pub struct PoetWriter {
    unit: String,
    lines: Vec<String>,
    depth: usize,
    underflowed: bool,
}

impl PoetWriter {
    /// Create a new writer with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            unit: indent.unit(),
            lines: Vec::new(),
            depth: 0,
            underflowed: false,
        }
    }

    /// Create a new writer with 4-space indentation.
    pub fn python() -> Self {
        Self::new(Indent::PYTHON)
    }

    /// Append an empty line, ignoring the current depth.
    pub fn write_line(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Append `text` prefixed by the current indentation.
    ///
    /// `text` is one physical line; multi-line content goes through
    /// [`PoetWriter::write_block`]. Empty text produces an empty line without
    /// trailing whitespace.
    pub fn write_indented_line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if text.is_empty() {
            return self.write_line();
        }
        let mut line = self.unit.repeat(self.depth);
        line.push_str(text);
        self.lines.push(line);
        self
    }

    /// Increase indentation by one level.
    pub fn increase_indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    /// Decrease indentation by one level.
    ///
    /// Decreasing at depth zero clamps to zero and marks the writer, so the
    /// violation is reported when the text is captured.
    pub fn decrease_indent(&mut self) -> &mut Self {
        match self.depth.checked_sub(1) {
            Some(depth) => self.depth = depth,
            None => self.underflowed = true,
        }
        self
    }

    /// Run `f` one level deeper, restoring the depth afterwards.
    pub fn indented<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.increase_indent();
        let result = f(self);
        self.decrease_indent();
        result
    }

    /// Write each line of `text` at the current depth.
    pub fn write_block(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.write_indented_line(line.trim_end());
        }
        self
    }

    /// Write a `"""` delimited docstring block.
    ///
    /// The documentation is trimmed and escaped, and every physical line is
    /// written separately so continuation lines keep the block's indentation.
    pub fn write_docstring(&mut self, docs: &str) -> &mut Self {
        self.write_indented_line("\"\"\"");
        self.write_block(&escape_docstring(docs.trim()));
        self.write_indented_line("\"\"\"")
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Lines written so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Check that every increase was matched by a decrease.
    pub fn check_balanced(&self) -> Result<()> {
        if self.underflowed {
            return Err(RenderError::IndentUnderflow);
        }
        if self.depth != 0 {
            return Err(RenderError::UnbalancedIndent { depth: self.depth });
        }
        Ok(())
    }

    /// Consume the writer and return its lines.
    pub fn finish(self) -> Result<Vec<String>> {
        self.check_balanced()?;
        Ok(self.lines)
    }

    /// Consume the writer and return its text, one `\n` after every line.
    pub fn into_text(self) -> Result<String> {
        let lines = self.finish()?;
        let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in lines {
            text.push_str(&line);
            text.push('\n');
        }
        Ok(text)
    }
}

impl Default for PoetWriter {
    fn default() -> Self {
        Self::python()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut writer = PoetWriter::python();
        writer.write_indented_line("x = 1");
        assert_eq!(writer.into_text().unwrap(), "x = 1\n");
    }

    #[test]
    fn test_indentation() {
        let mut writer = PoetWriter::python();
        writer
            .write_indented_line("class Foo:")
            .increase_indent()
            .write_indented_line("def bar(self) -> None:")
            .increase_indent()
            .write_indented_line("pass")
            .decrease_indent()
            .decrease_indent();

        assert_eq!(
            writer.into_text().unwrap(),
            "class Foo:\n    def bar(self) -> None:\n        pass\n"
        );
    }

    #[test]
    fn test_write_line_ignores_depth() {
        let mut writer = PoetWriter::python();
        writer
            .increase_indent()
            .write_line()
            .write_indented_line("")
            .decrease_indent();
        assert_eq!(writer.lines(), &["".to_string(), "".to_string()]);
    }

    #[test]
    fn test_tab_indent() {
        let mut writer = PoetWriter::new(Indent::Tab);
        writer
            .increase_indent()
            .write_indented_line("pass")
            .decrease_indent();
        assert_eq!(writer.into_text().unwrap(), "\tpass\n");
    }

    #[test]
    fn test_indented_restores_depth() {
        let mut writer = PoetWriter::python();
        writer
            .indented(|w| {
                w.write_indented_line("inner");
                Ok(())
            })
            .unwrap();
        assert_eq!(writer.depth(), 0);
        assert_eq!(writer.into_text().unwrap(), "    inner\n");
    }

    #[test]
    fn test_indented_restores_depth_on_error() {
        let mut writer = PoetWriter::python();
        let result = writer.indented(|_| Err(RenderError::missing("Foo", "name")));
        assert!(result.is_err());
        assert_eq!(writer.depth(), 0);
    }

    #[test]
    fn test_unbalanced_is_reported() {
        let mut writer = PoetWriter::python();
        writer.increase_indent().write_indented_line("dangling");
        assert_eq!(
            writer.finish(),
            Err(RenderError::UnbalancedIndent { depth: 1 })
        );
    }

    #[test]
    fn test_underflow_clamps_and_is_reported() {
        let mut writer = PoetWriter::python();
        writer.decrease_indent();
        assert_eq!(writer.depth(), 0);
        writer.write_indented_line("still at zero");
        assert_eq!(writer.lines(), &["still at zero".to_string()]);
        assert_eq!(writer.finish(), Err(RenderError::IndentUnderflow));
    }

    #[test]
    fn test_docstring_indents_every_line() {
        let mut writer = PoetWriter::python();
        writer
            .increase_indent()
            .write_docstring("\n  First line.\n\nSecond line.  \n")
            .decrease_indent();
        assert_eq!(
            writer.into_text().unwrap(),
            "    \"\"\"\n    First line.\n\n    Second line.\n    \"\"\"\n"
        );
    }
}
