//! Generate command report data structures.

use std::path::PathBuf;

use beanpoet_core::WriteResult;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Number of declarations in the manifest.
    pub declaration_count: usize,
    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(Vec<WrittenFile>),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// A module written to (or left untouched on) disk.
#[derive(Debug)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub status: WriteResult,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: PathBuf,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(files) => {
                out.section(&format!(
                    "Generated {} module{} from {} declaration{}",
                    files.len(),
                    plural(files.len()),
                    self.declaration_count,
                    plural(self.declaration_count)
                ));
                for file in files {
                    match file.status {
                        WriteResult::Written => out.added_item(&file.path.display().to_string()),
                        WriteResult::Unchanged => {
                            out.list_item(&format!("{} (unchanged)", file.path.display()))
                        }
                    }
                }
            }
            GenerationResult::Preview(files) => {
                for file in files {
                    out.divider(&file.path.display().to_string());
                    out.preformatted(file.content.trim_end());
                    out.newline();
                }
            }
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
