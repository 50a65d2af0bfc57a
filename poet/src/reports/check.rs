//! Check command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from an in-memory render of every module.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the manifest.
    pub manifest_path: PathBuf,
    pub beans: usize,
    pub enums: usize,
    pub aliases: usize,
    /// One entry per rendered module, ordered by package.
    pub modules: Vec<ModuleSummary>,
}

#[derive(Debug, Serialize)]
pub struct ModuleSummary {
    pub package: String,
    pub declarations: usize,
    pub lines: usize,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.manifest_path.display()));
        out.newline();
        out.preformatted(&format!(
            "  {} bean{}, {} enum{}, {} alias{}",
            self.beans,
            if self.beans == 1 { "" } else { "s" },
            self.enums,
            if self.enums == 1 { "" } else { "s" },
            self.aliases,
            if self.aliases == 1 { "" } else { "es" },
        ));
        if !self.modules.is_empty() {
            out.newline();
            out.section("Modules");
            for module in &self.modules {
                out.list_item(&format!(
                    "{} ({} declarations, {} lines)",
                    module.package, module.declarations, module.lines
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    fn report() -> CheckReport {
        CheckReport {
            manifest_path: PathBuf::from("poet.toml"),
            beans: 1,
            enums: 0,
            aliases: 2,
            modules: vec![ModuleSummary {
                package: "product".into(),
                declarations: 3,
                lines: 40,
            }],
        }
    }

    #[test]
    fn test_render() {
        let mut out = BufferOutput::default();
        report().render(&mut out);
        assert_eq!(
            out.lines,
            vec![
                "✓ poet.toml is valid",
                "",
                "  1 bean, 0 enums, 2 aliases",
                "",
                "Modules:",
                "  - product (3 declarations, 40 lines)",
            ]
        );
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["manifest_path"], "poet.toml");
        assert_eq!(json["modules"][0]["package"], "product");
        assert_eq!(json["aliases"], 2);
    }
}
