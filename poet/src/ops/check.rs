//! Check operation - render every module without touching the disk.

use std::path::Path;

use beanpoet_codegen::lower;
use beanpoet_manifest::Manifest;
use eyre::{Context, Result};
use tracing::debug;

use crate::reports::{CheckReport, ModuleSummary};

/// Execute the check operation.
///
/// Fails with the first render error of any module.
pub fn check(manifest: &Manifest, manifest_path: &Path) -> Result<CheckReport> {
    let mut modules = Vec::new();
    for module in lower(manifest) {
        let source = module
            .to_source()
            .wrap_err_with(|| format!("Failed to render package '{}'", module.package()))?;
        debug!(package = %module.package(), bytes = source.len(), "module rendered");
        modules.push(ModuleSummary {
            package: module.package().to_string(),
            declarations: module.declarations().len(),
            lines: source.lines().count(),
        });
    }

    Ok(CheckReport {
        manifest_path: manifest_path.to_path_buf(),
        beans: manifest.beans.len(),
        enums: manifest.enums.len(),
        aliases: manifest.aliases.len(),
        modules,
    })
}
