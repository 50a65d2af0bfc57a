//! Generate operation - Python modules from the manifest.

use std::path::Path;

use beanpoet_codegen::lower;
use beanpoet_core::GeneratedFile;
use beanpoet_manifest::Manifest;
use eyre::{Context, Result};
use tracing::info;

use crate::reports::{GenerateReport, GenerationResult, PreviewFile, WrittenFile};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Root directory that package directories are created under.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
pub fn generate(manifest: &Manifest, opts: GenerateOptions) -> Result<GenerateReport> {
    let modules = lower(manifest);

    let result = if opts.dry_run {
        let files = modules
            .iter()
            .map(|module| {
                let content = module
                    .render()
                    .wrap_err_with(|| format!("Failed to render package '{}'", module.package()))?;
                Ok(PreviewFile {
                    path: module.path(Path::new("")),
                    content,
                })
            })
            .collect::<Result<_>>()?;
        GenerationResult::Preview(files)
    } else {
        let files = modules
            .iter()
            .map(|module| {
                let path = module.path(opts.output_dir);
                let status = module
                    .write(opts.output_dir)
                    .wrap_err_with(|| format!("Failed to generate '{}'", path.display()))?;
                info!(path = %path.display(), ?status, "module generated");
                Ok(WrittenFile { path, status })
            })
            .collect::<Result<_>>()?;
        GenerationResult::Written(files)
    };

    Ok(GenerateReport {
        declaration_count: manifest.declaration_count(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use beanpoet_core::WriteResult;

    use super::*;

    const MANIFEST: &str = r#"
[[beans]]
name = "Address"
package = "my_api.product"

[[beans.fields]]
name = "street"
type = "str"

[[aliases]]
name = "UserId"
package = "billing"
type = "str"
"#;

    #[test]
    fn test_generate_writes_modules() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let opts = || GenerateOptions {
            output_dir: dir.path(),
            dry_run: false,
        };

        let report = generate(&manifest, opts()).unwrap();
        let GenerationResult::Written(files) = report.result else {
            panic!("expected written files");
        };
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.status == WriteResult::Written));
        assert_eq!(files[0].path, dir.path().join("billing").join("__init__.py"));

        let product = std::fs::read_to_string(dir.path().join("my_api/product/__init__.py")).unwrap();
        assert!(product.contains("class my_api_product_Address(ConjureBeanType):"));

        let report = generate(&manifest, opts()).unwrap();
        let GenerationResult::Written(files) = report.result else {
            panic!("expected written files");
        };
        assert!(files.iter().all(|f| f.status == WriteResult::Unchanged));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        let report = generate(
            &manifest,
            GenerateOptions {
                output_dir: dir.path(),
                dry_run: true,
            },
        )
        .unwrap();

        let GenerationResult::Preview(files) = report.result else {
            panic!("expected a preview");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].path, Path::new("my_api").join("product").join("__init__.py"));
        assert_eq!(files[0].content, "billing_UserId = str\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
