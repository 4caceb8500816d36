use std::path::{Path, PathBuf};

use anyhow::Context;
use dotcontract::{CilMetadataProvider, LoaderConfig};

use crate::app::GlobalOptions;

/// The CIL provider configured from the global options.
pub fn provider(opts: &GlobalOptions) -> CilMetadataProvider {
    let config = if opts.no_nested {
        LoaderConfig::minimal()
    } else {
        LoaderConfig::default()
    };
    CilMetadataProvider::with_config(config)
}

/// A module found on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFile {
    /// Path to load the module from
    pub path: PathBuf,
    /// Path below the searched directory, or the file name for explicit files
    pub relative: PathBuf,
}

impl AsRef<Path> for ModuleFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Expand the command line paths: files are kept, directories are searched for modules.
pub fn collect_modules(paths: &[PathBuf]) -> anyhow::Result<Vec<ModuleFile>> {
    let mut modules = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            collect_modules_recursive(path, &mut found)?;
            found.sort();
            for file in found {
                let relative = file.strip_prefix(path).map_or_else(
                    |_| PathBuf::from(file_display_name(&file)),
                    Path::to_path_buf,
                );
                modules.push(ModuleFile {
                    path: file,
                    relative,
                });
            }
        } else {
            modules.push(ModuleFile {
                path: path.clone(),
                relative: PathBuf::from(file_display_name(path)),
            });
        }
    }
    Ok(modules)
}

fn collect_modules_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_modules_recursive(&path, files)?;
        } else if is_module_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Returns true if the path has a `.dll` or `.exe` extension.
pub fn is_module_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            extension.eq_ignore_ascii_case("dll") || extension.eq_ignore_ascii_case("exe")
        })
}

/// Extract a display-friendly filename from a path.
pub fn file_display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().to_string(),
    )
}
