use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::bail;
use dotcontract::render_all;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{collect_modules, provider, ModuleFile},
    output::{print_output, write_text},
};

#[derive(Debug, Serialize)]
struct ContractEntry {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    contract: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ContractOutput {
    modules: Vec<ContractEntry>,
    failed: usize,
}

/// Where the contract of a module goes when `--output` is given.
///
/// `relative` is the module path below the searched directory; the contract mirrors that layout
/// inside `output`, so equal file names from different folders stay apart.
fn destination(output: &Path, relative: &Path, single: bool) -> PathBuf {
    if single && !output.is_dir() {
        return output.to_path_buf();
    }
    output.join(relative.with_extension("md"))
}

/// Destinations of every module, refusing two modules that would share one file.
fn destinations(output: &Path, modules: &[ModuleFile]) -> anyhow::Result<Vec<PathBuf>> {
    let single = modules.len() == 1;
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    let mut targets = Vec::with_capacity(modules.len());

    for module in modules {
        let target = destination(output, &module.relative, single);
        if let Some(previous) = claimed.insert(target.clone(), &module.path) {
            bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                module.path.display(),
                target.display()
            );
        }
        targets.push(target);
    }
    Ok(targets)
}

pub fn run(paths: &[PathBuf], output: Option<&Path>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let modules = collect_modules(paths)?;
    if modules.is_empty() {
        bail!("no modules found");
    }

    let targets = output
        .map(|output| destinations(output, &modules))
        .transpose()?;

    let provider = provider(opts);
    let results = render_all(&modules, &provider);

    let mut entries = Vec::with_capacity(modules.len());
    for (index, (module, result)) in modules.iter().zip(results).enumerate() {
        let entry = match result {
            Ok(contract) => {
                if let Some(target) = targets.as_ref().and_then(|targets| targets.get(index)) {
                    write_text(target, &contract)?;
                    log::info!("{} -> {}", module.path.display(), target.display());
                }
                ContractEntry {
                    path: module.path.display().to_string(),
                    contract: Some(contract),
                    error: None,
                }
            }
            Err(error) => ContractEntry {
                path: module.path.display().to_string(),
                contract: None,
                error: Some(error.to_string()),
            },
        };
        entries.push(entry);
    }

    let failed = entries.iter().filter(|entry| entry.error.is_some()).count();
    let summary = ContractOutput {
        modules: entries,
        failed,
    };

    print_output(&summary, opts, |out| {
        for entry in &out.modules {
            match (&entry.contract, &entry.error) {
                (Some(contract), _) if output.is_none() => print!("{contract}"),
                (_, Some(error)) => eprintln!("error: {error}"),
                _ => {}
            }
        }
    })?;

    if failed > 0 {
        bail!("{failed} of {} module(s) could not be rendered", modules.len());
    }
    Ok(())
}
