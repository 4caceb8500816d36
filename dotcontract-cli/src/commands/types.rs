use std::path::Path;

use anyhow::Context;
use dotcontract::{classify, format_type_name, Category, MetadataProvider};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{
    app::GlobalOptions,
    commands::common::provider,
    output::{print_output, TabWriter},
};

#[derive(Debug, Serialize)]
struct TypeEntry {
    category: String,
    namespace: String,
    name: String,
    properties: usize,
    methods: usize,
}

#[derive(Debug, Serialize)]
struct TypesOutput {
    module: String,
    types: Vec<TypeEntry>,
    diagnostics: Vec<String>,
    count: usize,
}

/// Resolve a `--category` argument, ignoring case and spaces.
fn parse_category(value: &str) -> anyhow::Result<Category> {
    let wanted: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    Category::iter()
        .find(|category| {
            let name: String = category
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            name.eq_ignore_ascii_case(&wanted)
        })
        .with_context(|| format!("unknown category: {value}"))
}

pub fn run(path: &Path, category: Option<&str>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let filter = category.map(parse_category).transpose()?;

    let provider = provider(opts);
    let module = provider.load_module(path)?;
    let types = provider.enumerate_types(&module)?;

    let classified = classify(&types.types, &types.diagnostics);
    let mut entries = Vec::new();
    for (category, bucket) in classified.iter() {
        if filter.is_some_and(|filter| filter != category) {
            continue;
        }

        for classified_type in bucket {
            entries.push(TypeEntry {
                category: category.to_string(),
                namespace: classified_type.definition.namespace.clone(),
                name: format_type_name(classified_type.definition),
                properties: classified_type.properties.len(),
                methods: classified_type.methods.len(),
            });
        }
    }

    let count = entries.len();
    let output = TypesOutput {
        module: types.module_name.clone(),
        types: entries,
        diagnostics: types.diagnostics.clone(),
        count,
    };

    print_output(&output, opts, |out| {
        let mut tw = TabWriter::new(&["Category", "Namespace", "Name", "Properties", "Methods"]);
        for e in &out.types {
            tw.row(vec![
                e.category.clone(),
                e.namespace.clone(),
                e.name.clone(),
                e.properties.to_string(),
                e.methods.to_string(),
            ]);
        }
        tw.print();
        println!("\n{} type(s) listed in {}.", out.count, out.module);
        for diagnostic in &out.diagnostics {
            eprintln!("warning: {diagnostic}");
        }
    })
}
