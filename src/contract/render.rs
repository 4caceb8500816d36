//! Assembly of the canonical contract text.

use std::{fmt::Write, path::Path};

use log::debug;
use rayon::prelude::*;

use crate::{
    contract::{
        classify::{classify, Category, ClassifiedType},
        format::{format_type_name, try_format},
        model::{MethodDefinition, ModuleTypes, PropertyDefinition, TypeKind},
    },
    provider::MetadataProvider,
    Result,
};

fn property_line(property: &PropertyDefinition) -> Result<String> {
    let type_name = try_format(&property.type_ref)?;

    let mut line = String::from("public ");
    if property.is_static {
        line.push_str("static ");
    }
    let _ = write!(line, "{} {} {{ ", type_name, property.name);
    if property.is_readable {
        line.push_str("get; ");
    }
    if property.is_writable {
        line.push_str("set; ");
    }
    line.push('}');
    Ok(line)
}

fn method_line(method: &MethodDefinition, as_extension: bool) -> Result<String> {
    let return_type = try_format(&method.return_type)?;

    let mut parameters = Vec::with_capacity(method.parameters.len());
    for (position, parameter) in method.parameters.iter().enumerate() {
        let receiver = if as_extension && position == 0 { "this " } else { "" };
        let type_name = try_format(&parameter.type_ref)?;
        if parameter.name.is_empty() {
            parameters.push(format!("{receiver}{type_name}"));
        } else {
            parameters.push(format!("{receiver}{type_name} {}", parameter.name));
        }
    }

    let modifier = if method.is_static && !as_extension { "static " } else { "" };
    Ok(format!(
        "public {modifier}{return_type} {}({});",
        method.name,
        parameters.join(", ")
    ))
}

fn write_type(output: &mut String, classified: &ClassifiedType<'_>) {
    let definition = classified.definition;

    let _ = writeln!(output, "### {}", format_type_name(definition));
    output.push_str("```csharp\n");

    if definition.kind == TypeKind::Enum {
        for value in &definition.enum_values {
            let _ = writeln!(output, "{value},");
        }
    } else {
        let properties: Vec<String> = classified
            .properties
            .iter()
            .filter_map(|property| property_line(property).ok())
            .collect();
        if !properties.is_empty() {
            output.push_str("// Properties\n");
            for line in properties {
                output.push_str(&line);
                output.push('\n');
            }
            output.push('\n');
        }

        let methods: Vec<String> = classified
            .methods
            .iter()
            .filter_map(|method| method_line(method, false).ok())
            .collect();
        if !methods.is_empty() {
            output.push_str("// Methods\n");
            for line in methods {
                output.push_str(&line);
                output.push('\n');
            }
        }
    }

    output.push_str("```\n\n");
}

/// Render an already obtained snapshot.
///
/// This never fails: unloadable types only show up as diagnostics and members whose signature
/// cannot be formatted are left out.
#[must_use]
pub fn render_types(module: &ModuleTypes) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Module: {}", module.module_name);
    output.push('\n');

    if !module.diagnostics.is_empty() {
        output.push_str("Some types could not be loaded:\n");
        for diagnostic in &module.diagnostics {
            let _ = writeln!(output, "- {diagnostic}");
        }
        output.push('\n');
    }

    let classified = classify(&module.types, &module.diagnostics);
    for (category, types) in classified.iter() {
        let _ = writeln!(output, "## {category}");

        if category == Category::ExtensionMethods {
            for container in types {
                for method in &container.methods {
                    if let Ok(line) = method_line(method, true) {
                        output.push_str(&line);
                        output.push('\n');
                    }
                }
            }
        } else {
            for classified_type in types {
                write_type(&mut output, classified_type);
            }
        }
    }

    output
}

/// Render the contract of a loaded module.
///
/// The provider is asked for the module's types exactly once.
///
/// # Errors
/// Propagates the provider's failure if the module's types cannot be enumerated at all.
pub fn render<P: MetadataProvider + ?Sized>(module: &P::Handle, provider: &P) -> Result<String> {
    let types = provider.enumerate_types(module)?;
    Ok(render_types(&types))
}

/// Load the module at `path` through `provider` and render its contract.
///
/// # Errors
/// Returns [`crate::Error::ModuleLoad`] (or whatever the provider reports) if the module cannot
/// be loaded or enumerated.
pub fn render_file<P: MetadataProvider + ?Sized>(path: &Path, provider: &P) -> Result<String> {
    let module = provider.load_module(path)?;
    render(&module, provider)
}

/// Render several modules in parallel.
///
/// Every module is loaded and rendered independently; results are returned in the order of
/// `paths`, and one failing module does not affect the others.
pub fn render_all<P, S>(paths: &[S], provider: &P) -> Vec<Result<String>>
where
    P: MetadataProvider + Sync + ?Sized,
    S: AsRef<Path> + Sync,
{
    debug!("rendering {} modules", paths.len());

    paths
        .par_iter()
        .map(|path| render_file(path.as_ref(), provider))
        .collect()
}
