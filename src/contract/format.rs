//! Display strings for type references.

use crate::{
    contract::model::{Decoration, TypeDefinition, TypeRef},
    Error, Result,
};

/// CLR short names rendered as their C# keyword.
pub const BUILTIN_ALIASES: [(&str, &str); 6] = [
    ("String", "string"),
    ("Int32", "int"),
    ("Boolean", "bool"),
    ("Double", "double"),
    ("Object", "object"),
    ("Void", "void"),
];

/// Placeholder printed for a reference the provider could not resolve.
const UNRESOLVED: &str = "?";

fn alias(base_name: &str) -> &str {
    BUILTIN_ALIASES
        .iter()
        .find(|(clr, _)| *clr == base_name)
        .map_or(base_name, |(_, keyword)| keyword)
}

/// `` List`1 `` becomes `List`.
fn strip_arity(base_name: &str) -> &str {
    base_name.split('`').next().unwrap_or(base_name)
}

fn write_decorations(output: &mut String, decorations: &[Decoration]) {
    for decoration in decorations {
        match decoration {
            Decoration::Array(rank) => {
                output.push('[');
                for _ in 1..*rank {
                    output.push(',');
                }
                output.push(']');
            }
            Decoration::Pointer => output.push('*'),
            Decoration::ByRef => output.push('&'),
        }
    }
}

fn write_type(output: &mut String, type_ref: &TypeRef) {
    if type_ref.unresolved.is_some() {
        output.push_str(UNRESOLVED);
    } else if type_ref.base_name.is_empty() {
        output.push_str("void");
    } else if type_ref.generic_arguments.is_empty() {
        output.push_str(alias(&type_ref.base_name));
    } else {
        output.push_str(strip_arity(&type_ref.base_name));
        output.push('<');
        for (index, argument) in type_ref.generic_arguments.iter().enumerate() {
            if index > 0 {
                output.push_str(", ");
            }
            write_type(output, argument);
        }
        output.push('>');
    }

    write_decorations(output, &type_ref.decorations);
}

/// Format a type reference the way it appears in a contract.
///
/// Built-in types use their keyword, generic instantiations drop the arity suffix and list
/// their arguments, and no namespace is ever printed. Unresolved references print as `?`; use
/// [`try_format`] to reject them instead.
///
/// ```rust
/// use dotcontract::{format, TypeRef};
///
/// let list = TypeRef::generic("List`1", vec![TypeRef::new("Int32")]);
/// assert_eq!(format(&list), "List<int>");
/// ```
#[must_use]
pub fn format(type_ref: &TypeRef) -> String {
    let mut output = String::new();
    write_type(&mut output, type_ref);
    output
}

/// Format a type reference, failing if any part of it is unresolved.
///
/// # Errors
/// Returns [`Error::MemberFormat`] naming the first unresolved reference.
pub fn try_format(type_ref: &TypeRef) -> Result<String> {
    match type_ref.unresolved_reason() {
        Some(reason) => Err(Error::MemberFormat(reason.to_string())),
        None => Ok(format(type_ref)),
    }
}

/// Heading text of a type: its name with generic parameters, e.g. `Dictionary<TKey, TValue>`.
#[must_use]
pub fn format_type_name(definition: &TypeDefinition) -> String {
    let parameters = definition
        .generic_parameters
        .iter()
        .map(TypeRef::new)
        .collect();
    format(&TypeRef::generic(definition.name.clone(), parameters))
}
