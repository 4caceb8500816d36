//! The public-surface contract of a module.
//!
//! A provider turns a module into a [`ModuleTypes`] snapshot; this module turns that snapshot
//! into canonical text in three steps:
//!
//! 1. [`classify`] sorts types into [`Category`] buckets and drops noise members
//! 2. [`format`] turns every type reference into its short display form
//! 3. [`render_types`] lays out headings, code fences and member lines
//!
//! The output is byte-identical for identical input, which makes contracts diffable across
//! versions of a module.
//!
//! # Examples
//!
//! ```rust
//! use dotcontract::{render_types, ModuleTypes, TypeDefinition, TypeKind};
//!
//! let mut module = ModuleTypes::new("Contoso.Shapes");
//! let mut color = TypeDefinition::new("Contoso.Shapes", "Color", TypeKind::Enum);
//! color.enum_values = vec!["Red".to_string(), "Green".to_string()];
//! module.types.push(color);
//!
//! let contract = render_types(&module);
//! assert!(contract.starts_with("# Module: Contoso.Shapes\n\n## Enums\n### Color\n"));
//! ```

mod classify;
mod format;
mod model;
mod render;

pub use classify::{
    classify, is_excluded, Category, ClassifiedResult, ClassifiedType, EXCLUDED_MEMBER_NAMES,
};
pub use format::{format, format_type_name, try_format, BUILTIN_ALIASES};
pub use model::{
    Decoration, MemberDefinition, MethodDefinition, ModuleTypes, Parameter, PropertyDefinition,
    TypeDefinition, TypeKind, TypeRef,
};
pub use render::{render, render_all, render_file, render_types};
