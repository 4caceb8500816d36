//! # dotcontract Prelude
//!
//! The types needed to load modules and render their contracts, for glob import.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotcontract operations
pub use crate::Error;

/// The result type used throughout dotcontract
pub use crate::Result;

// ================================================================================================
// Providers
// ================================================================================================

/// Source of module snapshots
pub use crate::MetadataProvider;

/// Provider reading ECMA-335 metadata from PE images, and its configuration
pub use crate::{CilMetadataProvider, LoaderConfig};

/// Provider serving prepared snapshots
pub use crate::InMemoryProvider;

// ================================================================================================
// Contract Model
// ================================================================================================

/// Snapshot of a module's exported types
pub use crate::{ModuleTypes, TypeDefinition, TypeKind};

/// Members and type references
pub use crate::{MemberDefinition, MethodDefinition, Parameter, PropertyDefinition, TypeRef};

// ================================================================================================
// Rendering
// ================================================================================================

/// Contract rendering entry points
pub use crate::{render, render_all, render_file, render_types};

/// Classification of types into contract sections
pub use crate::{classify, Category};
