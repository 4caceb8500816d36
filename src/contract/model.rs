//! The type model a provider hands to the renderer.
//!
//! Every value here is a plain owned snapshot: a provider builds it once per extraction and the
//! renderer only reads it. Nothing refers back into the module the snapshot came from.

/// The shape of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// An interface
    Interface,
    /// An instantiable or inheritable reference type
    Class,
    /// A value type that is not an enum
    Struct,
    /// An enumeration
    Enum,
    /// A class that is both abstract and sealed, i.e. a C# `static class`
    StaticContainer,
}

/// A wrapper applied around a type reference, innermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    /// An array of the given rank, `[]` for rank 1 and `[,]` for rank 2
    Array(u32),
    /// An unmanaged pointer, `*`
    Pointer,
    /// A managed reference, `&`
    ByRef,
}

/// A possibly generic reference to a type.
///
/// `base_name` is the short CLR name, including an arity suffix such as `` List`1 `` for generic
/// types. An empty `base_name` stands for `void`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypeRef {
    /// Short type name without namespace
    pub base_name: String,
    /// Generic arguments, empty for non-generic references
    pub generic_arguments: Vec<TypeRef>,
    /// Array, pointer and by-ref wrappers, innermost first
    pub decorations: Vec<Decoration>,
    /// Why the provider could not resolve this reference, `None` if it could
    pub unresolved: Option<String>,
}

impl TypeRef {
    /// A plain reference to `base_name`.
    #[must_use]
    pub fn new(base_name: impl Into<String>) -> Self {
        TypeRef {
            base_name: base_name.into(),
            ..TypeRef::default()
        }
    }

    /// A generic instantiation of `base_name` with `arguments`.
    #[must_use]
    pub fn generic(base_name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        TypeRef {
            base_name: base_name.into(),
            generic_arguments: arguments,
            ..TypeRef::default()
        }
    }

    /// The `void` return type.
    #[must_use]
    pub fn void() -> Self {
        TypeRef::new("Void")
    }

    /// A reference the provider could not resolve.
    #[must_use]
    pub fn unresolved(reason: impl Into<String>) -> Self {
        TypeRef {
            unresolved: Some(reason.into()),
            ..TypeRef::default()
        }
    }

    /// Wrap this reference in `decoration`.
    #[must_use]
    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decorations.push(decoration);
        self
    }

    /// The first unresolved reference in this tree, if any.
    #[must_use]
    pub fn unresolved_reason(&self) -> Option<&str> {
        if let Some(reason) = &self.unresolved {
            return Some(reason);
        }
        self.generic_arguments
            .iter()
            .find_map(TypeRef::unresolved_reason)
    }
}

/// A public property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    /// Property name
    pub name: String,
    /// Property type
    pub type_ref: TypeRef,
    /// A getter exists and is public
    pub is_readable: bool,
    /// A setter exists and is public
    pub is_writable: bool,
    /// Static property
    pub is_static: bool,
    /// Declared on an interface or overriding a base property
    pub declaring_type_is_interface_or_override: bool,
}

/// One parameter of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter type
    pub type_ref: TypeRef,
    /// Parameter name, empty if the module does not record one
    pub name: String,
}

impl Parameter {
    /// A named parameter.
    #[must_use]
    pub fn new(type_ref: TypeRef, name: impl Into<String>) -> Self {
        Parameter {
            type_ref,
            name: name.into(),
        }
    }
}

/// A public method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    /// Method name
    pub name: String,
    /// Return type
    pub return_type: TypeRef,
    /// Parameters in declaration order
    pub parameters: Vec<Parameter>,
    /// Static method
    pub is_static: bool,
    /// Marked as an extension method; the first parameter is the receiver
    pub is_extension: bool,
    /// Compiler-generated accessor or operator
    pub is_special_name: bool,
}

/// A member of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberDefinition {
    /// A property with its accessor visibility resolved
    Property(PropertyDefinition),
    /// A method
    Method(MethodDefinition),
}

impl MemberDefinition {
    /// The member name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            MemberDefinition::Property(property) => &property.name,
            MemberDefinition::Method(method) => &method.name,
        }
    }

    /// Returns `true` for compiler-generated methods.
    #[must_use]
    pub fn is_special_name(&self) -> bool {
        match self {
            MemberDefinition::Property(_) => false,
            MemberDefinition::Method(method) => method.is_special_name,
        }
    }
}

/// A type defined in a module.
///
/// Identity is `(namespace, name, generic arity)`; `name` keeps the CLR arity suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    /// Namespace, empty for the global namespace
    pub namespace: String,
    /// Short type name
    pub name: String,
    /// Shape of the type
    pub kind: TypeKind,
    /// `false` if the provider could not load the type
    pub is_loadable: bool,
    /// Names of the generic parameters in order
    pub generic_parameters: Vec<String>,
    /// Public members
    pub members: Vec<MemberDefinition>,
    /// Enum member names in declaration order, empty unless `kind` is [`TypeKind::Enum`]
    pub enum_values: Vec<String>,
}

impl TypeDefinition {
    /// A loadable type without members.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        TypeDefinition {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            is_loadable: true,
            generic_parameters: Vec::new(),
            members: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    /// A type the provider could not load.
    #[must_use]
    pub fn unloadable(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDefinition {
            is_loadable: false,
            ..TypeDefinition::new(namespace, name, TypeKind::Class)
        }
    }

    /// Namespace-qualified name, as used in diagnostics.
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Number of generic parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.generic_parameters.len()
    }
}

/// What a provider returns for one module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleTypes {
    /// Name shown in the contract header
    pub module_name: String,
    /// Every type the provider found, loadable or not
    pub types: Vec<TypeDefinition>,
    /// One message per type that failed to load, in discovery order
    pub diagnostics: Vec<String>,
}

impl ModuleTypes {
    /// An empty snapshot for `module_name`.
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        ModuleTypes {
            module_name: module_name.into(),
            ..ModuleTypes::default()
        }
    }
}
