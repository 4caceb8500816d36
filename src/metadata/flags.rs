//! Attribute bitmasks of ECMA-335 II.23.1 that decide what is public and how it is shaped.
//!
//! Visibility and access are enumerations packed into the low bits of the flags, so they are
//! extracted with a mask first ([`TypeVisibility::from_type_flags`],
//! [`MethodAccessFlags::from_method_flags`]) while modifiers are tested as plain bits.

use bitflags::bitflags;

/// Mask of the visibility sub-field in `TypeAttributes`.
pub const TYPE_VISIBILITY_MASK: u32 = 0x0000_0007;
/// Mask of the member access sub-field in `MethodAttributes` and `FieldAttributes`.
pub const MEMBER_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    /// Type visibility, the low three bits of `TypeAttributes`
    pub struct TypeVisibility: u32 {
        /// Not visible outside the assembly
        const NOT_PUBLIC = 0x0000_0000;
        /// Visible outside the assembly
        const PUBLIC = 0x0000_0001;
        /// Nested, public
        const NESTED_PUBLIC = 0x0000_0002;
        /// Nested, private
        const NESTED_PRIVATE = 0x0000_0003;
        /// Nested, family
        const NESTED_FAMILY = 0x0000_0004;
        /// Nested, assembly
        const NESTED_ASSEMBLY = 0x0000_0005;
        /// Nested, family and assembly
        const NESTED_FAM_AND_ASSEM = 0x0000_0006;
        /// Nested, family or assembly
        const NESTED_FAM_OR_ASSEM = 0x0000_0007;
    }
}

impl TypeVisibility {
    /// Extract visibility from raw `TypeAttributes`
    #[must_use]
    pub fn from_type_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & TYPE_VISIBILITY_MASK)
    }
}

bitflags! {
    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    /// Semantic and inheritance bits of `TypeAttributes`
    pub struct TypeAttributes: u32 {
        /// Type is an interface
        const INTERFACE = 0x0000_0020;
        /// Type is abstract
        const ABSTRACT = 0x0000_0080;
        /// Type cannot be derived from
        const SEALED = 0x0000_0100;
        /// Name is special
        const SPECIAL_NAME = 0x0000_0400;
        /// Runtime should check name encoding
        const RT_SPECIAL_NAME = 0x0000_0800;
    }
}

impl TypeAttributes {
    /// Extract the modifier bits from raw `TypeAttributes`
    #[must_use]
    pub fn from_type_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags)
    }

    /// `abstract sealed`, the encoding of a C# `static class`
    #[must_use]
    pub fn is_static_container(&self) -> bool {
        self.contains(TypeAttributes::ABSTRACT | TypeAttributes::SEALED)
    }
}

bitflags! {
    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    /// Method member access, the low three bits of `MethodAttributes`
    pub struct MethodAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessible by anyone in the assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessible by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessible by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract member access from raw `MethodAttributes`
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & MEMBER_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    /// Modifier bits of `MethodAttributes`
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method may not be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name and signature, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// Runtime should check name encoding
        const RTSPECIAL_NAME = 0x1000;
    }
}

impl MethodModifiers {
    /// Extract modifier bits from raw `MethodAttributes`
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags)
    }
}

bitflags! {
    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    /// Bits of `FieldAttributes` relevant to enum values
    pub struct FieldAttributes: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Field may only be initialized, not written to after init
        const INIT_ONLY = 0x0020;
        /// Value is a compile time constant
        const LITERAL = 0x0040;
        /// Field is special
        const SPECIAL_NAME = 0x0200;
        /// Runtime should check name encoding
        const RT_SPECIAL_NAME = 0x0400;
    }
}

impl FieldAttributes {
    /// Extract attribute bits from raw `FieldAttributes`
    #[must_use]
    pub fn from_field_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags)
    }
}

bitflags! {
    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    /// Role of a method linked through `MethodSemantics`
    pub struct MethodSemanticsAttributes: u32 {
        /// Property setter
        const SETTER = 0x0001;
        /// Property getter
        const GETTER = 0x0002;
        /// Other accessor
        const OTHER = 0x0004;
        /// Event add
        const ADD_ON = 0x0008;
        /// Event remove
        const REMOVE_ON = 0x0010;
        /// Event fire
        const FIRE = 0x0020;
    }
}

bitflags! {
    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    /// Leading byte of a method, property or field signature (II.23.2.1-II.23.2.5)
    pub struct CallingConvention: u8 {
        /// Default managed calling convention
        const DEFAULT = 0x00;
        /// Variable argument list
        const VARARG = 0x05;
        /// Field signature marker
        const FIELD = 0x06;
        /// Property signature marker
        const PROPERTY = 0x08;
        /// Method has generic parameters; the count follows
        const GENERIC = 0x10;
        /// Instance method or property
        const HASTHIS = 0x20;
        /// `this` is passed explicitly
        const EXPLICITTHIS = 0x40;
    }
}

/// Mask of the calling convention kind in the first signature byte.
pub const CALLING_CONVENTION_KIND_MASK: u8 = 0x0F;
