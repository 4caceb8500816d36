//! Translation of signature types into contract type references.

use crate::{
    contract::{Decoration, TypeRef},
    metadata::{
        signatures::{SignatureParameter, SignatureParser, TypeSignature},
        tables::{TableId, TypeDefRaw, TypeRefRaw, TypeSpecRaw},
        token::Token,
        view::MetadataView,
    },
    Result,
};

/// Generic parameter names in scope while a signature is translated.
#[derive(Default, Clone, Copy)]
pub(crate) struct GenericContext<'g> {
    pub type_params: &'g [String],
    pub method_params: &'g [String],
}

/// Resolves `TypeDefOrRef` tokens to names and builds [`TypeRef`] trees from signatures.
pub(crate) struct TypeNames<'m, 'a> {
    metadata: &'m MetadataView<'a>,
    max_depth: usize,
}

impl<'m, 'a> TypeNames<'m, 'a> {
    pub fn new(metadata: &'m MetadataView<'a>, max_depth: usize) -> Self {
        TypeNames {
            metadata,
            max_depth,
        }
    }

    /// Decode a signature blob with the configured depth limit.
    pub fn parser(&self, blob_index: u32) -> Result<SignatureParser<'a>> {
        Ok(SignatureParser::with_max_depth(
            self.metadata.blob(blob_index)?,
            self.max_depth,
        ))
    }

    /// `(namespace, name)` of a `TypeDef` or `TypeRef` row.
    pub fn qualified_name(&self, token: Token) -> Result<(&'a str, &'a str)> {
        match TableId::from_token_table(token.table()) {
            Some(TableId::TypeDef) => {
                let Some(row) = self
                    .metadata
                    .tables
                    .table::<TypeDefRaw>()
                    .and_then(|table| table.get(token.row()))
                else {
                    return Err(malformed_error!("TypeDef {} does not exist", token));
                };
                Ok((
                    self.metadata.string(row.type_namespace)?,
                    self.metadata.string(row.type_name)?,
                ))
            }
            Some(TableId::TypeRef) => {
                let Some(row) = self
                    .metadata
                    .tables
                    .table::<TypeRefRaw>()
                    .and_then(|table| table.get(token.row()))
                else {
                    return Err(malformed_error!("TypeRef {} does not exist", token));
                };
                Ok((
                    self.metadata.string(row.type_namespace)?,
                    self.metadata.string(row.type_name)?,
                ))
            }
            _ => Err(malformed_error!("Token {} does not name a type", token)),
        }
    }

    fn token_ref(&self, token: Token, context: GenericContext<'_>, depth: usize) -> TypeRef {
        if TableId::from_token_table(token.table()) == Some(TableId::TypeSpec) {
            return self.type_spec_ref(token, context, depth);
        }

        match self.qualified_name(token) {
            Ok((_, name)) => TypeRef::new(name),
            Err(error) => TypeRef::unresolved(format!("{token}: {error}")),
        }
    }

    fn type_spec_ref(&self, token: Token, context: GenericContext<'_>, depth: usize) -> TypeRef {
        if depth >= self.max_depth {
            return TypeRef::unresolved(format!("{token}: type spec nesting too deep"));
        }

        let signature = self
            .metadata
            .tables
            .table::<TypeSpecRaw>()
            .and_then(|table| table.get(token.row()))
            .ok_or_else(|| malformed_error!("TypeSpec {} does not exist", token))
            .and_then(|row| self.parser(row.signature))
            .and_then(|mut parser| parser.parse_type_spec_signature());

        match signature {
            Ok(spec) => self.signature_ref(&spec.base, context, depth + 1),
            Err(error) => TypeRef::unresolved(format!("{token}: {error}")),
        }
    }

    /// Translate a parameter or return slot, including its by-ref marker.
    pub fn parameter_ref(
        &self,
        parameter: &SignatureParameter,
        context: GenericContext<'_>,
    ) -> TypeRef {
        let type_ref = self.type_ref(&parameter.base, context);
        if parameter.by_ref {
            type_ref.with_decoration(Decoration::ByRef)
        } else {
            type_ref
        }
    }

    /// Translate a decoded signature type.
    pub fn type_ref(&self, signature: &TypeSignature, context: GenericContext<'_>) -> TypeRef {
        self.signature_ref(signature, context, 0)
    }

    fn signature_ref(
        &self,
        signature: &TypeSignature,
        context: GenericContext<'_>,
        depth: usize,
    ) -> TypeRef {
        match signature {
            TypeSignature::Void => TypeRef::void(),
            TypeSignature::Boolean => TypeRef::new("Boolean"),
            TypeSignature::Char => TypeRef::new("Char"),
            TypeSignature::I1 => TypeRef::new("SByte"),
            TypeSignature::U1 => TypeRef::new("Byte"),
            TypeSignature::I2 => TypeRef::new("Int16"),
            TypeSignature::U2 => TypeRef::new("UInt16"),
            TypeSignature::I4 => TypeRef::new("Int32"),
            TypeSignature::U4 => TypeRef::new("UInt32"),
            TypeSignature::I8 => TypeRef::new("Int64"),
            TypeSignature::U8 => TypeRef::new("UInt64"),
            TypeSignature::R4 => TypeRef::new("Single"),
            TypeSignature::R8 => TypeRef::new("Double"),
            TypeSignature::String => TypeRef::new("String"),
            TypeSignature::Object => TypeRef::new("Object"),
            TypeSignature::TypedByRef => TypeRef::new("TypedReference"),
            TypeSignature::I | TypeSignature::FnPtr(_) => TypeRef::new("IntPtr"),
            TypeSignature::U => TypeRef::new("UIntPtr"),
            TypeSignature::Class(token) | TypeSignature::ValueType(token) => {
                self.token_ref(*token, context, depth)
            }
            TypeSignature::GenericParamType(number) => {
                generic_param(context.type_params, *number, "!")
            }
            TypeSignature::GenericParamMethod(number) => {
                generic_param(context.method_params, *number, "!!")
            }
            TypeSignature::Ptr(inner) => self
                .signature_ref(inner, context, depth)
                .with_decoration(Decoration::Pointer),
            TypeSignature::ByRef(inner) => self
                .signature_ref(inner, context, depth)
                .with_decoration(Decoration::ByRef),
            TypeSignature::SzArray(inner) => self
                .signature_ref(inner, context, depth)
                .with_decoration(Decoration::Array(1)),
            TypeSignature::Array(array) => self
                .signature_ref(&array.base, context, depth)
                .with_decoration(Decoration::Array(array.rank.max(1))),
            TypeSignature::Pinned(inner) => self.signature_ref(inner, context, depth),
            TypeSignature::GenericInst(base, arguments) => {
                let mut type_ref = self.signature_ref(base, context, depth);
                type_ref.generic_arguments = arguments
                    .iter()
                    .map(|argument| self.signature_ref(argument, context, depth))
                    .collect();
                type_ref
            }
            TypeSignature::Unknown => TypeRef::unresolved("unknown element type"),
        }
    }
}

fn generic_param(names: &[String], number: u32, prefix: &str) -> TypeRef {
    match names.get(number as usize) {
        Some(name) => TypeRef::new(name.as_str()),
        None => TypeRef::new(format!("{prefix}{number}")),
    }
}
