//! Joining of metadata tables into contract type definitions.

use std::{
    collections::{HashMap, HashSet},
    ops::Range,
};

use log::{debug, warn};

use crate::{
    contract::{
        MemberDefinition, MethodDefinition, ModuleTypes, Parameter, PropertyDefinition,
        TypeDefinition, TypeKind, TypeRef,
    },
    metadata::{
        flags::{
            FieldAttributes, MethodAccessFlags, MethodModifiers, MethodSemanticsAttributes,
            TypeAttributes, TypeVisibility,
        },
        tables::{
            AssemblyRaw, CustomAttributeRaw, FieldRaw, GenericParamRaw, MemberRefRaw,
            MetadataTable, MethodDefRaw, MethodSemanticsRaw, ModuleRaw, NestedClassRaw, ParamRaw,
            PropertyMapRaw, PropertyRaw, TableId, TypeDefRaw,
        },
        token::Token,
        view::MetadataView,
    },
    provider::cil::{
        config::LoaderConfig,
        names::{GenericContext, TypeNames},
    },
    Result,
};

const EXTENSION_ATTRIBUTE: (&str, &str) = ("System.Runtime.CompilerServices", "ExtensionAttribute");

/// Builds the [`ModuleTypes`] snapshot of one module.
///
/// Cross-table lookups (nesting, generic parameters, accessors, extension attributes) are
/// indexed once up front; types are then produced in `TypeDef` order.
pub(crate) struct TypeExtractor<'m, 'a> {
    metadata: &'m MetadataView<'a>,
    config: LoaderConfig,
    names: TypeNames<'m, 'a>,
    typedefs: Option<MetadataTable<'a, TypeDefRaw>>,
    methods: Option<MetadataTable<'a, MethodDefRaw>>,
    fields: Option<MetadataTable<'a, FieldRaw>>,
    params: Option<MetadataTable<'a, ParamRaw>>,
    properties: Option<MetadataTable<'a, PropertyRaw>>,
    property_maps: Option<MetadataTable<'a, PropertyMapRaw>>,
    /// nested `TypeDef` row -> enclosing `TypeDef` row
    enclosing: HashMap<u32, u32>,
    /// owner token -> parameter names ordered by number
    generic_params: HashMap<Token, Vec<String>>,
    /// `Property` row -> (semantics, `MethodDef` row)
    accessors: HashMap<u32, Vec<(MethodSemanticsAttributes, u32)>>,
    /// `MethodDef` rows carrying `ExtensionAttribute`
    extension_methods: HashSet<u32>,
}

impl<'m, 'a> TypeExtractor<'m, 'a> {
    pub fn new(metadata: &'m MetadataView<'a>, config: LoaderConfig) -> Self {
        let tables = &metadata.tables;

        let mut extractor = TypeExtractor {
            metadata,
            config,
            names: TypeNames::new(metadata, config.max_signature_depth),
            typedefs: tables.table::<TypeDefRaw>(),
            methods: tables.table::<MethodDefRaw>(),
            fields: tables.table::<FieldRaw>(),
            params: tables.table::<ParamRaw>(),
            properties: tables.table::<PropertyRaw>(),
            property_maps: tables.table::<PropertyMapRaw>(),
            enclosing: HashMap::new(),
            generic_params: HashMap::new(),
            accessors: HashMap::new(),
            extension_methods: HashSet::new(),
        };

        extractor.index_nesting();
        extractor.index_generic_params();
        extractor.index_accessors();
        extractor.index_extension_methods();
        extractor
    }

    fn index_nesting(&mut self) {
        if let Some(table) = self.metadata.tables.table::<NestedClassRaw>() {
            for row in &table {
                self.enclosing.insert(row.nested_class, row.enclosing_class);
            }
        }
    }

    fn index_generic_params(&mut self) {
        let Some(table) = self.metadata.tables.table::<GenericParamRaw>() else {
            return;
        };

        let mut by_owner: HashMap<Token, Vec<(u32, String)>> = HashMap::new();
        for row in &table {
            let name = match self.metadata.string(row.name) {
                Ok(name) => name.to_string(),
                Err(_) => format!("!{}", row.number),
            };
            by_owner
                .entry(row.owner.token)
                .or_default()
                .push((row.number, name));
        }

        for (owner, mut params) in by_owner {
            params.sort_by_key(|(number, _)| *number);
            self.generic_params
                .insert(owner, params.into_iter().map(|(_, name)| name).collect());
        }
    }

    fn index_accessors(&mut self) {
        let Some(table) = self.metadata.tables.table::<MethodSemanticsRaw>() else {
            return;
        };

        for row in &table {
            if row.association.tag != TableId::Property {
                continue;
            }

            let semantics = MethodSemanticsAttributes::from_bits_truncate(row.semantics);
            self.accessors
                .entry(row.association.row)
                .or_default()
                .push((semantics, row.method));
        }
    }

    fn index_extension_methods(&mut self) {
        let Some(table) = self.metadata.tables.table::<CustomAttributeRaw>() else {
            return;
        };

        let mut is_extension_ctor: HashMap<Token, bool> = HashMap::new();
        for row in &table {
            if row.parent.tag != TableId::MethodDef {
                continue;
            }

            let matches = *is_extension_ctor
                .entry(row.constructor.token)
                .or_insert_with(|| {
                    self.attribute_type(row.constructor.token) == Some(EXTENSION_ATTRIBUTE)
                });
            if matches {
                self.extension_methods.insert(row.parent.row);
            }
        }
    }

    /// `(namespace, name)` of the type declaring an attribute constructor.
    fn attribute_type(&self, constructor: Token) -> Option<(&'a str, &'a str)> {
        match TableId::from_token_table(constructor.table())? {
            TableId::MemberRef => {
                let member = self
                    .metadata
                    .tables
                    .table::<MemberRefRaw>()?
                    .get(constructor.row())?;
                match member.class.tag {
                    TableId::TypeDef | TableId::TypeRef => {
                        self.names.qualified_name(member.class.token).ok()
                    }
                    _ => None,
                }
            }
            TableId::MethodDef => {
                let owner = self.method_owner(constructor.row())?;
                self.names.qualified_name(owner.token).ok()
            }
            _ => None,
        }
    }

    /// The `TypeDef` whose method list contains the physical `MethodDef` row `method_row`.
    ///
    /// Method lists hold logical indices, so the row is mapped back through `MethodPtr` first.
    fn method_owner(&self, method_row: u32) -> Option<TypeDefRaw> {
        let typedefs = self.typedefs.as_ref()?;
        let tables = &self.metadata.tables;

        let logical = if tables.has_table(TableId::MethodPtr) {
            (1..=tables.row_count(TableId::MethodPtr)).find(|index| {
                tables.resolve_indirection(TableId::MethodDef, *index).ok() == Some(method_row)
            })?
        } else {
            method_row
        };

        typedefs
            .iter()
            .filter(|row| row.method_list <= logical)
            .last()
    }

    /// Name shown in the contract header.
    pub fn module_name(&self) -> Result<String> {
        let tables = &self.metadata.tables;

        if let Some(assembly) = tables.table::<AssemblyRaw>().and_then(|table| table.get(1)) {
            return Ok(self.metadata.string(assembly.name)?.to_string());
        }

        let Some(module) = tables.table::<ModuleRaw>().and_then(|table| table.get(1)) else {
            return Err(malformed_error!("Metadata has no Module row"));
        };

        let name = self.metadata.string(module.name)?;
        for extension in [".dll", ".exe"] {
            let Some(split) = name.len().checked_sub(extension.len()) else {
                continue;
            };
            if let (Some(stem), Some(suffix)) = (name.get(..split), name.get(split..)) {
                if !stem.is_empty() && suffix.eq_ignore_ascii_case(extension) {
                    return Ok(stem.to_string());
                }
            }
        }
        Ok(name.to_string())
    }

    /// Produce the snapshot: every exported type, unloadable ones with a diagnostic each.
    pub fn extract(&self) -> Result<ModuleTypes> {
        let mut module = ModuleTypes::new(self.module_name()?);

        let Some(typedefs) = &self.typedefs else {
            debug!("{} has no type definitions", module.module_name);
            return Ok(module);
        };

        for row in typedefs {
            if self.metadata.string(row.type_name).ok() == Some("<Module>") {
                continue;
            }

            let result = self.is_exported(&row).and_then(|exported| {
                if exported {
                    self.type_definition(&row).map(Some)
                } else {
                    Ok(None)
                }
            });

            match result {
                Ok(Some(definition)) => module.types.push(definition),
                Ok(None) => {}
                Err(error) => {
                    let (namespace, name) = self.display_name(&row);
                    let definition = TypeDefinition::unloadable(namespace, name);
                    let message =
                        format!("{} could not be loaded: {}", definition.full_name(), error);

                    warn!("{message}");
                    module.diagnostics.push(message);
                    module.types.push(definition);
                }
            }
        }

        debug!(
            "{}: {} types, {} diagnostics",
            module.module_name,
            module.types.len(),
            module.diagnostics.len()
        );
        Ok(module)
    }

    fn display_name(&self, row: &TypeDefRaw) -> (String, String) {
        let namespace = self.namespace_of(row).unwrap_or_default().to_string();
        match self.metadata.string(row.type_name) {
            Ok(name) => (namespace, name.to_string()),
            Err(_) => (namespace, row.token.to_string()),
        }
    }

    fn typedef(&self, rid: u32) -> Result<TypeDefRaw> {
        self.typedefs
            .as_ref()
            .and_then(|table| table.get(rid))
            .ok_or_else(|| malformed_error!("TypeDef row {} does not exist", rid))
    }

    /// Walk the enclosing chain of a nested type, outermost last.
    fn enclosing_chain(&self, row: &TypeDefRaw) -> Result<Vec<TypeDefRaw>> {
        let mut chain = Vec::new();
        let mut current = row.rid;

        while let Some(enclosing) = self.enclosing.get(&current) {
            if chain.len() >= self.config.max_nesting_depth {
                return Err(malformed_error!(
                    "Nesting deeper than {} levels",
                    self.config.max_nesting_depth
                ));
            }

            let outer = self.typedef(*enclosing)?;
            current = outer.rid;
            chain.push(outer);
        }

        Ok(chain)
    }

    fn is_exported(&self, row: &TypeDefRaw) -> Result<bool> {
        let visibility = TypeVisibility::from_type_flags(row.flags);
        if visibility == TypeVisibility::PUBLIC {
            return Ok(true);
        }
        if visibility != TypeVisibility::NESTED_PUBLIC || !self.config.include_nested_types {
            return Ok(false);
        }

        let chain = self.enclosing_chain(row)?;
        let Some((outermost, inner)) = chain.split_last() else {
            return Ok(false);
        };

        Ok(
            TypeVisibility::from_type_flags(outermost.flags) == TypeVisibility::PUBLIC
                && inner.iter().all(|enclosing| {
                    TypeVisibility::from_type_flags(enclosing.flags)
                        == TypeVisibility::NESTED_PUBLIC
                }),
        )
    }

    /// Nested types report the namespace of their outermost enclosing type.
    fn namespace_of(&self, row: &TypeDefRaw) -> Result<&'a str> {
        let chain = self.enclosing_chain(row)?;
        let outermost = chain.last().unwrap_or(row);
        self.metadata.string(outermost.type_namespace)
    }

    fn kind_of(&self, row: &TypeDefRaw, namespace: &str, name: &str) -> Result<TypeKind> {
        let attributes = TypeAttributes::from_type_flags(row.flags);
        if attributes.contains(TypeAttributes::INTERFACE) {
            return Ok(TypeKind::Interface);
        }

        let base = match row.extends.tag {
            TableId::TypeDef | TableId::TypeRef if !row.extends.is_null() => {
                Some(self.names.qualified_name(row.extends.token)?)
            }
            _ => None,
        };

        Ok(match base {
            Some(("System", "Enum")) => TypeKind::Enum,
            Some(("System", "ValueType")) if (namespace, name) != ("System", "Enum") => {
                TypeKind::Struct
            }
            _ if attributes.is_static_container() => TypeKind::StaticContainer,
            _ => TypeKind::Class,
        })
    }

    fn type_definition(&self, row: &TypeDefRaw) -> Result<TypeDefinition> {
        let name = self.metadata.string(row.type_name)?;
        let namespace = self.namespace_of(row)?;
        let kind = self.kind_of(row, namespace, name)?;

        let mut definition = TypeDefinition::new(namespace, name, kind);
        definition.generic_parameters = self
            .generic_params
            .get(&row.token)
            .cloned()
            .unwrap_or_default();

        if kind == TypeKind::Enum {
            definition.enum_values = self.enum_values(row)?;
        }

        let context = GenericContext {
            type_params: &definition.generic_parameters,
            method_params: &[],
        };
        let mut members = Vec::new();
        for method in self.type_methods(row)? {
            if let Some(method) = self.method_definition(&method, context)? {
                members.push(MemberDefinition::Method(method));
            }
        }
        for property in self.type_properties(row)? {
            if let Some(property) = self.property_definition(&property, kind, context)? {
                members.push(MemberDefinition::Property(property));
            }
        }

        definition.members = members;
        Ok(definition)
    }

    /// Logical row count of a table that may be reordered through a pointer table.
    fn logical_rows(&self, table: TableId, pointer_table: TableId) -> u32 {
        let tables = &self.metadata.tables;
        if tables.has_table(pointer_table) {
            tables.row_count(pointer_table)
        } else {
            tables.row_count(table)
        }
    }

    /// Rows `start..next_start`, or to the end of the table for the last owner.
    ///
    /// A list that starts or ends past the table is malformed.
    fn list_range(
        &self,
        start: u32,
        next_start: Option<u32>,
        table: TableId,
        pointer_table: TableId,
    ) -> Result<Range<u32>> {
        let limit = self.logical_rows(table, pointer_table).saturating_add(1);
        let start = start.max(1);
        let end = next_start.unwrap_or(limit);
        if start > limit || end > limit {
            return Err(malformed_error!(
                "{:?} list {}..{} runs past the table ({} rows)",
                table,
                start,
                end,
                limit - 1
            ));
        }
        Ok(start..end.max(start))
    }

    fn type_methods(&self, row: &TypeDefRaw) -> Result<Vec<MethodDefRaw>> {
        let next = self.typedefs.as_ref().and_then(|table| table.get(row.rid + 1));
        let range = self.list_range(
            row.method_list,
            next.map(|next| next.method_list),
            TableId::MethodDef,
            TableId::MethodPtr,
        )?;

        let mut methods = Vec::new();
        for index in range {
            let rid = self.metadata.tables.resolve_indirection(TableId::MethodDef, index)?;
            let Some(method) = self.methods.as_ref().and_then(|table| table.get(rid)) else {
                return Err(malformed_error!("MethodDef row {} does not exist", rid));
            };
            methods.push(method);
        }
        Ok(methods)
    }

    fn type_fields(&self, row: &TypeDefRaw) -> Result<Vec<FieldRaw>> {
        let next = self.typedefs.as_ref().and_then(|table| table.get(row.rid + 1));
        let range = self.list_range(
            row.field_list,
            next.map(|next| next.field_list),
            TableId::Field,
            TableId::FieldPtr,
        )?;

        let mut fields = Vec::new();
        for index in range {
            let rid = self.metadata.tables.resolve_indirection(TableId::Field, index)?;
            let Some(field) = self.fields.as_ref().and_then(|table| table.get(rid)) else {
                return Err(malformed_error!("Field row {} does not exist", rid));
            };
            fields.push(field);
        }
        Ok(fields)
    }

    fn type_properties(&self, row: &TypeDefRaw) -> Result<Vec<PropertyRaw>> {
        let Some(maps) = &self.property_maps else {
            return Ok(Vec::new());
        };
        let Some(map) = maps.iter().find(|map| map.parent == row.rid) else {
            return Ok(Vec::new());
        };

        let next = maps.get(map.rid + 1);
        let range = self.list_range(
            map.property_list,
            next.map(|next| next.property_list),
            TableId::Property,
            TableId::PropertyPtr,
        )?;

        let mut properties = Vec::new();
        for index in range {
            let rid = self.metadata.tables.resolve_indirection(TableId::Property, index)?;
            let Some(property) = self.properties.as_ref().and_then(|table| table.get(rid)) else {
                return Err(malformed_error!("Property row {} does not exist", rid));
            };
            properties.push(property);
        }
        Ok(properties)
    }

    fn enum_values(&self, row: &TypeDefRaw) -> Result<Vec<String>> {
        let mut values = Vec::new();
        for field in self.type_fields(row)? {
            let attributes = FieldAttributes::from_field_flags(field.flags);
            if attributes.contains(FieldAttributes::STATIC | FieldAttributes::LITERAL) {
                values.push(self.metadata.string(field.name)?.to_string());
            }
        }
        Ok(values)
    }

    /// Parameter names by position, empty where the module records none.
    fn param_names(&self, method: &MethodDefRaw, count: usize) -> Result<Vec<String>> {
        let mut names = vec![String::new(); count];

        let next = self.methods.as_ref().and_then(|table| table.get(method.rid + 1));
        let range = self.list_range(
            method.param_list,
            next.map(|next| next.param_list),
            TableId::Param,
            TableId::ParamPtr,
        )?;

        for index in range {
            let rid = self.metadata.tables.resolve_indirection(TableId::Param, index)?;
            let Some(param) = self.params.as_ref().and_then(|table| table.get(rid)) else {
                return Err(malformed_error!("Param row {} does not exist", rid));
            };

            // Sequence 0 is the return value
            let Some(position) = (param.sequence as usize).checked_sub(1) else {
                continue;
            };
            if let Some(slot) = names.get_mut(position) {
                *slot = self.metadata.string(param.name)?.to_string();
            }
        }

        Ok(names)
    }

    fn method_definition(
        &self,
        method: &MethodDefRaw,
        context: GenericContext<'_>,
    ) -> Result<Option<MethodDefinition>> {
        if MethodAccessFlags::from_method_flags(method.flags) != MethodAccessFlags::PUBLIC {
            return Ok(None);
        }

        let name = self.metadata.string(method.name)?;
        if name == ".ctor" || name == ".cctor" {
            return Ok(None);
        }

        let modifiers = MethodModifiers::from_method_flags(method.flags);
        let mut definition = MethodDefinition {
            name: name.to_string(),
            return_type: TypeRef::void(),
            parameters: Vec::new(),
            is_static: modifiers.contains(MethodModifiers::STATIC),
            is_extension: self.extension_methods.contains(&method.rid),
            is_special_name: modifiers.contains(MethodModifiers::SPECIAL_NAME),
        };

        let signature = self
            .names
            .parser(method.signature)
            .and_then(|mut parser| parser.parse_method_signature());

        match signature {
            Ok(signature) => {
                let method_params = self
                    .generic_params
                    .get(&method.token)
                    .map_or(&[][..], Vec::as_slice);
                let context = GenericContext {
                    method_params,
                    ..context
                };

                let names = self.param_names(method, signature.params.len())?;
                definition.return_type = self.names.parameter_ref(&signature.return_type, context);
                definition.parameters = signature
                    .params
                    .iter()
                    .zip(names)
                    .map(|(param, name)| {
                        Parameter::new(self.names.parameter_ref(param, context), name)
                    })
                    .collect();
            }
            Err(error) => {
                definition.return_type =
                    TypeRef::unresolved(format!("signature of {}: {}", method.token, error));
            }
        }

        Ok(Some(definition))
    }

    fn accessor(
        &self,
        property: &PropertyRaw,
        role: MethodSemanticsAttributes,
    ) -> Option<MethodDefRaw> {
        let (_, method) = self
            .accessors
            .get(&property.rid)?
            .iter()
            .find(|(semantics, _)| semantics.contains(role))?;
        self.methods.as_ref()?.get(*method)
    }

    fn property_definition(
        &self,
        property: &PropertyRaw,
        kind: TypeKind,
        context: GenericContext<'_>,
    ) -> Result<Option<PropertyDefinition>> {
        let is_public = |method: &MethodDefRaw| {
            MethodAccessFlags::from_method_flags(method.flags) == MethodAccessFlags::PUBLIC
        };

        let getter = self
            .accessor(property, MethodSemanticsAttributes::GETTER)
            .filter(is_public);
        let setter = self
            .accessor(property, MethodSemanticsAttributes::SETTER)
            .filter(is_public);

        let Some(primary) = getter.as_ref().or(setter.as_ref()) else {
            return Ok(None);
        };

        let name = self.metadata.string(property.name)?;
        let modifiers = MethodModifiers::from_method_flags(primary.flags);
        let overrides = [&getter, &setter].into_iter().flatten().any(|accessor| {
            let modifiers = MethodModifiers::from_method_flags(accessor.flags);
            modifiers.contains(MethodModifiers::VIRTUAL)
                && !modifiers.contains(MethodModifiers::NEW_SLOT)
        });

        let type_ref = match self
            .names
            .parser(property.signature)
            .and_then(|mut parser| parser.parse_property_signature())
        {
            Ok(signature) => self.names.type_ref(&signature.base, context),
            Err(error) => {
                TypeRef::unresolved(format!("signature of {}: {}", property.token, error))
            }
        };

        Ok(Some(PropertyDefinition {
            name: name.to_string(),
            type_ref,
            is_readable: getter.is_some(),
            is_writable: setter.is_some(),
            is_static: modifiers.contains(MethodModifiers::STATIC),
            declaring_type_is_interface_or_override: kind == TypeKind::Interface || overrides,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{contract::format, test::*};

    fn extract(builder: &MetadataBuilder, config: LoaderConfig) -> ModuleTypes {
        let data = builder.build();
        let metadata = MetadataView::parse(&data).unwrap();
        TypeExtractor::new(&metadata, config).extract().unwrap()
    }

    fn find<'t>(module: &'t ModuleTypes, name: &str) -> &'t TypeDefinition {
        module
            .types
            .iter()
            .find(|definition| definition.name == name)
            .unwrap()
    }

    fn method<'t>(definition: &'t TypeDefinition, name: &str) -> &'t MethodDefinition {
        definition
            .members
            .iter()
            .find_map(|member| match member {
                MemberDefinition::Method(method) if method.name == name => Some(method),
                _ => None,
            })
            .unwrap()
    }

    fn property<'t>(
        definition: &'t TypeDefinition,
        name: &str,
    ) -> Option<&'t PropertyDefinition> {
        definition.members.iter().find_map(|member| match member {
            MemberDefinition::Property(property) if property.name == name => Some(property),
            _ => None,
        })
    }

    #[test]
    fn class_members() {
        let mut builder = MetadataBuilder::new();
        builder.assembly("Contoso.Shapes");
        let object = builder.type_ref("System", "Object");
        let shape = builder.type_def(PUBLIC_CLASS, "Shape", "Contoso", Some(object));
        builder.method(PUBLIC_CTOR, ".ctor", &[0x20, 0x00, 0x01]);
        let get_area = builder.method(PUBLIC_ACCESSOR, "get_Area", &[0x20, 0x00, 0x0D]);
        builder.method(PUBLIC_METHOD, "Resize", &[0x20, 0x02, 0x01, 0x0D, 0x08]);
        builder.param(1, "factor");
        builder.method(PRIVATE_METHOD, "Recalculate", &[0x20, 0x00, 0x01]);
        let area = builder.property(shape, "Area", &[0x28, 0x00, 0x0D]);
        builder.semantics(0x02, get_area, area);

        let module = extract(&builder, LoaderConfig::default());
        assert_eq!(module.module_name, "Contoso.Shapes");
        assert!(module.diagnostics.is_empty());
        assert_eq!(module.types.len(), 1);

        let shape = find(&module, "Shape");
        assert_eq!(shape.namespace, "Contoso");
        assert_eq!(shape.kind, TypeKind::Class);
        assert!(shape.is_loadable);

        let names: Vec<&str> = shape.members.iter().map(MemberDefinition::name).collect();
        assert_eq!(names, vec!["get_Area", "Resize", "Area"]);
        assert!(method(shape, "get_Area").is_special_name);

        let resize = method(shape, "Resize");
        assert!(!resize.is_static);
        assert_eq!(format(&resize.return_type), "void");
        assert_eq!(resize.parameters.len(), 2);
        assert_eq!(format(&resize.parameters[0].type_ref), "double");
        assert_eq!(resize.parameters[0].name, "factor");
        assert_eq!(format(&resize.parameters[1].type_ref), "int");
        assert_eq!(resize.parameters[1].name, "");

        let area = property(shape, "Area").unwrap();
        assert_eq!(format(&area.type_ref), "double");
        assert!(area.is_readable);
        assert!(!area.is_writable);
        assert!(!area.is_static);
        assert!(!area.declaring_type_is_interface_or_override);
    }

    #[test]
    fn type_kinds() {
        let mut builder = MetadataBuilder::new();
        let object = builder.type_ref("System", "Object");
        let value_type = builder.type_ref("System", "ValueType");
        let enumeration = builder.type_ref("System", "Enum");
        builder.type_def(PUBLIC_INTERFACE, "IShape", "Contoso", None);
        builder.type_def(PUBLIC_SEALED, "Point", "Contoso", Some(value_type));
        builder.type_def(PUBLIC_SEALED, "Color", "Contoso", Some(enumeration));
        builder.field(ENUM_VALUE_FIELD, "value__", &[0x06, 0x08]);
        builder.field(ENUM_LITERAL, "Red", &[0x06, 0x08]);
        builder.field(ENUM_LITERAL, "Green", &[0x06, 0x08]);
        builder.type_def(PUBLIC_STATIC_CLASS, "Geometry", "Contoso", Some(object));
        builder.type_def(INTERNAL_CLASS, "Cache", "Contoso", Some(object));

        let module = extract(&builder, LoaderConfig::default());
        let kinds: Vec<(&str, TypeKind)> = module
            .types
            .iter()
            .map(|definition| (definition.name.as_str(), definition.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("IShape", TypeKind::Interface),
                ("Point", TypeKind::Struct),
                ("Color", TypeKind::Enum),
                ("Geometry", TypeKind::StaticContainer),
            ]
        );
        assert_eq!(find(&module, "Color").enum_values, vec!["Red", "Green"]);
        assert!(find(&module, "Point").enum_values.is_empty());
    }

    #[test]
    fn nested_types() {
        let mut builder = MetadataBuilder::new();
        let outer = builder.type_def(PUBLIC_CLASS, "Outer", "Contoso", None);
        let inner = builder.type_def(NESTED_PUBLIC_CLASS, "Inner", "", None);
        let hidden = builder.type_def(NESTED_PRIVATE_CLASS, "Hidden", "", None);
        let secret = builder.type_def(INTERNAL_CLASS, "Secret", "Contoso", None);
        let leak = builder.type_def(NESTED_PUBLIC_CLASS, "Leak", "", None);
        builder.nested(inner, outer);
        builder.nested(hidden, outer);
        builder.nested(leak, secret);

        let module = extract(&builder, LoaderConfig::default());
        let names: Vec<&str> = module.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Outer", "Inner"]);
        assert_eq!(find(&module, "Inner").namespace, "Contoso");

        let module = extract(&builder, LoaderConfig::minimal());
        let names: Vec<&str> = module.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Outer"]);
    }

    #[test]
    fn nesting_cycle() {
        let mut builder = MetadataBuilder::new();
        let first = builder.type_def(NESTED_PUBLIC_CLASS, "First", "", None);
        let second = builder.type_def(NESTED_PUBLIC_CLASS, "Second", "", None);
        builder.nested(first, second);
        builder.nested(second, first);

        let config = LoaderConfig {
            max_nesting_depth: 4,
            ..LoaderConfig::default()
        };
        let module = extract(&builder, config);
        assert_eq!(module.types.len(), 2);
        assert!(module.types.iter().all(|definition| !definition.is_loadable));
        assert_eq!(module.diagnostics.len(), 2);
    }

    #[test]
    fn extension_methods() {
        let mut builder = MetadataBuilder::new();
        let object = builder.type_ref("System", "Object");
        let attribute =
            builder.type_ref("System.Runtime.CompilerServices", "ExtensionAttribute");
        let constructor = builder.member_ref(attribute, ".ctor", &[0x20, 0x00, 0x01]);
        let holder =
            builder.type_def(PUBLIC_STATIC_CLASS, "StringExtensions", "Contoso", Some(object));
        let shout = builder.method(PUBLIC_STATIC_METHOD, "Shout", &[0x00, 0x01, 0x0E, 0x0E]);
        builder.param(1, "value");
        builder.method(PUBLIC_STATIC_METHOD, "Helper", &[0x00, 0x00, 0x01]);
        builder.custom_attribute(holder, constructor);
        builder.custom_attribute(shout, constructor);

        let module = extract(&builder, LoaderConfig::default());
        let holder = find(&module, "StringExtensions");
        assert_eq!(holder.kind, TypeKind::StaticContainer);

        let shout = method(holder, "Shout");
        assert!(shout.is_static);
        assert!(shout.is_extension);
        assert_eq!(format(&shout.return_type), "string");
        assert_eq!(shout.parameters[0].name, "value");
        assert!(!method(holder, "Helper").is_extension);
    }

    #[test]
    fn generic_types_and_methods() {
        let mut builder = MetadataBuilder::new();
        let object = builder.type_ref("System", "Object");
        let boxed = builder.type_def(PUBLIC_CLASS, "Box`1", "Contoso", Some(object));
        builder.method(PUBLIC_METHOD, "Get", &[0x20, 0x00, 0x13, 0x00]);
        // TOut Map<TOut>(T)
        let map = builder.method(
            PUBLIC_METHOD,
            "Map",
            &[0x30, 0x01, 0x01, 0x1E, 0x00, 0x13, 0x00],
        );
        builder.generic_param(0, boxed, "T");
        builder.generic_param(0, map, "TOut");

        let module = extract(&builder, LoaderConfig::default());
        let boxed = find(&module, "Box`1");
        assert_eq!(boxed.generic_parameters, vec!["T"]);
        assert_eq!(format(&method(boxed, "Get").return_type), "T");

        let map = method(boxed, "Map");
        assert_eq!(format(&map.return_type), "TOut");
        assert_eq!(format(&map.parameters[0].type_ref), "T");
    }

    #[test]
    fn property_accessors() {
        let mut builder = MetadataBuilder::new();
        let object = builder.type_ref("System", "Object");
        let shape = builder.type_def(PUBLIC_INTERFACE, "IShape", "Contoso", None);
        let get_name = builder.method(PUBLIC_ACCESSOR, "get_Name", &[0x20, 0x00, 0x0E]);
        let circle = builder.type_def(PUBLIC_CLASS, "Circle", "Contoso", Some(object));
        let get_radius =
            builder.method(PUBLIC_OVERRIDE_ACCESSOR, "get_Radius", &[0x20, 0x00, 0x0D]);
        let get_count =
            builder.method(PUBLIC_STATIC_ACCESSOR, "get_Count", &[0x00, 0x00, 0x08]);
        let get_label = builder.method(PRIVATE_ACCESSOR, "get_Label", &[0x20, 0x00, 0x0E]);
        let set_label =
            builder.method(PUBLIC_ACCESSOR, "set_Label", &[0x20, 0x01, 0x01, 0x0E]);
        let get_secret = builder.method(PRIVATE_ACCESSOR, "get_Secret", &[0x20, 0x00, 0x0E]);

        let name = builder.property(shape, "Name", &[0x28, 0x00, 0x0E]);
        let radius = builder.property(circle, "Radius", &[0x28, 0x00, 0x0D]);
        let count = builder.property(circle, "Count", &[0x08, 0x00, 0x08]);
        let label = builder.property(circle, "Label", &[0x28, 0x00, 0x0E]);
        let secret = builder.property(circle, "Secret", &[0x28, 0x00, 0x0E]);
        builder.semantics(0x02, get_name, name);
        builder.semantics(0x02, get_radius, radius);
        builder.semantics(0x02, get_count, count);
        builder.semantics(0x02, get_label, label);
        builder.semantics(0x01, set_label, label);
        builder.semantics(0x02, get_secret, secret);

        let module = extract(&builder, LoaderConfig::default());

        let name = property(find(&module, "IShape"), "Name").unwrap();
        assert!(name.declaring_type_is_interface_or_override);
        assert_eq!(format(&name.type_ref), "string");

        let circle = find(&module, "Circle");
        assert!(property(circle, "Radius").unwrap().declaring_type_is_interface_or_override);

        let count = property(circle, "Count").unwrap();
        assert!(count.is_static);
        assert!(!count.declaring_type_is_interface_or_override);

        let label = property(circle, "Label").unwrap();
        assert!(!label.is_readable);
        assert!(label.is_writable);

        assert!(property(circle, "Secret").is_none());
    }

    #[test]
    fn unloadable_types() {
        let mut builder = MetadataBuilder::new();
        let object = builder.type_ref("System", "Object");
        let missing = Token::new(0x0100_0009);
        builder.type_def(PUBLIC_CLASS, "Broken", "Contoso", Some(missing));
        builder.type_def(PUBLIC_CLASS, "Partial", "Contoso", Some(object));
        builder.method(PUBLIC_METHOD, "Truncated", &[0x20, 0x01]);

        let module = extract(&builder, LoaderConfig::default());
        assert_eq!(module.types.len(), 2);

        let broken = find(&module, "Broken");
        assert!(!broken.is_loadable);
        assert_eq!(module.diagnostics.len(), 1);
        assert!(module.diagnostics[0].starts_with("Contoso.Broken could not be loaded: "));

        let partial = find(&module, "Partial");
        assert!(partial.is_loadable);
        assert!(method(partial, "Truncated").return_type.unresolved.is_some());
    }

    #[test]
    fn extension_attribute_through_method_pointers() {
        let mut builder = MetadataBuilder::new();
        let holder = builder.type_def(PUBLIC_STATIC_CLASS, "Helpers", "Contoso", None);
        // Physical row 1, logical row 2: owned by ExtensionAttribute
        let constructor = builder.method(PUBLIC_CTOR, ".ctor", &[0x20, 0x00, 0x01]);
        builder.type_def(
            PUBLIC_CLASS,
            "ExtensionAttribute",
            "System.Runtime.CompilerServices",
            None,
        );
        // Physical row 2, logical row 1: owned by Helpers
        let touch = builder.method(PUBLIC_STATIC_METHOD, "Touch", &[0x00, 0x00, 0x01]);
        builder.method_ptr(touch);
        builder.method_ptr(constructor);
        builder.custom_attribute(holder, constructor);
        builder.custom_attribute(touch, constructor);

        let module = extract(&builder, LoaderConfig::default());
        assert!(module.diagnostics.is_empty());

        let helpers = find(&module, "Helpers");
        assert_eq!(helpers.kind, TypeKind::StaticContainer);
        assert!(method(helpers, "Touch").is_extension);

        let attribute = find(&module, "ExtensionAttribute");
        assert!(attribute.members.is_empty());
    }

    #[test]
    fn list_past_table_end() {
        let mut builder = MetadataBuilder::new();
        let enumeration = builder.type_ref("System", "Enum");
        builder.type_def(PUBLIC_SEALED, "Color", "Contoso", Some(enumeration));
        // Past 0xFFFF rows the Field index is 4 bytes wide
        for _ in 0..70_000 {
            builder.field(ENUM_LITERAL, "Red", &[0x06, 0x08]);
        }
        let tail = builder.type_def(PUBLIC_CLASS, "Tail", "Contoso", None);
        builder.patch(tail, 4, 0xFFFF_FFF0);

        let module = extract(&builder, LoaderConfig::default());
        assert_eq!(module.types.len(), 2);

        let color = find(&module, "Color");
        assert!(!color.is_loadable);
        assert!(color.enum_values.is_empty());
        assert_eq!(module.diagnostics.len(), 1);
        assert!(module.diagnostics[0].starts_with("Contoso.Color could not be loaded: "));
        assert!(module.diagnostics[0].contains("runs past the table"));

        assert!(find(&module, "Tail").is_loadable);
    }

    #[test]
    fn module_name_fallback() {
        let builder = MetadataBuilder::new();
        assert_eq!(extract(&builder, LoaderConfig::default()).module_name, "Test");

        let mut builder = MetadataBuilder::new();
        builder.module("Tools.EXE");
        assert_eq!(extract(&builder, LoaderConfig::default()).module_name, "Tools");

        let mut builder = MetadataBuilder::new();
        builder.module("library");
        let module = extract(&builder, LoaderConfig::default());
        assert_eq!(module.module_name, "library");
        assert!(module.types.is_empty());
    }
}
