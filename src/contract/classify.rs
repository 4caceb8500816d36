//! Partitioning of a module's types into contract categories.

use std::cmp::Ordering;

use strum::{AsRefStr, Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::contract::model::{
    MemberDefinition, MethodDefinition, PropertyDefinition, TypeDefinition, TypeKind,
};

/// Member names that never appear in a contract.
pub const EXCLUDED_MEMBER_NAMES: [&str; 6] = [
    "Equals",
    "GetHashCode",
    "GetType",
    "ToString",
    "Clone",
    "<Clone>",
];

/// A contract section, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Display, AsRefStr)]
pub enum Category {
    /// Interfaces
    Interfaces,
    /// Classes that are not static containers
    Classes,
    /// Value types that are not enums
    Structs,
    /// Enumerations
    Enums,
    /// Static containers holding at least one extension method
    #[strum(serialize = "Extension Methods")]
    ExtensionMethods,
}

/// A type that made it into a category, with its members filtered and sorted.
#[derive(Debug, Clone)]
pub struct ClassifiedType<'a> {
    /// The type itself
    pub definition: &'a TypeDefinition,
    /// Properties ascending by name
    pub properties: Vec<&'a PropertyDefinition>,
    /// Methods ascending by name; only extension methods for [`Category::ExtensionMethods`]
    pub methods: Vec<&'a MethodDefinition>,
}

/// The outcome of [`classify`].
#[derive(Debug, Clone)]
pub struct ClassifiedResult<'a> {
    /// Load diagnostics, verbatim and in order
    pub diagnostics: &'a [String],
    buckets: [Vec<ClassifiedType<'a>>; Category::COUNT],
}

impl<'a> ClassifiedResult<'a> {
    /// The types of one category in output order.
    #[must_use]
    pub fn bucket(&self, category: Category) -> &[ClassifiedType<'a>] {
        &self.buckets[category as usize]
    }

    /// Non-empty categories in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ClassifiedType<'a>])> {
        Category::iter()
            .map(|category| (category, self.bucket(category)))
            .filter(|(_, types)| !types.is_empty())
    }

    /// Returns `true` if no category holds a type.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

/// Returns `true` if `name` is one of [`EXCLUDED_MEMBER_NAMES`].
#[must_use]
pub fn is_excluded(name: &str) -> bool {
    EXCLUDED_MEMBER_NAMES.contains(&name)
}

fn category_of(definition: &TypeDefinition, methods: &[&MethodDefinition]) -> Option<Category> {
    match definition.kind {
        TypeKind::Interface => Some(Category::Interfaces),
        TypeKind::Class => Some(Category::Classes),
        TypeKind::Struct => Some(Category::Structs),
        TypeKind::Enum => Some(Category::Enums),
        TypeKind::StaticContainer => methods
            .iter()
            .any(|method| method.is_static && method.is_extension)
            .then_some(Category::ExtensionMethods),
    }
}

fn by_name_then_namespace(left: &ClassifiedType<'_>, right: &ClassifiedType<'_>) -> Ordering {
    left.definition
        .name
        .cmp(&right.definition.name)
        .then_with(|| left.definition.namespace.cmp(&right.definition.namespace))
}

/// Sort `types` into categories and filter their members.
///
/// Unloadable types are left out; their messages are expected in `diagnostics`. Members named in
/// [`EXCLUDED_MEMBER_NAMES`] and special-name methods are dropped. A static container lands in
/// [`Category::ExtensionMethods`] with only its extension methods, or nowhere at all.
#[must_use]
pub fn classify<'a>(types: &'a [TypeDefinition], diagnostics: &'a [String]) -> ClassifiedResult<'a> {
    let mut buckets: [Vec<ClassifiedType<'a>>; Category::COUNT] = Default::default();

    for definition in types.iter().filter(|definition| definition.is_loadable) {
        let mut properties = Vec::new();
        let mut methods = Vec::new();

        for member in &definition.members {
            if is_excluded(member.name()) || member.is_special_name() {
                continue;
            }

            match member {
                MemberDefinition::Property(property) => properties.push(property),
                MemberDefinition::Method(method) => methods.push(method),
            }
        }

        let Some(category) = category_of(definition, &methods) else {
            continue;
        };

        if category == Category::ExtensionMethods {
            properties.clear();
            methods.retain(|method| method.is_static && method.is_extension);
        }

        // Stable, so overloads keep declaration order
        properties.sort_by(|left, right| left.name.cmp(&right.name));
        methods.sort_by(|left, right| left.name.cmp(&right.name));

        buckets[category as usize].push(ClassifiedType {
            definition,
            properties,
            methods,
        });
    }

    for bucket in &mut buckets {
        bucket.sort_by(by_name_then_namespace);
    }

    ClassifiedResult {
        diagnostics,
        buckets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::{Parameter, TypeRef};

    fn method_def(name: &str) -> MethodDefinition {
        MethodDefinition {
            name: name.to_string(),
            return_type: TypeRef::void(),
            parameters: Vec::new(),
            is_static: false,
            is_extension: false,
            is_special_name: false,
        }
    }

    fn method(name: &str) -> MemberDefinition {
        MemberDefinition::Method(method_def(name))
    }

    fn extension(name: &str) -> MemberDefinition {
        MemberDefinition::Method(MethodDefinition {
            name: name.to_string(),
            return_type: TypeRef::void(),
            parameters: vec![Parameter::new(TypeRef::new("String"), "value")],
            is_static: true,
            is_extension: true,
            is_special_name: false,
        })
    }

    fn names(result: &ClassifiedResult<'_>, category: Category) -> Vec<String> {
        result
            .bucket(category)
            .iter()
            .map(|classified| classified.definition.full_name())
            .collect()
    }

    #[test]
    fn category_headings() {
        let headings: Vec<String> = Category::iter().map(|category| category.to_string()).collect();
        assert_eq!(
            headings,
            vec!["Interfaces", "Classes", "Structs", "Enums", "Extension Methods"]
        );
        assert_eq!(Category::ExtensionMethods.as_ref(), "Extension Methods");
    }

    #[test]
    fn buckets_are_sorted_by_name_then_namespace() {
        let types = vec![
            TypeDefinition::new("B", "Shape", TypeKind::Class),
            TypeDefinition::new("A", "Shape", TypeKind::Class),
            TypeDefinition::new("A", "Circle", TypeKind::Class),
            TypeDefinition::new("A", "IShape", TypeKind::Interface),
            TypeDefinition::new("A", "Point", TypeKind::Struct),
            TypeDefinition::new("A", "Color", TypeKind::Enum),
            TypeDefinition::new("A", "circle", TypeKind::Class),
        ];
        let result = classify(&types, &[]);

        assert_eq!(
            names(&result, Category::Classes),
            vec!["A.Circle", "A.Shape", "B.Shape", "A.circle"]
        );
        assert_eq!(names(&result, Category::Interfaces), vec!["A.IShape"]);
        assert_eq!(names(&result, Category::Structs), vec!["A.Point"]);
        assert_eq!(names(&result, Category::Enums), vec!["A.Color"]);
        assert!(result.bucket(Category::ExtensionMethods).is_empty());
    }

    #[test]
    fn members_are_filtered_and_sorted() {
        let mut circle = TypeDefinition::new("A", "Circle", TypeKind::Class);
        for name in ["Scale", "ToString", "Area", "GetHashCode", "<Clone>", "Clone", "Equals"] {
            circle.members.push(method(name));
        }
        circle.members.push(MemberDefinition::Method(MethodDefinition {
            is_special_name: true,
            ..method_def("op_Equality")
        }));
        let types = vec![circle];

        let result = classify(&types, &[]);
        let classified = &result.bucket(Category::Classes)[0];
        let methods: Vec<&str> = classified.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, vec!["Area", "Scale"]);
    }

    #[test]
    fn static_containers() {
        let mut extensions = TypeDefinition::new("A", "StringExtensions", TypeKind::StaticContainer);
        extensions.members.push(extension("Shout"));
        extensions.members.push(method("Helper"));

        let mut helpers = TypeDefinition::new("A", "Helpers", TypeKind::StaticContainer);
        helpers.members.push(method("Helper"));

        let types = vec![extensions, helpers];
        let result = classify(&types, &[]);

        assert_eq!(
            names(&result, Category::ExtensionMethods),
            vec!["A.StringExtensions"]
        );
        assert!(result.bucket(Category::Classes).is_empty());

        let classified = &result.bucket(Category::ExtensionMethods)[0];
        assert_eq!(classified.methods.len(), 1);
        assert_eq!(classified.methods[0].name, "Shout");
    }

    #[test]
    fn unloadable_types_are_dropped() {
        let types = vec![
            TypeDefinition::new("A", "Circle", TypeKind::Class),
            TypeDefinition::unloadable("A", "Broken"),
        ];
        let diagnostics = vec!["A.Broken could not be loaded: missing dependency".to_string()];
        let result = classify(&types, &diagnostics);

        assert_eq!(names(&result, Category::Classes), vec!["A.Circle"]);
        assert_eq!(result.diagnostics, diagnostics.as_slice());
        assert_eq!(result.iter().count(), 1);
        assert!(!result.is_empty());
        assert!(classify(&[], &[]).is_empty());
    }
}
