//! ECMA-335 metadata tables.
//!
//! Row layouts for every table are known through [`TableId::columns`], which is what the tables
//! header uses to locate each table inside the `#~` stream. Typed row readers exist for the
//! tables that carry a module's public surface:
//!
//! | Table | Row type | Used for |
//! |-------|----------|----------|
//! | `Module` | [`ModuleRaw`] | module name |
//! | `TypeRef` | [`TypeRefRaw`] | names of external types |
//! | `TypeDef` | [`TypeDefRaw`] | defined types, their field and method runs |
//! | `Field` | [`FieldRaw`] | enum values |
//! | `MethodDef` | [`MethodDefRaw`] | methods and accessors |
//! | `Param` | [`ParamRaw`] | parameter names |
//! | `MemberRef` | [`MemberRefRaw`] | attribute constructors |
//! | `CustomAttribute` | [`CustomAttributeRaw`] | extension method detection |
//! | `PropertyMap` | [`PropertyMapRaw`] | property runs |
//! | `Property` | [`PropertyRaw`] | properties |
//! | `MethodSemantics` | [`MethodSemanticsRaw`] | property accessors |
//! | `TypeSpec` | [`TypeSpecRaw`] | constructed base and signature types |
//! | `Assembly` | [`AssemblyRaw`] | assembly name |
//! | `NestedClass` | [`NestedClassRaw`] | enclosing types |
//! | `GenericParam` | [`GenericParamRaw`] | generic parameter names |

mod assembly;
mod customattribute;
mod field;
mod genericparam;
mod memberref;
mod methoddef;
mod methodsemantics;
mod module;
mod nestedclass;
mod param;
mod property;
mod propertymap;
mod typedef;
mod typeref;
mod typespec;
mod types;

pub use assembly::AssemblyRaw;
pub use customattribute::CustomAttributeRaw;
pub use field::FieldRaw;
pub use genericparam::GenericParamRaw;
pub use memberref::MemberRefRaw;
pub use methoddef::MethodDefRaw;
pub use methodsemantics::MethodSemanticsRaw;
pub use module::ModuleRaw;
pub use nestedclass::NestedClassRaw;
pub use param::ParamRaw;
pub use property::PropertyRaw;
pub use propertymap::PropertyMapRaw;
pub use typedef::TypeDefRaw;
pub use typeref::TypeRefRaw;
pub use typespec::TypeSpecRaw;
pub use types::*;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn assert_schema<T: RowReadable>(sizes: &TableInfoRef) {
        assert_eq!(
            T::row_size(sizes),
            sizes.row_size(T::TABLE_ID),
            "{:?}",
            T::TABLE_ID
        );
    }

    fn check_all(sizes: &TableInfoRef) {
        assert_schema::<ModuleRaw>(sizes);
        assert_schema::<TypeRefRaw>(sizes);
        assert_schema::<TypeDefRaw>(sizes);
        assert_schema::<FieldRaw>(sizes);
        assert_schema::<MethodDefRaw>(sizes);
        assert_schema::<ParamRaw>(sizes);
        assert_schema::<MemberRefRaw>(sizes);
        assert_schema::<CustomAttributeRaw>(sizes);
        assert_schema::<PropertyMapRaw>(sizes);
        assert_schema::<PropertyRaw>(sizes);
        assert_schema::<MethodSemanticsRaw>(sizes);
        assert_schema::<TypeSpecRaw>(sizes);
        assert_schema::<AssemblyRaw>(sizes);
        assert_schema::<NestedClassRaw>(sizes);
        assert_schema::<GenericParamRaw>(sizes);
    }

    #[test]
    fn row_readers_match_schema() {
        check_all(&Arc::new(TableInfo::new_test(&[], false, false, false)));
        check_all(&Arc::new(TableInfo::new_test(&[], true, true, true)));
        check_all(&Arc::new(TableInfo::new_test(
            &[
                (TableId::TypeDef, 0x1_0000),
                (TableId::MethodDef, 0x8000),
                (TableId::Property, 0x2_0000),
                (TableId::GenericParam, 0x4000),
                (TableId::MemberRef, 0x3000),
            ],
            false,
            true,
            false,
        )));
    }
}
