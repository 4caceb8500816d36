//! End-to-end contract rendering through the public API.

use std::path::{Path, PathBuf};

use dotcontract::{
    format, render, render_all, render_file, Error, InMemoryProvider, MemberDefinition,
    MetadataProvider, MethodDefinition, ModuleTypes, Parameter, PropertyDefinition,
    TypeDefinition, TypeKind, TypeRef,
};

fn property(name: &str, type_name: &str, readable: bool, writable: bool) -> MemberDefinition {
    MemberDefinition::Property(PropertyDefinition {
        name: name.to_string(),
        type_ref: TypeRef::new(type_name),
        is_readable: readable,
        is_writable: writable,
        is_static: false,
        declaring_type_is_interface_or_override: false,
    })
}

fn method(name: &str, return_type: &str, parameters: Vec<Parameter>) -> MethodDefinition {
    MethodDefinition {
        name: name.to_string(),
        return_type: TypeRef::new(return_type),
        parameters,
        is_static: false,
        is_extension: false,
        is_special_name: false,
    }
}

fn class(name: &str, members: Vec<MemberDefinition>) -> TypeDefinition {
    let mut definition = TypeDefinition::new("Contoso", name, TypeKind::Class);
    definition.members = members;
    definition
}

fn enumeration(name: &str, values: &[&str]) -> TypeDefinition {
    let mut definition = TypeDefinition::new("Contoso", name, TypeKind::Enum);
    definition.enum_values = values.iter().map(|value| value.to_string()).collect();
    definition
}

fn render_module(module: ModuleTypes) -> String {
    let provider = InMemoryProvider::new().with_module("Module.dll", module);
    render_file(Path::new("Module.dll"), &provider).unwrap()
}

fn mixed_module() -> ModuleTypes {
    let mut module = ModuleTypes::new("Contoso.Mixed");
    module.types = vec![
        class(
            "Zeta",
            vec![
                MemberDefinition::Method(method("Run", "Void", vec![])),
                property("Name", "String", true, false),
                MemberDefinition::Method(method("Equals", "Boolean", vec![])),
                MemberDefinition::Method(method("Apply", "Int32", vec![])),
            ],
        ),
        class("Alpha", vec![property("Count", "Int32", true, true)]),
        TypeDefinition::new("Contoso", "IMarker", TypeKind::Interface),
        TypeDefinition::new("Contoso", "Point", TypeKind::Struct),
        enumeration("Mode", &["Zero", "Alpha", "Middle"]),
    ];
    module
}

#[test]
fn determinism() {
    let provider = InMemoryProvider::new().with_module("Mixed.dll", mixed_module());
    let handle = provider.load_module(Path::new("Mixed.dll")).unwrap();

    let first = render(&handle, &provider).unwrap();
    let second = render(&handle, &provider).unwrap();
    assert_eq!(first, second);
}

#[test]
fn ordering() {
    let contract = render_module(mixed_module());

    let headings: Vec<&str> = contract
        .lines()
        .filter(|line| line.starts_with("## ") || line.starts_with("### "))
        .collect();
    assert_eq!(
        headings,
        vec![
            "## Interfaces",
            "### IMarker",
            "## Classes",
            "### Alpha",
            "### Zeta",
            "## Structs",
            "### Point",
            "## Enums",
            "### Mode",
        ]
    );

    let zeta = contract.split("### Zeta\n").nth(1).unwrap();
    let properties = zeta.find("// Properties").unwrap();
    let methods = zeta.find("// Methods").unwrap();
    assert!(properties < methods);
    let apply = zeta.find("public int Apply();").unwrap();
    assert!(apply < zeta.find("public void Run();").unwrap());

    // declaration order, not name order
    assert!(contract.contains("### Mode\n```csharp\nZero,\nAlpha,\nMiddle,\n```\n"));
}

#[test]
fn excluded_members_never_render() {
    let excluded = ["Equals", "GetHashCode", "GetType", "ToString", "Clone", "<Clone>"];
    let members = excluded
        .iter()
        .map(|name| MemberDefinition::Method(method(name, "Object", vec![])))
        .chain([MemberDefinition::Method(method("Keep", "Object", vec![]))])
        .collect();

    let mut module = ModuleTypes::new("Contoso.Records");
    module.types.push(class("Record", members));
    let contract = render_module(module);

    for name in excluded {
        assert!(!contract.contains(&format!(" {name}(")), "{name} rendered");
    }
    assert!(contract.contains("public object Keep();"));
}

#[test]
fn accessor_visibility() {
    let mut module = ModuleTypes::new("Contoso.Access");
    module.types.push(class(
        "Account",
        vec![
            property("Both", "Int32", true, true),
            property("Hidden", "Int32", false, false),
            property("ReadOnly", "Int32", true, false),
            property("WriteOnly", "Int32", false, true),
        ],
    ));
    let contract = render_module(module);

    assert!(contract.contains("public int Both { get; set; }\n"));
    assert!(contract.contains("public int Hidden { }\n"));
    assert!(contract.contains("public int ReadOnly { get; }\n"));
    assert!(contract.contains("public int WriteOnly { set; }\n"));
}

#[test]
fn generic_formatting() {
    let list = TypeRef::generic("List`1", vec![TypeRef::new("Int32")]);
    assert_eq!(format(&list), "List<int>");

    let dictionary = TypeRef::generic("Dictionary`2", vec![TypeRef::new("String"), list]);
    assert_eq!(format(&dictionary), "Dictionary<string, List<int>>");

    let mut cache = TypeDefinition::new("Contoso", "Cache`2", TypeKind::Class);
    cache.generic_parameters = vec!["TKey".to_string(), "TValue".to_string()];
    cache.members = vec![MemberDefinition::Method(MethodDefinition {
        return_type: dictionary,
        ..method("Snapshot", "", vec![])
    })];

    let mut module = ModuleTypes::new("Contoso.Caching");
    module.types.push(cache);
    let contract = render_module(module);

    assert!(contract.contains("### Cache<TKey, TValue>\n"));
    assert!(contract.contains("public Dictionary<string, List<int>> Snapshot();"));
}

#[test]
fn degradation() {
    let mut module = ModuleTypes::new("Contoso.Partial");
    module.types = vec![
        class("First", vec![]),
        TypeDefinition::unloadable("Contoso", "X"),
        class("Second", vec![]),
    ];
    module.diagnostics = vec!["X could not be loaded: missing dependency".to_string()];

    let contract = render_module(module);
    let diagnostics: Vec<&str> = contract.lines().filter(|line| line.starts_with("- ")).collect();
    assert_eq!(diagnostics, vec!["- X could not be loaded: missing dependency"]);
    assert!(contract.starts_with(
        "# Module: Contoso.Partial\n\n\
         Some types could not be loaded:\n\
         - X could not be loaded: missing dependency\n\n"
    ));
    assert!(contract.contains("### First\n"));
    assert!(contract.contains("### Second\n"));
    assert!(!contract.contains("### X\n"));
}

#[test]
fn extension_methods() {
    let mut helpers = TypeDefinition::new("Contoso", "BarExtensions", TypeKind::StaticContainer);
    helpers.members = vec![MemberDefinition::Method(MethodDefinition {
        is_static: true,
        is_extension: true,
        ..method(
            "Foo",
            "Void",
            vec![
                Parameter::new(TypeRef::new("Bar"), "b"),
                Parameter::new(TypeRef::new("Int32"), "x"),
            ],
        )
    })];

    let mut module = ModuleTypes::new("Contoso.Extensions");
    module.types.push(helpers);
    let contract = render_module(module);

    assert_eq!(
        contract,
        "# Module: Contoso.Extensions\n\n\
         ## Extension Methods\n\
         public void Foo(this Bar b, int x);\n"
    );
    assert!(!contract.contains("static"));
    assert!(!contract.contains("## Classes"));
}

#[test]
fn empty_buckets_have_no_heading() {
    let mut module = ModuleTypes::new("Contoso.Enums");
    module.types = vec![enumeration("Color", &["Red", "Green"])];

    let contract = render_module(module);
    assert_eq!(
        contract,
        "# Module: Contoso.Enums\n\n## Enums\n### Color\n```csharp\nRed,\nGreen,\n```\n\n"
    );
}

#[test]
fn unresolved_members_are_dropped() {
    let broken = MethodDefinition {
        return_type: TypeRef::unresolved("TypeRef 0x01000042 does not exist"),
        ..method("Broken", "", vec![])
    };
    let mut module = ModuleTypes::new("Contoso.Unresolved");
    module.types.push(class(
        "Widget",
        vec![
            MemberDefinition::Method(broken),
            MemberDefinition::Method(method("Draw", "Void", vec![])),
        ],
    ));

    let contract = render_module(module);
    assert!(!contract.contains("Broken"));
    assert!(contract.contains("public void Draw();"));
}

#[test]
fn render_all_keeps_input_order() {
    let mut provider = InMemoryProvider::new();
    for name in ["C", "A", "B"] {
        provider.insert(format!("{name}.dll"), ModuleTypes::new(name));
    }

    let paths: Vec<PathBuf> = ["C.dll", "Missing.dll", "A.dll", "B.dll"]
        .iter()
        .map(PathBuf::from)
        .collect();
    let results = render_all(&paths, &provider);

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].as_deref().unwrap(), "# Module: C\n\n");
    assert!(matches!(
        &results[1],
        Err(Error::ModuleLoad { path, .. }) if path == Path::new("Missing.dll")
    ));
    assert_eq!(results[2].as_deref().unwrap(), "# Module: A\n\n");
    assert_eq!(results[3].as_deref().unwrap(), "# Module: B\n\n");
}

#[test]
fn load_failure_renders_nothing() {
    let provider = InMemoryProvider::new();
    let error = render_file(Path::new("Nowhere.dll"), &provider).unwrap_err();
    assert!(error.is_load_failure());
    assert!(matches!(error, Error::ModuleLoad { .. }));
}
