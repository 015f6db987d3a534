use eyre::Result;
use hollow_core::{ClassDecl, ClassRegistry, FieldDecl, FieldType, ModelError, TypeModel};
use hollow_emit::{EmitError, EmitOptions, NameResolver, SourceEmitter, generate};

use crate::model;

fn unsupported_reason(type_name: &str, options: &EmitOptions) -> String {
    match generate(&model(), type_name, options) {
        Err(EmitError::UnsupportedType { type_name: name, reason }) => {
            assert_eq!(name, type_name);
            reason
        }
        other => panic!("{type_name}: expected an unsupported type, got {other:?}"),
    }
}

#[test]
fn types_without_buildable_instances_are_rejected() {
    hollow_testhelpers::setup();

    let options = EmitOptions::new();
    for (type_name, reason) in [
        ("int", "it is not a class"),
        ("java.lang.String[]", "it is not a class"),
        ("com.example.Named", "interfaces have no instances of their own"),
        ("com.example.Marker", "annotation interfaces have no instances of their own"),
        ("com.example.Color", "enum instances are fixed to their constants"),
        ("com.example.Pair", "record fields cannot be written after allocation"),
        ("com.example.Shape", "abstract classes cannot be allocated"),
        ("com.example.Outer$Secret", "private classes cannot be referenced from a builder"),
        ("com.example.Outer$1", "anonymous and local classes have no usable name"),
    ] {
        assert_eq!(unsupported_reason(type_name, &options), reason, "{type_name}");
    }
}

#[test]
fn classes_nested_in_private_classes_are_rejected() {
    hollow_testhelpers::setup();

    let reason = unsupported_reason("com.example.Outer$Secret$Inner", &EmitOptions::new());
    assert_eq!(reason, "it is nested inside private class com.example.Outer$Secret");
}

#[test]
fn unreachable_targets_are_rejected() {
    hollow_testhelpers::setup();

    let elsewhere = EmitOptions::new().package("com.generated");
    assert_eq!(
        unsupported_reason("com.example.Internal", &elsewhere),
        "package-private classes are only reachable from package com.example, not from com.generated"
    );
    assert_eq!(
        unsupported_reason("Legacy", &elsewhere),
        "default-package classes cannot be referenced from package com.generated"
    );
}

#[test]
fn package_private_targets_work_in_their_own_package() -> Result<()> {
    hollow_testhelpers::setup();

    let source = generate(&model(), "com.example.Internal", &EmitOptions::new())?;
    assert!(source.contains("public InternalBuilder setSecret(int secret) {"));
    Ok(())
}

#[test]
fn setters_naming_inaccessible_classes_are_rejected() -> Result<()> {
    hollow_testhelpers::setup();

    assert_eq!(
        unsupported_reason("com.example.Leaky", &EmitOptions::new()),
        "field com.example.Leaky.secret refers to a class the builder cannot name: \
         com.example.Outer$Secret is private"
    );

    // same package: package-private classes may be named
    let source = generate(&model(), "com.example.Exposed", &EmitOptions::new())?;
    assert!(source.contains("public ExposedBuilder setInternals(List<Internal> internals) {"));

    let elsewhere = EmitOptions::new().package("com.generated");
    assert_eq!(
        unsupported_reason("com.example.Exposed", &elsewhere),
        "field com.example.Exposed.internals refers to a class the builder cannot name: \
         com.example.Internal is package-private in package com.example"
    );
    assert_eq!(
        unsupported_reason("com.example.Bounded", &elsewhere),
        "type parameter T refers to a class the builder cannot name: \
         com.example.Internal is package-private in package com.example"
    );
    assert!(generate(&model(), "com.example.Bounded", &EmitOptions::new()).is_ok());
    Ok(())
}

#[test]
fn missing_metadata_is_reported_as_unsupported() {
    hollow_testhelpers::setup();

    let err = generate(&model(), "com.example.Missing", &EmitOptions::new()).unwrap_err();
    assert!(matches!(err, EmitError::Model(ModelError::NoMetadata { .. })));
    assert_eq!(err.kind(), "unsupported-type");
}

#[test]
fn invalid_options_are_rejected() {
    hollow_testhelpers::setup();

    for (options, option, value) in [
        (EmitOptions::new().builder_name("1st"), "builder name", "1st"),
        (EmitOptions::new().builder_name("class"), "builder name", "class"),
        (EmitOptions::new().package("com..generated"), "package", "com..generated"),
        (EmitOptions::new().package("com.new"), "package", "com.new"),
        (EmitOptions::new().builder_name("Point"), "builder name", "Point"),
    ] {
        match generate(&model(), "com.example.Point", &options) {
            Err(EmitError::InvalidOption {
                option: rejected,
                value: rejected_value,
                ..
            }) => {
                assert_eq!(rejected, option);
                assert_eq!(rejected_value, value);
            }
            other => panic!("{options:?}: expected an invalid option, got {other:?}"),
        }
    }
}

#[test]
fn plans_must_belong_to_the_descriptor() -> Result<()> {
    hollow_testhelpers::setup();

    let model = model();
    let point = model.describe("com.example.Point")?;
    let derived = model.describe("com.example.Derived")?;
    let base = model.describe("com.example.Base")?;
    let emitter = SourceEmitter::default();

    let err = emitter
        .emit(&derived, &NameResolver::plan(&point)?)
        .unwrap_err();
    assert_eq!(
        err,
        EmitError::PlanMismatch {
            expected: "com.example.Derived".to_string(),
            actual: "com.example.Point".to_string(),
        }
    );
    assert_eq!(err.kind(), "plan-mismatch");

    // a plan for another version of the same class
    let other = TypeModel::new(ClassRegistry::new().with(
        ClassDecl::class("com.example.Derived").field(FieldDecl::new("name", FieldType::string())),
    ));
    let stale = NameResolver::plan(&*other.describe("com.example.Derived")?)?;
    assert!(matches!(
        emitter.emit(&derived, &stale),
        Err(EmitError::PlanMismatch { .. })
    ));
    assert!(emitter.emit(&base, &NameResolver::plan(&base)?).is_ok());
    Ok(())
}
