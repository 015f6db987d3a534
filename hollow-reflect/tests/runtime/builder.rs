use eyre::Result;
use hollow_reflect::{BuilderInstance, ReflectError, Value};

use crate::runtime;

#[test]
fn point_is_built_from_named_fields() -> Result<()> {
    hollow_testhelpers::setup();

    let runtime = runtime();
    let point = runtime
        .begin("com.example.Point")?
        .set("x", 3)?
        .set("y", 4)?
        .build()?;

    let class = point.class();
    assert_eq!(class.name(), "com.example.Point");
    let x = &class.fields_named("x")[0];
    let y = &class.fields_named("y")[0];
    assert_eq!(hollow_reflect::accessor::get(&point, x)?, Value::Int(3));
    assert_eq!(hollow_reflect::accessor::get(&point, y)?, Value::Int(4));
    Ok(())
}

#[test]
fn identical_builds_are_equal_but_distinct() -> Result<()> {
    hollow_testhelpers::setup();

    let runtime = runtime();
    let build = || -> Result<_, ReflectError> {
        runtime
            .begin("com.example.Derived")?
            .set("active", true)?
            .set("id", 12i64)?
            .set_qualified("com.example.Derived", "name", "same")?
            .build()
    };
    let a = build()?;
    let b = build()?;
    assert!(a.fields_eq(&b));
    assert!(!a.ptr_eq(&b));
    Ok(())
}

#[test]
fn shadowed_names_need_an_owner() -> Result<()> {
    hollow_testhelpers::setup();

    let mut builder = runtime().begin("com.example.Derived")?;
    let err = builder.set("name", "who").unwrap_err();
    assert_eq!(
        err,
        ReflectError::AmbiguousField {
            type_name: "com.example.Derived".to_string(),
            field: "name".to_string(),
            owners: vec![
                "com.example.Derived".to_string(),
                "com.example.Base".to_string(),
            ],
        }
    );
    assert_eq!(err.kind(), "ambiguous-field");
    assert!(builder.get("name").is_err());

    builder.set_qualified("com.example.Base", "name", "base")?;
    assert_eq!(
        builder.get_qualified("com.example.Base", "name")?,
        Value::from("base")
    );
    assert_eq!(
        builder.get_qualified("com.example.Derived", "name")?,
        Value::Null
    );

    builder.set_qualified("Derived", "name", "derived")?;
    assert_eq!(
        builder.get_qualified("Base", "name")?,
        Value::from("base")
    );
    assert_eq!(
        builder.get_qualified("com.example.Derived", "name")?,
        Value::from("derived")
    );
    Ok(())
}

#[test]
fn unknown_names_list_the_alternatives() -> Result<()> {
    hollow_testhelpers::setup();

    let mut builder = runtime().begin("com.example.Derived")?;
    assert_eq!(
        builder.set("nmae", "typo").unwrap_err(),
        ReflectError::UnknownField {
            type_name: "com.example.Derived".to_string(),
            field: "nmae".to_string(),
            known: vec!["active".to_string(), "id".to_string(), "name".to_string()],
        }
    );
    assert_eq!(
        builder.set_qualified("com.example.Base", "active", true).unwrap_err(),
        ReflectError::UnknownField {
            type_name: "com.example.Base".to_string(),
            field: "active".to_string(),
            known: vec!["id".to_string(), "name".to_string()],
        }
    );
    assert!(matches!(
        builder.set_qualified("com.example.Point", "x", 1).unwrap_err(),
        ReflectError::NotInHierarchy { .. }
    ));
    Ok(())
}

#[test]
fn builders_are_single_use() -> Result<()> {
    hollow_testhelpers::setup();

    let mut builder = runtime().begin("com.example.Point")?;
    builder.set("x", 1)?;
    let point = builder.build()?;
    assert!(builder.is_built());

    let already = ReflectError::AlreadyBuilt {
        type_name: "com.example.Point".to_string(),
    };
    assert_eq!(builder.set("x", 2).unwrap_err(), already);
    assert_eq!(builder.get("x").unwrap_err(), already);
    assert_eq!(builder.build().unwrap_err(), already);

    // the built instance is unaffected by the failed calls
    let class = point.class();
    let x = &class.fields_named("x")[0];
    assert_eq!(hollow_reflect::accessor::get(&point, x)?, Value::Int(1));
    Ok(())
}

#[test]
fn unset_fields_keep_their_defaults() -> Result<()> {
    hollow_testhelpers::setup();

    let point = runtime().begin("com.example.Point")?.set("y", 8)?.build()?;
    let class = point.class();
    assert_eq!(
        hollow_reflect::accessor::get(&point, &class.fields_named("x")[0])?,
        Value::Int(0)
    );
    Ok(())
}

#[test]
fn mismatched_values_do_not_touch_the_builder() -> Result<()> {
    hollow_testhelpers::setup();

    let mut builder = runtime().begin("com.example.Point")?;
    builder.set("x", 5)?;
    assert!(matches!(
        builder.set("x", 5i64).unwrap_err(),
        ReflectError::TypeMismatch { .. }
    ));
    assert!(matches!(
        builder.set("x", Value::Null).unwrap_err(),
        ReflectError::TypeMismatch { .. }
    ));
    assert_eq!(builder.get("x")?, Value::Int(5));
    Ok(())
}

#[test]
fn descriptors_drive_lookup_free_access() -> Result<()> {
    hollow_testhelpers::setup();

    let runtime = runtime();
    let mut builder = runtime.begin("com.example.Derived")?;
    let fields: Vec<_> = builder.descriptor().all_fields().cloned().collect();
    for (i, field) in fields.iter().enumerate() {
        if field.name == "name" {
            builder.set_field(field, format!("level {i}"))?;
        }
    }
    assert_eq!(
        builder.get_qualified("com.example.Derived", "name")?,
        Value::from("level 0")
    );
    assert_eq!(
        builder.get_qualified("com.example.Base", "name")?,
        Value::from("level 2")
    );

    let point = runtime.model().describe("com.example.Point")?;
    assert!(matches!(
        builder.set_field(&point.fields()[0], 1).unwrap_err(),
        ReflectError::ForeignField { .. }
    ));
    Ok(())
}

#[test]
fn abstract_and_unknown_types_cannot_begin() {
    hollow_testhelpers::setup();

    let runtime = runtime();
    assert!(matches!(
        runtime.begin("com.example.Shape").unwrap_err(),
        ReflectError::Allocation { .. }
    ));
    assert!(matches!(
        runtime.begin("com.example.Missing").unwrap_err(),
        ReflectError::UnsupportedType(_)
    ));
}

#[test]
fn builders_can_start_from_a_descriptor() -> Result<()> {
    hollow_testhelpers::setup();

    let runtime = runtime();
    let circle = runtime.model().describe("com.example.Circle")?;
    let mut builder = BuilderInstance::new(circle.clone())?;
    builder.set("radius", 1.5)?.set("label", "unit")?;
    assert!(std::sync::Arc::ptr_eq(builder.descriptor(), &circle));
    assert_eq!(builder.get("radius")?, Value::Double(1.5));
    Ok(())
}
