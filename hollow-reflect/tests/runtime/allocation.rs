use eyre::Result;
use hollow_core::{ClassKind, TypeModel};
use hollow_reflect::{ReflectError, Value, accessor, allocate};

use crate::fixtures;

#[test]
fn allocated_fields_hold_defaults() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let class = model.describe("com.example.Everything")?;
    let everything = allocate(&class)?;

    let expected = [
        ("flag", Value::Boolean(false)),
        ("octet", Value::Byte(0)),
        ("letter", Value::Char(0)),
        ("small", Value::Short(0)),
        ("count", Value::Int(0)),
        ("total", Value::Long(0)),
        ("ratio", Value::Float(0.0)),
        ("amount", Value::Double(0.0)),
        ("boxed", Value::Null),
        ("text", Value::Null),
        ("ints", Value::Null),
        ("color", Value::Null),
    ];
    for (name, want) in expected {
        let field = &class.fields_named(name)[0];
        assert_eq!(accessor::get(&everything, field)?, want, "{name}");
    }
    Ok(())
}

#[test]
fn private_constructors_do_not_matter() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let class = model.describe("com.example.Point")?;
    assert_eq!(class.constructors().len(), 1);

    let point = allocate(&class)?;
    assert_eq!(point.class().name(), "com.example.Point");
    assert_eq!(accessor::get(&point, &class.fields()[1])?, Value::Int(0));
    Ok(())
}

#[test]
fn abstract_ancestors_are_allocated_with_the_subclass() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let circle = model.describe("com.example.Circle")?;
    let instance = allocate(&circle)?;
    let label = &circle.fields_named("label")[0];
    assert_eq!(label.owner, "com.example.Shape");
    assert_eq!(accessor::get(&instance, label)?, Value::Null);
    Ok(())
}

#[test]
fn records_can_be_allocated() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let pair = allocate(&model.describe("com.example.Pair")?)?;
    assert_eq!(pair.class().kind(), ClassKind::Record);
    Ok(())
}

#[test]
fn non_instantiable_kinds_are_rejected() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    for (name, kind) in [
        ("com.example.Shape", ClassKind::Class),
        ("com.example.Named", ClassKind::Interface),
        ("com.example.Color", ClassKind::Enum),
        ("int", ClassKind::Primitive),
        ("[I", ClassKind::Array),
        ("java.util.List", ClassKind::Interface),
    ] {
        let err = allocate(&model.describe(name)?).unwrap_err();
        match err {
            ReflectError::Allocation { kind: actual, .. } => assert_eq!(actual, kind, "{name}"),
            other => panic!("{name}: unexpected error {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn allocations_are_distinct() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let class = model.describe("com.example.Point")?;
    let a = allocate(&class)?;
    let b = allocate(&class)?;
    assert!(!a.ptr_eq(&b));
    assert!(a.fields_eq(&b));
    Ok(())
}
