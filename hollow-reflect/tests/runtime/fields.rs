use eyre::Result;
use hollow_core::{FieldType, TypeModel};
use hollow_reflect::{ReflectError, Value, accessor, allocate};

use crate::fixtures;

#[test]
fn compatible_values_round_trip() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let class = model.describe("com.example.Everything")?;
    let everything = allocate(&class)?;

    let circle = allocate(&model.describe("com.example.Circle")?)?;
    let list = allocate(&model.describe("java.util.ArrayList")?)?;
    let red = Value::enum_constant(&model.describe("com.example.Color")?, "RED")?;
    let ints = Value::new_array(FieldType::INT, [Value::Int(1), Value::Int(2)])?;
    let strings = Value::new_array(FieldType::string(), [Value::from("a")])?;

    let cases = [
        ("flag", Value::Boolean(true)),
        ("octet", Value::Byte(-3)),
        ("letter", Value::Char(0x263A)),
        ("small", Value::Short(12_000)),
        ("count", Value::Int(i32::MIN)),
        ("total", Value::Long(1 << 40)),
        ("ratio", Value::Float(f32::NAN)),
        ("amount", Value::Double(-0.0)),
        ("boxed", Value::Int(7)),
        ("number", Value::Long(7)),
        ("number", Value::Double(2.5)),
        ("text", Value::from("hello")),
        ("anything", Value::from("a string is an object")),
        ("anything", Value::Int(1)),
        ("anything", ints.clone()),
        ("anything", Value::Object(circle.clone())),
        ("shape", Value::Object(circle.clone())),
        ("named", Value::Object(circle)),
        ("color", red.clone()),
        ("anything", red),
        ("ints", ints),
        ("objects", strings),
        ("tags", Value::Object(list)),
        ("sequence", Value::from("chars")),
        ("text", Value::Null),
    ];
    for (name, value) in cases {
        let field = &class.fields_named(name)[0];
        accessor::set(&everything, field, value.clone())?;
        assert_eq!(accessor::get(&everything, field)?, value, "{name}");
    }
    Ok(())
}

#[test]
fn mismatches_leave_the_field_unchanged() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let class = model.describe("com.example.Everything")?;
    let everything = allocate(&class)?;
    let point = allocate(&model.describe("com.example.Point")?)?;

    let cases = [
        ("total", Value::Long(99), Value::Int(1)),
        ("count", Value::Int(5), Value::Null),
        ("count", Value::Int(5), Value::Short(5)),
        ("amount", Value::Double(1.5), Value::Float(1.5)),
        ("boxed", Value::Int(3), Value::Long(3)),
        ("boxed", Value::Int(3), Value::from("3")),
        ("number", Value::Int(3), Value::Boolean(true)),
        ("number", Value::Int(3), Value::Char(65)),
        ("text", Value::from("kept"), Value::Int(1)),
        ("shape", Value::Null, Value::Object(point.clone())),
        ("ints", Value::Null, Value::default_array(FieldType::LONG, 2)),
        ("ints", Value::Null, Value::Object(point)),
        ("objects", Value::Null, Value::default_array(FieldType::INT, 2)),
    ];
    for (name, initial, wrong) in cases {
        let field = &class.fields_named(name)[0];
        accessor::set(&everything, field, initial.clone())?;

        let err = accessor::set(&everything, field, wrong.clone()).unwrap_err();
        match &err {
            ReflectError::TypeMismatch {
                owner,
                field: field_name,
                actual,
                ..
            } => {
                assert_eq!(owner, "com.example.Everything");
                assert_eq!(field_name, name);
                assert_eq!(*actual, wrong.type_name());
            }
            other => panic!("{name}: unexpected error {other:?}"),
        }
        assert_eq!(accessor::get(&everything, field)?, initial, "{name}");
    }
    Ok(())
}

#[test]
fn erased_generic_fields_check_against_the_bound() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let class = model.describe("com.example.Box")?;
    let boxed = allocate(&class)?;
    let value = &class.fields()[0];
    assert_eq!(value.erased_type, FieldType::class("java.lang.Number"));

    accessor::set(&boxed, value, 42)?;
    assert_eq!(accessor::get(&boxed, value)?, Value::Int(42));

    let err = accessor::set(&boxed, value, "forty-two").unwrap_err();
    assert!(matches!(err, ReflectError::TypeMismatch { .. }));
    Ok(())
}

#[test]
fn final_and_private_fields_are_writable() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let class = model.describe("com.example.Point")?;
    let point = allocate(&class)?;
    for field in class.fields() {
        assert!(field.is_final());
        accessor::set(&point, field, 9)?;
        assert_eq!(accessor::get(&point, field)?, Value::Int(9));
    }
    Ok(())
}

#[test]
fn objects_may_reference_themselves() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let class = model.describe("com.example.Node")?;
    let node = allocate(&class)?;
    let next = &class.fields_named("next")[0];

    accessor::set(&node, next, node.clone())?;
    let stored = accessor::get(&node, next)?;
    assert!(stored.as_object().is_some_and(|n| n.ptr_eq(&node)));
    Ok(())
}

#[test]
fn fields_of_other_types_are_rejected() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let point = allocate(&model.describe("com.example.Point")?)?;
    let node = model.describe("com.example.Node")?;
    let value = &node.fields_named("value")[0];

    let err = accessor::set(&point, value, 1).unwrap_err();
    assert_eq!(
        err,
        ReflectError::ForeignField {
            type_name: "com.example.Point".to_string(),
            field: "com.example.Node.value".to_string(),
        }
    );
    assert!(accessor::get(&point, value).is_err());
    Ok(())
}

#[test]
fn inherited_fields_work_through_the_parent_descriptor() -> Result<()> {
    hollow_testhelpers::setup();

    let model = TypeModel::new(fixtures());
    let base = model.describe("com.example.Base")?;
    let derived = allocate(&model.describe("com.example.Derived")?)?;
    let id = &base.fields_named("id")[0];

    accessor::set(&derived, id, 77i64)?;
    assert_eq!(accessor::get(&derived, id)?, Value::Long(77));
    Ok(())
}
