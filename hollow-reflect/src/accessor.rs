//! Reading and writing instance fields, regardless of visibility or `final`.
//!
//! Values must be assignment-compatible with the field's erased type. Nothing is converted:
//! an `int` does not widen into a `long` field and `null` never fits a primitive field.

use hollow_core::{FieldDescriptor, FieldType, OBJECT, PrimitiveKind};

use crate::log::trace;
use crate::{ObjectRef, ReflectError, Value};

/// Interfaces every array implements
const ARRAY_SUPERTYPES: &[&str] = &[OBJECT, "java.lang.Cloneable", "java.io.Serializable"];

/// Supertypes of `java.lang.String`
const STRING_SUPERTYPES: &[&str] = &[
    OBJECT,
    "java.lang.String",
    "java.lang.CharSequence",
    "java.lang.Comparable",
    "java.io.Serializable",
];

/// Supertypes shared by every box class
const BOX_SUPERTYPES: &[&str] = &[OBJECT, "java.io.Serializable", "java.lang.Comparable"];

/// Reads a field of `instance`
pub fn get(instance: &ObjectRef, field: &FieldDescriptor) -> Result<Value, ReflectError> {
    let object = instance.borrow();
    if !object.class().contains_field(field) {
        return Err(ReflectError::ForeignField {
            type_name: object.class().name().to_string(),
            field: field.qualified_name(),
        });
    }
    Ok(object.slot(field.slot).clone())
}

/// Writes a field of `instance`. On error the instance is left untouched.
pub fn set(
    instance: &ObjectRef,
    field: &FieldDescriptor,
    value: impl Into<Value>,
) -> Result<(), ReflectError> {
    let value = value.into();
    let class = instance.class();
    if !class.contains_field(field) {
        return Err(ReflectError::ForeignField {
            type_name: class.name().to_string(),
            field: field.qualified_name(),
        });
    }
    // the value may reference the instance itself, so check before borrowing mutably
    check(field, &value)?;
    trace!("{} <- {}", field.qualified_name(), value.type_name());
    *instance.0.borrow_mut().slot_mut(field.slot) = value;
    Ok(())
}

/// Checks that `value` may be stored into `field`
pub fn check(field: &FieldDescriptor, value: &Value) -> Result<(), ReflectError> {
    if is_assignable(&field.erased_type, value) {
        Ok(())
    } else {
        Err(ReflectError::TypeMismatch {
            owner: field.owner.clone(),
            field: field.name.clone(),
            expected: field.declared_type.clone(),
            actual: value.type_name(),
        })
    }
}

/// Whether `value` can be stored into a variable of the erased type `target`
pub fn is_assignable(target: &FieldType, value: &Value) -> bool {
    match target {
        FieldType::Primitive(kind) => value.primitive_kind() == Some(*kind),
        // erased types have no type variables left; treat a stray one as its default bound
        FieldType::TypeVariable(_) => class_accepts(OBJECT, value),
        FieldType::Class(class) => class_accepts(&class.name, value),
        FieldType::Array(component) => match value {
            Value::Null => true,
            Value::Array(array) => component_accepts(component, &array.component()),
            _ => false,
        },
    }
}

fn class_accepts(name: &str, value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(_) => STRING_SUPERTYPES.contains(&name),
        Value::Object(obj) => obj.class().is_subtype_of(name),
        Value::Array(_) => ARRAY_SUPERTYPES.contains(&name),
        Value::Enum(constant) => constant.enum_type().is_subtype_of(name),
        primitive => primitive
            .primitive_kind()
            .is_some_and(|kind| boxes_into(kind, name)),
    }
}

/// Autoboxing: a primitive fits its own box class and that box's supertypes
fn boxes_into(kind: PrimitiveKind, name: &str) -> bool {
    name == kind.box_class()
        || BOX_SUPERTYPES.contains(&name)
        || (name == "java.lang.Number" && kind.is_numeric())
}

/// Array element compatibility: primitive components must match exactly, reference
/// components by erased name or `Object`
fn component_accepts(target: &FieldType, source: &FieldType) -> bool {
    match (target, source) {
        (FieldType::Primitive(a), FieldType::Primitive(b)) => a == b,
        (FieldType::Primitive(_), _) | (_, FieldType::Primitive(_)) => false,
        (target, _) if target.is_object() => true,
        (FieldType::Array(a), FieldType::Array(b)) => component_accepts(a, b),
        (target, source) => target == source,
    }
}
