use alloc::rc::Rc;
use alloc::sync::Arc;
use core::cell::RefCell;

use hollow_core::{ClassKind, TypeDescriptor};

use crate::log::debug;
use crate::value::Object;
use crate::{ObjectRef, ReflectError};

/// Allocates an instance of `class` with every field at its default value.
///
/// No constructor of the class or of any ancestor runs, and no field initializer is
/// evaluated. Abstract ancestors are fine; the class itself must be a concrete class or
/// record.
pub fn allocate(class: &Arc<TypeDescriptor>) -> Result<ObjectRef, ReflectError> {
    let reason = match class.kind() {
        ClassKind::Class | ClassKind::Record if class.is_abstract() => {
            Some("abstract classes have no instances of their own")
        }
        ClassKind::Class | ClassKind::Record => None,
        ClassKind::Interface => Some("interfaces have no instances of their own"),
        ClassKind::Annotation => Some("annotation instances are created by the runtime"),
        ClassKind::Enum => Some("enum constants are singletons"),
        ClassKind::Primitive => Some("primitive values are not objects"),
        ClassKind::Array => Some("arrays need a length, use Value::default_array"),
    };
    if let Some(reason) = reason {
        return Err(ReflectError::Allocation {
            type_name: class.name().to_string(),
            kind: class.kind(),
            reason,
        });
    }

    debug!(
        "allocating {} with {} slots, bypassing {} constructors",
        class.name(),
        class.slot_count(),
        class
            .levels()
            .map(|level| level.constructors().len())
            .sum::<usize>()
    );
    Ok(ObjectRef(Rc::new(RefCell::new(Object::zeroed(class.clone())))))
}
