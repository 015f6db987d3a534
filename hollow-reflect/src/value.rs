//! Runtime values of the host type system.
//!
//! Objects and arrays live behind single-threaded shared references, the way the host's
//! heap works: cloning an [`ObjectRef`] copies the reference, not the object.

use alloc::rc::Rc;
use alloc::sync::Arc;
use core::cell::{Ref, RefCell};

use hollow_core::{ClassKind, FieldType, PrimitiveKind, TypeDescriptor};

use crate::ReflectError;

/// A value that can be stored in a field or an array element
#[derive(Clone, Debug)]
pub enum Value {
    /// `boolean`
    Boolean(bool),
    /// `byte`
    Byte(i8),
    /// `char`, a UTF-16 code unit
    Char(u16),
    /// `short`
    Short(i16),
    /// `int`
    Int(i32),
    /// `long`
    Long(i64),
    /// `float`
    Float(f32),
    /// `double`
    Double(f64),
    /// the null reference
    Null,
    /// a `java.lang.String`
    String(Rc<str>),
    /// a reference to an object
    Object(ObjectRef),
    /// a reference to an array
    Array(ArrayRef),
    /// an enum constant
    Enum(EnumConstant),
}

impl Value {
    /// The default value of a field of type `ty`: zero, `false`, or null
    pub fn zero(ty: &FieldType) -> Value {
        match ty.as_primitive() {
            Some(PrimitiveKind::Boolean) => Value::Boolean(false),
            Some(PrimitiveKind::Byte) => Value::Byte(0),
            Some(PrimitiveKind::Char) => Value::Char(0),
            Some(PrimitiveKind::Short) => Value::Short(0),
            Some(PrimitiveKind::Int) => Value::Int(0),
            Some(PrimitiveKind::Long) => Value::Long(0),
            Some(PrimitiveKind::Float) => Value::Float(0.0),
            Some(PrimitiveKind::Double) => Value::Double(0.0),
            None => Value::Null,
        }
    }

    /// The primitive kind, for primitive values
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        Some(match self {
            Value::Boolean(_) => PrimitiveKind::Boolean,
            Value::Byte(_) => PrimitiveKind::Byte,
            Value::Char(_) => PrimitiveKind::Char,
            Value::Short(_) => PrimitiveKind::Short,
            Value::Int(_) => PrimitiveKind::Int,
            Value::Long(_) => PrimitiveKind::Long,
            Value::Float(_) => PrimitiveKind::Float,
            Value::Double(_) => PrimitiveKind::Double,
            _ => return None,
        })
    }

    /// Whether this is the null reference
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the value's runtime type, e.g. `int`, `com.example.Point`, `long[]`, `null`
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::String(_) => "java.lang.String".to_string(),
            Value::Object(obj) => obj.class().name().to_string(),
            Value::Array(array) => array.type_name(),
            Value::Enum(constant) => constant.enum_type().name().to_string(),
            primitive => primitive
                .primitive_kind()
                .map(|kind| kind.keyword().to_string())
                .unwrap_or_default(),
        }
    }

    /// The `int` payload
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The `long` payload
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// The `boolean` payload
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// The string payload
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The object reference
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// The array reference
    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Creates an array of `component` holding `elements`, each of which must be
    /// assignable to the (erased) component type
    pub fn new_array(
        component: FieldType,
        elements: impl IntoIterator<Item = Value>,
    ) -> Result<Value, ReflectError> {
        let component = component.erasure(&[]);
        let elements: Vec<Value> = elements.into_iter().collect();
        for (index, element) in elements.iter().enumerate() {
            if !crate::accessor::is_assignable(&component, element) {
                return Err(ReflectError::ArrayStore {
                    array_type: format!("{component}[]"),
                    index,
                    actual: element.type_name(),
                });
            }
        }
        Ok(Value::Array(ArrayRef(Rc::new(RefCell::new(Array {
            component,
            elements,
        })))))
    }

    /// Creates an array of `len` default values
    pub fn default_array(component: FieldType, len: usize) -> Value {
        let component = component.erasure(&[]);
        let elements = vec![Value::zero(&component); len];
        Value::Array(ArrayRef(Rc::new(RefCell::new(Array {
            component,
            elements,
        }))))
    }

    /// Looks up a constant of an enum type
    pub fn enum_constant(enum_type: &Arc<TypeDescriptor>, name: &str) -> Result<Value, ReflectError> {
        if enum_type.kind() != ClassKind::Enum {
            return Err(ReflectError::NotAnEnum {
                type_name: enum_type.name().to_string(),
                kind: enum_type.kind(),
            });
        }
        let ordinal = enum_type
            .enum_constants()
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| ReflectError::NoSuchConstant {
                enum_name: enum_type.name().to_string(),
                constant: name.to_string(),
                known: enum_type.enum_constants().to_vec(),
            })?;
        Ok(Value::Enum(EnumConstant {
            enum_type: enum_type.clone(),
            ordinal,
        }))
    }
}

/// Primitives compare by value (floats bitwise, like boxed equality), strings by content,
/// everything else by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Enum(a), Value::Enum(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    ObjectRef => Object,
    ArrayRef => Array,
    EnumConstant => Enum,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Rc::from(value))
    }
}

impl From<Rc<str>> for Value {
    fn from(value: Rc<str>) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// An instance of a class: its descriptor and one storage slot per instance field of the
/// whole hierarchy.
pub struct Object {
    class: Arc<TypeDescriptor>,
    slots: Vec<Value>,
}

impl Object {
    /// Only the allocator creates objects; there is no other way to get one.
    pub(crate) fn zeroed(class: Arc<TypeDescriptor>) -> Self {
        let mut slots = vec![Value::Null; class.slot_count()];
        for field in class.all_fields() {
            slots[field.slot] = Value::zero(&field.erased_type);
        }
        Self { class, slots }
    }

    /// The object's runtime class
    pub fn class(&self) -> &Arc<TypeDescriptor> {
        &self.class
    }

    pub(crate) fn slot(&self, slot: usize) -> &Value {
        &self.slots[slot]
    }

    pub(crate) fn slot_mut(&mut self, slot: usize) -> &mut Value {
        &mut self.slots[slot]
    }
}

/// A shared reference to an [`Object`]
#[derive(Clone)]
pub struct ObjectRef(pub(crate) Rc<RefCell<Object>>);

impl ObjectRef {
    /// The object's runtime class
    pub fn class(&self) -> Arc<TypeDescriptor> {
        self.0.borrow().class.clone()
    }

    /// Borrows the object
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.0.borrow()
    }

    /// Whether both references point to the same object
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Whether both objects have the same class and pairwise equal fields. Nested
    /// references are compared by identity.
    pub fn fields_eq(&self, other: &ObjectRef) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let (a, b) = (self.0.borrow(), other.0.borrow());
        a.class.name() == b.class.name() && a.slots == b.slots
    }
}

impl core::fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}@{:p}", self.0.borrow().class.name(), Rc::as_ptr(&self.0))
    }
}

/// An array: its erased component type and its elements
pub struct Array {
    component: FieldType,
    elements: Vec<Value>,
}

/// A shared reference to an [`Array`]
#[derive(Clone)]
pub struct ArrayRef(Rc<RefCell<Array>>);

impl ArrayRef {
    /// The erased component type
    pub fn component(&self) -> FieldType {
        self.0.borrow().component.clone()
    }

    /// `component[]`
    pub fn type_name(&self) -> String {
        format!("{}[]", self.0.borrow().component)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.0.borrow().elements.len()
    }

    /// Whether the array has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads an element
    pub fn get(&self, index: usize) -> Result<Value, ReflectError> {
        let array = self.0.borrow();
        array
            .elements
            .get(index)
            .cloned()
            .ok_or_else(|| ReflectError::ArrayIndexOutOfBounds {
                array_type: format!("{}[]", array.component),
                index,
                len: array.elements.len(),
            })
    }

    /// Writes an element, checking it against the component type
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Result<(), ReflectError> {
        let value = value.into();
        // the value may be this very array, so nothing stays borrowed while it is inspected
        let (component, len) = {
            let array = self.0.borrow();
            (array.component.clone(), array.elements.len())
        };
        if index >= len {
            return Err(ReflectError::ArrayIndexOutOfBounds {
                array_type: format!("{component}[]"),
                index,
                len,
            });
        }
        if !crate::accessor::is_assignable(&component, &value) {
            return Err(ReflectError::ArrayStore {
                array_type: format!("{component}[]"),
                index,
                actual: value.type_name(),
            });
        }
        self.0.borrow_mut().elements[index] = value;
        Ok(())
    }

    /// Copies the elements out
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().elements.clone()
    }

    /// Whether both references point to the same array
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl core::fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}@{:p}", self.type_name(), Rc::as_ptr(&self.0))
    }
}

/// One constant of an enum type
#[derive(Clone)]
pub struct EnumConstant {
    enum_type: Arc<TypeDescriptor>,
    ordinal: usize,
}

impl EnumConstant {
    /// The enum type
    pub fn enum_type(&self) -> &Arc<TypeDescriptor> {
        &self.enum_type
    }

    /// Position in declaration order
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// The constant's name
    pub fn name(&self) -> &str {
        &self.enum_type.enum_constants()[self.ordinal]
    }
}

impl PartialEq for EnumConstant {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal && self.enum_type.name() == other.enum_type.name()
    }
}

impl core::fmt::Debug for EnumConstant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.enum_type.name(), self.name())
    }
}
