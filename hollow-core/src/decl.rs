//! Declarations as reported by the host runtime's reflection facility.
//!
//! These are the raw inputs of the [`TypeModel`](crate::TypeModel): everything the host
//! knows about one class, including members the model later drops (static fields,
//! constants) and members it never uses for construction (constructors).

use alloc::string::String;
use alloc::vec::Vec;

use crate::{ClassFlags, ClassKind, ClassType, FieldFlags, FieldType, TypeParam, Visibility};

/// One field exactly as declared
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FieldDecl {
    /// field name, unique within its class
    pub name: String,

    /// declared (generic) type
    pub ty: FieldType,

    /// access level
    pub visibility: Visibility,

    /// modifiers
    pub flags: FieldFlags,
}

impl FieldDecl {
    /// A package-private, non-final instance field
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Package,
            flags: FieldFlags::EMPTY,
        }
    }

    /// Sets the access level
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Shorthand for `visibility(Visibility::Private)`
    pub fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    /// Adds modifier flags
    pub fn flags(mut self, flags: FieldFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Shorthand for `flags(FieldFlags::FINAL)`
    pub fn final_(self) -> Self {
        self.flags(FieldFlags::FINAL)
    }

    /// Whether the field has per-instance storage the model should describe
    pub fn is_instance_field(&self) -> bool {
        !self
            .flags
            .intersects(FieldFlags::STATIC | FieldFlags::CONSTANT)
    }
}

/// One constructor. Only its signature is known; bodies are never run by hollow.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ConstructorDecl {
    /// access level
    pub visibility: Visibility,

    /// parameter types, in order
    pub params: Vec<FieldType>,
}

impl ConstructorDecl {
    /// A constructor with the given access and parameter types
    pub fn new(visibility: Visibility, params: impl IntoIterator<Item = FieldType>) -> Self {
        Self {
            visibility,
            params: params.into_iter().collect(),
        }
    }
}

/// Everything the host knows about one class
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ClassDecl {
    /// binary name, e.g. `com.example.Outer$Inner`
    pub name: String,

    /// class, interface, enum, ...
    pub kind: ClassKind,

    /// modifiers
    pub flags: ClassFlags,

    /// access level
    pub visibility: Visibility,

    /// declared type parameters
    pub type_params: Vec<TypeParam>,

    /// the `extends` clause; `None` means `java.lang.Object`
    pub superclass: Option<ClassType>,

    /// the `implements` clause (the `extends` clause for interfaces)
    pub interfaces: Vec<ClassType>,

    /// all declared fields, in declaration order
    pub fields: Vec<FieldDecl>,

    /// all declared constructors
    pub constructors: Vec<ConstructorDecl>,

    /// for enums, the constant names in declaration order
    pub enum_constants: Vec<String>,
}

impl ClassDecl {
    /// Starts a public class declaration with the given binary name
    pub fn class(name: impl Into<String>) -> Self {
        Self::of_kind(name, ClassKind::Class)
    }

    /// Starts a public interface declaration
    pub fn interface(name: impl Into<String>) -> Self {
        Self::of_kind(name, ClassKind::Interface).flags(ClassFlags::ABSTRACT)
    }

    /// Starts a public enum declaration
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::of_kind(name, ClassKind::Enum).flags(ClassFlags::FINAL)
    }

    /// Starts a declaration of any kind
    pub fn of_kind(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            flags: ClassFlags::EMPTY,
            visibility: Visibility::Public,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            enum_constants: Vec::new(),
        }
    }

    /// Adds modifier flags
    pub fn flags(mut self, flags: ClassFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Sets the access level
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Appends a type parameter
    pub fn type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
    }

    /// Sets the superclass
    pub fn extends(mut self, superclass: ClassType) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Appends an implemented interface
    pub fn implements(mut self, interface: ClassType) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Appends a field
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a constructor
    pub fn constructor(mut self, constructor: ConstructorDecl) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Appends an enum constant
    pub fn constant(mut self, name: impl Into<String>) -> Self {
        self.enum_constants.push(name.into());
        self
    }

    /// Names of the declared type parameters, for parsing member types
    pub fn type_var_names(&self) -> Vec<&str> {
        self.type_params.iter().map(|p| p.name.as_str()).collect()
    }
}
