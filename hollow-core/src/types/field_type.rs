use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use super::PrimitiveKind;

/// Binary name of the universal root class
pub const OBJECT: &str = "java.lang.Object";

/// The declared type of a field, as written in source (generic information included).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum FieldType {
    /// `int`, `boolean`, ...
    Primitive(PrimitiveKind),

    /// A class or interface reference, possibly parameterized: `java.util.List<java.lang.String>`
    Class(ClassType),

    /// An array of the inner type: `int[]`, `T[][]`
    Array(Box<FieldType>),

    /// A type variable declared by the class, e.g. `T`
    TypeVariable(String),
}

/// A reference to a named class together with its type arguments (empty for raw or
/// non-generic uses).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ClassType {
    /// binary name, e.g. `java.util.Map$Entry`
    pub name: String,

    /// type arguments, in order
    pub args: Vec<TypeArg>,
}

/// A type argument inside `<...>`
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeArg {
    /// A concrete type argument
    Type(FieldType),
    /// `?`
    Wildcard,
    /// `? extends T`
    Extends(FieldType),
    /// `? super T`
    Super(FieldType),
}

/// A type parameter declared by a class: `T extends java.lang.Comparable<T>`
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TypeParam {
    /// the name of the type variable
    pub name: String,

    /// upper bounds, the first one determines the erasure
    pub bounds: Vec<FieldType>,
}

impl TypeParam {
    /// An unbounded type parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Adds an upper bound
    pub fn bound(mut self, bound: FieldType) -> Self {
        self.bounds.push(bound);
        self
    }
}

impl ClassType {
    /// A raw (or non-generic) class reference
    pub fn raw(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A parameterized class reference
    pub fn parameterized(name: impl Into<String>, args: Vec<TypeArg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl FieldType {
    /// `boolean`
    pub const BOOLEAN: FieldType = FieldType::Primitive(PrimitiveKind::Boolean);
    /// `byte`
    pub const BYTE: FieldType = FieldType::Primitive(PrimitiveKind::Byte);
    /// `char`
    pub const CHAR: FieldType = FieldType::Primitive(PrimitiveKind::Char);
    /// `short`
    pub const SHORT: FieldType = FieldType::Primitive(PrimitiveKind::Short);
    /// `int`
    pub const INT: FieldType = FieldType::Primitive(PrimitiveKind::Int);
    /// `long`
    pub const LONG: FieldType = FieldType::Primitive(PrimitiveKind::Long);
    /// `float`
    pub const FLOAT: FieldType = FieldType::Primitive(PrimitiveKind::Float);
    /// `double`
    pub const DOUBLE: FieldType = FieldType::Primitive(PrimitiveKind::Double);

    /// A raw class reference
    pub fn class(name: impl Into<String>) -> Self {
        FieldType::Class(ClassType::raw(name))
    }

    /// A parameterized class reference where every argument is a concrete type
    pub fn parameterized(name: impl Into<String>, args: impl IntoIterator<Item = FieldType>) -> Self {
        FieldType::Class(ClassType::parameterized(
            name,
            args.into_iter().map(TypeArg::Type).collect(),
        ))
    }

    /// `java.lang.Object`
    pub fn object() -> Self {
        Self::class(OBJECT)
    }

    /// `java.lang.String`
    pub fn string() -> Self {
        Self::class("java.lang.String")
    }

    /// A type variable reference
    pub fn type_var(name: impl Into<String>) -> Self {
        FieldType::TypeVariable(name.into())
    }

    /// Wraps this type into a one-dimensional array of it
    pub fn array_of(self) -> Self {
        FieldType::Array(Box::new(self))
    }

    /// Returns the primitive kind, if this is a primitive type
    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            FieldType::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns true for primitive types
    pub fn is_primitive(&self) -> bool {
        matches!(self, FieldType::Primitive(_))
    }

    /// Returns true for everything that can hold `null`
    pub fn is_reference(&self) -> bool {
        !self.is_primitive()
    }

    /// For arrays, the component type
    pub fn component(&self) -> Option<&FieldType> {
        match self {
            FieldType::Array(inner) => Some(inner),
            _ => None,
        }
    }

    /// Binary class name, for class types only
    pub fn class_name(&self) -> Option<&str> {
        match self {
            FieldType::Class(class) => Some(&class.name),
            _ => None,
        }
    }

    /// Whether this is exactly `java.lang.Object` (raw)
    pub fn is_object(&self) -> bool {
        self.class_name() == Some(OBJECT)
    }

    /// Computes the erasure of this type: type arguments are dropped and type variables are
    /// replaced by the erasure of their first bound (or `java.lang.Object`).
    pub fn erasure(&self, params: &[TypeParam]) -> FieldType {
        self.erasure_guarded(params, &mut Vec::new())
    }

    fn erasure_guarded<'a>(&'a self, params: &'a [TypeParam], seen: &mut Vec<&'a str>) -> FieldType {
        match self {
            FieldType::Primitive(_) => self.clone(),
            FieldType::Class(class) => FieldType::class(class.name.clone()),
            FieldType::Array(inner) => inner.erasure_guarded(params, seen).array_of(),
            FieldType::TypeVariable(name) => {
                if seen.contains(&name.as_str()) {
                    return FieldType::object();
                }
                let bound = params
                    .iter()
                    .find(|p| &p.name == name)
                    .and_then(|p| p.bounds.first());
                match bound {
                    Some(bound) => {
                        seen.push(name);
                        bound.erasure_guarded(params, seen)
                    }
                    None => FieldType::object(),
                }
            }
        }
    }

    /// Calls `f` with the binary name of every class referenced by this type, including
    /// type arguments and wildcard bounds, in source order.
    pub fn visit_classes<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            FieldType::Primitive(_) | FieldType::TypeVariable(_) => {}
            FieldType::Array(inner) => inner.visit_classes(f),
            FieldType::Class(class) => {
                f(&class.name);
                for arg in &class.args {
                    match arg {
                        TypeArg::Wildcard => {}
                        TypeArg::Type(ty) | TypeArg::Extends(ty) | TypeArg::Super(ty) => {
                            ty.visit_classes(f)
                        }
                    }
                }
            }
        }
    }

    /// Calls `f` with the name of every type variable mentioned by this type
    pub fn visit_type_vars<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            FieldType::Primitive(_) => {}
            FieldType::TypeVariable(name) => f(name),
            FieldType::Array(inner) => inner.visit_type_vars(f),
            FieldType::Class(class) => {
                for arg in &class.args {
                    match arg {
                        TypeArg::Wildcard => {}
                        TypeArg::Type(ty) | TypeArg::Extends(ty) | TypeArg::Super(ty) => {
                            ty.visit_type_vars(f)
                        }
                    }
                }
            }
        }
    }
}

impl From<PrimitiveKind> for FieldType {
    fn from(kind: PrimitiveKind) -> Self {
        FieldType::Primitive(kind)
    }
}

impl core::fmt::Display for FieldType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldType::Primitive(kind) => write!(f, "{kind}"),
            FieldType::Class(class) => write!(f, "{class}"),
            FieldType::Array(inner) => write!(f, "{inner}[]"),
            FieldType::TypeVariable(name) => f.write_str(name),
        }
    }
}

impl core::fmt::Display for ClassType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl core::fmt::Display for TypeArg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TypeArg::Type(ty) => write!(f, "{ty}"),
            TypeArg::Wildcard => f.write_str("?"),
            TypeArg::Extends(ty) => write!(f, "? extends {ty}"),
            TypeArg::Super(ty) => write!(f, "? super {ty}"),
        }
    }
}

impl core::fmt::Display for TypeParam {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)?;
        for (i, bound) in self.bounds.iter().enumerate() {
            f.write_str(if i == 0 { " extends " } else { " & " })?;
            write!(f, "{bound}")?;
        }
        Ok(())
    }
}
