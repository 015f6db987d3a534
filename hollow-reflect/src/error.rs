use hollow_core::{ClassKind, FieldType, ModelError};
use owo_colors::OwoColorize;

/// Errors that can occur when allocating instances or reading and writing their fields.
#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum ReflectError {
    /// The type's metadata could not be obtained or is unusable
    UnsupportedType(ModelError),

    /// The type cannot be instantiated by bypassing its constructors
    Allocation {
        /// The type that was requested
        type_name: String,
        /// What the type is
        kind: ClassKind,
        /// Why it cannot be allocated
        reason: &'static str,
    },

    /// A value is not assignment-compatible with a field's declared type
    TypeMismatch {
        /// The class declaring the field
        owner: String,
        /// The field name
        field: String,
        /// The field's declared type
        expected: FieldType,
        /// The runtime type of the rejected value
        actual: String,
    },

    /// No field of that name exists anywhere in the hierarchy (or on the requested level)
    UnknownField {
        /// The type (or hierarchy level) that was searched
        type_name: String,
        /// The requested field name
        field: String,
        /// Every field name that does exist, sorted
        known: Vec<String>,
    },

    /// More than one hierarchy level declares a field of that name
    AmbiguousField {
        /// The type being built
        type_name: String,
        /// The shadowed field name
        field: String,
        /// Declaring classes, most-derived first
        owners: Vec<String>,
    },

    /// A qualified access named a class that is not part of the hierarchy
    NotInHierarchy {
        /// The type being built
        type_name: String,
        /// The requested owner
        owner: String,
        /// The classes that are part of the hierarchy, most-derived first
        levels: Vec<String>,
    },

    /// A field descriptor from another hierarchy was used on an instance
    ForeignField {
        /// The instance's type
        type_name: String,
        /// `owner.name` of the foreign field
        field: String,
    },

    /// The builder was used after `build()`
    AlreadyBuilt {
        /// The type the builder was created for
        type_name: String,
    },

    /// An enum constant that the enum does not declare
    NoSuchConstant {
        /// The enum type
        enum_name: String,
        /// The requested constant
        constant: String,
        /// Declared constants, in declaration order
        known: Vec<String>,
    },

    /// An enum constant was requested from a type that is not an enum
    NotAnEnum {
        /// The type
        type_name: String,
        /// What it is instead
        kind: ClassKind,
    },

    /// An array element is not compatible with the array's component type
    ArrayStore {
        /// The array type
        array_type: String,
        /// Position of the element
        index: usize,
        /// The runtime type of the rejected element
        actual: String,
    },

    /// Array index out of bounds
    ArrayIndexOutOfBounds {
        /// The array type
        array_type: String,
        /// The index that was out of bounds
        index: usize,
        /// The array length
        len: usize,
    },
}

impl ReflectError {
    /// Short machine-readable kind, used as a prefix in one-line error reports
    pub fn kind(&self) -> &'static str {
        match self {
            ReflectError::UnsupportedType(_) => "unsupported-type",
            ReflectError::Allocation { .. } => "allocation",
            ReflectError::TypeMismatch { .. } | ReflectError::ArrayStore { .. } => "type-mismatch",
            ReflectError::UnknownField { .. } | ReflectError::NotInHierarchy { .. } => {
                "unknown-field"
            }
            ReflectError::AmbiguousField { .. } => "ambiguous-field",
            ReflectError::ForeignField { .. } => "foreign-field",
            ReflectError::AlreadyBuilt { .. } => "already-built",
            ReflectError::NoSuchConstant { .. } | ReflectError::NotAnEnum { .. } => "enum-constant",
            ReflectError::ArrayIndexOutOfBounds { .. } => "array-index",
        }
    }
}

impl core::fmt::Display for ReflectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReflectError::UnsupportedType(inner) => write!(f, "Unsupported type: {inner}"),
            ReflectError::Allocation {
                type_name,
                kind,
                reason,
            } => write!(
                f,
                "Cannot allocate {} ({}): {}",
                type_name.blue(),
                kind,
                reason
            ),
            ReflectError::TypeMismatch {
                owner,
                field,
                expected,
                actual,
            } => write!(
                f,
                "Cannot assign {} to field {}.{}: expected {}",
                actual.red(),
                owner.blue(),
                field.yellow(),
                expected.green()
            ),
            ReflectError::UnknownField {
                type_name,
                field,
                known,
            } => {
                write!(f, "No field {} in {}. ", field.red(), type_name.blue())?;
                if known.is_empty() {
                    write!(f, "It has no instance fields.")
                } else {
                    write!(f, "Known fields: ")?;
                    for (i, name) in known.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", name.cyan())?;
                    }
                    write!(f, ", that's it.")
                }
            }
            ReflectError::AmbiguousField {
                type_name,
                field,
                owners,
            } => {
                write!(
                    f,
                    "Field {} is declared more than once in the hierarchy of {}: ",
                    field.yellow(),
                    type_name.blue()
                )?;
                for (i, owner) in owners.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", owner.cyan())?;
                }
                write!(
                    f,
                    ". Use set_qualified(owner, \"{field}\", value) to pick one"
                )
            }
            ReflectError::NotInHierarchy {
                type_name,
                owner,
                levels,
            } => write!(
                f,
                "{} is not a class in the hierarchy of {} (which is: {})",
                owner.red(),
                type_name.blue(),
                levels.join(", ")
            ),
            ReflectError::ForeignField { type_name, field } => write!(
                f,
                "Field {} does not belong to {}",
                field.red(),
                type_name.blue()
            ),
            ReflectError::AlreadyBuilt { type_name } => write!(
                f,
                "Builder for {} was already built and cannot be reused",
                type_name.blue()
            ),
            ReflectError::NoSuchConstant {
                enum_name,
                constant,
                known,
            } => write!(
                f,
                "Enum {} has no constant {}. Known constants: {}",
                enum_name.blue(),
                constant.red(),
                known.join(", ")
            ),
            ReflectError::NotAnEnum { type_name, kind } => write!(
                f,
                "{} is not an enum (it is declared as {})",
                type_name.blue(),
                kind
            ),
            ReflectError::ArrayStore {
                array_type,
                index,
                actual,
            } => write!(
                f,
                "Cannot store {} at index {} of {}",
                actual.red(),
                index,
                array_type.blue()
            ),
            ReflectError::ArrayIndexOutOfBounds {
                array_type,
                index,
                len,
            } => write!(
                f,
                "Array index {} out of bounds for {} (array length is {})",
                index,
                array_type.blue(),
                len
            ),
        }
    }
}

impl core::error::Error for ReflectError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ReflectError::UnsupportedType(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<ModelError> for ReflectError {
    fn from(err: ModelError) -> Self {
        ReflectError::UnsupportedType(err)
    }
}
