use alloc::string::String;
use alloc::vec::Vec;

use crate::{ClassKind, TypeSyntaxError};

/// Errors raised while describing a type. Every variant means the type is unsupported:
/// its metadata is missing or unusable. None of them are transient.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// The metadata source knows nothing about the class
    NoMetadata {
        /// binary name that was looked up
        name: String,
        /// the class whose hierarchy needed it, if it was not the requested class itself
        required_by: Option<String>,
    },

    /// The type name itself could not be parsed
    InvalidName(TypeSyntaxError),

    /// A superclass chain loops back onto itself
    CyclicHierarchy {
        /// the classes on the cycle, starting and ending with the same name
        chain: Vec<String>,
    },

    /// An `extends` clause names something that is not a class
    InvalidSuperclass {
        /// the declaring class
        name: String,
        /// the offending superclass
        superclass: String,
        /// what the superclass actually is
        kind: ClassKind,
    },

    /// Two fields of the same declaration share a name
    DuplicateField {
        /// the declaring class
        name: String,
        /// the duplicated field name
        field: String,
    },
}

impl ModelError {
    /// Name of the type the error is about
    pub fn type_name(&self) -> &str {
        match self {
            ModelError::NoMetadata { name, .. }
            | ModelError::InvalidSuperclass { name, .. }
            | ModelError::DuplicateField { name, .. } => name,
            ModelError::InvalidName(err) => &err.input,
            ModelError::CyclicHierarchy { chain } => chain.first().map(String::as_str).unwrap_or(""),
        }
    }
}

impl core::fmt::Display for ModelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ModelError::NoMetadata {
                name,
                required_by: None,
            } => write!(f, "no metadata available for type {name}"),
            ModelError::NoMetadata {
                name,
                required_by: Some(by),
            } => write!(
                f,
                "no metadata available for type {name} (superclass of {by})"
            ),
            ModelError::InvalidName(err) => write!(f, "{err}"),
            ModelError::CyclicHierarchy { chain } => {
                write!(f, "cyclic superclass chain: {}", chain.join(" -> "))
            }
            ModelError::InvalidSuperclass {
                name,
                superclass,
                kind,
            } => write!(
                f,
                "{name} extends {superclass}, which is not a class (declared as {kind})"
            ),
            ModelError::DuplicateField { name, field } => {
                write!(f, "{name} declares field `{field}` more than once")
            }
        }
    }
}

impl core::error::Error for ModelError {}

impl From<TypeSyntaxError> for ModelError {
    fn from(err: TypeSyntaxError) -> Self {
        ModelError::InvalidName(err)
    }
}
