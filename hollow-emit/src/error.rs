use hollow_core::ModelError;

/// Errors raised while planning names or emitting a builder
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum EmitError {
    /// The target's metadata could not be obtained
    Model(ModelError),

    /// No builder can be generated for this target
    UnsupportedType {
        /// binary name of the target
        type_name: String,
        /// why not
        reason: String,
    },

    /// Two fields ended up with the same generated identifier. This is a bug in the
    /// disambiguation policy, not something callers can fix.
    NamingConflict {
        /// the target
        type_name: String,
        /// the identifier (or setter) produced twice
        identifier: String,
        /// `owner.name` of the first field
        first: String,
        /// `owner.name` of the second field
        second: String,
    },

    /// The naming plan was computed for a different type (or a different version of it)
    PlanMismatch {
        /// the descriptor being emitted
        expected: String,
        /// the type the plan was made for
        actual: String,
    },

    /// An emitter option is not usable in generated source
    InvalidOption {
        /// the option name
        option: &'static str,
        /// the rejected value
        value: String,
        /// what is wrong with it
        reason: &'static str,
    },
}

impl EmitError {
    /// Short machine-readable kind, used as a prefix in one-line error reports
    pub fn kind(&self) -> &'static str {
        match self {
            EmitError::Model(_) | EmitError::UnsupportedType { .. } => "unsupported-type",
            EmitError::NamingConflict { .. } => "naming-conflict",
            EmitError::PlanMismatch { .. } => "plan-mismatch",
            EmitError::InvalidOption { .. } => "invalid-option",
        }
    }
}

impl core::fmt::Display for EmitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EmitError::Model(err) => write!(f, "{err}"),
            EmitError::UnsupportedType { type_name, reason } => {
                write!(f, "cannot generate a builder for {type_name}: {reason}")
            }
            EmitError::NamingConflict {
                type_name,
                identifier,
                first,
                second,
            } => write!(
                f,
                "naming conflict in {type_name}: `{identifier}` was generated for both {first} and {second}"
            ),
            EmitError::PlanMismatch { expected, actual } => write!(
                f,
                "naming plan was made for {actual}, not for {expected}"
            ),
            EmitError::InvalidOption {
                option,
                value,
                reason,
            } => write!(f, "invalid {option} `{value}`: {reason}"),
        }
    }
}

impl core::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            EmitError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for EmitError {
    fn from(err: ModelError) -> Self {
        EmitError::Model(err)
    }
}
