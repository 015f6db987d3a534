use alloc::string::String;
use alloc::vec::Vec;

use super::{ClassType, FieldType, TypeArg, TypeParam};

/// Assignments of type variables to types, used to view an ancestor's generic fields from
/// the perspective of a subclass.
///
/// For `class IntBox extends Box<java.lang.Integer>`, the bindings for the `Box` level map
/// `T` to `java.lang.Integer`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Bindings {
    vars: Vec<(String, FieldType)>,
    raw: bool,
}

impl Bindings {
    /// Binds every parameter to itself, the view a class has of its own fields
    pub fn identity(params: &[TypeParam]) -> Self {
        Self {
            vars: params
                .iter()
                .map(|p| (p.name.clone(), FieldType::TypeVariable(p.name.clone())))
                .collect(),
            raw: false,
        }
    }

    /// Binds `name` to `ty`, replacing any previous binding
    pub fn bind(&mut self, name: impl Into<String>, ty: FieldType) {
        let name = name.into();
        match self.vars.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = ty,
            None => self.vars.push((name, ty)),
        }
    }

    /// Looks up the binding of a type variable
    pub fn get(&self, name: &str) -> Option<&FieldType> {
        self.vars.iter().find(|(n, _)| n == name).map(|(_, ty)| ty)
    }

    /// Returns true if nothing is bound
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Whether the level is seen as a raw type, through a raw `extends` clause somewhere
    /// below it
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// The type of a member declared as `ty` in a class with type parameters `params`,
    /// seen through these bindings. Members of raw types are erased entirely, so
    /// `java.util.List<T>` becomes the raw `java.util.List` rather than a list of `T`'s
    /// bound.
    pub fn member_type(&self, ty: &FieldType, params: &[TypeParam]) -> FieldType {
        if self.raw {
            ty.erasure(params)
        } else {
            ty.substitute(self)
        }
    }

    /// Computes the bindings for a superclass level, given the superclass' declared
    /// parameters and the type arguments of the `extends` clause (interpreted in `self`).
    ///
    /// A raw `extends` clause (no arguments, or an arity mismatch) binds every parameter to
    /// its erasure and marks the level raw. Generic ancestors of a raw level are raw as
    /// well; a non-generic level in between ends the rawness.
    pub fn for_superclass(&self, parent_params: &[TypeParam], args: &[TypeArg]) -> Bindings {
        let raw =
            !parent_params.is_empty() && (self.raw || args.len() != parent_params.len());
        let mut out = Bindings {
            vars: Vec::new(),
            raw,
        };
        for (i, param) in parent_params.iter().enumerate() {
            let erased = FieldType::TypeVariable(param.name.clone()).erasure(parent_params);
            let ty = if raw {
                erased
            } else {
                match &args[i] {
                    TypeArg::Type(ty) => ty.substitute(self),
                    // wildcards cannot appear in an extends clause, fall back to the erasure
                    TypeArg::Wildcard | TypeArg::Extends(_) | TypeArg::Super(_) => erased,
                }
            };
            out.bind(param.name.clone(), ty);
        }
        out
    }
}

impl FieldType {
    /// Replaces bound type variables; unbound ones are kept as they are.
    pub fn substitute(&self, bindings: &Bindings) -> FieldType {
        match self {
            FieldType::Primitive(_) => self.clone(),
            FieldType::TypeVariable(name) => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            FieldType::Array(inner) => inner.substitute(bindings).array_of(),
            FieldType::Class(class) => FieldType::Class(ClassType {
                name: class.name.clone(),
                args: class.args.iter().map(|arg| arg.substitute(bindings)).collect(),
            }),
        }
    }
}

impl TypeArg {
    /// Replaces bound type variables inside this argument
    pub fn substitute(&self, bindings: &Bindings) -> TypeArg {
        match self {
            TypeArg::Type(ty) => TypeArg::Type(ty.substitute(bindings)),
            TypeArg::Wildcard => TypeArg::Wildcard,
            TypeArg::Extends(ty) => TypeArg::Extends(ty.substitute(bindings)),
            TypeArg::Super(ty) => TypeArg::Super(ty.substitute(bindings)),
        }
    }
}
