//! Name-driven construction of host instances.
//!
//! [`RuntimeBuilder::begin`] describes a type, allocates an instance without running any
//! constructor, and hands back a [`BuilderInstance`] whose fields are set by name:
//!
//! ```
//! # use hollow_core::{ClassDecl, ClassRegistry, FieldDecl, FieldType, TypeModel};
//! # use hollow_reflect::{RuntimeBuilder, Value};
//! # fn main() -> Result<(), hollow_reflect::ReflectError> {
//! let registry = ClassRegistry::new().with(
//!     ClassDecl::class("com.example.Point")
//!         .field(FieldDecl::new("x", FieldType::INT).private().final_())
//!         .field(FieldDecl::new("y", FieldType::INT).private().final_()),
//! );
//! let builder = RuntimeBuilder::new(TypeModel::new(registry));
//!
//! let point = builder.begin("com.example.Point")?.set("x", 3)?.set("y", 4)?.build()?;
//! assert_eq!(builder.begin("com.example.Point")?.get("x")?, Value::Int(0));
//! # let _ = point;
//! # Ok(())
//! # }
//! ```
//!
//! Fields that are never set keep their default value; partial construction is legal.

use alloc::sync::Arc;

use hollow_core::{ClassRegistry, FieldDescriptor, MetadataSource, TypeDescriptor, TypeModel};

use crate::log::{debug, trace};
use crate::{ObjectRef, ReflectError, Value, accessor, allocate};

/// Creates [`BuilderInstance`]s for the types of one [`TypeModel`]
pub struct RuntimeBuilder<S = ClassRegistry> {
    model: TypeModel<S>,
}

impl<S: MetadataSource> RuntimeBuilder<S> {
    /// A builder over `model`
    pub fn new(model: TypeModel<S>) -> Self {
        Self { model }
    }

    /// The underlying type model
    pub fn model(&self) -> &TypeModel<S> {
        &self.model
    }

    /// Describes and allocates `type_name`
    pub fn begin(&self, type_name: &str) -> Result<BuilderInstance, ReflectError> {
        let descriptor = self.model.describe(type_name)?;
        BuilderInstance::new(descriptor)
    }
}

impl<S: MetadataSource> From<TypeModel<S>> for RuntimeBuilder<S> {
    fn from(model: TypeModel<S>) -> Self {
        Self::new(model)
    }
}

/// State of a builder instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuilderState {
    /// Fields can be read and written
    Active,
    /// `build()` returned the instance; the builder cannot be reused
    Built,
}

/// One allocated, not yet constructed object plus the descriptor used to allocate it.
///
/// A builder is single-use: after [`build`](Self::build) every operation, `build` included,
/// fails with [`ReflectError::AlreadyBuilt`]. Build a fresh instance per object.
///
/// Builders are meant for one owner on one thread. They hold `Rc` references and are
/// therefore neither `Send` nor `Sync`; sharing one across threads does not compile.
pub struct BuilderInstance {
    descriptor: Arc<TypeDescriptor>,
    instance: ObjectRef,
    state: BuilderState,
}

impl BuilderInstance {
    /// Allocates an instance for an already described type
    pub fn new(descriptor: Arc<TypeDescriptor>) -> Result<Self, ReflectError> {
        let instance = allocate(&descriptor)?;
        trace!("begin {}", descriptor.name());
        Ok(Self {
            descriptor,
            instance,
            state: BuilderState::Active,
        })
    }

    /// The descriptor of the type being built
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// Whether [`build`](Self::build) was called
    pub fn is_built(&self) -> bool {
        self.state == BuilderState::Built
    }

    fn require_active(&self) -> Result<(), ReflectError> {
        if self.state == BuilderState::Active {
            Ok(())
        } else {
            Err(ReflectError::AlreadyBuilt {
                type_name: self.descriptor.name().to_string(),
            })
        }
    }

    /// Finds the one field called `name` anywhere in the hierarchy
    pub fn resolve(&self, name: &str) -> Result<&Arc<FieldDescriptor>, ReflectError> {
        match self.descriptor.fields_named(name) {
            [] => Err(ReflectError::UnknownField {
                type_name: self.descriptor.name().to_string(),
                field: name.to_string(),
                known: self
                    .descriptor
                    .field_names()
                    .map(ToString::to_string)
                    .collect(),
            }),
            [field] => Ok(field),
            shadowed => Err(ReflectError::AmbiguousField {
                type_name: self.descriptor.name().to_string(),
                field: name.to_string(),
                owners: shadowed.iter().map(|f| f.owner.clone()).collect(),
            }),
        }
    }

    /// Finds the field called `name` declared by `owner`. The owner is a binary name, or a
    /// simple name when no two levels share it.
    pub fn resolve_qualified(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<&Arc<FieldDescriptor>, ReflectError> {
        let level = self.descriptor.level(owner).or_else(|| {
            let mut by_simple = self
                .descriptor
                .levels()
                .filter(|level| level.simple_name() == owner);
            match (by_simple.next(), by_simple.next()) {
                (Some(level), None) => Some(level),
                _ => None,
            }
        });
        let level = level.ok_or_else(|| ReflectError::NotInHierarchy {
            type_name: self.descriptor.name().to_string(),
            owner: owner.to_string(),
            levels: self
                .descriptor
                .levels()
                .map(|level| level.name().to_string())
                .collect(),
        })?;

        level
            .fields()
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| {
                let mut known: Vec<String> =
                    level.fields().iter().map(|f| f.name.clone()).collect();
                known.sort();
                ReflectError::UnknownField {
                    type_name: level.name().to_string(),
                    field: name.to_string(),
                    known,
                }
            })
    }

    /// Sets the field called `name`, which must be unambiguous across the hierarchy
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, ReflectError> {
        self.require_active()?;
        let field = self.resolve(name)?.clone();
        accessor::set(&self.instance, &field, value)?;
        Ok(self)
    }

    /// Sets the field called `name` declared by `owner`
    pub fn set_qualified(
        &mut self,
        owner: &str,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ReflectError> {
        self.require_active()?;
        let field = self.resolve_qualified(owner, name)?.clone();
        accessor::set(&self.instance, &field, value)?;
        Ok(self)
    }

    /// Sets a field by descriptor, without any name lookup
    pub fn set_field(
        &mut self,
        field: &FieldDescriptor,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ReflectError> {
        self.require_active()?;
        accessor::set(&self.instance, field, value)?;
        Ok(self)
    }

    /// Reads the field called `name`
    pub fn get(&self, name: &str) -> Result<Value, ReflectError> {
        self.require_active()?;
        accessor::get(&self.instance, self.resolve(name)?)
    }

    /// Reads the field called `name` declared by `owner`
    pub fn get_qualified(&self, owner: &str, name: &str) -> Result<Value, ReflectError> {
        self.require_active()?;
        accessor::get(&self.instance, self.resolve_qualified(owner, name)?)
    }

    /// Reads a field by descriptor
    pub fn get_field(&self, field: &FieldDescriptor) -> Result<Value, ReflectError> {
        self.require_active()?;
        accessor::get(&self.instance, field)
    }

    /// Returns the instance. Unset fields keep their default values.
    pub fn build(&mut self) -> Result<ObjectRef, ReflectError> {
        self.require_active()?;
        self.state = BuilderState::Built;
        debug!("built {}", self.descriptor.name());
        Ok(self.instance.clone())
    }
}

impl core::fmt::Debug for BuilderInstance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BuilderInstance")
            .field("type", &self.descriptor.name())
            .field("state", &self.state)
            .finish()
    }
}
