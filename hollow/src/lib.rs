//! Builds objects of a host class hierarchy without running any constructor.
//!
//! hollow works from class metadata ([`TypeModel`]) and offers two ways to construct
//! instances:
//!
//! - at runtime, through [`RuntimeBuilder`]: allocate, set fields by name (qualified by the
//!   declaring class when a name is shadowed), build;
//! - ahead of time, through [`generate`]: emit the Java source of a typed builder class
//!   whose setter names never collide, even across shadowed fields.
//!
//! Both follow the same rules: constructors never run, `final` and private fields are
//! writable, values must already have the field's type, and a builder builds once.
//!
//! ```
//! use hollow::{ClassDecl, ClassRegistry, FieldDecl, FieldType, RuntimeBuilder, TypeModel, Value};
//!
//! let registry = ClassRegistry::new().with(
//!     ClassDecl::class("com.example.Point")
//!         .field(FieldDecl::new("x", FieldType::INT).private().final_())
//!         .field(FieldDecl::new("y", FieldType::INT).private().final_()),
//! );
//! let runtime = RuntimeBuilder::new(TypeModel::new(registry));
//! let mut point = runtime.begin("com.example.Point")?;
//! point.set("x", 3)?.set("y", 4)?;
//! assert_eq!(point.get("y")?, Value::Int(4));
//! let point = point.build()?;
//! assert_eq!(point.class().name(), "com.example.Point");
//! # Ok::<(), hollow::ReflectError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]

pub use hollow_core::*;

#[cfg(feature = "reflect")]
pub use hollow_reflect::*;

#[cfg(feature = "emit")]
pub use hollow_emit::*;

pub use static_assertions;

// Models are shared between threads; runtime builders stay with their owner.
static_assertions::assert_impl_all!(TypeModel: Send, Sync);
static_assertions::assert_impl_all!(TypeDescriptor: Send, Sync);

#[cfg(feature = "reflect")]
static_assertions::assert_impl_all!(RuntimeBuilder: Send, Sync);
#[cfg(feature = "reflect")]
static_assertions::assert_not_impl_any!(BuilderInstance: Send, Sync);
#[cfg(feature = "reflect")]
static_assertions::assert_not_impl_any!(ObjectRef: Send, Sync);
