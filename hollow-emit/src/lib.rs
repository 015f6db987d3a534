//! Generates Java source for typed builders.
//!
//! [`NameResolver`] gives every instance field of a hierarchy a collision-free setter name,
//! shadowed fields included, and [`SourceEmitter`] turns a descriptor plus its
//! [`NamingPlan`] into one compilation unit: a `<Simple>Builder` class that allocates the
//! target without running a constructor and fills its fields through `sun.misc.Unsafe`.
//!
//! ```
//! use hollow_core::{ClassDecl, ClassRegistry, FieldDecl, FieldType, TypeModel};
//! use hollow_emit::{EmitOptions, generate};
//!
//! let registry = ClassRegistry::new().with(
//!     ClassDecl::class("com.example.Point")
//!         .field(FieldDecl::new("x", FieldType::INT).private().final_())
//!         .field(FieldDecl::new("y", FieldType::INT).private().final_()),
//! );
//! let source = generate(&TypeModel::new(registry), "com.example.Point", &EmitOptions::new())?;
//! assert!(source.contains("public PointBuilder setX(int x) {"));
//! assert!(source.contains("public Point build() {"));
//! # Ok::<(), hollow_emit::EmitError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod log;

mod error;
pub use error::*;

mod naming;
pub use naming::*;

mod imports;

mod writer;
pub use writer::*;

mod emit;
pub use emit::*;
