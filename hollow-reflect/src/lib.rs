//! Constructs host-class instances without running their constructors.
//!
//! - [`allocate`] creates an instance with every field at its default value.
//! - [`accessor`] reads and writes fields regardless of visibility or `final`, checking
//!   assignment compatibility but never converting values.
//! - [`RuntimeBuilder`] and [`BuilderInstance`] combine both behind a fluent, name-driven
//!   API that reports unknown and shadowed field names.

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]

extern crate alloc;

mod log;

mod error;
pub use error::*;

mod value;
pub use value::*;

mod allocator;
pub use allocator::*;

pub mod accessor;

mod builder;
pub use builder::*;
