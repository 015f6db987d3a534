//! Class metadata for hollow.
//!
//! A host runtime describes its classes through a [`MetadataSource`] (the in-memory
//! [`ClassRegistry`] is the usual one). The [`TypeModel`] turns those declarations into
//! immutable, cached [`TypeDescriptor`]s: one per class level, linked to their superclass,
//! with every instance field assigned a storage slot.
//!
//! Type names follow the host's conventions: binary names (`com.example.Outer$Inner`),
//! primitive keywords, and arrays in either `int[]` or `[I` form.

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]

extern crate alloc;

mod log;

mod types;
pub use types::*;

mod parse;
pub use parse::*;

mod decl;
pub use decl::*;

mod source;
pub use source::*;

mod descriptor;
pub use descriptor::*;

mod model;
pub use model::*;

mod error;
pub use error::*;
