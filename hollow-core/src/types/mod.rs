mod primitive;
pub use primitive::*;

mod field_type;
pub use field_type::*;

mod bindings;
pub use bindings::*;

mod flags;
pub use flags::*;

mod names;
pub use names::*;
