use bitflags::bitflags;

/// Access level of a class or member
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub enum Visibility {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// no modifier
    #[default]
    Package,
    /// `private`
    Private,
}

impl Visibility {
    /// The source modifier, `None` for package access
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Visibility::Public => Some("public"),
            Visibility::Protected => Some("protected"),
            Visibility::Package => None,
            Visibility::Private => Some("private"),
        }
    }
}

impl core::fmt::Display for Visibility {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.keyword().unwrap_or("package-private"))
    }
}

/// What kind of type a declaration describes
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ClassKind {
    /// a regular class (possibly abstract)
    Class,
    /// an interface, including functional interfaces synthesized for lambdas
    Interface,
    /// an annotation interface
    Annotation,
    /// an enum class, whose instances are its constants
    Enum,
    /// a record class
    Record,
    /// one of the eight primitive types
    Primitive,
    /// an array type
    Array,
}

impl ClassKind {
    /// The declaration keyword
    pub const fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Annotation => "@interface",
            ClassKind::Enum => "enum",
            ClassKind::Record => "record",
            ClassKind::Primitive => "primitive",
            ClassKind::Array => "array",
        }
    }

    /// Whether this kind can appear in an `extends` clause of a class
    pub const fn can_be_superclass(self) -> bool {
        matches!(self, ClassKind::Class)
    }
}

impl core::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.keyword())
    }
}

bitflags! {
    /// Modifiers of a field declaration
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u32 {
        /// An empty set of flags
        const EMPTY = 0;

        /// Class-level field, no per-instance storage
        const STATIC = 1 << 0;

        /// Assigned once by constructors; writable here through the raw write path only
        const FINAL = 1 << 1;

        /// Skipped by the default serialization mechanism
        const TRANSIENT = 1 << 2;

        /// Writes must be published with volatile semantics
        const VOLATILE = 1 << 3;

        /// Introduced by the compiler, e.g. `this$0`
        const SYNTHETIC = 1 << 4;

        /// A constant variable: final, primitive or String, initialized with a constant
        /// expression. Reads are inlined by the compiler, so writing it has no effect.
        const CONSTANT = 1 << 5;
    }
}

bitflags! {
    /// Modifiers of a class declaration
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassFlags: u32 {
        /// An empty set of flags
        const EMPTY = 0;

        /// Cannot be instantiated directly
        const ABSTRACT = 1 << 0;

        /// Cannot be subclassed
        const FINAL = 1 << 1;

        /// Introduced by the compiler
        const SYNTHETIC = 1 << 2;

        /// A nested class without an enclosing instance
        const STATIC = 1 << 3;
    }
}

impl Default for FieldFlags {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Default for ClassFlags {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl core::fmt::Display for FieldFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }

        let flags = [
            (FieldFlags::STATIC, "static"),
            (FieldFlags::FINAL, "final"),
            (FieldFlags::TRANSIENT, "transient"),
            (FieldFlags::VOLATILE, "volatile"),
            (FieldFlags::SYNTHETIC, "synthetic"),
            (FieldFlags::CONSTANT, "constant"),
        ];

        let mut is_first = true;
        for (flag, name) in flags {
            if self.contains(flag) {
                if !is_first {
                    write!(f, " ")?;
                }
                is_first = false;
                write!(f, "{}", name)?;
            }
        }

        Ok(())
    }
}
