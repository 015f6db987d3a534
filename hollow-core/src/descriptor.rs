use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{
    ClassFlags, ClassKind, ConstructorDecl, FieldFlags, FieldType, TypeArg, TypeParam, Visibility,
    package_name, simple_name,
};

/// One instance field of one class level.
///
/// Descriptors are immutable and shared: the descriptor of a field declared in `Base` is the
/// same `Arc` in the model of `Base` and of every subclass.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FieldDescriptor {
    /// field name, unique within its owner
    pub name: String,

    /// declared type, type variables of the owner included
    pub declared_type: FieldType,

    /// erased type, what the runtime checks values against
    pub erased_type: FieldType,

    /// access level (irrelevant for writing, kept for emission and diagnostics)
    pub visibility: Visibility,

    /// modifiers
    pub flags: FieldFlags,

    /// binary name of the declaring class
    pub owner: String,

    /// storage index inside an instance; ancestors occupy the lower slots
    pub slot: usize,
}

impl FieldDescriptor {
    /// Whether the field was declared `final`
    pub fn is_final(&self) -> bool {
        self.flags.contains(FieldFlags::FINAL)
    }

    /// Whether the field was declared `volatile`
    pub fn is_volatile(&self) -> bool {
        self.flags.contains(FieldFlags::VOLATILE)
    }

    /// `owner.name`
    pub fn qualified_name(&self) -> String {
        alloc::format!("{}.{}", self.owner, self.name)
    }
}

impl core::fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}.{}", self.declared_type, self.owner, self.name)
    }
}

/// One level of a class hierarchy together with its ancestors.
///
/// Built by [`TypeModel::describe`](crate::TypeModel::describe); immutable afterwards.
#[derive(Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub(crate) name: String,
    pub(crate) kind: ClassKind,
    pub(crate) flags: ClassFlags,
    pub(crate) visibility: Visibility,
    pub(crate) type_params: Vec<TypeParam>,
    pub(crate) superclass_args: Vec<TypeArg>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) fields: Vec<Arc<FieldDescriptor>>,
    pub(crate) constructors: Vec<ConstructorDecl>,
    pub(crate) enum_constants: Vec<String>,
    pub(crate) parent: Option<Arc<TypeDescriptor>>,
    pub(crate) slot_base: usize,
    pub(crate) supertypes: BTreeSet<String>,
    pub(crate) index: BTreeMap<String, Vec<Arc<FieldDescriptor>>>,
}

impl TypeDescriptor {
    /// A descriptor without fields or parent, for primitives, arrays and the root class
    pub(crate) fn bare(name: String, kind: ClassKind) -> Self {
        let mut supertypes = BTreeSet::new();
        supertypes.insert(name.clone());
        Self {
            name,
            kind,
            flags: ClassFlags::FINAL,
            visibility: Visibility::Public,
            type_params: Vec::new(),
            superclass_args: Vec::new(),
            interfaces: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            enum_constants: Vec::new(),
            parent: None,
            slot_base: 0,
            supertypes,
            index: BTreeMap::new(),
        }
    }

    /// Binary name, e.g. `com.example.Outer$Inner`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Innermost simple name, e.g. `Inner`
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Package name, empty for the default package
    pub fn package(&self) -> &str {
        package_name(&self.name)
    }

    /// What kind of type this is
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Class modifiers
    pub fn flags(&self) -> ClassFlags {
        self.flags
    }

    /// Whether the class is declared `abstract` (interfaces always are)
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(ClassFlags::ABSTRACT)
    }

    /// Access level of the class
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Declared type parameters
    pub fn type_params(&self) -> &[TypeParam] {
        &self.type_params
    }

    /// Type arguments passed to the superclass in the `extends` clause; empty when the
    /// superclass is used raw or is not generic
    pub fn superclass_args(&self) -> &[TypeArg] {
        &self.superclass_args
    }

    /// Directly implemented interfaces (binary names)
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Instance fields declared directly on this level, in declaration order
    pub fn fields(&self) -> &[Arc<FieldDescriptor>] {
        &self.fields
    }

    /// Declared constructors; allocation never runs them
    pub fn constructors(&self) -> &[ConstructorDecl] {
        &self.constructors
    }

    /// Enum constant names, for enums
    pub fn enum_constants(&self) -> &[String] {
        &self.enum_constants
    }

    /// The superclass level, `None` when the superclass is the root class
    pub fn parent(&self) -> Option<&Arc<TypeDescriptor>> {
        self.parent.as_ref()
    }

    /// This level followed by every ancestor, most-derived first
    pub fn levels(&self) -> Levels<'_> {
        Levels { next: Some(self) }
    }

    /// Looks up the level declared by `owner`
    pub fn level(&self, owner: &str) -> Option<&TypeDescriptor> {
        self.levels().find(|level| level.name == owner)
    }

    /// Every instance field of the hierarchy, most-derived level first, each level in
    /// declaration order
    pub fn all_fields(&self) -> impl Iterator<Item = &Arc<FieldDescriptor>> + '_ {
        self.levels().flat_map(|level| level.fields.iter())
    }

    /// Number of storage slots an instance of this type needs
    pub fn slot_count(&self) -> usize {
        self.slot_base + self.fields.len()
    }

    /// Every supertype (this class, superclasses, and interfaces), binary names
    pub fn supertypes(&self) -> &BTreeSet<String> {
        &self.supertypes
    }

    /// Whether a value of this type can be assigned to a variable of class `name`
    pub fn is_subtype_of(&self, name: &str) -> bool {
        name == crate::OBJECT || self.supertypes.contains(name)
    }

    /// All fields called `name` across the hierarchy, most-derived declaration first.
    /// More than one entry means the name is shadowed.
    pub fn fields_named(&self, name: &str) -> &[Arc<FieldDescriptor>] {
        self.index.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct field names across the hierarchy, sorted
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    /// Whether the field descriptor belongs to this hierarchy
    pub fn contains_field(&self, field: &FieldDescriptor) -> bool {
        self.level(&field.owner)
            .is_some_and(|level| level.fields.iter().any(|f| **f == *field))
    }
}

/// Iterator over a class and its ancestors, see [`TypeDescriptor::levels`]
pub struct Levels<'a> {
    next: Option<&'a TypeDescriptor>,
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

impl core::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_params.is_empty() {
            f.write_str("<")?;
            for (i, param) in self.type_params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(&param.name)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}
