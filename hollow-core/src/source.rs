use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::collections::HashMap;

use crate::ClassDecl;

/// The host runtime's "describe this class" capability.
///
/// Everything hollow knows about classes flows through this trait; where the declarations
/// come from (a registry filled by hand, a declaration file, a class-file reader) is none of
/// the model's business.
pub trait MetadataSource: Send + Sync {
    /// Returns the declaration for a binary class name, or `None` if the host has no
    /// metadata for it.
    fn class_decl(&self, name: &str) -> Option<Arc<ClassDecl>>;
}

impl<T: MetadataSource + ?Sized> MetadataSource for &T {
    fn class_decl(&self, name: &str) -> Option<Arc<ClassDecl>> {
        (**self).class_decl(name)
    }
}

impl<T: MetadataSource + ?Sized> MetadataSource for Arc<T> {
    fn class_decl(&self, name: &str) -> Option<Arc<ClassDecl>> {
        (**self).class_decl(name)
    }
}

/// An in-memory [`MetadataSource`], keyed by binary name
#[derive(Clone, Debug, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Arc<ClassDecl>>,
}

impl ClassRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaration, returning the one it replaced
    pub fn register(&mut self, decl: ClassDecl) -> Option<Arc<ClassDecl>> {
        self.classes.insert(decl.name.clone(), Arc::new(decl))
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, decl: ClassDecl) -> Self {
        self.register(decl);
        self
    }

    /// Whether a declaration exists for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Number of registered declarations
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered binary names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl MetadataSource for ClassRegistry {
    fn class_decl(&self, name: &str) -> Option<Arc<ClassDecl>> {
        self.classes.get(name).cloned()
    }
}

impl FromIterator<ClassDecl> for ClassRegistry {
    fn from_iter<I: IntoIterator<Item = ClassDecl>>(iter: I) -> Self {
        let mut registry = ClassRegistry::new();
        for decl in iter {
            registry.register(decl);
        }
        registry
    }
}
