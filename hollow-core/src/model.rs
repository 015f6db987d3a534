use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use crate::log::{debug, trace};
use crate::{
    ClassKind, ClassRegistry, FieldDescriptor, MetadataSource, ModelError, OBJECT, PrimitiveKind,
    TypeDescriptor, normalize_type_name,
};

/// Turns host metadata into [`TypeDescriptor`]s and caches them.
///
/// Descriptors are immutable, so the cache can hand out the same `Arc` to every caller.
/// Concurrent first lookups of the same type may both compute it; the first one to reach
/// the cache wins and the other result (which is equal) is dropped.
pub struct TypeModel<S = ClassRegistry> {
    source: S,
    cache: RwLock<HashMap<String, Arc<TypeDescriptor>>>,
}

impl<S: MetadataSource> TypeModel<S> {
    /// A model reading declarations from `source`
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The metadata source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of descriptors computed so far
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Describes a type and its superclass chain up to (excluding) `java.lang.Object`.
    ///
    /// Accepts binary names (`com.example.Outer$Inner`), primitive names, and array names in
    /// either source (`int[]`) or JVM (`[I`) form. Primitives and arrays get a descriptor
    /// without fields so callers can report them precisely.
    pub fn describe(&self, name: &str) -> Result<Arc<TypeDescriptor>, ModelError> {
        let name = normalize_type_name(name)?;
        self.describe_in(&name, None, &mut Vec::new())
    }

    fn cached(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn describe_in(
        &self,
        name: &str,
        required_by: Option<&str>,
        visiting: &mut Vec<String>,
    ) -> Result<Arc<TypeDescriptor>, ModelError> {
        if let Some(hit) = self.cached(name) {
            return Ok(hit);
        }

        if let Some(pos) = visiting.iter().position(|n| n == name) {
            let mut chain = visiting[pos..].to_vec();
            chain.push(name.to_string());
            return Err(ModelError::CyclicHierarchy { chain });
        }

        let descriptor = self.build(name, required_by, visiting)?;
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(cache
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(descriptor))
            .clone())
    }

    fn build(
        &self,
        name: &str,
        required_by: Option<&str>,
        visiting: &mut Vec<String>,
    ) -> Result<TypeDescriptor, ModelError> {
        if PrimitiveKind::from_keyword(name).is_some() {
            return Ok(TypeDescriptor::bare(name.to_string(), ClassKind::Primitive));
        }
        if name.ends_with("[]") {
            let mut array = TypeDescriptor::bare(name.to_string(), ClassKind::Array);
            array.supertypes.insert("java.lang.Cloneable".to_string());
            array.supertypes.insert("java.io.Serializable".to_string());
            return Ok(array);
        }
        if name == OBJECT {
            let mut root = TypeDescriptor::bare(name.to_string(), ClassKind::Class);
            root.flags = crate::ClassFlags::EMPTY;
            return Ok(root);
        }

        let decl = self
            .source
            .class_decl(name)
            .ok_or_else(|| ModelError::NoMetadata {
                name: name.to_string(),
                required_by: required_by.map(ToString::to_string),
            })?;

        visiting.push(name.to_string());
        let parent = match &decl.superclass {
            Some(superclass) if superclass.name != OBJECT => {
                let parent = self.describe_in(&superclass.name, Some(name), visiting)?;
                if !parent.kind.can_be_superclass() {
                    return Err(ModelError::InvalidSuperclass {
                        name: name.to_string(),
                        superclass: superclass.name.clone(),
                        kind: parent.kind,
                    });
                }
                Some(parent)
            }
            _ => None,
        };
        visiting.pop();

        let slot_base = parent.as_ref().map(|p| p.slot_count()).unwrap_or(0);
        let mut seen = HashSet::new();
        let mut fields: Vec<Arc<FieldDescriptor>> = Vec::new();
        for field in &decl.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateField {
                    name: name.to_string(),
                    field: field.name.clone(),
                });
            }
            if !field.is_instance_field() {
                trace!("{name}: skipping {} field `{}`", field.flags, field.name);
                continue;
            }
            fields.push(Arc::new(FieldDescriptor {
                name: field.name.clone(),
                declared_type: field.ty.clone(),
                erased_type: field.ty.erasure(&decl.type_params),
                visibility: field.visibility,
                flags: field.flags,
                owner: name.to_string(),
                slot: slot_base + fields.len(),
            }));
        }

        let mut index: BTreeMap<String, Vec<Arc<FieldDescriptor>>> = parent
            .as_ref()
            .map(|p| p.index.clone())
            .unwrap_or_default();
        for field in &fields {
            index
                .entry(field.name.clone())
                .or_default()
                .insert(0, field.clone());
        }

        let mut supertypes = BTreeSet::new();
        supertypes.insert(name.to_string());
        if let Some(parent) = &parent {
            supertypes.extend(parent.supertypes.iter().cloned());
        }
        let implicit: &[&str] = match decl.kind {
            ClassKind::Enum => &["java.lang.Enum", "java.lang.Comparable", "java.io.Serializable"],
            ClassKind::Record => &["java.lang.Record"],
            ClassKind::Annotation => &["java.lang.annotation.Annotation"],
            _ => &[],
        };
        supertypes.extend(implicit.iter().map(|s| s.to_string()));
        for interface in &decl.interfaces {
            self.collect_interfaces(&interface.name, &mut supertypes);
        }

        debug!(
            "described {name}: {} own fields, {} slots, {} constructors bypassable",
            fields.len(),
            slot_base + fields.len(),
            decl.constructors.len()
        );

        Ok(TypeDescriptor {
            name: name.to_string(),
            kind: decl.kind,
            flags: decl.flags,
            visibility: decl.visibility,
            type_params: decl.type_params.clone(),
            superclass_args: match (&parent, &decl.superclass) {
                (Some(_), Some(superclass)) => superclass.args.clone(),
                _ => Vec::new(),
            },
            interfaces: decl.interfaces.iter().map(|i| i.name.clone()).collect(),
            fields,
            constructors: decl.constructors.clone(),
            enum_constants: decl.enum_constants.clone(),
            parent,
            slot_base,
            supertypes,
            index,
        })
    }

    /// Adds `name` and, if the source knows it, its super-interfaces
    fn collect_interfaces(&self, name: &str, out: &mut BTreeSet<String>) {
        if !out.insert(name.to_string()) {
            return;
        }
        if let Some(decl) = self.source.class_decl(name) {
            for parent in &decl.interfaces {
                self.collect_interfaces(&parent.name, out);
            }
        }
    }
}

impl<S: MetadataSource + Default> Default for TypeModel<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
