//! Decides which simple names a generated compilation unit may use.
//!
//! A simple name belongs to whoever claims it first: the builder itself, the target's type
//! variables, the `java.lang` classes the helper code mentions, the target, and then every
//! other referenced top-level class in sorted order. Anything that loses its simple name is
//! written fully qualified.

use std::collections::{BTreeSet, HashMap};

use hollow_core::{
    FieldType, TypeArg, TypeParam, class_part, is_java_lang, package_name, simple_name,
    source_name, top_level_name,
};

use crate::log::trace;

/// `java.lang` classes the generated helper code refers to by simple name
pub(crate) const HELPER_TYPES: &[&str] = &[
    "Object",
    "String",
    "Class",
    "IllegalStateException",
    "InstantiationException",
    "ReflectiveOperationException",
    "SuppressWarnings",
];

#[derive(Clone, Debug, PartialEq, Eq)]
enum Claim {
    /// the simple name denotes this top-level class (binary name)
    Class(String),
    /// the simple name is a type variable of the builder
    TypeVariable,
}

/// Simple-name assignments and the import list of one compilation unit
#[derive(Debug)]
pub(crate) struct ImportPlan {
    package: String,
    names: HashMap<String, Claim>,
    imports: BTreeSet<String>,
}

impl ImportPlan {
    /// Starts a plan for a builder with the given binary name, pre-claiming the names the
    /// builder's own code needs
    pub(crate) fn new(builder: &str, type_params: &[TypeParam]) -> Self {
        let mut plan = Self {
            package: package_name(builder).to_string(),
            names: HashMap::new(),
            imports: BTreeSet::new(),
        };
        plan.names.insert(
            simple_name(builder).to_string(),
            Claim::Class(builder.to_string()),
        );
        for param in type_params {
            plan.names
                .entry(param.name.clone())
                .or_insert(Claim::TypeVariable);
        }
        for helper in HELPER_TYPES {
            plan.names
                .entry(helper.to_string())
                .or_insert_with(|| Claim::Class(format!("java.lang.{helper}")));
        }
        plan
    }

    /// Claims the simple name of the top-level class enclosing `binary_name`, adding an
    /// import when one is needed. Losing the name is not an error, the class is then written
    /// qualified.
    ///
    /// Fails only for default-package classes referenced from a named package, which Java
    /// offers no way to name.
    pub(crate) fn claim(&mut self, binary_name: &str) -> Result<(), String> {
        let top = top_level_name(binary_name);
        let top_package = package_name(top);
        if top_package.is_empty() && !self.package.is_empty() {
            return Err(format!(
                "{binary_name} is in the default package and cannot be referenced from package {}",
                self.package
            ));
        }

        let simple = class_part(top);
        match self.names.get(simple) {
            Some(Claim::Class(owner)) if owner == top => {}
            Some(_) => {
                trace!("`{simple}` is taken, writing {top} qualified");
            }
            None => {
                self.names
                    .insert(simple.to_string(), Claim::Class(top.to_string()));
                if !is_java_lang(top) && top_package != self.package {
                    self.imports.insert(source_name(top));
                }
            }
        }
        Ok(())
    }

    /// Claims every class of `tops`, in order
    pub(crate) fn claim_all(&mut self, tops: &BTreeSet<String>) -> Result<(), String> {
        for top in tops {
            self.claim(top)?;
        }
        Ok(())
    }

    /// Sorted single-type imports, in source form
    pub(crate) fn imports(&self) -> impl Iterator<Item = &str> + '_ {
        self.imports.iter().map(String::as_str)
    }

    /// How a class is written in this compilation unit
    pub(crate) fn class_name(&self, binary_name: &str) -> String {
        let top = top_level_name(binary_name);
        match self.names.get(class_part(top)) {
            Some(Claim::Class(owner)) if owner == top => class_part(binary_name).replace('$', "."),
            _ => source_name(binary_name),
        }
    }

    /// Source form of a type, using simple names wherever the plan allows
    pub(crate) fn render(&self, ty: &FieldType) -> String {
        match ty {
            FieldType::Primitive(kind) => kind.keyword().to_string(),
            FieldType::TypeVariable(name) => name.clone(),
            FieldType::Array(inner) => format!("{}[]", self.render(inner)),
            FieldType::Class(class) => {
                let mut out = self.class_name(&class.name);
                if !class.args.is_empty() {
                    let args: Vec<String> = class.args.iter().map(|a| self.render_arg(a)).collect();
                    out.push('<');
                    out.push_str(&args.join(", "));
                    out.push('>');
                }
                out
            }
        }
    }

    fn render_arg(&self, arg: &TypeArg) -> String {
        match arg {
            TypeArg::Type(ty) => self.render(ty),
            TypeArg::Wildcard => "?".to_string(),
            TypeArg::Extends(ty) => format!("? extends {}", self.render(ty)),
            TypeArg::Super(ty) => format!("? super {}", self.render(ty)),
        }
    }

    /// A type parameter declaration with its bounds: `T extends Number & Comparable<T>`
    pub(crate) fn render_param(&self, param: &TypeParam) -> String {
        let mut out = param.name.clone();
        for (i, bound) in param.bounds.iter().enumerate() {
            out.push_str(if i == 0 { " extends " } else { " & " });
            out.push_str(&self.render(bound));
        }
        out
    }
}

/// Top-level classes referenced by `ty`, collected into `out`
pub(crate) fn referenced_classes(ty: &FieldType, out: &mut BTreeSet<String>) {
    ty.visit_classes(&mut |name| {
        out.insert(top_level_name(name).to_string());
    });
}
