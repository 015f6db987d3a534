//! Collision-free setter names for every field of a hierarchy.
//!
//! The policy, applied to the levels from the most-derived class up to the root and to each
//! level's fields in declaration order:
//!
//! 1. the first field claiming a name keeps it (so the most-derived declaration wins);
//! 2. a later field with a taken name gets the declaring class' simple name appended,
//!    `name_Base`;
//! 3. if that is taken too, the package-qualified class name is appended instead,
//!    `name_com_example_Base`;
//! 4. if even that is taken, a counter starting at 2 follows, `name_com_example_Base2`.
//!
//! Names are compared by their setter (`set` plus the capitalized identifier), so fields
//! `x` and `X` are told apart as well. Java keywords get a trailing underscore
//! (`class` becomes `class_`) and characters that cannot appear in a Java identifier
//! become underscores.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use hollow_core::{FieldDescriptor, TypeDescriptor};

use crate::EmitError;
use crate::log::{debug, trace};

/// Java reserved words, including the literals and `_`
pub const JAVA_KEYWORDS: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Names the generated setters use for their own state; parameters must not shadow them
const BUILDER_MEMBERS: &[&str] = &["UNSAFE", "instance", "built"];

/// Whether `name` is a Java reserved word
pub fn is_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

/// Whether `name` can be used as-is as a Java identifier
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !is_keyword(name)
}

/// Turns arbitrary text into a Java identifier: invalid characters become `_`, a leading
/// digit gets a `_` prefix, reserved words get a `_` suffix.
pub fn escape_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    for (i, c) in name.chars().enumerate() {
        if i == 0 && c.is_numeric() {
            out.push('_');
        }
        if c.is_alphanumeric() || c == '_' || c == '$' {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() || is_keyword(&out) {
        out.push('_');
    }
    out
}

/// `set` followed by the identifier with its first character upper-cased
pub fn setter_name(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => {
            let mut setter = String::from("set");
            setter.extend(first.to_uppercase());
            setter.push_str(chars.as_str());
            setter
        }
        None => String::from("set"),
    }
}

/// One field's generated names
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanEntry {
    /// binary name of the declaring class
    pub owner: String,

    /// the field
    pub field: Arc<FieldDescriptor>,

    /// collision-free identifier, also used for the field's offset constant
    pub identifier: String,

    /// setter method name
    pub setter: String,

    /// setter parameter name
    pub parameter: String,
}

/// Mapping from every (owner, field) pair of a hierarchy to unique generated names
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamingPlan {
    type_name: String,
    entries: Vec<PlanEntry>,
}

impl NamingPlan {
    /// The type the plan was computed for
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Entries, most-derived level first, declaration order within a level
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Number of fields covered
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the hierarchy has no instance fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for a field declared by `owner`
    pub fn get(&self, owner: &str, field: &str) -> Option<&PlanEntry> {
        self.entries
            .iter()
            .find(|e| e.owner == owner && e.field.name == field)
    }

    /// The entry with the given setter name
    pub fn by_setter(&self, setter: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.setter == setter)
    }
}

/// Computes [`NamingPlan`]s
pub struct NameResolver;

impl NameResolver {
    /// Assigns every instance field of the hierarchy a unique setter
    pub fn plan(descriptor: &TypeDescriptor) -> Result<NamingPlan, EmitError> {
        let mut claimed: HashSet<String> = HashSet::new();
        let mut entries: Vec<PlanEntry> = Vec::new();

        for level in descriptor.levels() {
            let simple = escape_identifier(level.simple_name());
            let qualified = escape_identifier(&level.name().replace(['.', '$'], "_"));

            for field in level.fields() {
                let base = escape_identifier(&field.name);
                let candidates = [
                    base.clone(),
                    format!("{base}_{simple}"),
                    format!("{base}_{qualified}"),
                ];
                let is_free = |identifier: &str| !claimed.contains(&setter_name(identifier));
                let identifier = match candidates.iter().find(|c| is_free(c)) {
                    Some(candidate) => candidate.clone(),
                    None => {
                        let mut counter = 2usize;
                        loop {
                            let numbered = format!("{}{counter}", candidates[2]);
                            if is_free(&numbered) {
                                break numbered;
                            }
                            counter += 1;
                        }
                    }
                };
                if identifier != field.name {
                    trace!("{} is generated as `{identifier}`", field.qualified_name());
                }

                let setter = setter_name(&identifier);
                let parameter = if BUILDER_MEMBERS.contains(&identifier.as_str())
                    || identifier.starts_with("OFFSET_")
                {
                    format!("{identifier}_")
                } else {
                    identifier.clone()
                };
                claimed.insert(setter.clone());
                entries.push(PlanEntry {
                    owner: level.name().to_string(),
                    field: field.clone(),
                    identifier,
                    setter,
                    parameter,
                });
            }
        }

        let plan = NamingPlan {
            type_name: descriptor.name().to_string(),
            entries,
        };
        check_injective(&plan)?;
        debug!("planned {} setters for {}", plan.len(), plan.type_name);
        Ok(plan)
    }
}

/// No two entries may share an identifier, nor a setter
fn check_injective(plan: &NamingPlan) -> Result<(), EmitError> {
    let mut identifiers: HashMap<&str, &PlanEntry> = HashMap::new();
    let mut setters: HashMap<&str, &PlanEntry> = HashMap::new();
    for entry in &plan.entries {
        let clashes = [
            identifiers.insert(&entry.identifier, entry).map(|e| (e, &entry.identifier)),
            setters.insert(&entry.setter, entry).map(|e| (e, &entry.setter)),
        ];
        if let Some((first, name)) = clashes.into_iter().flatten().next() {
            return Err(EmitError::NamingConflict {
                type_name: plan.type_name.clone(),
                identifier: name.clone(),
                first: first.field.qualified_name(),
                second: entry.field.qualified_name(),
            });
        }
    }
    Ok(())
}
