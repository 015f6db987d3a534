use std::collections::BTreeSet;

use hollow_core::{
    Bindings, ClassKind, FieldType, MetadataSource, ModelError, PrimitiveKind, TypeArg,
    TypeDescriptor, TypeModel, Visibility, is_anonymous_or_local, package_name, simple_name,
};

use crate::imports::{ImportPlan, referenced_classes};
use crate::log::{debug, trace};
use crate::naming::is_java_identifier;
use crate::writer::{CodeWriter, string_literal};
use crate::{EmitError, NameResolver, NamingPlan, PlanEntry};

/// First line of every generated file
pub const GENERATED_HEADER: &str = "// Generated by hollow. Do not edit.";

/// Knobs for [`SourceEmitter`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    builder_name: Option<String>,
    package: Option<String>,
    header: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            builder_name: None,
            package: None,
            header: true,
        }
    }
}

impl EmitOptions {
    /// Default options: `<Simple>Builder` in the target's package, with a header comment
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the simple name of the generated class
    pub fn builder_name(mut self, name: impl Into<String>) -> Self {
        self.builder_name = Some(name.into());
        self
    }

    /// Places the generated class in another package; the empty string is the default
    /// package
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Whether to start the file with [`GENERATED_HEADER`]
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    fn validate(&self) -> Result<(), EmitError> {
        if let Some(name) = &self.builder_name {
            if !is_java_identifier(name) {
                return Err(EmitError::InvalidOption {
                    option: "builder name",
                    value: name.clone(),
                    reason: "not a valid Java identifier",
                });
            }
        }
        if let Some(package) = &self.package {
            if !package.is_empty() && !package.split('.').all(is_java_identifier) {
                return Err(EmitError::InvalidOption {
                    option: "package",
                    value: package.clone(),
                    reason: "not a valid Java package name",
                });
            }
        }
        Ok(())
    }
}

/// Renders the Java source of a builder class for one target type.
///
/// The generated class allocates the target without running a constructor and writes
/// every field through `sun.misc.Unsafe`, one setter per [`PlanEntry`]. Like the runtime
/// builder it can build only once.
#[derive(Clone, Debug, Default)]
pub struct SourceEmitter {
    options: EmitOptions,
}

impl SourceEmitter {
    /// An emitter using the given options
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    /// The options in use
    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Produces one compilation unit for `descriptor`, naming setters after `plan`
    pub fn emit(&self, descriptor: &TypeDescriptor, plan: &NamingPlan) -> Result<String, EmitError> {
        self.options.validate()?;
        check_target(descriptor)?;
        check_plan(descriptor, plan)?;

        let package = self
            .options
            .package
            .clone()
            .unwrap_or_else(|| descriptor.package().to_string());
        check_reachable(descriptor, &package)?;

        let builder_simple = self
            .options
            .builder_name
            .clone()
            .unwrap_or_else(|| default_builder_name(descriptor.name()));
        let builder = if package.is_empty() {
            builder_simple.clone()
        } else {
            format!("{package}.{builder_simple}")
        };
        if builder == descriptor.name() {
            return Err(EmitError::InvalidOption {
                option: "builder name",
                value: builder_simple,
                reason: "the builder would replace its own target",
            });
        }

        let setters = parameter_types(descriptor, plan);
        let mut referenced = BTreeSet::new();
        for param in descriptor.type_params() {
            for bound in &param.bounds {
                referenced_classes(bound, &mut referenced);
            }
        }
        for (_, ty) in &setters {
            referenced_classes(ty, &mut referenced);
        }

        let unsupported = |reason: String| EmitError::UnsupportedType {
            type_name: descriptor.name().to_string(),
            reason,
        };
        let mut imports = ImportPlan::new(&builder, descriptor.type_params());
        imports.claim(descriptor.name()).map_err(unsupported)?;
        imports.claim_all(&referenced).map_err(unsupported)?;

        debug!(
            "emitting {builder} for {descriptor} with {} setters",
            setters.len()
        );
        let unit = Unit {
            descriptor,
            builder_simple: &builder_simple,
            imports: &imports,
            setters: &setters,
        };
        let mut w = CodeWriter::new();
        if self.options.header {
            w.line(GENERATED_HEADER).blank();
        }
        if !package.is_empty() {
            w.line(format!("package {package};")).blank();
        }
        let mut any_import = false;
        for import in imports.imports() {
            w.line(format!("import {import};"));
            any_import = true;
        }
        if any_import {
            w.blank();
        }
        unit.write_class(&mut w);
        Ok(w.finish())
    }
}

/// Describes `type_name`, plans its setter names and emits its builder.
///
/// Unlike [`SourceEmitter::emit`] this also looks at the metadata of other classes. It
/// rejects targets nested inside private classes, and targets whose setters or type
/// parameters would name a class the builder's package cannot access (a private nested
/// class, a non-public class of another package, a default-package class, an anonymous
/// class). Such a parameter is never widened to `Object`; the target is refused with the
/// offending field named instead.
pub fn generate<S: MetadataSource>(
    model: &TypeModel<S>,
    type_name: &str,
    options: &EmitOptions,
) -> Result<String, EmitError> {
    let descriptor = model.describe(type_name)?;
    check_enclosing(model, &descriptor)?;
    let plan = NameResolver::plan(&descriptor)?;
    let package = options
        .package
        .clone()
        .unwrap_or_else(|| descriptor.package().to_string());
    check_referenced(model, &descriptor, &plan, &package)?;
    SourceEmitter::new(options.clone()).emit(&descriptor, &plan)
}

fn check_target(descriptor: &TypeDescriptor) -> Result<(), EmitError> {
    let reason = match descriptor.kind() {
        ClassKind::Primitive | ClassKind::Array => Some("it is not a class"),
        ClassKind::Interface => Some("interfaces have no instances of their own"),
        ClassKind::Annotation => Some("annotation interfaces have no instances of their own"),
        ClassKind::Enum => Some("enum instances are fixed to their constants"),
        ClassKind::Record => Some("record fields cannot be written after allocation"),
        ClassKind::Class if descriptor.is_abstract() => Some("abstract classes cannot be allocated"),
        ClassKind::Class => None,
    };
    let reason = reason
        .or_else(|| {
            (descriptor.visibility() == Visibility::Private)
                .then_some("private classes cannot be referenced from a builder")
        })
        .or_else(|| {
            is_anonymous_or_local(descriptor.name())
                .then_some("anonymous and local classes have no usable name")
        });
    match reason {
        Some(reason) => Err(EmitError::UnsupportedType {
            type_name: descriptor.name().to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

fn check_plan(descriptor: &TypeDescriptor, plan: &NamingPlan) -> Result<(), EmitError> {
    let mismatch = || EmitError::PlanMismatch {
        expected: descriptor.name().to_string(),
        actual: plan.type_name().to_string(),
    };
    if plan.type_name() != descriptor.name() || plan.len() != descriptor.all_fields().count() {
        return Err(mismatch());
    }
    if plan
        .entries()
        .iter()
        .any(|entry| entry.owner != entry.field.owner || !descriptor.contains_field(&entry.field))
    {
        return Err(mismatch());
    }
    Ok(())
}

fn check_reachable(descriptor: &TypeDescriptor, package: &str) -> Result<(), EmitError> {
    let reason = if descriptor.package().is_empty() && !package.is_empty() {
        Some(format!(
            "default-package classes cannot be referenced from package {package}"
        ))
    } else if descriptor.visibility() != Visibility::Public && descriptor.package() != package {
        Some(format!(
            "{} classes are only reachable from package {}, not from {package}",
            descriptor.visibility(),
            descriptor.package()
        ))
    } else {
        None
    };
    match reason {
        Some(reason) => Err(EmitError::UnsupportedType {
            type_name: descriptor.name().to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn check_enclosing<S: MetadataSource>(
    model: &TypeModel<S>,
    descriptor: &TypeDescriptor,
) -> Result<(), EmitError> {
    let name = descriptor.name();
    let class_start = match descriptor.package().len() {
        0 => 0,
        len => len + 1,
    };
    for (idx, _) in name.match_indices('$').filter(|(idx, _)| *idx > class_start) {
        let enclosing = &name[..idx];
        match model.describe(enclosing) {
            Ok(outer) if outer.visibility() == Visibility::Private => {
                return Err(EmitError::UnsupportedType {
                    type_name: name.to_string(),
                    reason: format!("it is nested inside private class {enclosing}"),
                });
            }
            Ok(_) => {}
            Err(ModelError::NoMetadata { .. }) => {
                trace!("no metadata for {enclosing}, assuming it is accessible");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn check_referenced<S: MetadataSource>(
    model: &TypeModel<S>,
    descriptor: &TypeDescriptor,
    plan: &NamingPlan,
    package: &str,
) -> Result<(), EmitError> {
    let setters = parameter_types(descriptor, plan);
    let mut users: Vec<(String, Vec<&str>)> = Vec::new();
    for param in descriptor.type_params() {
        let mut classes = Vec::new();
        for bound in &param.bounds {
            bound.visit_classes(&mut |name| classes.push(name));
        }
        users.push((format!("type parameter {}", param.name), classes));
    }
    for (entry, ty) in &setters {
        let mut classes = Vec::new();
        ty.visit_classes(&mut |name| classes.push(name));
        users.push((format!("field {}", entry.field.qualified_name()), classes));
    }

    for (user, classes) in users {
        for class in classes {
            if class == descriptor.name() {
                continue;
            }
            if let Some(why) = unreachable_class(model, class, package) {
                return Err(EmitError::UnsupportedType {
                    type_name: descriptor.name().to_string(),
                    reason: format!("{user} refers to a class the builder cannot name: {why}"),
                });
            }
        }
    }
    Ok(())
}

/// Why `class` cannot be named from `package`, checking the class and every class it is
/// nested in. Classes without metadata are taken to be public.
fn unreachable_class<S: MetadataSource>(
    model: &TypeModel<S>,
    class: &str,
    package: &str,
) -> Option<String> {
    if is_anonymous_or_local(class) {
        return Some(format!("{class} is anonymous or local"));
    }
    let class_package = package_name(class);
    if class_package.is_empty() && !package.is_empty() {
        return Some(format!("{class} is in the default package"));
    }
    let class_start = match class_package.len() {
        0 => 0,
        len => len + 1,
    };
    let enclosing = class
        .match_indices('$')
        .filter(|(idx, _)| *idx > class_start)
        .map(|(idx, _)| &class[..idx]);
    for name in enclosing.chain(core::iter::once(class)) {
        let Some(decl) = model.source().class_decl(name) else {
            trace!("no metadata for {name}, assuming it is public");
            continue;
        };
        match decl.visibility {
            Visibility::Public => {}
            Visibility::Private => return Some(format!("{name} is private")),
            visibility if class_package != package => {
                return Some(format!("{name} is {visibility} in package {class_package}"));
            }
            _ => {}
        }
    }
    None
}

/// Parameter types of the setters, in plan order: each field's declared type seen from the
/// target, with the type arguments of every `extends` clause on the way substituted. Fields
/// of levels reached through a raw `extends` clause are erased.
fn parameter_types<'p>(
    descriptor: &TypeDescriptor,
    plan: &'p NamingPlan,
) -> Vec<(&'p PlanEntry, FieldType)> {
    let mut bindings = Bindings::identity(descriptor.type_params());
    let mut levels = Vec::new();
    let mut child = None::<&TypeDescriptor>;
    for level in descriptor.levels() {
        if let Some(child) = child {
            bindings = bindings.for_superclass(level.type_params(), child.superclass_args());
        }
        levels.push((level, bindings.clone()));
        child = Some(level);
    }

    plan.entries()
        .iter()
        .map(|entry| {
            let ty = levels
                .iter()
                .find(|(level, _)| level.name() == entry.owner)
                .map(|(level, bindings)| {
                    bindings.member_type(&entry.field.declared_type, level.type_params())
                })
                .unwrap_or_else(|| entry.field.erased_type.clone());
            (entry, ty)
        })
        .collect()
}

/// The `put` method of `sun.misc.Unsafe` that stores a value of this type
fn put_method(ty: &FieldType, volatile: bool) -> String {
    let kind = match ty.as_primitive() {
        Some(PrimitiveKind::Boolean) => "Boolean",
        Some(PrimitiveKind::Byte) => "Byte",
        Some(PrimitiveKind::Char) => "Char",
        Some(PrimitiveKind::Short) => "Short",
        Some(PrimitiveKind::Int) => "Int",
        Some(PrimitiveKind::Long) => "Long",
        Some(PrimitiveKind::Float) => "Float",
        Some(PrimitiveKind::Double) => "Double",
        None => "Object",
    };
    if volatile {
        format!("put{kind}Volatile")
    } else {
        format!("put{kind}")
    }
}

struct Unit<'a> {
    descriptor: &'a TypeDescriptor,
    builder_simple: &'a str,
    imports: &'a ImportPlan,
    setters: &'a [(&'a PlanEntry, FieldType)],
}

impl Unit<'_> {
    fn write_class(&self, w: &mut CodeWriter) {
        let descriptor = self.descriptor;
        let params = descriptor.type_params();
        let builder_type = if params.is_empty() {
            self.builder_simple.to_string()
        } else {
            let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
            format!("{}<{}>", self.builder_simple, names.join(", "))
        };
        let declaration = if params.is_empty() {
            self.builder_simple.to_string()
        } else {
            let params: Vec<String> = params.iter().map(|p| self.imports.render_param(p)).collect();
            format!("{}<{}>", self.builder_simple, params.join(", "))
        };
        let raw_target = self
            .imports
            .render(&FieldType::class(descriptor.name()));

        w.line(format!(
            "/** Builds {{@code {}}} instances without running any of its constructors. */",
            descriptor.name()
        ));
        w.block(format!("public final class {declaration}"), |w| {
            w.line("private static final sun.misc.Unsafe UNSAFE = loadUnsafe();");
            for (entry, _) in self.setters {
                w.line(format!(
                    "private static final long OFFSET_{} = offset({}, {});",
                    entry.identifier,
                    self.owner_class(&raw_target, &entry.owner),
                    string_literal(&entry.field.name)
                ));
            }
            w.blank();
            w.line("private final Object instance;");
            w.line("private boolean built;");
            w.blank();

            w.block(format!("public {}()", self.builder_simple), |w| {
                w.open("try")
                    .line(format!(
                        "this.instance = UNSAFE.allocateInstance({raw_target}.class);"
                    ))
                    .reopen("catch (InstantiationException e)")
                    .line(format!(
                        "throw new IllegalStateException({}, e);",
                        string_literal(&format!("cannot allocate {}", descriptor.name()))
                    ))
                    .close();
            });

            for (entry, ty) in self.setters {
                w.blank();
                w.line(format!("/** Sets {{@code {}}}. */", entry.field.qualified_name()));
                w.block(
                    format!(
                        "public {builder_type} {}({} {})",
                        entry.setter,
                        self.imports.render(ty),
                        entry.parameter
                    ),
                    |w| {
                        w.line("checkNotBuilt();");
                        w.line(format!(
                            "UNSAFE.{}(instance, OFFSET_{}, {});",
                            put_method(ty, entry.field.is_volatile()),
                            entry.identifier,
                            entry.parameter
                        ));
                        w.line("return this;");
                    },
                );
            }

            w.blank();
            w.line("/** Returns the populated instance; the builder cannot be used afterwards. */");
            let target = self.imports.render(&target_type(descriptor));
            if !params.is_empty() {
                w.line("@SuppressWarnings(\"unchecked\")");
            }
            w.block(format!("public {target} build()"), |w| {
                w.line("checkNotBuilt();");
                w.line("built = true;");
                w.line(format!("return ({target}) instance;"));
            });

            w.blank();
            w.block("private void checkNotBuilt()", |w| {
                w.block("if (built)", |w| {
                    w.line(format!(
                        "throw new IllegalStateException({});",
                        string_literal(&format!(
                            "builder for {} was already used",
                            descriptor.name()
                        ))
                    ));
                });
            });

            w.blank();
            w.block("private static sun.misc.Unsafe loadUnsafe()", |w| {
                w.open("try")
                    .line("java.lang.reflect.Field field = sun.misc.Unsafe.class.getDeclaredField(\"theUnsafe\");")
                    .line("field.setAccessible(true);")
                    .line("return (sun.misc.Unsafe) field.get(null);")
                    .reopen("catch (ReflectiveOperationException e)")
                    .line("throw new IllegalStateException(\"sun.misc.Unsafe is not available\", e);")
                    .close();
            });

            w.blank();
            w.block("private static long offset(Class<?> owner, String name)", |w| {
                w.open("try")
                    .line("return UNSAFE.objectFieldOffset(owner.getDeclaredField(name));")
                    .reopen("catch (ReflectiveOperationException e)")
                    .line("throw new IllegalStateException(\"no field \" + name + \" in \" + owner.getName(), e);")
                    .close();
            });
        });
    }

    /// `Target.class`, followed by one `getSuperclass()` per level between the target and
    /// `owner`. Ancestors are reached this way because they need not be accessible.
    fn owner_class(&self, raw_target: &str, owner: &str) -> String {
        let depth = self
            .descriptor
            .levels()
            .position(|level| level.name() == owner)
            .unwrap_or(0);
        let mut out = format!("{raw_target}.class");
        for _ in 0..depth {
            out.push_str(".getSuperclass()");
        }
        out
    }
}

/// The target parameterized by its own type variables
fn target_type(descriptor: &TypeDescriptor) -> FieldType {
    FieldType::Class(hollow_core::ClassType::parameterized(
        descriptor.name(),
        descriptor
            .type_params()
            .iter()
            .map(|p| TypeArg::Type(FieldType::type_var(p.name.clone())))
            .collect(),
    ))
}

/// Default simple name of the builder for a binary class name
pub fn default_builder_name(type_name: &str) -> String {
    format!("{}Builder", simple_name(type_name))
}
