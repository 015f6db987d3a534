use eyre::Result;
use hollow_emit::{EmitOptions, GENERATED_HEADER, NameResolver, SourceEmitter, generate};

use crate::model;

const POINT_BUILDER: &str = r#"// Generated by hollow. Do not edit.

package com.example;

/** Builds {@code com.example.Point} instances without running any of its constructors. */
public final class PointBuilder {
    private static final sun.misc.Unsafe UNSAFE = loadUnsafe();
    private static final long OFFSET_x = offset(Point.class, "x");
    private static final long OFFSET_y = offset(Point.class, "y");

    private final Object instance;
    private boolean built;

    public PointBuilder() {
        try {
            this.instance = UNSAFE.allocateInstance(Point.class);
        } catch (InstantiationException e) {
            throw new IllegalStateException("cannot allocate com.example.Point", e);
        }
    }

    /** Sets {@code com.example.Point.x}. */
    public PointBuilder setX(int x) {
        checkNotBuilt();
        UNSAFE.putInt(instance, OFFSET_x, x);
        return this;
    }

    /** Sets {@code com.example.Point.y}. */
    public PointBuilder setY(int y) {
        checkNotBuilt();
        UNSAFE.putInt(instance, OFFSET_y, y);
        return this;
    }

    /** Returns the populated instance; the builder cannot be used afterwards. */
    public Point build() {
        checkNotBuilt();
        built = true;
        return (Point) instance;
    }

    private void checkNotBuilt() {
        if (built) {
            throw new IllegalStateException("builder for com.example.Point was already used");
        }
    }

    private static sun.misc.Unsafe loadUnsafe() {
        try {
            java.lang.reflect.Field field = sun.misc.Unsafe.class.getDeclaredField("theUnsafe");
            field.setAccessible(true);
            return (sun.misc.Unsafe) field.get(null);
        } catch (ReflectiveOperationException e) {
            throw new IllegalStateException("sun.misc.Unsafe is not available", e);
        }
    }

    private static long offset(Class<?> owner, String name) {
        try {
            return UNSAFE.objectFieldOffset(owner.getDeclaredField(name));
        } catch (ReflectiveOperationException e) {
            throw new IllegalStateException("no field " + name + " in " + owner.getName(), e);
        }
    }
}
"#;

#[test]
fn point_builder_is_emitted_in_full() -> Result<()> {
    hollow_testhelpers::setup();

    let source = generate(&model(), "com.example.Point", &EmitOptions::new())?;
    assert_eq!(source, POINT_BUILDER);
    Ok(())
}

#[test]
fn emitting_twice_gives_identical_output() -> Result<()> {
    hollow_testhelpers::setup();

    let options = EmitOptions::new();
    let first = generate(&model(), "com.example.Holder", &options)?;
    let second = generate(&model(), "com.example.Holder", &options)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn inherited_fields_are_reached_through_the_superclass_chain() -> Result<()> {
    hollow_testhelpers::setup();

    let source = generate(&model(), "com.example.Leaf", &EmitOptions::new())?;
    for line in [
        r#"private static final long OFFSET_name = offset(Leaf.class, "name");"#,
        r#"private static final long OFFSET_name_Middle = offset(Leaf.class.getSuperclass(), "name");"#,
        r#"private static final long OFFSET_name_Root = offset(Leaf.class.getSuperclass().getSuperclass(), "name");"#,
        "public LeafBuilder setName_Root(String name_Root) {",
        "UNSAFE.putObject(instance, OFFSET_name_Root, name_Root);",
    ] {
        assert!(source.contains(line), "missing `{line}` in:\n{source}");
    }
    Ok(())
}

#[test]
fn generic_targets_keep_their_type_parameters() -> Result<()> {
    hollow_testhelpers::setup();

    let source = generate(&model(), "com.example.Box", &EmitOptions::new())?;
    for line in [
        "import java.util.List;",
        "public final class BoxBuilder<T extends Number> {",
        "this.instance = UNSAFE.allocateInstance(Box.class);",
        "public BoxBuilder<T> setValue(T value) {",
        "public BoxBuilder<T> setHistory(List<T> history) {",
        "    @SuppressWarnings(\"unchecked\")\n    public Box<T> build() {",
        "return (Box<T>) instance;",
    ] {
        assert!(source.contains(line), "missing `{line}` in:\n{source}");
    }
    Ok(())
}

#[test]
fn superclass_type_arguments_are_substituted() -> Result<()> {
    hollow_testhelpers::setup();

    let source = generate(&model(), "com.example.IntBox", &EmitOptions::new())?;
    for line in [
        "public final class IntBoxBuilder {",
        "public IntBoxBuilder setLabel(String label) {",
        "public IntBoxBuilder setValue(Integer value) {",
        "public IntBoxBuilder setHistory(List<Integer> history) {",
        r#"offset(IntBox.class.getSuperclass(), "value")"#,
        "public IntBox build() {",
    ] {
        assert!(source.contains(line), "missing `{line}` in:\n{source}");
    }
    assert!(!source.contains("@SuppressWarnings"));
    Ok(())
}

#[test]
fn raw_superclasses_erase_inherited_fields() -> Result<()> {
    hollow_testhelpers::setup();

    let source = generate(&model(), "com.example.RawBox", &EmitOptions::new())?;
    for line in [
        "public RawBoxBuilder setTags(List<String> tags) {",
        "public RawBoxBuilder setValue(Number value) {",
        "public RawBoxBuilder setHistory(List history) {",
    ] {
        assert!(source.contains(line), "missing `{line}` in:\n{source}");
    }
    assert!(!source.contains("List<Number>"));
    Ok(())
}

#[test]
fn imports_are_sorted_and_conflicts_stay_qualified() -> Result<()> {
    hollow_testhelpers::setup();

    let source = generate(&model(), "com.example.Holder", &EmitOptions::new())?;
    assert!(
        source.contains("package com.example;\n\nimport java.awt.List;\nimport java.util.Map;\n\n/**"),
        "{source}"
    );
    for line in [
        "public HolderBuilder setItems(java.util.List<String> items) {",
        "public HolderBuilder setWidget(List widget) {",
        "public HolderBuilder setEntry(Map.Entry<String, Integer> entry) {",
        "public HolderBuilder setText(com.other.String text) {",
    ] {
        assert!(source.contains(line), "missing `{line}` in:\n{source}");
    }
    Ok(())
}

#[test]
fn volatile_fields_use_volatile_writes() -> Result<()> {
    hollow_testhelpers::setup();

    let source = generate(&model(), "com.example.Counter", &EmitOptions::new())?;
    assert!(source.contains("UNSAFE.putLongVolatile(instance, OFFSET_count, count);"));
    assert!(source.contains("UNSAFE.putObjectVolatile(instance, OFFSET_ref, ref);"));
    Ok(())
}

#[test]
fn escaped_names_keep_the_original_field_literal() -> Result<()> {
    hollow_testhelpers::setup();

    let source = generate(&model(), "com.example.Odd", &EmitOptions::new())?;
    for line in [
        r#"private static final long OFFSET_class_ = offset(Odd.class, "class");"#,
        "public OddBuilder setClass_(int class_) {",
        "UNSAFE.putInt(instance, OFFSET_class_, class_);",
        "public OddBuilder setInstance(Object instance_) {",
        "UNSAFE.putObject(instance, OFFSET_instance, instance_);",
        "UNSAFE.putInt(instance, OFFSET_OFFSET_x, OFFSET_x_);",
    ] {
        assert!(source.contains(line), "missing `{line}` in:\n{source}");
    }
    Ok(())
}

#[test]
fn nested_targets_use_their_source_name() -> Result<()> {
    hollow_testhelpers::setup();

    let source = generate(&model(), "com.example.Outer$Nested", &EmitOptions::new())?;
    assert!(source.contains("public final class NestedBuilder {"));
    assert!(source.contains("UNSAFE.allocateInstance(Outer.Nested.class);"));
    assert!(source.contains("public Outer.Nested build() {"));
    Ok(())
}

#[test]
fn options_rename_relocate_and_drop_the_header() -> Result<()> {
    hollow_testhelpers::setup();

    let options = EmitOptions::new()
        .builder_name("PointMaker")
        .package("com.generated")
        .header(false);
    let source = generate(&model(), "com.example.Point", &options)?;
    assert!(source.starts_with("package com.generated;\n\nimport com.example.Point;\n\n"));
    assert!(!source.contains(GENERATED_HEADER));
    assert!(source.contains("public final class PointMaker {"));
    assert!(source.contains("public PointMaker setX(int x) {"));
    Ok(())
}

#[test]
fn default_package_targets_emit_without_a_package_line() -> Result<()> {
    hollow_testhelpers::setup();

    let source = generate(&model(), "Legacy", &EmitOptions::new())?;
    assert!(source.starts_with(&format!("{GENERATED_HEADER}\n\n/** Builds")));
    assert!(source.contains("public LegacyBuilder setUses(Legacy uses) {"));
    Ok(())
}

#[test]
fn emitter_accepts_a_precomputed_plan() -> Result<()> {
    hollow_testhelpers::setup();

    let model = model();
    let descriptor = model.describe("com.example.Point")?;
    let plan = NameResolver::plan(&descriptor)?;
    let emitter = SourceEmitter::new(EmitOptions::new());
    assert_eq!(emitter.emit(&descriptor, &plan)?, POINT_BUILDER);
    Ok(())
}
