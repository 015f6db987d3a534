use eyre::Result;
use hollow_emit::{NameResolver, NamingPlan};

use crate::model;

fn plan(type_name: &str) -> Result<NamingPlan> {
    Ok(NameResolver::plan(&*model().describe(type_name)?)?)
}

/// `(owner, field, identifier, setter)` for every entry, in plan order
fn summary(plan: &NamingPlan) -> Vec<(&str, &str, &str, &str)> {
    plan.entries()
        .iter()
        .map(|e| {
            (
                e.owner.as_str(),
                e.field.name.as_str(),
                e.identifier.as_str(),
                e.setter.as_str(),
            )
        })
        .collect()
}

#[test]
fn most_derived_field_keeps_the_bare_name() -> Result<()> {
    hollow_testhelpers::setup();

    let plan = plan("com.example.Derived")?;
    assert_eq!(
        summary(&plan),
        [
            ("com.example.Derived", "name", "name", "setName"),
            ("com.example.Derived", "active", "active", "setActive"),
            ("com.example.Base", "name", "name_Base", "setName_Base"),
            ("com.example.Base", "id", "id", "setId"),
        ]
    );
    assert_eq!(plan.type_name(), "com.example.Derived");
    Ok(())
}

#[test]
fn every_shadowing_level_gets_its_own_suffix() -> Result<()> {
    hollow_testhelpers::setup();

    let plan = plan("com.example.Leaf")?;
    let setters: Vec<&str> = plan.entries().iter().map(|e| e.setter.as_str()).collect();
    assert_eq!(setters, ["setName", "setName_Middle", "setName_Root"]);
    assert_eq!(
        plan.get("com.example.Root", "name").map(|e| e.identifier.as_str()),
        Some("name_Root")
    );
    Ok(())
}

#[test]
fn same_simple_names_fall_back_to_the_package() -> Result<()> {
    hollow_testhelpers::setup();

    let plan = plan("com.c.Node")?;
    assert_eq!(
        summary(&plan),
        [
            ("com.c.Node", "value", "value", "setValue"),
            ("com.b.Node", "value", "value_Node", "setValue_Node"),
            ("com.a.Node", "value", "value_com_a_Node", "setValue_com_a_Node"),
        ]
    );
    Ok(())
}

#[test]
fn a_counter_resolves_what_qualification_cannot() -> Result<()> {
    hollow_testhelpers::setup();

    let plan = plan("com.d.Tricky")?;
    assert_eq!(
        summary(&plan),
        [
            ("com.d.Tricky", "value", "value", "setValue"),
            ("com.d.Tricky", "value_com_a_Node", "value_com_a_Node", "setValue_com_a_Node"),
            ("com.b.Node", "value", "value_Node", "setValue_Node"),
            ("com.a.Node", "value", "value_com_a_Node2", "setValue_com_a_Node2"),
        ]
    );
    Ok(())
}

#[test]
fn names_differing_in_case_get_distinct_setters() -> Result<()> {
    hollow_testhelpers::setup();

    let plan = plan("com.example.Case")?;
    assert_eq!(
        summary(&plan),
        [
            ("com.example.Case", "x", "x", "setX"),
            ("com.example.Case", "X", "X_Case", "setX_Case"),
        ]
    );
    assert_eq!(
        plan.by_setter("setX_Case").map(|e| e.field.name.as_str()),
        Some("X")
    );
    Ok(())
}

#[test]
fn reserved_words_and_builder_members_are_escaped() -> Result<()> {
    hollow_testhelpers::setup();

    let plan = plan("com.example.Odd")?;
    let class = plan.get("com.example.Odd", "class").expect("planned");
    assert_eq!(
        (class.identifier.as_str(), class.setter.as_str(), class.parameter.as_str()),
        ("class_", "setClass_", "class_")
    );
    let instance = plan.get("com.example.Odd", "instance").expect("planned");
    assert_eq!(instance.identifier, "instance");
    assert_eq!(instance.parameter, "instance_");
    let offset = plan.get("com.example.Odd", "OFFSET_x").expect("planned");
    assert_eq!(offset.parameter, "OFFSET_x_");
    Ok(())
}

#[test]
fn plans_are_deterministic_and_injective() -> Result<()> {
    hollow_testhelpers::setup();

    for name in [
        "com.example.Derived",
        "com.example.Leaf",
        "com.c.Node",
        "com.d.Tricky",
        "com.example.Case",
    ] {
        let first = plan(name)?;
        assert_eq!(first, plan(name)?, "{name}");

        let mut setters: Vec<&str> = first.entries().iter().map(|e| e.setter.as_str()).collect();
        setters.sort_unstable();
        setters.dedup();
        assert_eq!(setters.len(), first.len(), "{name}");
    }
    Ok(())
}

#[test]
fn classes_without_fields_have_empty_plans() -> Result<()> {
    hollow_testhelpers::setup();

    let plan = plan("com.example.Outer")?;
    assert!(plan.is_empty());
    Ok(())
}
