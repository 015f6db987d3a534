mod naming;
mod rejections;
mod source;

use hollow_core::{
    ClassDecl, ClassFlags, ClassKind, ClassRegistry, ClassType, FieldDecl, FieldFlags, FieldType,
    TypeArg, TypeModel, TypeParam, Visibility,
};

fn list_of(ty: FieldType) -> FieldType {
    FieldType::parameterized("java.util.List", [ty])
}

/// Class declarations exercising the naming and emission rules
pub fn fixtures() -> ClassRegistry {
    ClassRegistry::new()
        .with(
            ClassDecl::class("com.example.Point")
                .flags(ClassFlags::FINAL)
                .field(FieldDecl::new("x", FieldType::INT).private().final_())
                .field(FieldDecl::new("y", FieldType::INT).private().final_())
                .field(
                    FieldDecl::new("ORIGIN", FieldType::class("com.example.Point"))
                        .flags(FieldFlags::STATIC | FieldFlags::FINAL),
                ),
        )
        .with(
            ClassDecl::class("com.example.Base")
                .field(FieldDecl::new("name", FieldType::string()).private())
                .field(FieldDecl::new("id", FieldType::LONG).private()),
        )
        .with(
            ClassDecl::class("com.example.Derived")
                .extends(ClassType::raw("com.example.Base"))
                .field(FieldDecl::new("name", FieldType::string()).private())
                .field(FieldDecl::new("active", FieldType::BOOLEAN)),
        )
        .with(ClassDecl::class("com.example.Root").field(FieldDecl::new("name", FieldType::string())))
        .with(
            ClassDecl::class("com.example.Middle")
                .extends(ClassType::raw("com.example.Root"))
                .field(FieldDecl::new("name", FieldType::string())),
        )
        .with(
            ClassDecl::class("com.example.Leaf")
                .extends(ClassType::raw("com.example.Middle"))
                .field(FieldDecl::new("name", FieldType::string())),
        )
        .with(ClassDecl::class("com.a.Node").field(FieldDecl::new("value", FieldType::INT)))
        .with(
            ClassDecl::class("com.b.Node")
                .extends(ClassType::raw("com.a.Node"))
                .field(FieldDecl::new("value", FieldType::INT)),
        )
        .with(
            ClassDecl::class("com.c.Node")
                .extends(ClassType::raw("com.b.Node"))
                .field(FieldDecl::new("value", FieldType::INT)),
        )
        .with(
            ClassDecl::class("com.d.Tricky")
                .extends(ClassType::raw("com.b.Node"))
                .field(FieldDecl::new("value", FieldType::INT))
                .field(FieldDecl::new("value_com_a_Node", FieldType::INT)),
        )
        .with(
            ClassDecl::class("com.example.Case")
                .field(FieldDecl::new("x", FieldType::INT))
                .field(FieldDecl::new("X", FieldType::INT)),
        )
        .with(
            ClassDecl::class("com.example.Odd")
                .field(FieldDecl::new("class", FieldType::INT))
                .field(FieldDecl::new("instance", FieldType::object()))
                .field(FieldDecl::new("OFFSET_x", FieldType::INT)),
        )
        .with(
            ClassDecl::class("com.example.Box")
                .type_param(TypeParam::new("T").bound(FieldType::class("java.lang.Number")))
                .field(FieldDecl::new("value", FieldType::type_var("T")))
                .field(FieldDecl::new("history", list_of(FieldType::type_var("T")))),
        )
        .with(
            ClassDecl::class("com.example.IntBox")
                .extends(ClassType::parameterized(
                    "com.example.Box",
                    vec![TypeArg::Type(FieldType::class("java.lang.Integer"))],
                ))
                .field(FieldDecl::new("label", FieldType::string())),
        )
        .with(
            ClassDecl::class("com.example.RawBox")
                .extends(ClassType::raw("com.example.Box"))
                .field(FieldDecl::new("tags", list_of(FieldType::string()))),
        )
        .with(
            ClassDecl::class("com.example.Holder")
                .field(FieldDecl::new("items", list_of(FieldType::string())))
                .field(FieldDecl::new("widget", FieldType::class("java.awt.List")))
                .field(FieldDecl::new(
                    "entry",
                    FieldType::parameterized(
                        "java.util.Map$Entry",
                        [FieldType::string(), FieldType::class("java.lang.Integer")],
                    ),
                ))
                .field(FieldDecl::new("text", FieldType::class("com.other.String"))),
        )
        .with(
            ClassDecl::class("com.example.Counter")
                .field(FieldDecl::new("count", FieldType::LONG).flags(FieldFlags::VOLATILE))
                .field(FieldDecl::new("ref", FieldType::object()).flags(FieldFlags::VOLATILE)),
        )
        .with(ClassDecl::class("com.example.Outer"))
        .with(
            ClassDecl::class("com.example.Outer$Nested")
                .flags(ClassFlags::STATIC)
                .field(FieldDecl::new("depth", FieldType::INT)),
        )
        .with(
            ClassDecl::class("com.example.Outer$Secret")
                .visibility(Visibility::Private)
                .flags(ClassFlags::STATIC),
        )
        .with(
            ClassDecl::class("com.example.Outer$Secret$Inner")
                .flags(ClassFlags::STATIC)
                .field(FieldDecl::new("depth", FieldType::INT)),
        )
        .with(ClassDecl::class("com.example.Outer$1").field(FieldDecl::new("val$x", FieldType::INT)))
        .with(
            ClassDecl::class("com.example.Internal")
                .visibility(Visibility::Package)
                .field(FieldDecl::new("secret", FieldType::INT)),
        )
        .with(
            ClassDecl::class("com.example.Leaky")
                .field(FieldDecl::new("secret", FieldType::class("com.example.Outer$Secret"))),
        )
        .with(
            ClassDecl::class("com.example.Exposed")
                .field(FieldDecl::new("nested", FieldType::class("com.example.Outer$Nested")))
                .field(FieldDecl::new(
                    "internals",
                    list_of(FieldType::class("com.example.Internal")),
                )),
        )
        .with(
            ClassDecl::class("com.example.Bounded")
                .type_param(TypeParam::new("T").bound(FieldType::class("com.example.Internal")))
                .field(FieldDecl::new("value", FieldType::type_var("T"))),
        )
        .with(ClassDecl::class("Legacy").field(FieldDecl::new("uses", FieldType::class("Legacy"))))
        .with(
            ClassDecl::class("com.example.Shape")
                .flags(ClassFlags::ABSTRACT)
                .field(FieldDecl::new("label", FieldType::string())),
        )
        .with(ClassDecl::interface("com.example.Named"))
        .with(ClassDecl::enumeration("com.example.Color").constant("RED"))
        .with(
            ClassDecl::of_kind("com.example.Pair", ClassKind::Record)
                .flags(ClassFlags::FINAL)
                .field(FieldDecl::new("left", FieldType::object()).private().final_()),
        )
        .with(ClassDecl::of_kind("com.example.Marker", ClassKind::Annotation))
}

pub fn model() -> TypeModel {
    TypeModel::new(fixtures())
}
