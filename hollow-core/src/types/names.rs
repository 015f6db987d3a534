//! Helpers for binary class names such as `com.example.Outer$Inner`.

use alloc::string::String;

/// Simple names from `java.lang` that resolve without qualification in declaration syntax.
pub const JAVA_LANG_TYPES: &[&str] = &[
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "Cloneable",
    "Comparable",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "Integer",
    "Iterable",
    "Long",
    "Number",
    "Object",
    "Record",
    "Runnable",
    "RuntimeException",
    "Short",
    "String",
    "StringBuilder",
    "Thread",
    "Throwable",
    "Void",
];

/// Package part of a binary name, empty for the default package
pub fn package_name(binary_name: &str) -> &str {
    match binary_name.rfind('.') {
        Some(idx) => &binary_name[..idx],
        None => "",
    }
}

/// Class part of a binary name with the package stripped: `Outer$Inner`
pub fn class_part(binary_name: &str) -> &str {
    match binary_name.rfind('.') {
        Some(idx) => &binary_name[idx + 1..],
        None => binary_name,
    }
}

/// Innermost simple name: `Inner` for `com.example.Outer$Inner`
pub fn simple_name(binary_name: &str) -> &str {
    let class = class_part(binary_name);
    match class.rfind('$') {
        Some(idx) if idx + 1 < class.len() => &class[idx + 1..],
        _ => class,
    }
}

/// Binary name of the top-level class enclosing `binary_name` (itself if not nested)
pub fn top_level_name(binary_name: &str) -> &str {
    let package_len = binary_name.rfind('.').map(|idx| idx + 1).unwrap_or(0);
    match binary_name[package_len..].find('$') {
        Some(idx) if idx > 0 => &binary_name[..package_len + idx],
        _ => binary_name,
    }
}

/// Canonical source name: `com.example.Outer.Inner`
pub fn source_name(binary_name: &str) -> String {
    let package = package_name(binary_name);
    let class = class_part(binary_name).replace('$', ".");
    if package.is_empty() {
        class
    } else {
        alloc::format!("{package}.{class}")
    }
}

/// Whether the class is anonymous or local (`Outer$1`, `Outer$1Local`): such classes have
/// no name usable from source.
pub fn is_anonymous_or_local(binary_name: &str) -> bool {
    class_part(binary_name)
        .split('$')
        .skip(1)
        .any(|segment| segment.starts_with(|c: char| c.is_ascii_digit()))
}

/// Whether the class is a top-level member of `java.lang`, visible everywhere without import
pub fn is_java_lang(binary_name: &str) -> bool {
    package_name(binary_name) == "java.lang"
}
