use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::{FieldType, JAVA_LANG_TYPES, PrimitiveKind, TypeArg};

/// A type name that could not be parsed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSyntaxError {
    /// the full input
    pub input: String,
    /// byte offset of the problem
    pub offset: usize,
    /// what was wrong
    pub message: &'static str,
}

impl core::fmt::Display for TypeSyntaxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "invalid type `{}` at offset {}: {}",
            self.input, self.offset, self.message
        )
    }
}

impl core::error::Error for TypeSyntaxError {}

impl FieldType {
    /// Parses a type written in source syntax, e.g. `java.util.Map<K, java.util.List<? extends V>>[]`.
    ///
    /// Bare identifiers listed in `type_vars` become type variables; bare well-known
    /// `java.lang` names (`String`, `Integer`, ...) resolve to `java.lang`; any other bare
    /// identifier is a class in the default package. JVM array names (`[I`,
    /// `[Ljava.lang.String;`) are accepted as well.
    pub fn parse(src: &str, type_vars: &[&str]) -> Result<FieldType, TypeSyntaxError> {
        let (ty, used) = Self::parse_prefix(src, type_vars)?;
        let mut cursor = Cursor::new(src, type_vars, true);
        cursor.pos = used;
        cursor.skip_ws();
        if cursor.pos != src.len() {
            return Err(cursor.error("unexpected trailing input"));
        }
        Ok(ty)
    }

    /// Parses a type at the start of `src` and returns it together with the number of
    /// bytes consumed. Used by declaration readers that embed types in larger syntax.
    pub fn parse_prefix(
        src: &str,
        type_vars: &[&str],
    ) -> Result<(FieldType, usize), TypeSyntaxError> {
        let mut cursor = Cursor::new(src, type_vars, true);
        let ty = cursor.parse_type()?;
        Ok((ty, cursor.pos))
    }
}

/// Normalizes a type name for lookup: JVM array names become source array names
/// (`[[I` becomes `int[][]`), whitespace and type arguments are dropped. Bare names are
/// taken literally (no `java.lang` shortcut).
pub fn normalize_type_name(name: &str) -> Result<String, TypeSyntaxError> {
    let mut cursor = Cursor::new(name, &[], false);
    let ty = cursor.parse_type()?;
    cursor.skip_ws();
    if cursor.pos != name.len() {
        return Err(cursor.error("unexpected trailing input"));
    }
    Ok(strip_args(&ty).to_string())
}

fn strip_args(ty: &FieldType) -> FieldType {
    match ty {
        FieldType::Class(class) => FieldType::class(class.name.clone()),
        FieldType::Array(inner) => strip_args(inner).array_of(),
        other => other.clone(),
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    type_vars: &'a [&'a str],
    implicit_java_lang: bool,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str, type_vars: &'a [&'a str], implicit_java_lang: bool) -> Self {
        Self {
            src,
            pos: 0,
            type_vars,
            implicit_java_lang,
        }
    }

    fn error(&self, message: &'static str) -> TypeSyntaxError {
        TypeSyntaxError {
            input: self.src.to_string(),
            offset: self.pos,
            message,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let start = self.pos;
        if !self.peek().is_some_and(is_ident_start) {
            return None;
        }
        while self.peek().is_some_and(is_ident_part) {
            self.bump();
        }
        Some(&self.src[start..self.pos])
    }

    fn keyword(&mut self, keyword: &str) -> bool {
        let save = self.pos;
        match self.ident() {
            Some(ident) if ident == keyword => true,
            _ => {
                self.pos = save;
                false
            }
        }
    }

    fn parse_type(&mut self) -> Result<FieldType, TypeSyntaxError> {
        self.skip_ws();
        if self.peek() == Some('[') {
            return self.parse_jvm_name();
        }

        let start = self.pos;
        let first = self.ident().ok_or_else(|| self.error("expected a type name"))?;
        let mut name = String::from(first);
        loop {
            let save = self.pos;
            if self.eat('.') {
                let part = self
                    .ident()
                    .ok_or_else(|| self.error("expected an identifier after `.`"))?;
                name.push('.');
                name.push_str(part);
            } else {
                self.pos = save;
                break;
            }
        }

        let mut ty = self.resolve(&name, start)?;

        let save = self.pos;
        if self.eat('<') {
            let args = self.parse_args()?;
            match &mut ty {
                FieldType::Class(class) => class.args = args,
                _ => {
                    self.pos = save;
                    return Err(self.error("type arguments on a non-class type"));
                }
            }
        } else {
            self.pos = save;
        }

        loop {
            let save = self.pos;
            if self.eat('[') {
                if !self.eat(']') {
                    return Err(self.error("expected `]`"));
                }
                ty = ty.array_of();
            } else {
                self.pos = save;
                break;
            }
        }

        Ok(ty)
    }

    fn resolve(&self, name: &str, start: usize) -> Result<FieldType, TypeSyntaxError> {
        if name.contains('.') {
            return Ok(FieldType::class(name));
        }
        if self.type_vars.contains(&name) {
            return Ok(FieldType::TypeVariable(name.to_string()));
        }
        if let Some(kind) = PrimitiveKind::from_keyword(name) {
            return Ok(FieldType::Primitive(kind));
        }
        if name == "void" {
            return Err(TypeSyntaxError {
                input: self.src.to_string(),
                offset: start,
                message: "`void` is not a field type",
            });
        }
        if self.implicit_java_lang && JAVA_LANG_TYPES.contains(&name) {
            return Ok(FieldType::class(alloc::format!("java.lang.{name}")));
        }
        Ok(FieldType::class(name))
    }

    fn parse_args(&mut self) -> Result<Vec<TypeArg>, TypeSyntaxError> {
        let mut args = Vec::new();
        loop {
            if self.eat('?') {
                if self.keyword("extends") {
                    args.push(TypeArg::Extends(self.parse_arg_type()?));
                } else if self.keyword("super") {
                    args.push(TypeArg::Super(self.parse_arg_type()?));
                } else {
                    args.push(TypeArg::Wildcard);
                }
            } else {
                args.push(TypeArg::Type(self.parse_arg_type()?));
            }

            if self.eat(',') {
                continue;
            }
            if self.eat('>') {
                return Ok(args);
            }
            return Err(self.error("expected `,` or `>`"));
        }
    }

    fn parse_arg_type(&mut self) -> Result<FieldType, TypeSyntaxError> {
        self.skip_ws();
        let start = self.pos;
        let ty = self.parse_type()?;
        if ty.is_primitive() {
            self.pos = start;
            return Err(self.error("primitive types cannot be type arguments"));
        }
        Ok(ty)
    }

    /// `[I`, `[[J`, `[Ljava.lang.String;`, `[Ljava/lang/String;`
    fn parse_jvm_name(&mut self) -> Result<FieldType, TypeSyntaxError> {
        let mut dims = 0;
        while self.peek() == Some('[') {
            self.bump();
            dims += 1;
        }

        let element = match self.bump() {
            Some('L') => {
                let start = self.pos;
                let end = self.src[start..]
                    .find(';')
                    .map(|idx| start + idx)
                    .ok_or_else(|| self.error("missing `;` after object type name"))?;
                if end == start {
                    return Err(self.error("missing element type name"));
                }
                self.pos = end + 1;
                FieldType::class(self.src[start..end].replace('/', "."))
            }
            Some(c) => match PrimitiveKind::from_descriptor(c) {
                Some(kind) => FieldType::Primitive(kind),
                None => return Err(self.error("malformed array element descriptor")),
            },
            None => return Err(self.error("missing element type name")),
        };

        Ok((0..dims).fold(element, |ty, _| ty.array_of()))
    }
}
