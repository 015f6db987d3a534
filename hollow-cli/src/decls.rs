//! Reads class declarations written in a Java-like syntax.
//!
//! The format is Java source with everything hollow does not need left out or skipped:
//! method bodies, initializer expressions and annotations are accepted and ignored.
//!
//! ```text
//! file        = (package | import | type)*
//! package     = "package" name ";"
//! import      = "import" "static"? name (".*")? ";"
//! type        = annotation* modifier* kind Ident type-params? components? extends? implements? body
//! kind        = "class" | "interface" | "enum" | "record" | "@interface"
//! body        = "{" constants? member* "}"
//! member      = ";" | initializer | type | constructor | method | field
//! field       = modifier* Type Ident ("=" expr)? ("," Ident ("=" expr)?)* ";"
//! constructor = modifier* Ident "(" params ")" throws? (block | ";")
//! ```
//!
//! A file may contain several `package` sections; each applies to the declarations that
//! follow it. Nested types get binary names (`Outer$Inner`), and a fully qualified
//! reference to a nested type must use that form too (`java.util.Map$Entry`). Simple names
//! resolve like in Java: nested types of the enclosing classes, then single-type imports,
//! then the current package, with well-known `java.lang` names taking precedence.

use std::collections::HashSet;

use hollow::{
    ClassDecl, ClassFlags, ClassKind, ClassRegistry, ClassType, ConstructorDecl, FieldDecl,
    FieldFlags, FieldType, PrimitiveKind, TypeArg, TypeParam, Visibility, simple_name,
};

/// A declaration file that could not be read
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclError {
    /// 1-based line
    pub line: usize,
    /// 1-based column, in characters
    pub column: usize,
    /// what was wrong
    pub message: String,
}

impl core::fmt::Display for DeclError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

impl core::error::Error for DeclError {}

/// Parses every type declared in `src`, nested ones included
pub fn parse_declarations(src: &str) -> Result<Vec<ClassDecl>, DeclError> {
    let mut parser = Parser::new(src);
    parser.file()?;
    Ok(parser.resolve())
}

/// Parses `src` into a registry, rejecting types declared twice
pub fn read_registry(src: &str) -> Result<ClassRegistry, DeclError> {
    let mut parser = Parser::new(src);
    parser.file()?;
    let positions: Vec<usize> = parser.parsed.iter().map(|p| p.at).collect();
    let mut registry = ClassRegistry::new();
    for (decl, at) in parser.resolve().into_iter().zip(positions) {
        let name = decl.name.clone();
        if registry.register(decl).is_some() {
            return Err(parser.error_at(at, format!("type {name} is declared twice")));
        }
    }
    Ok(registry)
}

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "transient",
    "volatile",
    "synchronized",
    "native",
    "strictfp",
    "default",
    "sealed",
];

#[derive(Clone, Copy, Debug, Default)]
struct Modifiers {
    visibility: Option<Visibility>,
    is_static: bool,
    is_final: bool,
    is_abstract: bool,
    is_transient: bool,
    is_volatile: bool,
}

/// Where names used inside one declaration are looked up
#[derive(Clone, Debug)]
struct Scope {
    package: String,
    imports: Vec<(String, String)>,
    /// the declaration itself, then its enclosing classes outwards
    enclosing: Vec<String>,
}

/// What a nested declaration needs to know about its enclosing one
struct Enclosing {
    binary: String,
    kind: ClassKind,
    type_vars: Vec<String>,
    chain: Vec<String>,
}

struct Parsed {
    decl: ClassDecl,
    scope: Scope,
    at: usize,
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    package: String,
    imports: Vec<(String, String)>,
    parsed: Vec<Parsed>,
}

fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Whether an initializer is a constant expression: literals combined with operators,
/// parentheses and primitive casts. Names of other constants are not followed, so
/// `A + 1` does not count.
fn is_constant_literal(text: &str) -> bool {
    let mut chars = text.char_indices().peekable();
    let mut depth = 0usize;
    let mut literals = 0usize;
    while let Some((start, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '"' | '\'' => {
                let mut escaped = false;
                let mut len = 0;
                loop {
                    match chars.next() {
                        None => return false,
                        Some((_, '\\')) if !escaped => escaped = true,
                        Some((_, q)) if q == c && !escaped => break,
                        Some(_) => escaped = false,
                    }
                    len += 1;
                }
                if c == '\'' && len == 0 {
                    return false;
                }
                literals += 1;
            }
            c if c.is_ascii_digit()
                || (c == '.' && chars.peek().is_some_and(|(_, n)| n.is_ascii_digit())) =>
            {
                let hex = c == '0' && chars.peek().is_some_and(|(_, n)| matches!(n, 'x' | 'X'));
                let mut prev = c;
                while let Some(&(_, n)) = chars.peek() {
                    let exponent_sign = matches!(n, '+' | '-')
                        && if hex {
                            matches!(prev, 'p' | 'P')
                        } else {
                            matches!(prev, 'e' | 'E')
                        };
                    if !(n.is_ascii_alphanumeric() || n == '.' || n == '_' || exponent_sign) {
                        break;
                    }
                    prev = n;
                    chars.next();
                }
                literals += 1;
            }
            c if is_ident_start(c) => {
                let mut end = start + c.len_utf8();
                while let Some(&(idx, n)) = chars.peek() {
                    if !is_ident_part(n) {
                        break;
                    }
                    end = idx + n.len_utf8();
                    chars.next();
                }
                match &text[start..end] {
                    "true" | "false" => literals += 1,
                    word if PrimitiveKind::from_keyword(word).is_some() => {}
                    _ => return false,
                }
            }
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            '+' | '-' | '*' | '/' | '%' | '<' | '>' | '=' | '!' | '&' | '|' | '^' | '~' | '?'
            | ':' => {}
            _ => return false,
        }
    }
    depth == 0 && literals > 0
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            package: String::new(),
            imports: Vec::new(),
            parsed: Vec::new(),
        }
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> DeclError {
        let before = &self.src[..pos.min(self.src.len())];
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        DeclError {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
            message: message.into(),
        }
    }

    fn error(&self, message: impl Into<String>) -> DeclError {
        self.error_at(self.pos, message)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else if let Some(comment) = trimmed.strip_prefix("/*") {
                self.pos += comment.find("*/").map(|i| i + 4).unwrap_or(trimmed.len());
            } else {
                break;
            }
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_trivia();
        self.rest().chars().next()
    }

    fn at(&mut self, c: char) -> bool {
        self.peek() == Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.at(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), DeclError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{c}`")))
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        self.skip_trivia();
        let rest = self.rest();
        if !rest.starts_with(is_ident_start) {
            return None;
        }
        let len = rest.find(|c| !is_ident_part(c)).unwrap_or(rest.len());
        self.pos += len;
        Some(&rest[..len])
    }

    fn peek_ident(&mut self) -> Option<&'a str> {
        let save = self.pos;
        let ident = self.ident();
        self.pos = save;
        ident
    }

    fn expect_ident(&mut self, what: &str) -> Result<&'a str, DeclError> {
        self.ident()
            .ok_or_else(|| self.error(format!("expected {what}")))
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_ident() == Some(keyword) {
            self.ident();
            true
        } else {
            false
        }
    }

    /// `a.b.c`, stopping before a trailing `.*`
    fn qualified_name(&mut self) -> Result<String, DeclError> {
        let mut name = self.expect_ident("a name")?.to_string();
        loop {
            let save = self.pos;
            if !self.eat('.') {
                break;
            }
            match self.ident() {
                Some(part) => {
                    name.push('.');
                    name.push_str(part);
                }
                None => {
                    self.pos = save;
                    break;
                }
            }
        }
        Ok(name)
    }

    fn skip_literal(&mut self, quote: char) -> Result<(), DeclError> {
        let start = self.pos.saturating_sub(1);
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error_at(start, "unterminated literal")),
                Some('\\') => {
                    self.bump();
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    /// Skips from `open` to its matching `close`
    fn skip_balanced(&mut self, open: char, close: char) -> Result<(), DeclError> {
        self.skip_trivia();
        let start = self.pos;
        self.expect(open)?;
        let mut depth = 1usize;
        while depth > 0 {
            self.skip_trivia();
            match self.bump() {
                None => return Err(self.error_at(start, format!("unclosed `{open}`"))),
                Some(c @ ('"' | '\'')) => self.skip_literal(c)?,
                Some(c) if c == open => depth += 1,
                Some(c) if c == close => depth -= 1,
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Whether the `,` at the cursor starts another declarator (`, name =`) rather than
    /// separating arguments inside an expression
    fn comma_starts_declarator(&self) -> bool {
        let mut lookahead = Parser::new(self.src);
        lookahead.pos = self.pos + 1;
        lookahead.ident().is_some() && matches!(lookahead.peek(), Some('=' | ',' | ';' | '['))
    }

    /// The text of an initializer expression, up to the `,` or `;` that ends it
    fn initializer(&mut self) -> Result<&'a str, DeclError> {
        self.skip_trivia();
        let start = self.pos;
        let mut depth = 0usize;
        loop {
            self.skip_trivia();
            let here = self.pos;
            match self.rest().chars().next() {
                None => return Err(self.error_at(start, "unterminated initializer")),
                Some(';') if depth == 0 => return Ok(self.src[start..here].trim_end()),
                Some(',') if depth == 0 && self.comma_starts_declarator() => {
                    return Ok(self.src[start..here].trim_end());
                }
                Some('(' | '[' | '{') => {
                    depth += 1;
                    self.bump();
                }
                Some(')' | ']' | '}') => {
                    if depth == 0 {
                        return Err(self.error("unbalanced initializer"));
                    }
                    depth -= 1;
                    self.bump();
                }
                Some(c @ ('"' | '\'')) => {
                    self.bump();
                    self.skip_literal(c)?;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn skip_annotations(&mut self) -> Result<(), DeclError> {
        loop {
            self.skip_trivia();
            let rest = self.rest();
            if !rest.starts_with('@') || rest[1..].trim_start().starts_with("interface") {
                return Ok(());
            }
            self.bump();
            self.qualified_name()?;
            if self.at('(') {
                self.skip_balanced('(', ')')?;
            }
        }
    }

    fn modifiers(&mut self) -> Result<Modifiers, DeclError> {
        let mut mods = Modifiers::default();
        loop {
            self.skip_annotations()?;
            if self.rest().starts_with("non-sealed") {
                self.pos += "non-sealed".len();
                continue;
            }
            let Some(word) = self.peek_ident().filter(|w| MODIFIERS.contains(w)) else {
                return Ok(mods);
            };
            self.ident();
            match word {
                "public" => mods.visibility = Some(Visibility::Public),
                "protected" => mods.visibility = Some(Visibility::Protected),
                "private" => mods.visibility = Some(Visibility::Private),
                "static" => mods.is_static = true,
                "final" => mods.is_final = true,
                "abstract" => mods.is_abstract = true,
                "transient" => mods.is_transient = true,
                "volatile" => mods.is_volatile = true,
                _ => {}
            }
        }
    }

    /// End offset (relative to the cursor) of a `...` varargs marker in the parameter
    /// starting at the cursor
    fn varargs_marker(&self) -> Option<usize> {
        let mut angle = 0usize;
        let rest = self.rest();
        for (i, c) in rest.char_indices() {
            match c {
                '<' => angle += 1,
                '>' => angle = angle.saturating_sub(1),
                '.' if rest[i..].starts_with("...") => return Some(i),
                ',' if angle == 0 => return None,
                ')' | ';' | '{' | '=' => return None,
                _ => {}
            }
        }
        None
    }

    fn ty(&mut self, vars: &[&str]) -> Result<FieldType, DeclError> {
        self.skip_annotations()?;
        self.skip_trivia();
        let start = self.pos;
        let varargs = self.varargs_marker();
        let text = match varargs {
            Some(end) => &self.rest()[..end],
            None => self.rest(),
        };
        let (mut ty, used) = FieldType::parse_prefix(text, vars)
            .map_err(|err| self.error_at(start + err.offset, err.message))?;
        self.pos = start + used;
        if let Some(end) = varargs {
            self.pos = start + end + "...".len();
            ty = ty.array_of();
        }
        Ok(ty)
    }

    fn class_type(&mut self, vars: &[&str]) -> Result<ClassType, DeclError> {
        let start = self.pos;
        match self.ty(vars)? {
            FieldType::Class(class) => Ok(class),
            other => Err(self.error_at(start, format!("expected a class type, found {other}"))),
        }
    }

    fn class_types(&mut self, vars: &[&str]) -> Result<Vec<ClassType>, DeclError> {
        let mut types = vec![self.class_type(vars)?];
        while self.eat(',') {
            types.push(self.class_type(vars)?);
        }
        Ok(types)
    }

    fn type_params(&mut self, outer_vars: &[String]) -> Result<Vec<TypeParam>, DeclError> {
        let mut params: Vec<TypeParam> = Vec::new();
        if !self.eat('<') {
            return Ok(params);
        }
        loop {
            self.skip_annotations()?;
            let name = self.expect_ident("a type parameter name")?;
            let mut param = TypeParam::new(name);
            if self.eat_keyword("extends") {
                let vars: Vec<&str> = outer_vars
                    .iter()
                    .map(String::as_str)
                    .chain(params.iter().map(|p| p.name.as_str()))
                    .chain([name])
                    .collect();
                param = param.bound(self.ty(&vars)?);
                while self.eat('&') {
                    param = param.bound(self.ty(&vars)?);
                }
            }
            params.push(param);
            if self.eat(',') {
                continue;
            }
            self.expect('>')?;
            return Ok(params);
        }
    }

    /// `(Type name, ...)`, returning the parameter types and names
    fn params(&mut self, vars: &[&str]) -> Result<Vec<(FieldType, &'a str)>, DeclError> {
        self.expect('(')?;
        let mut params = Vec::new();
        if self.eat(')') {
            return Ok(params);
        }
        loop {
            self.modifiers()?;
            let mut ty = self.ty(vars)?;
            let name = self.expect_ident("a parameter name")?;
            while self.eat('[') {
                self.expect(']')?;
                ty = ty.array_of();
            }
            params.push((ty, name));
            if self.eat(',') {
                continue;
            }
            self.expect(')')?;
            return Ok(params);
        }
    }

    /// Skips `throws ...` or an annotation `default` value, then the body or `;`
    fn skip_method_rest(&mut self) -> Result<(), DeclError> {
        loop {
            match self.peek() {
                Some('{') => return self.skip_balanced('{', '}'),
                Some(';') => {
                    self.bump();
                    return Ok(());
                }
                Some('"' | '\'') => {
                    let quote = self.bump().unwrap_or('"');
                    self.skip_literal(quote)?;
                }
                Some('(') => self.skip_balanced('(', ')')?,
                Some(_) => {
                    self.bump();
                }
                None => return Err(self.error("unterminated method declaration")),
            }
        }
    }

    fn file(&mut self) -> Result<(), DeclError> {
        loop {
            self.skip_trivia();
            if self.pos == self.src.len() {
                return Ok(());
            }
            if self.eat(';') {
                continue;
            }
            if self.eat_keyword("package") {
                self.package = self.qualified_name()?;
                self.imports.clear();
                self.expect(';')?;
                continue;
            }
            if self.eat_keyword("import") {
                let is_static = self.eat_keyword("static");
                let name = self.qualified_name()?;
                let on_demand = self.eat('.');
                if on_demand {
                    self.expect('*')?;
                }
                self.expect(';')?;
                if !is_static && !on_demand {
                    self.imports.push((simple_name(&name).to_string(), name));
                }
                continue;
            }
            let mods = self.modifiers()?;
            self.type_decl(mods, None)?;
        }
    }

    fn type_decl(&mut self, mods: Modifiers, outer: Option<&Enclosing>) -> Result<(), DeclError> {
        self.skip_trivia();
        let at = self.pos;
        let kind = if self.eat('@') {
            if !self.eat_keyword("interface") {
                return Err(self.error("expected `interface` after `@`"));
            }
            ClassKind::Annotation
        } else {
            match self.ident() {
                Some("class") => ClassKind::Class,
                Some("interface") => ClassKind::Interface,
                Some("enum") => ClassKind::Enum,
                Some("record") => ClassKind::Record,
                _ => {
                    return Err(self.error_at(at, "expected a class, interface, enum or record declaration"));
                }
            }
        };
        let name = self.expect_ident("a type name")?;
        let binary = match outer {
            Some(outer) => format!("{}${name}", outer.binary),
            None => qualify(&self.package, name),
        };

        let in_interface = outer.is_some_and(|o| {
            matches!(o.kind, ClassKind::Interface | ClassKind::Annotation)
        });
        let is_static = outer.is_some()
            && (mods.is_static || in_interface || kind != ClassKind::Class);
        let is_inner = outer.is_some() && !is_static;
        let visibility = if in_interface {
            Visibility::Public
        } else {
            mods.visibility.unwrap_or(Visibility::Package)
        };

        let mut flags = ClassFlags::EMPTY;
        if mods.is_abstract || matches!(kind, ClassKind::Interface | ClassKind::Annotation) {
            flags |= ClassFlags::ABSTRACT;
        }
        if mods.is_final || matches!(kind, ClassKind::Enum | ClassKind::Record) {
            flags |= ClassFlags::FINAL;
        }
        if is_static {
            flags |= ClassFlags::STATIC;
        }

        let mut var_names: Vec<String> = match outer {
            Some(outer) if is_inner => outer.type_vars.clone(),
            _ => Vec::new(),
        };
        let type_params = self.type_params(&var_names)?;
        var_names.extend(type_params.iter().map(|p| p.name.clone()));
        let vars: Vec<&str> = var_names.iter().map(String::as_str).collect();

        let mut decl = ClassDecl::of_kind(binary.clone(), kind)
            .visibility(visibility)
            .flags(flags);
        decl.type_params = type_params;

        if let Some(outer) = outer.filter(|_| is_inner) {
            decl = decl.field(
                FieldDecl::new("this$0", FieldType::class(outer.binary.clone()))
                    .flags(FieldFlags::FINAL | FieldFlags::SYNTHETIC),
            );
        }

        if kind == ClassKind::Record {
            let components = self.params(&vars)?;
            decl = decl.constructor(ConstructorDecl::new(
                visibility,
                components.iter().map(|(ty, _)| ty.clone()),
            ));
            for (ty, component) in components {
                decl = decl.field(FieldDecl::new(component, ty).private().final_());
            }
        }

        if self.eat_keyword("extends") {
            if kind == ClassKind::Class {
                decl.superclass = Some(self.class_type(&vars)?);
            } else {
                decl.interfaces.extend(self.class_types(&vars)?);
            }
        }
        if self.eat_keyword("implements") {
            decl.interfaces.extend(self.class_types(&vars)?);
        }
        if self.eat_keyword("permits") {
            self.class_types(&vars)?;
        }

        let mut chain = vec![binary.clone()];
        if let Some(outer) = outer {
            chain.extend(outer.chain.iter().cloned());
        }
        let scope = Scope {
            package: self.package.clone(),
            imports: self.imports.clone(),
            enclosing: chain.clone(),
        };
        let this = Enclosing {
            binary,
            kind,
            type_vars: var_names.clone(),
            chain,
        };

        self.expect('{')?;
        if kind == ClassKind::Enum {
            self.enum_constants(&mut decl)?;
        }
        self.members(&mut decl, &this, name, &vars)?;

        if decl.constructors.is_empty() {
            match kind {
                ClassKind::Class => {
                    decl = decl.constructor(ConstructorDecl::new(visibility, []));
                }
                ClassKind::Enum => {
                    decl = decl.constructor(ConstructorDecl::new(Visibility::Private, []));
                }
                _ => {}
            }
        }

        self.parsed.push(Parsed { decl, scope, at });
        Ok(())
    }

    fn enum_constants(&mut self, decl: &mut ClassDecl) -> Result<(), DeclError> {
        loop {
            self.skip_annotations()?;
            if self.eat(';') || self.at('}') {
                return Ok(());
            }
            let constant = self.expect_ident("an enum constant")?;
            decl.enum_constants.push(constant.to_string());
            if self.at('(') {
                self.skip_balanced('(', ')')?;
            }
            if self.at('{') {
                self.skip_balanced('{', '}')?;
            }
            if self.eat(',') {
                continue;
            }
            if self.eat(';') || self.at('}') {
                return Ok(());
            }
            return Err(self.error("expected `,`, `;` or `}` after an enum constant"));
        }
    }

    fn members(
        &mut self,
        decl: &mut ClassDecl,
        this: &Enclosing,
        simple: &str,
        vars: &[&str],
    ) -> Result<(), DeclError> {
        let in_interface = matches!(this.kind, ClassKind::Interface | ClassKind::Annotation);
        loop {
            if self.eat('}') {
                return Ok(());
            }
            if self.peek().is_none() {
                return Err(self.error(format!("missing `}}` at the end of {}", decl.name)));
            }
            if self.eat(';') {
                continue;
            }
            let mods = self.modifiers()?;
            if self.at('{') {
                // initializer block
                self.skip_balanced('{', '}')?;
                continue;
            }
            if self.at('@')
                || matches!(
                    self.peek_ident(),
                    Some("class" | "interface" | "enum" | "record")
                )
            {
                self.type_decl(mods, Some(this))?;
                continue;
            }
            if self.at('<') {
                // generic method or constructor
                self.skip_balanced('<', '>')?;
            }

            let save = self.pos;
            if self.eat_keyword(simple) {
                if self.at('(') {
                    let params = self.params(vars)?;
                    self.skip_method_rest()?;
                    let visibility = match this.kind {
                        ClassKind::Enum => Visibility::Private,
                        _ => mods.visibility.unwrap_or(Visibility::Package),
                    };
                    decl.constructors.push(ConstructorDecl::new(
                        visibility,
                        params.into_iter().map(|(ty, _)| ty),
                    ));
                    continue;
                }
                if this.kind == ClassKind::Record && self.at('{') {
                    // compact canonical constructor
                    self.skip_balanced('{', '}')?;
                    continue;
                }
                self.pos = save;
            }

            if self.eat_keyword("void") {
                self.expect_ident("a method name")?;
                self.skip_method_rest()?;
                continue;
            }
            let ty = self.ty(vars)?;
            let name = self.expect_ident("a member name")?;
            if self.at('(') {
                self.skip_balanced('(', ')')?;
                self.skip_method_rest()?;
                continue;
            }
            self.fields(decl, &mods, in_interface, ty, name)?;
        }
    }

    fn fields(
        &mut self,
        decl: &mut ClassDecl,
        mods: &Modifiers,
        in_interface: bool,
        ty: FieldType,
        first: &'a str,
    ) -> Result<(), DeclError> {
        let mut name = first;
        loop {
            let mut field_ty = ty.clone();
            while self.eat('[') {
                self.expect(']')?;
                field_ty = field_ty.array_of();
            }
            let initializer = if self.eat('=') {
                Some(self.initializer()?)
            } else {
                None
            };

            let mut flags = FieldFlags::EMPTY;
            let is_static = mods.is_static || in_interface;
            let is_final = mods.is_final || in_interface;
            if is_static {
                flags |= FieldFlags::STATIC;
            }
            if is_final {
                flags |= FieldFlags::FINAL;
            }
            if mods.is_transient {
                flags |= FieldFlags::TRANSIENT;
            }
            if mods.is_volatile {
                flags |= FieldFlags::VOLATILE;
            }
            let constant_type = field_ty.is_primitive() || field_ty == FieldType::string();
            if is_final && constant_type && initializer.is_some_and(is_constant_literal) {
                flags |= FieldFlags::CONSTANT;
            }
            let visibility = if in_interface {
                Visibility::Public
            } else {
                mods.visibility.unwrap_or(Visibility::Package)
            };
            decl.fields.push(
                FieldDecl::new(name, field_ty)
                    .visibility(visibility)
                    .flags(flags),
            );

            if self.eat(',') {
                name = self.expect_ident("a field name")?;
                continue;
            }
            return self.expect(';');
        }
    }

    /// Rewrites simple and relative class names to binary names
    fn resolve(&self) -> Vec<ClassDecl> {
        let declared: HashSet<&str> = self.parsed.iter().map(|p| p.decl.name.as_str()).collect();
        self.parsed
            .iter()
            .map(|parsed| {
                let scope = &parsed.scope;
                let resolve = |ty: &FieldType| scope.resolve_type(ty, &declared);
                let mut decl = parsed.decl.clone();
                for param in &mut decl.type_params {
                    param.bounds = param.bounds.iter().map(resolve).collect();
                }
                decl.superclass = decl
                    .superclass
                    .as_ref()
                    .map(|class| scope.resolve_class(class, &declared));
                decl.interfaces = decl
                    .interfaces
                    .iter()
                    .map(|class| scope.resolve_class(class, &declared))
                    .collect();
                for field in &mut decl.fields {
                    field.ty = resolve(&field.ty);
                }
                for constructor in &mut decl.constructors {
                    constructor.params = constructor.params.iter().map(resolve).collect();
                }
                decl
            })
            .collect()
    }
}

impl Scope {
    fn resolve_type(&self, ty: &FieldType, declared: &HashSet<&str>) -> FieldType {
        match ty {
            FieldType::Primitive(_) | FieldType::TypeVariable(_) => ty.clone(),
            FieldType::Array(inner) => self.resolve_type(inner, declared).array_of(),
            FieldType::Class(class) => FieldType::Class(self.resolve_class(class, declared)),
        }
    }

    fn resolve_class(&self, class: &ClassType, declared: &HashSet<&str>) -> ClassType {
        let args = class
            .args
            .iter()
            .map(|arg| match arg {
                TypeArg::Type(ty) => TypeArg::Type(self.resolve_type(ty, declared)),
                TypeArg::Wildcard => TypeArg::Wildcard,
                TypeArg::Extends(ty) => TypeArg::Extends(self.resolve_type(ty, declared)),
                TypeArg::Super(ty) => TypeArg::Super(self.resolve_type(ty, declared)),
            })
            .collect();
        ClassType::parameterized(self.resolve_name(&class.name, declared), args)
    }

    fn resolve_name(&self, name: &str, declared: &HashSet<&str>) -> String {
        match name.split_once('.') {
            // `Outer.Inner` relative to a type in scope, otherwise already qualified
            Some((first, rest)) => match self.lookup(first, declared, false) {
                Some(outer) => format!("{outer}${}", rest.replace('.', "$")),
                None => name.to_string(),
            },
            None => self
                .lookup(name, declared, true)
                .unwrap_or_else(|| name.to_string()),
        }
    }

    fn lookup(&self, simple: &str, declared: &HashSet<&str>, in_package: bool) -> Option<String> {
        for enclosing in &self.enclosing {
            let member = format!("{enclosing}${simple}");
            if declared.contains(member.as_str()) {
                return Some(member);
            }
        }
        if let Some(enclosing) = self.enclosing.iter().find(|e| simple_name(e) == simple) {
            return Some(enclosing.clone());
        }
        if let Some((_, binary)) = self.imports.iter().find(|(s, _)| s == simple) {
            return Some(binary.clone());
        }
        let qualified = qualify(&self.package, simple);
        (in_package || declared.contains(qualified.as_str())).then_some(qualified)
    }
}
