//! Line-oriented source text assembly.

use core::fmt::Write;

const INDENT: &str = "    ";

/// Accumulates indented lines of Java source
#[derive(Debug, Default)]
pub struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    /// An empty writer at depth zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line at the current depth. Empty lines carry no indentation.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    /// Appends an empty line
    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Increases the depth of the following lines
    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    /// Decreases the depth of the following lines
    pub fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Writes `header {` and indents; pair with [`close`](Self::close)
    pub fn open(&mut self, header: impl AsRef<str>) -> &mut Self {
        self.line(format!("{} {{", header.as_ref()));
        self.indent()
    }

    /// Closes the current block and opens the next one on the same line: `} header {`
    pub fn reopen(&mut self, header: impl AsRef<str>) -> &mut Self {
        self.dedent();
        self.line(format!("}} {} {{", header.as_ref()));
        self.indent()
    }

    /// Dedents and writes `}`
    pub fn close(&mut self) -> &mut Self {
        self.dedent();
        self.line("}")
    }

    /// Writes `header {`, the lines `body` produces one level deeper, and `}`
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.open(header);
        body(self);
        self.close()
    }

    /// Current indentation depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The accumulated text
    pub fn finish(self) -> String {
        self.out
    }
}

/// A Java string literal, quotes included, denoting exactly `value`.
///
/// Printable ASCII is kept as is; everything else is written as backslash escapes or as
/// `\uXXXX` escapes of its UTF-16 code units.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for unit in value.encode_utf16() {
        match unit {
            0x5C => out.push_str("\\\\"),
            0x08 => out.push_str("\\b"),
            0x09 => out.push_str("\\t"),
            0x0A => out.push_str("\\n"),
            0x0C => out.push_str("\\f"),
            0x0D => out.push_str("\\r"),
            0x22 => out.push_str("\\\""),
            0x20..=0x7E => out.push(char::from(unit as u8)),
            _ => {
                let _ = write!(out, "\\u{unit:04x}");
            }
        }
    }
    out.push('"');
    out
}
