use std::io::{self, Write};

use crate::json::JsonValue;
use crate::json::value::format_f64;

// -----------------------------------------------------------------------------
// JsonWriter

/// A streaming JSON emitter over any [`io::Write`] sink.
///
/// The writer only knows about JSON syntax; the serialize driver decides
/// what to emit. With an indentation unit it pretty-prints: a newline plus
/// one unit per nesting level after every container open, after every
/// separator, and before every container close.
///
/// # Examples
///
/// ```
/// use jsonbind::json::JsonWriter;
///
/// let mut out = Vec::new();
/// let mut w = JsonWriter::with_indent(&mut out, "  ");
/// w.begin_object().unwrap();
/// w.write_name("id").unwrap();
/// w.write_raw("1").unwrap();
/// w.end_object().unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"id\": 1\n}");
/// ```
pub struct JsonWriter<'a, W: Write> {
    out: W,
    indent: Option<&'a str>,
    level: usize,
}

impl<'a, W: Write> JsonWriter<'a, W> {
    /// Creates a compact writer.
    pub fn new(out: W) -> Self {
        Self {
            out,
            indent: None,
            level: 0,
        }
    }

    /// Creates a pretty-printing writer with the given indentation unit.
    pub fn with_indent(out: W, indent: &'a str) -> Self {
        Self {
            out,
            indent: Some(indent),
            level: 0,
        }
    }

    pub(crate) fn with_options(out: W, indent: Option<&'a str>) -> Self {
        Self {
            out,
            indent,
            level: 0,
        }
    }

    pub fn begin_object(&mut self) -> io::Result<()> {
        self.out.write_all(b"{")?;
        self.level += 1;
        self.newline_indent()
    }

    pub fn end_object(&mut self) -> io::Result<()> {
        self.level -= 1;
        self.newline_indent()?;
        self.out.write_all(b"}")
    }

    pub fn begin_array(&mut self) -> io::Result<()> {
        self.out.write_all(b"[")?;
        self.level += 1;
        self.newline_indent()
    }

    pub fn end_array(&mut self) -> io::Result<()> {
        self.level -= 1;
        self.newline_indent()?;
        self.out.write_all(b"]")
    }

    /// Writes the `,` between members or elements.
    pub fn separator(&mut self) -> io::Result<()> {
        self.out.write_all(b",")?;
        self.newline_indent()
    }

    /// Writes an escaped member name followed by `:`.
    pub fn write_name(&mut self, name: &str) -> io::Result<()> {
        self.write_string(name)?;
        self.out.write_all(b":")?;
        if self.indent.is_some() {
            self.out.write_all(b" ")?;
        }
        Ok(())
    }

    /// Writes an escaped, quoted JSON string.
    pub fn write_string(&mut self, value: &str) -> io::Result<()> {
        self.out.write_all(b"\"")?;
        write_escaped(&mut self.out, value)?;
        self.out.write_all(b"\"")
    }

    /// Writes a literal verbatim: numbers, `true`, `false`, `null`.
    pub fn write_raw(&mut self, literal: &str) -> io::Result<()> {
        self.out.write_all(literal.as_bytes())
    }

    pub fn write_null(&mut self) -> io::Result<()> {
        self.out.write_all(b"null")
    }

    /// Writes a whole [`JsonValue`] tree, as produced by a type adapter.
    pub fn write_value(&mut self, value: &JsonValue) -> io::Result<()> {
        match value {
            JsonValue::Null => self.write_null(),
            JsonValue::Bool(true) => self.write_raw("true"),
            JsonValue::Bool(false) => self.write_raw("false"),
            JsonValue::Int(v) => self.write_raw(&v.to_string()),
            JsonValue::Float(v) => self.write_raw(&format_f64(*v)),
            JsonValue::Str(v) => self.write_string(v),
            JsonValue::Array(items) => {
                self.begin_array()?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.separator()?;
                    }
                    self.write_value(item)?;
                }
                self.end_array()
            }
            JsonValue::Object(members) => {
                self.begin_object()?;
                for (i, (name, member)) in members.iter().enumerate() {
                    if i > 0 {
                        self.separator()?;
                    }
                    self.write_name(name)?;
                    self.write_value(member)?;
                }
                self.end_object()
            }
        }
    }

    fn newline_indent(&mut self) -> io::Result<()> {
        let Some(indent) = self.indent else {
            return Ok(());
        };
        self.out.write_all(b"\n")?;
        for _ in 0..self.level {
            self.out.write_all(indent.as_bytes())?;
        }
        Ok(())
    }
}

/// The parser's escape set, plus all other control characters as `\u00XX`.
fn write_escaped<W: Write>(out: &mut W, value: &str) -> io::Result<()> {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let bytes = value.as_bytes();
    let mut run_start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let escape: &[u8] = match b {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            0x08 => b"\\b",
            0x0c => b"\\f",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            c if c < 0x20 => {
                out.write_all(&bytes[run_start..i])?;
                out.write_all(&[b'\\', b'u', b'0', b'0', HEX[(c >> 4) as usize], HEX[(c & 0xf) as usize]])?;
                run_start = i + 1;
                continue;
            }
            _ => continue,
        };
        out.write_all(&bytes[run_start..i])?;
        out.write_all(escape)?;
        run_start = i + 1;
    }
    out.write_all(&bytes[run_start..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::parse;

    fn compact(f: impl FnOnce(&mut JsonWriter<'_, &mut Vec<u8>>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        let mut w = JsonWriter::new(&mut out);
        f(&mut w).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn escapes_strings() {
        let text = compact(|w| w.write_string("a\"b\\c\n\t\u{1}"));
        assert_eq!(text, "\"a\\\"b\\\\c\\n\\t\\u0001\"");
    }

    #[test]
    fn escaped_output_reparses() {
        let original = "line\r\nmixed\u{0} é \u{7f}";
        let text = compact(|w| w.write_string(original));
        let back = parse(&text).unwrap();
        assert_eq!(back.as_str().unwrap(), original);
    }

    #[test]
    fn compact_object_layout() {
        let text = compact(|w| {
            w.begin_object()?;
            w.write_name("a")?;
            w.write_raw("1")?;
            w.separator()?;
            w.write_name("b")?;
            w.write_null()?;
            w.end_object()
        });
        assert_eq!(text, r#"{"a":1,"b":null}"#);
    }

    #[test]
    fn pretty_array_layout() {
        let mut out = Vec::new();
        let mut w = JsonWriter::with_indent(&mut out, "    ");
        w.begin_array().unwrap();
        w.write_raw("1").unwrap();
        w.separator().unwrap();
        w.write_raw("2").unwrap();
        w.end_array().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[\n    1,\n    2\n]"
        );
    }

    #[test]
    fn writes_value_trees() {
        let value = parse(r#"{"b":[1,2.5,"x"],"a":null}"#).unwrap();
        let text = compact(|w| w.write_value(&value));
        assert_eq!(text, r#"{"b":[1,2.5,"x"],"a":null}"#);
    }
}
