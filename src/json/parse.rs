use core::{error, fmt};

use crate::json::{JsonObject, JsonValue};

// -----------------------------------------------------------------------------
// SyntaxError

/// Nesting depth accepted by [`parse`] before giving up.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// An error raised on malformed JSON text.
///
/// Always carries the byte offset at which the violation was detected,
/// together with an expected-versus-found description.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pos: usize,
    kind: SyntaxErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxErrorKind {
    /// The input ended while a token or container was incomplete.
    UnexpectedEnd { expected: &'static str },
    /// A character that cannot start or continue the expected token.
    Unexpected {
        expected: &'static str,
        found: char,
    },
    /// A string literal ran to the end of input without a closing quote.
    UnterminatedString,
    /// An unescaped control character (below `0x20`) inside a string.
    ControlCharacter { found: char },
    /// A `\` followed by a character outside the JSON escape set.
    InvalidEscape { found: char },
    /// A `\u` escape with fewer than four hex digits before the input ended.
    IncompleteUnicodeEscape,
    /// A `\u` escape with non-hex digits, or a surrogate without its pair.
    InvalidUnicodeEscape,
    /// A digit sequence violating the JSON number grammar.
    InvalidNumber { reason: &'static str },
    /// Non-whitespace input after the top-level value.
    TrailingData { found: char },
    /// Containers nested deeper than the configured maximum.
    DepthLimit { limit: usize },
}

impl SyntaxError {
    /// Byte offset into the input at which the error was detected.
    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub const fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SyntaxErrorKind::UnexpectedEnd { expected } => {
                write!(f, "expected {expected}, found end of input")?;
            }
            SyntaxErrorKind::Unexpected { expected, found } => {
                write!(f, "expected {expected}, found `{found}`")?;
            }
            SyntaxErrorKind::UnterminatedString => f.write_str("unterminated string")?,
            SyntaxErrorKind::ControlCharacter { found } => {
                write!(f, "unescaped control character `{}`", found.escape_debug())?;
            }
            SyntaxErrorKind::InvalidEscape { found } => {
                write!(f, "invalid escape sequence `\\{found}`")?;
            }
            SyntaxErrorKind::IncompleteUnicodeEscape => {
                f.write_str("incomplete unicode escape, expected 4 hex digits")?;
            }
            SyntaxErrorKind::InvalidUnicodeEscape => f.write_str("invalid unicode escape")?,
            SyntaxErrorKind::InvalidNumber { reason } => {
                write!(f, "invalid number: {reason}")?;
            }
            SyntaxErrorKind::TrailingData { found } => {
                write!(f, "unexpected `{found}` after the top-level value")?;
            }
            SyntaxErrorKind::DepthLimit { limit } => {
                write!(f, "nesting exceeds the maximum depth of {limit}")?;
            }
        }
        write!(f, " at offset {}", self.pos)
    }
}

impl error::Error for SyntaxError {}

// -----------------------------------------------------------------------------
// Entry points

/// Parses a complete JSON document into a [`JsonValue`] tree.
///
/// The whole input must be consumed: anything but whitespace after the
/// top-level value is an error. Containers may nest at most
/// [`DEFAULT_MAX_DEPTH`] levels; use [`parse_with_depth`] to change that.
///
/// # Examples
///
/// ```
/// use jsonbind::json::{JsonValue, parse};
///
/// let value = parse(r#"{"id": 7, "tags": ["a", "b"]}"#).unwrap();
/// assert_eq!(value.as_object().unwrap()["id"], JsonValue::Int(7));
///
/// let err = parse("[1,2,]").unwrap_err();
/// assert_eq!(err.position(), 5);
/// ```
pub fn parse(text: &str) -> Result<JsonValue, SyntaxError> {
    parse_with_depth(text, DEFAULT_MAX_DEPTH)
}

/// [`parse`] with an explicit nesting limit.
pub fn parse_with_depth(text: &str, max_depth: usize) -> Result<JsonValue, SyntaxError> {
    let mut parser = Parser {
        input: text,
        bytes: text.as_bytes(),
        pos: 0,
        max_depth,
    };
    let value = parser.value(0)?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some(_) => Err(parser.error(SyntaxErrorKind::TrailingData {
            found: parser.found_char(),
        })),
    }
}

// -----------------------------------------------------------------------------
// Parser

/// A single left-to-right pass with one-byte lookahead, no backtracking.
struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl Parser<'_> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn bump(&mut self) {
        self.pos += 1;
    }

    fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError {
            pos: self.pos,
            kind,
        }
    }

    /// The full character at the current position, for error messages.
    fn found_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\u{fffd}')
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.bump();
        }
    }

    fn value(&mut self, depth: usize) -> Result<JsonValue, SyntaxError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error(SyntaxErrorKind::UnexpectedEnd {
                expected: "a JSON value",
            })),
            Some(b'{') => self.object(depth),
            Some(b'[') => self.array(depth),
            Some(b'"') => self.string().map(JsonValue::Str),
            Some(b't') => self.keyword("true", JsonValue::Bool(true)),
            Some(b'f') => self.keyword("false", JsonValue::Bool(false)),
            Some(b'n') => self.keyword("null", JsonValue::Null),
            Some(c) if c == b'-' || c.is_ascii_digit() => self.number(),
            Some(_) => Err(self.error(SyntaxErrorKind::Unexpected {
                expected: "a JSON value",
                found: self.found_char(),
            })),
        }
    }

    fn keyword(&mut self, word: &'static str, value: JsonValue) -> Result<JsonValue, SyntaxError> {
        if self.bytes[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            return Ok(value);
        }
        // Distinguish truncated input from a wrong literal.
        if self.bytes.len() - self.pos < word.len() && word.as_bytes().starts_with(&self.bytes[self.pos..]) {
            self.pos = self.bytes.len();
            return Err(self.error(SyntaxErrorKind::UnexpectedEnd { expected: word }));
        }
        Err(self.error(SyntaxErrorKind::Unexpected {
            expected: word,
            found: self.found_char(),
        }))
    }

    fn object(&mut self, depth: usize) -> Result<JsonValue, SyntaxError> {
        if depth >= self.max_depth {
            return Err(self.error(SyntaxErrorKind::DepthLimit {
                limit: self.max_depth,
            }));
        }
        self.bump(); // consumes `{`
        self.skip_whitespace();

        let mut object = JsonObject::new();
        if self.peek() == Some(b'}') {
            self.bump();
            return Ok(JsonValue::Object(object));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.member_error("a member name"));
            }
            let key = self.string()?;

            self.skip_whitespace();
            match self.peek() {
                Some(b':') => self.bump(),
                _ => return Err(self.member_error("`:`")),
            }

            let value = self.value(depth + 1)?;
            object.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.bump(),
                Some(b'}') => {
                    self.bump();
                    return Ok(JsonValue::Object(object));
                }
                _ => return Err(self.member_error("`,` or `}`")),
            }
        }
    }

    fn array(&mut self, depth: usize) -> Result<JsonValue, SyntaxError> {
        if depth >= self.max_depth {
            return Err(self.error(SyntaxErrorKind::DepthLimit {
                limit: self.max_depth,
            }));
        }
        self.bump(); // consumes `[`
        self.skip_whitespace();

        let mut array = Vec::new();
        if self.peek() == Some(b']') {
            self.bump();
            return Ok(JsonValue::Array(array));
        }

        loop {
            array.push(self.value(depth + 1)?);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.bump();
                    // A closing bracket here would be a trailing comma.
                    self.skip_whitespace();
                    if let Some(b']') = self.peek() {
                        return Err(self.member_error("a JSON value"));
                    }
                }
                Some(b']') => {
                    self.bump();
                    return Ok(JsonValue::Array(array));
                }
                _ => return Err(self.member_error("`,` or `]`")),
            }
        }
    }

    fn member_error(&self, expected: &'static str) -> SyntaxError {
        match self.peek() {
            None => self.error(SyntaxErrorKind::UnexpectedEnd { expected }),
            Some(_) => self.error(SyntaxErrorKind::Unexpected {
                expected,
                found: self.found_char(),
            }),
        }
    }

    fn string(&mut self) -> Result<String, SyntaxError> {
        self.bump(); // consumes `"`
        let mut out = String::new();
        let mut run_start = self.pos;

        loop {
            match self.peek() {
                None => return Err(self.error(SyntaxErrorKind::UnterminatedString)),
                Some(b'"') => {
                    out.push_str(&self.input[run_start..self.pos]);
                    self.bump();
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.input[run_start..self.pos]);
                    self.bump();
                    self.escape(&mut out)?;
                    run_start = self.pos;
                }
                Some(c) if c < 0x20 => {
                    return Err(self.error(SyntaxErrorKind::ControlCharacter {
                        found: c as char,
                    }));
                }
                Some(_) => self.bump(),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), SyntaxError> {
        let Some(c) = self.peek() else {
            return Err(self.error(SyntaxErrorKind::UnterminatedString));
        };
        self.bump();
        match c {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{0008}'),
            b'f' => out.push('\u{000c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let unit = self.hex4()?;
                match unit {
                    // High surrogate: must be followed by `\uXXXX` with a
                    // low surrogate, combined into one code point.
                    0xd800..=0xdbff => {
                        if self.peek() == Some(b'\\') {
                            self.bump();
                            if self.peek() != Some(b'u') {
                                return Err(self.error(SyntaxErrorKind::InvalidUnicodeEscape));
                            }
                            self.bump();
                            let low = self.hex4()?;
                            if !(0xdc00..=0xdfff).contains(&low) {
                                return Err(self.error(SyntaxErrorKind::InvalidUnicodeEscape));
                            }
                            let code =
                                0x10000 + ((unit - 0xd800) << 10) + (low - 0xdc00);
                            match char::from_u32(code) {
                                Some(ch) => out.push(ch),
                                None => {
                                    return Err(
                                        self.error(SyntaxErrorKind::InvalidUnicodeEscape)
                                    );
                                }
                            }
                        } else {
                            return Err(self.error(SyntaxErrorKind::InvalidUnicodeEscape));
                        }
                    }
                    0xdc00..=0xdfff => {
                        return Err(self.error(SyntaxErrorKind::InvalidUnicodeEscape));
                    }
                    _ => match char::from_u32(unit) {
                        Some(ch) => out.push(ch),
                        None => return Err(self.error(SyntaxErrorKind::InvalidUnicodeEscape)),
                    },
                }
            }
            _ => {
                // Point at the offending character, not past it.
                self.pos -= 1;
                return Err(self.error(SyntaxErrorKind::InvalidEscape {
                    found: self.found_char(),
                }));
            }
        }
        Ok(())
    }

    fn hex4(&mut self) -> Result<u32, SyntaxError> {
        if self.pos + 4 > self.bytes.len() {
            self.pos = self.bytes.len();
            return Err(self.error(SyntaxErrorKind::IncompleteUnicodeEscape));
        }
        let mut unit = 0u32;
        for _ in 0..4 {
            let digit = match self.peek() {
                Some(c @ b'0'..=b'9') => u32::from(c - b'0'),
                Some(c @ b'a'..=b'f') => u32::from(c - b'a') + 10,
                Some(c @ b'A'..=b'F') => u32::from(c - b'A') + 10,
                _ => return Err(self.error(SyntaxErrorKind::InvalidUnicodeEscape)),
            };
            unit = unit * 16 + digit;
            self.bump();
        }
        Ok(unit)
    }

    fn number(&mut self) -> Result<JsonValue, SyntaxError> {
        let start = self.pos;
        let mut float = false;

        if self.peek() == Some(b'-') {
            self.bump();
        }

        match self.peek() {
            Some(b'0') => {
                self.bump();
                if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    return Err(self.error(SyntaxErrorKind::InvalidNumber {
                        reason: "leading zero followed by digits",
                    }));
                }
            }
            Some(c) if c.is_ascii_digit() => self.digits(),
            _ => {
                return Err(self.error(SyntaxErrorKind::InvalidNumber {
                    reason: "expected a digit",
                }));
            }
        }

        if self.peek() == Some(b'.') {
            float = true;
            self.bump();
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.error(SyntaxErrorKind::InvalidNumber {
                    reason: "expected a digit after the decimal point",
                }));
            }
            self.digits();
        }

        if let Some(b'e' | b'E') = self.peek() {
            float = true;
            self.bump();
            if let Some(b'+' | b'-') = self.peek() {
                self.bump();
            }
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.error(SyntaxErrorKind::InvalidNumber {
                    reason: "expected a digit in the exponent",
                }));
            }
            self.digits();
        }

        let literal = &self.input[start..self.pos];
        if float {
            return Ok(JsonValue::Float(parse_float(literal)));
        }
        // Exact 64-bit integers; fall back to Float only on overflow.
        match literal.parse::<i64>() {
            Ok(v) => Ok(JsonValue::Int(v)),
            Err(_) => Ok(JsonValue::Float(parse_float(literal))),
        }
    }

    fn digits(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
    }
}

/// The literal has already been validated against the number grammar, which
/// is a subset of what `f64::from_str` accepts.
fn parse_float(literal: &str) -> f64 {
    literal.parse::<f64>().unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars() {
        assert_eq!(parse("null").unwrap(), JsonValue::Null);
        assert_eq!(parse("true").unwrap(), JsonValue::Bool(true));
        assert_eq!(parse(" false ").unwrap(), JsonValue::Bool(false));
        assert_eq!(parse("42").unwrap(), JsonValue::Int(42));
        assert_eq!(parse("-7").unwrap(), JsonValue::Int(-7));
        assert_eq!(parse("4.5").unwrap(), JsonValue::Float(4.5));
        assert_eq!(parse("1e3").unwrap(), JsonValue::Float(1000.0));
        assert_eq!(parse(r#""hi""#).unwrap(), JsonValue::Str("hi".to_owned()));
    }

    #[test]
    fn integer_overflow_falls_back_to_float() {
        let value = parse("9223372036854775807").unwrap();
        assert_eq!(value, JsonValue::Int(i64::MAX));

        let value = parse("9223372036854775808").unwrap();
        assert_eq!(value, JsonValue::Float(9.223_372_036_854_776e18));
    }

    #[test]
    fn parses_nested_containers() {
        let value = parse(r#"{"b": 1, "a": [true, null, {"x": "y"}]}"#).unwrap();
        let object = value.as_object().unwrap();
        let keys: Vec<_> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);

        let inner = object["a"].as_array().unwrap();
        assert_eq!(inner[0], JsonValue::Bool(true));
        assert_eq!(inner[1], JsonValue::Null);
        assert_eq!(
            inner[2].as_object().unwrap()["x"],
            JsonValue::Str("y".to_owned())
        );
    }

    #[test]
    fn decodes_escapes() {
        let value = parse(r#""a\"b\\c\/d\b\f\n\r\t""#).unwrap();
        assert_eq!(
            value,
            JsonValue::Str("a\"b\\c/d\u{8}\u{c}\n\r\t".to_owned())
        );

        let value = parse(r#""é😀""#).unwrap();
        assert_eq!(value, JsonValue::Str("é😀".to_owned()));
    }

    #[test]
    fn unterminated_string_fails() {
        let err = parse(r#"{"a":"b"#).unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::UnterminatedString);
    }

    #[test]
    fn trailing_comma_fails() {
        let err = parse("[1,2,]").unwrap_err();
        assert_eq!(err.position(), 5);
        assert!(matches!(err.kind(), SyntaxErrorKind::Unexpected { .. }));

        let err = parse(r#"{"a":1,}"#).unwrap_err();
        assert!(matches!(
            err.kind(),
            SyntaxErrorKind::Unexpected {
                expected: "a member name",
                ..
            }
        ));
    }

    #[test]
    fn wrong_delimiter_fails() {
        let err = parse("[1 2]").unwrap_err();
        assert!(matches!(
            err.kind(),
            SyntaxErrorKind::Unexpected {
                expected: "`,` or `]`",
                found: '2',
            }
        ));
    }

    #[test]
    fn truncated_input_fails() {
        for text in ["", "[1,", r#"{"a":"#, "tru", "-"] {
            let err = parse(text).unwrap_err();
            assert!(
                matches!(
                    err.kind(),
                    SyntaxErrorKind::UnexpectedEnd { .. } | SyntaxErrorKind::InvalidNumber { .. }
                ),
                "unexpected error for {text:?}: {err}"
            );
        }
    }

    #[test]
    fn bad_numbers_fail() {
        assert!(matches!(
            parse("01").unwrap_err().kind(),
            SyntaxErrorKind::InvalidNumber { .. }
        ));
        assert!(matches!(
            parse("1.").unwrap_err().kind(),
            SyntaxErrorKind::InvalidNumber { .. }
        ));
        assert!(matches!(
            parse("1e+").unwrap_err().kind(),
            SyntaxErrorKind::InvalidNumber { .. }
        ));
    }

    #[test]
    fn incomplete_unicode_escape_fails() {
        let err = parse(r#""\u00"#).unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::IncompleteUnicodeEscape);

        let err = parse(r#""\uZZZZ""#).unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::InvalidUnicodeEscape);

        // A lone high surrogate cannot form a character.
        let err = parse(r#""\uD800""#).unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::InvalidUnicodeEscape);
    }

    #[test]
    fn trailing_data_fails() {
        let err = parse("1 2").unwrap_err();
        assert!(matches!(err.kind(), SyntaxErrorKind::TrailingData { .. }));
    }

    #[test]
    fn depth_limit_is_enforced() {
        let deep = "[".repeat(40) + &"]".repeat(40);
        assert!(parse_with_depth(&deep, 64).is_ok());
        let err = parse_with_depth(&deep, 8).unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::DepthLimit { limit: 8 });
    }
}
