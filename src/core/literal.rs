//! Scalar Literal Coercion
//!
//! Attribute values and content text both pass through the same coercion:
//! an empty raw string becomes [`Value::Null`]; otherwise the raw string is
//! parsed as a self-contained literal (null, boolean, number, quoted string,
//! or nested array/object in the common structured-data notation) and falls
//! back to the original string when it is not one. The parser fails closed:
//! anything outside the closed grammar is a fallback, never an error.

/// A coerced scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null (also the coercion of an empty raw value)
    Null,
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Floating-point literal (fraction or exponent form, or i64 overflow)
    Float(f64),
    /// Plain text, or a quoted string literal
    Str(String),
    /// Array literal
    Array(Vec<Value>),
    /// Object literal (insertion order preserved)
    Object(Vec<(String, Value)>),
}

impl Value {
    /// True if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as boolean, or None.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer, or None.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as a float; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string text, or None.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Coerce a raw attribute value.
///
/// Empty raw value is the null value; a non-literal falls back to the raw
/// string verbatim, untrimmed.
pub fn coerce_attribute(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    parse_literal(raw).unwrap_or_else(|| Value::Str(raw.to_string()))
}

/// Coerce raw content text.
///
/// Same literal grammar as attributes, but the fallback string is trimmed of
/// leading and trailing whitespace.
pub fn coerce_content(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    parse_literal(raw).unwrap_or_else(|| Value::Str(raw.trim().to_string()))
}

/// Parse the input as one self-contained literal.
///
/// Leading/trailing ASCII whitespace is accepted; anything else left over
/// after the literal makes the whole input a non-literal.
fn parse_literal(input: &str) -> Option<Value> {
    let mut parser = LiteralParser::new(input);
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.at_end() {
        Some(value)
    } else {
        None
    }
}

/// Recursive-descent parser over the closed literal grammar.
struct LiteralParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str) -> Self {
        LiteralParser { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self) -> Option<Value> {
        match self.peek()? {
            b'n' => self.expect_keyword("null", Value::Null),
            b't' => self.expect_keyword("true", Value::Bool(true)),
            b'f' => self.expect_keyword("false", Value::Bool(false)),
            b'"' => self.parse_string().map(Value::Str),
            b'[' => self.parse_array(),
            b'{' => self.parse_object(),
            b'-' | b'0'..=b'9' => self.parse_number(),
            _ => None,
        }
    }

    fn expect_keyword(&mut self, keyword: &str, value: Value) -> Option<Value> {
        if self.remaining().starts_with(keyword) {
            self.advance(keyword.len());
            Some(value)
        } else {
            None
        }
    }

    /// Parse a number with the common structured-data grammar: an optional
    /// minus, an integer part without leading zeros, and optional fraction
    /// and exponent parts.
    fn parse_number(&mut self) -> Option<Value> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.advance(1);
        }

        // Integer part: a lone '0' or a nonzero-led digit run
        match self.peek()? {
            b'0' => self.advance(1),
            b'1'..=b'9' => {
                while let Some(b'0'..=b'9') = self.peek() {
                    self.advance(1);
                }
            }
            _ => return None,
        }

        let mut is_float = false;

        if self.peek() == Some(b'.') {
            self.advance(1);
            self.digits()?;
            is_float = true;
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.advance(1);
            if let Some(b'+' | b'-') = self.peek() {
                self.advance(1);
            }
            self.digits()?;
            is_float = true;
        }

        let text = &self.input[start..self.pos];
        if is_float {
            text.parse::<f64>().ok().map(Value::Float)
        } else {
            // Whole numbers too large for i64 widen to f64
            match text.parse::<i64>() {
                Ok(n) => Some(Value::Int(n)),
                Err(_) => text.parse::<f64>().ok().map(Value::Float),
            }
        }
    }

    /// Require at least one digit and consume the run.
    fn digits(&mut self) -> Option<()> {
        match self.peek()? {
            b'0'..=b'9' => {}
            _ => return None,
        }
        while let Some(b'0'..=b'9') = self.peek() {
            self.advance(1);
        }
        Some(())
    }

    /// Parse a double-quoted string literal with escape sequences.
    fn parse_string(&mut self) -> Option<String> {
        self.advance(1); // opening quote
        let mut out = String::new();

        loop {
            let c = self.remaining().chars().next()?;
            match c {
                '"' => {
                    self.advance(1);
                    return Some(out);
                }
                '\\' => {
                    self.advance(1);
                    out.push(self.parse_escape()?);
                }
                // Unescaped control characters are outside the grammar
                c if (c as u32) < 0x20 => return None,
                c => {
                    out.push(c);
                    self.advance(c.len_utf8());
                }
            }
        }
    }

    fn parse_escape(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.advance(1);
        match c {
            b'"' => Some('"'),
            b'\\' => Some('\\'),
            b'/' => Some('/'),
            b'b' => Some('\u{0008}'),
            b'f' => Some('\u{000C}'),
            b'n' => Some('\n'),
            b'r' => Some('\r'),
            b't' => Some('\t'),
            b'u' => self.parse_unicode_escape(),
            _ => None,
        }
    }

    /// Parse the four hex digits of a `\u` escape, pairing surrogates.
    fn parse_unicode_escape(&mut self) -> Option<char> {
        let high = self.hex4()?;
        if (0xD800..=0xDBFF).contains(&high) {
            // High surrogate: requires a low surrogate escape right after
            if self.peek() != Some(b'\\') {
                return None;
            }
            self.advance(1);
            if self.peek() != Some(b'u') {
                return None;
            }
            self.advance(1);
            let low = self.hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return None;
            }
            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            char::from_u32(code)
        } else if (0xDC00..=0xDFFF).contains(&high) {
            // Lone low surrogate
            None
        } else {
            char::from_u32(high)
        }
    }

    fn hex4(&mut self) -> Option<u32> {
        let digits = self.remaining().get(..4)?;
        // from_str_radix tolerates a leading '+', the escape grammar does not
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let code = u32::from_str_radix(digits, 16).ok()?;
        self.advance(4);
        Some(code)
    }

    fn parse_array(&mut self) -> Option<Value> {
        self.advance(1); // '['
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.advance(1);
            return Some(Value::Array(items));
        }

        loop {
            self.skip_whitespace();
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek()? {
                b',' => self.advance(1),
                b']' => {
                    self.advance(1);
                    return Some(Value::Array(items));
                }
                _ => return None,
            }
        }
    }

    fn parse_object(&mut self) -> Option<Value> {
        self.advance(1); // '{'
        let mut entries = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.advance(1);
            return Some(Value::Object(entries));
        }

        loop {
            self.skip_whitespace();
            if self.peek()? != b'"' {
                return None;
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            if self.peek()? != b':' {
                return None;
            }
            self.advance(1);
            self.skip_whitespace();
            let value = self.parse_value()?;
            entries.push((key, value));
            self.skip_whitespace();
            match self.peek()? {
                b',' => self.advance(1),
                b'}' => {
                    self.advance(1);
                    return Some(Value::Object(entries));
                }
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scalar_literals() {
        assert_eq!(coerce_attribute("null"), Value::Null);
        assert_eq!(coerce_attribute("true"), Value::Bool(true));
        assert_eq!(coerce_attribute("false"), Value::Bool(false));
        assert_eq!(coerce_attribute("42"), Value::Int(42));
        assert_eq!(coerce_attribute("-7"), Value::Int(-7));
        assert_eq!(coerce_attribute("0"), Value::Int(0));
        assert_eq!(coerce_attribute("4.5"), Value::Float(4.5));
        assert_eq!(coerce_attribute("1e3"), Value::Float(1000.0));
        assert_eq!(coerce_attribute("-2.5e-1"), Value::Float(-0.25));
    }

    #[test]
    fn test_empty_is_null() {
        assert_eq!(coerce_attribute(""), Value::Null);
        assert_eq!(coerce_content(""), Value::Null);
    }

    #[test]
    fn test_quoted_string_literal() {
        assert_eq!(
            coerce_attribute(r#""hello""#),
            Value::Str("hello".to_string())
        );
        assert_eq!(
            coerce_attribute(r#""a\nb\t\"c\"""#),
            Value::Str("a\nb\t\"c\"".to_string())
        );
        assert_eq!(
            coerce_attribute(r#""é€""#),
            Value::Str("é€".to_string())
        );
        // Surrogate pair
        assert_eq!(
            coerce_attribute(r#""😀""#),
            Value::Str("😀".to_string())
        );
    }

    #[test]
    fn test_structured_literals() {
        assert_eq!(
            coerce_attribute("[1, 2, 3]"),
            Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
        assert_eq!(coerce_attribute("[]"), Value::Array(vec![]));
        assert_eq!(
            coerce_attribute(r#"{"b": 1, "a": [true, null]}"#),
            Value::Object(vec![
                ("b".to_string(), Value::Int(1)),
                (
                    "a".to_string(),
                    Value::Array(vec![Value::Bool(true), Value::Null])
                ),
            ])
        );
    }

    #[test]
    fn test_object_keeps_insertion_order() {
        let value = coerce_attribute(r#"{"z": 1, "a": 2, "z": 3}"#);
        assert_eq!(
            value,
            Value::Object(vec![
                ("z".to_string(), Value::Int(1)),
                ("a".to_string(), Value::Int(2)),
                ("z".to_string(), Value::Int(3)),
            ])
        );
    }

    #[test]
    fn test_fallback_to_raw_string() {
        assert_eq!(coerce_attribute("hello"), Value::Str("hello".to_string()));
        assert_eq!(coerce_attribute("tru"), Value::Str("tru".to_string()));
        assert_eq!(coerce_attribute("nulls"), Value::Str("nulls".to_string()));
        assert_eq!(coerce_attribute("1.2.3"), Value::Str("1.2.3".to_string()));
        assert_eq!(coerce_attribute("042"), Value::Str("042".to_string()));
        assert_eq!(coerce_attribute("[1,]"), Value::Str("[1,]".to_string()));
        assert_eq!(
            coerce_attribute(r#"{"a":}"#),
            Value::Str(r#"{"a":}"#.to_string())
        );
        assert_eq!(coerce_attribute("1 2"), Value::Str("1 2".to_string()));
    }

    #[test]
    fn test_attribute_fallback_is_untrimmed() {
        assert_eq!(
            coerce_attribute("  hello  "),
            Value::Str("  hello  ".to_string())
        );
    }

    #[test]
    fn test_content_fallback_is_trimmed() {
        assert_eq!(
            coerce_content("  hello world \n"),
            Value::Str("hello world".to_string())
        );
    }

    #[test]
    fn test_surrounding_whitespace_on_literals() {
        assert_eq!(coerce_attribute(" 42 "), Value::Int(42));
        assert_eq!(coerce_content("\n true\t"), Value::Bool(true));
    }

    #[test]
    fn test_lone_surrogate_falls_back() {
        let raw = r#""\ud83d""#;
        assert_eq!(coerce_attribute(raw), Value::Str(raw.to_string()));
    }

    #[test]
    fn test_big_integer_widens_to_float() {
        assert_eq!(
            coerce_attribute("92233720368547758080"),
            Value::Float(92233720368547758080.0)
        );
    }

    /// The literal grammar is the common structured-data one; for inputs
    /// that grammar accepts, our coercion must agree with serde_json.
    #[test]
    fn test_agrees_with_serde_json() {
        let inputs = [
            "null",
            "true",
            "false",
            "42",
            "-13",
            "4.5",
            "1e-2",
            r#""text with \"escapes\"\n""#,
            "[1, [2.5, \"x\"], null]",
            r#"{"k": true, "m": [0]}"#,
            "hello",
            "042",
            "[1,]",
            "\"unterminated",
        ];
        for input in inputs {
            let ours = parse_literal(input);
            let theirs: Result<serde_json::Value, _> = serde_json::from_str(input);
            match (ours, theirs) {
                (Some(v), Ok(j)) => assert_eq!(to_json(&v), j, "value mismatch for {input:?}"),
                (None, Err(_)) => {}
                (ours, theirs) => {
                    panic!("accept/reject mismatch for {input:?}: {ours:?} vs {theirs:?}")
                }
            }
        }
    }

    fn to_json(value: &Value) -> serde_json::Value {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(n) => serde_json::Value::from(*n),
            Value::Str(s) => serde_json::Value::from(s.as_str()),
            Value::Array(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
            Value::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), to_json(v)))
                    .collect(),
            ),
        }
    }

    proptest! {
        /// Anything that is not a literal coerces to itself.
        #[test]
        fn prop_non_literal_words_fall_back(word in "[a-su-z][a-z]{0,11}") {
            prop_assume!(word != "false" && word != "null");
            prop_assert_eq!(coerce_attribute(&word), Value::Str(word.clone()));
            prop_assert_eq!(coerce_content(&word), Value::Str(word));
        }
    }
}
