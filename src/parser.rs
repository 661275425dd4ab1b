use crate::cursor::Cursor;
use crate::encoding;
use crate::error::{Kind, ParseError};
use crate::expr;
use crate::value::{
    AttributedDict, AttributedList, KeyValuePosition, Number, ParseResult, Value,
};
use memchr::memchr2;

/// Named constants, tried before number matching so `-Infinity` wins over a
/// numeric `-`. The signed form sits before `Infinity` to match first.
const CONSTANTS: [&str; 6] = ["null", "true", "false", "-Infinity", "Infinity", "NaN"];

pub fn default_parse_constant(name: &str) -> Option<Value> {
    match name {
        "null" => Some(Value::Null),
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "NaN" => Some(Value::Number(Number::Float(f64::NAN))),
        "Infinity" => Some(Value::Number(Number::Float(f64::INFINITY))),
        "-Infinity" => Some(Value::Number(Number::Float(f64::NEG_INFINITY))),
        _ => None,
    }
}

pub fn default_parse_float(literal: &str) -> Option<Value> {
    literal
        .parse::<f64>()
        .ok()
        .map(|value| Value::Number(Number::Float(value)))
}

/// Auto-radix integer parsing: `0x`/`0o`/`0b` prefixes select the base when
/// `radix` is 0, plain literals are decimal. A decimal literal with a leading
/// zero is rejected here so the scanner can retry it as octal. Decimal
/// literals too big for an integer degrade to a float.
pub fn default_parse_int(literal: &str, radix: u32) -> Option<Value> {
    let (negative, body) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };

    let (base, digits) = if radix == 0 {
        if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
            (16, hex)
        } else if let Some(oct) = body.strip_prefix("0o").or_else(|| body.strip_prefix("0O")) {
            (8, oct)
        } else if let Some(bin) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
            (2, bin)
        } else {
            if body.len() > 1 && body.starts_with('0') {
                return None;
            }
            (10, body)
        }
    } else {
        (radix, body)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(base)) {
        return None;
    }

    if negative {
        match i64::from_str_radix(digits, base) {
            Ok(value) => Some(Value::Number(Number::NegInt(-value))),
            Err(_) if base == 10 => default_parse_float(literal),
            Err(_) => None,
        }
    } else {
        match u64::from_str_radix(digits, base) {
            Ok(value) => Some(Value::Number(Number::PosInt(value))),
            Err(_) if base == 10 => default_parse_float(literal),
            Err(_) => None,
        }
    }
}

/// Numeric hooks, fixed at construction. Callers can swap these to produce
/// custom representations for floats, integers or the named constants.
#[derive(Clone, Copy, Debug)]
pub struct ParserConfig {
    pub parse_float: fn(&str) -> Option<Value>,
    pub parse_int: fn(&str, u32) -> Option<Value>,
    pub parse_constant: fn(&str) -> Option<Value>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            parse_float: default_parse_float,
            parse_int: default_parse_int,
            parse_constant: default_parse_constant,
        }
    }
}

/// Recursive-descent scanner over one document.
///
/// A parser owns its cursor for the duration of a decode and is not meant to
/// be shared; distinct parsers over distinct documents are fully independent.
/// Nesting recurses, so depth is bounded by the call stack.
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    config: ParserConfig,
}

impl<'a> Parser<'a> {
    pub fn new(document: &'a str) -> Self {
        Self {
            cursor: Cursor::new(document),
            config: ParserConfig::default(),
        }
    }

    /// Validates the document against a named encoding before parsing. The
    /// gate never transforms the document, it only rejects characters outside
    /// the encoding's repertoire.
    pub fn with_encoding(document: &'a str, encoding: &str) -> Result<Self, ParseError> {
        encoding::validate(document, encoding)?;

        Ok(Self::new(document))
    }

    pub fn config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// The cursor offset after the last scan. Feed it back as `start_index`
    /// to decode the next top-level value of a multi-value document.
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// Decodes one value. With `search_for_first_object` the cursor first
    /// seeks to the first `[` or `{`, ignoring any preceding prose.
    pub fn decode(&mut self, search_for_first_object: bool, start_index: usize) -> ParseResult {
        if start_index > self.cursor.pos() {
            self.cursor.skip_forward_to(start_index);
        }

        if search_for_first_object {
            if let Some(found) = memchr2(b'[', b'{', self.cursor.rest().as_bytes()) {
                let pos = self.cursor.pos();
                self.cursor.skip_forward_to(pos + found);
            }
        }

        self.cursor.skip_whitespace();
        self.scan()
    }

    /// Parses exactly one value at the current cursor, without the top-level
    /// search/skip behavior of [`Parser::decode`].
    pub fn scan(&mut self) -> ParseResult {
        let next = match self.cursor.next_char() {
            Some(c) => c,
            None => return Err(self.error(Kind::ExpectingValue, self.cursor.pos())),
        };

        match next {
            '"' | '\'' => self.scan_string(next).map(Value::String),
            '{' => self.scan_object().map(Value::Object),
            '[' => self.scan_array().map(Value::Array),
            c => {
                self.cursor.rewind(c.len_utf8());
                self.scan_constant_number_or_expression()
            }
        }
    }

    fn error(&self, kind: Kind, pos: usize) -> ParseError {
        ParseError::new(kind, self.cursor.doc(), pos)
    }

    fn scan_constant_number_or_expression(&mut self) -> ParseResult {
        let rest = self.cursor.rest();

        for name in CONSTANTS {
            if rest.starts_with(name) {
                if let Some(value) = (self.config.parse_constant)(name) {
                    let pos = self.cursor.pos();
                    self.cursor.skip_forward_to(pos + name.len());
                    return Ok(value);
                }
                // Matched but unresolved: let the number branch have a go
                break;
            }
        }

        if let Some(value) = self.scan_number() {
            return Ok(value);
        }

        self.scan_expression()
    }

    /// Matches a numeric literal at the cursor. `None` leaves the cursor
    /// untouched so the dispatch can fall back to the expression evaluator.
    fn scan_number(&mut self) -> Option<Value> {
        let rest = self.cursor.rest();
        let (len, int_len) = match_number_literal(rest)?;
        let literal = &rest[..len];
        let int_part = &rest[..int_len];

        let value = if len > int_len {
            (self.config.parse_float)(literal)
        } else {
            (self.config.parse_int)(literal, 0).or_else(|| {
                // Legacy fallback: a plain literal with a leading zero that
                // failed the decimal parse is reinterpreted as octal
                if int_part.len() > 1 && int_part.starts_with('0') {
                    (self.config.parse_int)(&format!("0o{}", &int_part[1..]), 0)
                } else {
                    None
                }
            })
        }?;

        let pos = self.cursor.pos();
        self.cursor.skip_forward_to(pos + len);
        Some(value)
    }

    fn scan_expression(&mut self) -> ParseResult {
        let rest = self.cursor.rest();
        let len = rest
            .find(|c: char| !expr::is_expression_char(c))
            .unwrap_or(rest.len());

        if len == 0 {
            return Err(self.error(Kind::ExpectingValue, self.cursor.pos()));
        }

        match expr::evaluate(&rest[..len]) {
            Some(value) => {
                let pos = self.cursor.pos();
                self.cursor.skip_forward_to(pos + len);
                Ok(Value::Number(Number::Float(value)))
            }
            None => Err(self.error(Kind::CannotEvaluateExpression, self.cursor.pos())),
        }
    }

    /// Scans a string body. The opening quote was already consumed; `quote`
    /// is its character and the only terminator, so the other quote kind is
    /// plain content. Raw control characters pass through literally.
    fn scan_string(&mut self, quote: char) -> Result<String, ParseError> {
        let begin = self.cursor.pos() - 1;
        let mut out = String::new();

        loop {
            let rest = self.cursor.rest();
            let stop = rest.find(|c: char| c == quote || c == '\\' || c <= '\u{1f}');

            let (chunk_len, terminator) = match stop {
                Some(i) => (i, rest[i..].chars().next().unwrap()),
                None => return Err(self.error(Kind::UnterminatedString, begin)),
            };

            out.push_str(&rest[..chunk_len]);
            let pos = self.cursor.pos();
            self.cursor
                .skip_forward_to(pos + chunk_len + terminator.len_utf8());

            match terminator {
                c if c == quote => break,
                '\\' => self.scan_escape(&mut out, begin)?,
                control => out.push(control),
            }
        }

        Ok(out)
    }

    /// Four hex digits starting at byte offset `at`, or `None` when the
    /// document is too short or any digit is invalid.
    fn hex4(&self, at: usize) -> Option<u16> {
        self.cursor
            .doc()
            .get(at..at + 4)
            .filter(|digits| digits.chars().all(|c| c.is_ascii_hexdigit()))
            .and_then(|digits| u16::from_str_radix(digits, 16).ok())
    }

    fn scan_escape(&mut self, out: &mut String, begin: usize) -> Result<(), ParseError> {
        let esc = match self.cursor.peek() {
            Some(c) => c,
            None => return Err(self.error(Kind::UnterminatedString, begin)),
        };

        if esc == 'u' {
            // Exactly four hex digits must follow the 'u'
            let pos = self.cursor.pos();
            let unit = match self.hex4(pos + 1) {
                Some(unit) => unit,
                None => return Err(self.error(Kind::InvalidUnicodeEscape, pos - 1)),
            };

            let mut consumed = 5;
            let decoded = if !(0xd800..0xe000).contains(&unit) {
                char::from_u32(unit as u32).unwrap_or('\u{fffd}')
            } else if (0xd800..0xdc00).contains(&unit) {
                // High surrogate: combine with an immediately following low
                // escape into the supplementary-plane character
                let low = match self.cursor.doc().get(pos + 5..pos + 7) {
                    Some("\\u") => self
                        .hex4(pos + 7)
                        .filter(|low| (0xdc00..0xe000).contains(low)),
                    _ => None,
                };

                match low {
                    Some(low) => {
                        consumed = 11;
                        let high_ten = (unit as u32) - 0xd800;
                        let low_ten = (low as u32) - 0xdc00;
                        char::from_u32((high_ten << 10) + low_ten + 0x10000).unwrap_or('\u{fffd}')
                    }
                    // A genuinely lone surrogate cannot live in a Rust char
                    None => '\u{fffd}',
                }
            } else {
                '\u{fffd}'
            };

            out.push(decoded);
            self.cursor.skip_forward_to(pos + consumed);
            Ok(())
        } else {
            match escape_table(esc) {
                Some(resolved) => {
                    out.push(resolved);
                    self.cursor.next_char();
                    Ok(())
                }
                None => Err(self.error(Kind::InvalidEscape(esc), self.cursor.pos())),
            }
        }
    }

    fn scan_unquoted_key(&mut self, first: char) -> Result<String, ParseError> {
        if !is_key_char(first) {
            return Err(self.error(Kind::ExpectingPropertyName, self.cursor.pos()));
        }

        let doc = self.cursor.doc();
        let start = self.cursor.pos() - first.len_utf8();
        let len = doc[start..]
            .find(|c: char| !is_key_char(c))
            .unwrap_or(doc.len() - start);

        self.cursor.skip_forward_to(start + len);
        Ok(doc[start..start + len].to_string())
    }

    /// Object body after the opening `{`. Keys may be quoted with either
    /// quote or bare identifiers; a later duplicate key overwrites the
    /// earlier value and attributes.
    fn scan_object(&mut self) -> Result<AttributedDict, ParseError> {
        let mut dict = AttributedDict::new();
        let mut next = self.cursor.next_after_whitespace();

        loop {
            let c = match next {
                Some('}') => break,
                Some(c) => c,
                None => {
                    return Err(self.error(Kind::ExpectingPropertyName, self.cursor.pos()));
                }
            };

            let key_pos = self.cursor.current_position(-1);
            let key = if c == '"' || c == '\'' {
                self.scan_string(c)?
            } else {
                self.scan_unquoted_key(c)?
            };

            match self.cursor.next_after_whitespace() {
                Some(':') => {}
                _ => return Err(self.error(Kind::ExpectingColon, self.cursor.pos())),
            }

            self.cursor.skip_whitespace();
            let value_pos = self.cursor.current_position(0);
            let value = self.scan()?;
            dict.insert(
                key,
                value,
                KeyValuePosition {
                    key: key_pos,
                    value: value_pos,
                },
            );

            next = self.cursor.next_after_whitespace();
            match next {
                Some(',') => next = self.cursor.next_after_whitespace(),
                Some('}') => break,
                Some(other) => {
                    let pos = self.cursor.pos() - other.len_utf8();
                    return Err(self.error(Kind::ExpectingObjectDelimiter, pos));
                }
                None => {
                    return Err(self.error(Kind::ExpectingObjectDelimiter, self.cursor.pos()));
                }
            }
        }

        Ok(dict)
    }

    /// Array body after the opening `[`. Element start positions are recorded
    /// before each value is scanned.
    fn scan_array(&mut self) -> Result<AttributedList, ParseError> {
        let mut list = AttributedList::new();
        let mut next = self.cursor.next_after_whitespace();

        loop {
            match next {
                Some(']') => break,
                Some(c) => self.cursor.rewind(c.len_utf8()),
                // End of input: scan reports "Expecting value" there
                None => {}
            }

            let value_pos = self.cursor.current_position(0);
            let value = self.scan()?;
            list.push(value, value_pos);

            next = self.cursor.next_after_whitespace();
            match next {
                Some(',') => next = self.cursor.next_after_whitespace(),
                Some(']') => break,
                Some(other) => {
                    let pos = self.cursor.pos() - other.len_utf8();
                    return Err(self.error(Kind::ExpectingArrayDelimiter, pos));
                }
                None => {
                    return Err(self.error(Kind::ExpectingArrayDelimiter, self.cursor.pos()));
                }
            }
        }

        Ok(list)
    }
}

/// Parses one value from the start of `document` with the default
/// configuration, skipping any leading whitespace and comments.
pub fn parse(document: &str) -> ParseResult {
    Parser::new(document).decode(false, 0)
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn escape_table(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\'' => Some('\''),
        '\\' => Some('\\'),
        '/' => Some('/'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        _ => None,
    }
}

/// Longest numeric literal at the start of `rest`: optional `-`, a hex or
/// decimal integer part, then optional fraction and exponent. Returns the
/// total length and the length of the integer part.
fn match_number_literal(rest: &str) -> Option<(usize, usize)> {
    let bytes = rest.as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'-') {
        i = 1;
    }

    let hex_digit_after_prefix = bytes.len() > i + 2
        && bytes[i] == b'0'
        && (bytes[i + 1] == b'x' || bytes[i + 1] == b'X')
        && bytes[i + 2].is_ascii_hexdigit();

    if hex_digit_after_prefix {
        i += 2;
        while i < bytes.len() && bytes[i].is_ascii_hexdigit() {
            i += 1;
        }
    } else {
        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == digits_start {
            return None;
        }
    }

    let int_len = i;

    if bytes.get(i) == Some(&b'.') {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > i + 1 {
            i = j;
        }
    }

    if matches!(bytes.get(i), Some(&b'e') | Some(&b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(&b'+') | Some(&b'-')) {
            j += 1;
        }
        let exp_digits = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_digits {
            i = j;
        }
    }

    Some((i, int_len))
}
