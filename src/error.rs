use std::fmt;

/// What went wrong. Every failure renders through [`ParseError`] as
/// `"<message>: line <L> column <C> (char <N>)"`; callers that need to
/// distinguish failures can match on the kind or on the message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    ExpectingValue,
    ExpectingPropertyName,
    ExpectingColon,
    ExpectingObjectDelimiter,
    ExpectingArrayDelimiter,
    UnterminatedString,
    InvalidEscape(char),
    InvalidUnicodeEscape,
    CannotEvaluateExpression,
    InvalidEncoding(String),
    NonEncodingCharacter { encoding: String, character: char },
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectingValue => write!(f, "Expecting value"),
            Self::ExpectingPropertyName => write!(f, "Expecting property name"),
            Self::ExpectingColon => write!(f, "Expecting ':' delimiter"),
            Self::ExpectingObjectDelimiter => write!(f, "Expecting ',' delimiter or '}}'"),
            Self::ExpectingArrayDelimiter => write!(f, "Expecting ',' delimiter or ']'"),
            Self::UnterminatedString => write!(f, "Unterminated string starting at"),
            Self::InvalidEscape(c) => write!(f, "Invalid \\X escape sequence {}", c),
            Self::InvalidUnicodeEscape => write!(f, "Invalid \\uXXXX escape sequence"),
            Self::CannotEvaluateExpression => write!(f, "Cannot evaluate expression"),
            Self::InvalidEncoding(name) => write!(f, "Invalid encoding: {}", name),
            Self::NonEncodingCharacter {
                encoding,
                character,
            } => write!(f, "Non-{} character {}", encoding, character),
        }
    }
}

/// A decode failure at an exact offset of the document.
///
/// The line and column are derived from the document prefix at construction
/// time, independently of the parser's live cursor, so an error is accurate
/// even when raised with a stale or final offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: Kind,
    pub pos: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseError {
    pub fn new(kind: Kind, doc: &str, pos: usize) -> Self {
        let (line, col) = line_col(doc, pos);

        Self {
            kind,
            pos,
            line,
            col,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: line {} column {} (char {})",
            self.kind, self.line, self.col, self.pos
        )
    }
}

impl std::error::Error for ParseError {}

/// Same bookkeeping as the cursor: 1-based line, 1-based character column
/// counted from the last newline before `pos`.
fn line_col(doc: &str, pos: usize) -> (usize, usize) {
    let pos = pos.min(doc.len());
    let prefix = &doc.as_bytes()[..pos];

    let line = bytecount::count(prefix, b'\n') + 1;
    let line_start = memchr::memrchr(b'\n', prefix).map(|i| i + 1).unwrap_or(0);
    let col = bytecount::num_chars(&prefix[line_start..]) + 1;

    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_line_and_column() {
        let doc = "{\n  \"a\": !\n}";
        let err = ParseError::new(Kind::ExpectingValue, doc, 9);

        assert_eq!(err.line, 2);
        assert_eq!(err.col, 8);
        assert_eq!(err.to_string(), "Expecting value: line 2 column 8 (char 9)");
    }

    #[test]
    fn offset_past_the_document_is_clamped_for_rendering() {
        let err = ParseError::new(Kind::ExpectingValue, "[1,", 3);

        assert_eq!(err.line, 1);
        assert_eq!(err.col, 4);
        assert_eq!(err.pos, 3);
    }
}
