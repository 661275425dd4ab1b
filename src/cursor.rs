use crate::value::Position;
use bytecount::{count, num_chars};
use memchr::{memchr, memrchr};

/// Mutable scan state over one document: absolute offset, total length and
/// the line bookkeeping needed to derive 1-based line/column positions.
///
/// Every multi-character advance (whitespace, comments, string bodies,
/// matched tokens) must go through [`Cursor::skip_forward_to`] so the line
/// counter stays consistent. [`Cursor::next_char`] does not track newlines
/// and is only safe for characters that cannot be a line feed.
#[derive(Debug)]
pub struct Cursor<'a> {
    doc: &'a str,
    pos: usize,
    end: usize,
    lineno: usize,
    line_start: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(doc: &'a str) -> Self {
        Self {
            doc,
            pos: 0,
            end: doc.len(),
            lineno: 1,
            line_start: 0,
        }
    }

    pub fn doc(&self) -> &'a str {
        self.doc
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn rest(&self) -> &'a str {
        &self.doc[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Reads one character and advances past it. Returns `None` at end of
    /// document.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips insignificant text, then reads one character.
    pub fn next_after_whitespace(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.next_char()
    }

    /// Undoes the read of the last `n` bytes. Only valid for lookahead that
    /// did not cross a newline.
    pub fn rewind(&mut self, n: usize) {
        debug_assert!(n <= self.pos - self.line_start);
        self.pos -= n;
    }

    /// Advances to `target`, updating the line counter for any newlines in
    /// the skipped span.
    pub fn skip_forward_to(&mut self, target: usize) {
        if target == self.pos {
            return;
        }

        let skipped = &self.doc.as_bytes()[self.pos..target];
        let linefeeds = count(skipped, b'\n');

        if linefeeds > 0 {
            self.lineno += linefeeds;
            // Safe to unwrap: linefeeds > 0 means the span holds at least one
            self.line_start = self.pos + memrchr(b'\n', skipped).unwrap() + 1;
        }

        self.pos = target;
    }

    /// Consumes whitespace and `//` / `/* */` comments until neither is
    /// found. An unterminated block comment swallows the rest of the
    /// document, it is not an error.
    pub fn skip_whitespace(&mut self) {
        loop {
            let bytes = self.doc.as_bytes();
            let mut i = self.pos;
            while i < self.end && matches!(bytes[i], b' ' | b'\t' | b'\n' | b'\r') {
                i += 1;
            }
            self.skip_forward_to(i);

            if self.pos + 2 > self.end {
                break;
            }

            let rest = &bytes[self.pos..];
            match &rest[..2] {
                b"//" => match memchr(b'\n', rest) {
                    Some(lf) => self.skip_forward_to(self.pos + lf + 1),
                    None => {
                        self.skip_forward_to(self.end);
                        break;
                    }
                },
                b"/*" => match memchr::memmem::find(&rest[2..], b"*/") {
                    Some(close) => self.skip_forward_to(self.pos + 2 + close + 2),
                    None => {
                        self.skip_forward_to(self.end);
                        break;
                    }
                },
                _ => break,
            }
        }
    }

    /// The position of the cursor, with `offset` applied to the column.
    pub fn current_position(&self, offset: isize) -> Position {
        let col = num_chars(&self.doc.as_bytes()[self.line_start..self.pos]) as isize + 1 + offset;

        Position::new(self.lineno, col as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_lines_across_skips() {
        let mut cursor = Cursor::new("ab\ncd\nef");

        cursor.skip_forward_to(7);

        let pos = cursor.current_position(0);
        assert_eq!(pos.line, 3);
        assert_eq!(pos.col, 2);
    }

    #[test]
    fn skips_line_and_block_comments() {
        let mut cursor = Cursor::new("  // one\n /* two\nlines */\t1");

        cursor.skip_whitespace();

        assert_eq!(cursor.peek(), Some('1'));
        assert_eq!(cursor.current_position(0).line, 3);
    }

    #[test]
    fn unterminated_block_comment_consumes_the_rest() {
        let mut cursor = Cursor::new("/* never closed");

        cursor.skip_whitespace();

        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn column_counts_characters_not_bytes() {
        let mut cursor = Cursor::new("é1");

        cursor.next_char();

        assert_eq!(cursor.current_position(0).col, 2);
    }
}
