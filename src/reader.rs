//! Text to [`Value`] conversion.
//!
//! The reader is a combined lexer and parser working over a character
//! buffer. Lists are assembled on an explicit stack, so nesting depth does
//! not consume call stack while reading.
//!
//! Grammar:
//!
//! ```text
//! value   = atom | string | list
//! atom    = run of chars except whitespace, '(', ')', '"', ';'   -> upper-cased Symbol
//! string  = '"' (char | escape)* '"'
//! escape  = \" | \\ | \t | \r | \n | \xHH | \uHHHH | \UHHHHHH
//! list    = '(' value* ')'
//! comment = ';' up to end of line
//! ```
//!
//! A hex escape followed by fewer digits than its full width is kept
//! literally: `"\x4"` reads as the two characters `x4`.

use tracing::trace;

use crate::error::{ReadError, ReadErrorKind};
use crate::value::{List, Value};

/// Reads values one at a time from an in-memory source.
///
/// Every atom becomes an interned [`Symbol`](crate::Symbol). Interned names
/// are never freed, so reading untrusted input with many distinct atoms
/// grows memory for the life of the process.
pub struct Reader {
    input: Vec<char>,
    position: usize,
}

impl Reader {
    pub fn new(input: &str) -> Self {
        Reader {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Read from raw bytes; invalid UTF-8 sequences become U+FFFD.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(&String::from_utf8_lossy(bytes))
    }

    /// Current character offset
    pub fn position(&self) -> usize {
        self.position
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn fail(&self, kind: ReadErrorKind, offset: usize) -> ReadError {
        trace!(?kind, offset, "read failed");
        ReadError::new(kind, offset)
    }

    fn skip_whitespace(&mut self) {
        loop {
            while matches!(self.current_char(), Some(ch) if is_whitespace(ch)) {
                self.advance();
            }

            if self.current_char() == Some(';') {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        while !self.is_eof() && self.current_char() != Some('\n') {
            self.advance();
        }
        self.advance();
    }

    // ========================================================================
    // Values
    // ========================================================================

    /// Read the next value. `Ok(None)` signals that the input is exhausted.
    pub fn read_value(&mut self) -> Result<Option<Value>, ReadError> {
        let mut open_lists: Vec<Vec<Value>> = Vec::new();

        loop {
            self.skip_whitespace();

            let value = match self.current_char() {
                None if open_lists.is_empty() => return Ok(None),
                None => {
                    return Err(self.fail(ReadErrorKind::MissingCloseParen, self.position));
                }
                Some('(') => {
                    self.advance();
                    open_lists.push(Vec::new());
                    continue;
                }
                Some(')') => {
                    let Some(elements) = open_lists.pop() else {
                        return Err(self.fail(ReadErrorKind::MissingOpenParen, self.position));
                    };
                    self.advance();
                    Value::List(List::new(elements))
                }
                Some('"') => self.read_string()?,
                Some(_) => self.read_atom(),
            };

            match open_lists.last_mut() {
                Some(elements) => elements.push(value),
                None => return Ok(Some(value)),
            }
        }
    }

    /// Check that nothing but whitespace and comments remains.
    pub fn finish(&mut self) -> Result<(), ReadError> {
        self.skip_whitespace();
        if self.is_eof() {
            Ok(())
        } else {
            Err(self.fail(ReadErrorKind::TrailingContent, self.position))
        }
    }

    fn read_atom(&mut self) -> Value {
        let mut name = String::new();
        while let Some(ch) = self.current_char() {
            if is_delimiter(ch) {
                break;
            }
            name.push(ch);
            self.advance();
        }
        Value::symbol(&name)
    }

    // ========================================================================
    // String Parsing
    // ========================================================================

    fn read_string(&mut self) -> Result<Value, ReadError> {
        let start = self.position;
        self.advance();
        let mut content = String::new();

        loop {
            match self.current_char() {
                None => return Err(self.fail(ReadErrorKind::UnterminatedString, start)),
                Some('"') => {
                    self.advance();
                    return Ok(Value::string(content));
                }
                Some('\\') => {
                    self.advance();
                    let Some(escape) = self.current_char() else {
                        return Err(self.fail(ReadErrorKind::UnterminatedString, start));
                    };
                    self.advance();
                    self.read_escape(escape, &mut content);
                }
                Some(ch) => {
                    content.push(ch);
                    self.advance();
                }
            }
        }
    }

    fn read_escape(&mut self, escape: char, content: &mut String) {
        match escape {
            't' => content.push('\t'),
            'r' => content.push('\r'),
            'n' => content.push('\n'),
            'x' => self.read_hex_escape(escape, 2, content),
            'u' => self.read_hex_escape(escape, 4, content),
            'U' => self.read_hex_escape(escape, 6, content),
            // `\"`, `\\` and anything unknown stand for themselves
            other => content.push(other),
        }
    }

    /// Read up to `width` hex digits. A short run is emitted as the escape
    /// letter followed by the digits that were consumed.
    fn read_hex_escape(&mut self, letter: char, width: usize, content: &mut String) {
        let mut digits = String::with_capacity(width);
        let mut code = 0u32;

        while digits.len() < width {
            let Some(ch) = self.current_char() else { break };
            let Some(digit) = ch.to_digit(16) else { break };
            code = code * 16 + digit;
            digits.push(ch);
            self.advance();
        }

        if digits.len() < width {
            content.push(letter);
            content.push_str(&digits);
        } else {
            content.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
    }
}

impl Iterator for Reader {
    type Item = Result<Value, ReadError>;

    /// Yields values until the input is exhausted. After an error the
    /// reader is moved to the end, so iteration stops.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_value() {
            Ok(value) => value.map(Ok),
            Err(err) => {
                self.position = self.input.len();
                Some(Err(err))
            }
        }
    }
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

fn is_delimiter(ch: char) -> bool {
    is_whitespace(ch) || matches!(ch, '(' | ')' | '"' | ';')
}

// ============================================================================
// Entry Points
// ============================================================================

/// Read exactly one expression; anything but whitespace and comments after
/// it is an error.
pub fn read_str(input: &str) -> Result<Value, ReadError> {
    read_one(Reader::new(input))
}

/// Like [`read_str`], for raw bytes.
pub fn read_bytes(bytes: &[u8]) -> Result<Value, ReadError> {
    read_one(Reader::from_bytes(bytes))
}

/// Read every top-level expression in `input`.
pub fn read_all(input: &str) -> Result<Vec<Value>, ReadError> {
    Reader::new(input).collect()
}

fn read_one(mut reader: Reader) -> Result<Value, ReadError> {
    let value = reader
        .read_value()?
        .ok_or_else(|| reader.fail(ReadErrorKind::NoExpression, reader.position()))?;
    reader.finish()?;
    Ok(value)
}
