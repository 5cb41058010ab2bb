//! Byte cursor over expression text.
//!
//! The cursor advances byte-by-byte. `current()` returns `0x00` at EOF;
//! expression text never legitimately contains NUL, and an interior NUL is
//! simply an unexpected character for the grammar.
//!
//! All slicing happens at ASCII bytes or at EOF, so slices are always valid
//! UTF-8 even when identifiers or string literals contain multi-byte
//! characters.

/// Whether `b` may appear in an identifier (object, automatism or function
/// name). Bytes of multi-byte UTF-8 sequences are accepted so that
/// non-ASCII object names work.
#[inline]
pub(crate) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Whether `text` is empty or only ASCII whitespace.
#[inline]
pub(crate) fn is_blank(text: &str) -> bool {
    text.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Whether `b` may start an identifier.
#[inline]
pub(crate) fn is_ident_start(b: u8) -> bool {
    is_ident_byte(b) && !b.is_ascii_digit()
}

/// Cursor over the bytes of one expression.
///
/// [`Copy`], so a snapshot is just a copy.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    /// Byte at the current position, `0x00` at EOF.
    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.src.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    /// Byte one position ahead, `0x00` past EOF.
    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.src.as_bytes().get(self.pos + 1).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Length of the whole text.
    #[inline]
    pub(crate) fn end(&self) -> usize {
        self.src.len()
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// The character at the current position, for diagnostics.
    pub(crate) fn current_char(&self) -> Option<char> {
        self.src.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.advance_n(1);
    }

    /// Advance `n` bytes, stopping at EOF.
    #[inline]
    pub(crate) fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.src.len());
    }

    /// Text from `start` up to the current position.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.src[start..self.pos]
    }

    /// Text between two positions.
    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.src[start..end]
    }

    /// Advance while `pred` holds for the current byte. Never passes EOF.
    #[inline]
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Consume a run of ASCII whitespace, returning it (possibly empty).
    pub(crate) fn eat_whitespace(&mut self) -> &'a str {
        let start = self.pos;
        self.eat_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
        self.slice_from(start)
    }

    /// Consume an identifier if one starts here.
    pub(crate) fn eat_ident(&mut self) -> Option<&'a str> {
        if self.is_eof() || !is_ident_start(self.current()) {
            return None;
        }
        let start = self.pos;
        self.eat_while(is_ident_byte);
        Some(self.slice_from(start))
    }

    /// Consume a number (`12`, `1.5`, `.5`, `3.`) if one starts here.
    pub(crate) fn eat_number(&mut self) -> Option<&'a str> {
        let starts_number = self.current().is_ascii_digit()
            || (self.current() == b'.' && self.peek().is_ascii_digit());
        if !starts_number {
            return None;
        }
        let start = self.pos;
        self.eat_while(|b| b.is_ascii_digit());
        if self.current() == b'.' {
            self.advance();
            self.eat_while(|b| b.is_ascii_digit());
        }
        Some(self.slice_from(start))
    }

    /// Advance past ordinary string content to the next `"` or `\`.
    /// Returns the byte found, or 0 for EOF.
    pub(crate) fn skip_to_string_delim(&mut self) -> u8 {
        let remaining = &self.src.as_bytes()[self.pos..];
        if let Some(offset) = memchr::memchr2(b'"', b'\\', remaining) {
            self.pos += offset;
            self.current()
        } else {
            self.pos = self.src.len();
            0
        }
    }

    /// Consume a double-quoted string literal starting at the current `"`.
    ///
    /// Returns `false` if the literal is unterminated (cursor left at EOF).
    /// Escapes are `\"` and `\\`; any other escaped byte is kept verbatim.
    pub(crate) fn eat_string_literal(&mut self) -> bool {
        debug_assert_eq!(self.current(), b'"');
        self.advance();
        loop {
            match self.skip_to_string_delim() {
                b'"' => {
                    self.advance();
                    return true;
                }
                b'\\' => self.advance_n(2),
                _ => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests;
