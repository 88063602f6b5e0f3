//! Byte-level input navigation for the XML decoder
//!
//! The decoder works on raw bytes and only converts to strings at the point
//! a name, attribute value or text run is complete. The cursor keeps the
//! line/column bookkeeping so parse errors can point into the source.

use crate::error::Pos;

/// Cursor over the input bytes, tracking line and column
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// The byte under the cursor, if any
    pub const fn current(&self) -> Option<u8> {
        if self.pos < self.input.len() {
            Some(self.input[self.pos])
        } else {
            None
        }
    }

    /// Look `ahead` bytes past the cursor without moving it
    pub const fn peek(&self, ahead: usize) -> Option<u8> {
        let idx = self.pos.saturating_add(ahead);
        if idx < self.input.len() {
            Some(self.input[idx])
        } else {
            None
        }
    }

    /// The next `len` bytes, when that many remain
    pub fn peek_bytes(&self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.saturating_add(len);
        if end <= self.input.len() {
            Some(&self.input[self.pos..end])
        } else {
            None
        }
    }

    /// Move past the current byte, updating line/column
    pub fn advance(&mut self) {
        if let Some(b) = self.current() {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    /// Move past the next `n` bytes
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Skip over XML whitespace (space, tab, CR, LF)
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.current() {
            if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Move past the current byte only when it matches `expected`
    pub fn consume(&mut self, expected: u8) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Position for error reporting
    pub const fn position(&self) -> Pos {
        Pos::new(self.pos, self.line, self.col)
    }

    /// Whether the input is exhausted
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Byte offset into the input
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// The bytes between a saved offset and the cursor
    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        &self.input[start..self.pos]
    }
}
