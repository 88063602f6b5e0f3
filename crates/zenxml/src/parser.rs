//! XML decoding into document nodes
//!
//! The decoder maps each element onto a [`Node`]: the element name becomes
//! the tag, the XML attribute literally named `name` becomes the node's
//! attribute, and the element's direct text (between the open tag and the
//! first child) is kept verbatim, whitespace included. All other attributes
//! are outside the model; by default they are dropped, which is a documented
//! information-loss boundary of the legacy format (see [`ExtraAttributes`]).

use indexmap::IndexMap;

use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind, Result, Span};
use crate::node::Node;

/// Policy for attributes other than `name`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtraAttributes {
    /// Drop them silently (legacy behavior)
    #[default]
    Drop,
    /// Fail the parse, naming the offending attribute
    Reject,
}

/// Configuration for the decoder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// What to do with attributes the model cannot represent
    pub extra_attributes: ExtraAttributes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            extra_attributes: ExtraAttributes::Drop,
        }
    }
}

impl Config {
    /// Create a config with unlimited depth
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            extra_attributes: ExtraAttributes::Drop,
        }
    }
}

/// XML decoder producing a [`Node`] tree
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    config: Config,
}

impl<'a> Parser<'a> {
    /// Create a new parser with default configuration
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    /// Create a new parser with custom configuration
    pub const fn with_config(input: &'a [u8], config: Config) -> Self {
        Self {
            cursor: Cursor::new(input),
            config,
        }
    }

    /// Parse a single-root XML document
    pub fn parse(&mut self) -> Result<Node> {
        self.cursor.skip_whitespace();
        let root = self.parse_element(0)?;
        self.cursor.skip_whitespace();

        if !self.cursor.is_eof() {
            return Err(self.error_here(ErrorKind::TrailingContent));
        }

        Ok(root)
    }

    fn parse_element(&mut self, depth: u16) -> Result<Node> {
        if self.config.max_depth != 0 && depth >= self.config.max_depth {
            return Err(self.error_here(ErrorKind::MaxDepthExceeded {
                max: self.config.max_depth,
            }));
        }

        self.expect_byte(b'<')?;

        // Prolog items (declaration, doctype, comments) may precede the tag.
        loop {
            match self.cursor.current() {
                Some(b'?') => {
                    self.skip_processing_instruction()?;
                    self.cursor.skip_whitespace();
                    self.expect_byte(b'<')?;
                }
                Some(b'!') => {
                    self.skip_declaration_or_comment()?;
                    self.cursor.skip_whitespace();
                    self.expect_byte(b'<')?;
                }
                Some(b'/') => return Err(self.error_msg("unexpected closing tag")),
                _ => break,
            }
        }

        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;
        let mut node = Node::new(name.as_str())?;
        node.set_attribute(self.select_name_attribute(attributes)?);

        if self.cursor.current() == Some(b'/') {
            self.cursor.advance();
            self.expect_byte(b'>')?;
            return Ok(node);
        }

        self.expect_byte(b'>')?;

        loop {
            match self.cursor.current() {
                None => return Err(self.error_here(ErrorKind::UnterminatedElement)),
                Some(b'<') => match self.cursor.peek(1) {
                    Some(b'/') => {
                        self.cursor.advance_by(2);
                        let close = self.parse_name()?;
                        if close != name {
                            return Err(self.error_here(ErrorKind::MismatchedTag {
                                open: name,
                                close,
                            }));
                        }
                        self.cursor.skip_whitespace();
                        self.expect_byte(b'>')?;
                        break;
                    }
                    Some(b'?') => {
                        self.cursor.advance();
                        self.skip_processing_instruction()?;
                    }
                    Some(b'!') => {
                        self.cursor.advance();
                        self.skip_declaration_or_comment()?;
                    }
                    _ => {
                        let child = self.parse_element(depth.saturating_add(1))?;
                        node.push_child(child);
                    }
                },
                Some(_) => {
                    // Only the direct text before the first child is modeled;
                    // later runs are inter-element whitespace in legacy files.
                    let run = self.take_text()?;
                    if !node.has_children() && node.text().is_none() && !run.is_empty() {
                        node.set_text(Some(run));
                    }
                }
            }
        }

        Ok(node)
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/') | Some(b'>') => break,
                Some(_) => {}
                None => return Err(self.error_msg("unexpected end of input")),
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(self.error_here(ErrorKind::DuplicateAttribute { name }));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn select_name_attribute(
        &self,
        mut attrs: IndexMap<String, String>,
    ) -> Result<Option<String>> {
        let named = attrs.shift_remove("name");
        if self.config.extra_attributes == ExtraAttributes::Reject {
            if let Some((key, _)) = attrs.first() {
                return Err(self.error_here(ErrorKind::UnexpectedAttribute {
                    name: key.clone(),
                }));
            }
        }
        Ok(named)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b'"') => b'"',
            Some(b'\'') => b'\'',
            _ => return Err(self.error_msg("expected quoted attribute value")),
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = bytes_to_string(raw)?;
                return decode_entities(&text);
            }
            self.cursor.advance();
        }

        Err(self.error_msg("unterminated attribute value"))
    }

    fn take_text(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let text = bytes_to_string(raw)?;
        decode_entities(&text)
    }

    fn parse_name(&mut self) -> Result<String> {
        let start = self.cursor.pos();

        let Some(first) = self.cursor.current() else {
            return Err(self.error_msg("expected name"));
        };
        if !is_name_start(first) {
            return Err(self.error_here(ErrorKind::InvalidToken));
        }

        self.cursor.advance();
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let raw = self.cursor.slice_from(start);
        bytes_to_string(raw)
    }

    fn skip_declaration_or_comment(&mut self) -> Result<()> {
        // cursor currently at '!'
        if self.cursor.peek(1) == Some(b'-') && self.cursor.peek(2) == Some(b'-') {
            self.cursor.advance_by(3);
            self.skip_until(b"-->")?;
            return Ok(());
        }

        if self.cursor.peek(1) == Some(b'[')
            && self.cursor.peek(2) == Some(b'C')
            && self.cursor.peek(3) == Some(b'D')
        {
            self.cursor.advance_by(2);
            self.skip_until(b"]]>")?;
            return Ok(());
        }

        self.skip_until(b">")
    }

    fn skip_processing_instruction(&mut self) -> Result<()> {
        // cursor currently at '?'
        self.cursor.advance();
        self.skip_until(b"?>")
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        while self.cursor.current().is_some() {
            if self.cursor.peek_bytes(pattern.len()) == Some(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error_msg("unterminated markup"))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.consume(expected) {
            Ok(())
        } else {
            let found = match self.cursor.current() {
                Some(b) => format!("'{}'", char::from(b)),
                None => "end of input".to_string(),
            };
            Err(self.error_here(ErrorKind::Expected {
                expected: format!("'{}'", char::from(expected)),
                found,
            }))
        }
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        let pos = self.cursor.position();
        Error::new(kind, Span::new(pos, pos))
    }

    fn error_msg(&self, message: &str) -> Error {
        let pos = self.cursor.position();
        Error::with_message(
            ErrorKind::InvalidToken,
            Span::new(pos, pos),
            message.to_string(),
        )
    }
}

fn bytes_to_string(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(|s| s.to_string())
        .map_err(|_| Error::new(ErrorKind::InvalidUtf8, Span::empty()))
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':')
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_entities(input: &str) -> Result<String> {
    if !input.contains('&') {
        return Ok(input.to_string());
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '&' {
            result.push(ch);
            continue;
        }

        let mut entity = String::new();
        let mut terminated = false;
        for next in chars.by_ref() {
            if next == ';' {
                terminated = true;
                break;
            }
            entity.push(next);
        }
        if !terminated {
            return Err(Error::new(ErrorKind::InvalidEntity, Span::empty()));
        }

        let decoded = match entity.as_str() {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(&entity),
        };

        match decoded {
            Some(ch) => result.push(ch),
            None => return Err(Error::new(ErrorKind::InvalidEntity, Span::empty())),
        }
    }

    Ok(result)
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}
