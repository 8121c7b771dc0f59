//! Low-level byte-by-byte parser for markup text.
//!
//! This module provides [ByteParser] for parsing text-based formats with
//! support for peeking, consuming, pattern matching, and name/value scanning.
//! Used as the foundation of the XML ingestion in [crate::xml].

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;

/// Whitespace bytes as defined by XML: space, tab, newline, carriage return.
const WHITESPACE: &[u8] = b" \t\n\r";

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser with support for peeking, consuming, and pattern matching.
///
/// All matching is exact (case-sensitive), since markup names are.
/// Multi-byte UTF-8 sequences are only ever copied as a whole, through
/// [ByteParser::parse_until_any] and [ByteParser::parse_name], and validated there.
///
/// # Example
/// ```
/// use hgtree::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("<?xml version=\"1.0\"?>\n<Haplogroup Id=\"L0\"/>");
/// assert!(parser.consume_if_sequence(b"<?"));
/// assert!(parser.consume_until_sequence(b"?>", ConsumeMode::Inclusive));
/// parser.skip_whitespace();
/// assert_eq!(parser.peek(), Some(b'<'));
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new `ByteParser` from a byte slice by copying it into a Vec.
    pub fn for_bytes(input: &[u8]) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.to_vec()))
    }

    /// Creates a new `ByteParser` from a string by copying it into a Vec.
    pub fn for_str(input: &str) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.as_bytes().to_vec()))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space (' '), tab ('\t'), newline ('\n'), and carriage return ('\r').
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if WHITESPACE.contains(&b) {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Returns `true` if the current byte is whitespace.
    pub fn peek_is_whitespace(&self) -> bool {
        self.peek().is_some_and(|b| WHITESPACE.contains(&b))
    }

    /// Checks if the current byte equals `ch`.
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Checks if the following bytes equal the given byte sequence.
    ///
    /// This is a peek operation - the parser position is not changed.
    #[inline]
    pub fn peek_is_sequence(&self, sequence: &[u8]) -> bool {
        self.source.peek_slice(sequence.len()) == sequence
    }

    /// Consumes the current byte if it equals `ch`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes the next bytes if they equal the given byte sequence.
    ///
    /// # Returns
    /// `true` if the sequence was matched and consumed, `false` otherwise
    pub fn consume_if_sequence(&mut self, sequence: &[u8]) -> bool {
        if !self.peek_is_sequence(sequence) {
            return false;
        }

        for _ in 0..sequence.len() {
            self.next_byte();
        }

        true
    }

    /// Consumes bytes until the target byte is found.
    ///
    /// # Arguments
    /// * `target` - The byte to search for
    /// * `mode` - Whether to consume the target byte (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8, mode: ConsumeMode) -> bool {
        while let Some(b) = self.peek() {
            if b == target {
                if mode == ConsumeMode::Inclusive {
                    self.next_byte();
                }
                return true;
            }
            self.next_byte();
        }
        false
    }

    /// Consumes bytes until the next bytes equal the given byte sequence.
    ///
    /// # Arguments
    /// * `sequence` - The byte sequence to search for
    /// * `mode` - Whether to consume the sequence (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the sequence was found, `false` if EOF was reached first
    pub fn consume_until_sequence(&mut self, sequence: &[u8], mode: ConsumeMode) -> bool {
        loop {
            if self.is_eof() {
                return false;
            }

            if self.peek_is_sequence(sequence) {
                if mode == ConsumeMode::Inclusive {
                    for _ in 0..sequence.len() {
                        self.next_byte();
                    }
                }
                return true;
            }

            self.next_byte();
        }
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current parser position in the input.
    ///
    /// Useful for error messages and tracking parser state.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Sets the position in the byte stream.
    pub fn set_position(&mut self, pos: usize) {
        self.source.set_position(pos);
    }

    /// Returns a slice of the input from a start position to the current position,
    /// or an empty slice if not available.
    pub fn slice_from(&self, start: usize) -> &[u8] {
        self.source.slice_from(start).unwrap_or(&[])
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(self.source.peek_slice(k)).into_owned()
    }

    /// Parses a name (element or attribute name) up to the next whitespace
    /// or any of the given delimiters.
    ///
    /// # Returns
    /// The parsed name, possibly empty if the current byte already is a delimiter.
    ///
    /// # Errors
    /// Returns an error if the name is not valid UTF-8.
    pub fn parse_name(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        let start = self.position();
        while let Some(b) = self.peek() {
            if delimiters.contains(&b) || WHITESPACE.contains(&b) {
                break;
            }
            self.next_byte();
        }
        self.utf8_from(start)
    }

    /// Parses raw text until any of the given delimiters, leaving the delimiter
    /// unconsumed.
    ///
    /// # Returns
    /// `Some(text)` if a delimiter was found, `None` if EOF was reached first.
    ///
    /// # Errors
    /// Returns an error if the text is not valid UTF-8.
    pub fn parse_until_any(&mut self, delimiters: &[u8]) -> Result<Option<String>, ParsingError> {
        let start = self.position();
        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                return self.utf8_from(start).map(Some);
            }
            self.next_byte();
        }
        Ok(None)
    }

    /// Copies the bytes from `start` up to the current position into a String.
    fn utf8_from(&self, start: usize) -> Result<String, ParsingError> {
        match std::str::from_utf8(self.slice_from(start)) {
            Ok(text) => Ok(text.to_string()),
            Err(_) => Err(ParsingError::invalid_encoding(self)),
        }
    }
}

/// Specifies whether to consume or leave the target when using `consume_until` methods.
///
/// # Examples
/// ```
/// use hgtree::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("<!-- L3 root --><Haplogroup/>");
///
/// // Inclusive: consume up to and including the comment end
/// parser.consume_until_sequence(b"-->", ConsumeMode::Inclusive);
/// assert_eq!(parser.peek(), Some(b'<'));
///
/// let mut parser = ByteParser::for_str("Id=\"H2a2a1\"");
///
/// // Exclusive: consume up to but not including the opening quote
/// parser.consume_until(b'"', ConsumeMode::Exclusive);
/// assert_eq!(parser.peek(), Some(b'"'));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConsumeMode {
    /// Consume the target byte/sequence along with everything before it.
    Inclusive,

    /// Stop before the target byte/sequence without consuming it.
    Exclusive,
}
