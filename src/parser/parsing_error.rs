//! Error types for the markup parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while ingesting a classification document.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::error::Error;
use std::fmt;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while parsing a classification document.
#[derive(PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    IoError(String),
    UnexpectedEOF,
    InvalidEncoding,
    MissingRootElement,
    TrailingContent,
    UnclosedComment,
    MismatchedClosingTag { expected: String, found: String },
    DuplicateAttribute(String),
    UnknownEntity(String),
    InvalidMarkup(String),
    BuilderNotInitialized,
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and following bytes).
#[derive(Debug)]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnexpectedEOF
    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    /// Convenience constructor for InvalidEncoding
    pub fn invalid_encoding<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::InvalidEncoding, parser)
    }

    /// Convenience constructor for MissingRootElement
    pub fn missing_root_element<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::MissingRootElement, parser)
    }

    /// Convenience constructor for TrailingContent
    pub fn trailing_content<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::TrailingContent, parser)
    }

    /// Convenience constructor for UnclosedComment
    pub fn unclosed_comment<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedComment, parser)
    }

    /// Convenience constructor for MismatchedClosingTag
    pub fn mismatched_closing_tag<S: ByteSource>(
        parser: &ByteParser<S>,
        expected: String,
        found: String,
    ) -> Self {
        Self::from_parser(ParsingErrorType::MismatchedClosingTag { expected, found }, parser)
    }

    /// Convenience constructor for DuplicateAttribute
    pub fn duplicate_attribute<S: ByteSource>(parser: &ByteParser<S>, name: String) -> Self {
        Self::from_parser(ParsingErrorType::DuplicateAttribute(name), parser)
    }

    /// Convenience constructor for UnknownEntity
    pub fn unknown_entity<S: ByteSource>(parser: &ByteParser<S>, entity: String) -> Self {
        Self::from_parser(ParsingErrorType::UnknownEntity(entity), parser)
    }

    /// Convenience constructor for InvalidMarkup
    pub fn invalid_markup<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidMarkup(msg), parser)
    }

    /// Create a ParsingError without parser context (for builder errors)
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            position: 0,
            context: String::new(),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ParsingErrorType::IoError(msg) => write!(f, "IO error - {msg}")?,
            ParsingErrorType::UnexpectedEOF => write!(f, "Unexpected end of file")?,
            ParsingErrorType::InvalidEncoding => write!(f, "Invalid UTF-8")?,
            ParsingErrorType::MissingRootElement => write!(f, "Document has no root element")?,
            ParsingErrorType::TrailingContent => {
                write!(f, "Unexpected content after root element")?
            }
            ParsingErrorType::UnclosedComment => write!(f, "Unclosed comment")?,
            ParsingErrorType::MismatchedClosingTag { expected, found } => {
                write!(f, "Closing tag </{found}> does not match <{expected}>")?
            }
            ParsingErrorType::DuplicateAttribute(name) => {
                write!(f, "Duplicate attribute '{name}'")?
            }
            ParsingErrorType::UnknownEntity(entity) => write!(f, "Unknown entity &{entity};")?,
            ParsingErrorType::InvalidMarkup(msg) => write!(f, "Invalid markup - {msg}")?,
            ParsingErrorType::BuilderNotInitialized => write!(f, "Builder not initialized")?,
        }

        write!(f, " at position {}", self.position)?;

        if !self.context.is_empty() {
            write!(
                f,
                "\n  Context (next {} bytes): {}",
                self.context.len(),
                self.context
            )?;
        }

        Ok(())
    }
}

impl Error for ParsingError {}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError {
            kind: ParsingErrorType::IoError(err.to_string()),
            position: 0,
            context: String::new(),
        }
    }
}
