//! Structs and logic to parse classification documents.
//!
//! This module provides the [XmlParser] struct, which turns the element
//! nesting of a markup document into a tree via a [TreeBuilder].

use crate::model::attributes::Attributes;
use crate::model::class_tree_builder::ClassTreeBuilder;
use crate::model::tree_builder::TreeBuilder;
use crate::parser::byte_parser::{ByteParser, ConsumeMode};
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use crate::parser::utils::decode_entities;
use crate::xml::defs::*;

// =#========================================================================#=
// XML PARSER
// =#========================================================================#=
/// Parser (configuration) for a single classification document.
///
/// Generic over [TreeBuilder] (construction). Every element becomes a
/// vertex, children in document order; attribute values are entity-decoded
/// and kept verbatim otherwise. Text content, comments, processing
/// instructions, CDATA sections and a document type declaration are skipped.
///
/// # Construction
/// * [`new(tree_builder)`](Self::new) - generic constructor
/// * [`new_class_tree_defaults()`](Self::new_class_tree_defaults) - uses
///   [ClassTreeBuilder]
///
/// # Example
/// ```
/// use hgtree::xml::XmlParser;
/// use hgtree::parser::ByteParser;
///
/// let input = r#"<?xml version="1.0"?>
/// <Haplogroup Id="mt-MRCA" HG="mt-MRCA">
///   <Haplogroup Id="L0" HG="L0"/>
///   <Haplogroup Id="L1'2'3'4'5'6" HG="L1'2'3'4'5'6"/>
/// </Haplogroup>"#;
/// let mut byte_parser = ByteParser::for_str(input);
/// let tree = XmlParser::new_class_tree_defaults().parse(&mut byte_parser).unwrap();
///
/// assert_eq!(tree.num_vertices(), 3);
/// assert_eq!(tree.root().id(), Some("mt-MRCA"));
/// ```
pub struct XmlParser<T: TreeBuilder> {
    tree_builder: T,
    num_vertices: usize,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl<T: TreeBuilder> XmlParser<T> {
    /// Creates a new [XmlParser] with the given tree builder.
    pub fn new(tree_builder: T) -> Self {
        Self {
            tree_builder,
            num_vertices: DEFAULT_NUM_VERTICES_GUESS,
        }
    }

    /// Sets the expected number of vertices, used to pre-allocate the tree.
    pub fn with_num_vertices(mut self, num_vertices: usize) -> Self {
        self.num_vertices = num_vertices;
        self
    }

    /// Consumes the parser and returns the tree builder.
    pub fn into_tree_builder(self) -> T {
        self.tree_builder
    }
}

impl XmlParser<ClassTreeBuilder> {
    /// Creates a new [XmlParser] producing [ClassTree](crate::model::ClassTree)s.
    pub fn new_class_tree_defaults() -> Self {
        Self::new(ClassTreeBuilder::new())
    }
}

impl Default for XmlParser<ClassTreeBuilder> {
    fn default() -> Self {
        Self::new_class_tree_defaults()
    }
}

// ============================================================================
// Parsing (pub)
// ============================================================================
impl<T: TreeBuilder> XmlParser<T> {
    /// Parses a complete document from `parser` into a tree.
    ///
    /// # Errors
    /// Returns a [ParsingError] if the document is not well-formed:
    /// no root element, mismatched or unclosed tags, malformed or duplicate
    /// attributes, unknown entities, content after the root element,
    /// or invalid UTF-8.
    pub fn parse<S: ByteSource>(
        &mut self,
        parser: &mut ByteParser<S>,
    ) -> Result<T::Tree, ParsingError> {
        self.tree_builder.init_next(self.num_vertices);

        parser.consume_if_sequence(BYTE_ORDER_MARK);
        skip_prolog(parser)?;
        if parser.is_eof() {
            return Err(ParsingError::missing_root_element(parser));
        }
        if !parser.peek_is(b'<') {
            return Err(ParsingError::invalid_markup(
                parser,
                "Text before root element".to_string(),
            ));
        }

        let (tag, attributes, is_empty) = parse_start_tag(parser)?;
        let root = self.tree_builder.add_root(tag.clone(), attributes)?;

        // Open elements, innermost last
        let mut open = Vec::new();
        if !is_empty {
            open.push((tag, root));
        }

        while let Some((_, parent)) = open.last() {
            let parent = *parent;

            // Skip text content up to the next markup
            if parser.parse_until_any(b"<")?.is_none() {
                return Err(ParsingError::unexpected_eof(parser));
            }

            if parser.peek_is_sequence(COMMENT_START) {
                skip_comment(parser)?;
            } else if parser.peek_is_sequence(CDATA_START) {
                skip_past(parser, CDATA_END)?;
            } else if parser.peek_is_sequence(PROCESSING_INSTRUCTION_START) {
                skip_past(parser, PROCESSING_INSTRUCTION_END)?;
            } else if parser.consume_if_sequence(CLOSING_TAG_START) {
                let found = parser.parse_name(ELEMENT_NAME_DELIMITERS)?;
                parser.skip_whitespace();
                if !parser.consume_if(b'>') {
                    return Err(expect_or_eof(parser, "Expected '>' to end closing tag"));
                }
                if let Some((expected, _)) = open.pop() {
                    if expected != found {
                        return Err(ParsingError::mismatched_closing_tag(parser, expected, found));
                    }
                }
            } else if parser.peek_is_sequence(DECLARATION_START) {
                return Err(ParsingError::invalid_markup(
                    parser,
                    "Declaration inside element".to_string(),
                ));
            } else {
                let (tag, attributes, is_empty) = parse_start_tag(parser)?;
                let child = self.tree_builder.add_child(parent, tag.clone(), attributes)?;
                if !is_empty {
                    open.push((tag, child));
                }
            }
        }

        skip_prolog(parser)?;
        if !parser.is_eof() {
            return Err(ParsingError::trailing_content(parser));
        }

        self.tree_builder
            .finish_tree()
            .ok_or_else(|| ParsingError::without_context(ParsingErrorType::BuilderNotInitialized))
    }
}

// ============================================================================
// Helpers (private)
// ============================================================================
/// Skips whitespace, comments, processing instructions, and a document type
/// declaration, i.e. everything allowed before and after the root element.
fn skip_prolog<S: ByteSource>(parser: &mut ByteParser<S>) -> Result<(), ParsingError> {
    loop {
        parser.skip_whitespace();

        if parser.peek_is_sequence(COMMENT_START) {
            skip_comment(parser)?;
        } else if parser.peek_is_sequence(PROCESSING_INSTRUCTION_START) {
            skip_past(parser, PROCESSING_INSTRUCTION_END)?;
        } else if parser.peek_is_sequence(DECLARATION_START) {
            skip_declaration(parser)?;
        } else {
            return Ok(());
        }
    }
}

/// Skips a `<!-- ... -->` comment.
fn skip_comment<S: ByteSource>(parser: &mut ByteParser<S>) -> Result<(), ParsingError> {
    parser.consume_if_sequence(COMMENT_START);
    if !parser.consume_until_sequence(COMMENT_END, ConsumeMode::Inclusive) {
        return Err(ParsingError::unclosed_comment(parser));
    }
    Ok(())
}

/// Skips everything up to and including `end`.
fn skip_past<S: ByteSource>(parser: &mut ByteParser<S>, end: &[u8]) -> Result<(), ParsingError> {
    if !parser.consume_until_sequence(end, ConsumeMode::Inclusive) {
        return Err(ParsingError::unexpected_eof(parser));
    }
    Ok(())
}

/// Skips a `<!DOCTYPE ...>` declaration, including an internal subset in brackets.
fn skip_declaration<S: ByteSource>(parser: &mut ByteParser<S>) -> Result<(), ParsingError> {
    parser.consume_if_sequence(DECLARATION_START);
    let mut bracket_depth = 0usize;
    while let Some(b) = parser.next_byte() {
        match b {
            b'[' => bracket_depth += 1,
            b']' => bracket_depth = bracket_depth.saturating_sub(1),
            b'>' if bracket_depth == 0 => return Ok(()),
            _ => {}
        }
    }
    Err(ParsingError::unexpected_eof(parser))
}

/// Parses a start tag `<name attr="value" ...>` or `<name ... />`.
///
/// # Returns
/// Tuple of element name, attributes, and whether the element is empty (`/>`).
fn parse_start_tag<S: ByteSource>(
    parser: &mut ByteParser<S>,
) -> Result<(String, Attributes, bool), ParsingError> {
    parser.consume_if(b'<');
    let tag = parser.parse_name(ELEMENT_NAME_DELIMITERS)?;
    if tag.is_empty() {
        return Err(expect_or_eof(parser, "Missing element name"));
    }

    let mut attributes = Attributes::new();
    loop {
        let separated = parser.peek_is_whitespace();
        parser.skip_whitespace();

        if parser.consume_if_sequence(EMPTY_ELEMENT_END) {
            return Ok((tag, attributes, true));
        }
        if parser.consume_if(b'>') {
            return Ok((tag, attributes, false));
        }
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }
        if !separated {
            return Err(ParsingError::invalid_markup(
                parser,
                format!("Expected whitespace before attribute in <{tag}>"),
            ));
        }

        let (name, value) = parse_attribute(parser)?;
        if attributes.contains(&name) {
            return Err(ParsingError::duplicate_attribute(parser, name));
        }
        attributes.insert(name, value);
    }
}

/// Parses a single `name="value"` (or single-quoted) attribute.
fn parse_attribute<S: ByteSource>(
    parser: &mut ByteParser<S>,
) -> Result<(String, String), ParsingError> {
    let name = parser.parse_name(ATTRIBUTE_NAME_DELIMITERS)?;
    if name.is_empty() {
        return Err(ParsingError::invalid_markup(
            parser,
            "Missing attribute name".to_string(),
        ));
    }

    parser.skip_whitespace();
    if !parser.consume_if(b'=') {
        return Err(expect_or_eof(parser, &format!("Expected '=' after attribute '{name}'")));
    }
    parser.skip_whitespace();

    let quote = match parser.peek() {
        Some(q @ (b'"' | b'\'')) => q,
        Some(_) => {
            return Err(ParsingError::invalid_markup(
                parser,
                format!("Value of attribute '{name}' must be quoted"),
            ));
        }
        None => return Err(ParsingError::unexpected_eof(parser)),
    };
    parser.next_byte();

    let Some(raw) = parser.parse_until_any(&[quote, b'<'])? else {
        return Err(ParsingError::unexpected_eof(parser));
    };
    if !parser.consume_if(quote) {
        return Err(ParsingError::invalid_markup(
            parser,
            format!("'<' in value of attribute '{name}'"),
        ));
    }

    // Attribute value normalization: line breaks (`\r\n` counts as one) and
    // tabs become single spaces
    let normalized = raw.replace("\r\n", "\n").replace(['\t', '\n', '\r'], " ");
    let value =
        decode_entities(&normalized).map_err(|entity| ParsingError::unknown_entity(parser, entity))?;

    Ok((name, value))
}

/// Returns an [UnexpectedEOF](ParsingErrorType::UnexpectedEOF) error at
/// the end of input, else an [InvalidMarkup](ParsingErrorType::InvalidMarkup)
/// error with `msg`.
fn expect_or_eof<S: ByteSource>(parser: &ByteParser<S>, msg: &str) -> ParsingError {
    if parser.is_eof() {
        ParsingError::unexpected_eof(parser)
    } else {
        ParsingError::invalid_markup(parser, msg.to_string())
    }
}
