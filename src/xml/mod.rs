//! Parser for classification trees stored as nested markup elements.
//!
//! A classification document encodes the hierarchy by element nesting,
//! with each element describing one group:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <Haplogroup Id="mt-MRCA" HG="mt-MRCA">
//!   <Haplogroup Id="L0" HG="L0">
//!     <Haplogroup Id="L0a" HG="L0a"/>
//!   </Haplogroup>
//!   <Haplogroup Id="L1'2'3'4'5'6" HG="L1'2'3'4'5'6"/>
//! </Haplogroup>
//! ```
//!
//! The identifier is read from the `Id` attribute and the secondary label
//! from `HG`; all other attributes are kept as well.
//!
//! # Quick API
//! * [`parse_file`] - parses a file, returns a [`ClassTree`]
//! * [`parse_str`] - parses a string, returns a [`ClassTree`]
//!
//! # Full API
//! Configure an [`XmlParser`] with your own
//! [`TreeBuilder`](crate::model::TreeBuilder) and provide a [`ByteParser`].

mod defs;
mod parser;

pub use self::parser::XmlParser;

use crate::model::ClassTree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::InMemoryByteSource;
use log::debug;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a classification document file into a [`ClassTree`].
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [`ClassTree`] - Tree isomorphic to the element nesting
/// * [`ParsingError`] - If file reading fails or the document is not well-formed
///
/// # Example
/// ```ignore
/// use hgtree::xml::parse_file;
///
/// let tree = parse_file("inputfiles/mitoTree_v1.0_phm.xml")?;
/// println!("Parsed {} haplogroups", tree.num_vertices());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ClassTree, ParsingError> {
    let path = path.as_ref();
    let source = InMemoryByteSource::from_file(path)?;
    let mut byte_parser = ByteParser::new(source);
    let tree = XmlParser::new_class_tree_defaults().parse(&mut byte_parser)?;

    debug!(
        "Parsed {} with {} vertices ({} leaves, depth {})",
        path.display(),
        tree.num_vertices(),
        tree.num_leaves(),
        tree.depth()
    );

    Ok(tree)
}

/// Parses a classification document given as string into a [`ClassTree`].
///
/// # Example
/// ```
/// use hgtree::xml::parse_str;
///
/// let tree = parse_str(r#"<Haplogroup Id="H" HG="H"><Haplogroup Id="H1" HG="H1"/></Haplogroup>"#).unwrap();
/// assert_eq!(tree.num_leaves(), 1);
/// ```
pub fn parse_str<S: AsRef<str>>(xml: S) -> Result<ClassTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(xml.as_ref());
    XmlParser::new_class_tree_defaults().parse(&mut byte_parser)
}
