//! Hgtree is a library to process haplogroup classification trees.
//!
//! It reads a classification tree stored as nested markup elements and
//! derives the data files of an interactive tree browser from it.
//! Core functionality provided:
//! - Markup: Parse an element tree (an XML subset) into an attributed,
//!   ordered n-ary tree. Every element becomes a vertex, every attribute
//!   is kept. See [crate::xml].
//! - Tree model: [ClassTree] uses the arena pattern, so no direct vertex
//!   references are stored, only vertex indices. You can provide your own
//!   [TreeBuilder](crate::model::TreeBuilder) implementation instead.
//!   See [crate::model].
//! - Pruning: Reduce a tree to a set of anchor vertices (superhaplogroups)
//!   and their connection to the root, optionally promoting anchors past
//!   single-child connective vertices. See [Pruner].
//! - Output:
//!   - Newick strings with one label per vertex, see [crate::newick]
//!   - nested JSON objects enriched with colors, anchor flags and
//!     profiles, see [crate::json]
//! - Lookup tables and the full batch run, see [crate::lookup] and
//!   [crate::pipeline].
//!
//! # Usage patterns
//! 1. Quick functions with default settings, listed below.
//! 2. Configure [XmlParser](crate::xml::XmlParser), [Pruner] and
//!    [JsonProjection](crate::json::JsonProjection) yourself.
//!
//! ## Example
//! ```
//! use hgtree::lookup::AnchorSet;
//! use hgtree::{Pruner, parse_xml_str, to_newick};
//!
//! let tree = parse_xml_str(
//!     r#"<Node Id="root"><Node Id="A"><Node Id="B"/><Node Id="C"/></Node><Node Id="D"/></Node>"#,
//! ).unwrap();
//! assert_eq!(to_newick(&tree), "((B,C)A,D)root;");
//!
//! let anchors: AnchorSet = ["root", "D"].into_iter().collect();
//! let pruned = Pruner::new(&anchors).with_promotion().prune(&tree);
//! assert_eq!(to_newick(&pruned), "(D)root;");
//! ```

pub mod json;
pub mod lookup;
pub mod model;
pub mod newick;
pub mod parser;
pub mod pipeline;
pub mod xml;

pub use crate::model::ClassTree;
pub use crate::model::Pruner;
pub use crate::newick::to_newick;

use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Parses a classification document file using default settings,
/// returning a [ClassTree].
///
/// See [`xml::parse_file`] for full documentation.
pub fn parse_xml_file<P: AsRef<Path>>(path: P) -> Result<ClassTree, ParsingError> {
    xml::parse_file(path)
}

/// Parses a classification document string using default settings,
/// returning a [ClassTree].
///
/// See [`xml::parse_str`] for full documentation.
pub fn parse_xml_str<S: AsRef<str>>(xml: S) -> Result<ClassTree, ParsingError> {
    xml::parse_str(xml)
}
