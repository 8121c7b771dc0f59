//! Newick writer for classification trees.
//!
//! Renders a [`ClassTree`](crate::model::ClassTree) as a fully labeled
//! parenthesized string. Unlike a classic phylogeny, every vertex of a
//! classification carries an identifier, so internal vertices are labeled
//! too, and there are no branch lengths.
//!
//! # Format
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' label`
//! * `leaf ::= label`
//!
//! Children appear in tree order. A vertex without identifier is labeled
//! [`MISSING_LABEL`].
//!
//! # API
//! * [`to_newick`] - Newick string with identifiers as is
//! * [`to_newick_with_style`] - Newick string with a chosen [`NewickStyle`]
//! * [`write_newick_file`] - write the Newick string to a file

pub mod writer;

pub use self::writer::{
    MISSING_LABEL, NewickStyle, to_newick, to_newick_with_style, write_newick_file,
};
