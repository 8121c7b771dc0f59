//! Trait for constructing classification trees during parsing.
//!
//! The [`TreeBuilder`] trait decouples parsers from concrete tree
//! representations. The markup parser calls builder methods as it reads
//! opening tags, and the builder assembles whatever tree structure it wants.
//!
//! # Built-in implementation
//! * [`ClassTreeBuilder`](crate::model::ClassTreeBuilder) - Builds a
//!   [`ClassTree`](crate::model::ClassTree)
//!
//! # Builder lifecycle
//! A builder can construct multiple trees sequentially:
//!
//! ```text
//! Empty ──→ init_next() ──→ Building ──→ add_root/add_child ──→ finish_tree() ──→ Empty
//!   ↑                                                                              │
//!   └──────────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::model::attributes::Attributes;
use crate::parser::ParsingError;

// =#========================================================================#=
// TREE BUILDER (trait)
// =#========================================================================#=
/// Abstraction for constructing trees during parsing.
///
/// The parser drives the lifecycle:
///
/// 1. [`init_next`](Self::init_next) -> prepare for a new tree
/// 2. [`add_root`](Self::add_root) once, then [`add_child`](Self::add_child)
///    top-down in document order -> build structure
/// 3. [`finish_tree`](Self::finish_tree) -> finalize and return the tree
///
/// Children of the same parent are added in document order, and
/// implementations must preserve that order.
pub trait TreeBuilder {
    /// The type used to identify vertices during construction.
    type VertexIdx: Copy;

    /// The tree type produced by this builder.
    type Tree;

    /// Prepares the builder for constructing a new tree.
    ///
    /// `capacity` is a hint for the expected number of vertices.
    fn init_next(&mut self, capacity: usize);

    /// Adds the root vertex.
    ///
    /// # Errors
    /// Returns an error if [`init_next`](Self::init_next) was not called.
    fn add_root(
        &mut self,
        tag: String,
        attributes: Attributes,
    ) -> Result<Self::VertexIdx, ParsingError>;

    /// Adds a vertex as the last child of `parent`.
    ///
    /// # Errors
    /// Returns an error if [`init_next`](Self::init_next) was not called.
    fn add_child(
        &mut self,
        parent: Self::VertexIdx,
        tag: String,
        attributes: Attributes,
    ) -> Result<Self::VertexIdx, ParsingError>;

    /// Finalizes the current tree and returns it, leaving the builder empty.
    ///
    /// Returns `None` if no tree was under construction.
    fn finish_tree(&mut self) -> Option<Self::Tree>;
}
