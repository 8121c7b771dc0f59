//! Data model for attributed classification trees.
//!
//! # Tree representation
//! Trees are represented by [ClassTree], which uses the arena pattern to
//! store [Vertex] nodes referenced by [VertexIndex]. Unlike a binary
//! phylogeny, a classification tree is n-ary: every vertex keeps an ordered
//! list of children, and that order (document order) is preserved by every
//! operation and serialization.
//!
//! Each vertex carries the element tag it was read from and an open set of
//! [Attributes]; the identifier (`Id`) and the secondary label (`HG`) are the
//! two attributes the rest of the crate relies on.
//!
//! # Building trees
//! Trees are constructed during parsing via the [TreeBuilder] trait, which
//! decouples the markup parser from the concrete tree type. [ClassTreeBuilder]
//! builds a [ClassTree].
//!
//! # Pruning
//! [Pruner] derives a reduced tree that keeps a set of anchor vertices and
//! the scaffolding connecting them to the root, optionally collapsing
//! single-child connective vertices. The input tree is never modified.

pub mod attributes;
pub mod class_tree_builder;
pub mod prune;
pub mod tree;
pub mod tree_builder;
pub mod vertex;

pub use attributes::Attributes;
pub use class_tree_builder::ClassTreeBuilder;
pub use prune::Pruner;
pub use tree::ClassTree;
pub use tree::VertexIndex;
pub use tree_builder::TreeBuilder;
pub use vertex::Vertex;
