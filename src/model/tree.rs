//! Tree module for classification tree representation.
//!
//! Provides the core data structures:
//! * [ClassTree] - n-ary tree using the arena pattern
//! * [VertexIndex] as type used to index vertices in the tree
//! * [PreOrderIter] and [PostOrderIter] for stack-based traversals

use crate::model::attributes::Attributes;
use crate::model::vertex::Vertex;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// An ordered, attributed classification tree represented using the arena
/// pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. No parent/child references are stored as pointers, so
/// there is no sharing and no cycles.
///
/// # Structure
/// - All vertices are stored in the arena; the index of the root is maintained.
/// - Each vertex lists its children in document order.
/// - No assumption on order of indices is maintained.
///
/// # Construction
/// Add the root first, then children top-down with [ClassTree::add_child].
/// Children are appended, so adding siblings in order preserves their order.
///
/// # Example
/// ```
/// use hgtree::model::{Attributes, ClassTree};
///
/// // mt-MRCA(L0,L1'2'3'4'5'6)
/// let mut tree = ClassTree::new();
/// let root = tree.add_root("Haplogroup".to_string(), [("Id", "mt-MRCA")].into_iter().collect());
/// tree.add_child(root, "Haplogroup".to_string(), [("Id", "L0")].into_iter().collect());
/// tree.add_child(root, "Haplogroup".to_string(), [("Id", "L1'2'3'4'5'6")].into_iter().collect());
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.num_leaves(), 2);
/// assert_eq!(tree.root().id(), Some("mt-MRCA"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClassTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl ClassTree {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        ClassTree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: NO_ROOT_SET_INDEX,
        }
    }

    /// Adds the root to the tree, returning its index.
    ///
    /// # Panics
    /// Panics if a root has already been added.
    pub fn add_root(&mut self, tag: String, attributes: Attributes) -> VertexIndex {
        assert!(!self.is_root_set(), "Root already set");
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_root(index, tag, attributes));
        self.root_index = index;
        index
    }

    /// Adds a vertex as last child of `parent`, returning its index.
    ///
    /// # Panics
    /// Panics if `parent` is not a valid index.
    pub fn add_child(
        &mut self,
        parent: VertexIndex,
        tag: String,
        attributes: Attributes,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self[parent].push_child(index);
        self.vertices
            .push(Vertex::new_child(index, parent, tag, attributes));
        index
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is set and points to the only vertex without parent
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - Every vertex is reachable from the root exactly once
    pub fn is_valid(&self) -> bool {
        if !self.is_root_set() || self.root_index >= self.vertices.len() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }
            if vertex.is_root() != (index == self.root_index) {
                return false;
            }
            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }
        }

        let mut seen = vec![false; self.vertices.len()];
        for vertex in self.pre_order_iter() {
            if seen[vertex.index()] {
                return false;
            }
            seen[vertex.index()] = true;
        }

        seen.into_iter().all(|s| s)
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the first vertex (in pre-order) with identifier `id`.
    pub fn find(&self, id: &str) -> Option<&Vertex> {
        self.pre_order_iter().find(|v| v.id() == Some(id))
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of vertices with at least one child.
    pub fn num_internal(&self) -> usize {
        self.num_vertices() - self.num_leaves()
    }

    /// Returns the number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut depths = vec![0; self.num_vertices()];
        let mut max_depth = 0;
        for vertex in self.pre_order_iter() {
            if let Some(parent) = vertex.parent() {
                depths[vertex.index()] = depths[parent] + 1;
                max_depth = max_depth.max(depths[vertex.index()]);
            }
        }
        max_depth
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Siblings are visited in document order.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// This is document order.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

impl Default for ClassTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<VertexIndex> for ClassTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<VertexIndex> for ClassTree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PostOrderIter<'a> {
    tree: &'a ClassTree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a ClassTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // Push in reverse, so the first child is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PreOrderIter<'a> {
    tree: &'a ClassTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a ClassTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        for &child in vertex.children().iter().rev() {
            self.stack.push(child);
        }

        Some(vertex)
    }
}
