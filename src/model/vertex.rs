//! Vertex module for classification tree representation.

use crate::model::attributes::Attributes;
use crate::model::tree::VertexIndex;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a classification tree.
///
/// # Invariants
/// - `index` is the index of this vertex in the tree arena
/// - `parent` is `None` exactly for the root
/// - `children` are indices into the same arena, in document order
/// - Attributes are never changed after construction
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Index of the parent vertex, `None` for the root
    parent: Option<VertexIndex>,
    /// Indices of the children in order
    children: Vec<VertexIndex>,
    /// Element tag this vertex was read from
    tag: String,
    /// Attributes as read from the element
    attributes: Attributes,
}

impl Vertex {
    /// Creates a new root vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `tag` - Element tag
    /// * `attributes` - Attribute set of the element
    pub fn new_root(index: VertexIndex, tag: String, attributes: Attributes) -> Self {
        Vertex {
            index,
            parent: None,
            children: Vec::new(),
            tag,
            attributes,
        }
    }

    /// Creates a new non-root vertex below `parent`.
    ///
    /// Note that this does not register the vertex with its parent;
    /// [ClassTree::add_child](crate::model::ClassTree::add_child) does both.
    pub fn new_child(
        index: VertexIndex,
        parent: VertexIndex,
        tag: String,
        attributes: Attributes,
    ) -> Self {
        Vertex {
            index,
            parent: Some(parent),
            children: Vec::new(),
            tag,
            attributes,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Returns the children in document order.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns the number of children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns the element tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the attribute set.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the identifier, or `None` if absent or empty.
    pub fn id(&self) -> Option<&str> {
        self.attributes.id()
    }

    /// Returns the secondary label (empty if absent).
    pub fn secondary_label(&self) -> &str {
        self.attributes.secondary_label()
    }

    /// Returns `true` if this vertex is the root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` if this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends `child` to the children of this vertex.
    pub(crate) fn push_child(&mut self, child: VertexIndex) {
        self.children.push(child);
    }
}
