//! Pruning and promotion of classification trees.
//!
//! [Pruner] derives a reduced tree in two phases:
//!
//! 1. **Filter:** A vertex is included if it is the root, an anchor, or has
//!    an included descendant. Everything else is dropped with its subtree.
//! 2. **Promote** (optional): Every included non-anchor vertex with exactly
//!    one included child is replaced by that child, repeatedly, so chains
//!    of connective vertices collapse into a single edge. Anchors and the
//!    root are never collapsed.
//!
//! Both phases work on the original arena; the result is copied into a
//! new [ClassTree], leaving the input untouched.

use crate::lookup::AnchorSet;
use crate::model::tree::{ClassTree, VertexIndex};
use crate::model::vertex::Vertex;
use log::{debug, warn};

// =#========================================================================#=
// PRUNER
// =#========================================================================#=
/// Configured pruning of a [ClassTree] down to an [AnchorSet].
///
/// # Example
/// ```
/// use hgtree::lookup::AnchorSet;
/// use hgtree::model::Pruner;
/// use hgtree::newick::to_newick;
///
/// let tree = hgtree::xml::parse_str(
///     r#"<Node Id="root"><Node Id="A"><Node Id="B"/></Node><Node Id="C"/></Node>"#,
/// ).unwrap();
/// let anchors: AnchorSet = ["root", "B"].into_iter().collect();
///
/// let filtered = Pruner::new(&anchors).prune(&tree);
/// assert_eq!(to_newick(&filtered), "((B)A)root;");
///
/// let promoted = Pruner::new(&anchors).with_promotion().prune(&tree);
/// assert_eq!(to_newick(&promoted), "(B)root;");
/// ```
#[derive(Debug, Clone)]
pub struct Pruner<'a> {
    anchors: &'a AnchorSet,
    promote: bool,
}

impl<'a> Pruner<'a> {
    /// Creates a new [Pruner] keeping `anchors`, with promotion disabled.
    pub fn new(anchors: &'a AnchorSet) -> Self {
        Self {
            anchors,
            promote: false,
        }
    }

    /// Enables promotion of single-child connective vertices.
    pub fn with_promotion(mut self) -> Self {
        self.promote = true;
        self
    }

    /// Configures whether single-child connective vertices get promoted.
    pub fn set_promotion(&mut self, promote: bool) -> &mut Self {
        self.promote = promote;
        self
    }

    /// Returns a new tree containing the root, all anchors of `tree`, and
    /// the vertices connecting them (minus collapsed chains if promotion
    /// is enabled). Child order follows `tree`.
    ///
    /// If no vertex of `tree` is an anchor, the result is the root alone.
    ///
    /// # Panics
    /// Panics if `tree` has no root set.
    pub fn prune(&self, tree: &ClassTree) -> ClassTree {
        let included = self.filter(tree);
        let num_included = included.iter().filter(|&&i| i).count();

        let root = tree.root();
        let mut pruned = ClassTree::with_capacity(num_included);
        let pruned_root = pruned.add_root(root.tag().to_string(), root.attributes().clone());

        // Children of a vertex are all added before descending,
        // so the order of each child list is preserved.
        let mut stack = vec![(root.index(), pruned_root)];
        while let Some((index, pruned_index)) = stack.pop() {
            for child in included_children(tree, &included, index) {
                let child = if self.promote {
                    self.promote_slot(tree, &included, child)
                } else {
                    child
                };
                let vertex = &tree[child];
                let pruned_child = pruned.add_child(
                    pruned_index,
                    vertex.tag().to_string(),
                    vertex.attributes().clone(),
                );
                stack.push((child, pruned_child));
            }
        }

        debug!(
            "Pruned tree from {} to {} vertices ({} after filtering, promotion {})",
            tree.num_vertices(),
            pruned.num_vertices(),
            num_included,
            if self.promote { "on" } else { "off" }
        );

        pruned
    }

    /// Marks each vertex of `tree` as included or not (phase 1).
    ///
    /// Post-order traversal guarantees children are decided before their parent.
    fn filter(&self, tree: &ClassTree) -> Vec<bool> {
        let mut included = vec![false; tree.num_vertices()];
        let mut num_anchors = 0;

        for vertex in tree.post_order_iter() {
            let is_anchor = self.is_anchor(vertex);
            if is_anchor {
                num_anchors += 1;
            }
            included[vertex.index()] = vertex.is_root()
                || is_anchor
                || vertex.children().iter().any(|&child| included[child]);
        }

        if num_anchors == 0 {
            warn!("No anchor found in tree, pruning down to the root alone");
        }

        included
    }

    /// Returns the vertex that takes the place of `index` in its parent's
    /// child list after collapsing single-child connective vertices (phase 2).
    fn promote_slot(&self, tree: &ClassTree, included: &[bool], index: VertexIndex) -> VertexIndex {
        let mut current = index;
        while !self.is_fixed(&tree[current]) {
            let mut children = included_children(tree, included, current);
            match (children.next(), children.next()) {
                (Some(only_child), None) => current = only_child,
                _ => break,
            }
        }
        current
    }

    fn is_anchor(&self, vertex: &Vertex) -> bool {
        self.anchors.contains(vertex.id())
    }

    /// Whether `vertex` may never be collapsed into its child.
    fn is_fixed(&self, vertex: &Vertex) -> bool {
        vertex.is_root() || self.is_anchor(vertex)
    }
}

/// Iterates over the included children of vertex `index`, in order.
fn included_children<'t>(
    tree: &'t ClassTree,
    included: &'t [bool],
    index: VertexIndex,
) -> impl Iterator<Item = VertexIndex> + 't {
    tree[index]
        .children()
        .iter()
        .copied()
        .filter(move |&child| included[child])
}
