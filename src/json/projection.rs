//! Projection of a [ClassTree] onto serializable [JsonVertex] objects.

use crate::lookup::{AnchorSet, ColorTable, ProfileTable};
use crate::model::{ClassTree, VertexIndex};
use serde::Serialize;

// =#========================================================================#=
// JSON VERTEX
// =#========================================================================#=
/// Serializable rendering of one vertex and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonVertex {
    /// Identifier, `null` if missing
    pub name: Option<String>,

    /// Secondary label, empty if missing
    #[serde(rename = "HG")]
    pub secondary_label: String,

    /// Resolved color; only present when a color table was used,
    /// `null` when neither the vertex nor any ancestor has a color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorcode: Option<Option<String>>,

    /// Root or superhaplogroup anchor; omitted when `false`
    #[serde(skip_serializing_if = "is_false")]
    pub is_superhaplo: bool,

    /// Phylo superhaplogroup anchor; omitted when `false`
    #[serde(skip_serializing_if = "is_false")]
    pub is_phylo_superhaplo: bool,

    /// Profile accession numbers; omitted when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<String>,

    /// Children in tree order
    pub children: Vec<JsonVertex>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

// =#========================================================================#=
// JSON PROJECTION
// =#========================================================================#=
/// Configuration of which lookup tables enrich the JSON rendering.
///
/// Per vertex, depth-first:
/// 1. `colorcode` is the vertex's own color table entry, else the resolved
///    color of its parent, so colors flow down through uncolored vertices.
///    Only emitted when a non-empty color table is configured.
/// 2. `is_superhaplo` is set for the root and for superhaplogroup anchors.
/// 3. `is_phylo_superhaplo` is set for phylo anchors (the root gets no
///    automatic grant here).
/// 4. `profiles` lists the vertex's accessions, if a profile table is
///    configured and has a non-empty entry for it.
///
/// Identifiers missing from a table simply yield no value.
///
/// # Example
/// ```
/// use hgtree::json::JsonProjection;
/// use hgtree::lookup::{AnchorSet, ColorTable};
///
/// let tree = hgtree::xml::parse_str(
///     r#"<Node Id="L3"><Node Id="M"><Node Id="M7"/></Node></Node>"#,
/// ).unwrap();
/// let colors: ColorTable = [("M", "#f46d43")].into_iter().collect();
/// let superhaplo: AnchorSet = ["M"].into_iter().collect();
///
/// let json = JsonProjection::new()
///     .with_colors(&colors)
///     .with_superhaplo_anchors(&superhaplo)
///     .project(&tree);
///
/// assert!(json.is_superhaplo);
/// assert_eq!(json.colorcode, Some(None));
/// let m7 = &json.children[0].children[0];
/// assert_eq!(m7.colorcode, Some(Some("#f46d43".to_string())));
/// assert!(!m7.is_superhaplo);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonProjection<'a> {
    colors: Option<&'a ColorTable>,
    superhaplo_anchors: Option<&'a AnchorSet>,
    phylo_anchors: Option<&'a AnchorSet>,
    profiles: Option<&'a ProfileTable>,
}

impl<'a> JsonProjection<'a> {
    /// Creates a projection without any lookup tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves colors from `colors`.
    pub fn with_colors(mut self, colors: &'a ColorTable) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Flags vertices in `anchors` as superhaplogroups.
    pub fn with_superhaplo_anchors(mut self, anchors: &'a AnchorSet) -> Self {
        self.superhaplo_anchors = Some(anchors);
        self
    }

    /// Flags vertices in `anchors` as phylo superhaplogroups.
    pub fn with_phylo_anchors(mut self, anchors: &'a AnchorSet) -> Self {
        self.phylo_anchors = Some(anchors);
        self
    }

    /// Attaches profile accessions from `profiles`.
    pub fn with_profiles(mut self, profiles: &'a ProfileTable) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Renders `tree` starting at its root.
    ///
    /// # Panics
    /// Panics if `tree` has no root set.
    pub fn project(&self, tree: &ClassTree) -> JsonVertex {
        self.project_vertex(tree, tree.root_index(), None)
    }

    fn project_vertex(
        &self,
        tree: &ClassTree,
        index: VertexIndex,
        inherited_color: Option<&str>,
    ) -> JsonVertex {
        let vertex = &tree[index];
        let id = vertex.id();

        let colors = self.colors.filter(|colors| !colors.is_empty());
        let color = colors
            .and_then(|colors| colors.lookup(id))
            .or(inherited_color);

        let is_superhaplo =
            vertex.is_root() || self.superhaplo_anchors.is_some_and(|a| a.contains(id));
        let is_phylo_superhaplo = self.phylo_anchors.is_some_and(|a| a.contains(id));
        let profiles = self
            .profiles
            .map(|profiles| profiles.lookup(id).to_vec())
            .unwrap_or_default();

        let children = vertex
            .children()
            .iter()
            .map(|&child| self.project_vertex(tree, child, color))
            .collect();

        JsonVertex {
            name: id.map(str::to_string),
            secondary_label: vertex.secondary_label().to_string(),
            colorcode: colors.map(|_| color.map(str::to_string)),
            is_superhaplo,
            is_phylo_superhaplo,
            profiles,
            children,
        }
    }
}
