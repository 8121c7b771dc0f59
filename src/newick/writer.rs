//! Newick format writing for classification trees.

use crate::model::{ClassTree, VertexIndex};
use crate::parser::utils::escape_label;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Label written for vertices without identifier.
pub const MISSING_LABEL: &str = "N/A";

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Style for serializing a tree to Newick format,
/// controlling how labels are represented in the output string.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum NewickStyle {
    /// Write identifiers unchanged
    #[default]
    Verbatim,
    /// Write identifiers escaped for Newick parsers
    /// (see [escape_label](crate::parser::utils::escape_label))
    Escaped,
}

/// Returns the Newick representation of `tree` with closing semicolon,
/// identifiers written unchanged.
///
/// # Example
/// ```
/// use hgtree::newick::to_newick;
///
/// let tree = hgtree::xml::parse_str(
///     r#"<Node Id="root"><Node Id="A"><Node Id="B"/><Node Id="C"/></Node><Node Id="D"/></Node>"#,
/// ).unwrap();
/// assert_eq!(to_newick(&tree), "((B,C)A,D)root;");
/// ```
pub fn to_newick(tree: &ClassTree) -> String {
    to_newick_with_style(tree, NewickStyle::Verbatim)
}

/// Returns the Newick representation of `tree` with closing semicolon,
/// labels written according to `style`.
///
/// # Panics
/// Panics if `tree` has no root set.
pub fn to_newick_with_style(tree: &ClassTree, style: NewickStyle) -> String {
    // Recursive helper for building the Newick string
    fn build_newick(tree: &ClassTree, newick: &mut String, index: VertexIndex, style: NewickStyle) {
        let vertex = &tree[index];

        if !vertex.is_leaf() {
            newick.push('(');
            for (i, &child) in vertex.children().iter().enumerate() {
                if i > 0 {
                    newick.push(',');
                }
                build_newick(tree, newick, child, style);
            }
            newick.push(')');
        }

        let label = vertex.id().unwrap_or(MISSING_LABEL);
        match style {
            NewickStyle::Verbatim => newick.push_str(label),
            NewickStyle::Escaped => newick.push_str(&escape_label(label)),
        }
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    build_newick(tree, &mut newick, tree.root_index(), style);
    newick.push(';');

    newick
}

/// Writes the Newick representation of `tree` to the file at `path`,
/// without trailing newline.
///
/// # Errors
/// Returns an I/O error if creating or writing the file fails.
pub fn write_newick_file<P: AsRef<Path>>(
    path: P,
    tree: &ClassTree,
    style: NewickStyle,
) -> io::Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(to_newick_with_style(tree, style).as_bytes())?;
    writer.flush()?;

    info!("Wrote Newick tree with {} vertices to {}", tree.num_vertices(), path.display());
    Ok(())
}

/// Estimates the length of the Newick string of `tree`, used to
/// pre-allocate string capacity.
///
/// Each vertex contributes its label plus one separator (`,` or `;`),
/// each internal vertex a pair of parentheses.
fn estimate_newick_len(tree: &ClassTree) -> usize {
    let label_chars: usize = tree
        .pre_order_iter()
        .map(|v| v.id().map_or(MISSING_LABEL.len(), str::len))
        .sum();

    label_chars + tree.num_vertices() + 2 * tree.num_internal() + BUFFER_CHARS
}
