use hgtree::lookup::AnchorSet;
use hgtree::model::{Attributes, ClassTree, Pruner};
use hgtree::newick::{MISSING_LABEL, NewickStyle, to_newick, to_newick_with_style, write_newick_file};
use hgtree::xml::parse_str;

const TREE: &str = r#"<Haplogroup Id="mt-MRCA">
  <Haplogroup Id="L0"><Haplogroup Id="L0a"/><Haplogroup Id="L0b"/></Haplogroup>
  <Haplogroup Id="L1'2'3'4'5'6"><Haplogroup Id="L1"/></Haplogroup>
  <Haplogroup Id="L7"/>
</Haplogroup>"#;

// --- TESTS NEWICK STRINGS ---
#[test]
fn test_verbatim_newick() {
    let tree = parse_str(TREE).unwrap();
    assert_eq!(
        to_newick(&tree),
        "((L0a,L0b)L0,(L1)L1'2'3'4'5'6,L7)mt-MRCA;"
    );
}

#[test]
fn test_single_vertex() {
    let tree = parse_str(r#"<Haplogroup Id="H"/>"#).unwrap();
    assert_eq!(to_newick(&tree), "H;");
}

#[test]
fn test_parentheses_match_internal_vertices() {
    let tree = parse_str(TREE).unwrap();
    let newick = to_newick(&tree);

    assert!(newick.ends_with(';'));
    assert_eq!(newick.matches(';').count(), 1);
    assert_eq!(newick.matches('(').count(), tree.num_internal());
    assert_eq!(newick.matches(')').count(), tree.num_internal());
}

#[test]
fn test_missing_identifier_placeholder() {
    let tree = parse_str(r#"<Tree><Node Id="A"/><Node HG="x"/><Node Id=""/></Tree>"#).unwrap();
    assert_eq!(MISSING_LABEL, "N/A");
    assert_eq!(to_newick(&tree), "(A,N/A,N/A)N/A;");
}

#[test]
fn test_escaped_style() {
    let tree = parse_str(TREE).unwrap();
    assert_eq!(
        to_newick_with_style(&tree, NewickStyle::Escaped),
        "((L0a,L0b)L0,(L1)'L1''2''3''4''5''6',L7)mt-MRCA;"
    );

    let tree = parse_str(r#"<Node Id="mt MRCA"><Node Id="H (x)"/></Node>"#).unwrap();
    assert_eq!(
        to_newick_with_style(&tree, NewickStyle::Escaped),
        "('H (x)')mt_MRCA;"
    );
    assert_eq!(NewickStyle::default(), NewickStyle::Verbatim);
}

#[test]
fn test_built_tree_child_order() {
    let label = |id: &str| -> Attributes { [("Id", id)].into_iter().collect() };
    let mut tree = ClassTree::new();
    let root = tree.add_root("Node".to_string(), label("R"));
    let z = tree.add_child(root, "Node".to_string(), label("Z"));
    tree.add_child(root, "Node".to_string(), label("A"));
    tree.add_child(z, "Node".to_string(), label("Y"));

    assert_eq!(to_newick(&tree), "((Y)Z,A)R;");
}

#[test]
fn test_pruned_tree_newick() {
    let tree = parse_str(TREE).unwrap();
    let anchors: AnchorSet = ["L1", "L7"].into_iter().collect();
    let pruned = Pruner::new(&anchors).with_promotion().prune(&tree);
    assert_eq!(to_newick(&pruned), "(L1,L7)mt-MRCA;");
}

// --- TESTS NEWICK FILES ---
#[test]
fn test_write_newick_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fullTree.nwk");
    let tree = parse_str(TREE).unwrap();

    write_newick_file(&path, &tree, NewickStyle::Verbatim).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, to_newick(&tree));
    assert!(!written.ends_with('\n'));
}

#[test]
fn test_write_newick_file_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("tree.nwk");
    let tree = parse_str(TREE).unwrap();

    assert!(write_newick_file(&path, &tree, NewickStyle::Verbatim).is_err());
}
