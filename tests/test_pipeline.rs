use hgtree::newick::NewickStyle;
use hgtree::pipeline::{self, PipelineConfig, PipelineError};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TREE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Haplogroup Id="mt-MRCA" HG="mt-MRCA">
  <Haplogroup Id="L0" HG="L0">
    <Haplogroup Id="L0a" HG="L0a"/>
  </Haplogroup>
  <Haplogroup Id="L3" HG="L3">
    <Haplogroup Id="M" HG="M">
      <Haplogroup Id="M7" HG="M7"/>
    </Haplogroup>
    <Haplogroup Id="N" HG="N"/>
  </Haplogroup>
</Haplogroup>
"#;

fn write_inputs(dir: &Path) {
    fs::create_dir_all(dir.join("metadata")).unwrap();
    fs::write(dir.join("mitoTree_v1.0_phm.xml"), TREE_XML).unwrap();
    fs::write(
        dir.join("mitoTree_v1.0_hgmotifs.csv"),
        "haplogroup;motifs\nL0;263G 1048T\nM;489C 10400T\n",
    )
    .unwrap();
    fs::write(
        dir.join("superhaplo_colorcodes.csv"),
        "superhaplo,colorcode\nL0,#9e0142\nM,#f46d43\n",
    )
    .unwrap();
    fs::write(dir.join("superhaplogroups.txt"), "L0\nM\nN\n").unwrap();
    fs::write(dir.join("phylo_superhaplogroups.txt"), "L3\n").unwrap();
    fs::write(
        dir.join("metadata/61302_sequencing_technology.txt"),
        "accession,technology,assembly\nAB055622,Sanger,mapping\nMW123456,Illumina,\n",
    )
    .unwrap();
    fs::write(
        dir.join("metadata/country_61302_final.txt"),
        "accession;country\nAB055622;Japan\n",
    )
    .unwrap();
    fs::write(
        dir.join("metadata/mitoTree_61302_representatives.txt"),
        "motif\tnum_profiles\tprofiles\nM7\t2\tAB055622 MW123456\nN\t0\t\n",
    )
    .unwrap();
}

fn setup() -> (TempDir, PipelineConfig) {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("inputfiles");
    write_inputs(&input_dir);
    let config = PipelineConfig::from_dirs(&input_dir, dir.path().join("docs/data"));
    (dir, config)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// --- TESTS FULL RUN ---
#[test]
fn test_full_run_writes_all_files() {
    let (_dir, config) = setup();
    let report = pipeline::run(&config).unwrap();
    let out = &config.output_dir;

    let names: Vec<_> = report
        .written
        .iter()
        .map(|path| path.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "profiles.csv",
            "mito_representatives.csv",
            "hgmotifs.json",
            "tree.json",
            "fullTree.nwk",
            "radialTree.json",
            "pruned_radialTree.nwk",
            "mitoTree_v1.0_phm.xml",
        ]
    );
    for path in &report.written {
        assert!(path.starts_with(out));
        assert!(path.is_file(), "{} not written", path.display());
    }

    assert_eq!(report.num_vertices, 7);
    assert_eq!(report.num_pruned_vertices, 5);
    assert_eq!(report.num_accessions, 2);
}

#[test]
fn test_full_run_contents() {
    let (_dir, config) = setup();
    pipeline::run(&config).unwrap();
    let out = &config.output_dir;

    assert_eq!(
        fs::read_to_string(out.join("profiles.csv")).unwrap(),
        "accession_number,technology,assembly,country\n\
         AB055622,Sanger,mapping,Japan\n\
         MW123456,Illumina,NA,NA\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("mito_representatives.csv")).unwrap(),
        "motif,num_profiles,profiles\nM7,2,AB055622 MW123456\nN,0,\n"
    );
    assert_eq!(
        read_json(&out.join("hgmotifs.json")),
        json!({"L0": "263G 1048T", "M": "489C 10400T"})
    );

    // Full tree
    assert_eq!(
        fs::read_to_string(out.join("fullTree.nwk")).unwrap(),
        "((L0a)L0,((M7)M,N)L3)mt-MRCA;"
    );
    let tree = read_json(&out.join("tree.json"));
    assert_eq!(tree["name"], json!("mt-MRCA"));
    assert_eq!(tree["is_superhaplo"], json!(true));
    assert_eq!(tree["colorcode"], Value::Null);
    let l3 = &tree["children"][1];
    assert_eq!(l3["is_phylo_superhaplo"], json!(true));
    assert!(l3.get("is_superhaplo").is_none());
    let m7 = &l3["children"][0]["children"][0];
    assert_eq!(m7["colorcode"], json!("#f46d43"));
    assert_eq!(m7["profiles"], json!(["AB055622", "MW123456"]));
    assert!(l3["children"][1].get("profiles").is_none());

    // Pruned tree: L0a and M7 dropped, L3 kept as it branches
    assert_eq!(
        fs::read_to_string(out.join("pruned_radialTree.nwk")).unwrap(),
        "(L0,(M,N)L3)mt-MRCA;"
    );
    let radial = read_json(&out.join("radialTree.json"));
    assert_eq!(radial["children"][0]["colorcode"], json!("#9e0142"));
    assert_eq!(radial["children"][1]["children"][0]["is_superhaplo"], json!(true));
    assert!(radial["children"][1]["children"][0].get("profiles").is_none());

    assert_eq!(
        fs::read_to_string(out.join("mitoTree_v1.0_phm.xml")).unwrap(),
        TREE_XML
    );
}

#[test]
fn test_run_without_promotion() {
    let (_dir, mut config) = setup();
    fs::write(&config.superhaplo_path, "M7\n").unwrap();
    config.promote = false;
    pipeline::run(&config).unwrap();
    assert_eq!(
        fs::read_to_string(config.output_dir.join("pruned_radialTree.nwk")).unwrap(),
        "(((M7)M)L3)mt-MRCA;"
    );

    config.promote = true;
    pipeline::run(&config).unwrap();
    assert_eq!(
        fs::read_to_string(config.output_dir.join("pruned_radialTree.nwk")).unwrap(),
        "(M7)mt-MRCA;"
    );
}

#[test]
fn test_run_without_metadata() {
    let (_dir, mut config) = setup();
    config.metadata = None;
    let report = pipeline::run(&config).unwrap();

    assert_eq!(report.written.len(), 6);
    assert_eq!(report.num_accessions, 0);
    assert!(!config.output_dir.join("profiles.csv").exists());
    let tree = fs::read_to_string(config.output_dir.join("tree.json")).unwrap();
    assert!(!tree.contains("profiles"));
}

#[test]
fn test_run_escaped_newick() {
    let (_dir, mut config) = setup();
    fs::write(
        &config.tree_path,
        r#"<Haplogroup Id="mt-MRCA"><Haplogroup Id="L1'2'3'4'5'6"/></Haplogroup>"#,
    )
    .unwrap();
    config.newick_style = NewickStyle::Escaped;
    pipeline::run(&config).unwrap();

    assert_eq!(
        fs::read_to_string(config.output_dir.join("fullTree.nwk")).unwrap(),
        "('L1''2''3''4''5''6')mt-MRCA;"
    );
}

// --- TESTS ERRORS ---
#[test]
fn test_run_malformed_tree() {
    let (_dir, config) = setup();
    fs::write(&config.tree_path, "<Haplogroup Id=\"mt-MRCA\"><Haplogroup></Haplogroup>").unwrap();

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Parsing(_)));
}

#[test]
fn test_run_missing_lookup_table() {
    let (_dir, config) = setup();
    fs::remove_file(&config.colors_path).unwrap();

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Lookup(_)));
    assert!(err.to_string().contains("superhaplo_colorcodes.csv"));
}

#[test]
fn test_default_config() {
    let config = PipelineConfig::default();
    assert_eq!(
        config.tree_path,
        Path::new("inputfiles").join("mitoTree_v1.0_phm.xml")
    );
    assert_eq!(config.output_dir, Path::new("docs/data"));
    assert!(config.promote);
    assert!(config.metadata.is_some());
    assert_eq!(config.newick_style, NewickStyle::Verbatim);
}
