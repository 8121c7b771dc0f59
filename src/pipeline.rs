//! Batch run turning the classification tree and its lookup tables into
//! the data files of the tree browser.
//!
//! Reads (file names relative to the input directory, see
//! [PipelineConfig::from_dirs]):
//! * `mitoTree_v1.0_phm.xml` - classification tree
//! * `mitoTree_v1.0_hgmotifs.csv` - motifs per haplogroup (`;`-separated)
//! * `superhaplo_colorcodes.csv` - color per superhaplogroup (`,`-separated)
//! * `superhaplogroups.txt`, `phylo_superhaplogroups.txt` - anchor sets
//! * `metadata/...` - sequencing technology, country and representatives
//!
//! Writes into the output directory:
//! * `profiles.csv`, `mito_representatives.csv` (only with metadata)
//! * `hgmotifs.json`
//! * `tree.json`, `fullTree.nwk` - the full tree
//! * `radialTree.json`, `pruned_radialTree.nwk` - the tree pruned to
//!   superhaplogroups
//! * a verbatim copy of the tree document

use crate::json::{JsonProjection, write_json_file};
use crate::lookup::accessions::{read_accession_records, write_accession_records};
use crate::lookup::reader::{
    read_anchor_set, read_key_value_table, read_representatives, write_representatives,
};
use crate::lookup::{LookupError, ProfileTable};
use crate::model::Pruner;
use crate::newick::{NewickStyle, write_newick_file};
use crate::parser::ParsingError;
use crate::xml;
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const TREE_FILE: &str = "mitoTree_v1.0_phm.xml";
pub const MOTIFS_FILE: &str = "mitoTree_v1.0_hgmotifs.csv";
pub const COLORS_FILE: &str = "superhaplo_colorcodes.csv";
pub const SUPERHAPLO_FILE: &str = "superhaplogroups.txt";
pub const PHYLO_SUPERHAPLO_FILE: &str = "phylo_superhaplogroups.txt";
pub const TECHNOLOGY_FILE: &str = "metadata/61302_sequencing_technology.txt";
pub const COUNTRY_FILE: &str = "metadata/country_61302_final.txt";
pub const REPRESENTATIVES_FILE: &str = "metadata/mitoTree_61302_representatives.txt";

pub const PROFILES_OUT: &str = "profiles.csv";
pub const REPRESENTATIVES_OUT: &str = "mito_representatives.csv";
pub const MOTIFS_OUT: &str = "hgmotifs.json";
pub const TREE_JSON_OUT: &str = "tree.json";
pub const TREE_NEWICK_OUT: &str = "fullTree.nwk";
pub const PRUNED_JSON_OUT: &str = "radialTree.json";
pub const PRUNED_NEWICK_OUT: &str = "pruned_radialTree.nwk";

// =#========================================================================#=
// PIPELINE ERROR
// =#========================================================================#=
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to parse classification tree: {0}")]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self {
        move |source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// =#========================================================================#=
// CONFIGURATION
// =#========================================================================#=
/// Input files of the profile metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataInputs {
    pub technology_path: PathBuf,
    pub country_path: PathBuf,
    pub representatives_path: PathBuf,
}

/// Paths and switches of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub tree_path: PathBuf,
    pub motifs_path: PathBuf,
    pub colors_path: PathBuf,
    pub superhaplo_path: PathBuf,
    pub phylo_superhaplo_path: PathBuf,
    /// Metadata inputs; `None` skips `profiles.csv`, `mito_representatives.csv`
    /// and the profiles in `tree.json`
    pub metadata: Option<MetadataInputs>,
    pub output_dir: PathBuf,
    /// Collapse single-child chains in the pruned tree
    pub promote: bool,
    pub newick_style: NewickStyle,
}

impl PipelineConfig {
    /// Creates a configuration with the default file names below
    /// `input_dir`, writing to `output_dir`, with promotion and metadata.
    pub fn from_dirs<P: AsRef<Path>, Q: AsRef<Path>>(input_dir: P, output_dir: Q) -> Self {
        let input_dir = input_dir.as_ref();
        Self {
            tree_path: input_dir.join(TREE_FILE),
            motifs_path: input_dir.join(MOTIFS_FILE),
            colors_path: input_dir.join(COLORS_FILE),
            superhaplo_path: input_dir.join(SUPERHAPLO_FILE),
            phylo_superhaplo_path: input_dir.join(PHYLO_SUPERHAPLO_FILE),
            metadata: Some(MetadataInputs {
                technology_path: input_dir.join(TECHNOLOGY_FILE),
                country_path: input_dir.join(COUNTRY_FILE),
                representatives_path: input_dir.join(REPRESENTATIVES_FILE),
            }),
            output_dir: output_dir.as_ref().to_path_buf(),
            promote: true,
            newick_style: NewickStyle::default(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_dirs("inputfiles", "docs/data")
    }
}

// =#========================================================================#=
// REPORT
// =#========================================================================#=
/// Summary of a finished run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    /// Written files, in order of writing
    pub written: Vec<PathBuf>,
    pub num_vertices: usize,
    pub num_pruned_vertices: usize,
    pub num_accessions: usize,
}

// =#========================================================================#=
// RUN
// =#========================================================================#=
/// Runs the pipeline described by `config`.
///
/// Creates the output directory if needed. Stops at the first error;
/// files written before that remain.
///
/// # Errors
/// Returns a [PipelineError] if an input cannot be read or parsed,
/// or an output cannot be written.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let out_dir = config.output_dir.as_path();
    fs::create_dir_all(out_dir).map_err(PipelineError::io(out_dir))?;
    let mut report = PipelineReport::default();

    // Profile metadata
    let mut profiles = ProfileTable::new();
    if let Some(metadata) = &config.metadata {
        let records = read_accession_records(&metadata.technology_path, &metadata.country_path)?;
        let path = out_dir.join(PROFILES_OUT);
        write_accession_records(&path, &records)?;
        info!("Wrote {} accession records to {}", records.len(), path.display());
        report.num_accessions = records.len();
        report.written.push(path);

        let representatives = read_representatives(&metadata.representatives_path)?;
        let path = out_dir.join(REPRESENTATIVES_OUT);
        write_representatives(&path, &representatives)?;
        info!("Wrote {} representatives to {}", representatives.len(), path.display());
        report.written.push(path);

        profiles = ProfileTable::from_representatives(&representatives);
    }

    // Tree and lookup tables
    let tree = xml::parse_file(&config.tree_path)?;
    let motifs = read_key_value_table(&config.motifs_path, b';')?;
    let colors = read_key_value_table(&config.colors_path, b',')?;
    let superhaplo = read_anchor_set(&config.superhaplo_path)?;
    let phylo_superhaplo = read_anchor_set(&config.phylo_superhaplo_path)?;
    report.num_vertices = tree.num_vertices();

    let path = out_dir.join(MOTIFS_OUT);
    write_json_file(&path, &motifs).map_err(PipelineError::io(&path))?;
    report.written.push(path);

    // Full tree
    let projection = JsonProjection::new()
        .with_colors(&colors)
        .with_superhaplo_anchors(&superhaplo)
        .with_phylo_anchors(&phylo_superhaplo);

    let path = out_dir.join(TREE_JSON_OUT);
    let full_json = projection.clone().with_profiles(&profiles).project(&tree);
    write_json_file(&path, &full_json).map_err(PipelineError::io(&path))?;
    report.written.push(path);

    let path = out_dir.join(TREE_NEWICK_OUT);
    write_newick_file(&path, &tree, config.newick_style).map_err(PipelineError::io(&path))?;
    report.written.push(path);

    // Pruned tree
    let pruned = Pruner::new(&superhaplo)
        .set_promotion(config.promote)
        .prune(&tree);
    report.num_pruned_vertices = pruned.num_vertices();

    let path = out_dir.join(PRUNED_JSON_OUT);
    write_json_file(&path, &projection.project(&pruned)).map_err(PipelineError::io(&path))?;
    report.written.push(path);

    let path = out_dir.join(PRUNED_NEWICK_OUT);
    write_newick_file(&path, &pruned, config.newick_style).map_err(PipelineError::io(&path))?;
    report.written.push(path);

    // Downloadable copy of the tree document
    let file_name = config
        .tree_path
        .file_name()
        .map_or_else(|| TREE_FILE.into(), |name| name.to_os_string());
    let path = out_dir.join(file_name);
    fs::copy(&config.tree_path, &path).map_err(PipelineError::io(&path))?;
    info!("Copied {} to {}", config.tree_path.display(), path.display());
    report.written.push(path);

    info!(
        "Pipeline finished: {} vertices, {} after pruning, {} files written",
        report.num_vertices,
        report.num_pruned_vertices,
        report.written.len()
    );
    Ok(report)
}
