use clap::{ArgAction, Parser};
use hgtree::newick::NewickStyle;
use hgtree::pipeline::{self, PipelineConfig};
use log::LevelFilter;
use std::path::PathBuf;

/// Turns a haplogroup classification tree and its lookup tables into the
/// JSON, Newick and CSV files of the tree browser.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Directory holding the input files
    #[arg(short, long, default_value = "inputfiles")]
    input_dir: PathBuf,

    /// Directory the output files are written to
    #[arg(short, long, default_value = "docs/data")]
    output_dir: PathBuf,

    /// Classification tree document (overrides the file in the input directory)
    #[arg(long)]
    tree: Option<PathBuf>,

    /// Haplogroup motif table
    #[arg(long)]
    motifs: Option<PathBuf>,

    /// Superhaplogroup color table
    #[arg(long)]
    colors: Option<PathBuf>,

    /// Superhaplogroup list
    #[arg(long)]
    superhaplo: Option<PathBuf>,

    /// Phylo superhaplogroup list
    #[arg(long)]
    phylo_superhaplo: Option<PathBuf>,

    /// Keep single-child chains in the pruned tree
    #[arg(long)]
    no_promote: bool,

    /// Skip the profile metadata (no profiles.csv, no profiles in tree.json)
    #[arg(long)]
    skip_metadata: bool,

    /// Escape Newick labels instead of writing identifiers unchanged
    #[arg(long)]
    escape_newick: bool,
}

impl Cli {
    fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = self.into_config();
        let report = pipeline::run(&config)?;
        for path in &report.written {
            println!("{}", path.display());
        }

        Ok(())
    }

    fn setup_logging(verbosity: u8) {
        let level = match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_target(false)
            .init();
    }

    fn into_config(self) -> PipelineConfig {
        let mut config = PipelineConfig::from_dirs(&self.input_dir, &self.output_dir);
        if let Some(tree) = self.tree {
            config.tree_path = tree;
        }
        if let Some(motifs) = self.motifs {
            config.motifs_path = motifs;
        }
        if let Some(colors) = self.colors {
            config.colors_path = colors;
        }
        if let Some(superhaplo) = self.superhaplo {
            config.superhaplo_path = superhaplo;
        }
        if let Some(phylo_superhaplo) = self.phylo_superhaplo {
            config.phylo_superhaplo_path = phylo_superhaplo;
        }
        if self.skip_metadata {
            config.metadata = None;
        }
        config.promote = !self.no_promote;
        if self.escape_newick {
            config.newick_style = NewickStyle::Escaped;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
