use super::commands;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Curvature/torsion histogram features for every protein of a connection table
    Featurize(FeaturizeArgs),
    /// Per-residue curvature and torsion of one structure, as CSV on stdout
    Geometry {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        chain: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct FeaturizeArgs {
    /// CSV of `ec_number,accession` rows
    #[arg(long)]
    pub connections: PathBuf,
    /// Directory of `<accession>.pdb` / `<accession>.cif` files
    #[arg(long)]
    pub structures: PathBuf,
    #[arg(short, long)]
    pub output: PathBuf,
    /// EC indicator table for the featurised proteins
    #[arg(long)]
    pub labels: Option<PathBuf>,
    /// Run report as JSON
    #[arg(long)]
    pub report: Option<PathBuf>,
    /// JSON pipeline config; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bins: Option<usize>,
    /// Keep the raw index for values at the range maximum (they are dropped)
    #[arg(long)]
    pub no_clamp: bool,
    /// Curvature histogram followed by torsion histogram instead of their sum
    #[arg(long)]
    pub concatenate: bool,
    #[arg(long)]
    pub sequential: bool,
    #[arg(long)]
    pub chain: Option<String>,
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
    /// Recompute cached stages
    #[arg(long)]
    pub refresh: bool,
    /// The connection table has no header row
    #[arg(long)]
    pub no_header: bool,
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Featurize(args) => commands::featurize::execute(args),
            Commands::Geometry { input, chain } => commands::geometry::execute(input, chain),
        }
    }
}
