use clap::{Args, Parser, Subcommand, ValueEnum};
use resdist::engine::config::MissingAtomPolicy;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "resdist - tabulate residue-to-ligand distances and script site-labeling renders for protein structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the minimum ligand-to-CA distance of every amino acid and write a TSV table.
    Distances(DistancesArgs),
    /// Write a PyMOL script that highlights listed residue sites and exports images.
    Label(LabelArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingAtomArg {
    /// Abort when an amino acid lacks the target atom.
    Fail,
    /// Leave such residues out of the table.
    Skip,
}

impl From<MissingAtomArg> for MissingAtomPolicy {
    fn from(arg: MissingAtomArg) -> Self {
        match arg {
            MissingAtomArg::Fail => MissingAtomPolicy::Fail,
            MissingAtomArg::Skip => MissingAtomPolicy::Skip,
        }
    }
}

/// Arguments for the `distances` subcommand.
#[derive(Args, Debug)]
pub struct DistancesArgs {
    // --- Input / Output ---
    /// Path to the input structure file (.pdb, .cif or .mmcif).
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path for the output distance table.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Selection Overrides ---
    /// Chains to tabulate, in output order (e.g., -C A -C B or -C A,B).
    #[arg(short = 'C', long = "chain", value_name = "ID", value_delimiter = ',')]
    pub chains: Vec<char>,

    /// Chain containing the reference residue. Defaults to the first tabulated chain.
    #[arg(long, value_name = "ID")]
    pub reference_chain: Option<char>,

    /// Residue name of the reference ligand (e.g., SIA).
    #[arg(short, long, value_name = "NAME")]
    pub reference_residue: Option<String>,

    /// Atom of each amino acid the distance is measured to.
    #[arg(long, value_name = "NAME")]
    pub target_atom: Option<String>,

    /// What to do with amino acids lacking the target atom.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub missing_atom: Option<MissingAtomArg>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S distances.reference-residue=NAG
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `label` subcommand.
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Path to the configuration file in TOML format listing the labeling jobs.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path for the generated PyMOL script.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Render Overrides ---
    /// Override the exported image width in pixels.
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Override the exported image resolution.
    #[arg(long, value_name = "DPI")]
    pub dpi: Option<u32>,

    /// Export images without ray tracing.
    #[arg(long)]
    pub no_ray: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S label.render.base-color=grey70
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
