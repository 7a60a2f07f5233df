use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "bencheval - Evaluate quantum-chemistry benchmark subsets restricted by molecular composition constraints.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Method identifier handed to the scoring script.
    /// Required here or in the configuration file.
    #[arg(short, long, value_name = "NAME")]
    pub method: Option<String>,

    /// Numeric format code handed to the scoring script.
    #[arg(long, value_name = "INT")]
    pub format: Option<u32>,

    /// Allowed elements; molecules containing any other element are skipped.
    /// Example: '57-71, 81-*'
    #[arg(long, value_name = "RANGES")]
    pub allowed_elements: Option<String>,

    /// Required element(s) that must ALL be contained in each molecule.
    /// Example: '57-71, 81-*'
    #[arg(
        long,
        value_name = "RANGES",
        conflicts_with = "required_elements_one"
    )]
    pub required_elements_all: Option<String>,

    /// Required element(s) of which AT LEAST ONE must be contained in each
    /// molecule. Example: '57-71, 81-*'
    #[arg(long, value_name = "RANGES")]
    pub required_elements_one: Option<String>,

    /// Minimum total charge of the molecules.
    #[arg(long, value_name = "INT", allow_negative_numbers = true)]
    pub min_charge: Option<i32>,

    /// Maximum total charge of the molecules.
    #[arg(long, value_name = "INT", allow_negative_numbers = true)]
    pub max_charge: Option<i32>,

    /// Maximum number of unpaired electrons (UHF) of the molecules.
    #[arg(long, value_name = "INT")]
    pub max_uhf: Option<u32>,

    /// Minimum number of atoms of the molecules.
    #[arg(long, value_name = "INT")]
    pub min_num_atoms: Option<usize>,

    /// Maximum number of atoms of the molecules.
    #[arg(long, value_name = "INT")]
    pub max_num_atoms: Option<usize>,

    /// Reaction definition file to evaluate (e.g. '.resRC' for the RC results).
    #[arg(long, value_name = "PATH")]
    pub res_file: Option<PathBuf>,

    /// Benchmark directory containing one subdirectory per molecule.
    #[arg(short = 'd', long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Fail with an error if reactions cannot be evaluated unexpectedly.
    #[arg(long)]
    pub strict: bool,

    /// Write the detailed results and the statistics to CSV files.
    #[arg(long)]
    pub write_csv: bool,

    /// Path to a configuration file in TOML format.
    /// Command-line options take precedence over its values.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
