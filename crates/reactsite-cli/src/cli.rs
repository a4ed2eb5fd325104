use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Reactsite Developers",
    version,
    about = "Reactsite CLI - rank the nucleophilic and electrophilic reactive sites of small molecules from their 3D structure.",
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

    /// Set the number of threads for batch analysis.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify the reactive sites of a single molecule.
    Analyze(AnalyzeArgs),
    /// Classify the reactive sites of every record in a multi-record SD file.
    Batch(BatchArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The full report as JSON.
    #[default]
    Json,
    /// The ranked site table as CSV.
    Csv,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the input molfile, or to a JSON request with `--json-request`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Treat the input as a JSON request body (`{"sdf": ..., "metadata": ...}`).
    #[arg(long, conflicts_with = "metadata")]
    pub json_request: bool,

    /// Write the result here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// JSON object echoed back unchanged in the report's `metadata` field.
    #[arg(short, long, value_name = "JSON")]
    pub metadata: Option<String>,

    /// Save the prepared structure (including any generated conformer) as a molfile.
    #[arg(long, value_name = "PATH")]
    pub write_structure: Option<PathBuf>,

    #[command(flatten)]
    pub settings: AnalysisSettingsArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Path to the multi-record SD file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Write the JSON array here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON object attached to every record's report.
    #[arg(short, long, value_name = "JSON")]
    pub metadata: Option<String>,

    #[command(flatten)]
    pub settings: AnalysisSettingsArgs,
}

/// Configuration sources and overrides shared by every analysis command.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisSettingsArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Classifier Overrides ---
    /// Override the partial-charge magnitude above which a centre counts as strongly polarised.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub polarity_threshold: Option<f64>,

    // --- Charge Overrides ---
    /// Override the number of Gasteiger equalization iterations.
    #[arg(long, value_name = "INT")]
    pub charge_iterations: Option<usize>,

    /// Override the Gasteiger parameter file (`.toml` or `.csv`).
    #[arg(long, value_name = "PATH")]
    pub charge_params: Option<PathBuf>,

    // --- Conformer Overrides ---
    /// Override the random seed used when a conformer has to be generated.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Skip the molecular descriptors and report an empty `properties` object.
    #[arg(long)]
    pub skip_descriptors: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S classifier.polarity-threshold=0.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
