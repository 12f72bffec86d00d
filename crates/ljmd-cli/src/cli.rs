use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "ljmd - Velocity-Verlet molecular dynamics for small Lennard-Jones clusters.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and the progress bar
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a molecular dynamics simulation and write its trajectory.
    Run(RunArgs),
    /// Print the default configuration file in TOML format.
    Defaults,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    // --- Files ---
    /// Path to the input particle file (`N` followed by `[label] x y z mass` records).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the trajectory output. Defaults to the input path with a `.out` extension.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write per-step energies to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub energy_log: Option<PathBuf>,

    /// Save the final particle configuration in the input file format.
    #[arg(long, value_name = "PATH")]
    pub final_config: Option<PathBuf>,

    // --- Force Field Overrides ---
    /// Override the Lennard-Jones well depth.
    #[arg(long, value_name = "FLOAT")]
    pub epsilon: Option<f64>,

    /// Override the Lennard-Jones length scale.
    #[arg(long, value_name = "FLOAT")]
    pub sigma: Option<f64>,

    /// Override the distance floor applied before evaluating pair forces.
    #[arg(long, value_name = "FLOAT")]
    pub r_min: Option<f64>,

    // --- Integration Overrides ---
    /// Override the integration time step.
    #[arg(long, value_name = "FLOAT")]
    pub dt: Option<f64>,

    /// Override the number of integration steps.
    #[arg(short = 'n', long = "steps", value_name = "INT")]
    pub total_steps: Option<usize>,

    // --- Output Overrides ---
    /// Override how often (in steps) a trajectory snapshot is written.
    #[arg(short, long, value_name = "INT")]
    pub write_frequency: Option<usize>,

    /// Override how often (in steps) progress is reported.
    #[arg(long, value_name = "INT")]
    pub progress_interval: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S integration.dt=0.1
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
