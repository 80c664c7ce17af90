use clap::{Args, Parser, Subcommand};
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
    about = "ljmc - a Metropolis Monte Carlo sampler for Lennard-Jones fluids in reduced units.",
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
    /// Run a Metropolis Monte Carlo simulation and report the energy trace.
    Run(RunArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Path to a TOML parameter file; the flags below override its values.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- State-point overrides ---
    /// Reduced temperature T*.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// Reduced density rho*.
    #[arg(short = 'd', long, value_name = "FLOAT")]
    pub density: Option<f64>,

    /// Number of particles.
    #[arg(short = 'n', long, value_name = "INT")]
    pub particles: Option<usize>,

    // --- Sampling overrides ---
    /// Number of trial moves.
    #[arg(short = 's', long, value_name = "INT")]
    pub steps: Option<usize>,

    /// Steps between trajectory samples and tuning decisions.
    #[arg(long, value_name = "INT")]
    pub tune_frequency: Option<usize>,

    /// Interaction cutoff radius.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Initial maximum trial displacement.
    #[arg(long, value_name = "FLOAT")]
    pub max_displacement: Option<f64>,

    /// Disable displacement tuning, overriding the config file.
    #[arg(long)]
    pub no_tune: bool,

    /// Initial-state construction method (only 'random' is supported).
    #[arg(long, value_name = "METHOD")]
    pub initial_state: Option<String>,

    /// Seed for the coordinator's random stream.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    // --- Output ---
    /// Write the energy trace as CSV to this path after the run.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub trace_output: Option<PathBuf>,

    /// Hide the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}
