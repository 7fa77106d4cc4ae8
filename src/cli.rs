//! CLI argument parsing for higgsml

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the run report printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "higgsml")]
#[command(version)]
#[command(about = "Mass-window score, AMS and Kaggle submission for the ATLAS Higgs dataset", long_about = None)]
pub struct Cli {
    /// Event data file (solution file with --evaluate)
    #[arg(value_name = "INPUT", default_value = "atlas-higgs-challenge-2014-v2.csv")]
    pub input: PathBuf,

    /// Submission file to write
    #[arg(value_name = "OUTPUT", default_value = "submission.csv")]
    pub output: PathBuf,

    /// Cut-off on the score above which an event is classified as signal
    #[arg(
        long = "cut",
        value_name = "VALUE",
        default_value = "-22.0",
        allow_negative_numbers = true
    )]
    pub cutoff: f64,

    /// Compute the AMS summary and write the trained-model file instead of a submission
    #[arg(long = "train", conflicts_with = "evaluate")]
    pub train: bool,

    /// Trained-model file (written with --train, read with --load-model)
    #[arg(long = "model", value_name = "PATH", default_value = "higgsml-model.txt")]
    pub model: PathBuf,

    /// Take the cut-off from the trained-model file instead of --cut
    #[arg(long = "load-model", conflicts_with_all = ["train", "evaluate"])]
    pub load_model: bool,

    /// Check and score a submission file against INPUT
    #[arg(long = "evaluate", value_name = "SUBMISSION")]
    pub evaluate: Option<PathBuf>,

    /// Report format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
