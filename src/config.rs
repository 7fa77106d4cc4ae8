//! Run configuration threaded through the pipeline

use crate::cli::{Cli, OutputFormat};
use std::path::PathBuf;

/// What a run produces
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Rank and classify events into a submission file
    Predict {
        /// Read the cut-off from the trained-model file
        load_model: bool,
    },
    /// Summarise the AMS at the cut-off and write the trained-model file
    Train,
    /// Check a submission and score it against the labelled input
    Evaluate { submission: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub model: PathBuf,
    pub cutoff: f64,
    pub mode: Mode,
    pub format: OutputFormat,
}

impl RunConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let mode = match (cli.train, cli.evaluate) {
            (_, Some(submission)) => Mode::Evaluate { submission },
            (true, None) => Mode::Train,
            (false, None) => Mode::Predict {
                load_model: cli.load_model,
            },
        };
        Self {
            input: cli.input,
            output: cli.output,
            model: cli.model,
            cutoff: cli.cutoff,
            mode,
            format: cli.format,
        }
    }
}
