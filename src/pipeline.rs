//! End-to-end runs: decode, score, then summarise, submit or evaluate

use crate::cli::OutputFormat;
use crate::config::{Mode, RunConfig};
use crate::decoder::Decoder;
use crate::evaluate::{self, Leaderboard};
use crate::event::Event;
use crate::scorer;
use crate::submission::SubmissionBuilder;
use crate::summary::{TrainedModel, TrainingSummary};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct TrainReport {
    pub input: PathBuf,
    pub events: usize,
    pub model: PathBuf,
    pub summary: TrainingSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictReport {
    pub input: PathBuf,
    pub events: usize,
    pub output: PathBuf,
    pub cutoff: f64,
    pub submitted: usize,
    pub signal: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluateReport {
    pub solution: PathBuf,
    pub submission: PathBuf,
    pub rows: usize,
    pub leaderboard: Leaderboard,
}

/// Outcome of one run, printed to stdout
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Report {
    Train(TrainReport),
    Predict(PredictReport),
    Evaluate(EvaluateReport),
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        match self {
            Report::Train(r) => {
                let s = &r.summary;
                format!(
                    "::: {} events from [{}]\n\
                     ::: AMS with recomputed weight: {} (sig={}, bkg={})\n\
                     ::: AMS with kaggle weight: {} (sig={}, bkg={})\n\
                     ::: cut-off={} ams={} written to [{}]\n",
                    r.events,
                    r.input.display(),
                    s.ams,
                    s.signal,
                    s.background,
                    s.ams_kaggle,
                    s.sums.sel_kaggle_sig,
                    s.sums.sel_kaggle_bkg,
                    s.cutoff,
                    s.ams,
                    r.model.display()
                )
            }
            Report::Predict(r) => format!(
                "::: {} events from [{}]\n\
                 ::: submission [{}]: {} rows, {} signal (cut-off={})\n",
                r.events,
                r.input.display(),
                r.output.display(),
                r.submitted,
                r.signal,
                r.cutoff
            ),
            Report::Evaluate(r) => {
                let b = &r.leaderboard;
                format!(
                    "::: [{}] is valid ({} rows)\n\
                     Public leaderboard: AMS = {} signal = {}, background = {}\n\
                     Private leaderboard: AMS = {} signal = {}, background = {}\n",
                    r.submission.display(),
                    r.rows,
                    b.public.ams,
                    b.public.signal,
                    b.public.background,
                    b.private.ams,
                    b.private.signal,
                    b.private.background
                )
            }
        }
    }
}

/// Execute the run described by `config`
pub fn run(config: &RunConfig) -> Result<Report> {
    match &config.mode {
        Mode::Train => train(config),
        Mode::Predict { load_model } => predict(config, *load_model),
        Mode::Evaluate { submission } => evaluate_submission(config, submission),
    }
}

/// Decode every event in `path` and attach its score
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    info!("read data file [{}]", path.display());
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut events = Decoder::new(BufReader::new(file))
        .decode_all()
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    scorer::score_all(&mut events);
    info!(events = events.len(), "decoded and scored dataset");
    Ok(events)
}

fn train(config: &RunConfig) -> Result<Report> {
    let events = load_events(&config.input)?;

    info!("determine the AMS, using threshold={}", config.cutoff);
    let summary = TrainingSummary::from_events(&events, config.cutoff);
    info!(
        ams = summary.ams,
        ams_kaggle = summary.ams_kaggle,
        "AMS at cut-off"
    );

    let file = File::create(&config.model)
        .with_context(|| format!("Failed to create {}", config.model.display()))?;
    summary
        .write_model(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", config.model.display()))?;

    Ok(Report::Train(TrainReport {
        input: config.input.clone(),
        events: events.len(),
        model: config.model.clone(),
        summary,
    }))
}

fn predict(config: &RunConfig, load_model: bool) -> Result<Report> {
    let cutoff = if load_model {
        let file = File::open(&config.model)
            .with_context(|| format!("Failed to open {}", config.model.display()))?;
        let model = TrainedModel::read(BufReader::new(file))
            .with_context(|| format!("Failed to read {}", config.model.display()))?;
        info!(cutoff = model.cutoff, "loaded cut-off from trained model");
        model.cutoff
    } else {
        config.cutoff
    };

    let events = load_events(&config.input)?;
    let builder = SubmissionBuilder::new(cutoff);
    let submission = builder.build(&events)?;

    info!(
        cutoff = builder.cutoff(),
        "building submission file [{}]",
        config.output.display()
    );
    let file = File::create(&config.output)
        .with_context(|| format!("Failed to create {}", config.output.display()))?;
    let mut out = BufWriter::new(file);
    submission
        .write_csv(&mut out)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    out.flush()?;
    out.get_ref().sync_all()?;

    Ok(Report::Predict(PredictReport {
        input: config.input.clone(),
        events: events.len(),
        output: config.output.clone(),
        cutoff: builder.cutoff(),
        submitted: submission.len(),
        signal: submission.signal_count(),
    }))
}

fn evaluate_submission(config: &RunConfig, submission_path: &Path) -> Result<Report> {
    let solution = load_events(&config.input)?;

    info!("reading submission [{}]", submission_path.display());
    let file = File::open(submission_path)
        .with_context(|| format!("Failed to open {}", submission_path.display()))?;
    let submission = evaluate::read_submission(BufReader::new(file))
        .with_context(|| format!("Invalid submission {}", submission_path.display()))?;
    let leaderboard = evaluate::leaderboard(&submission, &solution)?;

    Ok(Report::Evaluate(EvaluateReport {
        solution: config.input.clone(),
        submission: submission_path.to_path_buf(),
        rows: submission.len(),
        leaderboard,
    }))
}
