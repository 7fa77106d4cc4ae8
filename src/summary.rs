//! Training-mode summary and the trained-model file
//!
//! The summary sums event weights passing the cut-off, split by truth label,
//! over the public subset. Weights are renormalised by the ratio of the full
//! sample to the subset before computing the AMS, and the AMS from the
//! precomputed `KaggleWeight` column is reported next to it.
//!
//! The trained-model file is two plain text lines:
//!
//! ```text
//! cut-off=-22
//! ams=1.5445097433615331
//! ```

use crate::ams::ams;
use crate::error::{HiggsError, Result};
use crate::event::{Event, Partition};
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::debug;

/// Weight sums collected over one pass of the dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WeightSums {
    pub all_sig: f64,
    pub all_bkg: f64,
    pub sub_sig: f64,
    pub sub_bkg: f64,
    pub sel_sig: f64,
    pub sel_bkg: f64,
    pub sel_kaggle_sig: f64,
    pub sel_kaggle_bkg: f64,
}

impl WeightSums {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum every event against `cutoff`
    pub fn accumulate(events: &[Event], cutoff: f64) -> Self {
        let mut sums = Self::new();
        for evt in events {
            sums.add(evt, cutoff);
        }
        sums
    }

    /// Add one scored event
    pub fn add(&mut self, evt: &Event, cutoff: f64) {
        if evt.is_signal() {
            self.all_sig += evt.weight;
        } else {
            self.all_bkg += evt.weight;
        }

        if !matches!(evt.partition(), Partition::Public | Partition::Untagged) {
            return;
        }

        if evt.is_signal() {
            self.sub_sig += evt.weight;
        } else {
            self.sub_bkg += evt.weight;
        }

        if evt.score <= cutoff {
            return;
        }
        if evt.is_signal() {
            self.sel_sig += evt.weight;
            self.sel_kaggle_sig += evt.kaggle_weight;
        } else if evt.is_background() {
            self.sel_bkg += evt.weight;
            self.sel_kaggle_bkg += evt.kaggle_weight;
        }
    }

    /// Selected signal weight scaled from the subset to the full sample
    pub fn recomputed_signal(&self) -> f64 {
        renormalize(self.sel_sig, self.all_sig, self.sub_sig)
    }

    /// Selected background weight scaled from the subset to the full sample
    pub fn recomputed_background(&self) -> f64 {
        renormalize(self.sel_bkg, self.all_bkg, self.sub_bkg)
    }

    pub fn ams_recomputed(&self) -> f64 {
        ams(self.recomputed_signal(), self.recomputed_background())
    }

    pub fn ams_kaggle(&self) -> f64 {
        ams(self.sel_kaggle_sig, self.sel_kaggle_bkg)
    }
}

fn renormalize(selected: f64, all: f64, subset: f64) -> f64 {
    if subset == 0.0 {
        return 0.0;
    }
    selected * all / subset
}

/// Result of a training run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingSummary {
    pub cutoff: f64,
    pub ams: f64,
    pub ams_kaggle: f64,
    pub signal: f64,
    pub background: f64,
    pub sums: WeightSums,
}

impl TrainingSummary {
    pub fn from_events(events: &[Event], cutoff: f64) -> Self {
        let sums = WeightSums::accumulate(events, cutoff);
        let summary = Self {
            cutoff,
            ams: sums.ams_recomputed(),
            ams_kaggle: sums.ams_kaggle(),
            signal: sums.recomputed_signal(),
            background: sums.recomputed_background(),
            sums,
        };
        debug!(?summary, "training summary");
        summary
    }

    /// Write the `cut-off=`/`ams=` model file
    pub fn write_model<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "cut-off={}", self.cutoff)?;
        writeln!(out, "ams={}", self.ams)?;
        out.flush()?;
        Ok(())
    }
}

/// Parameters recovered from a trained-model file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainedModel {
    pub cutoff: f64,
    pub ams: Option<f64>,
}

impl TrainedModel {
    /// Parse a model file. Unknown keys are ignored; `cut-off` is required
    /// and must be finite.
    pub fn read<R: BufRead>(input: R) -> Result<Self> {
        let mut cutoff = None;
        let mut ams = None;

        for (lineno, line) in input.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(HiggsError::InvalidModel(format!(
                    "line {}: expected key=value, got [{}]",
                    lineno + 1,
                    line
                )));
            };
            let parse = |v: &str| {
                v.trim().parse::<f64>().map_err(|e| {
                    HiggsError::InvalidModel(format!("line {}: {}: {}", lineno + 1, key, e))
                })
            };
            match key.trim() {
                "cut-off" => cutoff = Some(parse(value)?),
                "ams" => ams = Some(parse(value)?),
                _ => {}
            }
        }

        let cutoff =
            cutoff.ok_or_else(|| HiggsError::InvalidModel("missing cut-off".to_string()))?;
        if !cutoff.is_finite() {
            return Err(HiggsError::InvalidModel(format!(
                "cut-off must be finite, got {}",
                cutoff
            )));
        }
        Ok(Self { cutoff, ams })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evt(label: &str, set: &str, weight: f64, kaggle_weight: f64, score: f64) -> Event {
        Event {
            label: label.to_string(),
            kaggle_set: set.to_string(),
            weight,
            kaggle_weight,
            score,
            ..Default::default()
        }
    }

    #[test]
    fn test_sums_split_by_label_and_subset() {
        let events = vec![
            evt("s", "b", 1.0, 2.0, 0.0),
            evt("b", "b", 3.0, 6.0, 0.0),
            evt("b", "b", 5.0, 10.0, -30.0),
            evt("s", "t", 7.0, 14.0, 0.0),
        ];
        let sums = WeightSums::accumulate(&events, -22.0);
        assert_eq!(sums.all_sig, 8.0);
        assert_eq!(sums.all_bkg, 8.0);
        assert_eq!(sums.sub_sig, 1.0);
        assert_eq!(sums.sub_bkg, 8.0);
        assert_eq!(sums.sel_sig, 1.0);
        assert_eq!(sums.sel_bkg, 3.0);
        assert_eq!(sums.sel_kaggle_sig, 2.0);
        assert_eq!(sums.sel_kaggle_bkg, 6.0);
        assert_eq!(sums.recomputed_signal(), 8.0);
        assert_eq!(sums.recomputed_background(), 3.0);
    }

    #[test]
    fn test_cutoff_is_exclusive() {
        let events = vec![evt("s", "b", 1.0, 1.0, -22.0)];
        let sums = WeightSums::accumulate(&events, -22.0);
        assert_eq!(sums.sel_sig, 0.0);
        assert_eq!(sums.sub_sig, 1.0);
    }

    #[test]
    fn test_untagged_events_form_the_subset() {
        let events = vec![evt("", "", 4.0, 0.0, 0.0)];
        let sums = WeightSums::accumulate(&events, -22.0);
        // no label counts as background for the totals, but is never selected
        assert_eq!(sums.all_bkg, 4.0);
        assert_eq!(sums.sub_bkg, 4.0);
        assert_eq!(sums.sel_bkg, 0.0);
    }

    #[test]
    fn test_empty_subset_renormalizes_to_zero() {
        let sums = WeightSums::accumulate(&[evt("s", "t", 1.0, 1.0, 0.0)], -22.0);
        assert_eq!(sums.recomputed_signal(), 0.0);
        assert_eq!(sums.ams_recomputed(), 0.0);
    }

    #[test]
    fn test_summary_matches_ams_of_recomputed_sums() {
        let events = vec![
            evt("s", "b", 10.0, 10.0, 0.0),
            evt("b", "b", 100.0, 100.0, 0.0),
        ];
        let summary = TrainingSummary::from_events(&events, -22.0);
        assert_eq!(summary.signal, 10.0);
        assert_eq!(summary.background, 100.0);
        assert_eq!(summary.ams, ams(10.0, 100.0));
        assert_eq!(summary.ams_kaggle, summary.ams);
    }

    #[test]
    fn test_model_file_format() {
        let summary = TrainingSummary::from_events(&[], -22.0);
        let mut buf = Vec::new();
        summary.write_model(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "cut-off=-22\nams=0\n");
    }

    #[test]
    fn test_read_model_file() {
        let model = TrainedModel::read("cut-off=-17.5\nams=1.25\n".as_bytes()).unwrap();
        assert_eq!(model.cutoff, -17.5);
        assert_eq!(model.ams, Some(1.25));
    }

    #[test]
    fn test_read_model_ignores_unknown_keys() {
        let model = TrainedModel::read("note=hi\n\ncut-off=3\n".as_bytes()).unwrap();
        assert_eq!(model.cutoff, 3.0);
        assert_eq!(model.ams, None);
    }

    #[test]
    fn test_read_model_requires_cutoff() {
        let err = TrainedModel::read("ams=1.0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, HiggsError::InvalidModel(_)));
    }

    #[test]
    fn test_read_model_rejects_non_finite_cutoff() {
        for text in ["cut-off=NaN\n", "cut-off=inf\n", "cut-off=-inf\nams=1\n"] {
            let err = TrainedModel::read(text.as_bytes()).unwrap_err();
            assert!(err.to_string().contains("must be finite"), "{}", text);
        }
    }

    #[test]
    fn test_read_model_rejects_garbage() {
        assert!(TrainedModel::read("cut-off\n".as_bytes()).is_err());
        assert!(TrainedModel::read("cut-off=abc\n".as_bytes()).is_err());
    }
}
