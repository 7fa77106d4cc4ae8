//! Kaggle submission rows: `EventId,RankOrder,Class`
//!
//! Only events in the public (`b`) or private (`v`) subsets are submitted.
//! Events decoded from files without the metadata group carry no subset tag
//! and are always submitted.

use crate::error::Result;
use crate::event::{Event, Partition};
use crate::ranker::{Ranking, ScoredId};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, info};

/// Header of a submission file
pub const SUBMISSION_HEADER: [&str; 3] = ["EventId", "RankOrder", "Class"];

/// Default cut-off on the mass-window score
pub const DEFAULT_CUTOFF: f64 = -22.0;

/// Predicted class of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Class {
    #[serde(rename = "s")]
    Signal,
    #[serde(rename = "b")]
    Background,
}

impl Class {
    /// Signal when `score` is strictly above `cutoff`
    pub fn classify(score: f64, cutoff: f64) -> Self {
        if score > cutoff {
            Class::Signal
        } else {
            Class::Background
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Class::Signal => "s",
            Class::Background => "b",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "s" => Some(Class::Signal),
            "b" => Some(Class::Background),
            _ => None,
        }
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRow {
    #[serde(rename = "EventId")]
    pub event_id: i64,
    #[serde(rename = "RankOrder")]
    pub rank: usize,
    #[serde(rename = "Class")]
    pub class: Class,
}

/// Whether an event belongs in the submission
pub fn is_eligible(evt: &Event) -> bool {
    matches!(
        evt.partition(),
        Partition::Public | Partition::Private | Partition::Untagged
    )
}

/// Builds ranked, classified rows from scored events
#[derive(Debug, Clone, Copy)]
pub struct SubmissionBuilder {
    cutoff: f64,
}

impl SubmissionBuilder {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Rank the eligible events and classify each against the cut-off.
    ///
    /// Rows come out in ascending rank order.
    pub fn build(&self, events: &[Event]) -> Result<Submission> {
        let eligible: Vec<ScoredId> = events
            .iter()
            .filter(|evt| is_eligible(evt))
            .map(ScoredId::from)
            .collect();
        debug!(
            eligible = eligible.len(),
            total = events.len(),
            "selected submission events"
        );

        let ranking = Ranking::new(eligible);
        let total = ranking.len();
        let mut rows = Vec::with_capacity(total);
        for (index, entry) in ranking.ordered().iter().enumerate() {
            let rank = ranking.checked_rank(index, entry.id, total)?;
            rows.push(SubmissionRow {
                event_id: entry.id,
                rank,
                class: Class::classify(entry.score, self.cutoff),
            });
        }

        Ok(Submission { rows })
    }
}

impl Default for SubmissionBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF)
    }
}

/// Ordered submission rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    rows: Vec<SubmissionRow>,
}

impl Submission {
    pub fn rows(&self) -> &[SubmissionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows classified as signal
    pub fn signal_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.class == Class::Signal)
            .count()
    }

    /// Write the header and every row as CSV
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        writer.write_record(SUBMISSION_HEADER)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        info!(rows = self.rows.len(), "wrote submission");
        Ok(())
    }

    /// Render the submission as a CSV string
    pub fn to_csv(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl From<Vec<SubmissionRow>> for Submission {
    fn from(rows: Vec<SubmissionRow>) -> Self {
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: i64, score: f64, set: &str) -> Event {
        Event {
            event_id: id,
            score,
            kaggle_set: set.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_is_strictly_greater() {
        assert_eq!(Class::classify(5.0, -22.0), Class::Signal);
        assert_eq!(Class::classify(-30.0, -22.0), Class::Background);
        assert_eq!(Class::classify(-22.0, -22.0), Class::Background);
    }

    #[test]
    fn test_class_codes() {
        assert_eq!(Class::Signal.to_string(), "s");
        assert_eq!(Class::from_code("b"), Some(Class::Background));
        assert_eq!(Class::from_code("x"), None);
    }

    #[test]
    fn test_eligibility_by_partition() {
        assert!(is_eligible(&scored(1, 0.0, "b")));
        assert!(is_eligible(&scored(1, 0.0, "v")));
        assert!(is_eligible(&scored(1, 0.0, "")));
        assert!(!is_eligible(&scored(1, 0.0, "t")));
        assert!(!is_eligible(&scored(1, 0.0, "u")));
    }

    #[test]
    fn test_build_ranks_only_eligible_events() {
        let events = vec![
            scored(1, -30.0, "b"),
            scored(2, -1.0, "t"),
            scored(3, -5.0, "v"),
            scored(4, -40.0, "u"),
            scored(5, -50.0, "b"),
        ];
        let submission = SubmissionBuilder::new(-22.0).build(&events).unwrap();
        assert_eq!(
            submission.rows(),
            &[
                SubmissionRow {
                    event_id: 5,
                    rank: 1,
                    class: Class::Background
                },
                SubmissionRow {
                    event_id: 1,
                    rank: 2,
                    class: Class::Background
                },
                SubmissionRow {
                    event_id: 3,
                    rank: 3,
                    class: Class::Signal
                },
            ]
        );
        assert_eq!(submission.signal_count(), 1);
    }

    #[test]
    fn test_untagged_events_all_submitted() {
        let events = vec![scored(7, 0.0, ""), scored(8, -25.0, "")];
        let submission = SubmissionBuilder::default().build(&events).unwrap();
        assert_eq!(submission.len(), 2);
        assert_eq!(submission.rows()[0].event_id, 8);
    }

    #[test]
    fn test_csv_rendering() {
        let events = vec![scored(100, -25.0, "b"), scored(101, 0.0, "b")];
        let csv = SubmissionBuilder::new(-22.0)
            .build(&events)
            .unwrap()
            .to_csv()
            .unwrap();
        assert_eq!(csv, "EventId,RankOrder,Class\n100,1,b\n101,2,s\n");
    }

    #[test]
    fn test_empty_submission_still_has_header() {
        let csv = Submission::default().to_csv().unwrap();
        assert_eq!(csv, "EventId,RankOrder,Class\n");
    }
}
