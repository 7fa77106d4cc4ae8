//! Submission checking and leaderboard scoring against a labelled solution
//!
//! A valid submission ranks N events with every rank in `1..=N` used exactly
//! once, and all signal rows rank above all background rows. Scoring sums the
//! `KaggleWeight` of events predicted as signal, split by truth label and by
//! public (`b`) or private (`v`) subset.

use crate::ams::ams;
use crate::error::{HiggsError, Result};
use crate::event::{Event, Partition};
use crate::submission::{Class, Submission, SubmissionRow, SUBMISSION_HEADER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "EventId")]
    event_id: i64,
    #[serde(rename = "RankOrder")]
    rank: usize,
    #[serde(rename = "Class")]
    class: String,
}

/// Read a submission file and check its rows
pub fn read_submission<R: Read>(input: R) -> Result<Submission> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    if headers.iter().ne(SUBMISSION_HEADER.iter().copied()) {
        return Err(HiggsError::InvalidSubmission(format!(
            "expected header [{}], got [{}]",
            SUBMISSION_HEADER.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut rows = Vec::new();
    for (line, raw) in reader.deserialize::<RawRow>().enumerate() {
        let raw = raw?;
        let class = Class::from_code(&raw.class).ok_or_else(|| {
            HiggsError::InvalidSubmission(format!(
                "unrecognised label [{}] at line {}",
                raw.class,
                line + 2
            ))
        })?;
        rows.push(SubmissionRow {
            event_id: raw.event_id,
            rank: raw.rank,
            class,
        });
    }

    let submission = Submission::from(rows);
    validate_submission(&submission)?;
    debug!(rows = submission.len(), "read submission");
    Ok(submission)
}

/// Check rank density and the signal/background split
pub fn validate_submission(submission: &Submission) -> Result<()> {
    let n = submission.len();
    let mut seen = vec![false; n];
    let mut lowest_signal = None::<usize>;
    let mut largest_background = None::<usize>;

    for row in submission.rows() {
        if row.rank == 0 || row.rank > n {
            return Err(HiggsError::InvalidSubmission(format!(
                "RankOrder {} for event {} outside [1..{}]",
                row.rank, row.event_id, n
            )));
        }
        if std::mem::replace(&mut seen[row.rank - 1], true) {
            return Err(HiggsError::InvalidSubmission(format!(
                "RankOrder {} used more than once",
                row.rank
            )));
        }
        match row.class {
            Class::Signal => {
                lowest_signal = Some(lowest_signal.map_or(row.rank, |r| r.min(row.rank)));
            }
            Class::Background => {
                largest_background =
                    Some(largest_background.map_or(row.rank, |r| r.max(row.rank)));
            }
        }
    }

    if let (Some(sig), Some(bkg)) = (lowest_signal, largest_background) {
        if sig != bkg + 1 {
            return Err(HiggsError::InvalidSubmission(format!(
                "lowest signal rank {} is not directly above largest background rank {}",
                sig, bkg
            )));
        }
    }
    Ok(())
}

/// Signal and background weight selected in one leaderboard subset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LeaderboardScore {
    pub signal: f64,
    pub background: f64,
    pub ams: f64,
}

impl LeaderboardScore {
    fn finish(mut self) -> Self {
        self.ams = ams(self.signal, self.background);
        self
    }
}

/// Public and private leaderboard scores of a submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Leaderboard {
    pub public: LeaderboardScore,
    pub private: LeaderboardScore,
}

/// Score `submission` against the labelled `solution` events
pub fn leaderboard(submission: &Submission, solution: &[Event]) -> Result<Leaderboard> {
    let by_id: HashMap<i64, &Event> = solution.iter().map(|e| (e.event_id, e)).collect();
    let mut board = Leaderboard::default();

    for row in submission.rows() {
        let evt = by_id
            .get(&row.event_id)
            .ok_or(HiggsError::UnknownEvent { id: row.event_id })?;
        if row.class != Class::Signal {
            continue;
        }

        let subset = match evt.partition() {
            Partition::Public => &mut board.public,
            Partition::Private => &mut board.private,
            other => {
                warn!(id = evt.event_id, ?other, "signal row outside leaderboard subsets");
                continue;
            }
        };
        if evt.is_signal() {
            subset.signal += evt.kaggle_weight;
        } else if evt.is_background() {
            subset.background += evt.kaggle_weight;
        } else {
            return Err(HiggsError::InvalidSubmission(format!(
                "solution event {} has label [{}]",
                evt.event_id, evt.label
            )));
        }
    }

    board.public = board.public.finish();
    board.private = board.private.finish();
    Ok(board)
}
