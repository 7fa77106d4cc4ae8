//! Error taxonomy for decoding, ranking and evaluation

use thiserror::Error;

/// Errors that can occur while processing an event dataset
#[derive(Error, Debug)]
pub enum HiggsError {
    #[error("header field #{position}: expected [{expected}], got [{actual}]")]
    SchemaMismatch {
        position: usize,
        expected: String,
        actual: String,
    },

    #[error("row {row}: cannot parse field {field} from [{value}]: {reason}")]
    Parse {
        row: u64,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("row {row}: expected at least {expected} columns, got {actual}")]
    MissingColumns {
        row: u64,
        expected: usize,
        actual: usize,
    },

    #[error("event id {id} not in rank map")]
    UnknownEvent { id: i64 },

    #[error("rank {rank} for entry #{index} (id={id}) exceeds record count {total}")]
    RankOutOfRange {
        index: usize,
        id: i64,
        rank: usize,
        total: usize,
    },

    #[error("Invalid model file: {0}")]
    InvalidModel(String),

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, HiggsError>;
