//! higgsml - mass-window analysis of the ATLAS Higgs ML challenge dataset
//!
//! This library decodes the challenge CSV into typed events, scores each
//! event by its distance from the Higgs mass, computes the Approximate Median
//! Significance (AMS) at a cut-off, and builds ranked Kaggle submissions.

pub mod ams;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod error;
pub mod evaluate;
pub mod event;
pub mod pipeline;
pub mod ranker;
pub mod schema;
pub mod scorer;
pub mod submission;
pub mod summary;

pub use error::{HiggsError, Result};
