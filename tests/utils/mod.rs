// Shared fixtures for the integration tests
//
// Builds small challenge-format CSV files in a temporary directory

#![allow(dead_code)]

use higgsml::schema;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Feature columns after DER_mass_MMC, taken from event 100000 of the open data
pub const FEATURES_TAIL: &str = "51.655,97.827,27.98,0.91,124.711,2.666,3.064,41.928,\
197.76,1.582,1.396,0.2,32.638,1.017,0.381,51.626,2.273,-2.414,\
16.824,-0.277,258.733,2,67.435,2.15,0.444,46.062,1.24,-2.475,113.497";

/// One labelled row of a fixture file
pub struct Row {
    pub id: i64,
    pub mass: f64,
    pub weight: f64,
    pub label: &'static str,
    pub set: &'static str,
    pub kaggle_weight: f64,
}

pub fn row(id: i64, mass: f64, label: &'static str, set: &'static str) -> Row {
    Row {
        id,
        mass,
        weight: 1.0,
        label,
        set,
        kaggle_weight: 1.0,
    }
}

/// Labelled file with the full header
pub fn labelled_csv(rows: &[Row]) -> String {
    let mut text = schema::header_line();
    text.push('\n');
    for r in rows {
        text.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            r.id, r.mass, FEATURES_TAIL, r.weight, r.label, r.set, r.kaggle_weight
        ));
    }
    text
}

/// Unlabelled file: id and feature columns only
pub fn unlabelled_csv(masses: &[(i64, f64)]) -> String {
    let mut text = schema::names()
        .take(schema::MANDATORY_COLUMNS)
        .collect::<Vec<_>>()
        .join(",");
    text.push('\n');
    for (id, mass) in masses {
        text.push_str(&format!("{},{},{}\n", id, mass, FEATURES_TAIL));
    }
    text
}

pub fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}
