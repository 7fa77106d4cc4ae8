// Training summary and submission evaluation through the binary

mod utils;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use utils::{labelled_csv, row, write, Row};

fn weighted(id: i64, mass: f64, label: &'static str, weight: f64) -> Row {
    Row {
        id,
        mass,
        weight,
        label,
        set: "b",
        kaggle_weight: weight,
    }
}

#[test]
fn test_train_writes_model_file() {
    let tmp = TempDir::new().unwrap();
    let input = write(
        &tmp,
        "train.csv",
        &labelled_csv(&[
            weighted(1, 125.0, "s", 10.0),
            weighted(2, 120.0, "b", 100.0),
            weighted(3, 300.0, "b", 500.0),
        ]),
    );
    let model = tmp.path().join("model.txt");

    let mut cmd = Command::cargo_bin("higgsml").unwrap();
    cmd.arg("--train").arg("--model").arg(&model).arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("AMS with recomputed weight"));

    let text = fs::read_to_string(&model).unwrap();
    let expected = higgsml::ams::ams(10.0, 100.0);
    assert_eq!(text, format!("cut-off=-22\nams={}\n", expected));
}

#[test]
fn test_predict_with_loaded_model_cutoff() {
    let tmp = TempDir::new().unwrap();
    let input = write(
        &tmp,
        "data.csv",
        &labelled_csv(&[row(1, 125.0, "s", "b"), row(2, 128.0, "b", "b")]),
    );
    let model = write(&tmp, "model.txt", "cut-off=-1\nams=0.5\n");
    let output = tmp.path().join("out.csv");

    let mut cmd = Command::cargo_bin("higgsml").unwrap();
    cmd.arg("--load-model")
        .arg("--model")
        .arg(&model)
        .arg(&input)
        .arg(&output);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cut-off=-1"));

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, "EventId,RankOrder,Class\n2,1,b\n1,2,s\n");
}

#[test]
fn test_evaluate_reports_both_leaderboards() {
    let tmp = TempDir::new().unwrap();
    let solution = write(
        &tmp,
        "solution.csv",
        &labelled_csv(&[
            row(1, 125.0, "s", "b"),
            row(2, 126.0, "b", "v"),
            row(3, 180.0, "b", "b"),
        ]),
    );
    let submission = write(
        &tmp,
        "sub.csv",
        "EventId,RankOrder,Class\n3,1,b\n2,2,s\n1,3,s\n",
    );

    let mut cmd = Command::cargo_bin("higgsml").unwrap();
    cmd.arg("--evaluate").arg(&submission).arg(&solution);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("is valid (3 rows)"))
        .stdout(predicate::str::contains("Public leaderboard: AMS = 0 signal = 1"))
        .stdout(predicate::str::contains(
            "Private leaderboard: AMS = 0 signal = 0, background = 1",
        ));
}

#[test]
fn test_evaluate_rejects_duplicate_ranks() {
    let tmp = TempDir::new().unwrap();
    let solution = write(
        &tmp,
        "solution.csv",
        &labelled_csv(&[row(1, 125.0, "s", "b"), row(2, 126.0, "b", "b")]),
    );
    let submission = write(&tmp, "sub.csv", "EventId,RankOrder,Class\n1,1,b\n2,1,s\n");

    let mut cmd = Command::cargo_bin("higgsml").unwrap();
    cmd.arg("--evaluate").arg(&submission).arg(&solution);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("used more than once"));
}
