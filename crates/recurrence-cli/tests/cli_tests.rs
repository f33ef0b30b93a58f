//! Integration tests for the `recur` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run each subcommand through the
//! actual binary, covering stdin/stdout piping, file I/O, configuration and
//! error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn recur() -> Command {
    Command::cargo_bin("recur").expect("recur binary must build")
}

/// Helper: run a command and parse its stdout as a JSON array.
fn json_array(cmd: &mut Command) -> Vec<Value> {
    let output = cmd.assert().success().get_output().stdout.clone();
    let value: Value = serde_json::from_slice(&output).expect("stdout must be JSON");
    value.as_array().expect("stdout must be a JSON array").clone()
}

fn field<'a>(items: &'a [Value], key: &str) -> Vec<&'a str> {
    items.iter().map(|v| v[key].as_str().unwrap()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// expand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn expand_skips_months_without_the_31st() {
    let items = json_array(recur().args(["expand", "-i", &fixture("monthly_31st.json")]));

    assert_eq!(field(&items, "date"), vec!["2024-01-31", "2024-03-31", "2024-05-31"]);
    assert_eq!(field(&items, "id"), vec!["rent", "rent-2", "rent-4"]);
    assert!(items.iter().all(|v| v["seriesId"] == "rent"));
    assert!(items.iter().all(|v| v["notificationTime"] == 60));
}

#[test]
fn expand_reads_stdin() {
    let input = std::fs::read_to_string(fixture("monthly_31st.json")).unwrap();
    let items = json_array(recur().arg("expand").write_stdin(input));
    assert_eq!(items.len(), 3);
}

#[test]
fn expand_limit_keeps_first_occurrence() {
    let items = json_array(recur().args([
        "expand",
        "-i",
        &fixture("monthly_31st.json"),
        "--limit",
        "1",
    ]));
    assert_eq!(field(&items, "date"), vec!["2024-01-31"]);
}

#[test]
fn expand_unbounded_needs_horizon() {
    recur()
        .args(["expand", "-i", &fixture("unbounded_monthly.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("horizon"));
}

#[test]
fn expand_unbounded_with_horizon_flag() {
    let items = json_array(recur().args([
        "expand",
        "-i",
        &fixture("unbounded_monthly.json"),
        "--horizon",
        "2025-06-30",
    ]));
    assert_eq!(items.len(), 6);
    assert_eq!(items[5]["date"], "2025-06-01");
}

#[test]
fn expand_unbounded_with_config_file() {
    let items = json_array(recur().args([
        "expand",
        "-i",
        &fixture("unbounded_monthly.json"),
        "--config",
        &fixture("recur.toml"),
    ]));
    assert_eq!(items.len(), 6);
}

#[test]
fn expand_warns_when_truncated() {
    recur()
        .args([
            "expand",
            "-i",
            &fixture("unbounded_monthly.json"),
            "--config",
            &fixture("recur.toml"),
            "--max-attempts",
            "2",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("truncated after 3 occurrences"));
}

#[test]
fn expand_rejects_bad_horizon() {
    recur()
        .args([
            "expand",
            "-i",
            &fixture("unbounded_monthly.json"),
            "--horizon",
            "2025-02-30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --horizon"));
}

#[test]
fn expand_rejects_zero_interval() {
    let input = r#"{"id":"x","title":"t","date":"2024-01-01","startTime":"09:00",
        "endTime":"10:00","repeat":{"type":"daily","interval":0}}"#;
    recur()
        .arg("expand")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval must be at least 1"));
}

#[test]
fn expand_writes_output_file() {
    let dir = std::env::temp_dir().join(format!("recur-cli-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("occurrences.json");

    recur()
        .args(["expand", "-i", &fixture("monthly_31st.json"), "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written.as_array().unwrap().len(), 3);
    std::fs::remove_dir_all(&dir).ok();
}

// ─────────────────────────────────────────────────────────────────────────────
// detach / remove / remove-series
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn detach_resets_repeat_and_series() {
    let series: Value =
        serde_json::from_str(&std::fs::read_to_string(fixture("weekly_series.json")).unwrap())
            .unwrap();
    let second = series[1].to_string();

    let output = recur()
        .arg("detach")
        .write_stdin(second)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let detached: Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(detached["repeat"], serde_json::json!({ "type": "none", "interval": 1 }));
    assert!(detached.get("seriesId").is_none());
    assert_eq!(detached["id"], "1-1");
    assert_eq!(detached["date"], "2025-01-08");
    assert_eq!(detached["title"], "Weekly meeting");
}

#[test]
fn remove_drops_one_occurrence() {
    let items = json_array(recur().args([
        "remove",
        "--id",
        "1-1",
        "-i",
        &fixture("weekly_series.json"),
    ]));
    assert_eq!(field(&items, "id"), vec!["1", "2", "1-2"]);
}

#[test]
fn remove_unknown_id_is_a_no_op() {
    let items = json_array(recur().args([
        "remove",
        "--id",
        "nope",
        "-i",
        &fixture("weekly_series.json"),
    ]));
    assert_eq!(items.len(), 4);
}

#[test]
fn remove_series_keeps_unrelated_events() {
    let items = json_array(recur().args([
        "remove-series",
        "--series",
        "1",
        "-i",
        &fixture("weekly_series.json"),
    ]));
    assert_eq!(field(&items, "id"), vec!["2"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// check-date
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_date_reports_validity() {
    recur()
        .args(["check-date", "2024", "2", "29"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-29: valid"))
        .stdout(predicate::str::contains("leap year: yes"));

    recur()
        .args(["check-date", "2023", "2", "29"])
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid"))
        .stdout(predicate::str::contains("leap year: no"));
}

#[test]
fn missing_subcommand_fails() {
    recur().assert().failure();
}
