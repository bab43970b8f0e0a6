//! Action log and report specs

use crate::prelude::*;

#[test]
fn valid_run_writes_numbered_log() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["3", "4", "5", "200", "20", "--seed", "1"])
        .passes();

    let lines = temp.lines("ferry.out");
    for (i, line) in lines.iter().enumerate() {
        assert!(line.starts_with(&format!("{}: ", i + 1)), "line {}: {}", i + 1, line);
    }
    // started, arrived, boarding, leaving per vehicle
    let vehicle_lines = lines.iter().filter(|l| !l.contains(": P: ")).count();
    assert_eq!(vehicle_lines, 28);
    assert!(lines.last().unwrap().ends_with(": P: finish"));
}

#[test]
fn empty_run_only_logs_the_ferry() {
    let temp = Project::empty();

    temp.ferry().args(&["0", "0", "3", "0", "0"]).passes();

    assert_eq!(
        temp.lines("ferry.out"),
        vec!["1: P: started", "2: P: arrived to 0", "3: P: finish"]
    );
}

#[test]
fn existing_log_is_truncated() {
    let temp = Project::empty();
    temp.file("ferry.out", "99: P: stale line from an earlier run\n");

    temp.ferry().args(&["1", "0", "3", "0", "0"]).passes();

    let text = temp.read("ferry.out");
    assert!(!text.contains("stale"));
    assert!(text.starts_with("1: "));
}

#[test]
fn output_flag_picks_the_log_path() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["2", "2", "6", "0", "0", "--output", "crossing.log"])
        .passes();

    assert!(temp.path().join("crossing.log").is_file());
    assert!(!temp.path().join("ferry.out").exists());
}

#[test]
fn summary_prints_json_report() {
    let temp = Project::empty();

    let outcome = temp
        .ferry()
        .args(&["2", "3", "4", "0", "0", "--seed", "8", "--summary"])
        .passes()
        .stdout_has("\"seed\": 8");

    let report: serde_json::Value = serde_json::from_str(&outcome.stdout).unwrap();
    assert_eq!(report["trucks_carried"], 2);
    assert_eq!(report["cars_carried"], 3);
    assert_eq!(report["final"]["total_unloaded"], 5);
    assert_eq!(
        report["actions"].as_u64().unwrap(),
        temp.lines("ferry.out").len() as u64
    );
}

#[test]
fn quiet_by_default_and_verbose_with_rust_log() {
    let temp = Project::empty();

    let quiet = temp.ferry().args(&["1", "1", "3", "0", "0"]).passes();
    assert!(quiet.stdout.is_empty());
    assert!(quiet.stderr.is_empty(), "stderr: {}", quiet.stderr);

    temp.ferry()
        .env("RUST_LOG", "ferry_core=info")
        .args(&["1", "1", "3", "0", "0"])
        .passes()
        .stderr_has("simulation finished");
}
