#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const CONFIG: &str = r#"{
  "teams": [
    {
      "name": "Shift 1",
      "people": ["alice", "bob", "carol"],
      "day_shift": {"start": "09:00:00", "end": "18:00:00"},
      "night_shift": {"start": "17:00:00", "end": "02:00:00"},
      "min_day_staff": 1,
      "max_day_staff": 1,
      "min_night_staff": 1,
      "max_night_staff": 1
    }
  ],
  "rules": {"min_days_off": 2, "max_days_off": 3}
}"#;

#[test]
fn generate_writes_the_expanded_csv() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let out = dir.path().join("schedule.csv");
    fs::write(&config, CONFIG).unwrap();

    Command::cargo_bin("roulement-cli")
        .unwrap()
        .args([
            "generate",
            "--config",
            config.to_str().unwrap(),
            "--start",
            "2025-01-06",
            "--weeks",
            "2",
            "--out",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("repeating every"));

    let csv = fs::read_to_string(&out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "week_index,date,weekday,team,shift_type,members"
    );
    // 2 semaines × 7 jours × 2 lignes (JOUR et NUIT) pour une équipe.
    assert_eq!(csv.lines().count(), 1 + 2 * 7 * 2);
    assert!(csv.contains("2025-01-06"));
    assert!(csv.contains("DAY"));
    assert!(csv.contains("NIGHT"));
}

#[test]
fn generate_can_export_raw_patterns_as_json() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let out = dir.path().join("schedule.csv");
    let patterns = dir.path().join("patterns.json");
    fs::write(&config, CONFIG).unwrap();

    Command::cargo_bin("roulement-cli")
        .unwrap()
        .args([
            "generate",
            "--config",
            config.to_str().unwrap(),
            "--start",
            "2025-01-06",
            "--weeks",
            "2",
            "--out",
            out.to_str().unwrap(),
            "--pattern-json",
            patterns.to_str().unwrap(),
        ])
        .assert()
        .success();

    let json = fs::read_to_string(&patterns).unwrap();
    assert!(json.contains("\"Shift 1\""));
    assert!(json.contains("\"weekday\""));
}

#[test]
fn check_reports_feasibility_per_team() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, CONFIG).unwrap();

    Command::cargo_bin("roulement-cli")
        .unwrap()
        .args(["check", "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team 'Shift 1': OK"));
}

#[test]
fn check_flags_infeasible_staffing() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{
          "teams": [
            {
              "name": "Solo",
              "people": ["alice"],
              "day_shift": {"start": "09:00:00", "end": "18:00:00"},
              "night_shift": {"start": "17:00:00", "end": "02:00:00"}
            }
          ]
        }"#,
    )
    .unwrap();

    Command::cargo_bin("roulement-cli")
        .unwrap()
        .args(["check", "--config", config.to_str().unwrap()])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("will relax"));
}
