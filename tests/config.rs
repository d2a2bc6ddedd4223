#![forbid(unsafe_code)]
use roulement::load_config;
use std::fs;
use tempfile::tempdir;

fn write_config(json: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, json).unwrap();
    (dir, path)
}

#[test]
fn load_applies_defaults_and_normalizes_staffing() {
    let (_dir, path) = write_config(
        r#"{
          "teams": [
            {
              "name": "Shift 1",
              "people": ["alice", "bob", "carol"],
              "day_shift": {"start": "09:00:00", "end": "18:00:00"},
              "night_shift": {"start": "17:00:00", "end": "02:00:00"}
            }
          ],
          "rules": {}
        }"#,
    );

    let config = load_config(&path).unwrap();
    let team = &config.teams[0];
    assert_eq!(team.min_day_staff, 1);
    assert_eq!(team.max_day_staff, 3);
    assert_eq!(team.max_night_staff, 3);
    assert_eq!(team.overfill_weekday, 2);

    let rules = &config.rules;
    assert_eq!(rules.max_shifts_in_row, 5);
    assert_eq!(rules.min_days_off, 1);
    assert_eq!(rules.max_days_off, 2);
    assert!(rules.no_day_after_night);
    assert!(rules.auto_relax);
    assert!((rules.weekly_hours_max - 48.0).abs() < 1e-9);
}

#[test]
fn duplicate_person_in_roster_is_rejected() {
    let (_dir, path) = write_config(
        r#"{
          "teams": [
            {
              "name": "Shift 1",
              "people": ["alice", "alice"],
              "day_shift": {"start": "09:00:00", "end": "18:00:00"},
              "night_shift": {"start": "17:00:00", "end": "02:00:00"}
            }
          ]
        }"#,
    );
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn staffing_bounds_must_be_ordered() {
    let (_dir, path) = write_config(
        r#"{
          "teams": [
            {
              "name": "Shift 1",
              "people": ["alice", "bob"],
              "day_shift": {"start": "09:00:00", "end": "18:00:00"},
              "night_shift": {"start": "17:00:00", "end": "02:00:00"},
              "min_day_staff": 2,
              "max_day_staff": 1
            }
          ]
        }"#,
    );
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("max_day_staff"));
}

#[test]
fn priority_must_target_a_known_team() {
    let (_dir, path) = write_config(
        r#"{
          "teams": [
            {
              "name": "Shift 1",
              "people": ["alice", "bob"],
              "day_shift": {"start": "09:00:00", "end": "18:00:00"},
              "night_shift": {"start": "17:00:00", "end": "02:00:00"}
            }
          ],
          "rules": {
            "priority": {"names": ["alice"], "team": "Shift 9"}
          }
        }"#,
    );
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("unknown team"));
}

#[test]
fn off_bounds_must_be_ordered() {
    let (_dir, path) = write_config(
        r#"{
          "teams": [
            {
              "name": "Shift 1",
              "people": ["alice"],
              "day_shift": {"start": "09:00:00", "end": "18:00:00"},
              "night_shift": {"start": "17:00:00", "end": "02:00:00"}
            }
          ],
          "rules": {"min_days_off": 3, "max_days_off": 1}
        }"#,
    );
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("min_days_off"));
}
