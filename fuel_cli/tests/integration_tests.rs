//! Integration tests for the fuelplan binary.
//!
//! These tests verify end-to-end behavior including:
//! - Export analysis output
//! - Request assembly from export + profile
//! - Response parsing and plan persistence

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const EXPORT_HEADER: &str = "cycle_score,recovery_score,workout_start,workout_end,workout_sport_id,user_measurements_height_meter,user_measurements_weight_kilogram";

/// Helper to get the CLI command
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fuelplan"))
}

/// Write a small well-formed export into the given directory
fn write_export(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("whoop_data.csv");
    let rows = [
        "\"{'strain': 14.2, 'kilojoule': 9000.0}\",\"{'recovery_score': 55}\",2024-01-03T10:00:00Z,2024-01-03T10:30:00Z,0,1.75,70.5",
        "\"{'strain': 9.8, 'kilojoule': 8000.0}\",\"{'recovery_score': 75}\",2024-01-02T09:00:00Z,2024-01-02T09:30:00Z,0,1.75,70.4",
        "\"{'strain': 11.0, 'kilojoule': 8500.0}\",\"{'recovery_score': 65}\",2024-01-01T18:00:00Z,2024-01-01T18:30:00Z,1,1.75,70.3",
    ];
    fs::write(&path, format!("{}\n{}\n", EXPORT_HEADER, rows.join("\n"))).unwrap();
    path
}

/// Write a profile TOML so the plan command never prompts
fn write_profile(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("profile.toml");
    fs::write(
        &path,
        r#"
goals = "build muscle"
athlete_type = "sprinter focusing on power"
age = "24"
gender = "male"
dietary_restrictions = "peanuts"
"#,
    )
    .unwrap();
    path
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "WHOOP-driven weekly meal plan assistant",
        ));
}

#[test]
fn test_analyze_prints_statistics() {
    let temp_dir = TempDir::new().unwrap();
    let export = write_export(temp_dir.path());

    cli()
        .arg("analyze")
        .arg("--export")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Most recent strain: 14.20"))
        .stdout(predicate::str::contains("average calories burned"))
        .stdout(predicate::str::contains("Running"))
        .stdout(predicate::str::contains(
            "average workout duration is 30.0 minutes",
        ));
}

#[test]
fn test_analyze_fails_on_malformed_cell() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.csv");
    fs::write(
        &path,
        format!(
            "{}\n\"exec('rm -rf /')\",\"{{'recovery_score': 55}}\",2024-01-01T10:00:00Z,2024-01-01T10:30:00Z,0,1.75,70.5\n",
            EXPORT_HEADER
        ),
    )
    .unwrap();

    cli()
        .arg("analyze")
        .arg("--export")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("decode"));
}

#[test]
fn test_plan_emits_request_with_profile_file() {
    let temp_dir = TempDir::new().unwrap();
    let export = write_export(temp_dir.path());
    let profile = write_profile(temp_dir.path());

    cli()
        .arg("plan")
        .arg("--export")
        .arg(&export)
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("You are a nutrition expert."))
        .stdout(predicate::str::contains("24 year old male"))
        .stdout(predicate::str::contains("build muscle"))
        .stdout(predicate::str::contains("Running"));
}

#[test]
fn test_plan_persists_captured_response() {
    let temp_dir = TempDir::new().unwrap();
    let export = write_export(temp_dir.path());
    let profile = write_profile(temp_dir.path());

    let response_path = temp_dir.path().join("response.txt");
    fs::write(
        &response_path,
        r#"Here you go:
{
    "Monday": {
        "Meals": ["Breakfast: Oatmeal", "Snack 1: Apple", "Lunch: Wrap", "Snack 2: Yogurt", "Dinner: Salmon"],
        "Macronutrient Breakdown": {"Breakfast": {"Protein": 20, "Carbs": 30, "Fats": 15}},
        "Recipes": ["Oatmeal: oats plus milk"],
        "Calories": [450, 90, 620, 120, 700]
    },
    "Shopping List": ["Oats: 1 lb"],
    "Cost": 98.5
}"#,
    )
    .unwrap();

    let out_path = temp_dir.path().join("plans").join("meal_plan.json");

    cli()
        .arg("plan")
        .arg("--export")
        .arg(&export)
        .arg("--profile")
        .arg(&profile)
        .arg("--response")
        .arg(&response_path)
        .arg("--out")
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Meal plan written"));

    let written = fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["Cost"], 98.5);
    assert!(parsed["Monday"]["Meals"].is_array());
}

#[test]
fn test_plan_fails_on_non_json_response() {
    let temp_dir = TempDir::new().unwrap();
    let export = write_export(temp_dir.path());
    let profile = write_profile(temp_dir.path());

    let response_path = temp_dir.path().join("response.txt");
    fs::write(&response_path, "Sorry, I cannot help with that.").unwrap();

    cli()
        .arg("plan")
        .arg("--export")
        .arg(&export)
        .arg("--profile")
        .arg(&profile)
        .arg("--response")
        .arg(&response_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no JSON object"));
}

#[test]
fn test_analyze_fails_on_missing_export() {
    let temp_dir = TempDir::new().unwrap();

    cli()
        .arg("analyze")
        .arg("--export")
        .arg(temp_dir.path().join("nope.csv"))
        .assert()
        .failure();
}
