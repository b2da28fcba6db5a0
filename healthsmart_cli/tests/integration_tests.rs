//! Integration tests for the healthsmart binary.
//!
//! These tests verify end-to-end behavior including:
//! - The JSON envelope and exit codes for every action
//! - Payloads from arguments and from stdin
//! - Seeded reproducibility
//! - Config file and CSV export options

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Helper to create an isolated config home
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary with an empty config home
fn cli(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("healthsmart"));
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn report() -> &'static str {
    r#"{
        "user_id": 42,
        "report_month": "2024-01",
        "height": 170,
        "weight": 70,
        "gender": "female",
        "exercise_frequency": 2,
        "dietary_preferences": "素食",
        "food_allergies": "坚果",
        "health_goal": "lose_weight",
        "sleep_hours_avg": 6
    }"#
}

fn parse_stdout(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout should be JSON")
}

#[test]
fn test_cli_help() {
    let home = setup_test_dir();
    cli(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personalized monthly health plan engine",
        ));
}

#[test]
fn test_no_action_prints_usage() {
    let home = setup_test_dir();
    let output = cli(&home).assert().success().get_output().stdout.clone();

    let usage = parse_stdout(&output);
    assert!(usage["actions"]["generate_plan"].is_string());
    assert!(usage["usage"].as_str().unwrap().contains("<action>"));
}

#[test]
fn test_health_check() {
    let home = setup_test_dir();
    cli(&home)
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("Engine is running"));
}

#[test]
fn test_generate_plan_from_argument() {
    let home = setup_test_dir();
    let output = cli(&home)
        .args(["generate_plan", report(), "--seed", "1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body = parse_stdout(&output);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "计划生成成功");

    let plan = &body["data"]["plan"];
    assert_eq!(plan["user_id"], 42);
    assert_eq!(plan["total_days"], 30);
    assert_eq!(plan["exercise_sessions_per_week"], 3);

    let days = plan["daily_plans"].as_array().unwrap();
    assert_eq!(days.len(), 30);
    assert_eq!(days[0]["date"], "2024-01-01");
    assert_eq!(days[29]["date"], "2024-01-30");

    for day in days {
        let number = day["day_number"].as_u64().unwrap();
        assert_eq!(day["meal_snacks"].is_null(), number % 3 != 0);
        assert_eq!(day["exercise_type"].is_null(), number % 7 == 6);

        // Vegetarian and nut-allergy filtering
        for meal in ["meal_breakfast", "meal_lunch", "meal_dinner", "meal_snacks"] {
            if let Some(text) = day[meal].as_str() {
                for banned in ["肉", "鸡", "蛋", "虾", "鱼", "坚果"] {
                    assert!(!text.contains(banned), "day {} {} has {}", number, meal, banned);
                }
            }
        }
    }

    assert_eq!(body["data"]["analysis"]["bmi"], 24.22);
    assert_eq!(body["data"]["analysis"]["bmi_category"], "overweight");
    assert_eq!(body["data"]["summary"]["rest_days"], 4);
}

#[test]
fn test_generate_plan_from_stdin() {
    let home = setup_test_dir();
    cli(&home)
        .arg("generate_plan")
        .write_stdin(report())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"));
}

#[test]
fn test_seed_reproduces_plan() {
    let home = setup_test_dir();
    let run = || {
        cli(&home)
            .args(["generate_plan", report(), "--seed", "99"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    assert_eq!(parse_stdout(&run()), parse_stdout(&run()));
}

#[test]
fn test_analyze_health() {
    let home = setup_test_dir();
    let output = cli(&home)
        .args([
            "analyze_health",
            r#"{"height": 160, "weight": 45, "smoking": true, "gender": "female"}"#,
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body = parse_stdout(&output);
    assert_eq!(body["message"], "健康分析成功");
    let analysis = &body["data"];
    assert_eq!(analysis["bmi_category"], "underweight");
    assert_eq!(analysis["activity_level"], "sedentary");
    assert_eq!(analysis["health_goal"], "general_health");
    assert!(analysis["target_calories"].as_i64().unwrap() >= 1200);
    assert_eq!(analysis["warnings"].as_array().unwrap().len(), 2);
}

#[test]
fn test_daily_recommendation() {
    let home = setup_test_dir();
    let payload = format!(
        r#"{{"user_data": {}, "day_number": 7, "date": "2024-02-07"}}"#,
        report()
    );

    let output = cli(&home)
        .args(["daily_recommendation", &payload, "--seed", "5"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body = parse_stdout(&output);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["day_number"], 7);
    assert_eq!(body["data"]["date"], "2024-02-07");
    assert!(body["data"]["reminders"]
        .as_str()
        .unwrap()
        .contains("恭喜您坚持了一周"));
}

#[test]
fn test_invalid_json_exits_with_failure() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate_plan", "{not json"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Invalid JSON data"));
}

#[test]
fn test_unknown_action_exits_with_failure() {
    let home = setup_test_dir();
    cli(&home)
        .args(["export_everything", "{}"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Unknown action: export_everything"));
}

#[test]
fn test_generation_failure_envelope() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate_plan", r#"{"report_month": "January"}"#])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("生成计划失败"))
        .stdout(predicate::str::contains("\"data\": null"));
}

#[test]
fn test_config_file_plan_days() {
    let home = setup_test_dir();
    let config_path = home.path().join("custom.toml");
    fs::write(&config_path, "[engine]\nplan_days = 14\n\n[random]\nseed = 3\n").unwrap();

    let output = cli(&home)
        .args(["generate_plan", report(), "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body = parse_stdout(&output);
    assert_eq!(body["data"]["plan"]["total_days"], 14);
}

#[test]
fn test_default_config_location_is_used() {
    let home = setup_test_dir();
    let config_dir = home.path().join("healthsmart");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[engine]\nplan_days = 7\n").unwrap();

    let output = cli(&home)
        .args(["generate_plan", report()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(parse_stdout(&output)["data"]["plan"]["total_days"], 7);
}

#[test]
fn test_broken_config_reports_failure() {
    let home = setup_test_dir();
    let config_path = home.path().join("broken.toml");
    fs::write(&config_path, "[engine\nplan_days = ").unwrap();

    cli(&home)
        .args(["analyze_health", "{}", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("TOML error"));
}

#[test]
fn test_health_ignores_broken_config() {
    let home = setup_test_dir();
    let config_dir = home.path().join("healthsmart");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[engine\nplan_days = ").unwrap();

    cli(&home)
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("Engine is running"));

    let config_path = home.path().join("broken.toml");
    fs::write(&config_path, "[engine]\nplan_days = 0\n").unwrap();
    cli(&home)
        .args(["health", "--config"])
        .arg(&config_path)
        .assert()
        .success();
}

#[test]
fn test_csv_export() {
    let home = setup_test_dir();
    let csv_path = home.path().join("out").join("plan.csv");

    cli(&home)
        .args(["generate_plan", report(), "--seed", "8", "--csv-out"])
        .arg(&csv_path)
        .assert()
        .success();

    let content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(content.starts_with("day_number,date,meal_breakfast"));
    assert_eq!(content.lines().count(), 31);
}
