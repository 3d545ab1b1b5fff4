//! CLI behavior tests: exit codes, output formats, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const MIRACLE_AD: &str = "test-corpus/articles/miracle-ad.txt";
const CLINICAL: &str = "test-corpus/articles/clinical-summary.txt";
const DETOX_BLOG: &str = "test-corpus/articles/detox-blog.md";
const CORPUS: &str = "test-corpus";

fn quacksense_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_quacksense"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn text_report_for_miracle_ad() {
    let mut cmd = quacksense_cmd();
    cmd.arg(MIRACLE_AD);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Pseudoscience Risk Analysis"))
        .stdout(predicate::str::contains("CRITICAL"))
        .stdout(predicate::str::contains("Category Breakdown:"))
        .stdout(predicate::str::contains("Recommendations:"));
}

#[test]
fn clean_text_reports_no_markers() {
    let mut cmd = quacksense_cmd();
    cmd.arg(CLINICAL);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("LOW"))
        .stdout(predicate::str::contains("No markers found"));
}

#[test]
fn inline_text_argument() {
    let mut cmd = quacksense_cmd();
    cmd.arg("--text")
        .arg("Miracle cure with no side effects!")
        .arg("--language")
        .arg("en")
        .arg("--quiet");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("<text>: "));
}

#[test]
fn text_and_path_conflict() {
    let mut cmd = quacksense_cmd();
    cmd.arg(MIRACLE_AD).arg("--text").arg("hello");
    cmd.assert().failure().code(2);
}

#[test]
fn reads_text_from_stdin() {
    let mut cmd = quacksense_cmd();
    cmd.arg("--format")
        .arg("json")
        .write_stdin("Врачи скрывают правду о шлаках!");
    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(json["language"], "ru");
    assert!(json["hits"].as_array().unwrap().len() >= 2);
    assert!(json.get("path").is_none());
}

#[test]
fn json_output_valid() {
    let mut cmd = quacksense_cmd();
    cmd.arg(DETOX_BLOG).arg("--format").arg("json").arg("-l").arg("en");
    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");

    assert_eq!(json["language"], "en");
    assert_eq!(json["verdict"], "high");
    assert!(json["lexiconVersion"].as_str().unwrap().starts_with("en-"));
    assert!(!json["matches"].as_array().unwrap().is_empty());
    assert!(json["path"].as_str().unwrap().ends_with("detox-blog.md"));
}

#[test]
fn json_directory_output_has_summary() {
    let mut cmd = quacksense_cmd();
    cmd.arg(CORPUS).arg("--format").arg("json");
    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");

    // five .txt/.md files; notes.csv is skipped
    assert_eq!(json["results"].as_array().unwrap().len(), 5);
    assert_eq!(json["summary"]["documents"], 5);
    assert_eq!(json["summary"]["worstVerdict"], "critical");
    assert_eq!(json["tool"]["name"], "quacksense");
}

#[test]
fn html_output_written_to_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("report.html");

    let mut cmd = quacksense_cmd();
    cmd.arg(MIRACLE_AD)
        .arg("--format")
        .arg("html")
        .arg("--output")
        .arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<mark"));
    assert!(html.contains("miracle-ad.txt"));
}

#[test]
fn fail_on_reached_exit_1() {
    let mut cmd = quacksense_cmd();
    cmd.arg(MIRACLE_AD).arg("--fail-on").arg("high");
    cmd.assert().failure().code(1);
}

#[test]
fn fail_on_not_reached_exit_0() {
    let mut cmd = quacksense_cmd();
    cmd.arg(CLINICAL).arg("--fail-on").arg("moderate");
    cmd.assert().success();
}

#[test]
fn invalid_fail_on_value_is_usage_error() {
    let mut cmd = quacksense_cmd();
    cmd.arg(CLINICAL).arg("--fail-on").arg("catastrophic");
    cmd.assert().failure().code(2);
}

#[test]
fn missing_path_exit_2() {
    let mut cmd = quacksense_cmd();
    cmd.arg("test-corpus/does-not-exist");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Path does not exist"));
}

#[test]
fn unsupported_language_exit_2() {
    let mut cmd = quacksense_cmd();
    cmd.arg("--text").arg("bonjour").arg("--language").arg("fr");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("fr"));
}

#[test]
fn empty_directory_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = quacksense_cmd();
    cmd.arg(dir.path());
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No text files found"));
}

#[test]
fn quiet_directory_output_one_line_per_file() {
    let mut cmd = quacksense_cmd();
    cmd.arg(CORPUS).arg("--quiet");
    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.contains("miracle-ad.txt"));
    assert!(!stdout.contains("notes.csv"));
}

#[test]
fn config_file_applies_ignore_and_fail_on() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("drafts")).unwrap();
    fs::write(
        dir.path().join("post.txt"),
        "Погода сегодня солнечная, ветер слабый.",
    )
    .unwrap();
    fs::write(
        dir.path().join("drafts").join("ad.txt"),
        "Чудо-средство от всех болезней! 100% гарантия! Врачи скрывают правду!",
    )
    .unwrap();
    fs::write(
        dir.path().join(".quacksenserc.json"),
        r#"{ "failOn": "moderate", "ignore": ["**/drafts/**"] }"#,
    )
    .unwrap();

    let mut cmd = quacksense_cmd();
    cmd.arg(dir.path()).arg("--quiet");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("post.txt"))
        .stdout(predicate::str::contains("ad.txt").not());
}

#[test]
fn bare_file_name_finds_config_in_parent_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    let articles = dir.path().join("articles");
    fs::create_dir_all(&articles).unwrap();
    fs::write(articles.join("post.txt"), "Погода сегодня солнечная.").unwrap();
    fs::write(
        dir.path().join(".quacksenserc.json"),
        r#"{ "failOn": "low" }"#,
    )
    .unwrap();

    let mut cmd = quacksense_cmd();
    cmd.current_dir(&articles).arg("post.txt").arg("--quiet");
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("post.txt: 0.00 (LOW)"));
}

#[test]
fn invalid_config_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("post.txt"), "text").unwrap();
    fs::write(dir.path().join(".quacksenserc.json"), "{ not json").unwrap();

    let mut cmd = quacksense_cmd();
    cmd.arg(dir.path());
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON in config"));
}

#[test]
fn init_creates_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = quacksense_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path()).arg("--language").arg("en");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(dir.path().join(".quacksenserc.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["language"], "en");
    assert_eq!(json["failOn"], "high");
}

#[test]
fn init_keeps_existing_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(".quacksenserc.json");
    fs::write(&path, r#"{ "language": "ru" }"#).unwrap();

    let mut cmd = quacksense_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"{ "language": "ru" }"#
    );
}
