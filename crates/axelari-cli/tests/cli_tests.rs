//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Runs the binary inside `dir`, isolated from any user config or API key.
fn axelari(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("axelari").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("AXELARI_GEMINI_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn banks() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../question-banks")
}

fn write_assistant_config(dir: &TempDir, base_url: &str) {
    std::fs::write(
        dir.path().join("axelari.toml"),
        format!(
            "[assistant]\napi_key = \"test-key\"\nbase_url = \"{base_url}\"\nmax_retries = 0\n"
        ),
    )
    .unwrap();
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sections"))
        .stdout(predicate::str::contains("take"))
        .stdout(predicate::str::contains("results"))
        .stdout(predicate::str::contains("chat"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("axelari"));
}

#[test]
fn sections_lists_builtin_catalog() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .arg("sections")
        .assert()
        .success()
        .stdout(predicate::str::contains("Learning Style Assessment"))
        .stdout(predicate::str::contains("Cognitive Processing"))
        .stdout(predicate::str::contains("60% answered"))
        .stdout(predicate::str::contains("85%"))
        .stdout(predicate::str::contains("Visual-Dominant Learner"));
}

#[test]
fn validate_bank_file() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .arg("validate")
        .arg("--question-bank")
        .arg(banks().join("attention.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Section 3: Focus & Attention Span (3 questions)",
        ))
        .stdout(predicate::str::contains("All question banks valid."));
}

#[test]
fn validate_directory() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .arg("validate")
        .arg("--question-bank")
        .arg(banks())
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus & Attention Span"))
        .stdout(predicate::str::contains("Information Retention"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("bank.toml");
    std::fs::write(
        &bank,
        "[[sections]]\nid = 9\n\n[[sections.questions]]\nid = 1\ntext = \"Pick one\"\ndimension = \"Visual\"\n",
    )
    .unwrap();

    axelari(&dir)
        .arg("validate")
        .arg("--question-bank")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("[9/1] WARNING"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .arg("validate")
        .arg("--question-bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    axelari(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created axelari.toml"))
        .stdout(predicate::str::contains("Created question-banks/example.toml"));

    assert!(dir.path().join("axelari.toml").exists());
    assert!(dir.path().join("question-banks/example.toml").exists());

    axelari(&dir)
        .arg("validate")
        .arg("--question-bank")
        .arg("question-banks/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All question banks valid."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("axelari.toml"), "# mine\n").unwrap();

    axelari(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("axelari.toml already exists, skipping."));

    let content = std::fs::read_to_string(dir.path().join("axelari.toml")).unwrap();
    assert_eq!(content, "# mine\n");
}

#[test]
fn results_as_json() {
    let dir = TempDir::new().unwrap();
    let output = axelari(&dir)
        .args(["results", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["profile"]["type"], "Visual-Dominant Learner");
    assert_eq!(report["sections"].as_array().unwrap().len(), 4);
    assert_eq!(report["history"].as_array().unwrap().len(), 2);
}

#[test]
fn results_markdown_to_file() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["results", "--format", "markdown", "--output", "out/results.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote out/results.md"));

    let md = std::fs::read_to_string(dir.path().join("out/results.md")).unwrap();
    assert!(md.starts_with("# Visual-Dominant Learner"));
    assert!(md.contains("## Learning dimensions"));
}

#[test]
fn results_html() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["results", "--format", "html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("<svg"));
}

#[test]
fn results_html_to_file() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["results", "--format", "html", "--output", "out/results.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let html = std::fs::read_to_string(dir.path().join("out/results.html")).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Visual-Dominant Learner"));
}

#[test]
fn results_unknown_format() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["results", "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: pdf"));
}

#[test]
fn history_lists_entries() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-04-15"))
        .stdout(predicate::str::contains("2024-02-20"))
        .stdout(predicate::str::contains("Visual 80%"));
}

#[test]
fn history_compare_latest_attempts() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["history", "--compare", "Learning Style Assessment"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Improvements: 1 | Declines: 0 | Unchanged: 3",
        ))
        .stdout(predicate::str::contains("+ Reading/Writing: 55% -> 58% (+3)"));
}

#[test]
fn history_compare_unknown_test() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["history", "--compare", "Memory Sprint"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("need at least two"));
}

#[test]
fn take_section_submits_and_saves() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["take", "--section", "4", "--state", "state.json"])
        .write_stdin("1\nn\n1\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/2"))
        .stdout(predicate::str::contains("Question 2/2"))
        .stdout(predicate::str::contains("Section submitted."))
        .stdout(predicate::str::contains("Score: 100%"))
        .stderr(predicate::str::contains("Assessment Completed!"));

    assert!(dir.path().join("state.json").exists());

    axelari(&dir)
        .args(["history", "--state", "state.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Information Retention"));
}

#[test]
fn take_quit_keeps_progress() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["take", "--section", "4", "--state", "state.json"])
        .write_stdin("1\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Attempt stopped."));

    axelari(&dir)
        .args(["sections", "--state", "state.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50% answered"));
}

#[test]
fn take_requires_an_answer_before_moving_on() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["take", "--section", "3", "--state", "state.json"])
        .write_stdin("n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("has not been answered"));
}

#[test]
fn take_reports_missing_option_as_error() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["take", "--section", "3", "--state", "state.json"])
        .write_stdin("9\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Error: question 1 has no option 8"));
}

#[test]
fn quitting_a_retake_keeps_the_completed_result() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["take", "--section", "1", "--state", "state.json"])
        .write_stdin("1\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Attempt stopped."));

    let output = axelari(&dir)
        .args(["results", "--state", "state.json", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &report["sections"][0];
    assert_eq!(first["status"], "completed");
    assert_eq!(first["score"], 85);
    assert!(first["progress"].is_null());
    assert!(first["previous_score"].is_null());
}

#[test]
fn take_unknown_section() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["take", "--section", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown section: 42"));
}

#[test]
fn ask_without_api_key() {
    let dir = TempDir::new().unwrap();
    axelari(&dir)
        .args(["ask", "How should I study?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API key configured"));
}

#[tokio::test(flavor = "multi_thread")]
async fn ask_prints_assistant_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "Try spaced repetition."}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_assistant_config(&dir, &server.uri());

    axelari(&dir)
        .args(["ask", "How do I remember more?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Try spaced repetition."));
}

#[tokio::test(flavor = "multi_thread")]
async fn ask_falls_back_when_service_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_assistant_config(&dir, &server.uri());

    axelari(&dir)
        .args(["ask", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Sorry, there was an error connecting to the AI service.",
        ))
        .stderr(predicate::str::contains(
            "Failed to get AI response. Please try again.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn chat_greets_and_replies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "Short sessions work well."}]}}]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_assistant_config(&dir, &server.uri());

    axelari(&dir)
        .arg("chat")
        .write_stdin("Any tips?\n\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hi there!"))
        .stdout(predicate::str::contains("Short sessions work well."));
}
