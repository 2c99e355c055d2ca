//! End-to-end CLI tests for the session-client binary.

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

const LOGIN_PATH: &str = "/ServiceModel/AuthService.svc/Login";

fn session_cmd() -> Command {
    let mut cmd = Command::cargo_bin("session-client").unwrap();
    cmd.env_remove("SESSION_CLIENT_USERNAME")
        .env_remove("SESSION_CLIENT_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn session_args(mock_server: &MockServer, output: &std::path::Path) -> Vec<String> {
    vec![
        "--username".to_string(),
        "Supervisor".to_string(),
        "--login-url".to_string(),
        format!("{}{LOGIN_PATH}", mock_server.uri()),
        "--base-url".to_string(),
        format!("{}/0/odata/", mock_server.uri()),
        "--url".to_string(),
        format!("{}/0/odata/Contact?$top=1", mock_server.uri()),
        "--output".to_string(),
        output.display().to_string(),
    ]
}

/// Runs the binary off the async runtime so the mock server keeps serving.
async fn run(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .expect("command task panicked")
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    session_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--login-url"))
        .stdout(predicate::str::contains("--base-url"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    session_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("session-client"));
}

/// Test that missing required arguments cause non-zero exit.
#[test]
fn test_binary_missing_required_args_returns_error() {
    session_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_writes_fetched_body_to_output() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let temp_dir = tempfile::TempDir::new().unwrap();
    let output = temp_dir.path().join("data.txt");

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("Set-Cookie", ".ASPXAUTH=X; path=/; HttpOnly")
                .append_header("Set-Cookie", "BPMCSRF=tok123; path=/")
                .set_body_string(r#"{"Code":0}"#),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/0/odata/Contact"))
        .and(header("BPMCSRF", "tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"value":[{"Name":"A"}]}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut cmd = session_cmd();
    cmd.args(session_args(&mock_server, &output))
        .env("SESSION_CLIENT_PASSWORD", "Supervisor");
    run(cmd).await.success();

    let written = std::fs::read_to_string(&output).expect("output file written");
    assert_eq!(written, r#"{"value":[{"Name":"A"}]}"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_rejected_login_exits_non_zero() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let temp_dir = tempfile::TempDir::new().unwrap();
    let output = temp_dir.path().join("data.txt");

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"Code":1,"Message":"Invalid username or password"}"#),
        )
        .mount(&mock_server)
        .await;

    let mut cmd = session_cmd();
    cmd.args(session_args(&mock_server, &output))
        .args(["--password", "wrong"]);
    run(cmd)
        .await
        .failure()
        .stderr(predicate::str::contains("unauthorized Supervisor"))
        .stdout(predicate::str::contains("Login rejected"));

    assert!(!output.exists(), "no output file on rejected login");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_failed_login_status_skips_output() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let temp_dir = tempfile::TempDir::new().unwrap();
    let output = temp_dir.path().join("data.txt");

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut cmd = session_cmd();
    cmd.args(session_args(&mock_server, &output))
        .args(["--password", "Supervisor"]);
    run(cmd).await.success();

    assert!(!output.exists(), "no output file without a session");
}
