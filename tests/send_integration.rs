//! Integration tests for the send command against a mock ingest endpoint
//!
//! These tests drive the compiled binary end to end:
//! - metric batch POSTed as line protocol
//! - per-event JSON delivery and failure isolation
//! - unsupported event types skipped without a request
//! - delivery policy (log-only vs strict) exit codes
//! - dry-run issuing no requests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to get the beacon binary path
fn beacon_binary() -> PathBuf {
    // When running tests, the binary is in target/debug/beacon
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps
    path.push("beacon");
    path
}

/// Helper to run beacon off the async runtime's worker threads
async fn run_beacon(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::new(beacon_binary())
            .env("RUST_LOG", "info")
            .args(&args)
            .output()
            .expect("Failed to execute beacon")
    })
    .await
    .unwrap()
}

/// Write a config file so tests never pick up a user-level beacon.yaml
fn write_config(dir: &Path) -> PathBuf {
    let config = dir.join("beacon.yaml");
    fs::write(&config, "source: beacon\n").unwrap();
    config
}

fn write_report(dir: &Path, yaml: &str) -> PathBuf {
    let report = dir.join("report.yaml");
    fs::write(&report, yaml).unwrap();
    report
}

fn send_args(config: &Path, report: &Path, endpoint: &str, extra: &[&str]) -> Vec<String> {
    let mut args = vec![
        "--config".to_string(),
        config.display().to_string(),
        "send".to_string(),
        report.display().to_string(),
        "--endpoint".to_string(),
        endpoint.to_string(),
        "--token".to_string(),
        "test-token".to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    args
}

#[tokio::test(flavor = "multi_thread")]
async fn test_metric_pipeline_posts_one_line_protocol_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/metrics/ingest"))
        .and(header("Authorization", "Api-Token test-token"))
        .and(header("Content-Type", "text/plain"))
        .and(body_string("a 1\n"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let report = write_report(dir.path(), "metrics:\n  - name: a\n    value: \"1\"\n");

    let output = run_beacon(send_args(&config, &report, &server.uri(), &[])).await;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_deployment_event_wire_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/events"))
        .and(header("Authorization", "Api-Token test-token"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "eventType": "CUSTOM_DEPLOYMENT",
            "attachRules": {
                "entityIds": ["HOST-1"],
                "tagRule": [{
                    "matchTypes": ["HOST"],
                    "tags": [{"context": "CONTEXTLESS", "key": "env", "value": "prod"}]
                }]
            },
            "source": "beacon",
            "deploymentName": "web-frontend",
            "deploymentVersion": "1.2.3"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let report = write_report(
        dir.path(),
        r#"
events:
  - type: CUSTOM_DEPLOYMENT
    deploymentName: web-frontend
    deploymentVersion: "1.2.3"
    entities: [HOST-1]
    tags: ["HOST:env:prod"]
"#,
    );

    let output = run_beacon(send_args(&config, &report, &server.uri(), &[])).await;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_event_does_not_stop_later_events() {
    let server = MockServer::start().await;
    // Both events must be attempted even though every delivery is rejected
    Mock::given(method("POST"))
        .and(path("/api/v1/events"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let report = write_report(
        dir.path(),
        r#"
events:
  - type: CUSTOM_INFO
    title: first
  - type: CUSTOM_INFO
    title: second
"#,
    );

    let output = run_beacon(send_args(&config, &report, &server.uri(), &[])).await;

    // Default policy: failures are logged, the process still succeeds
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_strict_mode_fails_on_rejected_delivery() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/metrics/ingest"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let report = write_report(dir.path(), "metrics:\n  - name: a\n    value: \"1\"\n");

    let output = run_beacon(send_args(&config, &report, &server.uri(), &["--strict"])).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("delivery request(s) failed"), "stderr: {}", stderr);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unsupported_event_type_issues_no_request() {
    let server = MockServer::start().await;
    // Only the CUSTOM_INFO record may reach the wire
    Mock::given(method("POST"))
        .and(path("/api/v1/events"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let report = write_report(
        dir.path(),
        r#"
events:
  - type: UNKNOWN_TYPE
    title: ignored
  - type: CUSTOM_INFO
    title: kept
"#,
    );

    let output = run_beacon(send_args(&config, &report, &server.uri(), &[])).await;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dry_run_issues_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let report = write_report(
        dir.path(),
        r#"
metrics:
  - name: a
    value: "1"
events:
  - type: CUSTOM_INFO
    title: hello
"#,
    );

    let output = run_beacon(send_args(&config, &report, &server.uri(), &["--dry-run"])).await;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("a 1"), "stdout: {}", stdout);
    assert!(stdout.contains("CUSTOM_INFO"), "stdout: {}", stdout);
}
