//! Integration tests for `siren events list`.

mod fixtures;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

#[tokio::test]
async fn test_list_prints_feed_newest_first() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    // Delivered out of creation order; presentation re-sorts.
    let body = fixtures::sse_feed(&[
        fixtures::event_response(5, "2024-03-01T09:00:00Z", "Gas leak"),
        fixtures::event_response(9, "2024-03-01T11:00:00Z", "Flooding"),
        fixtures::event_response(7, "2024-03-01T10:00:00Z", "Road closure"),
    ]);

    Mock::given(method("GET"))
        .and(path("/api/events/stream"))
        .respond_with(fixtures::sse_response(&body))
        .mount(&server)
        .await;

    let assert = cargo_bin_cmd!("siren")
        .env("SIREN_HOME", home.path())
        .args([
            "--gateway-url",
            &server.uri(),
            "events",
            "list",
            "--timeout-secs",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flooding"))
        .stdout(predicate::str::contains("Road closure"))
        .stdout(predicate::str::contains("Gas leak"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let flooding = stdout.find("Flooding").unwrap();
    let road = stdout.find("Road closure").unwrap();
    let gas = stdout.find("Gas leak").unwrap();
    assert!(flooding < road && road < gas, "expected newest-first order");
}

#[tokio::test]
async fn test_list_take_limits_output() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    let body = fixtures::sse_feed(&[
        fixtures::event_response(1, "2024-03-01T09:00:00Z", "First"),
        fixtures::event_response(2, "2024-03-01T10:00:00Z", "Second"),
        fixtures::event_response(3, "2024-03-01T11:00:00Z", "Third"),
    ]);

    Mock::given(method("GET"))
        .and(path("/api/events/stream"))
        .respond_with(fixtures::sse_response(&body))
        .mount(&server)
        .await;

    cargo_bin_cmd!("siren")
        .env("SIREN_HOME", home.path())
        .args([
            "--gateway-url",
            &server.uri(),
            "events",
            "list",
            "--take",
            "2",
            "--timeout-secs",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("First"))
        .stdout(predicate::str::contains("Second"))
        .stdout(predicate::str::contains("Third").not());
}

#[tokio::test]
async fn test_list_empty_stream() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/stream"))
        .respond_with(fixtures::sse_response(""))
        .mount(&server)
        .await;

    cargo_bin_cmd!("siren")
        .env("SIREN_HOME", home.path())
        .args([
            "--gateway-url",
            &server.uri(),
            "events",
            "list",
            "--timeout-secs",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No events received."));
}
