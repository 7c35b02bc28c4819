//! Integration tests for `siren check-update`.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_newer_release_prints_message() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/release"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": "99.0.0",
            "update_message": "v99 brings faster dispatch"
        })))
        .mount(&server)
        .await;

    cargo_bin_cmd!("siren")
        .env("SIREN_HOME", home.path())
        .args(["--gateway-url", &server.uri(), "check-update"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Update available: 99.0.0"))
        .stdout(predicate::str::contains("v99 brings faster dispatch"));
}

#[tokio::test]
async fn test_same_version_is_up_to_date() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/release"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": env!("CARGO_PKG_VERSION"),
            "update_message": "nothing new"
        })))
        .mount(&server)
        .await;

    cargo_bin_cmd!("siren")
        .env("SIREN_HOME", home.path())
        .args(["--gateway-url", &server.uri(), "check-update"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Up to date"));
}

#[tokio::test]
async fn test_unreachable_gateway_fails() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("siren")
        .env("SIREN_HOME", home.path())
        .args(["--gateway-url", "http://127.0.0.1:1", "check-update"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fetch release"));
}
