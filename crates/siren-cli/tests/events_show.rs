//! Integration tests for `siren events show`.

mod fixtures;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_show_fetches_event_then_acknowledgements() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::event_response(42, "2024-03-01T12:30:00Z", "Structure fire")),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Addressed by the delivery metadata of the fetched response, with the
    // receipt passed back as a query parameter.
    Mock::given(method("GET"))
        .and(path("/api/events/42/acknowledgements"))
        .and(query_param("receipt", "r-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            fixtures::acknowledgement("engine-7", "2024-03-01T12:35:00Z", "en route"),
            fixtures::acknowledgement("ladder-2", "2024-03-01T12:36:00Z", ""),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("siren")
        .env("SIREN_HOME", home.path())
        .args(["--gateway-url", &server.uri(), "events", "show", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event #42: Structure fire"))
        .stdout(predicate::str::contains("Acknowledgements (2)"))
        .stdout(predicate::str::contains("engine-7: en route"))
        .stdout(predicate::str::contains("ladder-2"));
}

#[tokio::test]
async fn test_show_unknown_id_fails_with_status() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    cargo_bin_cmd!("siren")
        .env("SIREN_HOME", home.path())
        .args(["--gateway-url", &server.uri(), "events", "show", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fetch event 999"));
}

#[test]
fn test_show_rejects_non_numeric_id() {
    let home = TempDir::new().unwrap();

    // Ids are validated at the argument boundary; the gateway never sees
    // non-numeric input.
    cargo_bin_cmd!("siren")
        .env("SIREN_HOME", home.path())
        .args(["events", "show", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
