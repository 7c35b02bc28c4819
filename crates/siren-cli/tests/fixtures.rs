//! Shared helpers for integration tests.

#![allow(dead_code)]

use serde_json::json;
use wiremock::ResponseTemplate;

/// Builds one `EventResponse` JSON document.
pub fn event_response(id: i64, created: &str, title: &str) -> serde_json::Value {
    json!({
        "event": {
            "id": id,
            "created": created,
            "title": title,
            "category": "fire",
            "location": "12 Harbor St",
            "summary": "Units dispatched"
        },
        "delivery": {
            "receipt": format!("r-{id}"),
            "acknowledgements_path": format!("/api/events/{id}/acknowledgements")
        }
    })
}

/// Builds an acknowledgement JSON document.
pub fn acknowledgement(responder: &str, created: &str, note: &str) -> serde_json::Value {
    json!({
        "responder": responder,
        "created": created,
        "note": note
    })
}

/// Builds a finite SSE body from event documents; the stream ends after the
/// last frame.
pub fn sse_feed(responses: &[serde_json::Value]) -> String {
    let mut body = String::new();
    for response in responses {
        body.push_str("event: event\n");
        body.push_str(&format!("data: {response}\n\n"));
    }
    body
}

/// Wraps an SSE body string in a ResponseTemplate.
pub fn sse_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_feed_framing() {
        let body = sse_feed(&[event_response(1, "2024-03-01T12:00:00Z", "Fire")]);
        assert!(body.starts_with("event: event\n"));
        assert!(body.contains("data: {"));
        assert!(body.ends_with("\n\n"));
    }
}
