//! Wire models for the gateway contract.
//!
//! All of these are immutable once fetched; views hold them for their
//! visible lifetime and drop them on teardown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An emergency occurrence record shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyEvent {
    pub id: i64,
    pub created: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub summary: String,
}

/// Delivery metadata attached to a fetched event, used to request its
/// acknowledgements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Opaque receipt token the gateway expects back.
    pub receipt: String,
    /// Gateway-relative path of the acknowledgements collection.
    pub acknowledgements_path: String,
}

/// One event paired with the delivery metadata needed to fetch its
/// acknowledgements. One-to-one with its event for the lifetime of a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    pub event: EmergencyEvent,
    pub delivery: Delivery,
}

/// A responder's confirmation record for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub responder: String,
    #[serde(default)]
    pub note: String,
    pub created: DateTime<Utc>,
}

/// The gateway's update-availability signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub version: String,
    /// Application-supplied message shown in the update prompt.
    #[serde(default)]
    pub update_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_response_decode() {
        let json = r#"{
            "event": {
                "id": 42,
                "created": "2024-03-01T12:30:00Z",
                "title": "Structure fire",
                "category": "fire",
                "location": "12 Harbor St",
                "summary": "Two engines dispatched"
            },
            "delivery": {
                "receipt": "r-42-abc",
                "acknowledgements_path": "/api/events/42/acknowledgements"
            }
        }"#;

        let response: EventResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.event.id, 42);
        assert_eq!(response.event.title, "Structure fire");
        assert_eq!(response.delivery.receipt, "r-42-abc");
    }

    #[test]
    fn test_optional_fields_default_empty() {
        let json = r#"{
            "event": { "id": 7, "created": "2024-03-01T12:30:00Z", "title": "Flood" },
            "delivery": { "receipt": "r", "acknowledgements_path": "/api/events/7/acknowledgements" }
        }"#;

        let response: EventResponse = serde_json::from_str(json).unwrap();
        assert!(response.event.category.is_empty());
        assert!(response.event.summary.is_empty());
    }

    #[test]
    fn test_release_decode() {
        let release: Release =
            serde_json::from_str(r#"{"version": "2.1.0", "update_message": "v2.1"}"#).unwrap();
        assert_eq!(release.version, "2.1.0");
        assert_eq!(release.update_message, "v2.1");
    }
}
