//! Effect handler implementations.
//!
//! Pure async functions that perform the gateway I/O for spawned tasks and
//! return the `UiEvent` carrying the result.

use siren_core::gateway::GatewayClient;

use crate::events::{DetailsUiEvent, RefreshUiEvent, UiEvent};

/// Loads the detail view data: the event by id, then its acknowledgements.
///
/// Strictly sequential; the acknowledgement fetch starts only after the
/// event fetch resolved, and is addressed by that response's delivery
/// metadata.
pub async fn load_details(client: GatewayClient, id: i64) -> UiEvent {
    let response = match client.fetch_by_id(id).await {
        Ok(response) => response,
        Err(err) => {
            return UiEvent::Details(DetailsUiEvent::Failed {
                id,
                error: err.to_string(),
            });
        }
    };

    match client.fetch_acknowledgements(&response).await {
        Ok(acknowledgements) => UiEvent::Details(DetailsUiEvent::Loaded {
            id,
            response: Box::new(response),
            acknowledgements,
        }),
        Err(err) => UiEvent::Details(DetailsUiEvent::Failed {
            id,
            error: err.to_string(),
        }),
    }
}

/// Probes the gateway for the next event id (list refresh).
///
/// Failures are logged and swallowed; the caller only learns whether an
/// event was fetched.
pub async fn refresh_probe(client: GatewayClient, id: i64) -> UiEvent {
    match client.fetch_by_id(id).await {
        Ok(response) => UiEvent::Refresh(RefreshUiEvent::Completed {
            fetched: Some(Box::new(response)),
        }),
        Err(err) => {
            tracing::warn!(id, error = %err, "refresh probe failed");
            UiEvent::Refresh(RefreshUiEvent::Completed { fetched: None })
        }
    }
}
