//! Long-lived event feed subscription.
//!
//! The gateway pushes `EventResponse` items over SSE. The subscription runs
//! as a background task and forwards each decoded item through a channel in
//! arrival order. It is not restartable: once closed or failed, a new
//! subscription must be started.

use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::client::GatewayClient;
use super::types::EventResponse;
use super::{GatewayError, GatewayErrorKind, GatewayResult};

/// Events emitted by the feed subscription.
#[derive(Debug)]
pub enum FeedEvent {
    /// One event arrived on the stream.
    Item(Box<EventResponse>),
    /// The stream failed; no further items will arrive.
    Failed(GatewayError),
    /// The gateway closed the stream; no further items will arrive.
    Closed,
}

/// Handle to a running feed subscription.
///
/// Dropping the handle does NOT stop the task; call [`FeedHandle::stop`]
/// to tear the subscription down.
#[derive(Debug)]
pub struct FeedHandle {
    cancel: CancellationToken,
}

impl FeedHandle {
    /// Stops the subscription. No further items are sent after this returns.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

/// Starts the feed subscription, forwarding events to `tx`.
///
/// The task ends when the stream closes, fails, or the handle is stopped.
pub fn start(client: GatewayClient, tx: mpsc::UnboundedSender<FeedEvent>) -> FeedHandle {
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();

    tokio::spawn(async move {
        let outcome = run_subscription(&client, &tx, &task_cancel).await;
        if task_cancel.is_cancelled() {
            // Torn down locally; the consumer is gone or going.
            return;
        }
        match outcome {
            Ok(()) => {
                let _ = tx.send(FeedEvent::Closed);
            }
            Err(err) => {
                tracing::warn!(error = %err, "event feed failed");
                let _ = tx.send(FeedEvent::Failed(err));
            }
        }
    });

    FeedHandle { cancel }
}

async fn run_subscription(
    client: &GatewayClient,
    tx: &mpsc::UnboundedSender<FeedEvent>,
    cancel: &CancellationToken,
) -> GatewayResult<()> {
    let url = format!("{}/api/events/stream", client.base_url());
    let response = client
        .http()
        .get(&url)
        .header("Accept", "text/event-stream")
        .send()
        .await?
        .error_for_status()?;

    let mut stream = Box::pin(response.bytes_stream().eventsource());

    loop {
        tokio::select! {
            () = cancel.cancelled() => return Ok(()),
            frame = stream.next() => {
                match frame {
                    Some(Ok(frame)) => match decode_frame(&frame.data) {
                        Ok(item) => {
                            if tx.send(FeedEvent::Item(Box::new(item))).is_err() {
                                return Ok(());
                            }
                        }
                        Err(err) => {
                            // One bad frame does not kill the subscription.
                            tracing::warn!(error = %err, "skipping undecodable feed frame");
                        }
                    },
                    Some(Err(err)) => {
                        return Err(GatewayError::new(
                            GatewayErrorKind::Decode,
                            format!("SSE stream error: {err}"),
                        ));
                    }
                    None => return Ok(()),
                }
            }
        }
    }
}

/// Decodes one SSE data payload into an `EventResponse`.
fn decode_frame(data: &str) -> GatewayResult<EventResponse> {
    serde_json::from_str(data).map_err(|err| {
        GatewayError::new(
            GatewayErrorKind::Decode,
            format!("invalid feed frame: {err}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_frame_ok() {
        let data = r#"{
            "event": { "id": 3, "created": "2024-03-01T09:00:00Z", "title": "Gas leak" },
            "delivery": { "receipt": "r-3", "acknowledgements_path": "/api/events/3/acknowledgements" }
        }"#;
        let item = decode_frame(data).unwrap();
        assert_eq!(item.event.id, 3);
    }

    #[test]
    fn test_decode_frame_rejects_garbage() {
        let err = decode_frame("not json").unwrap_err();
        assert_eq!(err.kind, GatewayErrorKind::Decode);
    }
}
