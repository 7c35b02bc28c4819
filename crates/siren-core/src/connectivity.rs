//! Connectivity watcher.
//!
//! Probes the gateway health endpoint on a fixed cadence and publishes the
//! online/offline boolean on change. Pure pass-through: no business logic
//! keys off this signal; consumers use it for conditional rendering only.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::gateway::GatewayClient;

/// Handle to a running connectivity watcher.
#[derive(Debug)]
pub struct ConnectivityHandle {
    cancel: CancellationToken,
}

impl ConnectivityHandle {
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

/// Starts the watcher. Sends the initial probe result immediately, then
/// only changes.
pub fn start(
    client: GatewayClient,
    interval: Duration,
    tx: mpsc::UnboundedSender<bool>,
) -> ConnectivityHandle {
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        let mut last: Option<bool> = None;

        loop {
            tokio::select! {
                () = task_cancel.cancelled() => return,
                _ = ticker.tick() => {
                    let online = client.probe().await;
                    if last != Some(online) {
                        last = Some(online);
                        if tx.send(online).is_err() {
                            return;
                        }
                    }
                }
            }
        }
    });

    ConnectivityHandle { cancel }
}
