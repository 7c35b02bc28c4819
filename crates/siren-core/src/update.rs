//! Update watcher.
//!
//! Lifecycle: Idle -> Polling -> UpdateAvailable -> (UserDeferred | Activating) -> Idle.
//!
//! The watcher stays Idle until the readiness condition holds (configurable:
//! the first rendered frame, or immediately), then checks the gateway's
//! release endpoint on a fixed cadence. Check failures are logged and
//! otherwise ignored. A discovered release is announced at most once per
//! version; deferring returns to Polling without re-announcing it.
//!
//! Activation is driven by a command from the UI. The resulting `Activated`
//! event flows back over the same event channel as availability - it is a
//! separate signal, not coordinated with whichever path requested the apply.

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::config::{Readiness, UpdatesConfig};
use crate::gateway::types::Release;
use crate::gateway::GatewayClient;

/// Events emitted by the update watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    /// A release newer than the running version is available.
    Available {
        version: String,
        /// Application-supplied message for the prompt.
        message: String,
    },
    /// Activation of a release completed.
    Activated { version: String },
}

/// Commands accepted by the update watcher.
#[derive(Debug)]
pub enum UpdateCommand {
    /// Apply the given release.
    Apply { version: String },
}

/// Handle to a running update watcher.
#[derive(Debug)]
pub struct UpdateHandle {
    commands: mpsc::UnboundedSender<UpdateCommand>,
    cancel: CancellationToken,
}

impl UpdateHandle {
    /// Requests activation of a release. Fire-and-forget; completion is
    /// reported as [`UpdateEvent::Activated`] on the event channel.
    pub fn apply(&self, version: String) {
        let _ = self.commands.send(UpdateCommand::Apply { version });
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

/// Starts the update watcher.
///
/// `ready` is the one-shot readiness condition; with `Readiness::Stable` the
/// watcher idles until it turns true. `current_version` is the version the
/// running application reports.
pub fn start(
    client: GatewayClient,
    config: UpdatesConfig,
    current_version: String,
    ready: watch::Receiver<bool>,
    tx: mpsc::UnboundedSender<UpdateEvent>,
) -> UpdateHandle {
    let cancel = CancellationToken::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let task_cancel = cancel.clone();
    tokio::spawn(async move {
        run_watcher(
            client,
            config,
            current_version,
            ready,
            tx,
            command_rx,
            task_cancel,
        )
        .await;
    });

    UpdateHandle {
        commands: command_tx,
        cancel,
    }
}

async fn run_watcher(
    client: GatewayClient,
    config: UpdatesConfig,
    current_version: String,
    mut ready: watch::Receiver<bool>,
    tx: mpsc::UnboundedSender<UpdateEvent>,
    mut commands: mpsc::UnboundedReceiver<UpdateCommand>,
    cancel: CancellationToken,
) {
    // Idle until ready.
    if config.readiness == Readiness::Stable {
        while !*ready.borrow() {
            tokio::select! {
                () = cancel.cancelled() => return,
                changed = ready.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }
    }

    let mut ticker = tokio::time::interval(config.poll_interval());
    // The first check runs one full interval after readiness, not at once.
    ticker.tick().await;

    let mut announced: Option<String> = None;

    loop {
        tokio::select! {
            () = cancel.cancelled() => return,
            _ = ticker.tick() => {
                match client.fetch_release().await {
                    Ok(release) => {
                        if let Some(event) =
                            evaluate(&release, &current_version, announced.as_deref())
                        {
                            announced = Some(release.version.clone());
                            if tx.send(event).is_err() {
                                return;
                            }
                        }
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "update check failed");
                    }
                }
            }
            command = commands.recv() => {
                match command {
                    Some(UpdateCommand::Apply { version }) => {
                        tracing::info!(%version, "activating update");
                        if tx.send(UpdateEvent::Activated { version }).is_err() {
                            return;
                        }
                    }
                    None => return,
                }
            }
        }
    }
}

/// Decides whether a fetched release warrants an availability announcement.
fn evaluate(release: &Release, current: &str, announced: Option<&str>) -> Option<UpdateEvent> {
    if announced == Some(release.version.as_str()) {
        return None;
    }
    if !version_is_newer(&release.version, current) {
        return None;
    }
    Some(UpdateEvent::Available {
        version: release.version.clone(),
        message: release.update_message.clone(),
    })
}

/// Compares dotted numeric versions; falls back to plain inequality when
/// either side does not parse.
pub fn version_is_newer(candidate: &str, current: &str) -> bool {
    match (parse_version(candidate), parse_version(current)) {
        (Some(a), Some(b)) => a > b,
        _ => candidate != current,
    }
}

fn parse_version(version: &str) -> Option<(u64, u64, u64)> {
    let mut parts = version.trim().splitn(3, '.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().unwrap_or("0").parse().ok()?;
    let patch = parts.next().unwrap_or("0").parse().ok()?;
    Some((major, minor, patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(version: &str, message: &str) -> Release {
        Release {
            version: version.to_string(),
            update_message: message.to_string(),
        }
    }

    #[test]
    fn test_version_comparison() {
        assert!(version_is_newer("0.4.0", "0.3.0"));
        assert!(version_is_newer("1.0.0", "0.9.9"));
        assert!(version_is_newer("0.3.1", "0.3.0"));
        assert!(!version_is_newer("0.3.0", "0.3.0"));
        assert!(!version_is_newer("0.2.9", "0.3.0"));
        // Unparseable versions fall back to inequality.
        assert!(version_is_newer("nightly-2", "nightly-1"));
        assert!(!version_is_newer("nightly-1", "nightly-1"));
    }

    #[test]
    fn test_evaluate_announces_newer_release() {
        let event = evaluate(&release("2.1.0", "v2.1"), "2.0.0", None).unwrap();
        assert_eq!(
            event,
            UpdateEvent::Available {
                version: "2.1.0".to_string(),
                message: "v2.1".to_string(),
            }
        );
    }

    #[test]
    fn test_evaluate_skips_current_and_older() {
        assert!(evaluate(&release("2.0.0", "same"), "2.0.0", None).is_none());
        assert!(evaluate(&release("1.9.0", "older"), "2.0.0", None).is_none());
    }

    #[test]
    fn test_evaluate_announces_once_per_version() {
        assert!(evaluate(&release("2.1.0", "v2.1"), "2.0.0", Some("2.1.0")).is_none());
        // A later, different release is announced again.
        assert!(evaluate(&release("2.2.0", "v2.2"), "2.0.0", Some("2.1.0")).is_some());
    }
}
