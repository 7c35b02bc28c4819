//! Event command handlers.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use siren_core::config::Config;
use siren_core::gateway::{feed, EventResponse, FeedEvent, GatewayClient};
use tokio::sync::mpsc;

/// Drains the event feed and prints it, newest first.
///
/// Stops at `take` events, at the end of the stream, or after
/// `timeout_secs` of waiting, whichever comes first.
pub async fn list(config: &Config, take: Option<usize>, timeout_secs: u64) -> Result<()> {
    let client = GatewayClient::new(&config.gateway).context("create gateway client")?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = feed::start(client, tx);

    let deadline = tokio::time::Instant::now() + Duration::from_secs(timeout_secs.max(1));
    let mut responses: Vec<EventResponse> = Vec::new();

    loop {
        if take.is_some_and(|n| responses.len() >= n) {
            break;
        }
        match tokio::time::timeout_at(deadline, rx.recv()).await {
            Ok(Some(FeedEvent::Item(response))) => responses.push(*response),
            Ok(Some(FeedEvent::Failed(err))) => {
                handle.stop();
                return Err(err).context("event feed failed");
            }
            // Stream over, channel gone, or deadline hit: print what we have.
            Ok(Some(FeedEvent::Closed)) | Ok(None) | Err(_) => break,
        }
    }
    handle.stop();

    if responses.is_empty() {
        println!("No events received.");
        return Ok(());
    }

    // Same presentation order as the list view: newest first, stable.
    responses.sort_by(|a, b| b.event.created.cmp(&a.event.created));
    for response in &responses {
        let event = &response.event;
        println!(
            "{:>6}  {}  {}",
            event.id,
            format_time(&event.created),
            event.title
        );
    }
    Ok(())
}

/// Shows one event and its acknowledgements.
///
/// The acknowledgement fetch runs strictly after the event fetch, addressed
/// by the fetched response's delivery metadata.
pub async fn show(config: &Config, id: i64) -> Result<()> {
    let client = GatewayClient::new(&config.gateway).context("create gateway client")?;

    let response = client
        .fetch_by_id(id)
        .await
        .with_context(|| format!("fetch event {id}"))?;
    let acknowledgements = client
        .fetch_acknowledgements(&response)
        .await
        .with_context(|| format!("fetch acknowledgements for event {id}"))?;

    let event = &response.event;
    println!("Event #{}: {}", event.id, event.title);
    println!("Created:  {}", format_time(&event.created));
    if !event.category.is_empty() {
        println!("Category: {}", event.category);
    }
    if !event.location.is_empty() {
        println!("Location: {}", event.location);
    }
    if !event.summary.is_empty() {
        println!("\n{}", event.summary);
    }

    println!("\nAcknowledgements ({}):", acknowledgements.len());
    for ack in &acknowledgements {
        if ack.note.is_empty() {
            println!("  {}  {}", format_time(&ack.created), ack.responder);
        } else {
            println!(
                "  {}  {}: {}",
                format_time(&ack.created),
                ack.responder,
                ack.note
            );
        }
    }
    Ok(())
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}
