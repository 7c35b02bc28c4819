//! UI event types.
//!
//! Everything the runtime feeds into the reducer: terminal input, ticks,
//! watcher signals (feed, update, connectivity), and async task results.

use siren_core::gateway::{Acknowledgement, EventResponse, FeedEvent};
use siren_core::update::UpdateEvent;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (spinner animation, toast expiry).
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// Event feed signal (item, failure, close).
    Feed(FeedEvent),
    /// Update watcher signal (available, activated).
    Update(UpdateEvent),
    /// Connectivity probe result changed.
    Connectivity { online: bool },
    /// Detail view task result.
    Details(DetailsUiEvent),
    /// Refresh probe result.
    Refresh(RefreshUiEvent),
    /// An async task started.
    TaskStarted { kind: TaskKind, started: TaskStarted },
    /// An async task finished; `completed.result` is applied only if the
    /// task is still the active one of its kind.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },
}

/// Results of the detail view's sequential load.
#[derive(Debug)]
pub enum DetailsUiEvent {
    Loaded {
        id: i64,
        response: Box<EventResponse>,
        acknowledgements: Vec<Acknowledgement>,
    },
    Failed {
        id: i64,
        error: String,
    },
}

/// Result of the next-id refresh probe.
#[derive(Debug)]
pub enum RefreshUiEvent {
    /// The probe finished. `fetched` is `None` when the gateway had no such
    /// id or the request failed; failures are logged, never surfaced.
    Completed { fetched: Option<Box<EventResponse>> },
}
