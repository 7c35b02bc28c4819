//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── events: EventsState       (list view: held responses, cursor)
//! │   ├── details: Option<DetailsState> (detail view when open)
//! │   ├── status: StatusState       (connectivity, feed, version)
//! │   ├── toasts: ToastQueue        (transient confirmations)
//! │   ├── task_seq / tasks          (async task lifecycle)
//! │   └── should_quit / reload      (loop exit conditions)
//! └── overlay: Option<Overlay>      (modal overlays)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can borrow both without conflicts.

use crate::common::{TaskSeq, Tasks, ToastQueue};
use crate::features::details::DetailsState;
use crate::features::events::EventsState;
use crate::features::statusline::StatusState;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// Creates fresh state reporting the given application version.
    pub fn new(version: &str) -> Self {
        Self {
            tui: TuiState::new(version),
            overlay: None,
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Set to the applied version when a full reload is required.
    pub reload: Option<String>,
    /// List view state.
    pub events: EventsState,
    /// Detail view state; `Some` while the detail view is open.
    pub details: Option<DetailsState>,
    /// Whether feed items are still accepted. Cleared on teardown and when
    /// the subscription closes; items arriving afterwards are discarded.
    pub feed_active: bool,
    /// Status line facts.
    pub status: StatusState,
    /// Transient notifications.
    pub toasts: ToastQueue,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(version: &str) -> Self {
        Self {
            should_quit: false,
            reload: None,
            events: EventsState::new(),
            details: None,
            feed_active: true,
            status: StatusState::new(version),
            toasts: ToastQueue::new(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
        }
    }

    /// True while the detail view is on screen.
    pub fn showing_details(&self) -> bool {
        self.details.is_some()
    }
}
