//! Detail view state.
//!
//! Opened for one event id; a single task fetches the event and then its
//! acknowledgements, strictly in that order. Either failure surfaces as the
//! `Failed` phase. The draft note is editable but has no submit action.

use siren_core::gateway::{Acknowledgement, EventResponse};

/// Load phase of the detail view.
#[derive(Debug)]
pub enum DetailsPhase {
    /// Fetches in flight.
    Loading,
    /// Event and acknowledgements present.
    Loaded {
        response: Box<EventResponse>,
        acknowledgements: Vec<Acknowledgement>,
    },
    /// Either fetch failed; the view shows the error instead of data.
    Failed { error: String },
}

/// State of the detail view.
#[derive(Debug)]
pub struct DetailsState {
    /// Event id this view was opened for.
    pub id: i64,
    pub phase: DetailsPhase,
    /// Draft note text. Held only; submission is not wired.
    pub note: String,
    /// Whether keystrokes currently edit the note.
    pub editing_note: bool,
}

impl DetailsState {
    /// Creates the view in its loading phase.
    pub fn loading(id: i64) -> Self {
        Self {
            id,
            phase: DetailsPhase::Loading,
            note: String::new(),
            editing_note: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, DetailsPhase::Loading)
    }
}
