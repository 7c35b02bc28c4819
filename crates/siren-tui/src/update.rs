//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use siren_core::gateway::FeedEvent;
use siren_core::update::UpdateEvent;

use crate::common::{TaskKind, Toast};
use crate::effects::UiEffect;
use crate::events::{DetailsUiEvent, RefreshUiEvent, UiEvent};
use crate::features::details::{DetailsPhase, DetailsState};
use crate::overlays::{Overlay, OverlayTransition, UpdatePromptState};
use crate::state::{AppState, TuiState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            app.tui.toasts.tick();
            vec![]
        }

        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),

        UiEvent::Feed(feed_event) => {
            handle_feed_event(&mut app.tui, feed_event);
            vec![]
        }

        UiEvent::Update(update_event) => handle_update_event(app, update_event),

        UiEvent::Connectivity { online } => {
            app.tui.status.online = online;
            vec![]
        }

        UiEvent::Details(details_event) => {
            handle_details_event(&mut app.tui, details_event);
            vec![]
        }

        UiEvent::Refresh(RefreshUiEvent::Completed { fetched }) => {
            // Failures were logged by the probe task; either way the refresh
            // indicator has already been cleared by task completion.
            if let Some(response) = fetched {
                app.tui.events.push(*response);
            }
            vec![]
        }

        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }

        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if ok {
                update(app, *completed.result)
            } else {
                // A superseded or torn-down task; its result is discarded.
                vec![]
            }
        }
    }
}

// ============================================================================
// Watcher signals
// ============================================================================

fn handle_feed_event(tui: &mut TuiState, event: FeedEvent) {
    match event {
        FeedEvent::Item(response) => {
            // Items arriving after teardown are dropped, never appended.
            if tui.feed_active {
                tui.events.push(*response);
                tui.events.clamp_selection();
            }
        }
        FeedEvent::Failed(error) => {
            tui.feed_active = false;
            tui.status.feed_connected = false;
            tracing::warn!(error = %error, "event feed lost");
            tui.toasts.push(Toast::warning("Event feed disconnected"));
        }
        FeedEvent::Closed => {
            tui.feed_active = false;
            tui.status.feed_connected = false;
        }
    }
}

fn handle_update_event(app: &mut AppState, event: UpdateEvent) -> Vec<UiEffect> {
    match event {
        UpdateEvent::Available { version, message } => {
            if app.overlay.is_none() {
                app.overlay = Some(Overlay::UpdatePrompt(UpdatePromptState::open(
                    version, message,
                )));
            }
            vec![]
        }
        UpdateEvent::Activated { version } => {
            // Independent of whichever path requested the apply; this toast
            // can queue right behind a deferral toast.
            app.tui
                .toasts
                .push(Toast::success(format!("Update {version} activated")));
            app.tui.reload = Some(version);
            vec![]
        }
    }
}

fn handle_details_event(tui: &mut TuiState, event: DetailsUiEvent) {
    match event {
        DetailsUiEvent::Loaded {
            id,
            response,
            acknowledgements,
        } => {
            if let Some(details) = &mut tui.details
                && details.id == id
            {
                details.phase = DetailsPhase::Loaded {
                    response,
                    acknowledgements,
                };
            }
        }
        DetailsUiEvent::Failed { id, error } => {
            if let Some(details) = &mut tui.details
                && details.id == id
            {
                details.phase = DetailsPhase::Failed { error };
            }
        }
    }
}

// ============================================================================
// Terminal input
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    // The active overlay takes all input.
    if let Some(overlay) = app.overlay.as_mut() {
        let overlay_update = match overlay {
            Overlay::UpdatePrompt(prompt) => prompt.handle_key(key),
        };
        if let Some(toast) = overlay_update.toast {
            app.tui.toasts.push(toast);
        }
        if matches!(overlay_update.transition, OverlayTransition::Close) {
            app.overlay = None;
        }
        return overlay_update.effects;
    }

    if app.tui.showing_details() {
        handle_details_key(&mut app.tui, key)
    } else {
        handle_list_key(&mut app.tui, key)
    }
}

fn handle_list_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Up | KeyCode::Char('k') => {
            tui.events.select_prev();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            tui.events.select_next();
            vec![]
        }
        KeyCode::Enter => {
            let Some(id) = tui.events.selected_response().map(|r| r.event.id) else {
                return vec![];
            };
            let task = tui.task_seq.next_id();
            tui.details = Some(DetailsState::loading(id));
            vec![UiEffect::LoadDetails { task, id }]
        }
        KeyCode::Char('r') => {
            if tui.tasks.refresh.is_running() {
                return vec![];
            }
            let task = tui.task_seq.next_id();
            let id = tui.events.next_probe_id();
            vec![UiEffect::ProbeNext { task, id }]
        }
        _ => vec![],
    }
}

fn handle_details_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    let Some(details) = tui.details.as_mut() else {
        return vec![];
    };

    if details.editing_note {
        match key.code {
            KeyCode::Esc => details.editing_note = false,
            KeyCode::Backspace => {
                details.note.pop();
            }
            KeyCode::Char(c) => details.note.push(c),
            // Submission is not wired; Enter keeps the draft as-is.
            KeyCode::Enter => {}
            _ => {}
        }
        return vec![];
    }

    match key.code {
        KeyCode::Esc => {
            // Back to the list. The in-flight load (if any) keeps running;
            // its result is discarded at task completion.
            tui.details = None;
            tui.tasks.details_load.clear();
            vec![]
        }
        KeyCode::Char('n') => {
            details.editing_note = true;
            vec![]
        }
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => vec![],
    }
}
