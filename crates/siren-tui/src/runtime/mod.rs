//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! The runtime also owns the background watchers:
//! - the event feed subscription (long-lived SSE)
//! - the connectivity probe
//! - the update watcher (started only when updates are enabled)
//!
//! Each watcher has its own channel drained once per loop iteration; async
//! task results arrive through the shared inbox channel.

mod handlers;

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use siren_core::config::{Config, Readiness};
use siren_core::connectivity::{self, ConnectivityHandle};
use siren_core::gateway::feed::{self, FeedEvent, FeedHandle};
use siren_core::gateway::GatewayClient;
use siren_core::update::{self as core_update, UpdateEvent, UpdateHandle};
use tokio::sync::{mpsc, watch};

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while something is animating (~60fps).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// How a runtime session ended.
#[derive(Debug)]
pub enum Outcome {
    /// The user quit; the process exits.
    Quit,
    /// An update was activated; the caller rebuilds the runtime from
    /// scratch (full reload) with the given version as current.
    Reload { version: String },
}

/// Full-screen TUI runtime.
///
/// Owns the terminal, the state, and the background watchers. Terminal
/// state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: GatewayClient,

    /// Inbox for async task results.
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,

    /// Watcher channels.
    feed_rx: mpsc::UnboundedReceiver<FeedEvent>,
    update_rx: mpsc::UnboundedReceiver<UpdateEvent>,
    conn_rx: mpsc::UnboundedReceiver<bool>,

    /// Watcher handles, stopped on teardown.
    feed: FeedHandle,
    connectivity: ConnectivityHandle,
    updates: Option<UpdateHandle>,

    /// One-shot readiness condition for the update watcher.
    ready_tx: watch::Sender<bool>,
    stable_sent: bool,

    last_tick: std::time::Instant,
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime and starts the background watchers.
    ///
    /// Must be called from within a tokio runtime context.
    pub fn new(config: &Config, current_version: &str) -> Result<Self> {
        // Set up panic hook BEFORE entering the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(current_version);
        let client =
            GatewayClient::new(&config.gateway).context("Failed to create gateway client")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let (feed_tx, feed_rx) = mpsc::unbounded_channel();
        let feed = feed::start(client.clone(), feed_tx);

        let (conn_tx, conn_rx) = mpsc::unbounded_channel();
        let connectivity = connectivity::start(
            client.clone(),
            config.connectivity.probe_interval(),
            conn_tx,
        );

        let (ready_tx, ready_rx) = watch::channel(false);
        if config.updates.readiness == Readiness::Immediate {
            let _ = ready_tx.send(true);
        }
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let updates = config.updates.enabled.then(|| {
            core_update::start(
                client.clone(),
                config.updates.clone(),
                current_version.to_string(),
                ready_rx,
                update_tx,
            )
        });

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            feed_rx,
            update_rx,
            conn_rx,
            feed,
            connectivity,
            updates,
            ready_tx,
            stable_sent: false,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until quit or reload.
    pub fn run(&mut self) -> Result<Outcome> {
        let outcome = self.event_loop();
        self.teardown();
        outcome
    }

    fn event_loop(&mut self) -> Result<Outcome> {
        let mut dirty = true; // Start dirty to ensure initial render

        loop {
            if self.state.tui.should_quit {
                return Ok(Outcome::Quit);
            }
            if let Some(version) = self.state.tui.reload.take() {
                return Ok(Outcome::Reload { version });
            }

            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                // Only Tick triggers render - this caps the frame rate at
                // the tick cadence; other events batch to the next Tick.
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
                self.notify_stable();
            }
        }
    }

    /// Signals the readiness condition after the first rendered frame.
    fn notify_stable(&mut self) {
        if !self.stable_sent {
            self.stable_sent = true;
            let _ = self.ready_tx.send(true);
        }
    }

    /// Stops the background watchers. The feed stops delivering before the
    /// state is dropped, so nothing is appended after teardown.
    fn teardown(&mut self) {
        self.feed.stop();
        self.connectivity.stop();
        if let Some(updates) = &self.updates {
            updates.stop();
        }
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while animating (spinners, toasts) or during recent
        // interaction; slow polling otherwise to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running()
            || !self.state.tui.toasts.is_empty()
            || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain the watcher channels.
        while let Ok(feed_event) = self.feed_rx.try_recv() {
            events.push(UiEvent::Feed(feed_event));
        }
        while let Ok(update_event) = self.update_rx.try_recv() {
            events.push(UiEvent::Update(update_event));
        }
        while let Ok(online) = self.conn_rx.try_recv() {
            events.push(UiEvent::Connectivity { online });
        }

        // Drain the inbox - async task results arrive here.
        while let Ok(inbox_event) = self.inbox_rx.try_recv() {
            events.push(inbox_event);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());

        // Poll terminal events: non-blocking when events are already queued,
        // otherwise block until the next tick is due.
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted
    /// lifecycle around `f`.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let _ = tx.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted { id },
        });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            UiEffect::LoadDetails { task, id } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::DetailsLoad, task, move || {
                    handlers::load_details(client, id)
                });
            }

            UiEffect::ProbeNext { task, id } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Refresh, task, move || {
                    handlers::refresh_probe(client, id)
                });
            }

            UiEffect::ApplyUpdate { version } => {
                if let Some(updates) = &self.updates {
                    updates.apply(version);
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        self.teardown();
        let _ = terminal::restore_terminal();
    }
}
