//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer itself never
//! performs I/O.

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Load the detail view data: fetch the event by id, then its
    /// acknowledgements, sequentially.
    LoadDetails { task: TaskId, id: i64 },

    /// Probe the gateway for the next event id (list refresh).
    ProbeNext { task: TaskId, id: i64 },

    /// Ask the update watcher to apply a release.
    ApplyUpdate { version: String },
}
