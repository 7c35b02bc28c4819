//! Status line state.

/// Connection and version facts the status line renders each frame.
#[derive(Debug, Clone)]
pub struct StatusState {
    /// Result of the latest connectivity probe.
    pub online: bool,
    /// Whether the event feed subscription is still delivering.
    pub feed_connected: bool,
    /// Version the running application reports.
    pub version: String,
}

impl StatusState {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            online: true,
            feed_connected: true,
            version: version.into(),
        }
    }
}
