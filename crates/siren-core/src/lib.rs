//! Core library for Siren: gateway client, configuration, and the
//! background watchers (feed, connectivity, updates) the UI consumes.

pub mod config;
pub mod connectivity;
pub mod gateway;
pub mod logging;
pub mod update;

/// Version of the running application, taken from the workspace.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
