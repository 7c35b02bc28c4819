//! Full-screen TUI for Siren.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use runtime::{Outcome, TuiRuntime};
use siren_core::config::Config;

/// Runs the interactive watch loop.
///
/// Reload outcomes (update activation) rebuild the runtime from scratch:
/// all view state is discarded and the feed resubscribed, with the applied
/// version reported as current from then on.
///
/// Must be called from within a tokio runtime context.
pub fn run_watch(config: &Config) -> Result<()> {
    // Watch mode requires a terminal to render the TUI.
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Watch mode requires a terminal.\n\
             Use `siren events list` for non-interactive access."
        );
    }

    // Pre-TUI info to stderr (replaced by the alternate screen).
    let mut err = stderr();
    writeln!(err, "Siren")?;
    writeln!(err, "Gateway: {}", config.gateway.base_url)?;
    err.flush()?;

    let mut current_version = siren_core::APP_VERSION.to_string();
    loop {
        let mut runtime = TuiRuntime::new(config, &current_version)?;
        match runtime.run()? {
            Outcome::Quit => break,
            Outcome::Reload { version } => {
                drop(runtime);
                tracing::info!(%version, "reloading after update activation");
                current_version = version;
            }
        }
    }

    // Terminal restored by this point.
    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
