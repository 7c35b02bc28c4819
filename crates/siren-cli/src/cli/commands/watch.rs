//! Watch command handler (the default mode).

use anyhow::{Context, Result};
use siren_core::config::Config;

pub fn run(config: &Config) -> Result<()> {
    siren_tui::run_watch(config).context("watch mode failed")
}
