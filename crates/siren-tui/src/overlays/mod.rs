//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard
//! input. Each overlay is self-contained: it owns its state, key handler,
//! and render function.

pub mod update_prompt;

pub use update_prompt::UpdatePromptState;

use crate::common::Toast;
use crate::effects::UiEffect;

/// Active overlay, if any.
#[derive(Debug)]
pub enum Overlay {
    /// Update available: apply now or defer.
    UpdatePrompt(UpdatePromptState),
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
    pub toast: Option<Toast>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
            effects: Vec::new(),
            toast: None,
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
            effects: Vec::new(),
            toast: None,
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn with_toast(mut self, toast: Toast) -> Self {
        self.toast = Some(toast);
        self
    }
}
