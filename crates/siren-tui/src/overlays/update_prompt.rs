//! Update prompt overlay.
//!
//! Shown when the update watcher announces a newer release. Offers two
//! choices: apply now (activation plus full reload) or defer (toast and
//! back to polling). Deferring does not suppress the independent
//! activation toast; the two signals are not coordinated.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::OverlayUpdate;
use crate::common::Toast;
use crate::effects::UiEffect;

/// Which button the cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateChoice {
    Install,
    Defer,
}

#[derive(Debug)]
pub struct UpdatePromptState {
    pub version: String,
    /// Application-supplied message from the release descriptor.
    pub message: String,
    pub selected: UpdateChoice,
}

impl UpdatePromptState {
    pub fn open(version: String, message: String) -> Self {
        Self {
            version,
            message,
            selected: UpdateChoice::Install,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selected = match self.selected {
                    UpdateChoice::Install => UpdateChoice::Defer,
                    UpdateChoice::Defer => UpdateChoice::Install,
                };
                OverlayUpdate::stay()
            }
            KeyCode::Enter => match self.selected {
                UpdateChoice::Install => {
                    OverlayUpdate::close().with_effects(vec![UiEffect::ApplyUpdate {
                        version: self.version.clone(),
                    }])
                }
                UpdateChoice::Defer => self.defer(),
            },
            // Esc defers, same as choosing "Not now".
            KeyCode::Esc => self.defer(),
            _ => OverlayUpdate::stay(),
        }
    }

    fn defer(&self) -> OverlayUpdate {
        OverlayUpdate::close().with_toast(Toast::info("Update deferred"))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 52.min(area.width.saturating_sub(4));
        let height = 8;
        let popup = centered(area, width, height);

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Update available ");

        let button = |label: &str, active: bool| {
            let style = if active {
                Style::default()
                    .bg(Color::Yellow)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {label} "), style)
        };

        let lines = vec![
            Line::from(""),
            Line::from(self.message.as_str()),
            Line::from(""),
            Line::from(vec![
                Span::raw("   "),
                button("Install now", self.selected == UpdateChoice::Install),
                Span::raw("   "),
                button("Not now", self.selected == UpdateChoice::Defer),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                " ←/→ choose   Enter confirm   Esc defer",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(body, popup);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
