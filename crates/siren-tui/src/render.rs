//! Frame rendering.
//!
//! Pure read of `AppState`; no mutation happens here.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use siren_core::gateway::{Acknowledgement, EventResponse};

use crate::common::{Toast, ToastLevel};
use crate::features::details::{DetailsPhase, DetailsState};
use crate::overlays::Overlay;
use crate::state::{AppState, TuiState};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Renders one frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let toast_height = u16::from(app.tui.toasts.current().is_some());
    let chunks = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(toast_height),
        Constraint::Length(1),
    ])
    .split(area);

    if let Some(details) = &app.tui.details {
        render_details(frame, chunks[0], &app.tui, details);
    } else {
        render_list(frame, chunks[0], &app.tui);
    }

    if let Some(toast) = app.tui.toasts.current() {
        render_toast(frame, chunks[1], toast);
    }
    render_status(frame, chunks[2], &app.tui);

    if let Some(Overlay::UpdatePrompt(prompt)) = &app.overlay {
        prompt.render(frame, area);
    }
}

// ============================================================================
// List view
// ============================================================================

fn render_list(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Events (newest first) ");

    let sorted = tui.events.sorted();
    if sorted.is_empty() {
        let hint = if tui.status.feed_connected {
            "Waiting for events…"
        } else {
            "Event feed disconnected."
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = sorted.iter().copied().map(list_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(tui.events.selected.min(sorted.len() - 1)));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn list_item(response: &EventResponse) -> ListItem<'_> {
    let event = &response.event;
    let line = Line::from(vec![
        Span::styled(format!("#{:<5}", event.id), Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{}  ", short_time(&event.created)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(event.title.as_str()),
        category_span(&event.category),
    ]);
    ListItem::new(line)
}

fn category_span(category: &str) -> Span<'_> {
    if category.is_empty() {
        Span::raw("")
    } else {
        Span::styled(format!("  [{category}]"), Style::default().fg(Color::Cyan))
    }
}

// ============================================================================
// Detail view
// ============================================================================

fn render_details(frame: &mut Frame, area: Rect, tui: &TuiState, details: &DetailsState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Event #{} (Esc to go back) ", details.id));

    let mut lines: Vec<Line> = Vec::new();

    if !tui.status.online {
        lines.push(Line::from(Span::styled(
            " OFFLINE - showing last fetched data ",
            Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    match &details.phase {
        DetailsPhase::Loading => {
            let spin = SPINNER[tui.spinner_frame % SPINNER.len()];
            lines.push(Line::from(format!("{spin} Loading…")));
        }
        DetailsPhase::Failed { error } => {
            lines.push(Line::from(Span::styled(
                format!("Could not load event: {error}"),
                Style::default().fg(Color::Red),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press Esc to return to the list.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        DetailsPhase::Loaded {
            response,
            acknowledgements,
        } => {
            push_event_lines(&mut lines, response, acknowledgements);
        }
    }

    lines.push(Line::from(""));
    push_note_lines(&mut lines, details);

    let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

fn push_event_lines(
    lines: &mut Vec<Line<'_>>,
    response: &EventResponse,
    acknowledgements: &[Acknowledgement],
) {
    let event = &response.event;
    lines.push(Line::from(Span::styled(
        event.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let mut facts = vec![format!("created {}", short_time(&event.created))];
    if !event.category.is_empty() {
        facts.push(event.category.clone());
    }
    if !event.location.is_empty() {
        facts.push(event.location.clone());
    }
    lines.push(Line::from(Span::styled(
        facts.join("  ·  "),
        Style::default().fg(Color::DarkGray),
    )));

    if !event.summary.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(event.summary.clone()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Acknowledgements ({})", acknowledgements.len()),
        Style::default().add_modifier(Modifier::UNDERLINED),
    )));
    if acknowledgements.is_empty() {
        lines.push(Line::from(Span::styled(
            "none yet",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for ack in acknowledgements {
        let mut spans = vec![
            Span::styled(format!("• {}", ack.responder), Style::default().fg(Color::Green)),
            Span::styled(
                format!("  {}", short_time(&ack.created)),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !ack.note.is_empty() {
            spans.push(Span::raw(format!("  {}", ack.note)));
        }
        lines.push(Line::from(spans));
    }
}

fn push_note_lines(lines: &mut Vec<Line<'_>>, details: &DetailsState) {
    if details.editing_note {
        lines.push(Line::from(vec![
            Span::styled("Note: ", Style::default().fg(Color::Yellow)),
            Span::raw(details.note.clone()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ]));
        lines.push(Line::from(Span::styled(
            "Esc stop editing",
            Style::default().fg(Color::DarkGray),
        )));
    } else if details.note.is_empty() {
        lines.push(Line::from(Span::styled(
            "n compose note",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled("Note draft: ", Style::default().fg(Color::DarkGray)),
            Span::raw(details.note.clone()),
        ]));
    }
}

// ============================================================================
// Toast and status line
// ============================================================================

fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let style = match toast.level {
        ToastLevel::Info => Style::default().bg(Color::Blue).fg(Color::White),
        ToastLevel::Success => Style::default().bg(Color::Green).fg(Color::Black),
        ToastLevel::Warning => Style::default().bg(Color::Yellow).fg(Color::Black),
    };
    let line = format!(" {} {} ", toast.level.icon(), toast.message);
    frame.render_widget(Paragraph::new(line).style(style), area);
}

fn render_status(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let mut left = vec![Span::styled(
        format!(" {} events ", tui.events.len()),
        Style::default().fg(Color::DarkGray),
    )];
    if !tui.status.feed_connected {
        left.push(Span::styled(
            " feed down ",
            Style::default().fg(Color::Red),
        ));
    }
    if tui.tasks.refresh.is_running() {
        let spin = SPINNER[tui.spinner_frame % SPINNER.len()];
        left.push(Span::styled(
            format!(" {spin} refreshing "),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(left)), area);

    let connectivity = if tui.status.online {
        Span::styled(" ONLINE ", Style::default().fg(Color::Green))
    } else {
        Span::styled(
            " OFFLINE ",
            Style::default().fg(Color::White).bg(Color::Red),
        )
    };
    let right = Line::from(vec![
        Span::styled(
            format!(" v{} ", tui.status.version),
            Style::default().fg(Color::DarkGray),
        ),
        connectivity,
    ]);
    frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
}

fn short_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}
