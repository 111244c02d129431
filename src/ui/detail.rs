//! Detail overlay rendering.
//!
//! Displays a modal overlay for the observation selected in the History view.

use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_elapsed;
use crate::ui::format_value;
use crate::ui::history::value_bar;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 40;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 12;

/// Render the selected observation as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(obs) = app.selected_observation() else {
        return;
    };

    let overlay_width = (area.width * 70 / 100).clamp(MIN_OVERLAY_WIDTH, 64);
    let overlay_height = MIN_OVERLAY_HEIGHT;
    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(app.theme.muted);
    let age = (chrono::Utc::now() - obs.timestamp()).to_std().unwrap_or_default();
    let local = obs.timestamp().with_timezone(&Local);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", obs.status().label().to_uppercase()),
                app.theme.badge_style(obs.status()),
            ),
            Span::raw("  "),
            Span::styled(format_value(obs.value()), bold),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Time:     "),
            Span::styled(local.format("%Y-%m-%d %H:%M:%S%.3f").to_string(), bold),
            Span::styled(format!("  ({} ago)", format_elapsed(age)), muted),
        ]),
        Line::from(vec![
            Span::raw(" Level:    "),
            Span::styled(
                value_bar(obs.value(), &app.value_range, 30),
                app.theme.status_style(obs.status()),
            ),
        ]),
        Line::from(vec![
            Span::raw(" Position: "),
            Span::styled(
                format!("{} of {}", app.selected_index + 1, app.series.len()),
                bold,
            ),
            Span::styled(" (1 = newest)", muted),
        ]),
        Line::from(vec![
            Span::raw(" Id:       "),
            Span::styled(obs.id().to_string(), muted),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " ↑↓:previous/next  Esc:close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Observation ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
