//! History view rendering.
//!
//! Displays a table of the buffered observations, newest first, with a
//! value bar and status badge per row.

use probwatch_core::ValueRange;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::{format_time, format_value};

/// Width of the inline value bar, in cells.
const BAR_WIDTH: usize = 20;

/// Render the History view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.series.is_empty() {
        let block = block.title(" History ");
        let empty = Paragraph::new(" No observations yet")
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Time"),
        Cell::from("Value"),
        Cell::from("Level"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = app
        .series
        .iter()
        .enumerate()
        .map(|(i, obs)| {
            let status_style = app.theme.status_style(obs.status());
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(format_time(obs)),
                Cell::from(format_value(obs.value()))
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(Span::styled(value_bar(obs.value(), &app.value_range, BAR_WIDTH), status_style)),
                Cell::from(obs.status().label()).style(status_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // #
        Constraint::Length(10), // Time
        Constraint::Length(8),  // Value
        Constraint::Min(BAR_WIDTH as u16),
        Constraint::Length(8), // Status
    ];

    let selected = app.selected_index.min(app.series.len().saturating_sub(1));
    let title = format!(
        " History ({}/{}) [{}/{}] ",
        app.series.len(),
        app.series.capacity(),
        selected + 1,
        app.series.len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Horizontal bar for `value` scaled to `range`, `width` cells wide.
pub fn value_bar(value: f64, range: &ValueRange, width: usize) -> String {
    let filled = ((range.fraction(value) * width as f64).round() as usize).min(width);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_bar_scales_to_width() {
        let range = ValueRange::default();
        assert_eq!(value_bar(0.0, &range, 10), "░░░░░░░░░░");
        assert_eq!(value_bar(100.0, &range, 10), "██████████");
        assert_eq!(value_bar(50.0, &range, 10), "█████░░░░░");
    }

    #[test]
    fn value_bar_clamps_out_of_range() {
        let range = ValueRange::default();
        assert_eq!(value_bar(150.0, &range, 4), "████");
        assert_eq!(value_bar(-5.0, &range, 4), "░░░░");
    }

    #[test]
    fn value_bar_follows_configured_range() {
        let narrow = ValueRange::new(0.5, 99.5);
        assert_eq!(value_bar(99.5, &narrow, 4), "████");
        assert_eq!(value_bar(0.5, &narrow, 4), "░░░░");

        let wide = ValueRange::new(0.0, 200.0);
        assert_eq!(value_bar(100.0, &wide, 10), "█████░░░░░");
    }
}
