//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use probwatch_core::Status;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::duration::format_elapsed;
use crate::ui::format_value;

/// Render the header bar with the latest reading and band counts.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" PROBWATCH ", Style::default().add_modifier(Modifier::BOLD));

    let Some(latest) = app.latest() else {
        let line = Line::from(vec![title, Span::raw("│ Waiting for data...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let mut spans = vec![
        Span::styled("● ", app.theme.status_style(latest.status())),
        title,
        Span::raw("│ "),
        Span::styled(
            format_value(latest.value()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(latest.status().label(), app.theme.status_style(latest.status())),
        Span::raw(" │ "),
    ];

    for status in Status::all() {
        let count = app.stats.count_of(status);
        spans.push(if count > 0 {
            Span::styled(format!("{}", count), app.theme.status_style(status))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        });
        spans.push(Span::raw(format!(" {} ", status.label())));
    }

    spans.push(Span::raw("│ "));
    spans.push(Span::styled(
        format!("{}", app.series.len()),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(format!("/{} samples", app.series.capacity())));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Chart "),
        Line::from(" 2:History "),
        Line::from(" 3:Stats "),
    ];

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Breadcrumb for the current navigation state.
pub fn breadcrumb(app: &App) -> String {
    if app.show_detail_overlay {
        format!("{} > #{}", app.current_view.label(), app.selected_index + 1)
    } else {
        app.current_view.label().to_string()
    }
}

/// Render the status bar at the bottom.
///
/// Shows: breadcrumb trail, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Chart => "t:theme c:clear e:export Tab:switch ?:help q:quit",
        View::History => "↑↓:select Enter:detail Tab:switch ?:help q:quit",
        View::Stats => "t:theme c:clear Tab:switch ?:help q:quit",
    };

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | {} | q:quit", err, app.source_description())
    } else if let Some(updated) = app.last_updated {
        format!(
            " {} | Updated {} ago | {}",
            breadcrumb(app),
            format_elapsed(updated.elapsed()),
            controls,
        )
    } else {
        format!(" Waiting for {}... | q:quit", app.source_description())
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2/3       Jump to view"),
        Line::from("  ↑/↓ j/k     Select observation"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Newest/oldest"),
        Line::from("  Enter       View detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" General"),
        Line::from("  t           Toggle light/dark"),
        Line::from("  c           Clear history"),
        Line::from("  r           Poll now"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ChannelSource;
    use crate::ui::ThemeMode;
    use chrono::Utc;
    use probwatch_core::{Observation, SeriesBuffer};

    #[test]
    fn breadcrumb_tracks_overlay() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), SeriesBuffer::new(5).unwrap(), ThemeMode::Dark);
        assert_eq!(breadcrumb(&app), "Chart");

        tx.send(Observation::new(Utc::now(), 12.0)).unwrap();
        app.reload_data();
        app.set_view(View::History);
        app.enter_detail();
        assert_eq!(breadcrumb(&app), "History > #1");
    }
}
