//! Stats view rendering.
//!
//! Per-band share gauges, value statistics and a sparkline trend of the
//! buffered history.

use probwatch_core::{Status, ValueRange};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::{band_range, format_value};

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the Stats view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Good
        Constraint::Length(3), // Normal
        Constraint::Length(3), // Bad
        Constraint::Length(6), // Values
        Constraint::Min(3),    // Trend
    ])
    .split(area);

    for (i, status) in Status::all().into_iter().enumerate() {
        render_band(frame, app, status, chunks[i]);
    }
    render_values(frame, app, chunks[3]);
    render_trend(frame, app, chunks[4]);
}

fn render_band(frame: &mut Frame, app: &App, status: Status, area: Rect) {
    let stats = &app.stats;
    let percent = stats.percent_of(status);
    let title = format!(" {} ({}) ", status.label(), band_range(status));

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(title, app.theme.status_style(status)))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .gauge_style(Style::default().fg(app.theme.status_color(status)))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{} of {} ({:.0}%)",
            stats.count_of(status),
            stats.count,
            percent
        ));

    frame.render_widget(gauge, area);
}

fn render_values(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.stats;
    let value = |v: Option<f64>| v.map(format_value).unwrap_or_else(|| "-".to_string());
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let worst = match stats.worst() {
        Some(status) => Span::styled(
            format!(" {} ", status.label().to_uppercase()),
            app.theme.badge_style(status),
        ),
        None => Span::raw("-"),
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(" Samples: "),
            Span::styled(format!("{}", stats.count), bold),
            Span::raw(format!(" / {}", app.series.capacity())),
        ]),
        Line::from(vec![
            Span::raw(" Min: "),
            Span::styled(value(stats.min), bold),
            Span::raw("   Max: "),
            Span::styled(value(stats.max), bold),
            Span::raw("   Mean: "),
            Span::styled(value(stats.mean), bold),
        ]),
        Line::from(vec![
            Span::raw(" Latest: "),
            Span::styled(value(app.latest().map(|o| o.value())), bold),
            Span::raw("   Worst band: "),
            worst,
        ]),
    ];

    let block = Block::default()
        .title(" Values ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_trend(frame: &mut Frame, app: &App, area: Rect) {
    let chronological = app.series.chronological();
    let spans: Vec<Span> = chronological
        .iter()
        .map(|obs| {
            Span::styled(
                sparkline_char(obs.value(), &app.value_range).to_string(),
                Style::default().fg(app.theme.status_color(obs.status())),
            )
        })
        .collect();

    let block = Block::default()
        .title(" Trend (oldest → newest) ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let body = if spans.is_empty() {
        Line::from(Span::styled(" -", Style::default().fg(app.theme.muted)))
    } else {
        let mut line = vec![Span::raw(" ")];
        line.extend(spans);
        Line::from(line)
    };

    frame.render_widget(Paragraph::new(body).block(block), area);
}

/// Sparkline glyph for `value`, scaled to `range`.
pub fn sparkline_char(value: f64, range: &ValueRange) -> char {
    let level = (range.fraction(value) * 7.0).round() as usize;
    SPARKLINE_CHARS[level.min(7)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_uses_extremes() {
        let range = ValueRange::default();
        assert_eq!(sparkline_char(0.0, &range), '▁');
        assert_eq!(sparkline_char(100.0, &range), '█');
        assert_eq!(sparkline_char(250.0, &range), '█');
        assert_eq!(sparkline_char(-1.0, &range), '▁');
    }

    #[test]
    fn sparkline_midpoint() {
        assert_eq!(sparkline_char(50.0, &ValueRange::default()), '▅');
    }

    #[test]
    fn sparkline_follows_configured_range() {
        let narrow = ValueRange::new(0.5, 99.5);
        assert_eq!(sparkline_char(0.5, &narrow), '▁');
        assert_eq!(sparkline_char(99.5, &narrow), '█');

        let wide = ValueRange::new(0.0, 200.0);
        assert_eq!(sparkline_char(100.0, &wide), '▅');
        assert_eq!(sparkline_char(200.0, &wide), '█');
    }
}
