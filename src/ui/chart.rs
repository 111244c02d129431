//! Chart view rendering.
//!
//! Draws the history on a canvas using the core projection: a plot frame,
//! dashed-looking threshold markers at 33% and 66%, y-axis ticks, the
//! connecting path and status-colored point markers. Canvas units are
//! terminal cells, so text labels line up with the projected geometry.

use chrono::Utc;
use probwatch_core::{
    project_series, Observation, PlotArea, Status, ValueRange, BAD_THRESHOLD, GOOD_THRESHOLD,
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::ui::{band_range, format_time, format_value};

/// Columns reserved left of the plot for y-axis labels ("100%").
const LEFT_GUTTER: f64 = 6.0;
/// Columns reserved right of the plot for threshold labels ("66% bad").
const RIGHT_GUTTER: f64 = 9.0;
/// Rows reserved under the plot for time labels.
const BOTTOM_GUTTER: f64 = 1.0;
/// Value ticks on the y axis.
const Y_TICKS: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];

/// Plot rectangle inside a canvas of `width` x `height` cells.
pub fn plot_area(width: u16, height: u16) -> PlotArea {
    let w = f64::from(width);
    let h = f64::from(height);
    PlotArea::new(
        LEFT_GUTTER,
        0.5,
        (w - LEFT_GUTTER - RIGHT_GUTTER).max(1.0),
        (h - BOTTOM_GUTTER - 1.0).max(1.0),
    )
}

/// Projected geometry in canvas coordinates (y grows upwards).
#[derive(Debug, Default)]
pub struct Scene {
    /// Segments of the connecting path, earliest to latest.
    pub path: Vec<((f64, f64), (f64, f64))>,
    /// Point markers per status band.
    pub good: Vec<(f64, f64)>,
    pub normal: Vec<(f64, f64)>,
    pub bad: Vec<(f64, f64)>,
    /// Earliest and latest observation, for time labels.
    pub first: Option<Observation>,
    pub last: Option<Observation>,
}

impl Scene {
    /// Project `observations` (any order) into canvas coordinates.
    pub fn build<'a, I>(
        observations: I,
        value_range: &ValueRange,
        plot: &PlotArea,
        canvas_height: f64,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let projected = project_series(observations, value_range, plot, Utc::now());
        let flip = |x: f64, y: f64| (x, canvas_height - y);

        let mut scene = Scene::default();
        for pair in projected.windows(2) {
            let (_, a) = &pair[0];
            let (_, b) = &pair[1];
            scene.path.push((flip(a.x, a.y), flip(b.x, b.y)));
        }
        for (obs, p) in &projected {
            let bucket = match obs.status() {
                Status::Good => &mut scene.good,
                Status::Normal => &mut scene.normal,
                Status::Bad => &mut scene.bad,
            };
            bucket.push(flip(p.x, p.y));
        }
        scene.first = projected.first().map(|(o, _)| o.clone());
        scene.last = projected.last().map(|(o, _)| o.clone());
        scene
    }
}

/// Render the Chart view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Latest measurement
        Constraint::Min(6),    // Chart
    ])
    .split(area);

    render_latest(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
}

fn legend_entry(status: Status) -> String {
    format!("{} {}", status.label(), band_range(status))
}

/// Latest value card with the threshold legend.
fn render_latest(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = match app.latest() {
        Some(obs) => vec![
            Span::raw(" Latest: "),
            Span::styled(
                format!(" {} ", obs.status().label().to_uppercase()),
                theme.badge_style(obs.status()),
            ),
            Span::raw(" "),
            Span::styled(
                format_value(obs.value()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" at {}", format_time(obs)),
                Style::default().fg(theme.muted),
            ),
        ],
        None => vec![Span::raw(" Waiting for first observation...")],
    };

    spans.push(Span::raw("   │"));
    for status in Status::all() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(legend_entry(status), theme.status_style(status)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .title(format!(
            " Probability ({}/{}) ",
            app.series.len(),
            app.series.capacity()
        ))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(area);
    let width = f64::from(inner.width);
    let height = f64::from(inner.height);
    let plot = plot_area(inner.width, inner.height);
    let value_range = app.value_range;
    let snapshot = app.series.snapshot();
    let scene = Scene::build(snapshot.iter(), &value_range, &plot, height);

    let y = |value: f64| height - value_range.y_for(value, &plot);
    let good_y = y(GOOD_THRESHOLD);
    let bad_y = y(BAD_THRESHOLD);
    let (left, right) = (plot.left, plot.right());
    let (top, bottom) = (height - plot.top, height - plot.bottom());

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            // Plot frame
            for (x1, y1, x2, y2) in [
                (left, bottom, right, bottom),
                (left, top, right, top),
                (left, bottom, left, top),
                (right, bottom, right, top),
            ] {
                ctx.draw(&CanvasLine::new(x1, y1, x2, y2, theme.muted));
            }

            // Threshold markers
            ctx.draw(&CanvasLine::new(left, bad_y, right, bad_y, theme.bad));
            ctx.draw(&CanvasLine::new(left, good_y, right, good_y, theme.good));
            ctx.layer();

            for (a, b) in &scene.path {
                ctx.draw(&CanvasLine::new(a.0, a.1, b.0, b.1, theme.path));
            }
            ctx.layer();

            for (coords, status) in [
                (&scene.good, Status::Good),
                (&scene.normal, Status::Normal),
                (&scene.bad, Status::Bad),
            ] {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: theme.status_color(status),
                });
            }

            // Labels
            for tick in Y_TICKS {
                if tick < value_range.min || tick > value_range.max {
                    continue;
                }
                ctx.print(
                    0.0,
                    y(tick),
                    Span::styled(format!("{:>4}%", tick), Style::default().fg(theme.muted)),
                );
            }
            ctx.print(
                right + 1.0,
                bad_y,
                Span::styled("66% bad", theme.status_style(Status::Bad)),
            );
            ctx.print(
                right + 1.0,
                good_y,
                Span::styled("33% good", theme.status_style(Status::Good)),
            );
            if let Some(first) = &scene.first {
                let label = Span::styled(format_time(first), Style::default().fg(theme.muted));
                ctx.print(left, 0.0, label);
            }
            if let Some(last) = scene.last.as_ref().filter(|_| !scene.path.is_empty()) {
                let label = format_time(last);
                let x = (right - label.len() as f64).max(left);
                ctx.print(x, 0.0, Span::styled(label, Style::default().fg(theme.muted)));
            }
        });

    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64, value: f64) -> Observation {
        Observation::new(Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(), value)
    }

    #[test]
    fn legend_names_band_intervals() {
        assert_eq!(legend_entry(Status::Good), "good ≤ 33%");
        assert_eq!(legend_entry(Status::Normal), "normal > 33% and < 66%");
        assert_eq!(legend_entry(Status::Bad), "bad ≥ 66%");
    }

    #[test]
    fn plot_area_leaves_gutters() {
        let plot = plot_area(80, 20);
        assert_eq!(plot.left, 6.0);
        assert_eq!(plot.right(), 71.0);
        assert!(plot.bottom() <= 19.0);
    }

    #[test]
    fn plot_area_never_collapses() {
        let plot = plot_area(4, 1);
        assert!(plot.width >= 1.0);
        assert!(plot.height >= 1.0);
    }

    #[test]
    fn scene_buckets_points_by_status() {
        let newest_first = vec![at(2, 90.0), at(1, 50.0), at(0, 10.0)];
        let plot = plot_area(80, 20);
        let scene = Scene::build(&newest_first, &ValueRange::default(), &plot, 20.0);

        assert_eq!(scene.path.len(), 2);
        assert_eq!(scene.good.len(), 1);
        assert_eq!(scene.normal.len(), 1);
        assert_eq!(scene.bad.len(), 1);
        assert_eq!(scene.first.as_ref().unwrap().value(), 10.0);
        assert_eq!(scene.last.as_ref().unwrap().value(), 90.0);

        // Flipped: the bad point sits higher on the canvas than the good one
        assert!(scene.bad[0].1 > scene.good[0].1);
        // Earliest on the left edge, latest on the right edge
        assert_eq!(scene.good[0].0, plot.left);
        assert_eq!(scene.bad[0].0, plot.right());
    }

    #[test]
    fn single_point_sits_on_left_edge() {
        let plot = plot_area(80, 20);
        let scene = Scene::build(&vec![at(0, 50.0)], &ValueRange::default(), &plot, 20.0);
        assert!(scene.path.is_empty());
        let expected_y = 20.0 - ValueRange::default().y_for(50.0, &plot);
        assert_eq!(scene.normal, vec![(plot.left, expected_y)]);
    }

    #[test]
    fn empty_history_has_empty_scene() {
        let scene = Scene::build(&Vec::new(), &ValueRange::default(), &plot_area(80, 20), 20.0);
        assert!(scene.path.is_empty());
        assert!(scene.first.is_none());
    }
}
