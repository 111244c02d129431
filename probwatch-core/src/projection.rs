//! Mapping observations onto a plot area.
//!
//! Coordinates follow screen conventions: `x` grows to the right, `y` grows
//! downwards, so higher values end up nearer the top edge.

use chrono::{DateTime, Duration, Utc};

use crate::observation::Observation;
use crate::series::chronological;

/// Closed time interval covered by a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Range spanned by `observations`, or `[now, now]` when there are none.
    pub fn of<'a, I>(observations: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut bounds: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
        for ts in observations.into_iter().map(Observation::timestamp) {
            bounds = Some(match bounds {
                None => (ts, ts),
                Some((lo, hi)) => (lo.min(ts), hi.max(ts)),
            });
        }
        let (start, end) = bounds.unwrap_or((now, now));
        Self { start, end }
    }

    pub fn width(&self) -> Duration {
        self.end - self.start
    }

    /// Position of `ts` within the range in `[0, 1]`, or `None` for a zero-width range.
    fn fraction(&self, ts: DateTime<Utc>) -> Option<f64> {
        let width = self.width().num_milliseconds();
        if width <= 0 {
            return None;
        }
        let offset = (ts - self.start).num_milliseconds();
        Some(offset as f64 / width as f64)
    }
}

/// Value interval mapped onto the vertical extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` within the range as a share in `[0, 1]`, clamped.
    /// A zero-height range puts every value in the middle.
    pub fn fraction(&self, value: f64) -> f64 {
        let height = self.max - self.min;
        if height == 0.0 || !height.is_finite() {
            return 0.5;
        }
        ((value - self.min) / height).max(0.0).min(1.0)
    }

    /// Vertical position of `value` in `plot`; a zero-height range maps to the middle.
    pub fn y_for(&self, value: f64, plot: &PlotArea) -> f64 {
        let height = self.max - self.min;
        if height == 0.0 {
            return plot.top + plot.height / 2.0;
        }
        plot.top + plot.height * (self.max - value) / height
    }
}

/// Rectangle the series is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Plot inside a `width` x `height` canvas with `padding` on every side.
    pub fn padded(width: f64, height: f64, padding: f64) -> Self {
        Self {
            left: padding,
            top: padding,
            width: (width - 2.0 * padding).max(0.0),
            height: (height - 2.0 * padding).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A projected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Project one observation.
///
/// A zero-width `time_range` places every observation on the left edge.
pub fn project(
    observation: &Observation,
    time_range: &TimeRange,
    value_range: &ValueRange,
    plot: &PlotArea,
) -> Point {
    let x = match time_range.fraction(observation.timestamp()) {
        Some(f) => plot.left + f * plot.width,
        None => plot.left,
    };
    let y = value_range.y_for(observation.value(), plot);
    Point { x, y }
}

/// Project a series into a polyline ordered earliest to latest.
///
/// The time range is taken from the observations themselves; `now` only
/// matters when `observations` is empty, in which case the result is empty too.
pub fn project_series<'a, I>(
    observations: I,
    value_range: &ValueRange,
    plot: &PlotArea,
    now: DateTime<Utc>,
) -> Vec<(Observation, Point)>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let sorted = chronological(observations);
    let time_range = TimeRange::of(&sorted, now);
    sorted
        .into_iter()
        .map(|o| {
            let p = project(&o, &time_range, value_range, plot);
            (o, p)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64, value: f64) -> Observation {
        Observation::new(Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(), value)
    }

    fn chart() -> PlotArea {
        PlotArea::padded(800.0, 400.0, 60.0)
    }

    #[test]
    fn fraction_scales_against_range() {
        let range = ValueRange::new(0.5, 99.5);
        assert_eq!(range.fraction(0.5), 0.0);
        assert_eq!(range.fraction(99.5), 1.0);
        assert_eq!(range.fraction(50.0), 0.5);
        assert_eq!(range.fraction(0.0), 0.0);
        assert_eq!(range.fraction(120.0), 1.0);

        let wide = ValueRange::new(0.0, 200.0);
        assert_eq!(wide.fraction(100.0), 0.5);

        assert_eq!(ValueRange::new(40.0, 40.0).fraction(10.0), 0.5);
    }

    #[test]
    fn padded_matches_chart_geometry() {
        let plot = chart();
        assert_eq!(plot.left, 60.0);
        assert_eq!(plot.width, 680.0);
        assert_eq!(plot.height, 280.0);
        assert_eq!(plot.right(), 740.0);
        assert_eq!(plot.bottom(), 340.0);
    }

    #[test]
    fn endpoints_map_to_edges() {
        let first = at(0, 100.0);
        let last = at(10, 0.0);
        let range = TimeRange::of([&first, &last], Utc::now());
        let plot = chart();

        let p0 = project(&first, &range, &ValueRange::default(), &plot);
        let p1 = project(&last, &range, &ValueRange::default(), &plot);

        assert_eq!(p0, Point { x: 60.0, y: 60.0 });
        assert_eq!(p1, Point { x: 740.0, y: 340.0 });
    }

    #[test]
    fn midpoint_interpolates() {
        let range = TimeRange::new(at(0, 0.0).timestamp(), at(10, 0.0).timestamp());
        let p = project(&at(5, 50.0), &range, &ValueRange::default(), &chart());
        assert_eq!(p.x, 400.0);
        assert_eq!(p.y, 200.0);
    }

    #[test]
    fn higher_values_are_nearer_top() {
        let range = TimeRange::new(at(0, 0.0).timestamp(), at(1, 0.0).timestamp());
        let plot = chart();
        let high = project(&at(0, 80.0), &range, &ValueRange::default(), &plot);
        let low = project(&at(0, 20.0), &range, &ValueRange::default(), &plot);
        assert!(high.y < low.y);
    }

    #[test]
    fn zero_width_range_uses_left_edge() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let range = TimeRange::of(std::iter::empty(), now);
        assert_eq!(range, TimeRange::new(now, now));

        let p = project(&at(42, 10.0), &range, &ValueRange::default(), &chart());
        assert_eq!(p.x, 60.0);
    }

    #[test]
    fn zero_height_value_range_uses_middle() {
        let plot = chart();
        let y = ValueRange::new(5.0, 5.0).y_for(5.0, &plot);
        assert_eq!(y, 200.0);
    }

    #[test]
    fn threshold_markers_land_inside_plot() {
        let plot = chart();
        let range = ValueRange::default();
        let good = range.y_for(33.0, &plot);
        let bad = range.y_for(66.0, &plot);
        assert!(bad < good);
        assert!(plot.top < bad && good < plot.bottom());
    }

    #[test]
    fn series_is_projected_chronologically() {
        let newest_first = vec![at(2, 30.0), at(1, 20.0), at(0, 10.0)];
        let points = project_series(&newest_first, &ValueRange::default(), &chart(), Utc::now());

        let xs: Vec<f64> = points.iter().map(|(_, p)| p.x).collect();
        assert_eq!(xs, vec![60.0, 400.0, 740.0]);
        assert_eq!(points[0].0.value(), 10.0);
    }

    #[test]
    fn empty_series_projects_to_nothing() {
        let points = project_series(&Vec::new(), &ValueRange::default(), &chart(), Utc::now());
        assert!(points.is_empty());
    }
}
