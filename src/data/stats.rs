//! Aggregate statistics over the current history.

use probwatch_core::{Observation, Status};
use serde::Serialize;

/// Per-band counts and value statistics for a set of observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeriesStats {
    pub count: usize,
    pub good: usize,
    pub normal: usize,
    pub bad: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl SeriesStats {
    /// Compute statistics over `observations` in a single pass.
    pub fn from_observations<'a, I>(observations: I) -> Self
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut stats = Self::default();
        let mut sum = 0.0;

        for obs in observations {
            let v = obs.value();
            stats.count += 1;
            sum += v;
            stats.min = Some(stats.min.map_or(v, |m| m.min(v)));
            stats.max = Some(stats.max.map_or(v, |m| m.max(v)));
            match obs.status() {
                Status::Good => stats.good += 1,
                Status::Normal => stats.normal += 1,
                Status::Bad => stats.bad += 1,
            }
        }

        if stats.count > 0 {
            stats.mean = Some(sum / stats.count as f64);
        }
        stats
    }

    /// Number of observations in `status`.
    pub fn count_of(&self, status: Status) -> usize {
        match status {
            Status::Good => self.good,
            Status::Normal => self.normal,
            Status::Bad => self.bad,
        }
    }

    /// Share of observations in `status`, as a percentage.
    pub fn percent_of(&self, status: Status) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.count_of(status) as f64 * 100.0 / self.count as f64
    }

    /// The worst band present, if any.
    pub fn worst(&self) -> Option<Status> {
        Status::all().into_iter().rev().find(|s| self.count_of(*s) > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn obs(value: f64) -> Observation {
        Observation::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap(), value)
    }

    #[test]
    fn empty_series_has_no_values() {
        let stats = SeriesStats::from_observations(&Vec::new());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.percent_of(Status::Good), 0.0);
        assert_eq!(stats.worst(), None);
    }

    #[test]
    fn counts_bands_and_values() {
        let data = vec![obs(10.0), obs(33.0), obs(50.0), obs(66.0)];
        let stats = SeriesStats::from_observations(&data);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.good, 2);
        assert_eq!(stats.normal, 1);
        assert_eq!(stats.bad, 1);
        assert_eq!(stats.min, Some(10.0));
        assert_eq!(stats.max, Some(66.0));
        assert_eq!(stats.mean, Some(39.75));
        assert_eq!(stats.percent_of(Status::Good), 50.0);
        assert_eq!(stats.worst(), Some(Status::Bad));
    }
}
