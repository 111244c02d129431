//! Injectable time and randomness.
//!
//! The sampler only ever asks for "now" and for a uniform draw in `[0, 1]`,
//! so both are small traits with a production and a test implementation.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the current time.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of uniform draws.
pub trait RandomSource: Send {
    /// Next draw in the closed interval `[0, 1]`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to a sampler.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock by `by` (which may be negative).
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen_range(0.0..=1.0)
    }
}

/// Reproducible RNG seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..=1.0)
    }
}

/// Replays a fixed list of draws, then repeats the last one.
///
/// Draws are clamped into `[0, 1]`. An empty script yields `0.5`, the
/// midpoint, which makes the random walk stand still.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<f64>,
    last: Option<f64>,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().map(|d| d.clamp(0.0, 1.0)).collect(),
            last: None,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if let Some(next) = self.draws.pop_front() {
            self.last = Some(next);
        }
        self.last.unwrap_or(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn boxed_source_delegates() {
        let mut boxed: Box<dyn RandomSource> = Box::new(ScriptedRandom::new([0.25]));
        assert_eq!(boxed.next_unit(), 0.25);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let start = Utc.timestamp_opt(1_000, 0).unwrap();
        let clock = ManualClock::new(start);
        let other = clock.clone();

        clock.advance(Duration::seconds(3));
        assert_eq!(other.now(), start + Duration::seconds(3));
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..10 {
            let x = a.next_unit();
            assert_eq!(x, b.next_unit());
            assert!((0.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn scripted_random_repeats_last_draw() {
        let mut r = ScriptedRandom::new([0.1, 2.0]);
        assert_eq!(r.next_unit(), 0.1);
        assert_eq!(r.next_unit(), 1.0);
        assert_eq!(r.next_unit(), 1.0);
    }

    #[test]
    fn empty_script_is_midpoint() {
        let mut r = ScriptedRandom::default();
        assert_eq!(r.next_unit(), 0.5);
    }
}
