//! Bounded random-walk sampler.
//!
//! Each new value is the previous value plus a uniform delta in
//! `[-step/2, +step/2]`, clamped into `[min, max]`. The first value of a
//! stream is drawn uniformly from the whole range.

use crate::error::ConfigError;
use crate::observation::Observation;
use crate::random::{Clock, RandomSource};

/// Range and step of the random walk.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplerConfig {
    /// Lowest value the walk may take.
    pub min: f64,
    /// Highest value the walk may take.
    pub max: f64,
    /// Width of the delta interval; each step moves at most `step / 2`.
    pub step: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 40.0,
        }
    }
}

impl SamplerConfig {
    /// Build a validated config.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        let config = Self { min, max, step };
        config.validate()?;
        Ok(config)
    }

    /// Check that the bounds are finite and ordered and the step is non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("min", self.min), ("max", self.max), ("step", self.step)] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.step < 0.0 {
            return Err(ConfigError::NegativeStep(self.step));
        }
        Ok(())
    }

    /// Clamp into the bounds, tolerating an unvalidated config: inverted
    /// bounds are swapped and a NaN bound is ignored.
    fn clamp(&self, value: f64) -> f64 {
        let lo = self.min.min(self.max);
        let hi = self.max.max(self.min);
        value.max(lo).min(hi)
    }
}

/// Map a unit draw onto `[lo, hi]`.
fn lerp(lo: f64, hi: f64, unit: f64) -> f64 {
    lo + unit.clamp(0.0, 1.0) * (hi - lo)
}

/// Produce the next observation of a stream.
///
/// The output value always lies in `[config.min, config.max]`, and its
/// timestamp is never earlier than `previous`'s, even if the clock steps back.
/// The config is not validated here; inverted bounds are treated as swapped.
pub fn sample(
    previous: Option<&Observation>,
    config: &SamplerConfig,
    clock: &dyn Clock,
    random: &mut dyn RandomSource,
) -> Observation {
    let value = match previous {
        None => config.clamp(lerp(config.min, config.max, random.next_unit())),
        Some(prev) => {
            let half = config.step / 2.0;
            let delta = lerp(-half, half, random.next_unit());
            config.clamp(prev.value() + delta)
        }
    };

    let now = clock.now();
    let timestamp = match previous {
        Some(prev) if prev.timestamp() > now => prev.timestamp(),
        _ => now,
    };

    Observation::new(timestamp, value)
}

/// A sampler bound to a config, clock and random source.
#[derive(Debug, Clone)]
pub struct Sampler<C, R> {
    config: SamplerConfig,
    clock: C,
    random: R,
}

impl<C: Clock, R: RandomSource> Sampler<C, R> {
    /// Create a sampler, validating the config.
    pub fn new(config: SamplerConfig, clock: C, random: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            random,
        })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Sample the next observation after `previous`.
    pub fn sample(&mut self, previous: Option<&Observation>) -> Observation {
        sample(previous, &self.config, &self.clock, &mut self.random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Status;
    use crate::random::{ManualClock, ScriptedRandom, SeededRandom};
    use chrono::{Duration, TimeZone, Utc};

    fn clock() -> ManualClock {
        ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
    }

    fn obs(value: f64) -> Observation {
        Observation::new(Utc.timestamp_opt(1_699_999_990, 0).unwrap(), value)
    }

    #[test]
    fn forced_positive_delta_walks_into_bad() {
        let config = SamplerConfig::default();
        let mut random = ScriptedRandom::new([1.0]);

        let next = sample(Some(&obs(50.0)), &config, &clock(), &mut random);

        assert_eq!(next.value(), 70.0);
        assert_eq!(next.status(), Status::Bad);
    }

    #[test]
    fn first_sample_spans_range() {
        let config = SamplerConfig::new(10.0, 20.0, 4.0).unwrap();
        let low = sample(None, &config, &clock(), &mut ScriptedRandom::new([0.0]));
        let high = sample(None, &config, &clock(), &mut ScriptedRandom::new([1.0]));
        assert_eq!(low.value(), 10.0);
        assert_eq!(high.value(), 20.0);
    }

    #[test]
    fn walk_clamps_at_both_ends() {
        let config = SamplerConfig::default();
        let up = sample(Some(&obs(95.0)), &config, &clock(), &mut ScriptedRandom::new([1.0]));
        let down = sample(Some(&obs(5.0)), &config, &clock(), &mut ScriptedRandom::new([0.0]));
        assert_eq!(up.value(), 100.0);
        assert_eq!(down.value(), 0.0);
    }

    #[test]
    fn midpoint_draw_keeps_value() {
        let config = SamplerConfig::default();
        let next = sample(Some(&obs(42.0)), &config, &clock(), &mut ScriptedRandom::new([0.5]));
        assert_eq!(next.value(), 42.0);
    }

    #[test]
    fn values_stay_in_range_for_long_walks() {
        let config = SamplerConfig::new(0.5, 99.5, 40.0).unwrap();
        let mut sampler = Sampler::new(config, clock(), SeededRandom::new(9)).unwrap();

        let mut prev = sampler.sample(None);
        for _ in 0..1_000 {
            let next = sampler.sample(Some(&prev));
            assert!((0.5..=99.5).contains(&next.value()));
            assert_eq!(next.status(), Status::classify(next.value()));
            prev = next;
        }
    }

    #[test]
    fn inverted_bounds_do_not_panic() {
        let config = SamplerConfig {
            min: 10.0,
            max: 0.0,
            step: 40.0,
        };
        assert!(config.validate().is_err());

        let first = sample(None, &config, &clock(), &mut ScriptedRandom::new([0.25]));
        assert!((0.0..=10.0).contains(&first.value()));

        let up = sample(Some(&obs(8.0)), &config, &clock(), &mut ScriptedRandom::new([1.0]));
        let down = sample(Some(&obs(2.0)), &config, &clock(), &mut ScriptedRandom::new([0.0]));
        assert_eq!(up.value(), 10.0);
        assert_eq!(down.value(), 0.0);
    }

    #[test]
    fn previous_outside_range_is_pulled_back() {
        let config = SamplerConfig::new(0.0, 50.0, 0.0).unwrap();
        let next = sample(Some(&obs(80.0)), &config, &clock(), &mut ScriptedRandom::new([0.5]));
        assert_eq!(next.value(), 50.0);
    }

    #[test]
    fn timestamp_is_clock_now() {
        let clock = clock();
        let next = sample(None, &SamplerConfig::default(), &clock, &mut ScriptedRandom::default());
        assert_eq!(next.timestamp(), clock.now());
    }

    #[test]
    fn timestamp_never_goes_backwards() {
        let clock = clock();
        let config = SamplerConfig::default();
        let mut random = ScriptedRandom::default();

        let first = sample(None, &config, &clock, &mut random);
        clock.advance(Duration::seconds(-30));
        let second = sample(Some(&first), &config, &clock, &mut random);

        assert_eq!(second.timestamp(), first.timestamp());
    }

    #[test]
    fn degenerate_range_is_constant() {
        let config = SamplerConfig::new(42.0, 42.0, 40.0).unwrap();
        let mut sampler = Sampler::new(config, clock(), SeededRandom::new(1)).unwrap();
        let first = sampler.sample(None);
        let second = sampler.sample(Some(&first));
        assert_eq!(first.value(), 42.0);
        assert_eq!(second.value(), 42.0);
    }

    #[test]
    fn rejects_invalid_configs() {
        assert_eq!(
            SamplerConfig::new(10.0, 0.0, 1.0),
            Err(ConfigError::InvertedRange { min: 10.0, max: 0.0 })
        );
        assert_eq!(SamplerConfig::new(0.0, 1.0, -1.0), Err(ConfigError::NegativeStep(-1.0)));
        assert!(matches!(
            SamplerConfig::new(f64::NAN, 1.0, 1.0),
            Err(ConfigError::NotFinite { field: "min", .. })
        ));
        assert!(Sampler::new(
            SamplerConfig { min: 0.0, max: f64::INFINITY, step: 1.0 },
            clock(),
            SeededRandom::new(0)
        )
        .is_err());
    }
}
