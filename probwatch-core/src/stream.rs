//! A sampler feeding a series buffer.

use crate::error::ConfigError;
use crate::observation::Observation;
use crate::random::{Clock, RandomSource};
use crate::sampler::{Sampler, SamplerConfig};
use crate::series::SeriesBuffer;

/// One stream of observations: each tick samples from the latest
/// observation and pushes the result.
#[derive(Debug, Clone)]
pub struct SeriesStream<C, R> {
    sampler: Sampler<C, R>,
    buffer: SeriesBuffer,
}

impl<C: Clock, R: RandomSource> SeriesStream<C, R> {
    pub fn new(
        config: SamplerConfig,
        capacity: usize,
        clock: C,
        random: R,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            sampler: Sampler::new(config, clock, random)?,
            buffer: SeriesBuffer::new(capacity)?,
        })
    }

    /// Sample and record the next observation, returning a copy of it.
    pub fn tick(&mut self) -> Observation {
        let next = self.sampler.sample(self.buffer.latest());
        self.buffer.push(next.clone());
        next
    }

    pub fn buffer(&self) -> &SeriesBuffer {
        &self.buffer
    }

    pub fn sampler(&self) -> &Sampler<C, R> {
        &self.sampler
    }

    /// Stop the stream, keeping its history.
    pub fn into_buffer(self) -> SeriesBuffer {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ManualClock, ScriptedRandom};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn tick_walks_from_latest() {
        let clock = ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        let random = ScriptedRandom::new([0.5, 1.0, 0.0]);
        let mut stream =
            SeriesStream::new(SamplerConfig::default(), 20, clock.clone(), random).unwrap();

        assert_eq!(stream.tick().value(), 50.0);
        clock.advance(Duration::seconds(3));
        assert_eq!(stream.tick().value(), 70.0);
        clock.advance(Duration::seconds(3));
        assert_eq!(stream.tick().value(), 50.0);

        let values: Vec<f64> = stream.buffer().iter().map(|o| o.value()).collect();
        assert_eq!(values, vec![50.0, 70.0, 50.0]);

        let times: Vec<_> = stream.buffer().chronological().iter().map(|o| o.timestamp()).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn capacity_is_enforced() {
        let clock = ManualClock::new(Utc.timestamp_opt(0, 0).unwrap());
        let mut stream =
            SeriesStream::new(SamplerConfig::default(), 3, clock, ScriptedRandom::default())
                .unwrap();
        for _ in 0..10 {
            stream.tick();
        }
        assert_eq!(stream.into_buffer().len(), 3);
    }

    #[test]
    fn invalid_parts_are_rejected() {
        let clock = ManualClock::new(Utc.timestamp_opt(0, 0).unwrap());
        let err = SeriesStream::new(SamplerConfig::default(), 0, clock, ScriptedRandom::default())
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroCapacity);
    }
}
