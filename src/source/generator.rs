//! Periodic mock-data producer.
//!
//! Runs a [`Sampler`] on a [`Scheduler`] and sends each observation to a
//! [`ChannelSource`]. The producer remembers only the last observation it
//! sent, which is all the random walk needs.

use std::time::Duration;

use probwatch_core::{CancelHandle, Clock, Observation, RandomSource, Sampler, Scheduler};
use tokio::sync::mpsc;

use super::ChannelSource;

/// Handle to a running generator; dropping it stops sampling.
#[derive(Debug)]
pub struct Generator {
    handle: CancelHandle,
    interval: Duration,
}

impl Generator {
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_cancelled()
    }

    /// Stop sampling. The source reports the producer as stopped once drained.
    pub fn stop(self) {
        tracing::info!("stopping generator");
        self.handle.cancel();
    }
}

/// Start producing observations every `interval`.
///
/// The first observation is sent immediately so the dashboard has something
/// to show before the first tick.
pub fn spawn_generator<C, R>(
    scheduler: &dyn Scheduler,
    interval: Duration,
    sampler: Sampler<C, R>,
) -> (ChannelSource, Generator)
where
    C: Clock + 'static,
    R: RandomSource + 'static,
{
    let (tx, source) = ChannelSource::create(&format!("generator every {:?}", interval));
    let handle = start_producer(scheduler, interval, sampler, tx);
    (source, Generator { handle, interval })
}

fn start_producer<C, R>(
    scheduler: &dyn Scheduler,
    interval: Duration,
    mut sampler: Sampler<C, R>,
    tx: mpsc::UnboundedSender<Observation>,
) -> CancelHandle
where
    C: Clock + 'static,
    R: RandomSource + 'static,
{
    let first = sampler.sample(None);
    tracing::debug!(value = first.value(), status = %first.status(), "initial observation");
    let mut last = first.clone();
    let _ = tx.send(first);

    tracing::info!(?interval, "starting generator");
    scheduler.start(
        interval,
        Box::new(move || {
            let next = sampler.sample(Some(&last));
            tracing::debug!(value = next.value(), status = %next.status(), "sampled");
            if tx.send(next.clone()).is_err() {
                tracing::warn!("observation receiver dropped");
            }
            last = next;
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ObservationSource;
    use chrono::{TimeZone, Utc};
    use probwatch_core::{ManualClock, ManualScheduler, SamplerConfig, ScriptedRandom};

    fn sampler(draws: Vec<f64>) -> Sampler<ManualClock, ScriptedRandom> {
        let clock = ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        Sampler::new(SamplerConfig::default(), clock, ScriptedRandom::new(draws)).unwrap()
    }

    #[test]
    fn sends_initial_then_one_per_tick() {
        let scheduler = ManualScheduler::new();
        let (mut source, generator) =
            spawn_generator(&scheduler, Duration::from_secs(3), sampler(vec![0.5, 1.0, 1.0]));

        let initial = source.poll();
        assert_eq!(initial.len(), 1);
        assert_eq!(initial[0].value(), 50.0);

        scheduler.advance(Duration::from_secs(6));
        let values: Vec<f64> = source.poll().iter().map(|o| o.value()).collect();
        assert_eq!(values, vec![70.0, 90.0]);
        assert!(generator.is_running());
        assert_eq!(generator.interval(), Duration::from_secs(3));
    }

    #[test]
    fn stop_ends_production() {
        let scheduler = ManualScheduler::new();
        let (mut source, generator) =
            spawn_generator(&scheduler, Duration::from_secs(1), sampler(vec![0.5]));
        source.poll();

        generator.stop();
        scheduler.advance(Duration::from_secs(10));

        assert!(source.poll().is_empty());
        assert_eq!(scheduler.active(), 0);
    }
}
