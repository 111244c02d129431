//! Periodic triggers.
//!
//! A [`Scheduler`] calls a callback every `interval` until the returned
//! [`CancelHandle`] is cancelled or dropped. [`ManualScheduler`] only fires
//! when a test advances it; [`TokioScheduler`] runs on a tokio runtime.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Callback invoked on every tick.
pub type Tick = Box<dyn FnMut() + Send + 'static>;

/// Something that can run a callback periodically.
pub trait Scheduler {
    /// Start calling `tick` every `interval`.
    ///
    /// The first call happens one full interval after starting.
    fn start(&self, interval: Duration, tick: Tick) -> CancelHandle;
}

/// Stops a scheduled callback.
///
/// Dropping the handle cancels as well, so keep it alive for as long as the
/// callback should run.
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
    on_cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl CancelHandle {
    fn new(cancelled: Arc<AtomicBool>) -> Self {
        Self {
            cancelled,
            on_cancel: None,
        }
    }

    #[cfg(feature = "tokio")]
    fn with_hook(cancelled: Arc<AtomicBool>, hook: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancelled,
            on_cancel: Some(Box::new(hook)),
        }
    }

    /// Stop future ticks. A tick already running finishes normally.
    pub fn cancel(mut self) {
        self.fire();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn fire(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(hook) = self.on_cancel.take() {
            hook();
        }
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.fire();
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

struct ManualEntry {
    interval: Duration,
    elapsed: Duration,
    tick: Arc<Mutex<Tick>>,
    cancelled: Arc<AtomicBool>,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// Clones share the same set of scheduled callbacks. Callbacks run without
/// the scheduler's lock held, so they may call `start`, `active` or cancel
/// handles on any clone.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
/// use probwatch_core::{ManualScheduler, Scheduler};
///
/// let scheduler = ManualScheduler::new();
/// let count = Arc::new(AtomicUsize::new(0));
/// let c = count.clone();
/// let handle = scheduler.start(Duration::from_secs(3), Box::new(move || {
///     c.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// scheduler.advance(Duration::from_secs(7));
/// assert_eq!(count.load(Ordering::SeqCst), 2);
///
/// handle.cancel();
/// scheduler.advance(Duration::from_secs(30));
/// assert_eq!(count.load(Ordering::SeqCst), 2);
/// ```
#[derive(Clone, Default)]
pub struct ManualScheduler {
    entries: Arc<Mutex<Vec<ManualEntry>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward, firing each live callback once per full interval
    /// that elapses. Callbacks fire in registration order.
    ///
    /// Callbacks registered from inside a callback start counting at the
    /// next call. A nested `advance` from inside a callback skips that
    /// same callback.
    pub fn advance(&self, by: Duration) {
        let due: Vec<_> = {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.retain(|e| !e.cancelled.load(Ordering::Acquire));
            entries
                .iter_mut()
                .filter_map(|entry| {
                    entry.elapsed += by;
                    let mut fires = 0u32;
                    while entry.elapsed >= entry.interval {
                        entry.elapsed -= entry.interval;
                        fires += 1;
                    }
                    (fires > 0).then(|| (entry.tick.clone(), entry.cancelled.clone(), fires))
                })
                .collect()
        };

        for (tick, cancelled, fires) in due {
            let Ok(mut callback) = tick.try_lock() else {
                continue;
            };
            for _ in 0..fires {
                if cancelled.load(Ordering::Acquire) {
                    break;
                }
                (*callback)();
            }
        }
    }

    /// Number of callbacks that have not been cancelled.
    pub fn active(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().filter(|e| !e.cancelled.load(Ordering::Acquire)).count()
    }
}

impl Scheduler for ManualScheduler {
    fn start(&self, interval: Duration, tick: Tick) -> CancelHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        // A zero interval would fire forever inside a single advance.
        let interval = interval.max(Duration::from_millis(1));
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).push(ManualEntry {
            interval,
            elapsed: Duration::ZERO,
            tick: Arc::new(Mutex::new(tick)),
            cancelled: cancelled.clone(),
        });
        CancelHandle::new(cancelled)
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("active", &self.active())
            .finish()
    }
}

/// Interval scheduler backed by a tokio runtime.
///
/// Each started callback gets its own task driven by `tokio::time::interval`;
/// cancelling signals the task through a watch channel.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use probwatch_core::{Scheduler, TokioScheduler};
///
/// # tokio_test::block_on(async {
/// let scheduler = TokioScheduler::current();
/// let handle = scheduler.start(Duration::from_millis(10), Box::new(|| {}));
/// handle.cancel();
/// # });
/// ```
#[cfg(feature = "tokio")]
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
}

#[cfg(feature = "tokio")]
impl TokioScheduler {
    /// Schedule onto the given runtime.
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }

    /// Schedule onto the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(tokio::runtime::Handle::current())
    }
}

#[cfg(feature = "tokio")]
impl Scheduler for TokioScheduler {
    fn start(&self, interval: Duration, mut tick: Tick) -> CancelHandle {
        use tokio::sync::watch;
        use tokio::time::MissedTickBehavior;

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let cancelled = Arc::new(AtomicBool::new(false));
        let task_cancelled = cancelled.clone();
        let period = interval.max(Duration::from_millis(1));

        self.runtime.spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut timer = tokio::time::interval_at(start, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::debug!(?period, "scheduler started");

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        if task_cancelled.load(Ordering::Acquire) {
                            break;
                        }
                        tick();
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("scheduler stopped");
        });

        CancelHandle::with_hook(cancelled, move || {
            let _ = stop_tx.send(true);
        })
    }
}
