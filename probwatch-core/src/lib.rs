//! # probwatch-core
//!
//! The rendering-independent core of probwatch: a bounded random-walk
//! sampler, a fixed-capacity most-recent-first history, and the projection
//! that maps observations onto a plot area.
//!
//! ## Design Goals
//!
//! - **Renderer agnostic**: nothing here knows about terminals, colors or themes
//! - **Deterministic under test**: time, randomness and timers are all injectable
//! - **Total operations**: sampling, pushing and projecting never fail; only
//!   configuration is validated
//!
//! ## Features
//!
//! - `tokio` (default): [`TokioScheduler`], an interval scheduler on a tokio runtime
//! - `serde`: serialization of observations and configuration
//!
//! ## Example
//!
//! ```rust
//! use probwatch_core::{SamplerConfig, SeededRandom, SeriesStream, SystemClock};
//!
//! let config = SamplerConfig::default();
//! let mut stream = SeriesStream::new(config, 20, SystemClock, SeededRandom::new(7)).unwrap();
//!
//! for _ in 0..25 {
//!     stream.tick();
//! }
//!
//! assert_eq!(stream.buffer().len(), 20);
//! let latest = stream.buffer().latest().unwrap();
//! assert!((0.0..=100.0).contains(&latest.value()));
//! ```

mod error;
mod observation;
pub mod projection;
mod random;
pub mod sampler;
pub mod scheduler;
pub mod series;
mod stream;

pub use error::ConfigError;
pub use observation::{Observation, ObservationId, Status, BAD_THRESHOLD, GOOD_THRESHOLD};
pub use projection::{project, project_series, PlotArea, Point, TimeRange, ValueRange};
pub use random::{Clock, ManualClock, RandomSource, ScriptedRandom, SeededRandom, SystemClock, ThreadRandom};
pub use sampler::{sample, Sampler, SamplerConfig};
pub use scheduler::{CancelHandle, ManualScheduler, Scheduler, Tick};
#[cfg(feature = "tokio")]
pub use scheduler::TokioScheduler;
pub use series::{chronological, push, SeriesBuffer};
pub use stream::SeriesStream;

/// History cap used by the dashboard unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 20;
