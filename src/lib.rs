//! # probwatch
//!
//! A terminal dashboard for a simulated probability signal.
//!
//! A bounded random walk produces one observation per tick. Each observation
//! is classified into a status band (good ≤ 33, bad ≥ 66, normal otherwise)
//! and kept in a fixed-size, most-recent-first history. The dashboard shows
//! the history as a chart, a table, and per-band statistics.
//!
//! The sampling and history logic lives in [`probwatch_core`]; this crate
//! adds the producer, the terminal UI and everything around it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (stats)  │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │ poll                                                │
//! │       ▼                                                     │
//! │  ┌─────────┐  mpsc  ┌───────────┐  tick  ┌───────────────┐  │
//! │  │ source  │◀──────│ generator │◀───────│ TokioScheduler │  │
//! │  └─────────┘        └───────────┘        └───────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`source`]**: The [`ObservationSource`] trait, a channel-backed source, and
//!   the scheduled generator that feeds it
//! - **[`data`]**: Statistics, JSON export and duration helpers
//! - **[`ui`]**: Chart, history and stats views plus light/dark themes
//! - **[`settings`]**: Layered configuration (defaults, file, environment, flags)
//! - **[`prefs`]**: Persisted theme preference
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Default: a new sample every 3 seconds, 20 kept
//! probwatch
//!
//! # Faster, reproducible, and with logs
//! probwatch --interval 500ms --seed 42 --log-file probwatch.log
//!
//! # Generate 50 samples and write them as JSON
//! probwatch --export series.json --samples 50
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use chrono::Utc;
//! use probwatch::{App, ChannelSource, Observation, SeriesBuffer, ThemeMode};
//!
//! let (tx, source) = ChannelSource::create("example");
//! let series = SeriesBuffer::new(20).unwrap();
//! let mut app = App::new(Box::new(source), series, ThemeMode::Dark);
//!
//! tx.send(Observation::new(Utc::now(), 72.5)).unwrap();
//! assert_eq!(app.reload_data(), 1);
//! assert_eq!(app.latest().unwrap().value(), 72.5);
//! ```
//!
//! ### Driving the generator by hand
//!
//! ```
//! use std::time::Duration;
//! use probwatch::{spawn_generator, ManualScheduler, ObservationSource, Sampler,
//!     SamplerConfig, SeededRandom, SystemClock};
//!
//! let scheduler = ManualScheduler::new();
//! let sampler = Sampler::new(SamplerConfig::default(), SystemClock, SeededRandom::new(1)).unwrap();
//! let (mut source, _generator) = spawn_generator(&scheduler, Duration::from_secs(3), sampler);
//!
//! scheduler.advance(Duration::from_secs(6));
//! assert_eq!(source.poll().len(), 3);
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod logging;
pub mod prefs;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use data::{export_series, export_value, SeriesStats};
pub use prefs::{PreferenceStore, Preferences};
pub use settings::{Overrides, Settings, ThemeChoice};
pub use source::{spawn_generator, ChannelSource, Generator, ObservationSource};
pub use ui::{Theme, ThemeMode};

pub use probwatch_core::{
    ManualScheduler, Observation, RandomSource, Sampler, SamplerConfig, Scheduler,
    SeededRandom, SeriesBuffer, Status, SystemClock, ThreadRandom, TokioScheduler,
};
