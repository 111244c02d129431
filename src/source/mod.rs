//! Observation sources for the dashboard.
//!
//! The UI loop never samples on its own; it drains whatever a source has
//! produced since the last poll and pushes it into the history buffer.

mod channel;
mod generator;

pub use channel::ChannelSource;
pub use generator::{spawn_generator, Generator};

use std::fmt::Debug;

use probwatch_core::Observation;

/// Trait for receiving observations from a producer.
///
/// # Example
///
/// ```
/// use probwatch::{ChannelSource, ObservationSource};
///
/// let (_tx, mut source) = ChannelSource::create("example");
/// assert!(source.poll().is_empty());
/// ```
pub trait ObservationSource: Send + Debug {
    /// Drain every observation produced since the last poll, oldest first.
    ///
    /// This method must not block.
    fn poll(&mut self) -> Vec<Observation>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns an error message if the source can no longer produce data.
    fn error(&self) -> Option<&str>;
}
