//! Channel-based observation source.
//!
//! Receives observations pushed by a producer task over an unbounded tokio
//! mpsc channel. Unlike a watch channel, nothing is coalesced: every
//! observation the producer sends reaches the history.

use tokio::sync::mpsc::{self, error::TryRecvError};

use super::{ObservationSource, Observation};

/// A source fed through a channel by a single producer.
///
/// # Example
///
/// ```
/// use probwatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("generator");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::UnboundedReceiver<Observation>,
    description: String,
    last_error: Option<String>,
}

impl ChannelSource {
    /// Create a new channel source from a receiver.
    pub fn new(receiver: mpsc::UnboundedReceiver<Observation>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            last_error: None,
        }
    }

    /// Create a sender/source pair.
    pub fn create(source_description: &str) -> (mpsc::UnboundedSender<Observation>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx, source_description))
    }
}

impl ObservationSource for ChannelSource {
    fn poll(&mut self) -> Vec<Observation> {
        let mut received = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(obs) => received.push(obs),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.last_error.is_none() {
                        self.last_error = Some("Producer stopped".to_string());
                    }
                    break;
                }
            }
        }
        received
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
