//! Observation - one sampled point of the probability series.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Values at or below this are [`Status::Good`].
pub const GOOD_THRESHOLD: f64 = 33.0;

/// Values at or above this are [`Status::Bad`].
pub const BAD_THRESHOLD: f64 = 66.0;

/// Status band of an observation.
///
/// Ordered from best to worst so that `max()` over a series yields the worst band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    Good,
    Normal,
    Bad,
}

impl Status {
    /// Classify a value into its band.
    ///
    /// The thresholds are inclusive on the outer bands: 33 is good and 66 is bad.
    pub fn classify(value: f64) -> Self {
        if value <= GOOD_THRESHOLD {
            Status::Good
        } else if value >= BAD_THRESHOLD {
            Status::Bad
        } else {
            Status::Normal
        }
    }

    /// Lowercase label, as shown in badges and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Good => "good",
            Status::Normal => "normal",
            Status::Bad => "bad",
        }
    }

    /// All bands, best first.
    pub fn all() -> [Status; 3] {
        [Status::Good, Status::Normal, Status::Bad]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque identifier of an observation, used for rendering-side identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ObservationId(Uuid);

impl ObservationId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A single reading of the series.
///
/// The status is computed from the value when the observation is built and
/// cannot be set on its own.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawObservation"))]
pub struct Observation {
    id: ObservationId,
    timestamp: DateTime<Utc>,
    value: f64,
    status: Status,
}

impl Observation {
    /// Create an observation with a fresh id.
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self::with_id(ObservationId::new(), timestamp, value)
    }

    /// Create an observation with a known id.
    pub fn with_id(id: ObservationId, timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            id,
            timestamp,
            value,
            status: Status::classify(value),
        }
    }

    pub fn id(&self) -> ObservationId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

/// Wire shape of an observation; any `status` on the wire is ignored and
/// recomputed from `value`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawObservation {
    id: ObservationId,
    timestamp: DateTime<Utc>,
    value: f64,
}

#[cfg(feature = "serde")]
impl From<RawObservation> for Observation {
    fn from(raw: RawObservation) -> Self {
        Observation::with_id(raw.id, raw.timestamp, raw.value)
    }
}
