//! Fixed-capacity, most-recent-first history of observations.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::ConfigError;
use crate::observation::Observation;
use crate::projection::TimeRange;

/// Prepend `item` to `buffer` and keep at most `capacity` elements.
///
/// Leaves `buffer` untouched. A capacity of zero is treated as one so that the
/// result always starts with `item`.
pub fn push(buffer: &[Observation], item: Observation, capacity: usize) -> Vec<Observation> {
    let capacity = capacity.max(1);
    let mut result = Vec::with_capacity(capacity.min(buffer.len() + 1));
    result.push(item);
    result.extend(buffer.iter().take(capacity - 1).cloned());
    result
}

/// Copy of `observations` ordered earliest to latest.
///
/// The sort is stable: observations with equal timestamps keep their input order.
pub fn chronological<'a, I>(observations: I) -> Vec<Observation>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut sorted: Vec<Observation> = observations.into_iter().cloned().collect();
    sorted.sort_by_key(|o| o.timestamp());
    sorted
}

/// Bounded history, newest observation first.
///
/// Pushing beyond the capacity evicts the oldest observation.
#[derive(Debug, Clone)]
pub struct SeriesBuffer {
    items: VecDeque<Observation>,
    capacity: usize,
}

impl SeriesBuffer {
    /// Create an empty buffer holding at most `capacity` observations.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Insert at the front, evicting from the back when over capacity.
    pub fn push(&mut self, item: Observation) {
        self.items.push_front(item);
        self.items.truncate(self.capacity);
    }

    /// The most recently pushed observation.
    pub fn latest(&self) -> Option<&Observation> {
        self.items.front()
    }

    /// The oldest retained observation.
    pub fn oldest(&self) -> Option<&Observation> {
        self.items.back()
    }

    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> + '_ {
        self.items.iter()
    }

    /// Observations ordered earliest to latest.
    pub fn chronological(&self) -> Vec<Observation> {
        chronological(&self.items)
    }

    /// Immutable copy of the current contents, newest first.
    pub fn snapshot(&self) -> Arc<[Observation]> {
        self.items.iter().cloned().collect()
    }

    /// `[earliest, latest]` timestamps, or `[now, now]` when empty.
    pub fn time_range(&self, now: DateTime<Utc>) -> TimeRange {
        TimeRange::of(&self.items, now)
    }
}
