//! Rolling sample history for sparklines.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of samples kept per gauge.
pub const DEFAULT_HISTORY_LENGTH: usize = 20;

/// Number of distinct sparkline levels (`0..=7`).
const SPARKLINE_LEVELS: u8 = 8;

/// A single recorded gauge value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Position of this sample in the gauge's lifetime, starting at 0.
    pub sequence: u64,
    pub value: f64,
}

/// Fixed-capacity FIFO of samples.
///
/// New samples are pushed to the back; once the capacity is exceeded the
/// oldest sample is dropped from the front.
#[derive(Debug, Clone)]
pub struct History {
    samples: VecDeque<Sample>,
    capacity: usize,
    next_sequence: u64,
}

impl History {
    /// Create an empty history holding at most `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
            next_sequence: 0,
        }
    }

    /// Append a value, evicting the oldest sample if the buffer is full.
    pub fn push(&mut self, value: f64) -> Sample {
        let sample = Sample {
            sequence: self.next_sequence,
            value,
        };
        self.next_sequence += 1;

        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        sample
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Iterate samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    /// Owned copy of the samples, oldest first.
    pub fn to_vec(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    /// Normalize values to 0-7 for sparkline display.
    ///
    /// Values are scaled against `[min, max]` rather than against the
    /// observed spread, so a flat line at 90% renders high, not mid-height.
    pub fn sparkline(&self, min: f64, max: f64) -> Vec<u8> {
        normalize_sparkline(self.samples.iter().map(|s| s.value), min, max)
    }
}

/// Normalize a series of values into sparkline levels relative to `[min, max]`.
pub fn normalize_sparkline(values: impl Iterator<Item = f64>, min: f64, max: f64) -> Vec<u8> {
    let range = max - min;
    let top = (SPARKLINE_LEVELS - 1) as f64;

    values
        .map(|v| {
            if range <= 0.0 {
                return 0;
            }
            let normalized = ((v - min) / range * top).round();
            normalized.clamp(0.0, top) as u8
        })
        .collect()
}
