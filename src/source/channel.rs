//! Channel-based data source.
//!
//! Receives simulator snapshots via a tokio watch channel. The watch channel
//! only ever holds the newest snapshot, so a slow renderer skips frames
//! instead of queueing them.

use tokio::sync::watch;

use super::DataSource;
use crate::sim::SimulatorSnapshot;

/// A data source that receives snapshots via a channel.
///
/// # Example
///
/// ```
/// use pulseboard::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("simulator");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<SimulatorSnapshot>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
    closed: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where snapshots come from
    pub fn new(receiver: watch::Receiver<SimulatorSnapshot>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
            closed: false,
        }
    }

    /// Create a channel pair seeded with an empty snapshot.
    ///
    /// Returns (sender, source).
    pub fn create(source_description: &str) -> (watch::Sender<SimulatorSnapshot>, Self) {
        let (tx, rx) = watch::channel(SimulatorSnapshot::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<SimulatorSnapshot> {
        // Return the initial value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        match self.receiver.has_changed() {
            Ok(true) => Some(self.receiver.borrow_and_update().clone()),
            Ok(false) => None,
            Err(_) => {
                // Sender gone: the producer has stopped for good
                self.closed = true;
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        if self.closed {
            Some("simulator stopped")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GaugeConfig, MetricsSimulator};

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // Initially returns the default (empty) snapshot
        let snapshot = source.poll();
        assert!(snapshot.is_some());
        assert!(snapshot.unwrap().gauges.is_empty());

        // No change, so poll returns None
        assert!(source.poll().is_none());

        let mut sim = MetricsSimulator::seeded(1);
        sim.initialize(GaugeConfig::defaults()).unwrap();
        tx.send(sim.current_snapshot().unwrap()).unwrap();

        // Now poll returns the new snapshot
        let snapshot = source.poll();
        assert!(snapshot.is_some());
        assert_eq!(snapshot.unwrap().gauges.len(), 4);
        assert!(source.error().is_none());
    }

    #[test]
    fn dropped_sender_reports_error() {
        let (tx, mut source) = ChannelSource::create("test");
        assert!(source.poll().is_some());

        drop(tx);
        assert!(source.poll().is_none());
        assert_eq!(source.error(), Some("simulator stopped"));
        assert_eq!(source.description(), "channel: test");
    }
}
