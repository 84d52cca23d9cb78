//! Data source abstraction for receiving simulator snapshots.
//!
//! The dashboard never touches the simulator directly. It polls a
//! [`DataSource`], which keeps the renderer independent of how (and on which
//! thread) snapshots are produced.

mod channel;
mod ticker;

pub use channel::ChannelSource;
pub use ticker::SimulatorTicker;

use std::fmt::Debug;

use crate::sim::SimulatorSnapshot;

/// Trait for receiving simulator snapshots.
///
/// # Example
///
/// ```
/// use pulseboard::{ChannelSource, DataSource};
///
/// let (_tx, mut source) = ChannelSource::create("test");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} gauges", snapshot.gauges.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<SimulatorSnapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns an error message if the source can no longer produce data.
    fn error(&self) -> Option<&str>;
}
