//! Periodic driver for a [`MetricsSimulator`].
//!
//! The ticker task is the simulator's only writer. It steps every gauge on a
//! fixed period and publishes one complete snapshot per step, so readers
//! never observe a partially updated set of gauges.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use super::ChannelSource;
use crate::sim::{MetricsSimulator, SimError, SimulatorSnapshot};

/// Handle to a running simulator task.
///
/// Must be created from within a tokio runtime.
#[derive(Debug)]
pub struct SimulatorTicker {
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<MetricsSimulator>>,
    period: Duration,
}

impl SimulatorTicker {
    /// Move an initialized simulator into a background task stepping it
    /// every `period`.
    ///
    /// The current (pre-warmed) snapshot is published immediately; the first
    /// step happens one `period` later.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use pulseboard::sim::{GaugeConfig, MetricsSimulator};
    /// use pulseboard::{DataSource, SimulatorTicker};
    ///
    /// # tokio_test::block_on(async {
    /// let mut sim = MetricsSimulator::seeded(7);
    /// sim.initialize(GaugeConfig::defaults()).unwrap();
    ///
    /// let (mut ticker, mut source) = SimulatorTicker::spawn(sim, Duration::from_secs(2)).unwrap();
    /// assert_eq!(source.poll().unwrap().gauges.len(), 4);
    /// ticker.stop();
    /// # });
    /// ```
    pub fn spawn(
        mut simulator: MetricsSimulator,
        period: Duration,
    ) -> Result<(Self, ChannelSource), SimError> {
        let initial = simulator.current_snapshot()?;
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        info!(period_ms = period.as_millis() as u64, "Starting simulator ticker");

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the pre-warmed snapshot covers it.
            interval.tick().await;

            loop {
                tokio::select! {
                    biased;
                    changed = shutdown_rx.changed() => {
                        // A dropped handle counts as a shutdown request too
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        if let Err(e) = publish_step(&mut simulator, &snapshot_tx) {
                            error!("Simulator step failed: {}", e);
                            break;
                        }
                        if snapshot_tx.is_closed() {
                            debug!("All snapshot receivers dropped, stopping ticker");
                            break;
                        }
                    }
                }
            }

            simulator.stop();
            simulator
        });

        let source = ChannelSource::new(snapshot_rx, "simulator");
        let ticker = Self {
            shutdown: shutdown_tx,
            handle: Some(handle),
            period,
        };
        Ok((ticker, source))
    }

    /// Signal the task to stop. Calling it again is a no-op.
    ///
    /// Returns `true` if this call stopped the ticker.
    pub fn stop(&mut self) -> bool {
        if self.handle.is_none() {
            return false;
        }
        // Err only means the task already exited on its own
        let _ = self.shutdown.send(true);
        self.handle = None;
        info!("Simulator ticker stopped");
        true
    }

    /// Stop the ticker and wait for the task, returning the simulator.
    ///
    /// Returns `None` if the ticker was already stopped with [`stop`](Self::stop).
    pub async fn shutdown(mut self) -> Option<MetricsSimulator> {
        let handle = self.handle.take()?;
        let _ = self.shutdown.send(true);
        match handle.await {
            Ok(simulator) => Some(simulator),
            Err(e) => {
                error!("Simulator task failed: {}", e);
                None
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for SimulatorTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Step once and publish the resulting snapshot.
fn publish_step(
    simulator: &mut MetricsSimulator,
    tx: &watch::Sender<SimulatorSnapshot>,
) -> Result<(), SimError> {
    simulator.step()?;
    let snapshot = simulator.current_snapshot()?;
    // send_replace never fails, even with no receivers left
    tx.send_replace(snapshot);
    Ok(())
}
