//! The metrics simulator: bounded random walks for a set of gauges.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::SimError;
use super::gauge::{Gauge, GaugeConfig, TrendBias};
use super::history::Sample;
use super::status::{StatusLevel, Thresholds};

/// Lifecycle of a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    /// Created, no gauges yet.
    Uninitialized,
    /// Gauges exist and `step()` may be called.
    Running,
    /// Stopped for good.
    Stopped,
}

/// Point-in-time copy of one gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeSnapshot {
    pub name: String,
    pub unit: String,
    pub value: f64,
    pub status: StatusLevel,
    pub trend_bias: TrendBias,
    pub min_value: f64,
    pub max_value: f64,
    /// Samples oldest first; x-axis is `sequence`, y-axis is `value`.
    pub history: Vec<Sample>,
}

impl GaugeSnapshot {
    /// Value formatted with the gauge's unit suffix.
    pub fn display_value(&self) -> String {
        if self.unit == "%" {
            format!("{:.0}%", self.value)
        } else {
            format!("{:.0} {}", self.value, self.unit)
        }
    }

    /// Position of the value within its range, in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        let range = self.max_value - self.min_value;
        if range <= 0.0 {
            return 0.0;
        }
        ((self.value - self.min_value) / range).clamp(0.0, 1.0)
    }

    /// Sparkline levels (0-7) for this gauge's history.
    pub fn sparkline(&self) -> Vec<u8> {
        super::history::normalize_sparkline(
            self.history.iter().map(|s| s.value),
            self.min_value,
            self.max_value,
        )
    }
}

/// Immutable copy of every gauge, safe to hand to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatorSnapshot {
    /// Number of `step()` calls completed when the snapshot was taken.
    pub tick: u64,
    pub thresholds: Thresholds,
    pub gauges: Vec<GaugeSnapshot>,
}

impl SimulatorSnapshot {
    pub fn gauge(&self, name: &str) -> Option<&GaugeSnapshot> {
        self.gauges.iter().find(|g| g.name == name)
    }

    /// Worst status across all gauges.
    pub fn overall_status(&self) -> StatusLevel {
        self.gauges.iter().map(|g| g.status).max().unwrap_or(StatusLevel::Success)
    }

    /// Number of gauges at each status: (success, warning, danger).
    pub fn status_counts(&self) -> (usize, usize, usize) {
        self.gauges.iter().fold((0, 0, 0), |(ok, warn, crit), g| match g.status {
            StatusLevel::Success => (ok + 1, warn, crit),
            StatusLevel::Warning => (ok, warn + 1, crit),
            StatusLevel::Danger => (ok, warn, crit + 1),
        })
    }
}

/// Produces evolving, bounded time series for a set of independent gauges.
///
/// # Example
///
/// ```
/// use pulseboard::sim::{GaugeConfig, MetricsSimulator};
///
/// let mut sim = MetricsSimulator::seeded(42);
/// sim.initialize(GaugeConfig::defaults()).unwrap();
/// sim.step().unwrap();
///
/// let snapshot = sim.current_snapshot().unwrap();
/// assert_eq!(snapshot.gauges.len(), 4);
/// assert_eq!(snapshot.gauges[0].history.len(), 20);
/// ```
#[derive(Debug)]
pub struct MetricsSimulator {
    state: SimulatorState,
    gauges: Vec<Gauge>,
    thresholds: Thresholds,
    rng: StdRng,
    tick: u64,
}

impl Default for MetricsSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSimulator {
    /// Create an uninitialized simulator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an uninitialized simulator with a reproducible seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: SimulatorState::Uninitialized,
            gauges: Vec::new(),
            thresholds: Thresholds::default(),
            rng,
            tick: 0,
        }
    }

    /// Replace the status thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Create the gauges and pre-fill each history.
    ///
    /// Fails with [`SimError::InvalidThresholds`] or
    /// [`SimError::InvalidConfig`] before any gauge is created.
    ///
    /// Every history is warmed up by running the same random walk used by
    /// [`step`](Self::step) `history_length` times from the seed value, so
    /// the first rendered frame already shows a full sparkline.
    pub fn initialize(&mut self, configs: Vec<GaugeConfig>) -> Result<(), SimError> {
        if self.state != SimulatorState::Uninitialized {
            return Err(SimError::AlreadyInitialized);
        }
        self.thresholds.validate()?;
        GaugeConfig::validate_all(&configs)?;

        self.gauges = configs
            .into_iter()
            .map(|config| {
                let warmup = config.history_length;
                let mut gauge = Gauge::new(config);
                for _ in 0..warmup {
                    gauge.advance(&mut self.rng);
                }
                gauge
            })
            .collect();

        self.state = SimulatorState::Running;
        info!(
            gauges = self.gauges.len(),
            "Metrics simulator initialized"
        );
        Ok(())
    }

    /// Advance every gauge by one bounded random step.
    ///
    /// All gauges are updated in one synchronous pass.
    pub fn step(&mut self) -> Result<(), SimError> {
        match self.state {
            SimulatorState::Uninitialized => return Err(SimError::NotInitialized),
            SimulatorState::Stopped => return Err(SimError::Stopped),
            SimulatorState::Running => {}
        }

        for gauge in &mut self.gauges {
            gauge.advance(&mut self.rng);
        }
        self.tick += 1;
        debug!(tick = self.tick, "Simulator stepped");
        Ok(())
    }

    /// Current status of a gauge.
    pub fn status(&self, gauge_name: &str) -> Result<StatusLevel, SimError> {
        let gauge = self.gauge(gauge_name)?;
        Ok(self.thresholds.classify(gauge.value()))
    }

    /// Look up a gauge by name.
    pub fn gauge(&self, gauge_name: &str) -> Result<&Gauge, SimError> {
        self.gauges
            .iter()
            .find(|g| g.name() == gauge_name)
            .ok_or_else(|| SimError::UnknownGauge(gauge_name.to_string()))
    }

    /// Owned copy of all gauge state.
    ///
    /// Stopped simulators still return their final state.
    pub fn current_snapshot(&self) -> Result<SimulatorSnapshot, SimError> {
        if self.state == SimulatorState::Uninitialized {
            return Err(SimError::NotInitialized);
        }

        let gauges = self
            .gauges
            .iter()
            .map(|g| {
                let config = g.config();
                GaugeSnapshot {
                    name: config.name.clone(),
                    unit: config.unit.clone(),
                    value: g.value(),
                    status: self.thresholds.classify(g.value()),
                    trend_bias: config.trend_bias,
                    min_value: config.min_value,
                    max_value: config.max_value,
                    history: g.history().to_vec(),
                }
            })
            .collect();

        Ok(SimulatorSnapshot {
            tick: self.tick,
            thresholds: self.thresholds,
            gauges,
        })
    }

    /// Stop the simulator. Calling it again is a no-op.
    ///
    /// Returns `true` if this call changed the state.
    pub fn stop(&mut self) -> bool {
        if self.state == SimulatorState::Stopped {
            return false;
        }
        self.state = SimulatorState::Stopped;
        info!(tick = self.tick, "Metrics simulator stopped");
        true
    }

    pub fn state(&self) -> SimulatorState {
        self.state
    }

    /// Number of completed `step()` calls.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

}
