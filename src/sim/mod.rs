//! Synthetic metrics generation.
//!
//! This module is the only source of numbers on the dashboard. Nothing here
//! performs I/O; every value comes from a seeded or entropy-backed RNG.
//!
//! ## Submodules
//!
//! - [`simulator`]: [`MetricsSimulator`] and its snapshot types
//! - [`gauge`]: Per-gauge configuration ([`GaugeConfig`]) and random-walk state
//! - [`history`]: Fixed-capacity sample buffer used for sparklines
//! - [`status`]: Threshold classification ([`StatusLevel`], [`Thresholds`])
//! - [`series`]: One-shot performance and request series for charts
//!
//! ## Data Flow
//!
//! ```text
//! GaugeConfig ──▶ MetricsSimulator::initialize()
//!                        │
//!                        ▼
//!        step() ──▶ Gauge::advance() ──▶ History::push()
//!                        │
//!                        ▼
//!        current_snapshot() ──▶ SimulatorSnapshot (owned copy)
//! ```

pub mod error;
pub mod gauge;
pub mod history;
pub mod series;
pub mod simulator;
pub mod status;

pub use error::SimError;
pub use gauge::{Gauge, GaugeConfig, TrendBias};
pub use history::{History, Sample, DEFAULT_HISTORY_LENGTH};
pub use series::{PerformanceData, PerformancePoint, RequestPoint, RequestSummary};
pub use simulator::{GaugeSnapshot, MetricsSimulator, SimulatorSnapshot, SimulatorState};
pub use status::{StatusLevel, Thresholds};
