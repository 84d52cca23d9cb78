// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # pulseboard
//!
//! A terminal infrastructure dashboard driven by a synthetic metrics
//! simulator.
//!
//! Nothing here talks to real hosts. A [`MetricsSimulator`] runs bounded
//! random walks for a handful of gauges (cpu, memory, disk, network), keeps a
//! rolling history per gauge for sparklines, and classifies each value as
//! success / warning / danger. A [`SimulatorTicker`] steps it on a fixed
//! period and publishes snapshots that the TUI renders.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │  app    │───▶│ snapshot │───▶│   ui    │───▶│ Terminal │  │
//! │  │ (state) │    │  (copy)  │    │(render) │    │          │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └──────────┘  │
//! │       │ poll()                                               │
//! │       ▼                                                      │
//! │  ┌─────────┐  watch   ┌──────────────────┐                   │
//! │  │ source  │◀─────────│ SimulatorTicker  │ tokio interval    │
//! │  │(channel)│          │  └ MetricsSimulator (sole writer)    │
//! │  └─────────┘          └──────────────────┘                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`sim`]**: The simulator, gauges, rolling history, status thresholds,
//!   and one-shot performance series
//! - **[`source`]**: [`DataSource`] trait, [`ChannelSource`] and the
//!   [`SimulatorTicker`] scheduler
//! - **[`config`]**: Layered configuration (defaults, file, environment)
//! - **[`app`]**: Application state and navigation
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### Driving the simulator directly
//!
//! ```
//! use pulseboard::sim::{GaugeConfig, MetricsSimulator, StatusLevel};
//!
//! let mut sim = MetricsSimulator::seeded(1);
//! sim.initialize(GaugeConfig::defaults()).unwrap();
//!
//! for _ in 0..10 {
//!     sim.step().unwrap();
//! }
//!
//! let cpu = sim.gauge("cpu").unwrap();
//! assert!((0.0..=100.0).contains(&cpu.value()));
//! assert_eq!(cpu.history().len(), 20);
//! let _status: StatusLevel = sim.status("cpu").unwrap();
//! ```
//!
//! ### Feeding the dashboard from a ticker
//!
//! ```no_run
//! use std::time::Duration;
//! use pulseboard::sim::{GaugeConfig, MetricsSimulator};
//! use pulseboard::{App, SimulatorTicker};
//!
//! # tokio_test::block_on(async {
//! let mut sim = MetricsSimulator::new();
//! sim.initialize(GaugeConfig::defaults()).unwrap();
//!
//! let (ticker, source) = SimulatorTicker::spawn(sim, Duration::from_secs(2)).unwrap();
//! let app = App::new(Box::new(source));
//! # });
//! ```

pub mod app;
pub mod config;
pub mod events;
pub mod export;
pub mod sim;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::DashboardConfig;
pub use sim::{
    GaugeConfig, GaugeSnapshot, MetricsSimulator, SimError, SimulatorSnapshot, StatusLevel,
    Thresholds, TrendBias,
};
pub use source::{ChannelSource, DataSource, SimulatorTicker};
