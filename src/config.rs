//! Layered dashboard configuration.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults ([`DashboardConfig::default`])
//! 2. An optional config file (TOML, JSON or YAML, by extension)
//! 3. `PULSEBOARD__*` environment variables (e.g. `PULSEBOARD__TICK_INTERVAL_MS=500`)
//!
//! Command line flags are applied on top by the binary.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::sim::{GaugeConfig, Thresholds};

/// Everything the dashboard needs to build and drive its simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Period between simulator steps.
    pub tick_interval_ms: u64,
    /// Period between wall-clock refreshes in the header.
    pub clock_interval_ms: u64,
    /// Fixed RNG seed; entropy is used when absent.
    pub seed: Option<u64>,
    pub thresholds: Thresholds,
    pub gauges: Vec<GaugeConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2_000,
            clock_interval_ms: 1_000,
            seed: None,
            thresholds: Thresholds::default(),
            gauges: GaugeConfig::defaults(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env_prefix(path, "PULSEBOARD")
    }

    fn load_with_env_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let defaults = Config::try_from(&DashboardConfig::default())
            .context("Failed to encode default configuration")?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("__")
                .separator("__"),
        );

        let config: DashboardConfig = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        info!(
            gauges = config.gauges.len(),
            tick_interval_ms = config.tick_interval_ms,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Override every gauge's history length.
    pub fn set_history_length(&mut self, history_length: usize) {
        for gauge in &mut self.gauges {
            gauge.history_length = history_length;
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TrendBias;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let config = DashboardConfig::load_with_env_prefix(None, "PULSEBOARD_TEST_NONE").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(2));
        assert_eq!(config.clock_interval(), Duration::from_secs(1));
        assert_eq!(config.gauges.len(), 4);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
tick_interval_ms = 500
seed = 99

[thresholds]
warning = 60.0
danger = 90.0

[[gauges]]
name = "gpu"
trend_bias = "up"
history_length = 10

[[gauges]]
name = "network"
unit = "MB/s"
trend_bias = "down"
max_value = 250.0
"#
        )
        .unwrap();

        let config =
            DashboardConfig::load_with_env_prefix(Some(file.path()), "PULSEBOARD_TEST_FILE")
                .unwrap();

        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.clock_interval_ms, 1_000);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.thresholds.warning, 60.0);
        assert_eq!(config.gauges.len(), 2);
        assert_eq!(config.gauges[0].name, "gpu");
        assert_eq!(config.gauges[0].trend_bias, TrendBias::Up);
        assert_eq!(config.gauges[0].history_length, 10);
        assert_eq!(config.gauges[0].seed_value, 50.0);
        assert_eq!(config.gauges[1].max_value, 250.0);
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
tick_interval_ms = 500

[thresholds]
warning = 60.0
danger = 75.0

[[gauges]]
name = "gpu"
"#
        )
        .unwrap();

        std::env::set_var("PULSEBOARD_TEST_ENV__THRESHOLDS__DANGER", "90");
        std::env::set_var("PULSEBOARD_TEST_ENV__TICK_INTERVAL_MS", "250");
        let result =
            DashboardConfig::load_with_env_prefix(Some(file.path()), "PULSEBOARD_TEST_ENV");
        std::env::remove_var("PULSEBOARD_TEST_ENV__THRESHOLDS__DANGER");
        std::env::remove_var("PULSEBOARD_TEST_ENV__TICK_INTERVAL_MS");

        let config = result.unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.thresholds.danger, 90.0);
        // Keys not set in the environment keep the file value
        assert_eq!(config.thresholds.warning, 60.0);
        assert_eq!(config.gauges.len(), 1);
        assert_eq!(config.gauges[0].name, "gpu");
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = DashboardConfig::load_with_env_prefix(
            Some(Path::new("/nonexistent/pulseboard.toml")),
            "PULSEBOARD_TEST_MISSING",
        );
        assert!(result.is_err());
    }

    #[test]
    fn history_override_applies_to_all_gauges() {
        let mut config = DashboardConfig::default();
        config.set_history_length(7);
        assert!(config.gauges.iter().all(|g| g.history_length == 7));
    }
}
