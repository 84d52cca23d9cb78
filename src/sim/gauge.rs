//! Gauge configuration and state.

use std::collections::HashSet;
use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::history::{History, Sample, DEFAULT_HISTORY_LENGTH};

/// Tendency of a gauge's random walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendBias {
    Up,
    Down,
    #[default]
    Stable,
}

impl TrendBias {
    /// Half-open range a step's delta is drawn from.
    pub fn delta_range(self) -> Range<f64> {
        match self {
            TrendBias::Up => -1.0..5.0,
            TrendBias::Down => -5.0..1.0,
            TrendBias::Stable => -5.0..5.0,
        }
    }

    /// Draw one delta for this bias.
    pub fn draw<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        rng.gen_range(self.delta_range())
    }
}

/// Configuration for a single gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub name: String,
    /// Suffix shown after the value (e.g. "%", "MB/s").
    pub unit: String,
    pub trend_bias: TrendBias,
    pub min_value: f64,
    pub max_value: f64,
    /// Value the random walk starts from before the history is pre-filled.
    pub seed_value: f64,
    pub history_length: usize,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            unit: "%".to_string(),
            trend_bias: TrendBias::Stable,
            min_value: 0.0,
            max_value: 100.0,
            seed_value: 50.0,
            history_length: DEFAULT_HISTORY_LENGTH,
        }
    }
}

impl GaugeConfig {
    /// Config with the given name and bias, defaults elsewhere.
    pub fn new(name: &str, trend_bias: TrendBias) -> Self {
        Self {
            name: name.to_string(),
            trend_bias,
            ..Self::default()
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub fn with_range(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    pub fn with_seed_value(mut self, seed_value: f64) -> Self {
        self.seed_value = seed_value;
        self
    }

    pub fn with_history_length(mut self, history_length: usize) -> Self {
        self.history_length = history_length;
        self
    }

    /// The four gauges the dashboard shows out of the box.
    pub fn defaults() -> Vec<GaugeConfig> {
        vec![
            GaugeConfig::new("cpu", TrendBias::Stable),
            GaugeConfig::new("memory", TrendBias::Up),
            GaugeConfig::new("disk", TrendBias::Stable),
            GaugeConfig::new("network", TrendBias::Down).with_unit("MB/s"),
        ]
    }

    /// Reject configurations that would make clamping ill-defined.
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |reason: &str| SimError::InvalidConfig {
            gauge: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !self.min_value.is_finite() || !self.max_value.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if self.min_value > self.max_value {
            return Err(invalid("min_value is greater than max_value"));
        }
        if !self.seed_value.is_finite() {
            return Err(invalid("seed_value must be finite"));
        }
        if self.history_length == 0 {
            return Err(invalid("history_length must be at least 1"));
        }
        Ok(())
    }

    /// Validate a whole gauge set, including name uniqueness.
    pub fn validate_all(configs: &[GaugeConfig]) -> Result<(), SimError> {
        if configs.is_empty() {
            return Err(SimError::NoGauges);
        }

        let mut seen = HashSet::new();
        for config in configs {
            config.validate()?;
            if !seen.insert(config.name.as_str()) {
                return Err(SimError::InvalidConfig {
                    gauge: config.name.clone(),
                    reason: "duplicate gauge name".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Live state of one simulated gauge.
#[derive(Debug, Clone)]
pub struct Gauge {
    config: GaugeConfig,
    value: f64,
    history: History,
}

impl Gauge {
    /// Create a gauge at its seed value with an empty history.
    ///
    /// The seed is clamped into range so a badly placed seed cannot break
    /// the range invariant.
    pub(crate) fn new(config: GaugeConfig) -> Self {
        let value = config.seed_value.clamp(config.min_value, config.max_value);
        let history = History::with_capacity(config.history_length);
        Self {
            config,
            value,
            history,
        }
    }

    /// Advance by one random-walk step and record the result.
    pub(crate) fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Sample {
        let delta = self.config.trend_bias.draw(rng);
        self.apply_delta(delta)
    }

    /// Add `delta`, clamp into range and append to the history.
    pub(crate) fn apply_delta(&mut self, delta: f64) -> Sample {
        self.value = (self.value + delta).clamp(self.config.min_value, self.config.max_value);
        self.history.push(self.value)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn delta_ranges_match_bias() {
        assert_eq!(TrendBias::Up.delta_range(), -1.0..5.0);
        assert_eq!(TrendBias::Down.delta_range(), -5.0..1.0);
        assert_eq!(TrendBias::Stable.delta_range(), -5.0..5.0);
    }

    #[test]
    fn draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for bias in [TrendBias::Up, TrendBias::Down, TrendBias::Stable] {
            let range = bias.delta_range();
            for _ in 0..1_000 {
                let d = bias.draw(&mut rng);
                assert!(range.contains(&d), "{d} outside {range:?}");
            }
        }
    }

    #[test]
    fn apply_delta_clamps_both_ends() {
        let mut g = Gauge::new(GaugeConfig::new("cpu", TrendBias::Stable).with_seed_value(98.0));
        g.apply_delta(10.0);
        assert_eq!(g.value(), 100.0);
        g.apply_delta(-500.0);
        assert_eq!(g.value(), 0.0);
        assert_eq!(g.history().len(), 2);
    }

    #[test]
    fn seed_outside_range_is_clamped() {
        let g = Gauge::new(GaugeConfig::new("disk", TrendBias::Up).with_seed_value(150.0));
        assert_eq!(g.value(), 100.0);
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let config = GaugeConfig::new("cpu", TrendBias::Up).with_range(10.0, 5.0);
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig { ref gauge, .. }) if gauge == "cpu"
        ));
    }

    #[test]
    fn validate_rejects_zero_history_and_nan() {
        let zero = GaugeConfig::new("cpu", TrendBias::Up).with_history_length(0);
        assert!(zero.validate().is_err());

        let nan = GaugeConfig::new("cpu", TrendBias::Up).with_seed_value(f64::NAN);
        assert!(nan.validate().is_err());

        let unnamed = GaugeConfig::default();
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn validate_all_rejects_duplicates_and_empty() {
        assert_eq!(GaugeConfig::validate_all(&[]), Err(SimError::NoGauges));

        let configs = vec![
            GaugeConfig::new("cpu", TrendBias::Up),
            GaugeConfig::new("cpu", TrendBias::Down),
        ];
        assert!(GaugeConfig::validate_all(&configs).is_err());
        assert!(GaugeConfig::validate_all(&GaugeConfig::defaults()).is_ok());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: GaugeConfig =
            serde_json::from_str(r#"{ "name": "gpu", "trend_bias": "up" }"#).unwrap();
        assert_eq!(config.name, "gpu");
        assert_eq!(config.trend_bias, TrendBias::Up);
        assert_eq!(config.max_value, 100.0);
        assert_eq!(config.seed_value, 50.0);
        assert_eq!(config.history_length, DEFAULT_HISTORY_LENGTH);
    }
}
