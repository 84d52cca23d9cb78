//! Status classification for gauge values.

use serde::{Deserialize, Serialize};

use super::error::SimError;

/// Cut-offs used to classify a gauge value.
///
/// A value at or above `danger` is [`StatusLevel::Danger`], at or above
/// `warning` is [`StatusLevel::Warning`], anything lower is
/// [`StatusLevel::Success`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Value at which a gauge turns to warning.
    pub warning: f64,
    /// Value at which a gauge turns to danger.
    pub danger: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: 70.0,
            danger: 85.0,
        }
    }
}

impl Thresholds {
    /// Both cut-offs must be finite and `warning <= danger`.
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |reason: String| Err(SimError::InvalidThresholds { reason });
        if !self.warning.is_finite() || !self.danger.is_finite() {
            return invalid(format!(
                "thresholds must be finite (warning {}, danger {})",
                self.warning, self.danger
            ));
        }
        if self.warning > self.danger {
            return invalid(format!(
                "warning {} is above danger {}",
                self.warning, self.danger
            ));
        }
        Ok(())
    }

    /// Classify a value. Pure; recomputed on every read.
    pub fn classify(&self, value: f64) -> StatusLevel {
        if value >= self.danger {
            StatusLevel::Danger
        } else if value >= self.warning {
            StatusLevel::Warning
        } else {
            StatusLevel::Success
        }
    }
}

/// Status of a gauge, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Success,
    Warning,
    Danger,
}

impl StatusLevel {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            StatusLevel::Success => "OK",
            StatusLevel::Warning => "WARN",
            StatusLevel::Danger => "CRIT",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            StatusLevel::Success => "Success",
            StatusLevel::Warning => "Warning",
            StatusLevel::Danger => "Danger",
        }
    }
}
