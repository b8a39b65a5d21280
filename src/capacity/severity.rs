use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadSeverity {
    Low,
    Medium,
    High,
    Overflow,
}

/// Ratio boundaries for load severity.
///
/// `ratio < medium_from` is low, `< high_from` medium, `<= overflow_above`
/// high, anything above overflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    pub medium_from: f64,
    pub high_from: f64,
    pub overflow_above: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            medium_from: 0.7,
            high_from: 0.9,
            overflow_above: 1.0,
        }
    }
}

impl SeverityThresholds {
    pub fn validate(self) -> TimelineResult<Self> {
        for (value, name) in [
            (self.medium_from, "medium_from"),
            (self.high_from, "high_from"),
            (self.overflow_above, "overflow_above"),
        ] {
            if !value.is_finite() {
                return Err(TimelineError::InvalidConfig(format!(
                    "severity threshold `{name}` must be finite"
                )));
            }
        }
        if !(self.medium_from <= self.high_from && self.high_from <= self.overflow_above) {
            return Err(TimelineError::InvalidConfig(
                "severity thresholds must be ascending".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn classify(self, ratio: f64) -> LoadSeverity {
        if ratio < self.medium_from {
            LoadSeverity::Low
        } else if ratio < self.high_from {
            LoadSeverity::Medium
        } else if ratio <= self.overflow_above {
            LoadSeverity::High
        } else {
            LoadSeverity::Overflow
        }
    }
}
