use serde::{Deserialize, Serialize};

use crate::capacity::SeverityThresholds;
use crate::core::DayScale;
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::ResizeBehavior;
use crate::layout::BarGeometryConfig;

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist timeline setup next to their own
/// settings. Every field has a default, so partial documents load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_days_before")]
    pub days_before: u32,
    #[serde(default = "default_days_after")]
    pub days_after: u32,
    #[serde(default = "default_day_cell_width_px")]
    pub day_cell_width_px: f64,
    #[serde(default)]
    pub bar_geometry: BarGeometryConfig,
    #[serde(default)]
    pub resize_behavior: ResizeBehavior,
    #[serde(default = "default_edge_handle_width_px")]
    pub edge_handle_width_px: f64,
    #[serde(default)]
    pub severity_thresholds: SeverityThresholds,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            days_before: default_days_before(),
            days_after: default_days_after(),
            day_cell_width_px: default_day_cell_width_px(),
            bar_geometry: BarGeometryConfig::default(),
            resize_behavior: ResizeBehavior::default(),
            edge_handle_width_px: default_edge_handle_width_px(),
            severity_thresholds: SeverityThresholds::default(),
        }
    }
}

impl TimelineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many days are shown around the center date.
    #[must_use]
    pub fn with_window(mut self, days_before: u32, days_after: u32) -> Self {
        self.days_before = days_before;
        self.days_after = days_after;
        self
    }

    #[must_use]
    pub fn with_day_cell_width_px(mut self, width: f64) -> Self {
        self.day_cell_width_px = width;
        self
    }

    #[must_use]
    pub fn with_bar_geometry(mut self, geometry: BarGeometryConfig) -> Self {
        self.bar_geometry = geometry;
        self
    }

    #[must_use]
    pub fn with_resize_behavior(mut self, behavior: ResizeBehavior) -> Self {
        self.resize_behavior = behavior;
        self
    }

    #[must_use]
    pub fn with_edge_handle_width_px(mut self, width: f64) -> Self {
        self.edge_handle_width_px = width;
        self
    }

    #[must_use]
    pub fn with_severity_thresholds(mut self, thresholds: SeverityThresholds) -> Self {
        self.severity_thresholds = thresholds;
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        DayScale::new(self.day_cell_width_px)?;
        self.bar_geometry.validate()?;
        self.resize_behavior.validate()?;
        self.severity_thresholds.validate()?;
        if !self.edge_handle_width_px.is_finite() || self.edge_handle_width_px < 0.0 {
            return Err(TimelineError::InvalidConfig(
                "edge handle width must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| TimelineError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TimelineError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_days_before() -> u32 {
    30
}

fn default_days_after() -> u32 {
    90
}

fn default_day_cell_width_px() -> f64 {
    24.0
}

fn default_edge_handle_width_px() -> f64 {
    6.0
}
