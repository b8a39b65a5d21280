use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Capacity resolved for one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityRollup {
    pub capacity: f64,
    pub has_override: bool,
}

impl CapacityRollup {
    /// Sums capacities; an override anywhere marks the total.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            capacity: self.capacity + other.capacity,
            has_override: self.has_override || other.has_override,
        }
    }
}

/// Hierarchy level where capacity is configured directly.
///
/// Overrides are sparse: a missing date falls back to `default_capacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityNode {
    pub id: String,
    pub default_capacity: f64,
    #[serde(default)]
    pub overrides_by_date: BTreeMap<NaiveDate, f64>,
}

impl CapacityNode {
    #[must_use]
    pub fn new(id: impl Into<String>, default_capacity: f64) -> Self {
        Self {
            id: id.into(),
            default_capacity,
            overrides_by_date: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_override(mut self, date: NaiveDate, capacity: f64) -> Self {
        self.overrides_by_date.insert(date, capacity);
        self
    }

    #[must_use]
    pub fn capacity_on(&self, date: NaiveDate) -> CapacityRollup {
        match self.overrides_by_date.get(&date) {
            Some(capacity) => CapacityRollup {
                capacity: *capacity,
                has_override: true,
            },
            None => CapacityRollup {
                capacity: self.default_capacity,
                has_override: false,
            },
        }
    }
}
