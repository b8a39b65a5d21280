use std::collections::BTreeMap;

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::capacity::node::CapacityRollup;
use crate::capacity::severity::{LoadSeverity, SeverityThresholds};
use crate::core::{DayWindow, Interval, clip_to_window};

/// Ratio reported when work is assigned against zero capacity.
///
/// Finite so consumers can compare and scale it without special cases.
pub const OVERFLOW_SENTINEL: f64 = 1.0e6;

/// Load of one day: active rate sum `X` against capacity `Y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub active_rate_sum: f64,
    pub capacity: f64,
    pub ratio: f64,
    pub has_override: bool,
}

impl AggregationResult {
    #[must_use]
    pub fn severity(&self, thresholds: SeverityThresholds) -> LoadSeverity {
        thresholds.classify(self.ratio)
    }

    /// `X > 0` against `Y == 0`.
    #[must_use]
    pub fn is_capacity_starved(&self) -> bool {
        self.ratio >= OVERFLOW_SENTINEL
    }
}

/// `X / Y`, with `0` for an empty zero-capacity day and the sentinel otherwise.
#[must_use]
pub fn load_ratio(active_rate_sum: f64, capacity: f64) -> f64 {
    if capacity == 0.0 {
        return if active_rate_sum == 0.0 {
            0.0
        } else {
            OVERFLOW_SENTINEL
        };
    }
    let ratio = active_rate_sum / capacity;
    if ratio.is_finite() {
        ratio.clamp(-OVERFLOW_SENTINEL, OVERFLOW_SENTINEL)
    } else {
        OVERFLOW_SENTINEL
    }
}

/// Per-date aggregation over a day window, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLoad {
    days: BTreeMap<NaiveDate, AggregationResult>,
}

impl DailyLoad {
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&AggregationResult> {
        self.days.get(&date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &AggregationResult)> {
        self.days.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<NaiveDate, AggregationResult> {
        &self.days
    }

    #[must_use]
    pub fn into_map(self) -> BTreeMap<NaiveDate, AggregationResult> {
        self.days
    }

    /// Highest ratio in the window, `None` for an empty window.
    #[must_use]
    pub fn peak_ratio(&self) -> Option<f64> {
        self.days
            .values()
            .map(|result| OrderedFloat(result.ratio))
            .max()
            .map(OrderedFloat::into_inner)
    }

    #[must_use]
    pub fn severity_on(
        &self,
        date: NaiveDate,
        thresholds: SeverityThresholds,
    ) -> Option<LoadSeverity> {
        self.get(date).map(|result| result.severity(thresholds))
    }
}

/// Aggregates against a flat default capacity with sparse per-date overrides.
#[must_use]
pub fn compute_daily<'a, I>(
    window: &DayWindow,
    intervals: I,
    default_capacity: f64,
    overrides_by_date: &BTreeMap<NaiveDate, f64>,
) -> DailyLoad
where
    I: IntoIterator<Item = &'a Interval>,
{
    compute_daily_with(window, intervals, |date| match overrides_by_date.get(&date) {
        Some(capacity) => CapacityRollup {
            capacity: *capacity,
            has_override: true,
        },
        None => CapacityRollup {
            capacity: default_capacity,
            has_override: false,
        },
    })
}

/// Aggregates against any per-date capacity source, e.g. a hierarchy rollup.
///
/// Intervals count on every day from start to end inclusive; days outside
/// the window are ignored.
#[must_use]
pub fn compute_daily_with<'a, I, F>(window: &DayWindow, intervals: I, capacity_on: F) -> DailyLoad
where
    I: IntoIterator<Item = &'a Interval>,
    F: Fn(NaiveDate) -> CapacityRollup,
{
    let mut sums = vec![0.0_f64; window.len()];
    let mut counted = 0usize;
    for interval in intervals {
        let Some(span) = clip_to_window(window, interval.start_date, interval.end_date) else {
            continue;
        };
        counted += 1;
        for sum in &mut sums[span.start_index..=span.end_index] {
            *sum += interval.rate;
        }
    }

    let days = window
        .dates()
        .zip(sums)
        .map(|(date, active_rate_sum)| {
            let rollup = capacity_on(date);
            let result = AggregationResult {
                active_rate_sum,
                capacity: rollup.capacity,
                ratio: load_ratio(active_rate_sum, rollup.capacity),
                has_override: rollup.has_override,
            };
            (date, result)
        })
        .collect();

    trace!(days = window.len(), intervals = counted, "computed daily load");
    DailyLoad { days }
}
