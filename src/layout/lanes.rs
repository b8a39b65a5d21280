//! Greedy interval packing into lanes.
//!
//! Intervals are processed by `(start_date, end_date, id)` and each one takes
//! the first lane whose last occupant ended strictly before it starts. Since
//! dates are inclusive, touching ranges (`end == next start`) never share a
//! lane. In start order this greedy choice is optimal: the lane count equals
//! the largest number of intervals active on a single day.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::core::Interval;

/// Lane index per input interval plus the number of lanes opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneAssignment {
    pub lanes: Vec<usize>,
    pub lane_count: usize,
}

/// Deterministic layout order.
#[must_use]
pub fn layout_order(a: &Interval, b: &Interval) -> Ordering {
    a.start_date
        .cmp(&b.start_date)
        .then_with(|| a.end_date.cmp(&b.end_date))
        .then_with(|| a.id.cmp(&b.id))
}

/// Assigns a lane to every interval; `lanes[i]` belongs to `intervals[i]`.
#[must_use]
pub fn assign_lanes(intervals: &[&Interval]) -> LaneAssignment {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by(|&a, &b| layout_order(intervals[a], intervals[b]).then_with(|| a.cmp(&b)));

    let mut lane_last_end = Vec::<NaiveDate>::new();
    let mut lanes = vec![0; intervals.len()];
    for index in order {
        let interval = intervals[index];
        lanes[index] = allocate_lane(&mut lane_last_end, interval.start_date, interval.end_date);
    }

    LaneAssignment {
        lanes,
        lane_count: lane_last_end.len(),
    }
}

fn allocate_lane(lane_last_end: &mut Vec<NaiveDate>, start: NaiveDate, end: NaiveDate) -> usize {
    for (lane, last_end) in lane_last_end.iter_mut().enumerate() {
        if *last_end < start {
            *last_end = end;
            return lane;
        }
    }
    lane_last_end.push(end);
    lane_last_end.len() - 1
}
