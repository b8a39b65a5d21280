use chrono::NaiveDate;

use crate::core::{DayWindow, Interval};

/// Day indices an interval covers inside the window, with clipping flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpan {
    pub start_index: usize,
    pub end_index: usize,
    pub clipped_left: bool,
    pub clipped_right: bool,
}

/// Clamps an inclusive date range to the window.
///
/// Returns `None` when the range lies entirely outside.
#[must_use]
pub fn clip_to_window(window: &DayWindow, start: NaiveDate, end: NaiveDate) -> Option<WindowSpan> {
    let first = window.first_date()?;
    let last = window.last_date()?;
    if end < first || start > last {
        return None;
    }

    let clipped_left = start < first;
    let clipped_right = end > last;
    let start_index = if clipped_left {
        0
    } else {
        window.index_of(start)?
    };
    let end_index = if clipped_right {
        window.len() - 1
    } else {
        window.index_of(end)?
    };

    Some(WindowSpan {
        start_index,
        end_index,
        clipped_left,
        clipped_right,
    })
}

/// Intervals sharing at least one day with the window.
#[must_use]
pub fn intervals_in_window<'a>(window: &DayWindow, intervals: &'a [Interval]) -> Vec<&'a Interval> {
    let (Some(first), Some(last)) = (window.first_date(), window.last_date()) else {
        return Vec::new();
    };
    intervals
        .iter()
        .filter(|interval| interval.end_date >= first && interval.start_date <= last)
        .collect()
}
