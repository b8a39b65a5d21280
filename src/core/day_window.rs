use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::calendar::{HolidayCalendar, is_weekend};
use crate::core::primitives::{days_between, parse_calendar_date, shift_days};
use crate::error::TimelineResult;

/// One calendar day of the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub is_transferred_workday: bool,
    pub is_transferred_day_off: bool,
    pub is_workday: bool,
    pub is_today: bool,
}

impl DayCell {
    #[must_use]
    pub fn classify<C: HolidayCalendar + ?Sized>(
        date: NaiveDate,
        calendar: &C,
        today: NaiveDate,
    ) -> Self {
        let weekend = is_weekend(date);
        let holiday = calendar.is_holiday(date);
        let transferred_workday = calendar.is_transferred_workday(date);
        let transferred_day_off = calendar.is_transferred_day_off(date);
        let is_workday = transferred_workday || !(weekend || holiday || transferred_day_off);

        Self {
            date,
            is_weekend: weekend,
            is_holiday: holiday,
            is_transferred_workday: transferred_workday,
            is_transferred_day_off: transferred_day_off,
            is_workday,
            is_today: date == today,
        }
    }
}

/// Chronological, gap-free sequence of day cells.
///
/// Cells are consecutive calendar days, so the index of a date is its day
/// offset from the first cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    cells: Vec<DayCell>,
}

impl DayWindow {
    #[must_use]
    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DayCell> {
        self.cells.get(index)
    }

    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.cells.first().map(|cell| cell.date)
    }

    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.cells.last().map(|cell| cell.date)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index_of(date).is_some()
    }

    /// Position of `date` inside the window.
    #[must_use]
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = self.offset_of(date)?;
        usize::try_from(offset)
            .ok()
            .filter(|index| *index < self.cells.len())
    }

    /// Signed day offset of `date` from the first cell, also for dates outside.
    #[must_use]
    pub fn offset_of(&self, date: NaiveDate) -> Option<i64> {
        self.first_date().map(|first| days_between(first, date))
    }

    #[must_use]
    pub fn workday_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_workday).count()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().map(|cell| cell.date)
    }
}

/// Builds `days_before + 1 + days_after` consecutive cells around `center_date`.
///
/// A zero-sized request still yields the single center day.
#[must_use]
pub fn build_window<C: HolidayCalendar + ?Sized>(
    center_date: NaiveDate,
    days_before: u32,
    days_after: u32,
    calendar: &C,
    today: NaiveDate,
) -> DayWindow {
    let cells: Vec<DayCell> = (-i64::from(days_before)..=i64::from(days_after))
        .filter_map(|offset| shift_days(center_date, offset))
        .map(|date| DayCell::classify(date, calendar, today))
        .collect();

    trace!(
        center = %center_date,
        days_before,
        days_after,
        len = cells.len(),
        "built day window"
    );
    DayWindow { cells }
}

/// Same as [`build_window`] but parses the center date, rejecting malformed input.
pub fn build_window_from_str<C: HolidayCalendar + ?Sized>(
    center_date: &str,
    days_before: u32,
    days_after: u32,
    calendar: &C,
    today: NaiveDate,
) -> TimelineResult<DayWindow> {
    let center = parse_calendar_date(center_date)?;
    Ok(build_window(center, days_before, days_after, calendar, today))
}
