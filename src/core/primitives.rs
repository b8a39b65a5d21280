use chrono::{NaiveDate, TimeDelta};

use crate::error::{TimelineError, TimelineResult};

/// Wire format of calendar dates exchanged with the query layer.
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_calendar_date(input: &str) -> TimelineResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), CALENDAR_DATE_FORMAT).map_err(|_| {
        TimelineError::InvalidDate {
            input: input.to_owned(),
        }
    })
}

#[must_use]
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_DATE_FORMAT).to_string()
}

/// Signed number of days from `from` to `to`.
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Shifts a date by a signed day count, `None` when leaving chrono's range.
#[must_use]
pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    TimeDelta::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}
