//! Holiday calendar collaborator.
//!
//! The engine never fetches calendar data itself. Hosts implement
//! [`HolidayCalendar`] over whatever production calendar they load, or use
//! [`StaticCalendar`] with explicit date sets.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Lookup of non-standard day kinds.
///
/// Every method defaults to `false`, which classifies days by day-of-week only.
pub trait HolidayCalendar {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }

    /// A weekend day moved to be a working day.
    fn is_transferred_workday(&self, _date: NaiveDate) -> bool {
        false
    }

    /// A weekday moved to be a day off.
    fn is_transferred_day_off(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Calendar without holiday data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdayCalendar;

impl HolidayCalendar for WeekdayCalendar {}

/// Calendar backed by explicit date sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticCalendar {
    #[serde(default)]
    pub holidays: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub transferred_workdays: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub transferred_days_off: BTreeSet<NaiveDate>,
}

impl StaticCalendar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    #[must_use]
    pub fn with_transferred_workday(mut self, date: NaiveDate) -> Self {
        self.transferred_workdays.insert(date);
        self
    }

    #[must_use]
    pub fn with_transferred_day_off(mut self, date: NaiveDate) -> Self {
        self.transferred_days_off.insert(date);
        self
    }
}

impl HolidayCalendar for StaticCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    fn is_transferred_workday(&self, date: NaiveDate) -> bool {
        self.transferred_workdays.contains(&date)
    }

    fn is_transferred_day_off(&self, date: NaiveDate) -> bool {
        self.transferred_days_off.contains(&date)
    }
}

#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
