pub mod calendar;
pub mod day_window;
pub mod interval;
pub mod primitives;
pub mod scale;
pub mod types;
pub mod windowing;

pub use calendar::{HolidayCalendar, StaticCalendar, WeekdayCalendar};
pub use day_window::{DayCell, DayWindow, build_window, build_window_from_str};
pub use interval::{Interval, LabelPath, OwnerKind, RawLoading, normalize, normalize_all};
pub use primitives::{format_calendar_date, parse_calendar_date};
pub use scale::DayScale;
pub use types::DateRange;
pub use windowing::{WindowSpan, clip_to_window, intervals_in_window};
