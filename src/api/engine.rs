use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::capacity::{
    AggregationResult, CapacityNode, DailyLoad, Hierarchy, LoadSeverity, compute_daily,
};
use crate::core::{
    DayScale, DayWindow, HolidayCalendar, Interval, build_window, parse_calendar_date,
};
use crate::error::TimelineResult;
use crate::interaction::{ResizeFrame, ResizeGesture};
use crate::layout::{BarHit, RowLayout, hit_test, layout_row};

use super::TimelineConfig;
use super::projection::{TimelineProjection, project_hierarchy};

/// Main facade consumed by host applications.
///
/// Holds a validated config and the day window built from it. The engine is
/// immutable: every call is a pure function of the engine and its arguments,
/// and re-centering produces a new engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEngine {
    config: TimelineConfig,
    scale: DayScale,
    window: DayWindow,
}

impl TimelineEngine {
    pub fn new<C: HolidayCalendar + ?Sized>(
        config: TimelineConfig,
        center_date: NaiveDate,
        calendar: &C,
        today: NaiveDate,
    ) -> TimelineResult<Self> {
        let config = config.validate()?;
        let scale = DayScale::new(config.day_cell_width_px)?;
        let window = build_window(
            center_date,
            config.days_before,
            config.days_after,
            calendar,
            today,
        );
        debug!(
            center = %center_date,
            days = window.len(),
            cell_width = config.day_cell_width_px,
            "timeline engine ready"
        );
        Ok(Self {
            config,
            scale,
            window,
        })
    }

    /// Like [`TimelineEngine::new`], parsing a `YYYY-MM-DD` center date.
    pub fn from_center_str<C: HolidayCalendar + ?Sized>(
        config: TimelineConfig,
        center_date: &str,
        calendar: &C,
        today: NaiveDate,
    ) -> TimelineResult<Self> {
        let center = parse_calendar_date(center_date)?;
        Self::new(config, center, calendar, today)
    }

    /// Same config around a different center date.
    pub fn recentered<C: HolidayCalendar + ?Sized>(
        &self,
        center_date: NaiveDate,
        calendar: &C,
        today: NaiveDate,
    ) -> TimelineResult<Self> {
        Self::new(self.config, center_date, calendar, today)
    }

    #[must_use]
    pub fn config(&self) -> TimelineConfig {
        self.config
    }

    #[must_use]
    pub fn window(&self) -> &DayWindow {
        &self.window
    }

    #[must_use]
    pub fn scale(&self) -> DayScale {
        self.scale
    }

    /// Full grid width in pixels.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.scale.span_width(self.window.len())
    }

    #[must_use]
    pub fn layout_row<'a, I>(&self, intervals: I) -> RowLayout
    where
        I: IntoIterator<Item = &'a Interval>,
    {
        layout_row(intervals, &self.window, self.scale, self.config.bar_geometry)
    }

    #[must_use]
    pub fn daily_load<'a, I>(&self, intervals: I, capacity: &CapacityNode) -> DailyLoad
    where
        I: IntoIterator<Item = &'a Interval>,
    {
        compute_daily(
            &self.window,
            intervals,
            capacity.default_capacity,
            &capacity.overrides_by_date,
        )
    }

    #[must_use]
    pub fn daily_load_with_overrides<'a, I>(
        &self,
        intervals: I,
        default_capacity: f64,
        overrides_by_date: &BTreeMap<NaiveDate, f64>,
    ) -> DailyLoad
    where
        I: IntoIterator<Item = &'a Interval>,
    {
        compute_daily(&self.window, intervals, default_capacity, overrides_by_date)
    }

    /// Rows and daily loads for a whole hierarchy snapshot.
    #[must_use]
    pub fn project(&self, hierarchy: &Hierarchy) -> TimelineProjection {
        project_hierarchy(
            hierarchy,
            &self.window,
            self.scale,
            self.config.bar_geometry,
        )
    }

    #[must_use]
    pub fn hit_test<'a>(&self, row: &'a RowLayout, x: f64, y: f64) -> Option<BarHit<'a>> {
        hit_test(&row.bars, x, y, self.config.edge_handle_width_px)
    }

    /// Fresh gesture for one drag; each concurrent drag needs its own.
    pub fn begin_resize(&self) -> TimelineResult<ResizeGesture> {
        let frame = ResizeFrame::from_window(&self.window, self.scale)?;
        ResizeGesture::new(frame, self.config.resize_behavior)
    }

    #[must_use]
    pub fn severity(&self, result: &AggregationResult) -> LoadSeverity {
        result.severity(self.config.severity_thresholds)
    }
}
