use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{DayScale, DayWindow, Interval, WindowSpan, clip_to_window};
use crate::error::{TimelineError, TimelineResult};
use crate::layout::color::{Color, color_for_key};
use crate::layout::lanes::{assign_lanes, layout_order};

/// Vertical geometry of bars inside a row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometryConfig {
    pub bar_height_px: f64,
    pub lane_gap_px: f64,
    /// Space above the first lane and below the last one.
    pub row_padding_px: f64,
}

impl Default for BarGeometryConfig {
    fn default() -> Self {
        Self {
            bar_height_px: 20.0,
            lane_gap_px: 4.0,
            row_padding_px: 0.0,
        }
    }
}

impl BarGeometryConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.bar_height_px.is_finite() || self.bar_height_px <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "bar height must be finite and > 0".to_owned(),
            ));
        }
        for (value, name) in [
            (self.lane_gap_px, "lane_gap_px"),
            (self.row_padding_px, "row_padding_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidConfig(format!(
                    "bar geometry `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn lane_step(self) -> f64 {
        self.bar_height_px + self.lane_gap_px
    }

    #[must_use]
    pub fn lane_top(self, lane_index: usize) -> f64 {
        self.row_padding_px + lane_index as f64 * self.lane_step()
    }

    /// Row height for `lane_count` lanes; empty rows keep one lane of height.
    #[must_use]
    pub fn row_height(self, lane_count: usize) -> f64 {
        2.0 * self.row_padding_px + lane_count.max(1) as f64 * self.lane_step() - self.lane_gap_px
    }
}

/// Render-ready bar for one interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRender {
    pub interval_id: String,
    pub owner_id: String,
    pub start_index: usize,
    pub end_index: usize,
    pub lane_index: usize,
    pub left: f64,
    pub width: f64,
    pub top: f64,
    pub height: f64,
    pub is_clipped_left: bool,
    pub is_clipped_right: bool,
    pub resizable: bool,
    pub color: Color,
}

impl BarRender {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Bars of one timeline row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    pub bars: Vec<BarRender>,
    pub lane_count: usize,
    pub height: f64,
}

/// Lays out intervals of one row with default bar geometry.
#[must_use]
pub fn layout<'a, I>(intervals: I, window: &DayWindow, scale: DayScale) -> Vec<BarRender>
where
    I: IntoIterator<Item = &'a Interval>,
{
    layout_row(intervals, window, scale, BarGeometryConfig::default()).bars
}

/// Lays out intervals of one row.
///
/// Intervals entirely outside the window produce no bar and take no lane.
/// Bars are returned in layout order `(start_date, end_date, id)`.
#[must_use]
pub fn layout_row<'a, I>(
    intervals: I,
    window: &DayWindow,
    scale: DayScale,
    geometry: BarGeometryConfig,
) -> RowLayout
where
    I: IntoIterator<Item = &'a Interval>,
{
    let mut visible: Vec<(&Interval, WindowSpan)> = intervals
        .into_iter()
        .filter_map(|interval| {
            clip_to_window(window, interval.start_date, interval.end_date)
                .map(|span| (interval, span))
        })
        .collect();
    visible.sort_by(|a, b| layout_order(a.0, b.0));

    let refs: Vec<&Interval> = visible.iter().map(|(interval, _)| *interval).collect();
    let assignment = assign_lanes(&refs);

    let bars: Vec<BarRender> = visible
        .iter()
        .zip(assignment.lanes.iter())
        .map(|((interval, span), &lane_index)| BarRender {
            interval_id: interval.id.clone(),
            owner_id: interval.owner_id.clone(),
            start_index: span.start_index,
            end_index: span.end_index,
            lane_index,
            left: scale.index_to_pixel(span.start_index),
            width: scale.span_width(span.end_index - span.start_index + 1),
            top: geometry.lane_top(lane_index),
            height: geometry.bar_height_px,
            is_clipped_left: span.clipped_left,
            is_clipped_right: span.clipped_right,
            resizable: interval.is_resizable(),
            color: bar_color(interval),
        })
        .collect();

    trace!(
        bars = bars.len(),
        lanes = assignment.lane_count,
        "laid out timeline row"
    );
    RowLayout {
        height: geometry.row_height(assignment.lane_count),
        lane_count: assignment.lane_count,
        bars,
    }
}

/// Owner color, falling back to the interval id for ownerless records.
#[must_use]
pub fn bar_color(interval: &Interval) -> Color {
    if interval.owner_id.is_empty() {
        color_for_key(&interval.id)
    } else {
        color_for_key(&interval.owner_id)
    }
}
