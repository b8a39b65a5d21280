//! Edge-drag resize of a timeline bar.
//!
//! `Idle -> Dragging(edge) -> (preview)* -> Committed | Cancelled | Click -> Idle`
//!
//! [`transition`] is a pure function of `(state, event)`; [`ResizeGesture`]
//! wraps it for hosts that forward pointer events and want the commit
//! callback invoked for them. One gesture instance owns exactly one drag.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use crate::core::primitives::{days_between, shift_days};
use crate::core::{DayScale, DayWindow, Interval};
use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeEdge {
    Start,
    End,
}

/// Tuning for resize clamping and click detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeBehavior {
    /// Shortest allowed duration in days, both ends inclusive.
    pub min_days: u32,
    /// A release never farther than this from the origin may be a click.
    pub click_max_distance_px: f64,
    /// A release sooner than this after pointer-down may be a click.
    pub click_max_duration_ms: u64,
}

impl Default for ResizeBehavior {
    fn default() -> Self {
        Self {
            min_days: 1,
            click_max_distance_px: 4.0,
            click_max_duration_ms: 250,
        }
    }
}

impl ResizeBehavior {
    pub fn validate(self) -> TimelineResult<Self> {
        if self.min_days == 0 {
            return Err(TimelineError::InvalidConfig(
                "resize min_days must be >= 1".to_owned(),
            ));
        }
        if !self.click_max_distance_px.is_finite() || self.click_max_distance_px < 0.0 {
            return Err(TimelineError::InvalidConfig(
                "resize click distance must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Window bounds and cell width a drag is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeFrame {
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub scale: DayScale,
}

impl ResizeFrame {
    pub fn from_window(window: &DayWindow, scale: DayScale) -> TimelineResult<Self> {
        let (Some(first_date), Some(last_date)) = (window.first_date(), window.last_date()) else {
            return Err(TimelineError::InvalidData(
                "resize requires a non-empty day window".to_owned(),
            ));
        };
        Ok(Self {
            first_date,
            last_date,
            scale,
        })
    }

    fn last_offset(self) -> i64 {
        days_between(self.first_date, self.last_date)
    }

    fn geometry(self, start: NaiveDate, end: NaiveDate) -> (f64, f64) {
        let start_index = days_between(self.first_date, start).max(0);
        let end_index = days_between(self.first_date, end).min(self.last_offset());
        let cells = (end_index - start_index + 1).max(0);
        let cell_width = self.scale.cell_width();
        (start_index as f64 * cell_width, cells as f64 * cell_width)
    }
}

/// The interval a drag operates on, captured at pointer-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeTarget {
    pub interval_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub resizable: bool,
}

impl ResizeTarget {
    #[must_use]
    pub fn from_interval(interval: &Interval) -> Self {
        Self {
            interval_id: interval.id.clone(),
            start_date: interval.start_date,
            end_date: interval.end_date,
            resizable: interval.is_resizable(),
        }
    }

    /// Aggregate rows and anonymous loadings pass `false` here.
    #[must_use]
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizePreview {
    pub interval_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub left: f64,
    pub width: f64,
}

/// Date-range change handed to the mutation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeCommit {
    pub interval_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResizeEvent {
    PointerDown {
        target: ResizeTarget,
        edge: ResizeEdge,
        x: f64,
        timestamp_ms: u64,
    },
    PointerMove {
        x: f64,
        timestamp_ms: u64,
    },
    PointerUp {
        x: f64,
        timestamp_ms: u64,
    },
    /// Pointer left the interactive surface without a release.
    PointerLeave,
    /// External reset, e.g. a data refresh during the drag.
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResizeEffect {
    Preview(ResizePreview),
    Commit(ResizeCommit),
    /// Release too short and too close to count as a drag.
    Click { interval_id: String },
    /// Drag discarded; `restore` is the original geometry.
    Cancelled { restore: ResizePreview },
}

pub type ResizeEffects = SmallVec<[ResizeEffect; 2]>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    target: ResizeTarget,
    edge: ResizeEdge,
    origin_x: f64,
    started_at_ms: u64,
    max_distance_px: f64,
    /// Set once any preview differed from the original dates.
    moved_days: bool,
    preview: ResizePreview,
}

impl DragSession {
    #[must_use]
    pub fn target(&self) -> &ResizeTarget {
        &self.target
    }

    #[must_use]
    pub fn edge(&self) -> ResizeEdge {
        self.edge
    }

    #[must_use]
    pub fn preview(&self) -> &ResizePreview {
        &self.preview
    }

    /// Whether the drag ever left the original dates, even if it came back.
    #[must_use]
    pub fn moved_days(&self) -> bool {
        self.moved_days
    }

    fn dates_changed(&self) -> bool {
        self.preview.start_date != self.target.start_date
            || self.preview.end_date != self.target.end_date
    }

    fn preview_meets_min_days(&self, behavior: &ResizeBehavior) -> bool {
        days_between(self.preview.start_date, self.preview.end_date) + 1
            >= i64::from(behavior.min_days.max(1))
    }

    fn original_geometry(&self, frame: &ResizeFrame) -> ResizePreview {
        build_preview(
            &self.target.interval_id,
            self.target.start_date,
            self.target.end_date,
            frame,
        )
    }

    fn track(&mut self, x: f64, frame: &ResizeFrame, behavior: &ResizeBehavior) {
        let delta_px = if x.is_finite() { x - self.origin_x } else { 0.0 };
        self.max_distance_px = self.max_distance_px.max(delta_px.abs());
        let delta_days = frame.scale.delta_days(delta_px);
        let (start, end) = clamp_resize(&self.target, self.edge, delta_days, frame, behavior);
        self.preview = build_preview(&self.target.interval_id, start, end, frame);
        self.moved_days |= self.dates_changed();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ResizeState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Serializable summary of the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeMode {
    Idle,
    Dragging(ResizeEdge),
}

impl ResizeState {
    #[must_use]
    pub fn mode(&self) -> ResizeMode {
        match self {
            Self::Idle => ResizeMode::Idle,
            Self::Dragging(session) => ResizeMode::Dragging(session.edge),
        }
    }
}

/// Applies one pointer event.
#[must_use]
pub fn transition(
    state: ResizeState,
    event: ResizeEvent,
    frame: &ResizeFrame,
    behavior: &ResizeBehavior,
) -> (ResizeState, ResizeEffects) {
    match (state, event) {
        (
            ResizeState::Idle,
            ResizeEvent::PointerDown {
                target,
                edge,
                x,
                timestamp_ms,
            },
        ) => {
            if !target.resizable || !x.is_finite() {
                trace!(interval_id = %target.interval_id, "resize rejected at pointer-down");
                return (ResizeState::Idle, SmallVec::new());
            }
            let preview =
                build_preview(&target.interval_id, target.start_date, target.end_date, frame);
            trace!(interval_id = %target.interval_id, ?edge, "resize drag started");
            let session = DragSession {
                target,
                edge,
                origin_x: x,
                started_at_ms: timestamp_ms,
                max_distance_px: 0.0,
                moved_days: false,
                preview,
            };
            (ResizeState::Dragging(session), SmallVec::new())
        }
        (ResizeState::Dragging(mut session), ResizeEvent::PointerMove { x, .. }) => {
            session.track(x, frame, behavior);
            let effects: ResizeEffects = smallvec![ResizeEffect::Preview(session.preview.clone())];
            (ResizeState::Dragging(session), effects)
        }
        (ResizeState::Dragging(mut session), ResizeEvent::PointerUp { x, timestamp_ms }) => {
            session.track(x, frame, behavior);
            let elapsed_ms = timestamp_ms.saturating_sub(session.started_at_ms);
            let quick_tap = elapsed_ms <= behavior.click_max_duration_ms
                && session.max_distance_px <= behavior.click_max_distance_px;
            let effect = if quick_tap {
                ResizeEffect::Click {
                    interval_id: session.target.interval_id,
                }
            } else if session.dates_changed() && session.preview_meets_min_days(behavior) {
                debug!(
                    interval_id = %session.target.interval_id,
                    start = %session.preview.start_date,
                    end = %session.preview.end_date,
                    "resize committed"
                );
                ResizeEffect::Commit(ResizeCommit {
                    interval_id: session.target.interval_id,
                    start_date: session.preview.start_date,
                    end_date: session.preview.end_date,
                })
            } else if session.moved_days {
                debug!(interval_id = %session.target.interval_id, "resize abandoned");
                ResizeEffect::Cancelled {
                    restore: session.original_geometry(frame),
                }
            } else {
                ResizeEffect::Click {
                    interval_id: session.target.interval_id,
                }
            };
            let effects: ResizeEffects = smallvec![effect];
            (ResizeState::Idle, effects)
        }
        (ResizeState::Dragging(session), ResizeEvent::PointerLeave | ResizeEvent::Reset) => {
            debug!(interval_id = %session.target.interval_id, "resize cancelled");
            let effects: ResizeEffects = smallvec![ResizeEffect::Cancelled {
                restore: session.original_geometry(frame),
            }];
            (ResizeState::Idle, effects)
        }
        (state @ ResizeState::Dragging(_), ResizeEvent::PointerDown { .. }) => {
            trace!("ignoring pointer-down during an active resize");
            (state, SmallVec::new())
        }
        (
            ResizeState::Idle,
            ResizeEvent::PointerMove { .. }
            | ResizeEvent::PointerUp { .. }
            | ResizeEvent::PointerLeave
            | ResizeEvent::Reset,
        ) => (ResizeState::Idle, SmallVec::new()),
    }
}

/// Candidate dates for a drag of `delta_days` on `edge`.
///
/// The moved edge stops at the window bounds (or at the original date when it
/// already lies outside) and never shrinks the range below `min_days`. An
/// interval already shorter than `min_days` cannot shrink at all; a zero
/// delta always returns the original dates.
#[must_use]
pub fn clamp_resize(
    target: &ResizeTarget,
    edge: ResizeEdge,
    delta_days: i64,
    frame: &ResizeFrame,
    behavior: &ResizeBehavior,
) -> (NaiveDate, NaiveDate) {
    let start_offset = days_between(frame.first_date, target.start_date);
    let end_offset = days_between(frame.first_date, target.end_date);
    let min_span = i64::from(behavior.min_days.max(1)) - 1;

    match edge {
        ResizeEdge::Start => {
            let lowest = start_offset.min(0);
            let highest = (end_offset - min_span).max(start_offset);
            let offset = start_offset
                .saturating_add(delta_days)
                .max(lowest)
                .min(highest);
            let start = shift_days(frame.first_date, offset).unwrap_or(target.start_date);
            (start, target.end_date)
        }
        ResizeEdge::End => {
            let highest = end_offset.max(frame.last_offset());
            let lowest = (start_offset + min_span).min(end_offset);
            let offset = end_offset
                .saturating_add(delta_days)
                .min(highest)
                .max(lowest);
            let end = shift_days(frame.first_date, offset).unwrap_or(target.end_date);
            (target.start_date, end)
        }
    }
}

fn build_preview(
    interval_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    frame: &ResizeFrame,
) -> ResizePreview {
    let (left, width) = frame.geometry(start, end);
    ResizePreview {
        interval_id: interval_id.to_owned(),
        start_date: start,
        end_date: end,
        left,
        width,
    }
}

/// Receiver of committed resizes, usually the host's mutation layer.
pub trait ResizeCommitSink {
    fn on_resize(&mut self, interval_id: &str, start_date: NaiveDate, end_date: NaiveDate);
}

impl<F> ResizeCommitSink for F
where
    F: FnMut(&str, NaiveDate, NaiveDate),
{
    fn on_resize(&mut self, interval_id: &str, start_date: NaiveDate, end_date: NaiveDate) {
        self(interval_id, start_date, end_date);
    }
}

/// One drag session's worth of resize state.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    state: ResizeState,
    frame: ResizeFrame,
    behavior: ResizeBehavior,
}

impl ResizeGesture {
    pub fn new(frame: ResizeFrame, behavior: ResizeBehavior) -> TimelineResult<Self> {
        Ok(Self {
            state: ResizeState::Idle,
            frame,
            behavior: behavior.validate()?,
        })
    }

    #[must_use]
    pub fn mode(&self) -> ResizeMode {
        self.state.mode()
    }

    #[must_use]
    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    #[must_use]
    pub fn preview(&self) -> Option<&ResizePreview> {
        match &self.state {
            ResizeState::Idle => None,
            ResizeState::Dragging(session) => Some(session.preview()),
        }
    }

    pub fn apply(&mut self, event: ResizeEvent) -> ResizeEffects {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = transition(state, event, &self.frame, &self.behavior);
        self.state = next;
        effects
    }

    /// Applies an event and forwards any commit to `sink`.
    pub fn dispatch<S>(&mut self, event: ResizeEvent, sink: &mut S) -> ResizeEffects
    where
        S: ResizeCommitSink + ?Sized,
    {
        let effects = self.apply(event);
        for effect in &effects {
            if let ResizeEffect::Commit(commit) = effect {
                sink.on_resize(&commit.interval_id, commit.start_date, commit.end_date);
            }
        }
        effects
    }

    pub fn pointer_down(
        &mut self,
        target: ResizeTarget,
        edge: ResizeEdge,
        x: f64,
        timestamp_ms: u64,
    ) -> ResizeEffects {
        self.apply(ResizeEvent::PointerDown {
            target,
            edge,
            x,
            timestamp_ms,
        })
    }

    pub fn pointer_move(&mut self, x: f64, timestamp_ms: u64) -> ResizeEffects {
        self.apply(ResizeEvent::PointerMove { x, timestamp_ms })
    }

    pub fn pointer_up<S>(&mut self, x: f64, timestamp_ms: u64, sink: &mut S) -> ResizeEffects
    where
        S: ResizeCommitSink + ?Sized,
    {
        self.dispatch(ResizeEvent::PointerUp { x, timestamp_ms }, sink)
    }

    pub fn pointer_leave(&mut self) -> ResizeEffects {
        self.apply(ResizeEvent::PointerLeave)
    }

    pub fn reset(&mut self) -> ResizeEffects {
        self.apply(ResizeEvent::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_calendar_date;

    fn date(value: &str) -> NaiveDate {
        parse_calendar_date(value).expect("date")
    }

    fn frame() -> ResizeFrame {
        ResizeFrame {
            first_date: date("2026-01-30"),
            last_date: date("2026-02-10"),
            scale: DayScale::new(20.0).expect("scale"),
        }
    }

    fn target(start: &str, end: &str) -> ResizeTarget {
        ResizeTarget {
            interval_id: "l-1".to_owned(),
            start_date: date(start),
            end_date: date(end),
            resizable: true,
        }
    }

    #[test]
    fn start_edge_respects_min_days() {
        let behavior = ResizeBehavior {
            min_days: 2,
            ..ResizeBehavior::default()
        };
        let (start, end) = clamp_resize(
            &target("2026-02-01", "2026-02-03"),
            ResizeEdge::Start,
            5,
            &frame(),
            &behavior,
        );
        assert_eq!(start, date("2026-02-02"));
        assert_eq!(end, date("2026-02-03"));
    }

    #[test]
    fn end_edge_stops_at_window_end() {
        let (start, end) = clamp_resize(
            &target("2026-02-01", "2026-02-03"),
            ResizeEdge::End,
            40,
            &frame(),
            &ResizeBehavior::default(),
        );
        assert_eq!(start, date("2026-02-01"));
        assert_eq!(end, date("2026-02-10"));
    }

    #[test]
    fn start_outside_window_is_kept_without_movement() {
        let (start, _) = clamp_resize(
            &target("2026-01-20", "2026-02-03"),
            ResizeEdge::Start,
            0,
            &frame(),
            &ResizeBehavior::default(),
        );
        assert_eq!(start, date("2026-01-20"));
    }

    #[test]
    fn preview_geometry_is_clipped_to_window() {
        let (left, width) = frame().geometry(date("2026-01-20"), date("2026-01-31"));
        assert_eq!(left, 0.0);
        assert_eq!(width, 40.0);
    }

    #[test]
    fn short_interval_at_window_edge_is_not_pushed_outside() {
        let behavior = ResizeBehavior {
            min_days: 3,
            ..ResizeBehavior::default()
        };
        let short = target("2026-01-30", "2026-01-30");
        let (start, end) = clamp_resize(&short, ResizeEdge::Start, 0, &frame(), &behavior);
        assert_eq!((start, end), (short.start_date, short.end_date));

        let (start, _) = clamp_resize(&short, ResizeEdge::Start, 4, &frame(), &behavior);
        assert_eq!(start, short.start_date);

        let at_end = target("2026-02-10", "2026-02-10");
        let (_, end) = clamp_resize(&at_end, ResizeEdge::End, -3, &frame(), &behavior);
        assert_eq!(end, at_end.end_date);
    }

    #[test]
    fn idle_ignores_moves_and_releases() {
        let (state, effects) = transition(
            ResizeState::Idle,
            ResizeEvent::PointerUp {
                x: 10.0,
                timestamp_ms: 5,
            },
            &frame(),
            &ResizeBehavior::default(),
        );
        assert_eq!(state, ResizeState::Idle);
        assert!(effects.is_empty());
    }
}
