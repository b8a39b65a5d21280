use chrono::NaiveDate;
use proptest::prelude::*;
use timeline_rs::core::{
    DayScale, DayWindow, Interval, WeekdayCalendar, build_window, parse_calendar_date,
};
use timeline_rs::interaction::{
    ResizeBehavior, ResizeEdge, ResizeEffect, ResizeEffects, ResizeFrame, ResizeGesture,
    ResizeTarget,
};

const CELL_WIDTH: f64 = 20.0;
const ORIGIN_X: f64 = 300.0;

fn origin() -> NaiveDate {
    parse_calendar_date("2026-02-01").expect("valid date")
}

fn window() -> DayWindow {
    build_window(origin(), 10, 20, &WeekdayCalendar, origin())
}

fn gesture(min_days: u32) -> ResizeGesture {
    let scale = DayScale::new(CELL_WIDTH).expect("scale");
    let frame = ResizeFrame::from_window(&window(), scale).expect("frame");
    let behavior = ResizeBehavior {
        min_days,
        ..ResizeBehavior::default()
    };
    ResizeGesture::new(frame, behavior).expect("gesture")
}

fn edge(use_end_edge: bool) -> ResizeEdge {
    if use_end_edge {
        ResizeEdge::End
    } else {
        ResizeEdge::Start
    }
}

/// Drags with the given moves, releases slowly at the last position and
/// returns the release effects with every commit seen by the sink.
fn drag_and_release(
    gesture: &mut ResizeGesture,
    interval: &Interval,
    edge: ResizeEdge,
    moves: &[f64],
) -> (ResizeEffects, Vec<(NaiveDate, NaiveDate)>) {
    gesture.pointer_down(ResizeTarget::from_interval(interval), edge, ORIGIN_X, 0);
    for (step, delta) in moves.iter().enumerate() {
        gesture.pointer_move(ORIGIN_X + delta, 10 * (step as u64 + 1));
    }
    let release_x = ORIGIN_X + moves.last().copied().unwrap_or(0.0);
    let mut commits = Vec::new();
    let effects = gesture.pointer_up(
        release_x,
        10_000,
        &mut |_: &str, start: NaiveDate, end: NaiveDate| commits.push((start, end)),
    );
    (effects, commits)
}

proptest! {
    #[test]
    fn previews_never_invert_or_undercut_min_days(
        start in -15i64..30,
        len in 0i64..10,
        min_days in 1u32..5,
        use_end_edge in any::<bool>(),
        moves in prop::collection::vec(-600.0f64..600.0, 1..12)
    ) {
        let window = window();
        let mut gesture = gesture(min_days);
        let start_date = origin() + chrono::Duration::days(start);
        let end_date = start_date + chrono::Duration::days(len.max(i64::from(min_days) - 1));
        let interval = Interval::new("l", "emp", start_date, end_date, 1.0).expect("interval");
        let edge = edge(use_end_edge);
        gesture.pointer_down(ResizeTarget::from_interval(&interval), edge, ORIGIN_X, 0);

        let first = window.first_date().expect("non-empty");
        let last = window.last_date().expect("non-empty");
        for (step, delta) in moves.iter().enumerate() {
            gesture.pointer_move(ORIGIN_X + delta, 10 * (step as u64 + 1));
            let preview = gesture.preview().expect("dragging");
            let span = (preview.end_date - preview.start_date).num_days() + 1;
            prop_assert!(preview.start_date <= preview.end_date);
            prop_assert!(span >= i64::from(min_days));
            match edge {
                ResizeEdge::Start => {
                    prop_assert_eq!(preview.end_date, end_date);
                    prop_assert!(preview.start_date >= first.min(start_date));
                }
                ResizeEdge::End => {
                    prop_assert_eq!(preview.start_date, start_date);
                    prop_assert!(preview.end_date <= last.max(end_date));
                }
            }
            prop_assert!(preview.left.is_finite() && preview.width >= 0.0);
        }
    }

    #[test]
    fn commits_stay_in_window_and_respect_min_days(
        start in -15i64..30,
        len in 0i64..10,
        min_days in 1u32..6,
        use_end_edge in any::<bool>(),
        moves in prop::collection::vec(-600.0f64..600.0, 1..12)
    ) {
        let window = window();
        let first = window.first_date().expect("non-empty");
        let last = window.last_date().expect("non-empty");
        let start_date = origin() + chrono::Duration::days(start);
        let end_date = start_date + chrono::Duration::days(len);
        let interval = Interval::new("l", "emp", start_date, end_date, 1.0).expect("interval");

        let mut gesture = gesture(min_days);
        let (effects, commits) =
            drag_and_release(&mut gesture, &interval, edge(use_end_edge), &moves);

        prop_assert_eq!(effects.len(), 1);
        let committed = matches!(effects[0], ResizeEffect::Commit(_));
        prop_assert_eq!(commits.len(), usize::from(committed));
        for (committed_start, committed_end) in &commits {
            let span = (*committed_end - *committed_start).num_days() + 1;
            prop_assert!(committed_start <= committed_end);
            prop_assert!(span >= i64::from(min_days));
            prop_assert!(*committed_start >= first.min(start_date));
            prop_assert!(*committed_end <= last.max(end_date));
        }
    }

    #[test]
    fn release_without_whole_day_movement_never_commits(
        start in -15i64..30,
        len in 0i64..10,
        min_days in 1u32..6,
        use_end_edge in any::<bool>(),
        wander in prop::collection::vec(-600.0f64..600.0, 0..8),
        release_offset in -9.9f64..9.9
    ) {
        let start_date = origin() + chrono::Duration::days(start);
        let end_date = start_date + chrono::Duration::days(len);
        let interval = Interval::new("l", "emp", start_date, end_date, 1.0).expect("interval");

        let mut moves = wander;
        moves.push(release_offset);
        let mut gesture = gesture(min_days);
        let (effects, commits) =
            drag_and_release(&mut gesture, &interval, edge(use_end_edge), &moves);

        prop_assert!(commits.is_empty());
        prop_assert!(matches!(
            effects.as_slice(),
            [ResizeEffect::Click { .. } | ResizeEffect::Cancelled { .. }]
        ), "expected a single Click or Cancelled effect, got {:?}", effects);
    }
}
