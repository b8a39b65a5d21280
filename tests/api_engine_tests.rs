use chrono::NaiveDate;
use timeline_rs::api::{PROJECTION_JSON_SCHEMA_V1, TimelineProjectionJsonContractV1};
use timeline_rs::capacity::{
    CapacityNode, HierarchyBuilder, LoadSeverity, NodeLevel, SeverityThresholds,
};
use timeline_rs::core::{Interval, OwnerKind, WeekdayCalendar, parse_calendar_date};
use timeline_rs::interaction::{ResizeEdge, ResizeEffect, ResizeTarget};
use timeline_rs::layout::HitZone;
use timeline_rs::{TimelineConfig, TimelineEngine, TimelineError};

fn date(value: &str) -> NaiveDate {
    parse_calendar_date(value).expect("valid date")
}

fn config() -> TimelineConfig {
    TimelineConfig::new()
        .with_window(2, 8)
        .with_day_cell_width_px(20.0)
}

fn engine() -> TimelineEngine {
    TimelineEngine::new(config(), date("2026-02-01"), &WeekdayCalendar, date("2026-02-02"))
        .expect("engine")
}

fn interval(id: &str, owner: &str, start: &str, end: &str) -> Interval {
    Interval::new(id, owner, date(start), date(end), 1.0).expect("valid interval")
}

#[test]
fn engine_builds_window_from_config() {
    let engine = engine();
    assert_eq!(engine.window().len(), 11);
    assert_eq!(engine.window().first_date(), Some(date("2026-01-30")));
    assert_eq!(engine.content_width(), 220.0);
    let today = engine
        .window()
        .cells()
        .iter()
        .filter(|cell| cell.is_today)
        .count();
    assert_eq!(today, 1);
}

#[test]
fn invalid_config_is_rejected() {
    let bad = config().with_day_cell_width_px(0.0);
    let err = TimelineEngine::new(bad, date("2026-02-01"), &WeekdayCalendar, date("2026-02-01"))
        .expect_err("zero cell width");
    assert!(matches!(err, TimelineError::InvalidConfig(_)));

    let err = TimelineEngine::from_center_str(
        config(),
        "01.02.2026",
        &WeekdayCalendar,
        date("2026-02-01"),
    )
    .expect_err("malformed center");
    assert!(matches!(err, TimelineError::InvalidDate { .. }));
}

#[test]
fn config_json_roundtrip_and_partial_documents() {
    let config = config().with_severity_thresholds(SeverityThresholds {
        medium_from: 0.5,
        high_from: 0.8,
        overflow_above: 1.1,
    });
    let json = config.to_json_pretty().expect("serialize");
    assert_eq!(TimelineConfig::from_json_str(&json).expect("parse"), config);

    let partial = TimelineConfig::from_json_str(r#"{ "days_before": 7 }"#).expect("partial");
    assert_eq!(partial.days_before, 7);
    assert_eq!(partial.days_after, TimelineConfig::default().days_after);

    assert!(TimelineConfig::from_json_str("{ not json").is_err());
}

#[test]
fn recentering_keeps_config() {
    let moved = engine()
        .recentered(date("2026-03-01"), &WeekdayCalendar, date("2026-02-02"))
        .expect("recentered");
    assert_eq!(moved.config(), engine().config());
    assert_eq!(moved.window().first_date(), Some(date("2026-02-27")));
}

#[test]
fn hit_test_then_resize_commits_through_engine() {
    let engine = engine();
    let a = interval("A", "emp-1", "2026-02-01", "2026-02-03");
    let row = engine.layout_row([&a]);
    let bar = &row.bars[0];

    let hit = engine
        .hit_test(&row, bar.right() - 1.0, bar.top + 5.0)
        .expect("pointer on bar");
    assert_eq!(hit.zone, HitZone::Handle(ResizeEdge::End));
    let body = engine
        .hit_test(&row, bar.left + bar.width / 2.0, bar.top + 5.0)
        .expect("pointer on bar");
    assert_eq!(body.zone, HitZone::Body);
    assert!(engine.hit_test(&row, 5.0, 5.0).is_none());

    let HitZone::Handle(edge) = hit.zone else {
        panic!("expected a handle");
    };
    let mut gesture = engine.begin_resize().expect("gesture");
    let mut committed = Vec::new();
    gesture.pointer_down(ResizeTarget::from_interval(&a), edge, 99.0, 0);
    gesture.pointer_move(139.0, 300);
    let effects = gesture.pointer_up(139.0, 600, &mut |id: &str, start: NaiveDate, end: NaiveDate| {
        committed.push((id.to_owned(), start, end));
    });
    assert!(matches!(effects.as_slice(), [ResizeEffect::Commit(_)]));
    assert_eq!(
        committed,
        vec![("A".to_owned(), date("2026-02-01"), date("2026-02-05"))]
    );
}

#[test]
fn engine_load_and_severity() {
    let engine = engine();
    let intervals = [
        interval("a", "emp-1", "2026-02-02", "2026-02-02"),
        interval("b", "emp-2", "2026-02-02", "2026-02-03"),
        interval("c", "emp-3", "2026-02-01", "2026-02-02"),
    ];
    let capacity = CapacityNode::new("sec", 4.0).with_override(date("2026-02-02"), 2.0);
    let load = engine.daily_load(&intervals, &capacity);
    let day = load.get(date("2026-02-02")).expect("in window");
    assert_eq!(day.ratio, 1.5);
    assert_eq!(engine.severity(day), LoadSeverity::Overflow);
    assert_eq!(
        load,
        engine.daily_load_with_overrides(
            &intervals,
            capacity.default_capacity,
            &capacity.overrides_by_date
        )
    );
}

#[test]
fn projection_marks_aggregate_rows_read_only() {
    let mut builder = HierarchyBuilder::new();
    let project = builder.add_root("prj", "Bridge", NodeLevel::Project);
    let section = builder
        .add_child(project, "sec", "Design", NodeLevel::Section)
        .expect("section");
    let employee = builder
        .add_child(section, "emp-1", "Ann", NodeLevel::Employee)
        .expect("employee");
    let anonymous = builder
        .add_child(section, "anon", "Contractors", NodeLevel::AnonymousLoading)
        .expect("anonymous");
    builder
        .set_capacity(section, CapacityNode::new("sec", 2.0))
        .expect("capacity");
    builder
        .add_intervals(
            employee,
            [
                interval("e-1", "emp-1", "2026-02-01", "2026-02-03"),
                interval("e-2", "emp-1", "2026-02-02", "2026-02-04"),
            ],
        )
        .expect("employee intervals");
    builder
        .add_intervals(
            anonymous,
            [interval("x-1", "", "2026-02-02", "2026-02-02").with_owner_kind(OwnerKind::Anonymous)],
        )
        .expect("anonymous intervals");
    let hierarchy = builder.build();

    let projection = engine().project(&hierarchy);
    assert_eq!(projection.rows.len(), 4);
    assert_eq!(projection.loads.len(), 4);

    let section_row = projection.row(section).expect("section row");
    assert!(section_row.aggregate);
    assert_eq!(section_row.depth, 1);
    assert_eq!(section_row.layout.bars.len(), 3);
    assert!(section_row.layout.bars.iter().all(|bar| !bar.resizable));

    let employee_row = projection.row(employee).expect("employee row");
    assert!(!employee_row.aggregate);
    assert_eq!(employee_row.depth, 2);
    assert_eq!(employee_row.layout.lane_count, 2);
    assert!(employee_row.layout.bars.iter().all(|bar| bar.resizable));

    let anonymous_row = projection.row(anonymous).expect("anonymous row");
    assert!(anonymous_row.layout.bars.iter().all(|bar| !bar.resizable));

    let section_day = projection
        .load(section)
        .and_then(|load| load.get(date("2026-02-02")))
        .expect("section load");
    assert_eq!(section_day.active_rate_sum, 3.0);
    assert_eq!(section_day.ratio, 1.5);

    let total: f64 = projection.rows.iter().map(|row| row.layout.height).sum();
    assert_eq!(projection.total_height(), total);
}

#[test]
fn projection_json_contract_carries_schema_version() {
    let mut builder = HierarchyBuilder::new();
    let employee = builder.add_root("emp-1", "Ann", NodeLevel::Employee);
    builder
        .add_intervals(employee, [interval("e-1", "emp-1", "2026-02-01", "2026-02-01")])
        .expect("intervals");
    let projection = engine().project(&builder.build());

    let json = projection.to_json_contract_v1_pretty().expect("serialize");
    let parsed: TimelineProjectionJsonContractV1 = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed.schema_version, PROJECTION_JSON_SCHEMA_V1);
    assert_eq!(parsed.projection.rows.len(), 1);
    assert_eq!(parsed.projection.rows[0].key, "emp-1");
    assert_eq!(parsed.projection.rows[0].layout.bars[0].interval_id, "e-1");
    assert_eq!(
        parsed.projection.loads.keys().collect::<Vec<_>>(),
        projection.loads.keys().collect::<Vec<_>>()
    );
}

#[test]
fn tracing_can_only_be_installed_once() {
    let first = timeline_rs::telemetry::init_tracing_with_filter("timeline_rs=debug");
    let second = timeline_rs::telemetry::init_default_tracing();
    assert!(!(first && second));
    let _ = engine().project(&HierarchyBuilder::new().build());
}
