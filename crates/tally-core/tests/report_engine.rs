//! End-to-end runs of the report pipeline against a day's history.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use pretty_assertions::assert_eq;
use tally_core::{
    Activity, Project, Projects, ReportDraft, ReportEntries, ReportEntry, ReportError,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 5, 17).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn catalog() -> Projects {
    Projects::new(vec![
        Project {
            id: "11".into(),
            name: "Egg Inc.".into(),
        },
        Project {
            id: "12".into(),
            name: "Eggplant".into(),
        },
        Project {
            id: "13".into(),
            name: "Internal".into(),
        },
    ])
}

fn submit(
    draft: ReportDraft,
    activity: &str,
    status: i32,
    history: &ReportEntries,
) -> Result<ReportEntry, ReportError> {
    draft
        .set_activity(activity)?
        .set_status(status)?
        .resolve_project(&catalog())?
        .align(history)
}

/// Pretend the portal accepted `entry` and assigned it an id.
fn accept(history: &mut Vec<ReportEntry>, mut entry: ReportEntry) {
    entry.id = (history.len() + 1).to_string();
    entry.publish_date = Some(entry.report_date);
    history.push(entry);
}

#[test]
fn a_day_of_spans_stacks_back_to_back() {
    let mut history = Vec::new();

    for (project, hours) in [("egg inc", 2), ("internal", 2), ("plant", 3)] {
        let draft = ReportDraft::new(day(), project, "work")
            .with_span(Some(TimeDelta::hours(hours)));
        let entry = submit(draft, "dev", 100, &ReportEntries::new(history.clone())).unwrap();
        accept(&mut history, entry);
    }

    let ranges: Vec<(NaiveTime, NaiveTime)> =
        history.iter().map(|e| (e.start_time, e.end_time)).collect();
    assert_eq!(
        ranges,
        vec![(t(9, 0), t(11, 0)), (t(11, 0), t(13, 0)), (t(13, 0), t(16, 0))]
    );

    let entries = ReportEntries::new(history);
    assert_eq!(entries.total_duration(), TimeDelta::hours(7));
    assert_eq!(entries.project_hours().to_string(), "Eggplant (3h), Egg Inc. (2h), Internal (2h)");
}

#[test]
fn explicit_range_fills_a_gap_before_the_first_entry() {
    let mut history = Vec::new();
    let late = ReportDraft::new(day(), "internal", "standup")
        .with_range(Some(t(10, 0)), Some(t(10, 30)));
    accept(&mut history, submit(late, "man", 100, &ReportEntries::default()).unwrap());

    let early = ReportDraft::new(day(), "internal", "mail")
        .with_range(Some(t(9, 0)), Some(t(10, 0)));
    let entry = submit(early, "man", 100, &ReportEntries::new(history.clone())).unwrap();
    assert_eq!(entry.activity, Activity::Management);
    assert_eq!(entry.span, TimeDelta::hours(1));

    let clash = ReportDraft::new(day(), "internal", "review")
        .with_range(Some(t(9, 50)), Some(t(10, 10)));
    assert_eq!(
        submit(clash, "man", 100, &ReportEntries::new(history)),
        Err(ReportError::Overlaps {
            ids: vec!["1".into()]
        })
    );
}

#[test]
fn first_failing_step_wins() {
    let draft = || ReportDraft::new(day(), "egg", "x").with_span(Some(TimeDelta::hours(1)));
    let empty = ReportEntries::default();

    assert_eq!(
        submit(draft(), "coding", 100, &empty),
        Err(ReportError::BadActivity("coding".into()))
    );
    assert_eq!(submit(draft(), "dev", 95, &empty), Err(ReportError::StatusNotRound));
    assert!(matches!(
        submit(draft(), "dev", 100, &empty),
        Err(ReportError::TooPermissive { .. })
    ));
}

#[test]
fn aligned_entry_serializes_span_as_minutes() {
    let draft = ReportDraft::new(day(), "internal", "docs").with_span(Some(TimeDelta::minutes(90)));
    let entry = submit(draft, "an", 50, &ReportEntries::default()).unwrap();

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["span"], 90);
    assert_eq!(json["activity"], "analysis");
    assert_eq!(json["end_time"], "10:30:00");

    let back: ReportEntry = serde_json::from_value(json).unwrap();
    assert_eq!(back, entry);
}
