use burndown_core::{run_pipeline, BurndownConfig, BurndownError, ReportWarning, SprintWindow};
use burndown_ledger::{parse_timestamp, ItemId, Snapshot, SnapshotLog};
use chrono::NaiveDate;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

fn snap(id: u64, sprint: &str, status: &str, points: Option<f64>, at: &str) -> Snapshot {
    Snapshot {
        item_id: ItemId::Number(id),
        sprint_name: sprint.to_string(),
        status: status.to_string(),
        estimate_points: points,
        title: format!("Item {id}"),
        observed_at: parse_timestamp(at).unwrap(),
    }
}

fn weekday_window() -> SprintWindow {
    SprintWindow::new("Sprint 1", date(6), date(10)).unwrap()
}

/// Two items, A (3 points) finishes on the third day, B (5 points) never does.
fn scenario_a_log() -> SnapshotLog {
    SnapshotLog::new(vec![
        snap(1, "Sprint 1", "Todo", Some(3.0), "2025-01-06T09:00:00Z"),
        snap(2, "Sprint 1", "In Progress", Some(5.0), "2025-01-06T09:00:00Z"),
        snap(1, "Sprint 1", "In Progress", Some(3.0), "2025-01-07T09:00:00Z"),
        snap(2, "Sprint 1", "In Progress", Some(5.0), "2025-01-07T09:00:00Z"),
        snap(1, "Sprint 1", "Done", Some(3.0), "2025-01-08T09:00:00Z"),
        snap(2, "Sprint 1", "In Progress", Some(5.0), "2025-01-08T09:00:00Z"),
        snap(2, "Sprint 1", "In Progress", Some(5.0), "2025-01-09T09:00:00Z"),
        snap(2, "Sprint 1", "In Progress", Some(5.0), "2025-01-10T09:00:00Z"),
    ])
}

#[test]
fn test_scenario_a_single_completion() {
    let report =
        run_pipeline(&BurndownConfig::new(), Some(&weekday_window()), &scenario_a_log()).unwrap();

    assert_eq!(report.summary.total_story_points, 8.0);
    assert_eq!(report.summary.total_item_count, 2);

    let completed: Vec<f64> = report.daily.iter().map(|d| d.completed_points).collect();
    let remaining: Vec<f64> = report.daily.iter().map(|d| d.remaining_points).collect();
    assert_eq!(completed, vec![0.0, 0.0, 3.0, 3.0, 3.0]);
    assert_eq!(remaining, vec![8.0, 8.0, 5.0, 5.0, 5.0]);

    assert_eq!(report.completion_log.len(), 1);
    assert_eq!(report.completion_log[0].item_id, ItemId::Number(1));
    assert_eq!(report.completion_log[0].date, date(8));
    assert!(report.warnings.is_empty());
}

#[test]
fn test_scenario_b_weekend_ideal() {
    let window = SprintWindow::new("Sprint 2", date(3), date(6)).unwrap();
    let log = SnapshotLog::new(vec![
        snap(1, "Sprint 2", "In Progress", Some(4.0), "2025-01-03T09:00:00Z"),
        snap(2, "Sprint 2", "Todo", Some(6.0), "2025-01-03T09:00:00Z"),
    ]);
    let report = run_pipeline(&BurndownConfig::new(), Some(&window), &log).unwrap();

    assert_eq!(report.summary.total_story_points, 10.0);
    let ideal: Vec<f64> = report.ideal.iter().map(|p| p.ideal_remaining_points).collect();
    assert_eq!(ideal, vec![10.0, 10.0, 10.0, 0.0]);

    let working: Vec<bool> = report.daily.iter().map(|d| d.is_working_day).collect();
    assert_eq!(working, vec![true, false, false, true]);
}

#[test]
fn test_scenario_c_empty_log() {
    let report =
        run_pipeline(&BurndownConfig::new(), Some(&weekday_window()), &SnapshotLog::default())
            .unwrap();

    assert_eq!(report.summary.total_story_points, 0.0);
    assert_eq!(report.summary.total_item_count, 0);
    assert_eq!(report.daily.len(), 5);
    for day in &report.daily {
        assert_eq!(day.completed_points, 0.0);
        assert_eq!(day.remaining_points, 0.0);
        assert_eq!(day.completed_count, 0);
        assert_eq!(day.remaining_count, 0);
    }
    assert_eq!(
        report.warnings,
        vec![ReportWarning::EmptyScope {
            sprint: "Sprint 1".to_string()
        }]
    );
}

#[test]
fn test_scenario_d_inverted_range() {
    let window = SprintWindow {
        name: "Sprint 1".to_string(),
        start_date: date(10),
        end_date: date(6),
    };
    let err = run_pipeline(&BurndownConfig::new(), Some(&window), &scenario_a_log()).unwrap_err();
    assert!(matches!(err, BurndownError::InvalidRange { .. }));
}

#[test]
fn test_missing_window_and_statuses() {
    let err = run_pipeline(&BurndownConfig::new(), None, &scenario_a_log()).unwrap_err();
    assert!(matches!(err, BurndownError::MissingConfiguration(_)));

    let config = BurndownConfig {
        completed_statuses: Default::default(),
        ..BurndownConfig::new()
    };
    let err = run_pipeline(&config, Some(&weekday_window()), &scenario_a_log()).unwrap_err();
    assert!(matches!(err, BurndownError::MissingConfiguration(_)));
}

#[test]
fn test_series_are_monotone_and_conserve_totals() {
    let log = SnapshotLog::new(vec![
        snap(1, "Sprint 1", "Done", Some(2.0), "2025-01-06T10:00:00Z"),
        snap(2, "Sprint 1", "In Progress", Some(3.0), "2025-01-06T10:00:00Z"),
        snap(2, "Sprint 1", "Done", Some(3.0), "2025-01-09T10:00:00Z"),
        snap(3, "Sprint 1", "In Progress", None, "2025-01-07T10:00:00Z"),
        snap(3, "Sprint 1", "Done", None, "2025-01-10T10:00:00Z"),
        snap(4, "Sprint 1", "Todo", Some(8.0), "2025-01-07T10:00:00Z"),
    ]);
    let report = run_pipeline(&BurndownConfig::new(), Some(&weekday_window()), &log).unwrap();

    assert_eq!(report.summary.total_story_points, 13.0);
    assert_eq!(report.summary.total_item_count, 4);

    for pair in report.daily.windows(2) {
        assert!(pair[0].completed_points <= pair[1].completed_points);
        assert!(pair[0].completed_count <= pair[1].completed_count);
    }
    for day in &report.daily {
        assert_eq!(
            day.remaining_points + day.completed_points,
            report.summary.total_story_points
        );
        assert_eq!(
            day.remaining_count + day.completed_count as i64,
            report.summary.total_item_count as i64
        );
    }
    assert_eq!(report.daily.last().unwrap().completed_count, 3);

    assert_eq!(report.ideal.first().unwrap().ideal_remaining_points, 13.0);
    assert_eq!(report.ideal.last().unwrap().ideal_remaining_points, 0.0);
}

#[test]
fn test_scope_follows_latest_status_beyond_window() {
    // Item 2 was in progress during the sprint but moved to the backlog afterwards.
    let log = SnapshotLog::new(vec![
        snap(1, "Sprint 1", "Done", Some(3.0), "2025-01-08T09:00:00Z"),
        snap(2, "Sprint 1", "In Progress", Some(5.0), "2025-01-08T09:00:00Z"),
        snap(2, "Sprint 1", "Backlog", Some(5.0), "2025-01-14T09:00:00Z"),
    ]);
    let report = run_pipeline(&BurndownConfig::new(), Some(&weekday_window()), &log).unwrap();
    assert_eq!(report.summary.total_story_points, 3.0);
    assert_eq!(report.summary.total_item_count, 1);
    assert_eq!(report.completions.len(), 2);
}

#[test]
fn test_mixed_id_encodings_are_one_item() {
    let lines = [
        r#"{"itemId":42,"sprintName":"Sprint 1","status":"In Progress","estimatePoints":5,"observedAt":"2025-01-06T09:00:00Z"}"#,
        r#"{"itemId":"42","sprintName":"Sprint 1","status":"Done","estimatePoints":5,"observedAt":"2025-01-08T09:00:00Z"}"#,
    ];
    let raw = lines
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let log = SnapshotLog::from_raw(raw);

    let report = run_pipeline(&BurndownConfig::new(), Some(&weekday_window()), &log).unwrap();
    assert_eq!(report.summary.total_item_count, 1);
    assert_eq!(report.summary.total_story_points, 5.0);
    assert_eq!(report.completion_log.len(), 1);
    assert_eq!(report.completion_log[0].item_id, ItemId::Number(42));
    assert_eq!(report.daily.last().unwrap().remaining_points, 0.0);
}

#[test]
fn test_malformed_records_are_reported() {
    let mut log = scenario_a_log();
    log.skipped = 3;
    let report = run_pipeline(&BurndownConfig::new(), Some(&weekday_window()), &log).unwrap();
    assert_eq!(
        report.warnings,
        vec![ReportWarning::MalformedSnapshots { skipped: 3 }]
    );
}

#[test]
fn test_pipeline_is_idempotent() {
    let config = BurndownConfig::new();
    let log = scenario_a_log();
    let first = run_pipeline(&config, Some(&weekday_window()), &log).unwrap();
    let second = run_pipeline(&config, Some(&weekday_window()), &log).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
