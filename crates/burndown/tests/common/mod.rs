use burndown_core::{BurndownConfig, Iteration};
use burndown_ledger::{RawSnapshot, SnapshotLog};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sample_config() -> BurndownConfig {
    BurndownConfig {
        sprint_name: Some("Sprint 4".to_string()),
        issue_url_template: Some("https://tracker.example/issues/{id}".to_string()),
        ..BurndownConfig::default()
    }
}

/// Two-week iteration starting Monday 2025-01-06
pub fn sample_iterations() -> Vec<Iteration> {
    vec![
        Iteration {
            title: "Sprint 3".to_string(),
            start_date: date(2024, 12, 23),
            duration: 14,
        },
        Iteration {
            title: "Sprint 4".to_string(),
            start_date: date(2025, 1, 6),
            duration: 14,
        },
    ]
}

pub fn raw(id: u64, sprint: &str, status: &str, points: f64, observed_at: &str) -> RawSnapshot {
    RawSnapshot {
        item_id: Some(id.into()),
        sprint_name: Some(sprint.to_string()),
        status: Some(status.to_string()),
        estimate_points: Some(serde_json::json!(points)),
        title: Some(format!("Item {id}")),
        observed_at: Some(observed_at.to_string()),
    }
}

/// A sprint where item 1 finishes Wednesday, item 2 the next Monday, and
/// item 3 stays open. Item 9 belongs to another sprint.
pub fn sample_ledger() -> Vec<RawSnapshot> {
    vec![
        raw(1, "Sprint 4", "Todo", 3.0, "2025-01-06T09:00:00Z"),
        raw(2, "Sprint 4", "Todo", 5.0, "2025-01-06T09:00:00Z"),
        raw(3, "Sprint 4", "Todo", 2.0, "2025-01-06T09:00:00Z"),
        raw(9, "Sprint 3", "Todo", 8.0, "2025-01-06T09:00:00Z"),
        raw(1, "Sprint 4", "In Progress", 3.0, "2025-01-07T09:00:00Z"),
        raw(1, "Sprint 4", "Done", 3.0, "2025-01-08T09:00:00Z"),
        raw(2, "Sprint 4", "In Progress", 5.0, "2025-01-09T09:00:00Z"),
        raw(2, "Sprint 4", "Done", 5.0, "2025-01-13T09:00:00Z"),
        raw(3, "Sprint 4", "In Progress", 2.0, "2025-01-14T09:00:00Z"),
    ]
}

pub fn sample_log() -> SnapshotLog {
    SnapshotLog::from_raw(sample_ledger())
}
