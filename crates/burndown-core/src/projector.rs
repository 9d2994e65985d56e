//! Completion projection: cumulative progress per calendar day
//!
//! An item's completion day is the day of its last observation inside the
//! window. With periodic snapshots this is when the item was last *seen*, not
//! necessarily when it changed status; daily exports keep the two close.

use crate::calendar::is_working_day;
use crate::config::BurndownConfig;
use crate::error::Result;
use crate::ledger::last_observations;
use crate::types::{
    CompletionEntry, CompletionIndex, CompletionRecord, DailyBurndownRecord, ScopeSummary,
    SprintWindow,
};
use burndown_ledger::Snapshot;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Build the completion index from each item's last observation inside the
/// window. Earlier in-window observations of the same item are discarded.
pub fn build_completion_index(
    log: &[Snapshot],
    window: &SprintWindow,
    completed_statuses: &BTreeSet<String>,
) -> CompletionIndex {
    let sprint = window.name.trim();
    let records = last_observations(log, |s| {
        s.sprint_name.trim() == sprint && window.contains(s.observed_day())
    })
    .into_iter()
    .map(|(id, s)| {
        let record = CompletionRecord {
            item_id: id.clone(),
            completed_at: s.observed_day(),
            estimate_points: s.points(),
            is_complete: completed_statuses.contains(s.status.trim()),
            status: s.status.clone(),
            title: s.title.clone(),
        };
        (id, record)
    })
    .collect();

    CompletionIndex { records }
}

/// Cumulative completed and remaining work for every day of the window.
///
/// Completed totals never decrease from one day to the next. Remaining values
/// are not floored: completions outside the counted scope show up as-is.
pub fn project_completion(
    index: &CompletionIndex,
    window: &SprintWindow,
    summary: &ScopeSummary,
) -> Result<Vec<DailyBurndownRecord>> {
    window.validate()?;

    let mut by_day: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for record in index.completed() {
        let day = by_day.entry(record.completed_at).or_default();
        day.0 += record.estimate_points;
        day.1 += 1;
    }

    let mut completed_points = 0.0;
    let mut completed_count = 0usize;

    Ok(window
        .days()
        .map(|date| {
            if let Some(&(points, count)) = by_day.get(&date) {
                completed_points += points;
                completed_count += count;
            }
            DailyBurndownRecord {
                date,
                completed_points,
                remaining_points: summary.total_story_points - completed_points,
                completed_count,
                remaining_count: summary.total_item_count as i64 - completed_count as i64,
                is_working_day: is_working_day(date),
            }
        })
        .collect())
}

/// Audit rows for the items counted complete, ordered by day then item
pub fn completion_log(index: &CompletionIndex, config: &BurndownConfig) -> Vec<CompletionEntry> {
    let mut entries: Vec<CompletionEntry> = index
        .completed()
        .map(|r| CompletionEntry {
            date: r.completed_at,
            item_id: r.item_id.clone(),
            title: r.title.clone(),
            status: r.status.clone(),
            points: r.estimate_points,
            url: config.issue_url(&r.item_id.to_string()),
        })
        .collect();
    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.item_id.cmp(&b.item_id)));
    entries
}
