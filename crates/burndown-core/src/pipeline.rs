//! End-to-end burndown computation over one sprint

use crate::config::BurndownConfig;
use crate::error::{BurndownError, Result};
use crate::ideal::ideal_trajectory;
use crate::ledger::reduce_latest;
use crate::projector::{build_completion_index, completion_log, project_completion};
use crate::scope::resolve_scope;
use crate::types::{BurndownReport, ReportWarning, SprintWindow};
use burndown_ledger::SnapshotLog;

/// Run reducer, scope resolver, projector and ideal generator in order.
///
/// Configuration and window are checked before the log is read, so an
/// invalid range or empty status set fails without doing any work.
pub fn run_pipeline(
    config: &BurndownConfig,
    window: Option<&SprintWindow>,
    log: &SnapshotLog,
) -> Result<BurndownReport> {
    config.validate()?;
    let window = window.ok_or_else(|| BurndownError::missing("sprint window"))?;
    window.validate()?;

    let latest = reduce_latest(&log.snapshots, &window.name);
    let scope = resolve_scope(&latest, &config.target_statuses());
    let index = build_completion_index(&log.snapshots, window, &config.completed_statuses);
    let daily = project_completion(&index, window, &scope.summary)?;
    let ideal = ideal_trajectory(scope.summary.total_story_points, window)?;

    let mut warnings = Vec::new();
    if scope.is_empty() {
        warnings.push(ReportWarning::EmptyScope {
            sprint: window.name.clone(),
        });
    }
    if log.skipped > 0 {
        warnings.push(ReportWarning::MalformedSnapshots {
            skipped: log.skipped,
        });
    }
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    tracing::info!(
        sprint = %window.name,
        items = scope.summary.total_item_count,
        points = scope.summary.total_story_points,
        completed = index.completed().count(),
        days = daily.len(),
        "burndown computed"
    );

    Ok(BurndownReport {
        sprint: window.clone(),
        summary: scope.summary,
        daily,
        ideal,
        completion_log: completion_log(&index, config),
        completions: index.records.into_values().collect(),
        warnings,
    })
}
