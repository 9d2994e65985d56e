//! Cycle time: first entry into the start status to last arrival in a done status

use crate::error::{FlowError, Result};
use burndown_core::CycleTimeConfig;
use burndown_ledger::{ItemId, Snapshot};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleTime {
    pub item_id: ItemId,
    pub title: String,
    pub sprint_name: String,
    pub started_at: DateTime<FixedOffset>,
    pub finished_at: DateTime<FixedOffset>,
    pub seconds: i64,
}

impl CycleTime {
    pub fn days(&self) -> f64 {
        self.seconds as f64 / SECONDS_PER_DAY
    }
}

/// Resolve the configured date range, rejecting absent or inverted bounds
pub(crate) fn date_range(config: &CycleTimeConfig) -> Result<(NaiveDate, NaiveDate)> {
    let start = config
        .start_date
        .ok_or_else(|| FlowError::MissingConfiguration("cycle time start date".to_string()))?;
    let end = config
        .end_date
        .ok_or_else(|| FlowError::MissingConfiguration("cycle time end date".to_string()))?;
    if start > end {
        return Err(FlowError::InvalidRange { start, end });
    }
    Ok((start, end))
}

/// Cycle times for items observed within the configured range, ordered by item.
///
/// Items that never reached both the start status and a done status inside
/// the range are left out.
pub fn compute_cycle_times(log: &[Snapshot], config: &CycleTimeConfig) -> Result<Vec<CycleTime>> {
    let from_status = config.from_status.trim();
    if from_status.is_empty() {
        return Err(FlowError::MissingConfiguration("cycle time from status".to_string()));
    }
    if config.to_statuses.is_empty() {
        return Err(FlowError::MissingConfiguration("cycle time to statuses".to_string()));
    }
    let (start, end) = date_range(config)?;

    let mut history: BTreeMap<&ItemId, Vec<&Snapshot>> = BTreeMap::new();
    for snapshot in log {
        let day = snapshot.observed_day();
        if start <= day && day <= end {
            history.entry(&snapshot.item_id).or_default().push(snapshot);
        }
    }

    let cycle_times: Vec<CycleTime> = history
        .into_iter()
        .filter_map(|(id, mut observations)| {
            observations.sort_by_key(|s| s.observed_at);

            let started = observations.iter().find(|s| s.has_status(from_status))?;
            let finished = observations
                .iter()
                .rev()
                .find(|s| config.to_statuses.contains(s.status.trim()))?;

            Some(CycleTime {
                item_id: id.clone(),
                title: finished.title.clone(),
                sprint_name: finished.sprint_name.clone(),
                started_at: started.observed_at,
                finished_at: finished.observed_at,
                seconds: (finished.observed_at - started.observed_at).num_seconds(),
            })
        })
        .collect();

    tracing::debug!(
        items = cycle_times.len(),
        %start,
        %end,
        "computed cycle times"
    );
    Ok(cycle_times)
}
