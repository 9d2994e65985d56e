//! Stale item detection (items sitting in a WIP status too long)

use burndown_core::StaleConfig;
use burndown_ledger::{ItemId, Snapshot};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaleItem {
    pub item_id: ItemId,
    pub title: String,
    pub status: String,
    /// Earliest observation carrying the current status
    pub since: DateTime<FixedOffset>,
    pub wip_days: i64,
}

/// Items whose latest status is checked and whose age in that status exceeds
/// `max_wip_days` whole days. Oldest first.
pub fn find_stale_items(log: &[Snapshot], config: &StaleConfig, now: DateTime<Utc>) -> Vec<StaleItem> {
    let mut history: BTreeMap<&ItemId, Vec<&Snapshot>> = BTreeMap::new();
    for snapshot in log {
        history.entry(&snapshot.item_id).or_default().push(snapshot);
    }

    let mut stale: Vec<StaleItem> = history
        .into_iter()
        .filter_map(|(id, observations)| {
            let latest = latest_of(&observations)?;
            let status = latest.status.trim();
            if !config.check_statuses.contains(status) {
                return None;
            }

            let since = observations
                .iter()
                .filter(|s| s.has_status(status))
                .map(|s| s.observed_at)
                .min()?;
            let wip_days = (now.fixed_offset() - since).num_days();

            (wip_days > config.max_wip_days).then(|| StaleItem {
                item_id: id.clone(),
                title: latest.title.clone(),
                status: status.to_string(),
                since,
                wip_days,
            })
        })
        .collect();

    stale.sort_by(|a, b| {
        b.wip_days
            .cmp(&a.wip_days)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    tracing::debug!(stale = stale.len(), "checked WIP ages");
    stale
}

/// Greatest timestamp, later log position on ties
fn latest_of<'a>(observations: &[&'a Snapshot]) -> Option<&'a Snapshot> {
    observations
        .iter()
        .copied()
        .reduce(|best, s| if s.observed_at >= best.observed_at { s } else { best })
}
