//! Scope resolution over the latest state of each item

use crate::ledger::LatestStateIndex;
use crate::types::ScopeSummary;
use burndown_ledger::{ItemId, Snapshot};
use std::collections::{BTreeMap, BTreeSet};

/// Items counted toward a sprint's totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeSet {
    pub summary: ScopeSummary,
    pub items: BTreeMap<ItemId, Snapshot>,
}

impl ScopeSet {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Sum points and count items whose latest status is one of `target_statuses`.
/// A missing estimate adds no points but the item still counts.
pub fn resolve_scope(index: &LatestStateIndex, target_statuses: &BTreeSet<String>) -> ScopeSet {
    let items: BTreeMap<ItemId, Snapshot> = index
        .iter()
        .filter(|(_, s)| target_statuses.contains(s.status.trim()))
        .map(|(id, s)| (id.clone(), s.clone()))
        .collect();

    let summary = ScopeSummary {
        total_story_points: items.values().map(Snapshot::points).sum(),
        total_item_count: items.len(),
    };

    tracing::debug!(
        sprint = %index.sprint_name,
        points = summary.total_story_points,
        items = summary.total_item_count,
        "resolved sprint scope"
    );

    ScopeSet { summary, items }
}
