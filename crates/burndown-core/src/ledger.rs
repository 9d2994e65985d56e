//! Ledger reduction: last observation wins per item

use burndown_ledger::{ItemId, Snapshot};
use std::collections::BTreeMap;

/// Latest known snapshot per item for one sprint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestStateIndex {
    pub sprint_name: String,
    pub items: BTreeMap<ItemId, Snapshot>,
}

impl LatestStateIndex {
    pub fn get(&self, id: &ItemId) -> Option<&Snapshot> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &Snapshot)> {
        self.items.iter()
    }
}

/// Collapse the log into the latest snapshot per item of `sprint_name`,
/// regardless of the sprint's dates.
pub fn reduce_latest(log: &[Snapshot], sprint_name: &str) -> LatestStateIndex {
    let items = last_observations(log, |s| s.sprint_name.trim() == sprint_name.trim())
        .into_iter()
        .map(|(id, snapshot)| (id, snapshot.clone()))
        .collect();

    LatestStateIndex {
        sprint_name: sprint_name.to_string(),
        items,
    }
}

/// Last observation per item among the snapshots accepted by `keep`.
///
/// Observations are totally ordered by `(observed_at, log position)`: the
/// greatest timestamp wins and equal timestamps resolve to the one appearing
/// later in the log.
pub(crate) fn last_observations<'a, F>(log: &'a [Snapshot], keep: F) -> BTreeMap<ItemId, &'a Snapshot>
where
    F: Fn(&Snapshot) -> bool,
{
    let mut latest: BTreeMap<ItemId, &Snapshot> = BTreeMap::new();

    for snapshot in log.iter().filter(|s| keep(*s)) {
        match latest.get(&snapshot.item_id) {
            Some(current) if current.observed_at > snapshot.observed_at => {}
            _ => {
                latest.insert(snapshot.item_id.clone(), snapshot);
            }
        }
    }

    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use burndown_ledger::parse_timestamp;

    fn snap(id: u64, sprint: &str, status: &str, at: &str) -> Snapshot {
        Snapshot {
            item_id: ItemId::Number(id),
            sprint_name: sprint.to_string(),
            status: status.to_string(),
            estimate_points: Some(1.0),
            title: String::new(),
            observed_at: parse_timestamp(at).unwrap(),
        }
    }

    #[test]
    fn test_latest_observation_wins() {
        let log = vec![
            snap(1, "S1", "Todo", "2025-01-06T09:00:00Z"),
            snap(1, "S1", "Done", "2025-01-08T09:00:00Z"),
            snap(2, "S1", "In Progress", "2025-01-07T09:00:00Z"),
        ];
        let index = reduce_latest(&log, "S1");
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(&ItemId::Number(1)).unwrap().status, "Done");
    }

    #[test]
    fn test_out_of_order_log_keeps_max_timestamp() {
        let log = vec![
            snap(1, "S1", "Done", "2025-01-08T09:00:00Z"),
            snap(1, "S1", "Todo", "2025-01-06T09:00:00Z"),
        ];
        let index = reduce_latest(&log, "S1");
        assert_eq!(index.get(&ItemId::Number(1)).unwrap().status, "Done");
    }

    #[test]
    fn test_tie_resolves_to_later_log_entry() {
        let log = vec![
            snap(1, "S1", "In Progress", "2025-01-08T09:00:00Z"),
            snap(1, "S1", "Done", "2025-01-08T09:00:00Z"),
        ];
        let index = reduce_latest(&log, "S1");
        assert_eq!(index.get(&ItemId::Number(1)).unwrap().status, "Done");
    }

    #[test]
    fn test_other_sprints_ignored() {
        let log = vec![
            snap(1, "S1", "Todo", "2025-01-06T09:00:00Z"),
            snap(1, "S2", "Done", "2025-01-09T09:00:00Z"),
            snap(3, "S2", "Done", "2025-01-09T09:00:00Z"),
        ];
        let index = reduce_latest(&log, "S1");
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&ItemId::Number(1)).unwrap().status, "Todo");
        assert!(index.get(&ItemId::Number(3)).is_none());
    }

    #[test]
    fn test_empty_log() {
        assert!(reduce_latest(&[], "S1").is_empty());
    }
}
