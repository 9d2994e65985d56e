//! Duplicate snapshot removal

use crate::types::{ItemId, Snapshot};
use std::collections::BTreeMap;

/// Drop snapshots that repeat the previous observation of the same item in
/// every field except `observedAt`, keeping the oldest of each run. Output
/// preserves ledger order.
///
/// Only consecutive repeats in an item's history collapse: an item that goes
/// Todo, Done, Todo keeps all three rows so its reopening survives.
pub fn remove_duplicates(snapshots: &[Snapshot]) -> Vec<Snapshot> {
    let mut history: BTreeMap<&ItemId, Vec<usize>> = BTreeMap::new();
    for (pos, snapshot) in snapshots.iter().enumerate() {
        history.entry(&snapshot.item_id).or_default().push(pos);
    }

    let mut keep = vec![false; snapshots.len()];
    for positions in history.values_mut() {
        // Stable sort: equal timestamps stay in ledger order
        positions.sort_by_key(|&pos| snapshots[pos].observed_at);

        let mut previous: Option<ContentKey<'_>> = None;
        for &pos in positions.iter() {
            let key = content_key(&snapshots[pos]);
            if previous.as_ref() != Some(&key) {
                keep[pos] = true;
            }
            previous = Some(key);
        }
    }

    let kept: Vec<Snapshot> = snapshots
        .iter()
        .zip(keep)
        .filter_map(|(snapshot, keep)| keep.then(|| snapshot.clone()))
        .collect();

    tracing::debug!(
        before = snapshots.len(),
        after = kept.len(),
        "removed duplicate snapshots"
    );
    kept
}

/// Every field except `observedAt`; the estimate is compared bit for bit
type ContentKey<'a> = (&'a ItemId, &'a str, &'a str, Option<u64>, &'a str);

fn content_key(snapshot: &Snapshot) -> ContentKey<'_> {
    (
        &snapshot.item_id,
        snapshot.sprint_name.as_str(),
        snapshot.status.as_str(),
        snapshot.estimate_points.map(f64::to_bits),
        snapshot.title.as_str(),
    )
}
