//! Snapshot record types

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Work item identifier (issue number or opaque key).
///
/// A string holding a plain number is the same item as that number, so `42`
/// and `"42"` both become `Number(42)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(u64),
    Text(String),
}

impl ItemId {
    fn from_text(s: String) -> Self {
        match s.trim().parse::<u64>() {
            Ok(n) => ItemId::Number(n),
            Err(_) => ItemId::Text(s),
        }
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(u64),
            Text(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Number(n) => ItemId::Number(n),
            Wire::Text(s) => ItemId::from_text(s),
        })
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        ItemId::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::from_text(s.to_string())
    }
}

/// One ledger line as exported, before validation.
///
/// Every field is optional so a partially corrupt line still parses and can be
/// counted instead of aborting the whole read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub sprint_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub estimate_points: Option<serde_json::Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub observed_at: Option<String>,
}

impl RawSnapshot {
    /// Validate into a [`Snapshot`]. Returns `None` when `itemId` or
    /// `observedAt` is missing or unreadable.
    pub fn into_snapshot(self) -> Option<Snapshot> {
        let item_id = match self.item_id? {
            ItemId::Text(s) if s.trim().is_empty() => return None,
            id => id,
        };
        let observed_at = parse_timestamp(self.observed_at.as_deref()?)?;

        Some(Snapshot {
            item_id,
            sprint_name: self.sprint_name.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            estimate_points: self.estimate_points.as_ref().and_then(parse_estimate),
            title: self.title.unwrap_or_default(),
            observed_at,
        })
    }
}

/// A validated, immutable observation of a work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub item_id: ItemId,
    pub sprint_name: String,
    pub status: String,
    #[serde(default)]
    pub estimate_points: Option<f64>,
    #[serde(default)]
    pub title: String,
    pub observed_at: DateTime<FixedOffset>,
}

impl Snapshot {
    /// Story points, treating a missing estimate as zero
    pub fn points(&self) -> f64 {
        self.estimate_points.unwrap_or(0.0)
    }

    /// Calendar day of the observation, in the offset it was recorded with
    pub fn observed_day(&self) -> NaiveDate {
        self.observed_at.date_naive()
    }

    pub fn has_status(&self, status: &str) -> bool {
        self.status.trim() == status.trim()
    }
}

/// Validated ledger contents plus the number of records dropped on the way
#[derive(Debug, Clone, Default)]
pub struct SnapshotLog {
    pub snapshots: Vec<Snapshot>,
    pub skipped: usize,
}

impl SnapshotLog {
    pub fn new(snapshots: Vec<Snapshot>) -> Self {
        Self {
            snapshots,
            skipped: 0,
        }
    }

    /// Validate raw records, counting the ones that cannot be used
    pub fn from_raw(raw: Vec<RawSnapshot>) -> Self {
        let total = raw.len();
        let snapshots: Vec<Snapshot> = raw
            .into_iter()
            .filter_map(RawSnapshot::into_snapshot)
            .collect();
        let skipped = total - snapshots.len();
        Self { snapshots, skipped }
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}

/// Parse an observation timestamp.
///
/// Accepts RFC 3339, ISO 8601 without an offset, and the spreadsheet export
/// formats `YYYY-MM-DD HH:MM:SS` and `YYYY/MM/DD HH:MM:SS`. Anything without
/// an offset is read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S%.f",
];

fn parse_estimate(value: &serde_json::Value) -> Option<f64> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
