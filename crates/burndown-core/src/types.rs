//! Core types for burndown reconstruction

use crate::calendar;
use crate::error::{BurndownError, Result};
use burndown_ledger::ItemId;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Inclusive calendar-date range of a sprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintWindow {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SprintWindow {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        let window = Self {
            name: name.into(),
            start_date,
            end_date,
        };
        window.validate()?;
        Ok(window)
    }

    /// Window of a tracker iteration: `duration` days starting at `start_date`
    pub fn from_iteration(iteration: &Iteration) -> Result<Self> {
        if iteration.duration == 0 {
            return Err(BurndownError::missing(format!(
                "iteration '{}' has zero duration",
                iteration.title
            )));
        }
        let end_date = iteration
            .start_date
            .checked_add_days(Days::new(u64::from(iteration.duration) - 1))
            .ok_or_else(|| {
                BurndownError::missing(format!("iteration '{}' ends out of range", iteration.title))
            })?;
        Self::new(iteration.title.clone(), iteration.start_date, end_date)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(BurndownError::InvalidRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of calendar days, both ends included (0 for an inverted window)
    pub fn total_days(&self) -> usize {
        if self.start_date > self.end_date {
            return 0;
        }
        (self.end_date - self.start_date).num_days() as usize + 1
    }

    /// Every calendar day of the window in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        calendar::days_between(self.start_date, self.end_date)
    }
}

/// Iteration definition as exported by the project tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Iteration {
    pub title: String,
    pub start_date: NaiveDate,
    pub duration: u32,
}

impl Iteration {
    /// Load iteration definitions from a JSON array file
    pub fn load_all(path: &Path) -> Result<Vec<Iteration>> {
        let content =
            std::fs::read_to_string(path).map_err(|e| BurndownError::io_error(path, e))?;
        serde_json::from_str(&content).map_err(|e| BurndownError::json_error(path, e))
    }

    /// Find an iteration by title
    pub fn find<'a>(iterations: &'a [Iteration], title: &str) -> Option<&'a Iteration> {
        iterations.iter().find(|it| it.title.trim() == title.trim())
    }
}

/// Scope totals for a sprint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeSummary {
    pub total_story_points: f64,
    pub total_item_count: usize,
}

/// Completion state of one item, from its last in-window observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub item_id: ItemId,
    /// Day of the last in-window observation (not necessarily the transition day)
    pub completed_at: NaiveDate,
    pub estimate_points: f64,
    pub is_complete: bool,
    pub status: String,
    pub title: String,
}

/// Per-item completion state within a sprint window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionIndex {
    pub records: BTreeMap<ItemId, CompletionRecord>,
}

impl CompletionIndex {
    pub fn completed(&self) -> impl Iterator<Item = &CompletionRecord> {
        self.records.values().filter(|r| r.is_complete)
    }

    pub fn get(&self, id: &ItemId) -> Option<&CompletionRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One calendar day of the actual burndown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBurndownRecord {
    pub date: NaiveDate,
    pub completed_points: f64,
    pub remaining_points: f64,
    pub completed_count: usize,
    /// Signed: items completed outside the counted scope can push this below zero
    pub remaining_count: i64,
    pub is_working_day: bool,
}

/// One calendar day of the ideal trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealPoint {
    pub date: NaiveDate,
    pub ideal_remaining_points: f64,
}

/// Audit row for an item counted complete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub date: NaiveDate,
    pub item_id: ItemId,
    pub title: String,
    pub status: String,
    pub points: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Non-fatal conditions reported alongside a burndown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    /// No item's latest status is in the target set
    EmptyScope { sprint: String },
    /// Ledger records dropped for missing identity or timestamp
    MalformedSnapshots { skipped: usize },
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::EmptyScope { sprint } => {
                write!(f, "no items of sprint '{sprint}' match the target statuses")
            }
            ReportWarning::MalformedSnapshots { skipped } => {
                write!(f, "{skipped} malformed snapshot records were skipped")
            }
        }
    }
}

/// Everything one pipeline run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownReport {
    pub sprint: SprintWindow,
    pub summary: ScopeSummary,
    pub daily: Vec<DailyBurndownRecord>,
    pub ideal: Vec<IdealPoint>,
    pub completions: Vec<CompletionRecord>,
    pub completion_log: Vec<CompletionEntry>,
    #[serde(default)]
    pub warnings: Vec<ReportWarning>,
}
