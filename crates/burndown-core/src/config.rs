//! Configuration for burndown and flow reports

use crate::error::{BurndownError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Burndown report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurndownConfig {
    /// Sprint to report on when none is given on the command line
    pub sprint_name: Option<String>,

    /// Statuses of items still being worked on (counted toward scope)
    #[serde(deserialize_with = "status_list")]
    pub working_statuses: BTreeSet<String>,

    /// Statuses that mark an item complete (counted toward scope and progress)
    #[serde(deserialize_with = "status_list")]
    pub completed_statuses: BTreeSet<String>,

    /// Link template for the completion log, `{id}` is replaced by the item id
    pub issue_url_template: Option<String>,
}

impl BurndownConfig {
    pub fn new() -> Self {
        Self {
            sprint_name: None,
            working_statuses: statuses(&["Todo", "In Progress"]),
            completed_statuses: statuses(&["Done"]),
            issue_url_template: None,
        }
    }

    /// Union of working and completed statuses
    pub fn target_statuses(&self) -> BTreeSet<String> {
        self.working_statuses
            .union(&self.completed_statuses)
            .cloned()
            .collect()
    }

    pub fn is_completed(&self, status: &str) -> bool {
        self.completed_statuses.contains(status.trim())
    }

    pub fn validate(&self) -> Result<()> {
        if self.completed_statuses.is_empty() {
            return Err(BurndownError::missing("completed statuses are empty"));
        }
        Ok(())
    }

    pub fn issue_url(&self, id: &str) -> Option<String> {
        self.issue_url_template
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.replace("{id}", id))
    }
}

impl Default for BurndownConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Stale (long-running WIP) item check configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaleConfig {
    /// Statuses whose age is checked
    #[serde(deserialize_with = "status_list")]
    pub check_statuses: BTreeSet<String>,

    /// Items older than this many whole days in their status are stale
    pub max_wip_days: i64,
}

impl StaleConfig {
    pub fn new() -> Self {
        Self {
            check_statuses: statuses(&["In Progress"]),
            max_wip_days: 5,
        }
    }
}

impl Default for StaleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Cycle time and control chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleTimeConfig {
    /// Status that starts the clock
    pub from_status: String,

    /// Statuses that stop the clock
    #[serde(deserialize_with = "status_list")]
    pub to_statuses: BTreeSet<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// EMA smoothing factor (0.1 - 0.5 recommended)
    pub ema_alpha: f64,
}

impl CycleTimeConfig {
    pub fn new() -> Self {
        Self {
            from_status: "In Progress".to_string(),
            to_statuses: statuses(&["Done"]),
            start_date: None,
            end_date: None,
            ema_alpha: 0.2,
        }
    }
}

impl Default for CycleTimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Contents of settings.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub burndown: BurndownConfig,
    pub stale: StaleConfig,
    pub cycle_time: CycleTimeConfig,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| BurndownError::io_error(path, e))?;
        serde_json::from_str(&content).map_err(|e| BurndownError::json_error(path, e))
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

fn statuses(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Accepts either a list or a comma-separated string; entries are trimmed and
/// empty ones dropped.
fn status_list<'de, D>(deserializer: D) -> std::result::Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StatusList {
        Joined(String),
        Items(Vec<String>),
    }

    let items = match StatusList::deserialize(deserializer)? {
        StatusList::Joined(s) => s.split(',').map(str::to_string).collect(),
        StatusList::Items(v) => v,
    };
    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}
