//! Sprint burndown reconstruction from an append-only snapshot ledger

mod calendar;
mod config;
mod error;
mod ideal;
mod ledger;
mod pipeline;
mod projector;
mod scope;
mod types;

pub use calendar::{is_working_day, working_day_count};
pub use config::{BurndownConfig, CycleTimeConfig, Settings, StaleConfig};
pub use error::{BurndownError, Result};
pub use ideal::ideal_trajectory;
pub use ledger::{reduce_latest, LatestStateIndex};
pub use pipeline::run_pipeline;
pub use projector::{build_completion_index, completion_log, project_completion};
pub use scope::{resolve_scope, ScopeSet};
pub use types::{
    BurndownReport, CompletionEntry, CompletionIndex, CompletionRecord, DailyBurndownRecord,
    IdealPoint, Iteration, ReportWarning, ScopeSummary, SprintWindow,
};
