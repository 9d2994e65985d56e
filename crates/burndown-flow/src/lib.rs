//! Flow analytics over the snapshot ledger: WIP age, cycle time, control chart

mod control_chart;
mod cycle_time;
mod error;
mod stale;

pub use control_chart::{build_control_chart, ControlChart, ControlChartRow};
pub use cycle_time::{compute_cycle_times, CycleTime};
pub use error::{FlowError, Result};
pub use stale::{find_stale_items, StaleItem};
