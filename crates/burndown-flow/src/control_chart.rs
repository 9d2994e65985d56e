//! Control chart over cycle times with EMA smoothing and deviation bands

use crate::cycle_time::{date_range, CycleTime};
use crate::error::{FlowError, Result};
use burndown_core::CycleTimeConfig;
use burndown_ledger::ItemId;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of most recent cycle times used for the rolling deviation
const ROLLING_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlChartRow {
    pub date: NaiveDate,
    pub cycle_time_days: Option<f64>,
    pub item_id: Option<ItemId>,
    pub title: Option<String>,
    pub started_at: Option<DateTime<FixedOffset>>,
    pub finished_at: Option<DateTime<FixedOffset>>,
    pub average: f64,
    pub ema: f64,
    pub upper_band: f64,
    pub lower_band: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlChart {
    pub overall_average: f64,
    pub rows: Vec<ControlChartRow>,
}

/// One row per cycle time on days that have any (grouped by start day), one
/// empty row on days that don't. Smoothing advances once per calendar day.
pub fn build_control_chart(cycle_times: &[CycleTime], config: &CycleTimeConfig) -> Result<ControlChart> {
    let alpha = config.ema_alpha;
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(FlowError::InvalidAlpha(alpha));
    }
    let (start, end) = date_range(config)?;

    let all_days: Vec<f64> = cycle_times.iter().map(CycleTime::days).collect();
    let overall_average = mean(&all_days);

    let mut by_day: BTreeMap<NaiveDate, Vec<&CycleTime>> = BTreeMap::new();
    for ct in cycle_times {
        by_day.entry(ct.started_at.date_naive()).or_default().push(ct);
    }

    let mut ema: Option<f64> = None;
    let mut smoothed_deviation = std_dev(&all_days, overall_average);
    let mut seen: Vec<f64> = Vec::new();
    let mut rows = Vec::new();

    for date in start.iter_days().take_while(|d| *d <= end) {
        let day_items = by_day.get(&date).map(Vec::as_slice).unwrap_or_default();
        let day_times: Vec<f64> = day_items.iter().map(|ct| ct.days()).collect();
        let day_average = mean(&day_times);
        seen.extend_from_slice(&day_times);

        let current = match ema {
            None => day_average,
            Some(prev) => alpha * day_average + (1.0 - alpha) * prev,
        };
        ema = Some(current);

        let recent = &seen[seen.len().saturating_sub(ROLLING_WINDOW)..];
        let recent_deviation = if recent.len() > 1 {
            std_dev(recent, mean(recent))
        } else {
            smoothed_deviation
        };
        smoothed_deviation = alpha * recent_deviation + (1.0 - alpha) * smoothed_deviation;

        let upper_band = current + 2.0 * smoothed_deviation;
        let lower_band = (current - 2.0 * smoothed_deviation).max(0.0);

        let row = |ct: Option<&CycleTime>| ControlChartRow {
            date,
            cycle_time_days: ct.map(CycleTime::days),
            item_id: ct.map(|c| c.item_id.clone()),
            title: ct.map(|c| c.title.clone()),
            started_at: ct.map(|c| c.started_at),
            finished_at: ct.map(|c| c.finished_at),
            average: overall_average,
            ema: current,
            upper_band,
            lower_band,
        };

        if day_items.is_empty() {
            rows.push(row(None));
        } else {
            rows.extend(day_items.iter().map(|ct| row(Some(*ct))));
        }
    }

    Ok(ControlChart {
        overall_average,
        rows,
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; zero for fewer than two values
fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
