//! Ideal burndown trajectory
//!
//! The curve declines on working days, holds flat across weekends, starts at
//! the total and is pinned to zero on the last day of the window. The pin can
//! leave a visible step between the last working-day value and zero.

use crate::calendar::{is_working_day, working_day_count};
use crate::error::Result;
use crate::types::{IdealPoint, SprintWindow};

pub fn ideal_trajectory(total_story_points: f64, window: &SprintWindow) -> Result<Vec<IdealPoint>> {
    window.validate()?;

    let total_days = window.total_days();
    let working_days = working_day_count(window.start_date, window.end_date);

    if working_days == 0 {
        tracing::debug!(sprint = %window.name, "no working days, ideal line is flat");
        return Ok(window
            .days()
            .map(|date| IdealPoint {
                date,
                ideal_remaining_points: total_story_points,
            })
            .collect());
    }

    let per_working_day = total_story_points / working_days as f64;
    let last = total_days - 1;
    let mut carried = total_story_points;

    let points = window
        .days()
        .enumerate()
        .map(|(i, date)| {
            let ideal_remaining_points = if i == 0 {
                total_story_points
            } else if i == last {
                0.0
            } else if !is_working_day(date) {
                carried
            } else {
                let elapsed = i as f64 / total_days as f64;
                carried = (total_story_points - per_working_day * working_days as f64 * elapsed)
                    .max(0.0);
                carried
            };
            IdealPoint {
                date,
                ideal_remaining_points,
            }
        })
        .collect();

    tracing::debug!(
        sprint = %window.name,
        total_days,
        working_days,
        per_working_day,
        "generated ideal trajectory"
    );
    Ok(points)
}
