//! Calendar helpers

use chrono::{Datelike, NaiveDate, Weekday};

/// Monday through Friday
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Working days between `start` and `end`, both included
pub fn working_day_count(start: NaiveDate, end: NaiveDate) -> usize {
    days_between(start, end).filter(|d| is_working_day(*d)).count()
}

/// Every day from `start` to `end` inclusive; empty when `start > end`
pub(crate) fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}
