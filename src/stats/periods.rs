//! Weekly reporting periods.

use chrono::{Days, NaiveDateTime, NaiveTime};

use crate::ledger::TimeWindow;

/// Length of one reporting period in days.
pub const PERIOD_DAYS: i64 = 7;

/// Midnight at the start of `now`'s date.
pub fn start_of_day(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_time(NaiveTime::MIN)
}

/// The last `week_count` seven-day windows, oldest first.
///
/// The newest window ends at midnight of `now`'s date, so the current
/// partial day is never included. Windows that would start before the
/// earliest representable date are dropped.
pub fn recent_periods(now: NaiveDateTime, week_count: usize) -> Vec<TimeWindow> {
    let last_end = start_of_day(now);
    let period = Days::new(PERIOD_DAYS as u64);

    let mut periods: Vec<TimeWindow> = (0..week_count as u64)
        .map_while(|weeks_back| {
            let days_back = weeks_back.checked_mul(PERIOD_DAYS as u64)?;
            let end = last_end.checked_sub_days(Days::new(days_back))?;
            let start = end.checked_sub_days(period)?;
            Some(TimeWindow::new(start, end))
        })
        .collect();
    periods.reverse();
    periods
}
