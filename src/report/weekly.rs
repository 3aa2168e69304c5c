//! Weekly outage report.

use chrono::NaiveDateTime;

use super::format::{format_date_range, format_duration, format_percentage};
use super::locale::Locale;
use crate::ledger::{Observation, OutageStats, TimeWindow};
use crate::stats::{compute, recent_periods};

/// Statistics for one reporting period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodSummary {
    pub window: TimeWindow,
    pub stats: OutageStats,
}

/// Statistics for the last `weeks` periods, oldest first.
pub fn summarize_periods(
    events: &[Observation],
    now: NaiveDateTime,
    weeks: usize,
) -> Vec<PeriodSummary> {
    recent_periods(now, weeks)
        .into_iter()
        .map(|window| PeriodSummary {
            window,
            stats: compute(events, window),
        })
        .collect()
}

/// Render the weekly report.
///
/// A headline block for the newest period, a blank line, then every period
/// with its downtime share, oldest first. Empty when `weeks` is zero.
pub fn build_weekly_report(
    events: &[Observation],
    now: NaiveDateTime,
    weeks: usize,
    locale: &dyn Locale,
) -> String {
    let summaries = summarize_periods(events, now, weeks);
    let Some(latest) = summaries.last() else {
        return String::new();
    };

    let mut lines = vec![
        locale.report_title(&format_date_range(latest.window, locale)),
        locale.report_outage_count(latest.stats.outage_count),
        locale.report_downtime(&format_duration(latest.stats.outage_seconds, locale)),
        locale.report_percentage(&format_percentage(latest.stats.outage_percentage)),
        String::new(),
        locale.report_history_header().to_string(),
    ];

    lines.extend(summaries.iter().map(|s| {
        format!(
            "{}: {}",
            format_date_range(s.window, locale),
            format_percentage(s.stats.outage_percentage)
        )
    }));

    lines.join("\n")
}
