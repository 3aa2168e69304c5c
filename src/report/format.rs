//! Presentation of durations, percentages and date ranges.

use chrono::{Datelike, Duration, NaiveDate};

use super::locale::Locale;
use crate::ledger::TimeWindow;

/// Render seconds as `1d 2h 3m 4s`, leaving out zero-valued units.
///
/// Zero (or anything negative) renders as `0s`.
pub fn format_duration(total_seconds: i64, locale: &dyn Locale) -> String {
    let total = total_seconds.max(0);
    let [d_label, h_label, m_label, s_label] = locale.duration_units();

    let parts = [
        (total / 86_400, d_label),
        (total % 86_400 / 3_600, h_label),
        (total % 3_600 / 60, m_label),
        (total % 60, s_label),
    ];

    let rendered: Vec<String> = parts
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, label)| format!("{}{}", value, label))
        .collect();

    if rendered.is_empty() {
        format!("0{}", s_label)
    } else {
        rendered.join(" ")
    }
}

/// Shorthand for chrono durations.
pub fn format_chrono_duration(duration: Duration, locale: &dyn Locale) -> String {
    format_duration(duration.num_seconds(), locale)
}

/// Round to one decimal place and drop a trailing `.0`.
pub fn format_percentage(percentage: f64) -> String {
    let rounded = format!("{:.1}", percentage);
    let trimmed = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{}%", trimmed)
}

/// Render the days a window covers, treating its end as exclusive.
///
/// Shared month and year are written once: `3–9 March 2025`,
/// `28 February – 6 March 2025`, `29 December 2024 – 4 January 2025`.
pub fn format_date_range(window: TimeWindow, locale: &dyn Locale) -> String {
    let first = window.start.date();
    let last = (window.end - Duration::days(1)).date().max(first);
    format_day_span(first, last, locale)
}

fn format_day_span(first: NaiveDate, last: NaiveDate, locale: &dyn Locale) -> String {
    let month = |d: NaiveDate| locale.month_name(d.month());

    if first == last {
        format!("{} {} {}", first.day(), month(first), first.year())
    } else if first.year() != last.year() {
        format!(
            "{} {} {} – {} {} {}",
            first.day(),
            month(first),
            first.year(),
            last.day(),
            month(last),
            last.year()
        )
    } else if first.month() != last.month() {
        format!(
            "{} {} – {} {} {}",
            first.day(),
            month(first),
            last.day(),
            month(last),
            last.year()
        )
    } else {
        format!("{}–{} {} {}", first.day(), last.day(), month(last), last.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::locale::{English, Ukrainian};

    fn midnight(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0, &English), "0s");
        assert_eq!(format_duration(-5, &English), "0s");
        assert_eq!(format_duration(59, &English), "59s");
        assert_eq!(format_duration(60, &English), "1m");
        assert_eq!(format_duration(3_661, &English), "1h 1m 1s");
        assert_eq!(format_duration(90_000, &English), "1d 1h");
        assert_eq!(format_duration(86_400 * 2 + 5, &English), "2d 5s");
    }

    #[test]
    fn test_format_duration_ukrainian() {
        assert_eq!(format_duration(3_720, &Ukrainian), "1год 2хв");
        assert_eq!(format_duration(0, &Ukrainian), "0с");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(12.0), "12%");
        assert_eq!(format_percentage(12.34), "12.3%");
        assert_eq!(format_percentage(0.0), "0%");
        assert_eq!(format_percentage(100.0), "100%");
        assert_eq!(format_percentage(99.96), "100%");
        assert_eq!(format_percentage(0.04), "0%");
    }

    #[test]
    fn test_date_range_same_month() {
        let w = TimeWindow::new(midnight(2025, 3, 3), midnight(2025, 3, 10));
        assert_eq!(format_date_range(w, &English), "3–9 March 2025");
    }

    #[test]
    fn test_date_range_across_months() {
        let w = TimeWindow::new(midnight(2025, 2, 28), midnight(2025, 3, 7));
        assert_eq!(format_date_range(w, &English), "28 February – 6 March 2025");
    }

    #[test]
    fn test_date_range_across_years() {
        let w = TimeWindow::new(midnight(2024, 12, 29), midnight(2025, 1, 5));
        assert_eq!(
            format_date_range(w, &English),
            "29 December 2024 – 4 January 2025"
        );
    }

    #[test]
    fn test_date_range_end_on_first_of_month() {
        // The exclusive end rolls back into the previous month
        let w = TimeWindow::new(midnight(2025, 3, 25), midnight(2025, 4, 1));
        assert_eq!(format_date_range(w, &English), "25–31 March 2025");
    }

    #[test]
    fn test_date_range_single_day() {
        let w = TimeWindow::new(midnight(2025, 3, 3), midnight(2025, 3, 4));
        assert_eq!(format_date_range(w, &Ukrainian), "3 березня 2025");
    }
}
