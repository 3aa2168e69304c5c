//! User-facing text tables.

/// Text used in alerts and reports.
///
/// Statistics never depend on this; swapping the table only changes wording.
pub trait Locale: Send + Sync {
    /// Month name as it appears after a day number, `month` in 1..=12.
    fn month_name(&self, month: u32) -> &'static str;

    /// Labels for days, hours, minutes and seconds.
    fn duration_units(&self) -> [&'static str; 4];

    fn outage_headline(&self) -> &'static str;
    fn restored_headline(&self) -> &'static str;
    /// Second line of an outage alert, `duration` already formatted.
    fn uptime_line(&self, duration: &str) -> String;
    /// Second line of a restoration alert, `duration` already formatted.
    fn outage_length_line(&self, duration: &str) -> String;

    fn report_title(&self, range: &str) -> String;
    fn report_outage_count(&self, count: u32) -> String;
    fn report_downtime(&self, duration: &str) -> String;
    fn report_percentage(&self, percentage: &str) -> String;
    fn report_history_header(&self) -> &'static str;
}

pub struct English;

impl Locale for English {
    fn month_name(&self, month: u32) -> &'static str {
        const MONTHS: [&str; 12] = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        MONTHS.get(month.wrapping_sub(1) as usize).copied().unwrap_or("?")
    }

    fn duration_units(&self) -> [&'static str; 4] {
        ["d", "h", "m", "s"]
    }

    fn outage_headline(&self) -> &'static str {
        "⚠️ Power outage"
    }

    fn restored_headline(&self) -> &'static str {
        "✅ Power restored"
    }

    fn uptime_line(&self, duration: &str) -> String {
        format!("Power was on for {}", duration)
    }

    fn outage_length_line(&self, duration: &str) -> String {
        format!("Outage lasted {}", duration)
    }

    fn report_title(&self, range: &str) -> String {
        format!("📊 Weekly report: {}", range)
    }

    fn report_outage_count(&self, count: u32) -> String {
        format!("Outages: {}", count)
    }

    fn report_downtime(&self, duration: &str) -> String {
        format!("Total downtime: {}", duration)
    }

    fn report_percentage(&self, percentage: &str) -> String {
        format!("Without power: {}", percentage)
    }

    fn report_history_header(&self) -> &'static str {
        "Recent weeks:"
    }
}

pub struct Ukrainian;

impl Locale for Ukrainian {
    fn month_name(&self, month: u32) -> &'static str {
        // Genitive case, as used after a day number
        const MONTHS: [&str; 12] = [
            "січня", "лютого", "березня", "квітня", "травня", "червня", "липня", "серпня",
            "вересня", "жовтня", "листопада", "грудня",
        ];
        MONTHS.get(month.wrapping_sub(1) as usize).copied().unwrap_or("?")
    }

    fn duration_units(&self) -> [&'static str; 4] {
        ["д", "год", "хв", "с"]
    }

    fn outage_headline(&self) -> &'static str {
        "⚠️ Відсутнє електроживлення"
    }

    fn restored_headline(&self) -> &'static str {
        "✅ Електроживлення відновлено"
    }

    fn uptime_line(&self, duration: &str) -> String {
        format!("Світло було {}", duration)
    }

    fn outage_length_line(&self, duration: &str) -> String {
        format!("Світла не було {}", duration)
    }

    fn report_title(&self, range: &str) -> String {
        format!("📊 Тижневий звіт: {}", range)
    }

    fn report_outage_count(&self, count: u32) -> String {
        format!("Відключень: {}", count)
    }

    fn report_downtime(&self, duration: &str) -> String {
        format!("Загалом без світла: {}", duration)
    }

    fn report_percentage(&self, percentage: &str) -> String {
        format!("Частка часу без світла: {}", percentage)
    }

    fn report_history_header(&self) -> &'static str {
        "Останні тижні:"
    }
}

/// Look up a locale by its short code, `None` when unknown.
pub fn locale_for(code: &str) -> Option<&'static dyn Locale> {
    match code.trim().to_ascii_lowercase().as_str() {
        "en" => Some(&English),
        "uk" | "ua" => Some(&Ukrainian),
        _ => None,
    }
}
