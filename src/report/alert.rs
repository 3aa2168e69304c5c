//! Alert message text.

use super::format::format_chrono_duration;
use super::locale::Locale;
use crate::ledger::Observation;
use crate::stats::{duration_since_last_restoration, last_completed_outage_duration};

/// Which way connectivity changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Lost,
    Restored,
}

/// Build the alert text for `kind` from the current event log.
///
/// Two lines (headline and duration) when the log holds a matching earlier
/// interval, the headline alone otherwise.
pub fn alert_message(kind: AlertKind, events: &[Observation], locale: &dyn Locale) -> String {
    let (headline, detail) = match kind {
        AlertKind::Lost => (
            locale.outage_headline(),
            duration_since_last_restoration(events)
                .map(|d| locale.uptime_line(&format_chrono_duration(d, locale))),
        ),
        AlertKind::Restored => (
            locale.restored_headline(),
            last_completed_outage_duration(events)
                .map(|d| locale.outage_length_line(&format_chrono_duration(d, locale))),
        ),
    };

    match detail {
        Some(line) => format!("{}\n{}", headline, line),
        None => headline.to_string(),
    }
}
