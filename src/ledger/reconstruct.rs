//! Event log parsing.

use chrono::NaiveDateTime;

use super::models::*;

/// Parse one event log row.
///
/// Returns `None` for anything that is not exactly a timestamp and a known
/// status code.
pub fn parse_row(line: &str) -> Option<Observation> {
    let mut fields = line.trim_end_matches(['\r', '\n']).split(',');
    let (time_field, status_field) = (fields.next()?, fields.next()?);
    if fields.next().is_some() {
        return None;
    }

    let timestamp = NaiveDateTime::parse_from_str(time_field.trim(), TIMESTAMP_FORMAT).ok()?;
    let code: u8 = status_field.trim().parse().ok()?;
    let status = Status::try_from(code).ok()?;

    Some(Observation::new(timestamp, status))
}

/// Rebuild the event log from raw file contents.
///
/// Malformed rows are dropped. The result is sorted by timestamp; rows with
/// equal timestamps keep their file order.
pub fn reconstruct(text: &str) -> EventLog {
    let mut skipped = 0usize;
    let mut events: EventLog = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_row(line);
            if parsed.is_none() {
                skipped += 1;
            }
            parsed
        })
        .collect();

    if skipped > 0 {
        tracing::debug!("Event log: skipped {} malformed rows", skipped);
    }

    events.sort_by_key(|e| e.timestamp);
    events
}
