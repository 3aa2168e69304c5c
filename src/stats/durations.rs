//! Backward scans for the durations quoted in alerts.

use chrono::Duration;

use crate::ledger::{Observation, Status};

/// Length of the most recent outage that has ended.
pub fn last_completed_outage_duration(events: &[Observation]) -> Option<Duration> {
    last_span_between(events, Status::Down, Status::Up)
}

/// Time between the most recent restoration and the outage that followed it.
pub fn duration_since_last_restoration(events: &[Observation]) -> Option<Duration> {
    last_span_between(events, Status::Up, Status::Down)
}

/// Walk adjacent pairs from newest to oldest and return the gap of the
/// first pair matching `from -> to`.
fn last_span_between(events: &[Observation], from: Status, to: Status) -> Option<Duration> {
    events
        .windows(2)
        .rev()
        .find(|pair| pair[0].status == from && pair[1].status == to)
        .map(|pair| pair[1].timestamp - pair[0].timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn ev(minutes: i64, status: Status) -> Observation {
        Observation::new(base() + Duration::minutes(minutes), status)
    }

    #[test]
    fn test_last_completed_outage() {
        let events = vec![ev(0, Status::Up), ev(10, Status::Down), ev(25, Status::Up)];
        assert_eq!(
            last_completed_outage_duration(&events),
            Some(Duration::minutes(15))
        );
    }

    #[test]
    fn test_last_completed_outage_prefers_newest() {
        let events = vec![
            ev(0, Status::Down),
            ev(60, Status::Up),
            ev(100, Status::Down),
            ev(105, Status::Up),
            ev(200, Status::Down),
        ];
        assert_eq!(
            last_completed_outage_duration(&events),
            Some(Duration::minutes(5))
        );
    }

    #[test]
    fn test_no_result_for_short_logs() {
        assert_eq!(last_completed_outage_duration(&[]), None);
        assert_eq!(last_completed_outage_duration(&[ev(0, Status::Down)]), None);
        assert_eq!(duration_since_last_restoration(&[ev(0, Status::Up)]), None);
    }

    #[test]
    fn test_no_matching_pair() {
        let events = vec![ev(0, Status::Up), ev(10, Status::Down)];
        assert_eq!(last_completed_outage_duration(&events), None);

        let events = vec![ev(0, Status::Down), ev(10, Status::Up)];
        assert_eq!(duration_since_last_restoration(&events), None);
    }

    #[test]
    fn test_duration_since_last_restoration() {
        let events = vec![
            ev(0, Status::Down),
            ev(30, Status::Up),
            ev(150, Status::Down),
        ];
        assert_eq!(
            duration_since_last_restoration(&events),
            Some(Duration::minutes(120))
        );
    }
}
