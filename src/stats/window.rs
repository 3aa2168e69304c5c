//! Outage statistics over a time window.

use chrono::Duration;

use crate::ledger::{Observation, OutageStats, Status, TimeWindow};

/// Compute outage statistics for `window` from an ascending event log.
///
/// The status in effect at `window.start` is taken from the newest event
/// before it (up when there is none). An outage still open at `window.end`
/// counts towards the duration but not towards `outage_count`.
pub fn compute(events: &[Observation], window: TimeWindow) -> OutageStats {
    if window.is_empty() {
        return OutageStats::default();
    }

    let mut current = Status::Up;
    let mut cursor = window.start;
    let mut outage = Duration::zero();
    let mut outage_count = 0u32;

    for event in events {
        if event.timestamp < window.start {
            current = event.status;
            continue;
        }
        if event.timestamp >= window.end {
            break;
        }

        if current.is_down() {
            outage = outage + (event.timestamp - cursor);
            if event.status == Status::Up {
                outage_count += 1;
            }
        }
        current = event.status;
        cursor = event.timestamp;
    }

    if cursor < window.end && current.is_down() {
        outage = outage + (window.end - cursor);
    }

    let outage_percentage = seconds_f64(outage) / seconds_f64(window.duration()) * 100.0;

    OutageStats {
        outage_count,
        outage_seconds: outage.num_seconds(),
        outage_percentage,
    }
}

fn seconds_f64(d: Duration) -> f64 {
    d.num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn ev(offset_secs: i64, status: Status) -> Observation {
        Observation::new(t0() + Duration::seconds(offset_secs), status)
    }

    fn window(start_secs: i64, end_secs: i64) -> TimeWindow {
        TimeWindow::new(
            t0() + Duration::seconds(start_secs),
            t0() + Duration::seconds(end_secs),
        )
    }

    fn zero() -> OutageStats {
        OutageStats {
            outage_count: 0,
            outage_seconds: 0,
            outage_percentage: 0.0,
        }
    }

    #[test]
    fn test_degenerate_window_is_zero() {
        let events = vec![ev(-100, Status::Down)];
        assert_eq!(compute(&events, window(0, 0)), zero());
        assert_eq!(compute(&events, window(50, 10)), zero());
    }

    #[test]
    fn test_empty_log_is_zero() {
        assert_eq!(compute(&[], window(0, 3600)), zero());
    }

    #[test]
    fn test_down_before_window_covers_everything() {
        let events = vec![ev(-3600, Status::Down)];
        let stats = compute(&events, window(0, 7200));
        assert_eq!(stats.outage_count, 0);
        assert_eq!(stats.outage_seconds, 7200);
        assert_eq!(stats.outage_percentage, 100.0);
    }

    #[test]
    fn test_completed_outage_inside_window() {
        // t0 down, t1 = t0 + 1800 up, t2 = t1 + 3600 down
        let events = vec![
            ev(0, Status::Down),
            ev(1800, Status::Up),
            ev(5400, Status::Down),
        ];
        let stats = compute(&events, window(-10, 1810));
        assert_eq!(stats.outage_count, 1);
        assert_eq!(stats.outage_seconds, 1800);
        assert!((stats.outage_percentage - 1800.0 / 1820.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_open_outage_counts_duration_not_count() {
        let events = vec![ev(0, Status::Up), ev(600, Status::Down)];
        let stats = compute(&events, window(0, 1000));
        assert_eq!(stats.outage_count, 0);
        assert_eq!(stats.outage_seconds, 400);
        assert!((stats.outage_percentage - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_starting_mid_outage() {
        let events = vec![ev(-500, Status::Down), ev(300, Status::Up)];
        let stats = compute(&events, window(0, 1000));
        assert_eq!(stats.outage_count, 1);
        assert_eq!(stats.outage_seconds, 300);
    }

    #[test]
    fn test_events_after_window_ignored() {
        let events = vec![ev(100, Status::Down), ev(200, Status::Up), ev(5000, Status::Down)];
        let stats = compute(&events, window(0, 1000));
        assert_eq!(stats.outage_count, 1);
        assert_eq!(stats.outage_seconds, 100);
    }

    #[test]
    fn test_event_at_window_end_is_excluded() {
        let events = vec![ev(0, Status::Down), ev(1000, Status::Up)];
        let stats = compute(&events, window(0, 1000));
        // The restoration lands on the open end of the window
        assert_eq!(stats.outage_count, 0);
        assert_eq!(stats.outage_seconds, 1000);
        assert_eq!(stats.outage_percentage, 100.0);
    }

    #[test]
    fn test_repeated_statuses_do_not_double_count() {
        let events = vec![
            ev(0, Status::Down),
            ev(100, Status::Down),
            ev(200, Status::Up),
            ev(300, Status::Up),
        ];
        let stats = compute(&events, window(0, 1000));
        assert_eq!(stats.outage_count, 1);
        assert_eq!(stats.outage_seconds, 200);
    }

    #[test]
    fn test_multiple_outages() {
        let events = vec![
            ev(0, Status::Up),
            ev(100, Status::Down),
            ev(160, Status::Up),
            ev(400, Status::Down),
            ev(430, Status::Up),
            ev(900, Status::Down),
        ];
        let stats = compute(&events, window(0, 1000));
        assert_eq!(stats.outage_count, 2);
        assert_eq!(stats.outage_seconds, 60 + 30 + 100);
        assert!((stats.outage_percentage - 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let events = vec![ev(-50, Status::Down), ev(70, Status::Up), ev(90, Status::Down)];
        let w = window(0, 200);
        assert_eq!(compute(&events, w), compute(&events, w));
    }

    #[test]
    fn test_extending_end_never_decreases_outage() {
        let events = vec![
            ev(10, Status::Down),
            ev(40, Status::Up),
            ev(70, Status::Down),
            ev(95, Status::Up),
            ev(130, Status::Down),
        ];
        let mut previous = 0;
        for end in 0..200 {
            let stats = compute(&events, window(0, end));
            assert!(stats.outage_seconds >= previous, "end={}", end);
            assert!((0.0..=100.0).contains(&stats.outage_percentage));
            previous = stats.outage_seconds;
        }
    }
}
