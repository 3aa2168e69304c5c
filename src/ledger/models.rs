//! Ledger model types.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp format used by the event log, local wall-clock time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reachability of the monitored host.
///
/// Stored as `0` for up and `1` for down, both on disk and in the state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Status {
    Up,
    Down,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Up => 0,
            Status::Down => 1,
        }
    }

    pub fn is_down(self) -> bool {
        self == Status::Down
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for Status {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Status::Up),
            1 => Ok(Status::Down),
            other => Err(format!("unknown status code: {}", other)),
        }
    }
}

/// A single stored status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub status: Status,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, status: Status) -> Self {
        Self { timestamp, status }
    }

    /// Render as one event log row, without the trailing newline.
    pub fn to_row(&self) -> String {
        format!(
            "{},{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.status.code()
        )
    }
}

/// Observations sorted ascending by timestamp.
pub type EventLog = Vec<Observation>;

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// True when the window covers no time at all.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length of the window, zero when empty.
    pub fn duration(&self) -> Duration {
        if self.is_empty() {
            Duration::zero()
        } else {
            self.end - self.start
        }
    }
}

/// Aggregate outage figures for one window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OutageStats {
    /// Outages that ended inside the window.
    pub outage_count: u32,
    /// Seconds spent down inside the window, truncated.
    pub outage_seconds: i64,
    /// Share of the window spent down, 0..=100, unrounded.
    pub outage_percentage: f64,
}
