//! Append-only event log file.

use chrono::{NaiveDateTime, Timelike};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::models::*;
use super::reconstruct::reconstruct;

/// Event log error types.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("failed to write event log {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// File-backed event log.
///
/// One process writes at a time; rows are appended with a single write on a
/// file opened in append mode.
#[derive(Debug, Clone)]
pub struct EventStore {
    path: PathBuf,
}

impl EventStore {
    /// Create a store for the given log path. The file is created on first append.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one observation, truncated to whole seconds.
    pub async fn append(
        &self,
        timestamp: NaiveDateTime,
        status: Status,
    ) -> Result<(), LedgerError> {
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        let row = format!("{}\n", Observation::new(timestamp, status).to_row());

        let written: io::Result<()> = async {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await?;
            file.write_all(row.as_bytes()).await?;
            file.flush().await
        }
        .await;

        written.map_err(|source| LedgerError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Append only when `status` differs from the previous status.
    ///
    /// `previous` is the caller's last known status; when `None`, the newest
    /// row on disk is used instead. Returns whether a row was written.
    pub async fn append_if_changed(
        &self,
        timestamp: NaiveDateTime,
        status: Status,
        previous: Option<Status>,
    ) -> Result<bool, LedgerError> {
        let previous = match previous {
            Some(status) => Some(status),
            None => self.last_status().await,
        };
        if previous == Some(status) {
            return Ok(false);
        }

        self.append(timestamp, status).await?;
        tracing::info!(
            "Event log: recorded transition {:?} -> {:?} at {}",
            previous,
            status,
            timestamp.format(TIMESTAMP_FORMAT)
        );
        Ok(true)
    }

    /// Load the whole log. Never fails; a missing or unreadable file is an empty log.
    pub async fn load(&self) -> EventLog {
        match fs::read_to_string(&self.path).await {
            Ok(text) => reconstruct(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    "Event log: failed to read {}, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Status of the newest observation, if any.
    pub async fn last_status(&self) -> Option<Status> {
        self.load().await.last().map(|e| e.status)
    }
}
