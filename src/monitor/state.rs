//! Persisted monitor state between runs.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::ledger::Status;

/// State snapshot error types.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the previous run left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonitorState {
    #[serde(default)]
    pub last_status: Option<Status>,
    #[serde(default)]
    pub consecutive_failures: u32,
    #[serde(default)]
    pub alert_sent: bool,
}

/// Read the snapshot, falling back to the default state when it is missing or corrupt.
pub async fn load_state(path: &Path) -> MonitorState {
    match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<MonitorState>(&bytes) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(file=?path, error=%e, "failed to parse state snapshot, starting fresh");
                MonitorState::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(file=?path, "no state snapshot found (first run?)");
            MonitorState::default()
        }
        Err(e) => {
            tracing::warn!(file=?path, error=%e, "failed reading state snapshot, starting fresh");
            MonitorState::default()
        }
    }
}

/// Write the snapshot through a temp file and rename.
pub async fn save_state(path: &Path, state: &MonitorState) -> Result<(), StateError> {
    let json = serde_json::to_vec(state)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_snapshot_format() {
        let state = MonitorState {
            last_status: Some(Status::Down),
            consecutive_failures: 4,
            alert_sent: true,
        };
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"last_status": 1, "consecutive_failures": 4, "alert_sent": true})
        );

        let fresh: MonitorState =
            serde_json::from_str(r#"{"last_status": null, "consecutive_failures": 0, "alert_sent": false}"#)
                .unwrap();
        assert_eq!(fresh, MonitorState::default());
    }

    #[test]
    fn test_missing_fields_default() {
        let partial: MonitorState = serde_json::from_str(r#"{"last_status": 0}"#).unwrap();
        assert_eq!(partial.last_status, Some(Status::Up));
        assert_eq!(partial.consecutive_failures, 0);
        assert!(!partial.alert_sent);
    }

    #[test]
    fn test_save_and_load() {
        tokio_test::block_on(async {
            let dir = tempdir().unwrap();
            let path = dir.path().join("state.json");

            assert_eq!(load_state(&path).await, MonitorState::default());

            let state = MonitorState {
                last_status: Some(Status::Up),
                consecutive_failures: 0,
                alert_sent: false,
            };
            save_state(&path, &state).await.unwrap();
            assert_eq!(load_state(&path).await, state);
        });
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();
        assert_eq!(load_state(&path).await, MonitorState::default());

        tokio::fs::write(&path, br#"{"last_status": 5}"#).await.unwrap();
        assert_eq!(load_state(&path).await, MonitorState::default());
    }
}
