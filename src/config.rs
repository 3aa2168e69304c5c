//! Configuration module for pingledger.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::report::{locale_for, Locale};

/// Upper bound for `report_weeks`, about ten years.
pub const MAX_REPORT_WEEKS: usize = 520;

/// Monitor configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Host to probe (default: "8.8.8.8")
    pub target: String,
    /// Probe timeout (default: 1s)
    pub probe_timeout: Duration,
    /// Consecutive failed probes before an outage alert (default: 3)
    pub alert_threshold: u32,
    /// Event log file (default: "pingledger.csv")
    pub ledger_path: PathBuf,
    /// State snapshot file (default: "pingledger_state.json")
    pub state_path: PathBuf,
    /// Extra log file, appended to alongside stderr
    pub log_file: Option<PathBuf>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    /// Bot API base URL (default: "https://api.telegram.org")
    pub telegram_api: String,
    /// Weeks listed in the weekly report (default: 4)
    pub report_weeks: usize,
    /// Locale code for alert and report text (default: "en")
    pub locale: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            target: "8.8.8.8".to_string(),
            probe_timeout: Duration::from_secs(1),
            alert_threshold: 3,
            ledger_path: PathBuf::from("pingledger.csv"),
            state_path: PathBuf::from("pingledger_state.json"),
            log_file: None,
            telegram_token: None,
            telegram_chat_id: None,
            telegram_api: "https://api.telegram.org".to_string(),
            report_weeks: 4,
            locale: "en".to_string(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PINGLEDGER_TARGET`: host to probe
    /// - `PINGLEDGER_TIMEOUT_SECS`: probe timeout in seconds, fractional allowed
    /// - `PINGLEDGER_ALERT_THRESHOLD`: failed probes before alerting (minimum 1)
    /// - `PINGLEDGER_LEDGER_PATH`: event log file
    /// - `PINGLEDGER_STATE_PATH`: state snapshot file
    /// - `PINGLEDGER_LOG_FILE`: optional log file
    /// - `PINGLEDGER_TELEGRAM_TOKEN`, `PINGLEDGER_TELEGRAM_CHAT_ID`: bot credentials
    /// - `PINGLEDGER_TELEGRAM_API`: bot API base URL
    /// - `PINGLEDGER_REPORT_WEEKS`: weeks in the weekly report (at most 520)
    /// - `PINGLEDGER_LOCALE`: `en` or `uk`
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup. Unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(target) = get("PINGLEDGER_TARGET") {
            cfg.target = target.trim().to_string();
        }

        if let Some(secs) = get("PINGLEDGER_TIMEOUT_SECS") {
            match secs.trim().parse::<f64>() {
                Ok(s) if s.is_finite() && s > 0.0 => cfg.probe_timeout = Duration::from_secs_f64(s),
                _ => tracing::warn!("Ignoring invalid PINGLEDGER_TIMEOUT_SECS: {}", secs),
            }
        }

        if let Some(threshold) = get("PINGLEDGER_ALERT_THRESHOLD") {
            match threshold.trim().parse::<u32>() {
                Ok(n) => cfg.alert_threshold = n.max(1),
                Err(_) => tracing::warn!("Ignoring invalid PINGLEDGER_ALERT_THRESHOLD: {}", threshold),
            }
        }

        if let Some(path) = get("PINGLEDGER_LEDGER_PATH") {
            cfg.ledger_path = PathBuf::from(path);
        }

        if let Some(path) = get("PINGLEDGER_STATE_PATH") {
            cfg.state_path = PathBuf::from(path);
        }

        cfg.log_file = get("PINGLEDGER_LOG_FILE").map(PathBuf::from);
        cfg.telegram_token = get("PINGLEDGER_TELEGRAM_TOKEN");
        cfg.telegram_chat_id = get("PINGLEDGER_TELEGRAM_CHAT_ID");

        if let Some(api) = get("PINGLEDGER_TELEGRAM_API") {
            cfg.telegram_api = api;
        }

        if let Some(weeks) = get("PINGLEDGER_REPORT_WEEKS") {
            match weeks.trim().parse::<usize>() {
                Ok(n) if n > MAX_REPORT_WEEKS => {
                    tracing::warn!(
                        "PINGLEDGER_REPORT_WEEKS {} too large, using {}",
                        n,
                        MAX_REPORT_WEEKS
                    );
                    cfg.report_weeks = MAX_REPORT_WEEKS;
                }
                Ok(n) => cfg.report_weeks = n,
                Err(_) => tracing::warn!("Ignoring invalid PINGLEDGER_REPORT_WEEKS: {}", weeks),
            }
        }

        if let Some(code) = get("PINGLEDGER_LOCALE") {
            if locale_for(&code).is_some() {
                cfg.locale = code;
            } else {
                tracing::warn!("Unknown PINGLEDGER_LOCALE {}, using {}", code, cfg.locale);
            }
        }

        cfg
    }

    /// Text table for the configured locale.
    pub fn locale(&self) -> &'static dyn Locale {
        locale_for(&self.locale).unwrap_or(&crate::report::English)
    }
}
