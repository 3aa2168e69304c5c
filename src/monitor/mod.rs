//! One probe cycle of the live monitor and the weekly report run.

mod state;

pub use state::*;

use chrono::NaiveDateTime;

use crate::config::MonitorConfig;
use crate::ledger::{EventStore, Status};
use crate::notify::Notifier;
use crate::probe::Prober;
use crate::report::{alert_message, build_weekly_report, AlertKind};

/// Apply one probe result to the monitor state.
///
/// An outage alert fires once, when `threshold` consecutive failures are
/// reached; the restoration alert fires only if an outage alert was sent.
pub fn advance(
    state: MonitorState,
    status: Status,
    threshold: u32,
) -> (MonitorState, Option<AlertKind>) {
    let mut next = MonitorState {
        last_status: Some(status),
        ..state
    };
    let mut alert = None;

    match status {
        Status::Down => {
            next.consecutive_failures = state.consecutive_failures.saturating_add(1);
            if next.consecutive_failures >= threshold && !state.alert_sent {
                next.alert_sent = true;
                alert = Some(AlertKind::Lost);
            }
        }
        Status::Up => {
            if state.alert_sent {
                next.alert_sent = false;
                alert = Some(AlertKind::Restored);
            }
            next.consecutive_failures = 0;
        }
    }

    (next, alert)
}

/// Outcome of [`check_once`].
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub status: Status,
    pub recorded: bool,
    pub alert: Option<AlertKind>,
    pub state: MonitorState,
}

/// Probe once, record a transition, alert if needed and persist the state.
///
/// Failures of the log write, the notifier or the state save are logged and
/// never abort the cycle.
pub async fn check_once<P, N>(
    config: &MonitorConfig,
    prober: &P,
    notifier: &N,
    store: &EventStore,
    now: NaiveDateTime,
) -> CycleReport
where
    P: Prober,
    N: Notifier,
{
    let state = load_state(&config.state_path).await;
    let status = prober.probe(&config.target, config.probe_timeout).await;

    let recorded = match store
        .append_if_changed(now, status, state.last_status)
        .await
    {
        Ok(written) => written,
        Err(e) => {
            tracing::error!("Failed to record status change: {}", e);
            false
        }
    };

    let (next, alert) = advance(state, status, config.alert_threshold);

    if let Some(kind) = alert {
        match kind {
            AlertKind::Lost => tracing::warn!("Connectivity to {} lost", config.target),
            AlertKind::Restored => tracing::info!("Connectivity to {} restored", config.target),
        }

        let text = alert_message(kind, &store.load().await, config.locale());
        if let Err(e) = notifier.send(&text).await {
            tracing::error!("Failed to deliver {:?} alert: {}", kind, e);
        }
    }

    if let Err(e) = save_state(&config.state_path, &next).await {
        tracing::error!(
            "Failed to save state to {}: {}",
            config.state_path.display(),
            e
        );
    }

    CycleReport {
        status,
        recorded,
        alert,
        state: next,
    }
}

/// Build the weekly report from the stored log and send it.
pub async fn send_weekly_report<N: Notifier>(
    config: &MonitorConfig,
    notifier: &N,
    store: &EventStore,
    now: NaiveDateTime,
) -> Result<String, crate::notify::NotifyError> {
    let events = store.load().await;
    let text = build_weekly_report(&events, now, config.report_weeks, config.locale());

    if text.is_empty() {
        tracing::info!("Weekly report: no periods requested, nothing to send");
        return Ok(text);
    }

    tracing::info!(
        "Weekly report: {} weeks from {} events",
        config.report_weeks,
        events.len()
    );
    notifier.send(&text).await?;
    Ok(text)
}
