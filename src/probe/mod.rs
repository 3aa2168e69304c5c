//! Reachability probe for the monitored host.
//!
//! The monitor only needs a binary answer, so every probe failure is
//! reported as [`Status::Down`].

mod ping;

pub use ping::*;

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::ledger::Status;

/// Probe error types.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("command failed: {0}")]
    Command(String),
}

/// Something that can tell whether a host is reachable right now.
pub trait Prober {
    fn probe(&self, address: &str, timeout: Duration) -> impl Future<Output = Status> + Send;
}

/// ICMP echo prober.
#[derive(Debug, Clone, Copy, Default)]
pub struct PingProber;

impl Prober for PingProber {
    fn probe(&self, address: &str, timeout: Duration) -> impl Future<Output = Status> + Send {
        let address = address.to_string();
        async move {
            match run_ping_probe(&address, timeout).await {
                Ok(rtt) => {
                    tracing::debug!("Ping {}: reply in {:?}", address, rtt);
                    Status::Up
                }
                Err(e) => {
                    tracing::info!("Ping {}: no reply ({})", address, e);
                    Status::Down
                }
            }
        }
    }
}
