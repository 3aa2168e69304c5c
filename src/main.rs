//! pingledger - host reachability monitor with an outage ledger.
//!
//! Each invocation either runs one probe cycle or sends the weekly report;
//! scheduling is left to cron or a systemd timer.

mod config;
mod ledger;
mod monitor;
mod notify;
mod probe;
mod report;
mod stats;

use config::MonitorConfig;
use ledger::EventStore;
use notify::ConfiguredNotifier;
use probe::PingProber;

use chrono::{Local, Timelike};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "pingledger", version, about = "Host reachability monitor with an outage ledger")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Probe the target once, record changes and send alerts (default)
    Check,
    /// Send the weekly outage report
    Report,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let cfg = MonitorConfig::load();

    init_tracing(&cfg)?;

    let store = EventStore::new(&cfg.ledger_path);
    tracing::debug!("Using event log at {}", store.path().display());
    let notifier = ConfiguredNotifier::from_config(&cfg)?;

    let local = Local::now().naive_local();
    let now = local.with_nanosecond(0).unwrap_or(local);

    match cli.command.unwrap_or(Command::Check) {
        Command::Check => {
            let cycle = monitor::check_once(&cfg, &PingProber, &notifier, &store, now).await;
            tracing::debug!(
                "Cycle done: status={:?} recorded={} alert={:?} failures={}",
                cycle.status,
                cycle.recorded,
                cycle.alert,
                cycle.state.consecutive_failures
            );
        }
        Command::Report => {
            monitor::send_weekly_report(&cfg, &notifier, &store, now).await?;
        }
    }

    Ok(())
}

fn init_tracing(cfg: &MonitorConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file_layer = match &cfg.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pingledger=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}
