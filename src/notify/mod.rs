//! Alert delivery.

mod telegram;

pub use telegram::*;

use std::future::Future;
use thiserror::Error;

/// Notifier error types.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// A channel that delivers plain-text messages.
pub trait Notifier {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Prints messages to stdout; used when no bot is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>> + Send {
        println!("{}", text);
        std::future::ready(Ok(()))
    }
}

/// The notifier selected by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredNotifier {
    Telegram(TelegramNotifier),
    Console(ConsoleNotifier),
}

impl ConfiguredNotifier {
    /// Telegram when both the token and chat id are present, console otherwise.
    pub fn from_config(config: &crate::config::MonitorConfig) -> Result<Self, NotifyError> {
        match (&config.telegram_token, &config.telegram_chat_id) {
            (Some(token), Some(chat_id)) => Ok(Self::Telegram(TelegramNotifier::new(
                &config.telegram_api,
                token,
                chat_id,
            )?)),
            _ => {
                tracing::info!("Telegram not configured, alerts go to stdout");
                Ok(Self::Console(ConsoleNotifier))
            }
        }
    }
}

impl Notifier for ConfiguredNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        match self {
            Self::Telegram(n) => n.send(text).await,
            Self::Console(n) => n.send(text).await,
        }
    }
}
