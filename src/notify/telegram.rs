//! Telegram Bot API notifier.

use serde::Serialize;
use std::future::Future;
use std::time::Duration;

use super::{Notifier, NotifyError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends messages to one chat through `sendMessage`.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    url: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(api_base: &str, token: &str, chat_id: &str) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: send_message_url(api_base, token),
            chat_id: chat_id.to_string(),
        })
    }

    async fn post(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

impl Notifier for TelegramNotifier {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>> + Send {
        self.post(text)
    }
}

fn send_message_url(api_base: &str, token: &str) -> String {
    format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), token)
}
