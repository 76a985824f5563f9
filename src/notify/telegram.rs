use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use super::{DeliveryError, EndpointId, NotifySink};

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

/// Notification sink backed by the Telegram Bot API `sendMessage` call.
#[derive(Clone)]
pub struct TelegramSink {
    token: String,
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl TelegramSink {
    pub fn new(token: String) -> Self {
        Self {
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Point the sink at a different API host. Used by tests.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait::async_trait]
impl NotifySink for TelegramSink {
    async fn deliver(&self, endpoint: EndpointId, text: &str) -> Result<(), DeliveryError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let payload = SendMessage {
            chat_id: endpoint.0,
            text,
        };

        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DeliveryError::Status(status.as_u16(), body));
        }
        Ok(())
    }
}
