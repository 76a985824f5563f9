pub mod telegram;

pub use telegram::TelegramSink;

use std::fmt;

/// Opaque identifier of a notification destination (a Telegram chat id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointId(pub i64);

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Delivery failure at the notification boundary. Logged by the caller,
/// never retried, never stops a polling worker.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("notification send failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("notification endpoint returned status {0}: {1}")]
    Status(u16, String),
}

/// Best-effort outbound message delivery to one endpoint.
#[async_trait::async_trait]
pub trait NotifySink: Send + Sync {
    async fn deliver(&self, endpoint: EndpointId, text: &str) -> Result<(), DeliveryError>;
}
