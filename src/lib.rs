// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod monitor;
pub mod notify;
pub mod source;

// ---- Re-exports for stable public API ----
pub use crate::monitor::{MonitorEngine, StartResult, SubscriptionKey, SubscriptionRequest};
pub use crate::notify::{DeliveryError, EndpointId, NotifySink, TelegramSink};
pub use crate::source::{ContentSource, FetchError, FetchedItem, TwitterClient};
