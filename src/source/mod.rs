// src/source/mod.rs
pub mod twitter;

pub use twitter::TwitterClient;

use chrono::{DateTime, FixedOffset, Utc};
use once_cell::sync::OnceCell;

/// Presentation timezone for observation timestamps (IST, UTC+05:30).
fn ist_offset() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("valid fixed offset")
}

/// One item observed on an upstream feed. Ephemeral: produced by a fetch,
/// consumed by the evaluator and the message renderer, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedItem {
    pub id: String,
    pub text: String,
    /// True when the text carries the upstream retransmission prefix ("RT ").
    pub is_retransmission: bool,
    /// Hash-prefixed tokens in order of first appearance, duplicates kept.
    pub tags: Vec<String>,
    /// Wall-clock at observation, in the fixed presentation timezone.
    pub observed_at: DateTime<FixedOffset>,
}

impl FetchedItem {
    pub fn new(id: String, text: String) -> Self {
        static RE_TAG: OnceCell<regex::Regex> = OnceCell::new();
        let re_tag = RE_TAG.get_or_init(|| regex::Regex::new(r"#\w+").unwrap());

        let is_retransmission = text.starts_with("RT ");
        let tags = re_tag
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect();

        Self {
            id,
            text,
            is_retransmission,
            tags,
            observed_at: Utc::now().with_timezone(&ist_offset()),
        }
    }
}

/// Fetch failure talking to the upstream provider. Never fatal to a worker;
/// surfaced to the requester as a diagnostic and retried at the poll interval.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("content source request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("content source returned status {0}")]
    Status(u16),
}

/// One upstream feed provider. `fetch_latest` performs a single outbound call
/// and extracts the most recent item; a missing/unexpected payload shape is
/// `Ok(None)` ("nothing new"), not an error.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_latest(&self, identity: &str) -> Result<Option<FetchedItem>, FetchError>;
    fn name(&self) -> &'static str;
}
