// src/source/twitter.rs
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::source::{ContentSource, FetchError, FetchedItem};

const DEFAULT_BASE_URL: &str = "https://twitter241.p.rapidapi.com";
const RAPIDAPI_HOST: &str = "twitter241.p.rapidapi.com";

/// The only payload path we rely on. Everything else in the provider's
/// response is opaque; if this path is missing the fetch degrades to
/// "no item" instead of failing.
const LATEST_ITEM_POINTER: &str =
    "/result/timeline/instructions/1/entries/0/content/itemContent/tweet_results/result/legacy";

/// Content source client for the RapidAPI Twitter gateway. Stateless; one
/// GET per `fetch_latest` call, most-recent-first, bounded page size.
#[derive(Clone)]
pub struct TwitterClient {
    api_key: String,
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl TwitterClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Point the client at a different gateway. Used by tests.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Pull the single most recent item out of the provider's deeply nested
    /// response. Any missing step on the path means "nothing new".
    pub fn newest_item(body: &Value) -> Option<FetchedItem> {
        let legacy = body.pointer(LATEST_ITEM_POINTER)?;
        let id = legacy.get("id_str")?.as_str()?;
        let text = legacy.get("full_text")?.as_str()?;
        Some(FetchedItem::new(id.to_string(), text.to_string()))
    }
}

#[async_trait::async_trait]
impl ContentSource for TwitterClient {
    async fn fetch_latest(&self, identity: &str) -> Result<Option<FetchedItem>, FetchError> {
        let url = format!("{}/user-tweets?user={}&count=20", self.base_url, identity);
        let resp = self
            .client
            .get(&url)
            .header("x-rapidapi-host", RAPIDAPI_HOST)
            .header("x-rapidapi-key", &self.api_key)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Value = resp.json().await?;
        Ok(Self::newest_item(&body))
    }

    fn name(&self) -> &'static str {
        "twitter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_item_from_fixture() {
        let body: Value =
            serde_json::from_str(include_str!("../../tests/fixtures/user_tweets.json")).unwrap();
        let item = TwitterClient::newest_item(&body).expect("fixture has an item");
        assert_eq!(item.id, "1890000000000000001");
        assert!(item.text.starts_with("RT "));
        assert!(item.is_retransmission);
    }

    #[test]
    fn missing_path_degrades_to_none() {
        let body: Value = serde_json::json!({"result": {"timeline": {"instructions": []}}});
        assert!(TwitterClient::newest_item(&body).is_none());
    }

    #[test]
    fn non_object_payload_degrades_to_none() {
        let body: Value = serde_json::json!("rate limit exceeded");
        assert!(TwitterClient::newest_item(&body).is_none());
    }

    #[test]
    fn missing_text_field_degrades_to_none() {
        // Path exists but legacy block lacks full_text.
        let body: Value = serde_json::json!({
            "result": {"timeline": {"instructions": [
                {},
                {"entries": [{"content": {"itemContent": {"tweet_results": {"result": {"legacy": {"id_str": "5"}}}}}}]}
            ]}}
        });
        assert!(TwitterClient::newest_item(&body).is_none());
    }
}
